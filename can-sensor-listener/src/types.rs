//! Core types for the CAN sensor listener library
//!
//! This module defines the frame type consumed by the dispatcher, the set of
//! tracked sensor channels, and the library error type. The listener is
//! stateless beyond the per-channel latest-value cache in [`crate::store`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp type used throughout the listener
pub type Timestamp = DateTime<Utc>;

/// Result type for listener operations
pub type Result<T> = std::result::Result<T, ListenerError>;

/// Maximum payload size of a classic CAN 2.0 frame
pub const MAX_FRAME_LEN: usize = 8;

/// A single CAN 2.0 data frame as delivered by the bus
///
/// The payload buffer is fixed-capacity: bytes past the declared length are
/// always zero, matching the kernel's `can_frame` struct. The unrecognized
/// frame dump deliberately formats the full buffer, not just the declared
/// prefix, so the buffer is part of the type's contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFrame {
    /// Raw CAN message ID (EFF/RTR/ERR flags already stripped)
    pub id: u32,
    /// Declared number of data bytes actually carried (0..=8)
    pub len: u8,
    /// Fixed-capacity payload buffer, zero past `len`
    pub data: [u8; MAX_FRAME_LEN],
}

impl BusFrame {
    /// Create a frame from an ID and payload slice.
    ///
    /// The payload is copied into the fixed buffer; the remainder stays
    /// zeroed. Fails if the payload exceeds the classic CAN limit.
    pub fn new(id: u32, payload: &[u8]) -> Result<Self> {
        if payload.len() > MAX_FRAME_LEN {
            return Err(ListenerError::FrameTooLong { len: payload.len() });
        }
        let mut data = [0u8; MAX_FRAME_LEN];
        data[..payload.len()].copy_from_slice(payload);
        Ok(Self {
            id,
            len: payload.len() as u8,
            data,
        })
    }

    /// The declared payload, i.e. the first `len` bytes of the buffer
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.len as usize]
    }
}

/// One tracked physical quantity with a latest-value cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SensorKind {
    /// Indicated airspeed, raw knots as transmitted
    IndicatedAirspeed,
    /// Flap position, raw percent as transmitted
    FlapPosition,
}

impl SensorKind {
    /// All tracked channels, in reporting order
    pub const ALL: [SensorKind; 2] = [SensorKind::IndicatedAirspeed, SensorKind::FlapPosition];

    /// Engineering unit of the raw transmitted value
    pub fn unit(&self) -> &'static str {
        match self {
            SensorKind::IndicatedAirspeed => "kt",
            SensorKind::FlapPosition => "%",
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorKind::IndicatedAirspeed => write!(f, "indicated-airspeed"),
            SensorKind::FlapPosition => write!(f, "flap-position"),
        }
    }
}

/// A consistent (value, observation time) pair read from a channel
///
/// `observed_at` is `None` only for a channel that has never been updated
/// since startup; after the first update it is always `Some`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SensorReading {
    /// Latest decoded value in raw transmitted units
    pub value: u16,
    /// Time the update producing `value` was observed
    pub observed_at: Option<Timestamp>,
}

/// Errors that can occur while attaching to or draining the bus
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    #[error("Failed to open CAN interface {interface}: {source}")]
    InterfaceOpen {
        interface: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read frame from CAN socket: {0}")]
    FrameRead(#[from] std::io::Error),

    #[error("Frame payload of {len} bytes exceeds the {MAX_FRAME_LEN} byte CAN limit")]
    FrameTooLong { len: usize },
}
