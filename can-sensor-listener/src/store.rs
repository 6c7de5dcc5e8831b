//! Thread-safe latest-value store for the tracked sensor channels
//!
//! Each channel owns its own mutex around a (value, observation time) pair,
//! so updates to different channels never contend and a reader can never see
//! the value of one update paired with the timestamp of another. There is no
//! global lock and no raw field access; all traffic goes through the
//! synchronized accessors.

use crate::types::{SensorKind, SensorReading, Timestamp};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// One tracked quantity's latest-value cache
///
/// Created zero-valued at startup; mutated only by the dispatcher on receipt
/// of a matching frame; read concurrently from any thread.
#[derive(Debug, Default)]
pub struct SensorChannel {
    reading: Mutex<SensorReading>,
}

impl SensorChannel {
    /// Write a new value and its observation time as one atomic pair
    pub fn update(&self, value: u16, observed_at: Timestamp) {
        let mut reading = self.reading.lock();
        reading.value = value;
        reading.observed_at = Some(observed_at);
    }

    /// Copy out the current (value, observation time) pair
    pub fn read(&self) -> SensorReading {
        *self.reading.lock()
    }
}

/// The fixed set of sensor channels, one independent lock per channel
#[derive(Debug, Default)]
pub struct SensorStore {
    indicated_airspeed: SensorChannel,
    flap_position: SensorChannel,
}

impl SensorStore {
    /// Create the store with all channels zero-valued and never-observed
    pub fn new() -> Self {
        Self::default()
    }

    /// The channel for a sensor kind, for external readers
    pub fn channel(&self, kind: SensorKind) -> &SensorChannel {
        match kind {
            SensorKind::IndicatedAirspeed => &self.indicated_airspeed,
            SensorKind::FlapPosition => &self.flap_position,
        }
    }

    /// Update one channel; see [`SensorChannel::update`]
    pub fn update(&self, kind: SensorKind, value: u16, observed_at: Timestamp) {
        self.channel(kind).update(value, observed_at);
    }

    /// Read one channel; see [`SensorChannel::read`]
    pub fn reading(&self, kind: SensorKind) -> SensorReading {
        self.channel(kind).read()
    }

    /// A serializable snapshot of all channels.
    ///
    /// Each channel is read under its own lock, so every pair is internally
    /// consistent; no cross-channel consistency is promised.
    pub fn snapshot(&self) -> SensorSnapshot {
        SensorSnapshot {
            indicated_airspeed: self.indicated_airspeed.read(),
            flap_position: self.flap_position.read(),
        }
    }
}

/// Point-in-time readings of all channels, for status reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    /// Indicated airspeed reading, raw knots
    pub indicated_airspeed: SensorReading,
    /// Flap position reading, raw percent
    pub flap_position: SensorReading,
}
