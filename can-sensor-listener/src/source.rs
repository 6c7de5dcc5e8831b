//! SocketCAN frame source and bus attachment
//!
//! Opens the configured interface and yields [`BusFrame`]s as an iterator.
//! Failure to open the interface is fatal to the listener (fail-fast, no
//! retry). Remote and error frames never reach the dispatcher; they are
//! noted in the log and skipped. A read timeout is applied so the blocking
//! loop can observe its stop flag between frames.

use crate::config::ListenerConfig;
use crate::types::{BusFrame, ListenerError, Result, MAX_FRAME_LEN};
use socketcan::{CanFrame, CanSocket, EmbeddedFrame, Frame, Socket};
use std::io::ErrorKind;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Cloneable handle that ends a [`CanBusSource`]'s frame stream
///
/// Safe to trip from any thread, typically a signal handler. The source
/// notices at the next read timeout.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stop: Arc<AtomicBool>,
}

impl StopHandle {
    /// Ask the source to end its stream
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }
}

/// A connected SocketCAN interface yielding data frames
pub struct CanBusSource {
    socket: CanSocket,
    interface: String,
    stop: StopHandle,
    error_frames: u64,
}

impl CanBusSource {
    /// Resolve and open the configured interface.
    ///
    /// Applies the configured read timeout so the stream can be stopped.
    /// Any failure here is fatal to the listening subsystem.
    pub fn open(config: &ListenerConfig) -> Result<Self> {
        let open_err = |source| ListenerError::InterfaceOpen {
            interface: config.interface.clone(),
            source,
        };

        let socket = CanSocket::open(&config.interface).map_err(open_err)?;
        socket
            .set_read_timeout(Duration::from_millis(config.read_timeout_ms))
            .map_err(open_err)?;

        log::info!("Listening on CAN interface {}", config.interface);

        Ok(Self {
            socket,
            interface: config.interface.clone(),
            stop: StopHandle::default(),
            error_frames: 0,
        })
    }

    /// Handle for stopping the stream from another thread
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// The interface this source is attached to
    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// Number of error frames seen on the bus so far
    pub fn error_frame_count(&self) -> u64 {
        self.error_frames
    }
}

impl Iterator for CanBusSource {
    type Item = Result<BusFrame>;

    /// Block until the next data frame, the stop flag, or a hard I/O error.
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.stop.is_stopped() {
                log::info!("Stopping listener on {}", self.interface);
                return None;
            }

            match self.socket.read_frame() {
                Ok(CanFrame::Data(frame)) => {
                    // DLC of a classic CAN data frame never exceeds the
                    // buffer, so construction cannot fail here.
                    debug_assert!(frame.data().len() <= MAX_FRAME_LEN);
                    return Some(BusFrame::new(frame.raw_id(), frame.data()));
                }
                Ok(CanFrame::Remote(frame)) => {
                    log::debug!("Ignoring remote frame for ID {:x}", frame.raw_id());
                }
                Ok(CanFrame::Error(frame)) => {
                    self.error_frames += 1;
                    log::warn!(
                        "Error frame on {} ({} so far): {:?}",
                        self.interface,
                        self.error_frames,
                        frame
                    );
                }
                Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                    // Read timeout; loop to re-check the stop flag
                }
                Err(e) => return Some(Err(ListenerError::FrameRead(e))),
            }
        }
    }
}
