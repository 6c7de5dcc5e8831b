//! CAN Sensor Listener Library
//!
//! Attaches to a vehicle CAN bus, decodes a small set of known frame IDs
//! into typed, timestamped sensor values held in shared memory, and logs
//! every unrecognized frame as a candump-style hex/ASCII line.
//!
//! # Architecture
//!
//! - [`source::CanBusSource`] opens a SocketCAN interface and yields frames
//! - [`dispatch::FrameDispatcher`] classifies each frame: recognized IDs are
//!   decoded into the store, the rest are dumped to the log
//! - [`store::SensorStore`] holds the latest (value, timestamp) pair per
//!   channel behind one independent lock per channel, so readers on other
//!   threads never block the bus loop or see a half-updated pair
//! - [`clock::Clock`] is injected into the dispatcher so observation
//!   timestamps come from one process-wide source (and tests can freeze it)
//!
//! The library does NOT:
//! - Transmit frames or filter at the transport level
//! - Persist values across restarts
//! - Decode any protocol beyond the two tracked sensor IDs
//!
//! # Example Usage
//!
//! ```no_run
//! use can_sensor_listener::{
//!     CanBusSource, Clock, FrameDispatcher, ListenerConfig, SensorStore, SystemClock,
//! };
//! use std::sync::Arc;
//!
//! let config = ListenerConfig::new().with_interface("can0");
//! let store = Arc::new(SensorStore::new());
//! let clock: Arc<dyn Clock> = Arc::new(SystemClock);
//!
//! let source = CanBusSource::open(&config)?;
//! let dispatcher = FrameDispatcher::new(Arc::clone(&store), clock, config.label());
//!
//! // Blocks for the lifetime of the listener; other threads read `store`.
//! can_sensor_listener::run(source, &dispatcher)?;
//! # Ok::<(), can_sensor_listener::ListenerError>(())
//! ```

// Public modules
pub mod clock;
pub mod config;
pub mod dispatch;
pub mod dump;
pub mod source;
pub mod store;
pub mod types;

// Re-export main types for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ListenerConfig;
pub use dispatch::{run, FrameDispatcher, ID_FLAP_POSITION, ID_INDICATED_AIRSPEED};
pub use source::{CanBusSource, StopHandle};
pub use store::{SensorChannel, SensorSnapshot, SensorStore};
pub use types::{BusFrame, ListenerError, Result, SensorKind, SensorReading, Timestamp};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
