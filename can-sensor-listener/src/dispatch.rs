//! Per-frame classification and decoding
//!
//! The dispatcher is a pure per-frame function: it recognizes the two known
//! frame IDs, decodes their payloads into the sensor store stamped with the
//! injected clock's "now", and dumps everything else to the log. It keeps no
//! state between calls except through the store.

use crate::clock::Clock;
use crate::dump;
use crate::store::SensorStore;
use crate::types::{BusFrame, Result, SensorKind};
use byteorder::{ByteOrder, LittleEndian};
use std::sync::Arc;

/// Frame ID carrying indicated airspeed in raw knots
pub const ID_INDICATED_AIRSPEED: u32 = 0x28;
/// Frame ID carrying flap position in raw percent
pub const ID_FLAP_POSITION: u32 = 0x60;

/// Classifies incoming frames and decodes recognized ones into the store
pub struct FrameDispatcher {
    store: Arc<SensorStore>,
    clock: Arc<dyn Clock>,
    bus_label: String,
}

impl FrameDispatcher {
    /// Create a dispatcher writing into `store`, stamping updates with
    /// `clock` and labelling dump lines with `bus_label`.
    pub fn new(store: Arc<SensorStore>, clock: Arc<dyn Clock>, bus_label: impl Into<String>) -> Self {
        Self {
            store,
            clock,
            bus_label: bus_label.into(),
        }
    }

    /// Handle one frame: decode a recognized ID or dump an unknown one.
    ///
    /// Never fails and never blocks on I/O. Callers must not invoke this
    /// concurrently with itself; per-channel update ordering follows call
    /// order.
    pub fn dispatch(&self, frame: &BusFrame) {
        match frame.id {
            ID_INDICATED_AIRSPEED => self.decode(frame, SensorKind::IndicatedAirspeed),
            ID_FLAP_POSITION => self.decode(frame, SensorKind::FlapPosition),
            _ => log::info!("{}", dump::dump_line(&self.bus_label, frame)),
        }
    }

    /// Decode the little-endian u16 at payload offset 0 into `kind`.
    ///
    /// A frame declaring fewer than 2 payload bytes is skipped with a
    /// warning; the store is left untouched. (Reading the zero-padded buffer
    /// past the declared length would silently fabricate a value.)
    fn decode(&self, frame: &BusFrame, kind: SensorKind) {
        let payload = frame.payload();
        if payload.len() < 2 {
            log::warn!(
                "Short {} frame: declared length {} < 2, skipping decode",
                kind,
                frame.len
            );
            return;
        }

        let value = LittleEndian::read_u16(&payload[..2]);
        self.store.update(kind, value, self.clock.now());
        log::debug!("Received {}: {} {}", kind, value, kind.unit());
    }
}

/// Drain a frame source, dispatching each frame exactly once, in order.
///
/// This single consumer loop is the serialization guarantee the store's
/// lightweight per-channel locks assume. A frame read error is terminal and
/// propagates out; the source ending cleanly returns `Ok(())`.
pub fn run<I>(frames: I, dispatcher: &FrameDispatcher) -> Result<()>
where
    I: IntoIterator<Item = Result<BusFrame>>,
{
    for frame in frames {
        dispatcher.dispatch(&frame?);
    }
    Ok(())
}
