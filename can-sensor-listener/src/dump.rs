//! Hex/ASCII dump formatting for unrecognized frames
//!
//! The line layout is byte-for-byte compatible with the candump-style output
//! existing log tooling parses: bus label, ID in hex, bracketed declared
//! length in hex, the trimmed payload as uppercase hex bytes, and a printable
//! rendering in single quotes.

use crate::types::BusFrame;
use std::fmt::Write;

/// Strip all trailing bytes equal to `0x00` from a buffer.
///
/// Only trailing zeros are removed; interior zeros survive. An empty or
/// all-zero buffer trims to empty.
pub fn trim_trailing_zeros(buf: &[u8]) -> &[u8] {
    let end = buf
        .iter()
        .rposition(|&b| b != 0x00)
        .map_or(0, |pos| pos + 1);
    &buf[..end]
}

/// Render bytes as ASCII, substituting `.` for non-printable values.
///
/// Bytes below 32 or above 126 become `.`; everything else passes through as
/// its character value. The result has the same length as the input. This
/// matches how candump from can-utils renders payloads.
pub fn printable_string(buf: &[u8]) -> String {
    buf.iter()
        .map(|&b| if b < 32 || b > 126 { '.' } else { b as char })
        .collect()
}

/// Format one dump line for an unrecognized frame.
///
/// Trimming operates on the full fixed-capacity buffer, not just the first
/// `len` declared bytes; the declared length still appears in the bracketed
/// field.
pub fn dump_line(bus_label: &str, frame: &BusFrame) -> String {
    let trimmed = trim_trailing_zeros(&frame.data);

    let mut hex = String::with_capacity(trimmed.len() * 3);
    for (i, byte) in trimmed.iter().enumerate() {
        if i > 0 {
            hex.push(' ');
        }
        let _ = write!(hex, "{:02X}", byte);
    }

    format!(
        "{:<3} {:<4x} {:<3} {:<24} '{}'",
        bus_label,
        frame.id,
        format!("[{:x}]", frame.len),
        hex,
        printable_string(trimmed),
    )
}
