//! Listener configuration
//!
//! The minimal configuration the library needs to attach to a bus. CLI
//! flags, config files, and snapshot reporting live in the application
//! layer (can-sensor-cli).

use serde::{Deserialize, Serialize};

/// Configuration for attaching to a CAN interface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenerConfig {
    /// Name of the CAN network interface to attach to
    #[serde(default = "default_interface")]
    pub interface: String,

    /// Bus name token used in unrecognized-frame dump lines
    /// (defaults to the interface name)
    #[serde(default)]
    pub bus_label: Option<String>,

    /// Socket read timeout; bounds how long stopping the listener can take
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
}

fn default_interface() -> String {
    "can0".to_string()
}

fn default_read_timeout_ms() -> u64 {
    500
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            interface: default_interface(),
            bus_label: None,
            read_timeout_ms: default_read_timeout_ms(),
        }
    }
}

impl ListenerConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the CAN interface name
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interface = interface.into();
        self
    }

    /// Builder method: override the dump-line bus label
    pub fn with_bus_label(mut self, label: impl Into<String>) -> Self {
        self.bus_label = Some(label.into());
        self
    }

    /// Builder method: set the socket read timeout in milliseconds
    pub fn with_read_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.read_timeout_ms = timeout_ms;
        self
    }

    /// The effective bus label for dump lines
    pub fn label(&self) -> &str {
        self.bus_label.as_deref().unwrap_or(&self.interface)
    }
}
