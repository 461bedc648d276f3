//! Dispatcher configuration.
//!
//! Typically written as a small TOML file by the host application:
//!
//! ```toml
//! initial_capacity       = 64
//! total_frames           = 600
//! report_interval_frames = 60
//! ```
//!
//! Every field is optional; missing fields take the [`Default`] value.

use std::path::Path;

use serde::Deserialize;

use crate::{TickError, TickResult};

/// Capacity of a registry's first allocation when nothing else is configured.
pub const DEFAULT_INITIAL_CAPACITY: usize = 32;

/// Top-level configuration shared by the dispatcher and every registry it
/// creates.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatchConfig {
    /// Slots allocated on a registry's first `add`.  Later growth doubles.
    /// Must be non-zero: doubling from zero never grows.
    pub initial_capacity: usize,

    /// Frames executed by `Dispatcher::run`.
    pub total_frames: u64,

    /// Call `DispatchObserver::on_report` every N frames.  0 disables reports.
    pub report_interval_frames: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            initial_capacity:       DEFAULT_INITIAL_CAPACITY,
            total_frames:           60,
            report_interval_frames: 0,
        }
    }
}

impl DispatchConfig {
    /// Parse and validate a config from TOML text.
    pub fn from_toml_str(text: &str) -> TickResult<Self> {
        let config: DispatchConfig =
            toml::from_str(text).map_err(|e| TickError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> TickResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Reject values the registry cannot work with.
    pub fn validate(&self) -> TickResult<()> {
        if self.initial_capacity == 0 {
            return Err(TickError::Config(
                "initial_capacity must be greater than zero".into(),
            ));
        }
        if self.initial_capacity > u32::MAX as usize {
            return Err(TickError::Config(format!(
                "initial_capacity {} exceeds the slot id range",
                self.initial_capacity
            )));
        }
        Ok(())
    }
}
