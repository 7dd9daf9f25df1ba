//! Engine configuration parameters
//!
//! All tunable parameters for the alarm engine and its adapters.
//! Values can be overridden through a [`ConfigPort`](crate::app::ports::ConfigPort).

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Core engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityConfig {
    // --- Image classification ---
    /// Minimum label confidence (percent, 0-100) for a cat to count as present
    pub cat_confidence_threshold: f32,

    // --- Storage ---
    /// Maximum number of sensors a storage-backed repository accepts
    pub max_sensors: u8,

    // --- Contact inputs ---
    /// Consecutive identical samples before a contact edge is reported
    pub contact_debounce_samples: u8,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            cat_confidence_threshold: 50.0,
            max_sensors: 32,
            contact_debounce_samples: 3,
        }
    }
}

impl SecurityConfig {
    /// Range-check every field. Out-of-range values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&self.cat_confidence_threshold) {
            return Err(ConfigError::ValidationFailed(
                "cat_confidence_threshold must be 0.0–100.0",
            ));
        }
        if !(1..=64).contains(&self.max_sensors) {
            return Err(ConfigError::ValidationFailed("max_sensors must be 1–64"));
        }
        if !(1..=50).contains(&self.contact_debounce_samples) {
            return Err(ConfigError::ValidationFailed(
                "contact_debounce_samples must be 1–50",
            ));
        }
        Ok(())
    }
}
