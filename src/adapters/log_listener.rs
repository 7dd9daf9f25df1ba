//! Log-based status listener adapter.
//!
//! Implements [`StatusListener`] by writing every engine callback to the
//! `log` facade.  A panel or push-notification adapter would implement the
//! same trait.

use log::{info, warn};

use crate::app::ports::StatusListener;
use crate::fsm::AlarmStatus;

/// Adapter that logs every callback.
pub struct LogStatusListener;

impl LogStatusListener {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogStatusListener {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusListener for LogStatusListener {
    fn notify(&mut self, status: AlarmStatus) {
        match status {
            AlarmStatus::Alarm => warn!("ALARM | {:?} ({})", status, status),
            _ => info!("ALARM | {:?} ({})", status, status),
        }
    }

    fn cat_detected(&mut self, detected: bool) {
        info!("CAMERA | cat_detected={}", detected);
    }

    fn sensor_status_changed(&mut self) {
        info!("SENSOR | activity changed");
    }
}
