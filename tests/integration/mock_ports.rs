//! Test doubles shared by the integration suite.
//!
//! `ScriptedPin` replays a fixed list of GPIO levels; `StatusLog` records
//! every listener callback behind a shared handle so tests can inspect it
//! after the service has taken ownership of the boxed listener.

use core::convert::Infallible;
use embedded_hal::digital::{ErrorType, InputPin};
use homealarm::app::ports::StatusListener;
use homealarm::fsm::AlarmStatus;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

// ── ScriptedPin ──────────────────────────────────────────────

pub struct ScriptedPin {
    levels: VecDeque<bool>,
    /// Level returned once the script runs out.
    idle_level: bool,
}

impl ScriptedPin {
    pub fn new(levels: &[bool], idle_level: bool) -> Self {
        Self {
            levels: levels.iter().copied().collect(),
            idle_level,
        }
    }
}

impl ErrorType for ScriptedPin {
    type Error = Infallible;
}

impl InputPin for ScriptedPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.levels.pop_front().unwrap_or(self.idle_level))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|h| !h)
    }
}

// ── StatusLog ────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct StatusLog {
    pub statuses: Rc<RefCell<Vec<AlarmStatus>>>,
    pub sensor_changes: Rc<RefCell<u32>>,
}

#[allow(dead_code)]
impl StatusLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<AlarmStatus> {
        self.statuses.borrow().last().copied()
    }

    pub fn all(&self) -> Vec<AlarmStatus> {
        self.statuses.borrow().clone()
    }

    pub fn sensor_changes(&self) -> u32 {
        *self.sensor_changes.borrow()
    }
}

impl StatusListener for StatusLog {
    fn notify(&mut self, status: AlarmStatus) {
        self.statuses.borrow_mut().push(status);
    }

    fn sensor_status_changed(&mut self) {
        *self.sensor_changes.borrow_mut() += 1;
    }
}
