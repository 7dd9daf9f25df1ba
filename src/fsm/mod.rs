//! Arming and alarm status state machine.
//!
//! ```text
//!              [sensor on, armed]          [sensor on, armed]
//!   NO_ALARM ───────────────────▶ PENDING ───────────────────▶ ALARM
//!      ▲                             │                           │
//!      └──────[sensor off]───────────┘                           │
//!      ▲                                                         │
//!      └─────────────[disarm · re-arm · direct reset]────────────┘
//! ```
//!
//! `ALARM` is sticky: sensor events never leave it.  The transition rules
//! themselves are pure functions in [`transitions`]; the
//! [`SecurityService`](crate::app::service::SecurityService) reads the
//! current state from the repository, asks the rules for the next alarm
//! status, and persists the answer.

pub mod transitions;

use core::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Arming status
// ---------------------------------------------------------------------------

/// Operating mode of the alarm system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ArmingStatus {
    #[default]
    Disarmed,
    /// Occupants are home; perimeter and camera are watched.
    ArmedHome,
    /// House is empty; every sensor counts.
    ArmedAway,
}

impl ArmingStatus {
    /// Whether sensor activations may escalate the alarm in this mode.
    pub const fn is_armed(self) -> bool {
        matches!(self, Self::ArmedHome | Self::ArmedAway)
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Disarmed => "Disarmed",
            Self::ArmedHome => "Armed - At Home",
            Self::ArmedAway => "Armed - Away",
        }
    }
}

impl fmt::Display for ArmingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

// ---------------------------------------------------------------------------
// Alarm status
// ---------------------------------------------------------------------------

/// Current threat level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AlarmStatus {
    #[default]
    NoAlarm,
    /// One sensor tripped while armed; a second trip confirms the alarm.
    PendingAlarm,
    Alarm,
}

impl AlarmStatus {
    pub const fn description(self) -> &'static str {
        match self {
            Self::NoAlarm => "Cool and Good",
            Self::PendingAlarm => "I'm in Danger...",
            Self::Alarm => "Awooga!",
        }
    }
}

impl fmt::Display for AlarmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
