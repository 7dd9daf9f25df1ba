//! Pure transition rules.
//!
//! Each function takes the facts the service read from the repository and
//! returns the alarm status to write, or `None` to leave it alone.  No I/O
//! happens here.

use super::{AlarmStatus, ArmingStatus};

/// Rule for a sensor activation/deactivation request.
///
/// `was_active` is the sensor's flag before the request.
pub fn on_sensor_change(
    arming: ArmingStatus,
    alarm: AlarmStatus,
    was_active: bool,
    requested_active: bool,
) -> Option<AlarmStatus> {
    if alarm == AlarmStatus::Alarm {
        return None;
    }

    if requested_active {
        if !arming.is_armed() {
            return None;
        }
        return match alarm {
            AlarmStatus::NoAlarm if !was_active => Some(AlarmStatus::PendingAlarm),
            // A second trip confirms, whether from this sensor or another.
            AlarmStatus::PendingAlarm => Some(AlarmStatus::Alarm),
            _ => None,
        };
    }

    if was_active && alarm == AlarmStatus::PendingAlarm {
        return Some(AlarmStatus::NoAlarm);
    }
    None
}

/// Rule for a classification result.
pub fn on_image(
    arming: ArmingStatus,
    cat_detected: bool,
    any_sensor_active: bool,
) -> Option<AlarmStatus> {
    if cat_detected && arming == ArmingStatus::ArmedHome {
        Some(AlarmStatus::Alarm)
    } else if !any_sensor_active {
        Some(AlarmStatus::NoAlarm)
    } else {
        None
    }
}

/// Rule for an arming-mode change.  Always yields a status to write.
pub fn on_arming(new_status: ArmingStatus, cat_detected: bool) -> AlarmStatus {
    match new_status {
        ArmingStatus::ArmedHome if cat_detected => AlarmStatus::Alarm,
        _ => AlarmStatus::NoAlarm,
    }
}
