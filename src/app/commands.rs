//! Inbound commands to the security service.
//!
//! These represent actions requested by the outside world (control panel,
//! contact inputs, camera pipeline) that the
//! [`SecurityService`](super::service::SecurityService) interprets through
//! [`handle_command`](super::service::SecurityService::handle_command).

use crate::fsm::{AlarmStatus, ArmingStatus};
use crate::sensors::contact::ContactEdge;
use crate::sensors::{Sensor, SensorName};

/// Commands external adapters can send into the engine.  `I` is the image
/// type of the configured classifier.
#[derive(Debug, Clone)]
pub enum SecurityCommand<I> {
    /// Change the arming mode.
    SetArmingStatus(ArmingStatus),

    /// Activate or deactivate the sensor with this name.
    SetSensorActive { name: SensorName, active: bool },

    /// Classify a camera frame.
    ProcessImage(I),

    /// Register a new sensor.
    AddSensor(Sensor),

    /// Forget the sensor with this name.
    RemoveSensor(SensorName),

    /// Write an alarm status directly (panel reset).
    SetAlarmStatus(AlarmStatus),
}

impl<I> From<ContactEdge> for SecurityCommand<I> {
    fn from(edge: ContactEdge) -> Self {
        Self::SetSensorActive {
            name: edge.sensor,
            active: edge.active,
        }
    }
}
