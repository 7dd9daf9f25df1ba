//! In-memory repository adapter.
//!
//! Implements [`SecurityRepository`] over plain fields.  State lives for
//! the lifetime of the value; used by hosts that do not need durability and
//! by the engine's own tests.

use std::collections::BTreeSet;

use crate::app::ports::{RepositoryError, SecurityRepository};
use crate::fsm::{AlarmStatus, ArmingStatus};
use crate::sensors::Sensor;

#[derive(Debug, Default, Clone)]
pub struct MemoryRepository {
    sensors: BTreeSet<Sensor>,
    arming_status: ArmingStatus,
    alarm_status: AlarmStatus,
}

impl MemoryRepository {
    /// Disarmed, no alarm, no sensors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with an existing sensor set.
    pub fn with_sensors(sensors: impl IntoIterator<Item = Sensor>) -> Self {
        Self {
            sensors: sensors.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl SecurityRepository for MemoryRepository {
    fn arming_status(&self) -> Result<ArmingStatus, RepositoryError> {
        Ok(self.arming_status)
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), RepositoryError> {
        self.arming_status = status;
        Ok(())
    }

    fn alarm_status(&self) -> Result<AlarmStatus, RepositoryError> {
        Ok(self.alarm_status)
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), RepositoryError> {
        self.alarm_status = status;
        Ok(())
    }

    fn sensors(&self) -> Result<BTreeSet<Sensor>, RepositoryError> {
        Ok(self.sensors.clone())
    }

    fn add_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError> {
        if !self.sensors.insert(sensor.clone()) {
            return Err(RepositoryError::DuplicateSensor);
        }
        Ok(())
    }

    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError> {
        if !self.sensors.remove(sensor) {
            return Err(RepositoryError::UnknownSensor);
        }
        self.sensors.insert(sensor.clone());
        Ok(())
    }

    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError> {
        if !self.sensors.remove(sensor) {
            return Err(RepositoryError::UnknownSensor);
        }
        Ok(())
    }
}
