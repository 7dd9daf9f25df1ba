//! Repository adapter over a key-value [`StoragePort`].
//!
//! Statuses and sensors are kept as JSON blobs under the `security`
//! namespace.  Each sensor owns a numbered slot key so that no single value
//! grows with the number of sensors:
//!
//! | Key          | Value                            | Missing key means |
//! |--------------|----------------------------------|-------------------|
//! | `arming`     | `ArmingStatus`                   | `Disarmed`        |
//! | `alarm`      | `AlarmStatus`                    | `NoAlarm`         |
//! | `slots`      | occupied slot numbers, ascending | no sensors        |
//! | `sensor.<n>` | one `Sensor`                     | slot free         |
//!
//! Nothing is cached: every call reads the store, so several engines (or a
//! restarted one) sharing a store see the same state.

use std::collections::BTreeSet;

use log::warn;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::app::ports::{RepositoryError, SecurityRepository, StorageError, StoragePort};
use crate::config::SecurityConfig;
use crate::fsm::{AlarmStatus, ArmingStatus};
use crate::sensors::Sensor;

const NAMESPACE: &str = "security";
const ARMING_KEY: &str = "arming";
const ALARM_KEY: &str = "alarm";
const SLOTS_KEY: &str = "slots";

const READ_BUF_SIZE: usize = 4096;

type Slot = u16;

fn slot_key(slot: Slot) -> String {
    format!("sensor.{}", slot)
}

pub struct StoredRepository<S> {
    storage: S,
    max_sensors: usize,
}

impl<S: StoragePort> StoredRepository<S> {
    pub fn new(storage: S, max_sensors: u8) -> Self {
        Self {
            storage,
            max_sensors: usize::from(max_sensors),
        }
    }

    pub fn from_config(storage: S, config: &SecurityConfig) -> Self {
        Self::new(storage, config.max_sensors)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, RepositoryError> {
        let mut buf = vec![0u8; READ_BUF_SIZE];
        match self.storage.read(NAMESPACE, key, &mut buf) {
            Ok(len) => serde_json::from_slice(&buf[..len]).map(Some).map_err(|_| {
                warn!("StoredRepository: '{}' failed to decode", key);
                RepositoryError::Corrupted
            }),
            Err(StorageError::NotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_json<T: Serialize + ?Sized>(
        &mut self,
        key: &str,
        value: &T,
    ) -> Result<(), RepositoryError> {
        let bytes = serde_json::to_vec(value).map_err(|_| RepositoryError::Corrupted)?;
        if bytes.len() > READ_BUF_SIZE {
            return Err(StorageError::Full.into());
        }
        Ok(self.storage.write(NAMESPACE, key, &bytes)?)
    }

    fn slots(&self) -> Result<BTreeSet<Slot>, RepositoryError> {
        Ok(self.read_json::<BTreeSet<Slot>>(SLOTS_KEY)?.unwrap_or_default())
    }

    fn read_slot(&self, slot: Slot) -> Result<Sensor, RepositoryError> {
        self.read_json::<Sensor>(&slot_key(slot))?.ok_or_else(|| {
            warn!("StoredRepository: slot {} indexed but missing", slot);
            RepositoryError::Corrupted
        })
    }

    /// Slot currently holding a sensor with the same name.
    fn find_slot(&self, sensor: &Sensor) -> Result<Option<Slot>, RepositoryError> {
        for slot in self.slots()? {
            if self.read_slot(slot)? == *sensor {
                return Ok(Some(slot));
            }
        }
        Ok(None)
    }
}

impl<S: StoragePort> SecurityRepository for StoredRepository<S> {
    fn arming_status(&self) -> Result<ArmingStatus, RepositoryError> {
        Ok(self.read_json::<ArmingStatus>(ARMING_KEY)?.unwrap_or_default())
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), RepositoryError> {
        self.write_json(ARMING_KEY, &status)
    }

    fn alarm_status(&self) -> Result<AlarmStatus, RepositoryError> {
        Ok(self.read_json::<AlarmStatus>(ALARM_KEY)?.unwrap_or_default())
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), RepositoryError> {
        self.write_json(ALARM_KEY, &status)
    }

    fn sensors(&self) -> Result<BTreeSet<Sensor>, RepositoryError> {
        self.slots()?
            .into_iter()
            .map(|slot| self.read_slot(slot))
            .collect()
    }

    fn add_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError> {
        let mut slots = self.slots()?;
        for &slot in &slots {
            if self.read_slot(slot)? == *sensor {
                return Err(RepositoryError::DuplicateSensor);
            }
        }
        if slots.len() >= self.max_sensors {
            return Err(RepositoryError::CapacityExceeded);
        }
        let free = (0..Slot::MAX)
            .find(|n| !slots.contains(n))
            .ok_or(RepositoryError::CapacityExceeded)?;

        // Sensor first: an unindexed slot is simply reused by the next add.
        self.write_json(&slot_key(free), sensor)?;
        slots.insert(free);
        self.write_json(SLOTS_KEY, &slots)
    }

    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError> {
        let slot = self
            .find_slot(sensor)?
            .ok_or(RepositoryError::UnknownSensor)?;
        self.write_json(&slot_key(slot), sensor)
    }

    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError> {
        let slot = self
            .find_slot(sensor)?
            .ok_or(RepositoryError::UnknownSensor)?;
        let mut slots = self.slots()?;
        slots.remove(&slot);
        // Index first: a leftover slot key is unreachable and overwritten later.
        self.write_json(SLOTS_KEY, &slots)?;
        Ok(self.storage.delete(NAMESPACE, &slot_key(slot))?)
    }
}
