//! Sensor entity and the digital contact input driver.
//!
//! A [`Sensor`] is identified by its name: equality, ordering and hashing
//! look at the name only, so a `BTreeSet<Sensor>` never holds two sensors
//! with the same name regardless of their type or activity.

pub mod contact;

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Longest sensor name accepted, in bytes.
pub const MAX_SENSOR_NAME_LEN: usize = 32;

/// Fixed-capacity sensor name.
pub type SensorName = heapless::String<MAX_SENSOR_NAME_LEN>;

/// Build a [`SensorName`], rejecting empty or over-long input.
pub fn sensor_name(name: &str) -> Result<SensorName> {
    if name.is_empty() {
        return Err(Error::InvalidArgument("sensor name is empty"));
    }
    let mut s = SensorName::new();
    s.push_str(name)
        .map_err(|()| Error::InvalidArgument("sensor name longer than 32 bytes"))?;
    Ok(s)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorType {
    Door,
    Window,
    Motion,
}

/// A binary door/window/motion sensor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    name: SensorName,
    sensor_type: SensorType,
    active: bool,
}

impl Sensor {
    /// New, inactive sensor.
    pub fn new(name: &str, sensor_type: SensorType) -> Result<Self> {
        Ok(Self {
            name: sensor_name(name)?,
            sensor_type,
            active: false,
        })
    }

    /// Same sensor with the given activity, e.g. when restoring from storage.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sensor_name(&self) -> &SensorName {
        &self.name
    }

    pub fn sensor_type(&self) -> SensorType {
        self.sensor_type
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl PartialEq for Sensor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Sensor {}

impl PartialOrd for Sensor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Sensor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for Sensor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
