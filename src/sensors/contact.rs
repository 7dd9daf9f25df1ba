//! Debounced digital contact input for door, window and motion sensors.
//!
//! ## Hardware
//!
//! Reed switches and PIR modules expose a single digital line.  Door and
//! window contacts are usually wired active-low (magnet present = closed =
//! pulled low); PIR modules drive the line high on motion.
//!
//! ## Debounce
//!
//! [`ContactInput::poll`] is called from the host loop.  A new level is only
//! reported once it has been read `debounce_samples` times in a row, so a
//! bouncing reed switch yields one edge instead of a burst.

use embedded_hal::digital::InputPin;

use super::SensorName;

/// Which electrical level means "sensor tripped".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPolarity {
    ActiveHigh,
    ActiveLow,
}

/// A debounced activity change for a named sensor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEdge {
    pub sensor: SensorName,
    pub active: bool,
}

pub struct ContactInput<P> {
    pin: P,
    sensor: SensorName,
    polarity: ContactPolarity,
    debounce_samples: u8,
    /// Last reported activity.
    stable: bool,
    /// Level currently being confirmed.
    candidate: bool,
    count: u8,
}

impl<P: InputPin> ContactInput<P> {
    /// The input starts out inactive; the first confirmed trip is reported
    /// as an activation edge.
    pub fn new(
        pin: P,
        sensor: SensorName,
        polarity: ContactPolarity,
        debounce_samples: u8,
    ) -> Self {
        Self {
            pin,
            sensor,
            polarity,
            debounce_samples: debounce_samples.max(1),
            stable: false,
            candidate: false,
            count: 0,
        }
    }

    /// Name of the sensor this input reports for.
    pub fn sensor(&self) -> &SensorName {
        &self.sensor
    }

    /// Last debounced activity.
    pub fn is_active(&self) -> bool {
        self.stable
    }

    /// Sample the pin once.  Returns an edge when a new level is confirmed.
    pub fn poll(&mut self) -> Result<Option<ContactEdge>, P::Error> {
        let high = self.pin.is_high()?;
        let active = match self.polarity {
            ContactPolarity::ActiveHigh => high,
            ContactPolarity::ActiveLow => !high,
        };

        if active == self.stable {
            self.candidate = active;
            self.count = 0;
            return Ok(None);
        }

        if active == self.candidate {
            self.count = self.count.saturating_add(1);
        } else {
            self.candidate = active;
            self.count = 1;
        }

        if self.count < self.debounce_samples {
            return Ok(None);
        }

        self.stable = active;
        self.count = 0;
        Ok(Some(ContactEdge {
            sensor: self.sensor.clone(),
            active,
        }))
    }

    /// Release the underlying pin.
    pub fn into_inner(self) -> P {
        self.pin
    }
}
