//! Security service — the hexagonal core.
//!
//! [`SecurityService`] owns the listener registry and the transient
//! cat-detected flag.  Everything durable lives behind the
//! [`SecurityRepository`] port; every operation follows the same shape:
//!
//! ```text
//!   repository read ──▶ fsm::transitions ──▶ repository write ──▶ listeners
//! ```
//!
//! Operations are synchronous and run to completion.  Hosts that call the
//! service from several threads must serialize access themselves (one lock
//! around the whole service).

use std::collections::BTreeSet;

use log::{debug, info, warn};

use crate::config::SecurityConfig;
use crate::error::{Error, Result};
use crate::fsm::{AlarmStatus, ArmingStatus, transitions};
use crate::sensors::Sensor;

use super::commands::SecurityCommand;
use super::listeners::{ListenerId, ListenerRegistry};
use super::ports::{ImageClassifier, SecurityRepository, StatusListener};

// ───────────────────────────────────────────────────────────────
// SecurityService
// ───────────────────────────────────────────────────────────────

pub struct SecurityService<R, C> {
    repository: R,
    classifier: C,
    listeners: ListenerRegistry,
    cat_confidence_threshold: f32,
    /// Result of the most recent classification.  Never persisted.
    cat_detected: bool,
}

impl<R: SecurityRepository, C: ImageClassifier> SecurityService<R, C> {
    pub fn new(repository: R, classifier: C, config: &SecurityConfig) -> Self {
        Self {
            repository,
            classifier,
            listeners: ListenerRegistry::new(),
            cat_confidence_threshold: config.cat_confidence_threshold,
            cat_detected: false,
        }
    }

    // ── Listeners ─────────────────────────────────────────────

    pub fn add_status_listener(&mut self, listener: Box<dyn StatusListener>) -> ListenerId {
        self.listeners.add(listener)
    }

    /// Unregister a listener.  Removing an unknown handle is a no-op.
    pub fn remove_status_listener(&mut self, id: ListenerId) -> Option<Box<dyn StatusListener>> {
        self.listeners.remove(id)
    }

    // ── Alarm / arming ────────────────────────────────────────

    /// Persist `status` and notify every listener, even if the status did
    /// not change.
    pub fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<()> {
        self.repository
            .set_alarm_status(status)
            .inspect_err(|e| warn!("Alarm status write failed: {}", e))?;
        info!("Alarm status set to {:?}", status);
        self.listeners.notify(status);
        Ok(())
    }

    /// Change the arming mode.
    ///
    /// Arming resets every sensor to inactive before the alarm status is
    /// re-evaluated; arming home while a cat is in view alarms at once.
    ///
    /// The writes are not atomic.  The arming mode is stored first, then each
    /// sensor, then the alarm status.  If a sensor write fails the error is
    /// returned with the new mode and the sensors reset so far already
    /// stored, the previous alarm status left in place, and no listener
    /// called.  Retrying the same call completes the transition.
    pub fn set_arming_status(&mut self, status: ArmingStatus) -> Result<()> {
        self.repository
            .set_arming_status(status)
            .inspect_err(|e| warn!("Arming status write failed: {}", e))?;
        info!("Arming status set to {:?}", status);

        if status.is_armed() {
            let mut reset = 0usize;
            for mut sensor in self.repository.sensors()? {
                let was_active = sensor.is_active();
                sensor.set_active(false);
                self.repository
                    .update_sensor(&sensor)
                    .inspect_err(|e| warn!("Sensor '{}' reset failed: {}", sensor.name(), e))?;
                if was_active {
                    reset += 1;
                }
            }
            if reset > 0 {
                debug!("Reset {} active sensor(s) on arming", reset);
                self.listeners.sensor_status_changed();
            }
        }

        self.set_alarm_status(transitions::on_arming(status, self.cat_detected))
    }

    // ── Sensors ───────────────────────────────────────────────

    /// Activate or deactivate `sensor`, persist it, and apply the alarm
    /// rules.  Deactivating an inactive sensor does nothing at all.
    ///
    /// On a repository failure the sensor keeps its previous activity.
    pub fn change_sensor_activation_status(
        &mut self,
        sensor: &mut Sensor,
        active: bool,
    ) -> Result<()> {
        let was_active = sensor.is_active();
        if !was_active && !active {
            debug!("Sensor '{}' already inactive", sensor.name());
            return Ok(());
        }

        let arming = self.repository.arming_status()?;
        let alarm = self.repository.alarm_status()?;
        let next = transitions::on_sensor_change(arming, alarm, was_active, active);

        if was_active != active {
            sensor.set_active(active);
            if let Err(e) = self.repository.update_sensor(sensor) {
                sensor.set_active(was_active);
                warn!("Sensor '{}' update failed: {}", sensor.name(), e);
                return Err(e.into());
            }
            debug!("Sensor '{}' active={}", sensor.name(), active);
            self.listeners.sensor_status_changed();
        }

        match next {
            Some(status) => self.set_alarm_status(status),
            None => Ok(()),
        }
    }

    /// [`change_sensor_activation_status`](Self::change_sensor_activation_status)
    /// for the stored sensor with this name.
    pub fn set_sensor_active(&mut self, name: &str, active: bool) -> Result<()> {
        let mut sensor = self.find_sensor(name)?;
        self.change_sensor_activation_status(&mut sensor, active)
    }

    pub fn add_sensor(&mut self, sensor: &Sensor) -> Result<()> {
        self.repository.add_sensor(sensor)?;
        info!("Sensor '{}' added", sensor.name());
        Ok(())
    }

    pub fn remove_sensor(&mut self, sensor: &Sensor) -> Result<()> {
        self.repository.remove_sensor(sensor)?;
        info!("Sensor '{}' removed", sensor.name());
        Ok(())
    }

    // ── Images ────────────────────────────────────────────────

    /// Classify `image` and apply the cat rules.
    ///
    /// A classifier failure is returned as-is; the remembered cat flag is
    /// left untouched and no status is written.
    pub fn process_image(&mut self, image: &C::Image) -> Result<()> {
        let cat = self
            .classifier
            .image_contains_cat(image, self.cat_confidence_threshold)
            .inspect_err(|e| warn!("Image classification failed: {}", e))?;
        self.cat_detected = cat;
        debug!("Classification: cat_detected={}", cat);
        self.listeners.cat_detected(cat);

        let arming = self.repository.arming_status()?;
        let any_active = self.repository.sensors()?.iter().any(Sensor::is_active);
        match transitions::on_image(arming, cat, any_active) {
            Some(status) => self.set_alarm_status(status),
            None => Ok(()),
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Dispatch an external command.
    pub fn handle_command(&mut self, cmd: SecurityCommand<C::Image>) -> Result<()> {
        match cmd {
            SecurityCommand::SetArmingStatus(status) => self.set_arming_status(status),
            SecurityCommand::SetSensorActive { name, active } => {
                self.set_sensor_active(&name, active)
            }
            SecurityCommand::ProcessImage(image) => self.process_image(&image),
            SecurityCommand::AddSensor(sensor) => self.add_sensor(&sensor),
            SecurityCommand::RemoveSensor(name) => {
                let sensor = self.find_sensor(&name)?;
                self.remove_sensor(&sensor)
            }
            SecurityCommand::SetAlarmStatus(status) => self.set_alarm_status(status),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn sensors(&self) -> Result<BTreeSet<Sensor>> {
        Ok(self.repository.sensors()?)
    }

    pub fn alarm_status(&self) -> Result<AlarmStatus> {
        Ok(self.repository.alarm_status()?)
    }

    pub fn arming_status(&self) -> Result<ArmingStatus> {
        Ok(self.repository.arming_status()?)
    }

    /// Result of the most recent successful classification.
    pub fn is_cat_detected(&self) -> bool {
        self.cat_detected
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    // ── Internal ──────────────────────────────────────────────

    fn find_sensor(&self, name: &str) -> Result<Sensor> {
        self.repository
            .sensors()?
            .into_iter()
            .find(|s| s.name() == name)
            .ok_or(Error::InvalidArgument("no sensor with that name"))
    }
}
