//! Engine over the storage-backed repository and the label classifier.

use homealarm::Error;
use homealarm::adapters::classifier::{Label, LabelClassifier, LabeledImage};
use homealarm::adapters::log_listener::LogStatusListener;
use homealarm::adapters::storage::MemoryStorage;
use homealarm::adapters::stored::StoredRepository;
use homealarm::app::ports::{ConfigPort, RepositoryError};
use homealarm::app::service::SecurityService;
use homealarm::config::SecurityConfig;
use homealarm::fsm::{AlarmStatus, ArmingStatus};
use homealarm::sensors::{Sensor, SensorType};

use super::mock_ports::StatusLog;

type StoredService = SecurityService<StoredRepository<MemoryStorage>, LabelClassifier>;

fn boot(storage: MemoryStorage) -> StoredService {
    let config = storage.load().unwrap();
    let repo = StoredRepository::from_config(storage, &config);
    let mut svc = SecurityService::new(repo, LabelClassifier::new(), &config);
    svc.add_status_listener(Box::new(LogStatusListener::new()));
    svc
}

fn frame(labels: &[(&str, f32)]) -> LabeledImage {
    LabeledImage::new(labels.iter().map(|(n, c)| Label::new(n, *c)).collect())
}

#[test]
fn intrusion_sequence_ends_in_alarm_and_disarm_clears() {
    let mut svc = boot(MemoryStorage::new());
    let log = StatusLog::new();
    svc.add_status_listener(Box::new(log.clone()));

    let mut door = Sensor::new("Front Door", SensorType::Door).unwrap();
    let mut hall = Sensor::new("Hall", SensorType::Motion).unwrap();
    svc.add_sensor(&door).unwrap();
    svc.add_sensor(&hall).unwrap();

    svc.set_arming_status(ArmingStatus::ArmedAway).unwrap();
    svc.change_sensor_activation_status(&mut door, true).unwrap();
    svc.change_sensor_activation_status(&mut hall, true).unwrap();
    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::Alarm);

    // Sticky: closing the door does not clear it.
    svc.change_sensor_activation_status(&mut door, false).unwrap();
    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::Alarm);

    svc.set_arming_status(ArmingStatus::Disarmed).unwrap();
    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::NoAlarm);
    assert_eq!(
        log.all(),
        [
            AlarmStatus::NoAlarm,
            AlarmStatus::PendingAlarm,
            AlarmStatus::Alarm,
            AlarmStatus::NoAlarm
        ]
    );
}

#[test]
fn restart_keeps_durable_state_but_forgets_the_cat() {
    let mut svc = boot(MemoryStorage::new());
    svc.add_sensor(&Sensor::new("Window", SensorType::Window).unwrap())
        .unwrap();
    svc.process_image(&frame(&[("Cat", 97.0)])).unwrap();
    assert!(svc.is_cat_detected());

    let storage = svc.repository().storage().clone();
    drop(svc);

    let mut svc = boot(storage);
    assert!(!svc.is_cat_detected());
    assert_eq!(svc.sensors().unwrap().len(), 1);

    svc.set_arming_status(ArmingStatus::ArmedHome).unwrap();
    assert_eq!(
        svc.alarm_status().unwrap(),
        AlarmStatus::NoAlarm,
        "cat flag is in-memory only"
    );
}

#[test]
fn low_confidence_cat_is_ignored() {
    let mut storage = MemoryStorage::new();
    storage
        .save(&SecurityConfig {
            cat_confidence_threshold: 85.0,
            ..Default::default()
        })
        .unwrap();
    let mut svc = boot(storage);
    svc.set_arming_status(ArmingStatus::ArmedHome).unwrap();

    svc.process_image(&frame(&[("Cat", 60.0), ("Dog", 99.0)]))
        .unwrap();
    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::NoAlarm);

    svc.process_image(&frame(&[("cat", 91.0)])).unwrap();
    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::Alarm);
}

#[test]
fn duplicate_and_unknown_sensors_surface_errors() {
    let mut svc = boot(MemoryStorage::new());
    let s = Sensor::new("Attic", SensorType::Motion).unwrap();
    svc.add_sensor(&s).unwrap();
    assert_eq!(
        svc.add_sensor(&s),
        Err(Error::Repository(RepositoryError::DuplicateSensor))
    );

    svc.remove_sensor(&s).unwrap();
    assert_eq!(
        svc.remove_sensor(&s),
        Err(Error::Repository(RepositoryError::UnknownSensor))
    );
}

#[test]
fn capacity_from_config_is_enforced() {
    let mut storage = MemoryStorage::new();
    storage
        .save(&SecurityConfig {
            max_sensors: 1,
            ..Default::default()
        })
        .unwrap();
    let mut svc = boot(storage);
    svc.add_sensor(&Sensor::new("One", SensorType::Door).unwrap())
        .unwrap();
    assert_eq!(
        svc.add_sensor(&Sensor::new("Two", SensorType::Door).unwrap()),
        Err(Error::Repository(RepositoryError::CapacityExceeded))
    );
}
