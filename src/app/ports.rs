//! Port traits — the hexagonal boundary between the alarm engine and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SecurityService (domain)
//! ```
//!
//! Driven adapters (repositories, classifiers, listeners, key-value stores)
//! implement these traits.  The
//! [`SecurityService`](super::service::SecurityService) consumes them via
//! generics and trait objects, so the engine never touches storage or image
//! processing directly.
//!
//! All port errors are typed and `Copy`; the engine propagates them to its
//! caller without retrying.

use std::collections::BTreeSet;

use crate::config::SecurityConfig;
use crate::fsm::{AlarmStatus, ArmingStatus};
use crate::sensors::Sensor;

// ───────────────────────────────────────────────────────────────
// Repository port (driven adapter: domain ↔ durable state)
// ───────────────────────────────────────────────────────────────

/// Durable store of the sensor set, arming status and alarm status.
///
/// Every read is authoritative for the call that made it; the engine keeps
/// no copy between operations.
pub trait SecurityRepository {
    fn arming_status(&self) -> Result<ArmingStatus, RepositoryError>;

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), RepositoryError>;

    fn alarm_status(&self) -> Result<AlarmStatus, RepositoryError>;

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), RepositoryError>;

    /// Snapshot of all known sensors, ordered by name.
    fn sensors(&self) -> Result<BTreeSet<Sensor>, RepositoryError>;

    /// Fails with [`RepositoryError::DuplicateSensor`] if the name is taken.
    fn add_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError>;

    /// Persist a mutated sensor.  Fails with
    /// [`RepositoryError::UnknownSensor`] if it was never added.
    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError>;

    /// Fails with [`RepositoryError::UnknownSensor`] if it was never added.
    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError>;
}

// ───────────────────────────────────────────────────────────────
// Image classifier port (driven adapter: domain → vision service)
// ───────────────────────────────────────────────────────────────

/// Answers whether an image shows a cat.
pub trait ImageClassifier {
    /// Image representation the classifier understands.
    type Image;

    /// `confidence_threshold` is a percentage (0–100).
    fn image_contains_cat(
        &mut self,
        image: &Self::Image,
        confidence_threshold: f32,
    ) -> Result<bool, ClassifierError>;
}

// ───────────────────────────────────────────────────────────────
// Status listener port (driven adapter: domain → UI / telemetry)
// ───────────────────────────────────────────────────────────────

/// Observer of engine state changes.
///
/// Callbacks are infallible: a listener that cannot deliver must deal with
/// that itself.  They run after the triggering change was persisted.
pub trait StatusListener {
    /// An alarm status was written.
    fn notify(&mut self, status: AlarmStatus);

    /// A classification finished.
    fn cat_detected(&mut self, _detected: bool) {}

    /// One or more sensors changed their persisted activity.
    fn sensor_status_changed(&mut self) {}
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists [`SecurityConfig`].
///
/// Implementations MUST call [`SecurityConfig::validate`] before
/// persisting and reject invalid values instead of clamping them.
pub trait ConfigPort {
    /// Returns [`SecurityConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<SecurityConfig, ConfigError>;

    fn save(&mut self, config: &SecurityConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Storage port (driven adapter: domain ↔ key-value store)
// ───────────────────────────────────────────────────────────────

/// Namespaced key-value storage backing the stored repository.
///
/// Write operations MUST be atomic per key.
pub trait StoragePort {
    /// Read a value.  Returns the number of bytes written to `buf`.
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError>;

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Delete a key.  Returns `Ok(())` even if the key didn't exist.
    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError>;

    fn exists(&self, namespace: &str, key: &str) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`SecurityRepository`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryError {
    /// The sensor was never added (or was already removed).
    UnknownSensor,
    /// A sensor with the same name already exists.
    DuplicateSensor,
    /// The repository cannot hold more sensors.
    CapacityExceeded,
    /// Stored data failed to decode.
    Corrupted,
    /// The backing store failed.
    Storage(StorageError),
}

/// Errors from [`ImageClassifier`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierError {
    /// The classification backend could not be reached.
    Unavailable,
    /// The image could not be decoded or is empty.
    InvalidImage,
}

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

/// Errors from [`StoragePort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Requested key does not exist.
    NotFound,
    /// Storage is full or the value exceeds the slot size.
    Full,
    /// Generic I/O error.
    IoError,
}

impl core::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownSensor => write!(f, "unknown sensor"),
            Self::DuplicateSensor => write!(f, "duplicate sensor"),
            Self::CapacityExceeded => write!(f, "sensor capacity exceeded"),
            Self::Corrupted => write!(f, "stored data corrupted"),
            Self::Storage(e) => write!(f, "storage: {}", e),
        }
    }
}

impl core::fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "classifier unavailable"),
            Self::InvalidImage => write!(f, "invalid image"),
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "key not found"),
            Self::Full => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl From<StorageError> for RepositoryError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}
