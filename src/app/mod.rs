//! Application core — pure domain logic, zero I/O.
//!
//! The alarm rules live in [`crate::fsm`]; this module wires them to the
//! outside world.  All interaction with storage, cameras and observers
//! happens through **port traits** defined in [`ports`], keeping the engine
//! fully testable with mock adapters.

pub mod commands;
pub mod listeners;
pub mod ports;
pub mod service;
