//! Home alarm decision engine.
//!
//! Given sensor events, an arming mode and an optional "cat in view"
//! camera signal, [`SecurityService`](app::service::SecurityService)
//! decides the alarm status, persists it through a repository port and
//! notifies registered listeners.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod fsm;
pub mod sensors;

pub use error::{Error, Result};
