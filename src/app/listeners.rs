//! Status listener registry.
//!
//! Listeners are notified synchronously in registration order.  Each
//! registration returns a [`ListenerId`]; removal is by that handle and is
//! idempotent.

use crate::fsm::AlarmStatus;

use super::ports::StatusListener;

/// Handle identifying one registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u32);

#[derive(Default)]
pub struct ListenerRegistry {
    next_id: u32,
    listeners: Vec<(ListenerId, Box<dyn StatusListener>)>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, listener: Box<dyn StatusListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.listeners.push((id, listener));
        id
    }

    /// Returns the listener if it was registered, `None` otherwise.
    pub fn remove(&mut self, id: ListenerId) -> Option<Box<dyn StatusListener>> {
        let pos = self.listeners.iter().position(|(lid, _)| *lid == id)?;
        Some(self.listeners.remove(pos).1)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub(crate) fn notify(&mut self, status: AlarmStatus) {
        for (_, l) in &mut self.listeners {
            l.notify(status);
        }
    }

    pub(crate) fn cat_detected(&mut self, detected: bool) {
        for (_, l) in &mut self.listeners {
            l.cat_detected(detected);
        }
    }

    pub(crate) fn sensor_status_changed(&mut self) {
        for (_, l) in &mut self.listeners {
            l.sensor_status_changed();
        }
    }
}
