//! Synchronous multi-subscriber event bus.
//!
//! Publishing calls every listener in subscription order. A listener that
//! returns an error or panics is logged and skipped; the rest still run.

use std::panic::{self, AssertUnwindSafe};

use npcsocial_domain::SocialEvent;

use crate::infrastructure::ports::ListenerError;

pub type Listener = Box<dyn Fn(&SocialEvent) -> Result<(), ListenerError> + Send + Sync>;

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

pub struct EventBus {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&SocialEvent) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the id was not subscribed
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Notify every listener. Returns the failures, already logged.
    pub fn publish(&self, event: &SocialEvent) -> Vec<(ListenerId, ListenerError)> {
        let mut failures = Vec::new();
        for (id, listener) in &self.listeners {
            let result = panic::catch_unwind(AssertUnwindSafe(|| listener(event)))
                .unwrap_or_else(|payload| Err(ListenerError::Panicked(panic_message(&*payload))));

            if let Err(error) = result {
                tracing::warn!(
                    listener = ?id,
                    event_type = event.event_type(),
                    error = %error,
                    "Event listener failed"
                );
                failures.push((*id, error));
            }
        }
        failures
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
