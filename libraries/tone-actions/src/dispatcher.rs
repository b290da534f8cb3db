//! Dispatch capability
//!
//! The action surface never owns a store. It is handed something that
//! accepts events, and calls it exactly once per dispatching operation.
//! Dispatching is infallible from the surface's point of view: a sink that
//! can fail (a closed channel, a payload that will not serialize) logs and
//! drops the event instead of propagating.

use serde_json::Value;
use std::sync::mpsc::Sender;

use crate::events::ActionEvent;

/// Receives dispatched events
pub trait Dispatcher {
    /// Deliver one event; must not panic and must return promptly
    fn dispatch(&mut self, event: ActionEvent);
}

/// Recording dispatcher
impl Dispatcher for Vec<ActionEvent> {
    fn dispatch(&mut self, event: ActionEvent) {
        self.push(event);
    }
}

/// Channel to a store running elsewhere
impl Dispatcher for Sender<ActionEvent> {
    fn dispatch(&mut self, event: ActionEvent) {
        if let Err(err) = self.send(event) {
            tracing::warn!(event = err.0.name(), "Store channel closed, dropping event");
        }
    }
}

impl<D: Dispatcher + ?Sized> Dispatcher for &mut D {
    fn dispatch(&mut self, event: ActionEvent) {
        (**self).dispatch(event);
    }
}

impl<D: Dispatcher + ?Sized> Dispatcher for Box<D> {
    fn dispatch(&mut self, event: ActionEvent) {
        (**self).dispatch(event);
    }
}

/// Dispatcher backed by a closure over typed events
pub struct FnDispatcher<F>(pub F);

impl<F: FnMut(ActionEvent)> Dispatcher for FnDispatcher<F> {
    fn dispatch(&mut self, event: ActionEvent) {
        (self.0)(event);
    }
}

impl<F> std::fmt::Debug for FnDispatcher<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnDispatcher").finish_non_exhaustive()
    }
}

/// Dispatcher for `(eventName, payload)` sinks
///
/// Adapts the surface to stores that consume the identifier and a plain
/// JSON payload, such as a JavaScript flux dispatcher.
pub struct PayloadDispatcher<F>(pub F);

impl<F: FnMut(&'static str, Value)> Dispatcher for PayloadDispatcher<F> {
    fn dispatch(&mut self, event: ActionEvent) {
        match event.payload() {
            Ok(payload) => (self.0)(event.name(), payload),
            Err(err) => {
                tracing::error!(event = event.name(), error = %err, "Failed to serialize payload");
            }
        }
    }
}

impl<F> std::fmt::Debug for PayloadDispatcher<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayloadDispatcher").finish_non_exhaustive()
    }
}
