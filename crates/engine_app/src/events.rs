//! Deferred publish/subscribe event bus.
//!
//! Events are queued by [`EventBus::emit`] and delivered by
//! [`EventBus::process`]. Processing drains a snapshot of the queue: events
//! emitted while handlers run land in a fresh queue and wait for the next
//! call. A failing handler is logged and delivery carries on.

use std::collections::HashMap;

use engine_component::Entity;
use engine_system::KeyCode;
use tracing::{trace, warn};

use crate::error::EngineError;

/// The kinds of event the bus routes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Dead,
    DestroyEntity,
    PlayerMove,
}

impl EventKind {
    /// A human-readable name for logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EventKind::Dead => "dead",
            EventKind::DestroyEntity => "destroy_entity",
            EventKind::PlayerMove => "player_move",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An event and its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// An entity died.
    Dead(Entity),
    /// An entity should be destroyed at the end of the frame.
    DestroyEntity(Entity),
    /// A movement key was pressed.
    PlayerMove(KeyCode),
}

impl Event {
    /// The kind handlers subscribe to.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Event::Dead(_) => EventKind::Dead,
            Event::DestroyEntity(_) => EventKind::DestroyEntity,
            Event::PlayerMove(_) => EventKind::PlayerMove,
        }
    }
}

/// What a handler sees while it runs: the shared state and a way to emit
/// follow-up events.
pub struct EventContext<'a, C> {
    /// State the bus was processed against.
    pub state: &'a mut C,
    queue: &'a mut Vec<Event>,
}

impl<C> EventContext<'_, C> {
    /// Queue an event for the next [`EventBus::process`] call.
    pub fn emit(&mut self, event: Event) {
        self.queue.push(event);
    }
}

/// A subscribed event handler.
pub type EventHandler<C> =
    Box<dyn FnMut(&mut EventContext<'_, C>, &Event) -> Result<(), EngineError>>;

/// Outcome of one [`EventBus::process`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessReport {
    /// Handler invocations that succeeded.
    pub delivered: usize,
    /// Handler invocations that returned an error.
    pub failed: usize,
}

/// Event bus over handler state `C`.
pub struct EventBus<C> {
    handlers: HashMap<EventKind, Vec<EventHandler<C>>>,
    queue: Vec<Event>,
}

impl<C> EventBus<C> {
    /// Create a new event bus with no handlers and an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            queue: Vec::new(),
        }
    }

    /// Subscribe a handler to an event kind. Handlers of the same kind run in
    /// subscription order.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&mut EventContext<'_, C>, &Event) -> Result<(), EngineError> + 'static,
    {
        self.handlers.entry(kind).or_default().push(Box::new(handler));
    }

    /// Queue an event. No handler runs until [`process`](Self::process).
    pub fn emit(&mut self, event: Event) {
        trace!(?event, "event queued");
        self.queue.push(event);
    }

    /// Deliver every queued event to its kind's handlers, in emission order.
    pub fn process(&mut self, state: &mut C) -> ProcessReport {
        let events = std::mem::take(&mut self.queue);
        let mut report = ProcessReport::default();

        for event in &events {
            let kind = event.kind();
            let Some(handlers) = self.handlers.get_mut(&kind) else {
                trace!(%kind, "no handlers for event");
                continue;
            };
            let mut ctx = EventContext {
                state: &mut *state,
                queue: &mut self.queue,
            };
            for handler in handlers.iter_mut() {
                match handler(&mut ctx, event) {
                    Ok(()) => report.delivered += 1,
                    Err(err) => {
                        warn!(%kind, ?event, error = %err, "event handler failed");
                        report.failed += 1;
                    }
                }
            }
        }

        if !events.is_empty() {
            trace!(
                events = events.len(),
                delivered = report.delivered,
                failed = report.failed,
                "events processed"
            );
        }
        report
    }

    /// Number of events waiting for the next [`process`](Self::process).
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }

    /// Drop every queued event without delivering it.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Number of handlers subscribed to `kind`.
    #[must_use]
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> std::fmt::Debug for EventBus<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let handlers: usize = self.handlers.values().map(Vec::len).sum();
        f.debug_struct("EventBus")
            .field("handlers", &handlers)
            .field("queue", &self.queue)
            .finish()
    }
}
