//! Typed overlay events and synchronous dispatch

use crate::element::WidgetId;
use std::collections::HashMap;
use vista_core::Size;

/// An input or component event raised inside the overlay
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// A button was pressed
    Clicked { source: WidgetId },
    /// A list row became highlighted (single click)
    Changed { source: WidgetId, index: usize },
    /// A list row was activated (double click / enter)
    Activated { source: WidgetId, index: usize },
    /// A component's OK control was pressed
    Confirmed { source: WidgetId },
    /// A component's Cancel control was pressed
    Cancelled { source: WidgetId },
    /// A modal component was closed by its user
    Dismissed { source: WidgetId },
    /// The surface hosting the overlay changed size
    Resized { size: Size },
}

/// Payload-free discriminant of [`UiEvent`], used to key subscriptions
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum EventKind {
    Clicked,
    Changed,
    Activated,
    Confirmed,
    Cancelled,
    Dismissed,
    Resized,
}

impl UiEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            UiEvent::Clicked { .. } => EventKind::Clicked,
            UiEvent::Changed { .. } => EventKind::Changed,
            UiEvent::Activated { .. } => EventKind::Activated,
            UiEvent::Confirmed { .. } => EventKind::Confirmed,
            UiEvent::Cancelled { .. } => EventKind::Cancelled,
            UiEvent::Dismissed { .. } => EventKind::Dismissed,
            UiEvent::Resized { .. } => EventKind::Resized,
        }
    }

    /// Widget or component that raised the event; `None` for surface events
    pub fn source(&self) -> Option<WidgetId> {
        match self {
            UiEvent::Clicked { source }
            | UiEvent::Changed { source, .. }
            | UiEvent::Activated { source, .. }
            | UiEvent::Confirmed { source }
            | UiEvent::Cancelled { source }
            | UiEvent::Dismissed { source } => Some(*source),
            UiEvent::Resized { .. } => None,
        }
    }
}

/// A handler receives the host context mutably plus the event
pub type Handler<C> = Box<dyn FnMut(&mut C, &UiEvent)>;

/// Synchronous, per-kind handler registry.
///
/// Handlers run in registration order on the caller's thread, inside
/// [`Dispatcher::dispatch`]. The context type `C` is whatever state the
/// host wants its handlers to mutate.
pub struct Dispatcher<C> {
    handlers: HashMap<EventKind, Vec<Handler<C>>>,
}

impl<C> Default for Dispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Dispatcher<C> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler for one event kind
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&mut C, &UiEvent) + 'static,
    {
        self.handlers.entry(kind).or_default().push(Box::new(handler));
    }

    /// Run every handler registered for the event's kind. Returns how many ran.
    pub fn dispatch(&mut self, ctx: &mut C, event: &UiEvent) -> usize {
        match self.handlers.get_mut(&event.kind()) {
            Some(handlers) => {
                for handler in handlers.iter_mut() {
                    handler(ctx, event);
                }
                handlers.len()
            }
            None => 0,
        }
    }

    /// Check whether anything listens for a kind
    pub fn has_handlers(&self, kind: EventKind) -> bool {
        self.handlers.get(&kind).is_some_and(|h| !h.is_empty())
    }
}
