//! Typed event-hook registry for social-graph events.
//!
//! # Responsibility
//! - Map each enumerated event kind to exactly one registered handler.
//! - Route incoming events to the matching handler.
//!
//! # Invariants
//! - At most one handler per event kind; duplicates are rejected.
//! - Dispatching an unregistered kind is a defined no-op, never an error.

use crate::model::event::{ActivityEvent, EventKind};
use crate::model::notice::Notice;
use crate::repo::notice_store::StoreResult;
use log::debug;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Handler registration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    DuplicateHandler(EventKind),
}

impl Display for DispatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateHandler(kind) => {
                write!(f, "handler already registered for event kind: {kind}")
            }
        }
    }
}

impl Error for DispatchError {}

/// One typed handler for social-graph events.
///
/// Returning `Ok(None)` means the handler chose not to emit a notice; the
/// triggering event still counts as handled.
pub trait EventHandler {
    fn handle(&self, event: &ActivityEvent) -> StoreResult<Option<Notice>>;
}

impl<F> EventHandler for F
where
    F: Fn(&ActivityEvent) -> StoreResult<Option<Notice>>,
{
    fn handle(&self, event: &ActivityEvent) -> StoreResult<Option<Notice>> {
        self(event)
    }
}

/// Fixed dispatch table keyed by enumerated event kind.
#[derive(Default)]
pub struct HookRegistry<'h> {
    handlers: BTreeMap<EventKind, Box<dyn EventHandler + 'h>>,
}

impl<'h> HookRegistry<'h> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one handler for one event kind.
    pub fn register(
        &mut self,
        kind: EventKind,
        handler: impl EventHandler + 'h,
    ) -> Result<(), DispatchError> {
        if self.handlers.contains_key(&kind) {
            return Err(DispatchError::DuplicateHandler(kind));
        }

        self.handlers.insert(kind, Box::new(handler));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Returns registered kinds in sorted order.
    pub fn registered_kinds(&self) -> Vec<EventKind> {
        self.handlers.keys().copied().collect()
    }

    /// Routes one event to the handler registered for its kind.
    ///
    /// An unregistered kind is absorbed as a no-op so that the relationship
    /// change that produced the event always succeeds from the host's view.
    pub fn dispatch(&self, event: &ActivityEvent) -> StoreResult<Option<Notice>> {
        match self.handlers.get(&event.kind()) {
            Some(handler) => handler.handle(event),
            None => {
                debug!(
                    "event=hook_dispatch module=dispatch status=skip kind={}",
                    event.kind()
                );
                Ok(None)
            }
        }
    }
}
