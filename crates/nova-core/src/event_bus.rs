//! Outbox of sync notifications.
//!
//! The session manager, goal mirror and milestone evaluator push a
//! `SyncEvent` whenever their state changes; the app drains the queue once
//! per frame and folds it into the screen projection. Nothing is delivered
//! synchronously, so a handler can never re-enter the component that
//! emitted the event.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use nova_types::event::SyncEvent;

/// Handle to the shared queue. Every clone pushes to the same queue.
#[derive(Clone)]
pub struct EventBus {
    inner: Rc<RefCell<VecDeque<SyncEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    pub fn emit(&self, event: SyncEvent) {
        self.inner.borrow_mut().push_back(event);
    }

    /// Take every queued event, oldest first.
    pub fn drain(&self) -> Vec<SyncEvent> {
        self.inner.borrow_mut().drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.inner.borrow().is_empty()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
