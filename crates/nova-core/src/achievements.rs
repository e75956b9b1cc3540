//! Achievement evaluator: one-shot milestone notifications.
//!
//! At most one notification is active. Each carries a sequence number so a
//! display timeout armed for an earlier notification cannot clear a newer one.

use std::cell::{Cell, RefCell};
use nova_types::{event::SyncEvent, goal::Goal};
use crate::event_bus::EventBus;

pub const MILESTONE_MESSAGE: &str = "Goal completed! One more step towards your career objective.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Milestone {
    pub seq: u64,
    pub message: String,
}

pub struct AchievementEvaluator {
    event_bus: EventBus,
    active: RefCell<Option<Milestone>>,
    last_seq: Cell<u64>,
}

impl AchievementEvaluator {
    pub fn new(event_bus: EventBus) -> Self {
        Self {
            event_bus,
            active: RefCell::new(None),
            last_seq: Cell::new(0),
        }
    }

    /// Called once a mutation moving `goal` into `completed` was accepted.
    /// Replaces any notification still on screen.
    pub fn goal_completed(&self, goal: &Goal) -> u64 {
        let seq = self.last_seq.get() + 1;
        self.last_seq.set(seq);
        log::info!("Milestone: goal {} completed", goal.id);

        let milestone = Milestone {
            seq,
            message: MILESTONE_MESSAGE.to_string(),
        };
        *self.active.borrow_mut() = Some(milestone.clone());
        self.event_bus.emit(SyncEvent::Milestone {
            seq,
            message: milestone.message,
        });
        seq
    }

    pub fn active(&self) -> Option<Milestone> {
        self.active.borrow().clone()
    }

    pub fn dismiss(&self) {
        if self.active.borrow_mut().take().is_some() {
            self.event_bus.emit(SyncEvent::MilestoneCleared);
        }
    }

    /// Display timeout for notification `seq`. No-op if it was already
    /// dismissed or replaced.
    pub fn expire(&self, seq: u64) -> bool {
        let current = self.active.borrow().as_ref().map(|m| m.seq);
        if current == Some(seq) {
            self.dismiss();
            true
        } else {
            false
        }
    }
}
