//! Goals sync: local mirror of the user's goals.
//!
//! The backend is authoritative. Every mutating call is followed by a full
//! refetch, except delete (removed locally) and status toggles (applied
//! before the backend answers and never rolled back).
//!
//! Each operation takes a ticket when it starts. If the view unmounts or the
//! signed-in user changes before its response arrives, the response is
//! dropped instead of touching the mirror.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use nova_types::{
    NovaError, Result,
    event::SyncEvent,
    goal::{Goal, GoalChanges, GoalDraft, GoalStats, GoalStatus},
};
use crate::achievements::AchievementEvaluator;
use crate::api::ApiClient;
use crate::event_bus::EventBus;
use crate::normalize;
use crate::ports::HttpRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ticket {
    epoch: u64,
    user_id: u64,
}

pub struct GoalsSync {
    api: Rc<ApiClient>,
    achievements: Rc<AchievementEvaluator>,
    event_bus: EventBus,
    mirror: RefCell<Vec<Goal>>,
    epoch: Cell<u64>,
}

impl GoalsSync {
    pub fn new(
        api: Rc<ApiClient>,
        achievements: Rc<AchievementEvaluator>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            api,
            achievements,
            event_bus,
            mirror: RefCell::new(Vec::new()),
            epoch: Cell::new(0),
        }
    }

    // ─── Reads ───────────────────────────────────────────────

    pub fn goals(&self) -> Vec<Goal> {
        self.mirror.borrow().clone()
    }

    pub fn find(&self, id: &str) -> Option<Goal> {
        self.mirror.borrow().iter().find(|g| g.id == id).cloned()
    }

    pub fn stats(&self) -> GoalStats {
        GoalStats::from_goals(&self.mirror.borrow())
    }

    // ─── Lifecycle ───────────────────────────────────────────

    /// The owning view went away; in-flight responses are discarded.
    pub fn unmount(&self) {
        self.epoch.set(self.epoch.get() + 1);
    }

    /// Drop the mirror (e.g. after sign-out) and discard in-flight responses.
    pub fn reset(&self) {
        self.unmount();
        self.mirror.borrow_mut().clear();
    }

    fn ticket(&self) -> Option<Ticket> {
        self.api.session().user_id().map(|user_id| Ticket {
            epoch: self.epoch.get(),
            user_id,
        })
    }

    fn require_ticket(&self) -> Result<Ticket> {
        self.ticket()
            .ok_or_else(|| NovaError::Auth("Not signed in".to_string()))
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        ticket.epoch == self.epoch.get() && self.api.session().user_id() == Some(ticket.user_id)
    }

    /// A 401 was already handled by the API client; the operation just stops.
    /// Other errors are logged and returned, leaving the mirror as it was.
    fn settle<T>(&self, op: &str, result: Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(NovaError::SessionExpired) => Ok(None),
            Err(e) => {
                log::error!("Goal {} failed: {}", op, e);
                Err(e)
            }
        }
    }

    // ─── Commands ────────────────────────────────────────────

    /// Replace the mirror with the backend's list for the current user.
    pub async fn fetch(&self) -> Result<()> {
        match self.ticket() {
            Some(ticket) => self.fetch_for(ticket).await,
            None => {
                log::debug!("Goal fetch skipped: no signed-in user");
                Ok(())
            }
        }
    }

    async fn fetch_for(&self, ticket: Ticket) -> Result<()> {
        let req = HttpRequest::get("/goals").with_query("userId", ticket.user_id);
        let Some(data) = self.settle("fetch", self.api.send_json(req).await)? else {
            return Ok(());
        };
        let goals = self.settle("fetch", normalize::goals_from_response(&data))?
            .unwrap_or_default();

        if !self.is_current(ticket) {
            log::debug!("Discarding stale goal list");
            return Ok(());
        }
        let count = goals.len();
        *self.mirror.borrow_mut() = goals;
        self.event_bus.emit(SyncEvent::GoalsReplaced { count });
        Ok(())
    }

    pub async fn create(&self, draft: GoalDraft) -> Result<()> {
        let ticket = self.require_ticket()?;
        let req = HttpRequest::post("/goals", normalize::goal_draft_body(&draft))
            .with_query("userId", ticket.user_id);
        if self.settle("create", self.api.send_ok(req).await)?.is_none() {
            return Ok(());
        }
        if !self.is_current(ticket) {
            return Ok(());
        }
        self.fetch_for(ticket).await
    }

    pub async fn update(&self, id: &str, changes: GoalChanges) -> Result<()> {
        let ticket = self.require_ticket()?;
        let before = self
            .find(id)
            .ok_or_else(|| NovaError::NotFound(format!("goal {}", id)))?;
        self.push_update(ticket, before, changes).await
    }

    /// Send the merged record. `before` is the record as it was prior to this
    /// command, used to detect a transition into `completed`.
    async fn push_update(&self, ticket: Ticket, before: Goal, changes: GoalChanges) -> Result<()> {
        let merged = changes.apply_to(&before);
        let req = HttpRequest::put(
            format!("/goals/{}", before.id),
            normalize::goal_record_body(&merged),
        )
        .with_query("userId", ticket.user_id);

        if self.settle("update", self.api.send_ok(req).await)?.is_none() {
            return Ok(());
        }
        if !self.is_current(ticket) {
            return Ok(());
        }

        if before.status != GoalStatus::Completed && merged.status == GoalStatus::Completed {
            self.achievements.goal_completed(&merged);
        }
        self.fetch_for(ticket).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let ticket = self.require_ticket()?;
        let req = HttpRequest::delete(format!("/goals/{}", id)).with_query("userId", ticket.user_id);
        if self.settle("delete", self.api.send_ok(req).await)?.is_none() {
            return Ok(());
        }
        if !self.is_current(ticket) {
            return Ok(());
        }

        self.mirror.borrow_mut().retain(|g| g.id != id);
        self.event_bus.emit(SyncEvent::GoalRemoved { id: id.to_string() });
        Ok(())
    }

    /// Advance the status one step (todo → in-progress → completed → todo),
    /// show it immediately, then push it. A failed push is not rolled back;
    /// the next fetch reconciles.
    pub async fn toggle_status(&self, id: &str) -> Result<()> {
        let ticket = self.require_ticket()?;
        let before = self
            .find(id)
            .ok_or_else(|| NovaError::NotFound(format!("goal {}", id)))?;
        let next = before.status.next();

        if let Some(goal) = self.mirror.borrow_mut().iter_mut().find(|g| g.id == id) {
            goal.status = next;
        }
        self.event_bus.emit(SyncEvent::GoalStatusChanged {
            id: id.to_string(),
            status: next,
        });

        self.push_update(ticket, before, GoalChanges::status(next)).await
    }
}
