use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::chat::ChatMessage;
use crate::goal::GoalStatus;
use crate::user::UserProfile;

/// Navigation targets the client can be sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    #[default]
    Login,
    Register,
    Dashboard,
    Chat,
    Profile,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::Chat => "/chatbot",
            Route::Profile => "/profile",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.trim_start_matches('#');
        match path.trim_end_matches('/') {
            "/login" => Some(Route::Login),
            "/register" => Some(Route::Register),
            "/dashboard" => Some(Route::Dashboard),
            "/chatbot" => Some(Route::Chat),
            "/profile" => Some(Route::Profile),
            _ => None,
        }
    }

    /// Routes that need a signed-in user
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login | Route::Register)
    }
}

/// Events emitted by the sync layer.
/// UI drains these for reactive updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SyncEvent {
    /// The signed-in user changed (login, logout, profile edit, restore)
    SessionChanged { user: Option<UserProfile> },

    /// A 401 forced the session closed
    SessionExpired,

    /// The goals mirror was replaced by a fetch
    GoalsReplaced { count: usize },

    /// A goal was removed from the mirror
    GoalRemoved { id: String },

    /// A goal's status changed locally (optimistic or confirmed)
    GoalStatusChanged { id: String, status: GoalStatus },

    /// A milestone notification became active
    Milestone { seq: u64, message: String },

    /// The active milestone notification was dismissed or timed out
    MilestoneCleared,

    /// Prior chat turns arrived for the chat view. Chat events carry the
    /// id of the user the request was made for.
    ChatHistoryLoaded { user_id: u64, messages: Vec<ChatMessage> },

    /// The assistant answered the pending question
    ChatAnswered { user_id: u64, text: String },

    /// The pending question failed; shown as a single error turn
    ChatFailed { user_id: u64, message: String },

    /// A form submission was rejected; `fields` maps field name to message
    FormRejected {
        message: String,
        fields: BTreeMap<String, String>,
    },

    /// An error worth showing to the user
    Error { message: String },
}
