//! UI-level state that drives rendering.
//! This is a read-only projection of the session, the goal mirror and the
//! chat transcript, updated each frame by draining the EventBus. Form
//! buffers live here as well so panels stay stateless.

use std::collections::BTreeMap;

use nova_core::achievements::Milestone;
use nova_types::{
    NovaError,
    chat::Transcript,
    event::{Route, SyncEvent},
    goal::{Goal, GoalCategory, GoalChanges, GoalDraft, GoalStats, GoalStatus},
    user::{ProfileUpdate, Skill, SkillType, UserProfile},
};

/// Event reporting a failed form submission. Validation field errors are
/// kept so they can be shown next to the form.
pub fn rejection_event(error: &NovaError) -> SyncEvent {
    match error {
        NovaError::Validation { message, fields } => SyncEvent::FormRejected {
            message: message.clone(),
            fields: fields.clone(),
        },
        NovaError::Auth(message) => SyncEvent::FormRejected {
            message: message.clone(),
            fields: BTreeMap::new(),
        },
        other => SyncEvent::FormRejected {
            message: other.to_string(),
            fields: BTreeMap::new(),
        },
    }
}

/// Something the user asked for; the app crate turns it into a sync call.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    Navigate(Route),
    Login { email: String, password: String },
    Register {
        name: String,
        email: String,
        password: String,
        career_objective: String,
    },
    Logout,
    RefreshGoals,
    CreateGoal(GoalDraft),
    UpdateGoal { id: String, changes: GoalChanges },
    ToggleGoal(String),
    DeleteGoal(String),
    LoadChatHistory,
    AskChat(String),
    SaveProfile(ProfileUpdate),
    DismissMilestone,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }

    /// Build the login action; the password buffer is cleared.
    pub fn submit(&mut self) -> Option<UiAction> {
        if !self.is_complete() {
            return None;
        }
        Some(UiAction::Login {
            email: self.email.trim().to_string(),
            password: std::mem::take(&mut self.password),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub career_objective: String,
}

impl RegisterForm {
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.email.trim().is_empty() && !self.password.is_empty()
    }

    pub fn submit(&mut self) -> Option<UiAction> {
        if !self.is_complete() {
            return None;
        }
        Some(UiAction::Register {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: std::mem::take(&mut self.password),
            career_objective: self.career_objective.trim().to_string(),
        })
    }
}

/// New-goal form, also used to edit an existing goal.
#[derive(Debug, Clone, Default)]
pub struct GoalForm {
    pub title: String,
    pub description: String,
    pub category: GoalCategory,
    /// Goal being edited; `None` while creating
    editing: Option<Goal>,
}

impl GoalForm {
    /// Fill the form from `goal` and switch to edit mode.
    pub fn edit(&mut self, goal: &Goal) {
        self.title = goal.title.clone();
        self.description = goal.description.clone();
        self.category = goal.category;
        self.editing = Some(goal.clone());
    }

    pub fn cancel(&mut self) {
        *self = GoalForm::default();
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_ref().map(|g| g.id.as_str())
    }

    /// New goals always start as `todo`. Edits send only the fields that
    /// changed, and an edit without changes sends nothing. Blank titles are
    /// refused.
    pub fn submit(&mut self) -> Option<UiAction> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return None;
        }
        let description = self.description.trim().to_string();
        let category = self.category;
        let editing = self.editing.take();
        *self = GoalForm::default();

        let Some(goal) = editing else {
            return Some(UiAction::CreateGoal(GoalDraft {
                title,
                description,
                category,
                status: GoalStatus::Todo,
            }));
        };
        let changes = GoalChanges {
            title: (title != goal.title).then_some(title),
            description: (description != goal.description).then_some(description),
            category: (category != goal.category).then_some(category),
            status: None,
        };
        if changes.is_empty() {
            return None;
        }
        Some(UiAction::UpdateGoal { id: goal.id, changes })
    }
}

#[derive(Debug, Clone)]
pub struct ProfileForm {
    pub name: String,
    pub career_objective: String,
    /// Encoded `name|TYPE` entries
    pub skills: Vec<String>,
    pub new_skill: String,
    pub new_skill_kind: SkillType,
}

impl Default for ProfileForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            career_objective: String::new(),
            skills: Vec::new(),
            new_skill: String::new(),
            new_skill_kind: SkillType::Hard,
        }
    }
}

impl ProfileForm {
    pub fn load(&mut self, user: &UserProfile) {
        self.name = user.name.clone();
        self.career_objective = user.career_objective.clone();
        self.skills = user.skills.clone();
        self.new_skill.clear();
    }

    /// Append the pending skill. Blank names and duplicates are ignored.
    pub fn add_skill(&mut self) -> bool {
        let name = self.new_skill.trim();
        if name.is_empty() {
            return false;
        }
        let encoded = Skill::new(name, self.new_skill_kind).encode();
        self.new_skill.clear();
        if self.skills.contains(&encoded) {
            return false;
        }
        self.skills.push(encoded);
        true
    }

    pub fn remove_skill(&mut self, index: usize) {
        if index < self.skills.len() {
            self.skills.remove(index);
        }
    }

    /// Only fields that differ from `user` are sent; an unchanged skill
    /// list is left out so no skill calls are made for it.
    pub fn to_update(&self, user: &UserProfile) -> ProfileUpdate {
        let name = self.name.trim();
        let objective = self.career_objective.trim();
        ProfileUpdate {
            name: (name != user.name).then(|| name.to_string()),
            career_objective: (objective != user.career_objective).then(|| objective.to_string()),
            skills: (self.skills != user.skills).then(|| self.skills.clone()),
        }
    }
}

/// State visible to UI panels
pub struct UiState {
    /// Screen being shown
    pub route: Route,
    /// False until the persisted session has been checked
    pub session_ready: bool,
    pub user: Option<UserProfile>,
    /// Copy of the goal mirror, refreshed by the app when marked stale
    pub goals: Vec<Goal>,
    pub stats: GoalStats,
    goals_stale: bool,
    pub transcript: Transcript,
    /// Transcript length when the pending history request was made
    history_from: Option<usize>,
    /// A question was sent and its answer has not arrived
    pub awaiting_answer: bool,
    pub milestone: Option<Milestone>,
    pub login: LoginForm,
    pub register: RegisterForm,
    pub goal_form: GoalForm,
    pub profile: ProfileForm,
    pub chat_input: String,
    /// Commands dispatched and not yet finished
    pub in_flight: usize,
    pub status_text: String,
    pub error_text: Option<String>,
    pub field_errors: BTreeMap<String, String>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            route: Route::default(),
            session_ready: false,
            user: None,
            goals: Vec::new(),
            stats: GoalStats::default(),
            goals_stale: false,
            transcript: Transcript::new(),
            history_from: None,
            awaiting_answer: false,
            milestone: None,
            login: LoginForm::default(),
            register: RegisterForm::default(),
            goal_form: GoalForm::default(),
            profile: ProfileForm::default(),
            chat_input: String::new(),
            in_flight: 0,
            status_text: "Loading...".to_string(),
            error_text: None,
            field_errors: BTreeMap::new(),
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<SyncEvent>) {
        for event in events {
            match event {
                SyncEvent::SessionChanged { user } => self.apply_session(user),
                SyncEvent::SessionExpired => {
                    self.route = Route::Login;
                    self.status_text = "Session expired, please sign in again".to_string();
                }
                SyncEvent::GoalsReplaced { count } => {
                    self.goals_stale = true;
                    self.status_text = format!("{} goals", count);
                }
                SyncEvent::GoalRemoved { id } => {
                    self.goals.retain(|g| g.id != id);
                    self.stats = GoalStats::from_goals(&self.goals);
                }
                SyncEvent::GoalStatusChanged { id, status } => {
                    if let Some(goal) = self.goals.iter_mut().find(|g| g.id == id) {
                        goal.status = status;
                    }
                    self.stats = GoalStats::from_goals(&self.goals);
                }
                SyncEvent::Milestone { seq, message } => {
                    self.milestone = Some(Milestone { seq, message });
                }
                SyncEvent::MilestoneCleared => {
                    self.milestone = None;
                }
                SyncEvent::ChatHistoryLoaded { user_id, .. }
                | SyncEvent::ChatAnswered { user_id, .. }
                | SyncEvent::ChatFailed { user_id, .. }
                    if !self.owns(user_id) =>
                {
                    log::debug!("Ignoring chat event for user {}", user_id);
                }
                SyncEvent::ChatHistoryLoaded { messages, .. } => {
                    let live_from = self.history_from.take().unwrap_or(self.transcript.len());
                    self.transcript.load_history(messages, live_from);
                }
                SyncEvent::ChatAnswered { text, .. } => {
                    self.transcript.push_bot(text);
                    self.awaiting_answer = false;
                }
                SyncEvent::ChatFailed { message, .. } => {
                    self.transcript.push_bot(format!("Sorry, something went wrong: {}", message));
                    self.awaiting_answer = false;
                }
                SyncEvent::FormRejected { message, fields } => {
                    self.error_text = Some(message);
                    self.field_errors = fields;
                }
                SyncEvent::Error { message } => {
                    self.status_text = format!("Error: {}", message);
                    self.error_text = Some(message);
                }
            }
        }
    }

    fn apply_session(&mut self, user: Option<UserProfile>) {
        self.session_ready = true;
        let same_user = self.user.as_ref().map(|u| u.id) == user.as_ref().map(|u| u.id);
        if !same_user {
            log::debug!("Session user changed, dropping per-user view state");
            self.transcript.clear();
            self.history_from = None;
            self.awaiting_answer = false;
            self.goal_form.cancel();
            self.goals.clear();
            self.stats = GoalStats::default();
            self.milestone = None;
        }
        match user {
            Some(ref u) => {
                self.profile.load(u);
                self.status_text = format!("Signed in as {}", u.name);
            }
            None => {
                self.profile = ProfileForm::default();
                self.status_text = "Signed out".to_string();
            }
        }
        self.user = user;
        self.clear_errors();
    }

    /// True once after a fetch replaced the mirror.
    pub fn take_goals_stale(&mut self) -> bool {
        std::mem::take(&mut self.goals_stale)
    }

    pub fn set_goals(&mut self, goals: Vec<Goal>) {
        self.stats = GoalStats::from_goals(&goals);
        self.goals = goals;
    }

    /// Build the history action; turns added before the reply arrives are
    /// kept after the loaded history.
    pub fn request_history(&mut self) -> UiAction {
        self.history_from = Some(self.transcript.len());
        UiAction::LoadChatHistory
    }

    /// Whether a chat reply made for `user_id` belongs to the signed-in user.
    fn owns(&self, user_id: u64) -> bool {
        self.user.as_ref().map(|u| u.id) == Some(user_id)
    }

    /// Record the user's question and build the ask action.
    pub fn submit_question(&mut self) -> Option<UiAction> {
        let text = self.chat_input.trim().to_string();
        if text.is_empty() || self.awaiting_answer {
            return None;
        }
        self.chat_input.clear();
        self.transcript.push_user(text.clone());
        self.awaiting_answer = true;
        Some(UiAction::AskChat(text))
    }

    pub fn clear_errors(&mut self) {
        self.error_text = None;
        self.field_errors.clear();
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0 || !self.session_ready
    }

    /// Route to actually show: protected screens need a user, the auth
    /// screens are skipped once signed in. Nothing moves while loading.
    pub fn guard(&self, requested: Route) -> Route {
        if !self.session_ready {
            return requested;
        }
        match (requested.is_protected(), self.is_authenticated()) {
            (true, false) => Route::Login,
            (false, true) => Route::Dashboard,
            _ => requested,
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
