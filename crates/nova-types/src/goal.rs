use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalCategory {
    #[default]
    Career,
    Skill,
    Milestone,
}

impl GoalCategory {
    pub fn all() -> &'static [GoalCategory] {
        &[GoalCategory::Career, GoalCategory::Skill, GoalCategory::Milestone]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalCategory::Career => "career",
            GoalCategory::Skill => "skill",
            GoalCategory::Milestone => "milestone",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GoalCategory::Career => "Career",
            GoalCategory::Skill => "Skill",
            GoalCategory::Milestone => "Milestone",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalStatus {
    #[default]
    Todo,
    InProgress,
    Completed,
}

impl GoalStatus {
    pub fn all() -> &'static [GoalStatus] {
        &[GoalStatus::Todo, GoalStatus::InProgress, GoalStatus::Completed]
    }

    /// Cyclic successor: todo → in-progress → completed → todo
    pub fn next(&self) -> GoalStatus {
        match self {
            GoalStatus::Todo => GoalStatus::InProgress,
            GoalStatus::InProgress => GoalStatus::Completed,
            GoalStatus::Completed => GoalStatus::Todo,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Todo => "todo",
            GoalStatus::InProgress => "in-progress",
            GoalStatus::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GoalStatus::Todo => "To do",
            GoalStatus::InProgress => "In progress",
            GoalStatus::Completed => "Completed",
        }
    }
}

/// A goal as held in the client mirror, already normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub category: GoalCategory,
    pub status: GoalStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Payload for creating a goal; the server assigns id, owner and timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDraft {
    pub title: String,
    pub description: String,
    pub category: GoalCategory,
    pub status: GoalStatus,
}

impl GoalDraft {
    pub fn new(title: impl Into<String>, category: GoalCategory) -> Self {
        Self {
            title: title.into(),
            category,
            ..Default::default()
        }
    }
}

/// Partial goal edit. `None` keeps the cached value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<GoalCategory>,
    pub status: Option<GoalStatus>,
}

impl GoalChanges {
    pub fn status(status: GoalStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.status.is_none()
    }

    pub fn apply_to(&self, goal: &Goal) -> Goal {
        let mut merged = goal.clone();
        if let Some(ref title) = self.title {
            merged.title = title.clone();
        }
        if let Some(ref description) = self.description {
            merged.description = description.clone();
        }
        if let Some(category) = self.category {
            merged.category = category;
        }
        if let Some(status) = self.status {
            merged.status = status;
        }
        merged
    }
}

/// Dashboard counters derived from the mirror
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GoalStats {
    pub total: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl GoalStats {
    pub fn from_goals(goals: &[Goal]) -> Self {
        Self {
            total: goals.len(),
            in_progress: goals
                .iter()
                .filter(|g| g.status == GoalStatus::InProgress)
                .count(),
            completed: goals
                .iter()
                .filter(|g| g.status == GoalStatus::Completed)
                .count(),
        }
    }
}
