use serde::{Deserialize, Serialize};

/// Cached profile snapshot of the signed-in user.
///
/// Persisted as JSON next to the bearer credential. A snapshot whose `id`
/// is zero is never valid; the session layer treats it as corrupt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub career_objective: String,
    /// Encoded skills, see [`Skill`]
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub created_at: String,
}

impl UserProfile {
    pub fn has_valid_id(&self) -> bool {
        self.id != 0
    }

    /// Decoded view of `skills`
    pub fn parsed_skills(&self) -> Vec<Skill> {
        self.skills.iter().map(|s| Skill::parse(s)).collect()
    }
}

/// Partial profile edit. `None` leaves the field untouched. The email is
/// fixed at registration and cannot be edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub career_objective: Option<String>,
    pub skills: Option<Vec<String>>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.career_objective.is_none()
            && self.skills.is_none()
    }

    /// Merge onto `base`, returning the updated copy.
    pub fn apply_to(&self, base: &UserProfile) -> UserProfile {
        let mut merged = base.clone();
        if let Some(ref name) = self.name {
            merged.name = name.clone();
        }
        if let Some(ref objective) = self.career_objective {
            merged.career_objective = objective.clone();
        }
        if let Some(ref skills) = self.skills {
            merged.skills = skills.clone();
        }
        merged
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SkillType {
    Hard,
    Soft,
}

impl SkillType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillType::Hard => "HARD",
            SkillType::Soft => "SOFT",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SkillType::Hard => "Hard skill",
            SkillType::Soft => "Soft skill",
        }
    }
}

/// A skill stored on the profile as `name|TYPE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    pub name: String,
    pub kind: SkillType,
}

impl Skill {
    pub fn new(name: impl Into<String>, kind: SkillType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Decode `name|TYPE`. Legacy entries without a separator are hard skills
    /// named by the whole string; an unknown type also falls back to hard.
    pub fn parse(encoded: &str) -> Self {
        match encoded.rsplit_once('|') {
            Some((name, kind)) => {
                let kind = if kind.trim().eq_ignore_ascii_case("SOFT") {
                    SkillType::Soft
                } else {
                    SkillType::Hard
                };
                Self::new(name, kind)
            }
            None => Self::new(encoded, SkillType::Hard),
        }
    }

    pub fn encode(&self) -> String {
        format!("{}|{}", self.name, self.kind.as_str())
    }
}
