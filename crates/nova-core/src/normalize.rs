//! Backend response shapes → canonical client types.
//!
//! The backend answers the same call in several shapes. All knowledge of
//! those shapes lives here; the sync components only see normalized values.

use std::collections::BTreeMap;
use serde_json::{json, Value};
use nova_types::{
    NovaError, Result,
    chat::{ChatMessage, Speaker},
    goal::{Goal, GoalCategory, GoalDraft, GoalStatus},
    user::UserProfile,
};

// ─── Credentials ─────────────────────────────────────────────

/// Outcome of looking for a bearer credential in an auth response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialLookup {
    Found(String),
    NotFound,
}

type CredentialStrategy = fn(&Value) -> Option<&str>;

/// Tried in order; the first non-empty hit wins.
const CREDENTIAL_STRATEGIES: &[CredentialStrategy] = &[
    nested_token,
    bare_token,
    access_token,
    legacy_token_response,
];

fn nested_token(data: &Value) -> Option<&str> {
    data.get("token")?.get("token")?.as_str()
}

fn bare_token(data: &Value) -> Option<&str> {
    data.get("token")?.as_str()
}

fn access_token(data: &Value) -> Option<&str> {
    data.get("accessToken")?.as_str()
}

fn legacy_token_response(data: &Value) -> Option<&str> {
    data.get("tokenResponse")?.get("token")?.as_str()
}

pub fn extract_credential(data: &Value) -> CredentialLookup {
    CREDENTIAL_STRATEGIES
        .iter()
        .filter_map(|strategy| strategy(data))
        .map(str::trim)
        .find(|token| !token.is_empty())
        .map(|token| CredentialLookup::Found(token.to_string()))
        .unwrap_or(CredentialLookup::NotFound)
}

/// Build the profile snapshot from an auth response.
///
/// Fields are read from the top level, falling back to a nested `user`
/// object. Returns `None` when no non-zero id is present.
pub fn profile_from_auth(data: &Value) -> Option<UserProfile> {
    let source = match data.get("user") {
        Some(user) if user.is_object() && numeric_id(data.get("id")).is_none() => user,
        _ => data,
    };

    let id = numeric_id(source.get("id")).filter(|id| *id != 0)?;
    let text = |key: &str| {
        source
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let career_objective = match source.get("professionalGoal").and_then(Value::as_str) {
        Some(goal) => goal.to_string(),
        None => text("careerObjective"),
    };
    let skills = source
        .get("skills")
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(skill_entry).collect())
        .unwrap_or_default();

    Some(UserProfile {
        id,
        name: text("name"),
        email: text("email"),
        career_objective,
        skills,
        role: text("role"),
        created_at: chrono::Utc::now().to_rfc3339(),
    })
}

/// A skill arrives either encoded (`"Rust|HARD"`) or as `{name, type}`
fn skill_entry(value: &Value) -> Option<String> {
    if let Some(s) = value.as_str() {
        return Some(s.to_string());
    }
    let name = value.get("name")?.as_str()?;
    match value.get("type").and_then(Value::as_str) {
        Some(kind) => Some(format!("{}|{}", name, kind.to_uppercase())),
        None => Some(name.to_string()),
    }
}

fn numeric_id(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn id_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

// ─── Error bodies ────────────────────────────────────────────

/// Human-readable message from an error body (`message`, then `error`)
pub fn backend_message(body: &str) -> Option<String> {
    let data: Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| data.get(*key).and_then(Value::as_str))
        .find(|msg| !msg.is_empty())
        .map(String::from)
}

/// Turn a rejected registration into a `Validation` error.
///
/// Field errors are accepted as an object map (`{"errors": {"email": "..."}}`)
/// or as a list (`{"errors": [{"field": "email", "message": "..."}]}`).
pub fn validation_error(status: u16, body: &str) -> NovaError {
    let mut fields = BTreeMap::new();
    if let Ok(data) = serde_json::from_str::<Value>(body) {
        match data.get("errors") {
            Some(Value::Object(map)) => {
                for (field, msg) in map {
                    if let Some(msg) = msg.as_str() {
                        fields.insert(field.clone(), msg.to_string());
                    }
                }
            }
            Some(Value::Array(items)) => {
                for item in items {
                    let field = item.get("field").and_then(Value::as_str);
                    let msg = item
                        .get("message")
                        .or_else(|| item.get("defaultMessage"))
                        .and_then(Value::as_str);
                    if let (Some(field), Some(msg)) = (field, msg) {
                        fields.insert(field.to_string(), msg.to_string());
                    }
                }
            }
            _ => {}
        }
    }

    let message = backend_message(body)
        .unwrap_or_else(|| format!("Registration rejected (HTTP {})", status));
    NovaError::Validation { message, fields }
}

// ─── Goal enums ──────────────────────────────────────────────

fn normalize_label(raw: &str) -> String {
    raw.trim().to_lowercase().replace(['_', ' '], "-")
}

fn category_from_label(raw: &str) -> Option<GoalCategory> {
    match normalize_label(raw).as_str() {
        "career" | "carreira" => Some(GoalCategory::Career),
        "skill" | "skills" | "habilidade" => Some(GoalCategory::Skill),
        "milestone" | "marco" => Some(GoalCategory::Milestone),
        _ => None,
    }
}

fn status_from_label(raw: &str) -> Option<GoalStatus> {
    match normalize_label(raw).as_str() {
        "todo" | "to-do" | "pending" | "pendente" => Some(GoalStatus::Todo),
        "in-progress" | "doing" | "em-andamento" => Some(GoalStatus::InProgress),
        "completed" | "complete" | "done" | "concluida" | "concluída" => {
            Some(GoalStatus::Completed)
        }
        _ => None,
    }
}

/// Wire identifier of a category
pub fn category_id(category: GoalCategory) -> u64 {
    match category {
        GoalCategory::Career => 1,
        GoalCategory::Skill => 2,
        GoalCategory::Milestone => 3,
    }
}

/// Wire identifier of a status
pub fn status_id(status: GoalStatus) -> u64 {
    match status {
        GoalStatus::Todo => 1,
        GoalStatus::InProgress => 2,
        GoalStatus::Completed => 3,
    }
}

fn status_description(status: GoalStatus) -> &'static str {
    match status {
        GoalStatus::Todo => "To Do",
        GoalStatus::InProgress => "In Progress",
        GoalStatus::Completed => "Completed",
    }
}

/// Accepts a bare string or a `{id, description}` object. Unknown → `Career`.
pub fn category_from_value(value: Option<&Value>) -> GoalCategory {
    let parsed = match value {
        Some(Value::String(s)) => category_from_label(s),
        Some(obj @ Value::Object(_)) => obj
            .get("description")
            .or_else(|| obj.get("name"))
            .and_then(Value::as_str)
            .and_then(category_from_label)
            .or_else(|| match numeric_id(obj.get("id")) {
                Some(1) => Some(GoalCategory::Career),
                Some(2) => Some(GoalCategory::Skill),
                Some(3) => Some(GoalCategory::Milestone),
                _ => None,
            }),
        _ => None,
    };
    parsed.unwrap_or_default()
}

/// Accepts a bare string or a `{id, description}` object. Unknown → `Todo`.
pub fn status_from_value(value: Option<&Value>) -> GoalStatus {
    let parsed = match value {
        Some(Value::String(s)) => status_from_label(s),
        Some(obj @ Value::Object(_)) => obj
            .get("description")
            .or_else(|| obj.get("name"))
            .and_then(Value::as_str)
            .and_then(status_from_label)
            .or_else(|| match numeric_id(obj.get("id")) {
                Some(1) => Some(GoalStatus::Todo),
                Some(2) => Some(GoalStatus::InProgress),
                Some(3) => Some(GoalStatus::Completed),
                _ => None,
            }),
        _ => None,
    };
    parsed.unwrap_or_default()
}

fn category_wire(category: GoalCategory) -> Value {
    json!({ "id": category_id(category), "description": category.label() })
}

fn status_wire(status: GoalStatus) -> Value {
    json!({ "id": status_id(status), "description": status_description(status) })
}

// ─── Goal bodies ─────────────────────────────────────────────

pub fn goal_draft_body(draft: &GoalDraft) -> Value {
    json!({
        "title": draft.title,
        "description": draft.description,
        "category": category_wire(draft.category),
        "status": status_wire(draft.status),
    })
}

/// Full-record body for `PUT /goals/{id}`
pub fn goal_record_body(goal: &Goal) -> Value {
    json!({
        "id": goal.id,
        "userId": goal.user_id,
        "title": goal.title,
        "description": goal.description,
        "category": category_wire(goal.category),
        "status": status_wire(goal.status),
    })
}

// ─── Goal lists ──────────────────────────────────────────────

type EnvelopeDetector = fn(&Value) -> Option<&Vec<Value>>;

/// Tried in order: bare array, `{content}` page, `{_embedded: {goalList}}`.
const GOAL_ENVELOPES: &[EnvelopeDetector] = &[bare_list, content_page, hal_page];

fn bare_list(data: &Value) -> Option<&Vec<Value>> {
    data.as_array()
}

fn content_page(data: &Value) -> Option<&Vec<Value>> {
    data.get("content")?.as_array()
}

fn hal_page(data: &Value) -> Option<&Vec<Value>> {
    data.get("_embedded")?.get("goalList")?.as_array()
}

/// Extract and normalize the goal list from any known envelope.
///
/// `null` (empty body) is an empty list. Records without an id cannot be
/// addressed later and are dropped.
pub fn goals_from_response(data: &Value) -> Result<Vec<Goal>> {
    if data.is_null() {
        return Ok(Vec::new());
    }
    let records = GOAL_ENVELOPES
        .iter()
        .find_map(|detect| detect(data))
        .ok_or_else(|| NovaError::Serialization("unrecognized goal list envelope".to_string()))?;

    Ok(records
        .iter()
        .filter_map(|record| {
            let goal = goal_from_record(record);
            if goal.is_none() {
                log::warn!("Dropping goal record without id: {}", record);
            }
            goal
        })
        .collect())
}

pub fn goal_from_record(record: &Value) -> Option<Goal> {
    let id = id_string(record.get("id"))?;
    let user_id = id_string(record.get("userId"))
        .or_else(|| id_string(record.get("user").and_then(|u| u.get("id"))))
        .unwrap_or_default();
    let text = |key: &str| match record.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    Some(Goal {
        id,
        user_id,
        title: text("title"),
        description: text("description"),
        category: category_from_value(record.get("category")),
        status: status_from_value(record.get("status")),
        created_at: text("createdAt"),
        updated_at: text("updatedAt"),
    })
}

// ─── Chat ────────────────────────────────────────────────────

/// Parse `[{from, text}]`, numbering turns 1.. in arrival order.
/// Anything not explicitly from the user is treated as a bot turn.
pub fn chat_history(data: &Value) -> Vec<ChatMessage> {
    let Some(items) = data.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let text = item
                .get("text")
                .or_else(|| item.get("message"))
                .and_then(Value::as_str)?;
            let from = match item.get("from").and_then(Value::as_str) {
                Some(from) if from.eq_ignore_ascii_case("user") => Speaker::User,
                _ => Speaker::Bot,
            };
            Some((from, text.to_string()))
        })
        .enumerate()
        .map(|(i, (from, text))| ChatMessage {
            id: i as u64 + 1,
            from,
            text,
        })
        .collect()
}
