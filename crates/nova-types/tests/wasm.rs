//! WASM-target tests for nova-types.
//!
//! Mirrors a subset of the native unit tests under wasm32-unknown-unknown
//! via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use nova_types::user::*;
use nova_types::goal::*;
use nova_types::chat::*;
use nova_types::event::*;
use nova_types::config::*;
use nova_types::error::*;

#[wasm_bindgen_test]
fn skill_parse_with_type() {
    let skill = Skill::parse("Communication|SOFT");
    assert_eq!(skill.name, "Communication");
    assert_eq!(skill.kind, SkillType::Soft);
}

#[wasm_bindgen_test]
fn skill_parse_legacy_defaults_to_hard() {
    let skill = Skill::parse("Kubernetes");
    assert_eq!(skill.name, "Kubernetes");
    assert_eq!(skill.kind, SkillType::Hard);
}

#[wasm_bindgen_test]
fn profile_missing_id_is_invalid() {
    let profile: UserProfile = serde_json::from_str(r#"{"name":"Ana"}"#).unwrap();
    assert!(!profile.has_valid_id());
}

#[wasm_bindgen_test]
fn status_cycle_has_period_three() {
    for start in GoalStatus::all() {
        assert_eq!(start.next().next().next(), *start);
    }
}

#[wasm_bindgen_test]
fn transcript_assigns_sequential_ids() {
    let mut t = Transcript::new();
    assert_eq!(t.push_user("hi"), 1);
    assert_eq!(t.push_bot("hello"), 2);
}

#[wasm_bindgen_test]
fn route_paths_roundtrip() {
    assert_eq!(Route::from_path("#/chatbot"), Some(Route::Chat));
    assert_eq!(Route::from_path(Route::Profile.path()), Some(Route::Profile));
}

#[wasm_bindgen_test]
fn config_defaults() {
    let config = ClientConfig::default();
    assert_eq!(config.milestone_timeout_ms, DEFAULT_MILESTONE_TIMEOUT_MS);
    assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
}

#[wasm_bindgen_test]
fn error_display() {
    assert_eq!(NovaError::SessionExpired.to_string(), "Session expired");
    assert_eq!(NovaError::Chat("down".to_string()).to_string(), "Chat error: down");
}
