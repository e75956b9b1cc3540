#[cfg(test)]
mod tests {
    use crate::user::*;
    use crate::goal::*;
    use crate::chat::*;
    use crate::event::*;
    use crate::config::*;
    use crate::error::*;

    fn goal(status: GoalStatus) -> Goal {
        Goal {
            id: "1".to_string(),
            user_id: "7".to_string(),
            title: "Learn Rust".to_string(),
            description: String::new(),
            category: GoalCategory::Skill,
            status,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    // ─── Skill Tests ─────────────────────────────────────────

    #[test]
    fn test_skill_parse_with_type() {
        let skill = Skill::parse("Communication|SOFT");
        assert_eq!(skill.name, "Communication");
        assert_eq!(skill.kind, SkillType::Soft);
    }

    #[test]
    fn test_skill_parse_legacy_defaults_to_hard() {
        let skill = Skill::parse("Kubernetes");
        assert_eq!(skill.name, "Kubernetes");
        assert_eq!(skill.kind, SkillType::Hard);
    }

    #[test]
    fn test_skill_parse_unknown_type_is_hard() {
        let skill = Skill::parse("Go|EXPERT");
        assert_eq!(skill.name, "Go");
        assert_eq!(skill.kind, SkillType::Hard);
    }

    #[test]
    fn test_skill_parse_lowercase_type() {
        assert_eq!(Skill::parse("Teamwork|soft").kind, SkillType::Soft);
    }

    #[test]
    fn test_skill_encode() {
        assert_eq!(Skill::new("Rust", SkillType::Hard).encode(), "Rust|HARD");
        assert_eq!(Skill::parse("Leadership").encode(), "Leadership|HARD");
    }

    // ─── Profile Tests ───────────────────────────────────────

    #[test]
    fn test_profile_missing_id_is_invalid() {
        let profile: UserProfile = serde_json::from_str(r#"{"name":"Ana"}"#).unwrap();
        assert_eq!(profile.id, 0);
        assert!(!profile.has_valid_id());
    }

    #[test]
    fn test_profile_camel_case_fields() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"id":7,"name":"Ana","email":"a@x.com","careerObjective":"Staff engineer","skills":["Rust|HARD"]}"#,
        )
        .unwrap();
        assert!(profile.has_valid_id());
        assert_eq!(profile.career_objective, "Staff engineer");
        assert_eq!(profile.parsed_skills(), vec![Skill::new("Rust", SkillType::Hard)]);
    }

    #[test]
    fn test_profile_update_merges_only_present_fields() {
        let base = UserProfile {
            id: 7,
            name: "Ana".to_string(),
            email: "a@x.com".to_string(),
            career_objective: "Backend".to_string(),
            skills: vec![],
            role: "USER".to_string(),
            created_at: String::new(),
        };
        let update = ProfileUpdate {
            career_objective: Some("Platform".to_string()),
            ..Default::default()
        };
        let merged = update.apply_to(&base);
        assert_eq!(merged.name, "Ana");
        assert_eq!(merged.career_objective, "Platform");
        assert_eq!(merged.id, 7);
        assert!(!update.is_empty());
        assert!(ProfileUpdate::default().is_empty());
    }

    #[test]
    fn test_profile_update_ignores_email() {
        let update: ProfileUpdate =
            serde_json::from_str(r#"{"email":"new@x.com","careerObjective":"CTO"}"#).unwrap();
        assert_eq!(update.career_objective.as_deref(), Some("CTO"));

        let base: UserProfile = serde_json::from_str(r#"{"id":7,"email":"a@x.com"}"#).unwrap();
        assert_eq!(update.apply_to(&base).email, "a@x.com");
    }

    // ─── Goal Tests ──────────────────────────────────────────

    #[test]
    fn test_status_cycle_has_period_three() {
        for start in GoalStatus::all() {
            assert_eq!(start.next().next().next(), *start);
            assert_ne!(start.next(), *start);
        }
        assert_eq!(GoalStatus::Todo.next(), GoalStatus::InProgress);
        assert_eq!(GoalStatus::InProgress.next(), GoalStatus::Completed);
        assert_eq!(GoalStatus::Completed.next(), GoalStatus::Todo);
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&GoalStatus::InProgress).unwrap(), r#""in-progress""#);
        assert_eq!(serde_json::to_string(&GoalCategory::Milestone).unwrap(), r#""milestone""#);
    }

    #[test]
    fn test_enum_defaults() {
        assert_eq!(GoalStatus::default(), GoalStatus::Todo);
        assert_eq!(GoalCategory::default(), GoalCategory::Career);
    }

    #[test]
    fn test_goal_changes_apply() {
        let changes = GoalChanges {
            title: Some("Learn Go".to_string()),
            status: Some(GoalStatus::Completed),
            ..Default::default()
        };
        let merged = changes.apply_to(&goal(GoalStatus::Todo));
        assert_eq!(merged.title, "Learn Go");
        assert_eq!(merged.status, GoalStatus::Completed);
        assert_eq!(merged.category, GoalCategory::Skill);
    }

    #[test]
    fn test_goal_stats() {
        let goals = vec![
            goal(GoalStatus::Todo),
            goal(GoalStatus::InProgress),
            goal(GoalStatus::Completed),
            goal(GoalStatus::Completed),
        ];
        let stats = GoalStats::from_goals(&goals);
        assert_eq!(stats, GoalStats { total: 4, in_progress: 1, completed: 2 });
        assert_eq!(GoalStats::from_goals(&[]), GoalStats::default());
    }

    // ─── Transcript Tests ────────────────────────────────────

    #[test]
    fn test_transcript_assigns_sequential_ids() {
        let mut t = Transcript::new();
        assert!(t.is_empty());
        assert_eq!(t.push_user("hi"), 1);
        assert_eq!(t.push_bot("hello"), 2);
        assert_eq!(t.len(), 2);
        assert_eq!(t.messages()[0].from, Speaker::User);
        assert_eq!(t.messages()[1].from, Speaker::Bot);
    }

    #[test]
    fn test_transcript_renumbers_history() {
        let mut t = Transcript::new();
        t.load_history(
            vec![
                ChatMessage { id: 40, from: Speaker::User, text: "a".to_string() },
                ChatMessage { id: 41, from: Speaker::Bot, text: "b".to_string() },
            ],
            0,
        );
        t.push_user("c");
        let ids: Vec<u64> = t.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_history_goes_before_live_turns() {
        let mut t = Transcript::new();
        t.push_user("stale");
        t.push_user("asked while loading");
        t.load_history(
            vec![ChatMessage { id: 9, from: Speaker::Bot, text: "old".to_string() }],
            1,
        );
        let turns: Vec<(u64, &str)> = t.messages().iter().map(|m| (m.id, m.text.as_str())).collect();
        assert_eq!(turns, vec![(1, "old"), (2, "asked while loading")]);
        assert_eq!(t.push_bot("answer"), 3);
    }

    #[test]
    fn test_history_live_mark_past_end_replaces_all() {
        let mut t = Transcript::new();
        t.push_user("stale");
        t.load_history(Vec::new(), 10);
        assert!(t.is_empty());
    }

    #[test]
    fn test_speaker_serialization() {
        assert_eq!(serde_json::to_string(&Speaker::Bot).unwrap(), r#""bot""#);
        let s: Speaker = serde_json::from_str(r#""user""#).unwrap();
        assert_eq!(s, Speaker::User);
    }

    // ─── Route Tests ─────────────────────────────────────────

    #[test]
    fn test_route_paths_roundtrip() {
        for route in [Route::Login, Route::Register, Route::Dashboard, Route::Chat, Route::Profile] {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("#/dashboard/"), Some(Route::Dashboard));
        assert_eq!(Route::from_path("/nowhere"), None);
    }

    #[test]
    fn test_route_protection() {
        assert!(!Route::Login.is_protected());
        assert!(!Route::Register.is_protected());
        assert!(Route::Dashboard.is_protected());
        assert!(Route::Chat.is_protected());
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.milestone_timeout_ms, 5000);
        assert_eq!(config.storage.backend, StorageBackendType::Auto);
    }

    #[test]
    fn test_api_url_join() {
        let api = ApiConfig { base_url: "http://host/api/".to_string() };
        assert_eq!(api.url("/goals"), "http://host/api/goals");
        assert_eq!(api.url("login"), "http://host/api/login");
    }

    #[test]
    fn test_config_deserialize() {
        let json = r#"{"api":{"base_url":"https://nova.example"},"storage":{"backend":"Memory"},"milestone_timeout_ms":3000}"#;
        let config: ClientConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.api.base_url, "https://nova.example");
        assert_eq!(config.storage.backend, StorageBackendType::Memory);
        assert_eq!(config.milestone_timeout_ms, 3000);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ClientConfig = serde_json::from_str(r#"{"milestone_timeout_ms":800}"#).unwrap();
        assert_eq!(config.milestone_timeout_ms, 800);
        assert_eq!(config.api, ApiConfig::default());
        assert_eq!(config.storage.backend, StorageBackendType::Auto);
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_display() {
        assert_eq!(NovaError::SessionExpired.to_string(), "Session expired");
        assert_eq!(
            NovaError::Http { status: 500, body: "boom".to_string() }.to_string(),
            "HTTP 500: boom"
        );
        assert_eq!(NovaError::validation("bad").to_string(), "Validation error: bad");
    }

    #[test]
    fn test_error_from_serde() {
        let err: NovaError = serde_json::from_str::<UserProfile>("not json").unwrap_err().into();
        assert!(matches!(err, NovaError::Serialization(_)));
        assert!(!err.is_session_expired());
    }
}
