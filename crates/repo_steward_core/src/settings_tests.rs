use super::*;

#[test]
fn test_default_settings_enable_every_plugin() {
    let settings = BotSettings::default();

    assert!(settings.is_plugin_enabled("triage"));
    assert!(settings.is_plugin_enabled("issue-archiver"));
    assert_eq!(settings.commit_message.convention, CommitConvention::Legacy);
}

#[test]
fn test_enabled_plugins_filter() {
    let settings = BotSettings {
        enabled_plugins: Some(vec!["triage".to_string(), "wip".to_string()]),
        ..BotSettings::default()
    };

    assert!(settings.is_plugin_enabled("wip"));
    assert!(!settings.is_plugin_enabled("auto-closer"));
}

#[test]
fn test_deserialize_partial_settings() {
    let settings: BotSettings = serde_json::from_value(serde_json::json!({
        "bot_login": "steward-bot",
        "commit_message": { "convention": "conventional" }
    }))
    .unwrap();

    assert_eq!(settings.bot_login, "steward-bot");
    assert_eq!(
        settings.commit_message.convention,
        CommitConvention::Conventional
    );
    assert!(settings.commit_message.excluded_repositories.is_empty());
    assert_eq!(settings.tsc_meeting.time_utc, "21:00");
}

#[test]
fn test_excluded_repositories_ignore_case() {
    let settings = CommitMessageSettings {
        convention: CommitConvention::Legacy,
        excluded_repositories: vec!["Octo-Org/Widgets".to_string()],
        guidelines_url: None,
    };

    assert!(settings.is_excluded("octo-org/widgets"));
    assert!(!settings.is_excluded("octo-org/gadgets"));
}

#[test]
fn test_team_parts() {
    let mut tsc = TscMeetingSettings {
        team: "octo-org/tsc".to_string(),
        ..TscMeetingSettings::default()
    };
    assert_eq!(tsc.team_parts(), Some(("octo-org", "tsc")));

    tsc.team = "octo-org".to_string();
    assert_eq!(tsc.team_parts(), None);

    tsc.team = "/tsc".to_string();
    assert_eq!(tsc.team_parts(), None);
}
