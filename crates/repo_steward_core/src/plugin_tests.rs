use super::*;
use serde_json::json;

struct NoopPlugin;

#[async_trait]
impl Plugin for NoopPlugin {
    fn name(&self) -> &'static str {
        "noop"
    }

    async fn handle(&self, _ctx: &EventContext<'_>) -> StewardResult<()> {
        Ok(())
    }
}

fn event(name: EventName, action: &str) -> Event {
    Event::new(name, "delivery", json!({ "action": action }))
}

#[test]
fn test_pattern_matches_name_and_action() {
    let pattern = EventPattern::new(EventName::Issues, "opened");

    assert!(pattern.matches(&event(EventName::Issues, "opened")));
    assert!(!pattern.matches(&event(EventName::Issues, "closed")));
    assert!(!pattern.matches(&event(EventName::PullRequest, "opened")));
}

#[test]
fn test_pattern_without_action_matches_every_action() {
    let pattern = EventPattern::any(EventName::Status);

    assert!(pattern.matches(&Event::new(EventName::Status, "d", json!({}))));
    assert!(pattern.matches(&event(EventName::Status, "anything")));
}

#[test]
fn test_pattern_with_action_requires_action() {
    let pattern = EventPattern::new(EventName::Issues, "opened");

    assert!(!pattern.matches(&Event::new(EventName::Issues, "d", json!({}))));
}

#[test]
fn test_registration_matches_any_pattern() {
    let registration = Registration::new(
        EventPattern::actions(EventName::Issues, &["opened", "reopened"]),
        Arc::new(NoopPlugin),
    );

    assert!(registration.matches(&event(EventName::Issues, "reopened")));
    assert!(!registration.matches(&event(EventName::Issues, "edited")));
    assert!(format!("{registration:?}").contains("noop"));
}
