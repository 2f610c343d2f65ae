//! Tests for fetching, editing, committing and regenerating week schedules.

use std::sync::Arc;

use serde_json::json;
use tandem_test::component::client::{ClientError, SchedulingApi};
use tandem_test::component::core::types::AgentName;
use tandem_test::component::service::error::ServiceError;
use tandem_test::component::service::pairing::{DragSource, DropOutcome, Side, SlotRef};
use tandem_test::component::service::session::{LoadState, ScheduleSession};

use super::helpers::*;

fn name(raw: &str) -> AgentName {
    AgentName::new(raw).expect("non-empty name")
}

fn seed_week(stub: &StubService) {
    stub.state.seed_schedule(
        date(2025, 6, 16),
        json!({
            "details": [
                {"agent1_name": "A", "agent2_name": "B"},
                {"agent1_name": "C", "agent2_name": ""}
            ],
            "unpaired": [{"agent_name": "D"}]
        }),
    );
}

/// ## Summary
/// Test that a fetched week shows blank sides as empty and keeps slot order.
#[test_log::test(tokio::test)]
async fn fetch_builds_draft() {
    let stub = StubService::start().await;
    seed_week(&stub);
    let api = Arc::new(stub.logged_in_client().await);
    let mut session = ScheduleSession::new(api, date(2025, 6, 19));

    session.refresh().await.expect("fetch succeeds");
    assert_eq!(session.load_state(), &LoadState::Loaded);

    let draft = session.schedule();
    assert_eq!(draft.slots().len(), 2);
    assert_eq!(draft.slots()[1].agent2, None);
    assert_eq!(draft.unpaired(), &[name("D")]);
    assert!(
        stub.state
            .requests()
            .contains(&"GET /api/schedule/get".to_string())
    );
}

/// ## Summary
/// Test that a committed draft reaches the service in wire form and is re-fetched.
#[test_log::test(tokio::test)]
async fn commit_sends_draft_and_refetches() {
    let stub = StubService::start().await;
    seed_week(&stub);
    let api = Arc::new(stub.logged_in_client().await);
    let mut session = ScheduleSession::new(api, date(2025, 6, 16));
    session.refresh().await.expect("fetch succeeds");
    session.begin_edit().expect("loaded");

    let editor = session.editor_mut();
    editor
        .begin_drag(name("D"), DragSource::Unpaired)
        .expect("D is unpaired");
    assert_eq!(
        editor
            .drop_on_slot(SlotRef::new(0, Side::First))
            .expect("valid drop"),
        DropOutcome::Evicted { evicted: name("A") }
    );
    editor
        .begin_drag(name("C"), DragSource::Slot(SlotRef::new(1, Side::First)))
        .expect("C is at slot 1");
    editor.drop_on_unpaired().expect("valid drop");
    editor.append_empty_slot().expect("editing");

    session.commit().await.expect("commit succeeds");
    assert!(!session.editor().is_editing());

    let saved = stub.state.lock().saved.clone();
    assert_eq!(saved.len(), 1);
    assert_eq!(
        saved[0],
        json!({
            "date": "2025-06-16",
            "details": [
                {"agent1_name": "D", "agent2_name": "B"},
                {"agent1_name": "", "agent2_name": ""},
                {"agent1_name": "", "agent2_name": ""}
            ],
            "unpaired": [{"agent_name": "A"}, {"agent_name": "C"}]
        })
    );

    let requests = stub.state.requests();
    assert_eq!(
        requests.last().map(String::as_str),
        Some("GET /api/schedule/get")
    );
    assert_eq!(session.schedule().slots().len(), 3);
}

/// ## Summary
/// Test that a refused commit leaves the draft open for a retry.
#[test_log::test(tokio::test)]
async fn failed_commit_stays_editing() {
    let stub = StubService::start().await;
    seed_week(&stub);
    let api = Arc::new(stub.logged_in_client().await);
    let mut session = ScheduleSession::new(api, date(2025, 6, 16));
    session.refresh().await.expect("fetch succeeds");
    session.begin_edit().expect("loaded");
    session.editor_mut().append_empty_slot().expect("editing");

    stub.state.lock().fail_with = Some(503);
    let result = session.commit().await;
    assert!(matches!(
        result,
        Err(ServiceError::ClientError(ClientError::Status { status: 503, .. }))
    ));
    assert!(session.editor().is_editing());
    assert_eq!(session.schedule().slots().len(), 3);

    stub.state.lock().fail_with = None;
    session.commit().await.expect("retry succeeds");
    assert!(!session.editor().is_editing());
}

/// ## Summary
/// Test that regeneration is requested for the selected week and then reloaded.
#[test_log::test(tokio::test)]
async fn regenerate_refetches_week() {
    let stub = StubService::start().await;
    stub.state.seed_agent("Ada", "Lovelace", true);
    stub.state.seed_agent("Bob", "Byron", true);
    stub.state.seed_agent("Cy", "Young", true);
    stub.state.seed_agent("Dee", "Retired", false);
    let api = Arc::new(stub.logged_in_client().await);
    let mut session = ScheduleSession::new(api, date(2025, 6, 18));

    session.regenerate().await.expect("regenerate succeeds");
    assert_eq!(stub.state.lock().generated, vec!["2025-06-16".to_string()]);

    let draft = session.schedule();
    assert_eq!(draft.slots().len(), 1);
    assert_eq!(draft.slots()[0].agent1, Some(name("Ada Lovelace")));
    assert_eq!(draft.slots()[0].agent2, Some(name("Bob Byron")));
    assert_eq!(draft.unpaired(), &[name("Cy Young")]);
}

/// ## Summary
/// Test that a failed regeneration is reported and not retried.
#[test_log::test(tokio::test)]
async fn failed_regenerate_is_reported_once() {
    let stub = StubService::start().await;
    let api = Arc::new(stub.logged_in_client().await);
    let mut session = ScheduleSession::new(api, date(2025, 6, 18));

    stub.state.lock().fail_with = Some(500);
    assert!(session.regenerate().await.is_err());

    let generate_calls = stub
        .state
        .requests()
        .iter()
        .filter(|request| request.as_str() == "POST /api/schedule/generate")
        .count();
    assert_eq!(generate_calls, 1);
}

/// ## Summary
/// Test that a week without a stored schedule loads as empty.
#[test_log::test(tokio::test)]
async fn unknown_week_is_empty() {
    let stub = StubService::start().await;
    let client = stub.logged_in_client().await;
    let schedule = client
        .fetch_schedule(date(2030, 1, 7))
        .await
        .expect("fetch succeeds");
    assert!(schedule.details.is_empty());
    assert_eq!(schedule.echoed_week(), Some(date(2030, 1, 7)));
}
