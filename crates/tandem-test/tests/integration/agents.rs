//! Tests for the roster and the agent dialog against the HTTP backend.

use std::sync::Arc;

use serde_json::json;
use tandem_test::component::client::{ClientError, SharedApi};
use tandem_test::component::service::error::ServiceError;
use tandem_test::component::service::roster::{AgentEditor, Roster};

use super::helpers::*;

fn shared(client: tandem_test::component::client::HttpSchedulingApi) -> SharedApi {
    Arc::new(client)
}

/// ## Summary
/// Test that the search term is forwarded and matched on the full name.
#[test_log::test(tokio::test)]
async fn search_filters_roster() {
    let stub = StubService::start().await;
    stub.state.seed_agent("Ada", "Lovelace", true);
    stub.state.seed_agent("Bob", "Byron", true);
    let mut roster = Roster::new(shared(stub.logged_in_client().await));

    assert_eq!(roster.load(None).await.expect("load succeeds").len(), 2);

    let found = roster.load(Some("love")).await.expect("load succeeds");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].display_name(), "Ada Lovelace");
    assert_eq!(roster.search(), Some("love"));
    assert!(
        stub.state
            .requests()
            .iter()
            .any(|request| request == "GET /api/agents/get")
    );
}

/// ## Summary
/// Test creating an agent, then editing it through the same dialog.
#[test_log::test(tokio::test)]
async fn create_then_update_agent() {
    let stub = StubService::start().await;
    let client = stub.logged_in_client().await;

    let mut editor = AgentEditor::open_new(date(2025, 6, 18));
    editor.form.set("first_name", "Ada").expect("known field");
    editor.form.set("last_name", "Lovelace").expect("known field");
    editor.form.set("email", "ada@example.com").expect("known field");
    let agent_id = editor.submit(&client).await.expect("create succeeds");
    assert_eq!(editor.agent_id(), Some(agent_id));

    editor.form.set("active_status", "no").expect("known field");
    let again = editor.submit(&client).await.expect("update succeeds");
    assert_eq!(again, agent_id);

    let store = stub.state.lock();
    assert_eq!(store.agents.len(), 1);
    assert_eq!(store.agents[&agent_id]["active_status"], json!(false));
    assert_eq!(store.agents[&agent_id]["email"], json!("ada@example.com"));
    let update = format!("PUT /api/agents/update/{agent_id}");
    assert!(store.requests.contains(&update));
}

/// ## Summary
/// Test that an invalid form never reaches the service.
#[test_log::test(tokio::test)]
async fn invalid_form_is_not_sent() {
    let stub = StubService::start().await;
    let client = stub.logged_in_client().await;
    let before = stub.state.requests().len();

    let mut editor = AgentEditor::open_new(date(2025, 6, 18));
    editor.form.set("first_name", "Ada").expect("known field");
    editor.form.set("email", "not-an-address").expect("known field");

    let err = editor.submit(&client).await.expect_err("form is invalid");
    let ServiceError::Validation(errors) = err else {
        panic!("expected validation errors, got {err:?}");
    };
    assert!(errors.get("last_name").is_some());
    assert!(errors.get("email").is_some());
    assert_eq!(stub.state.requests().len(), before);
}

/// ## Summary
/// Test that deleting reloads the roster and that unknown ids are reported.
#[test_log::test(tokio::test)]
async fn delete_agent_and_unknown_id() {
    let stub = StubService::start().await;
    let ada = stub.state.seed_agent("Ada", "Lovelace", true);
    stub.state.seed_agent("Bob", "Byron", true);
    let mut roster = Roster::new(shared(stub.logged_in_client().await));
    roster.load(None).await.expect("load succeeds");

    roster.delete(ada).await.expect("delete succeeds");
    assert_eq!(roster.agents().len(), 1);
    assert!(roster.find(ada).is_none());

    let err = roster.delete(ada).await.expect_err("agent is gone");
    assert!(matches!(
        err,
        ServiceError::ClientError(ClientError::NotFound(_))
    ));
}

/// ## Summary
/// Test that a failing service keeps the last good list.
#[test_log::test(tokio::test)]
async fn failed_reload_keeps_previous_list() {
    let stub = StubService::start().await;
    stub.state.seed_agent("Ada", "Lovelace", true);
    let mut roster = Roster::new(shared(stub.logged_in_client().await));
    roster.load(None).await.expect("load succeeds");

    stub.state.lock().fail_with = Some(503);
    let err = roster.reload().await.expect_err("service is down");
    assert!(matches!(
        err,
        ServiceError::ClientError(ClientError::Status { status: 503, .. })
    ));
    assert_eq!(roster.agents().len(), 1);
}
