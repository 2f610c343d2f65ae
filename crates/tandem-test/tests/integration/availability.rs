//! Tests for availability round trips through the agent dialog.

use chrono::Weekday;
use serde_json::json;
use tandem_test::component::client::SchedulingApi;
use tandem_test::component::core::types::MonthKey;
use tandem_test::component::service::roster::AgentEditor;

use super::helpers::*;

/// ## Summary
/// Test that a new agent's availability is saved with zero-based month keys
/// and ordered lists.
#[test_log::test(tokio::test)]
async fn new_agent_availability_wire_form() {
    let stub = StubService::start().await;
    let client = stub.logged_in_client().await;

    let mut editor = AgentEditor::open_new(date(2025, 6, 18));
    editor.form.first_name = "Ada".to_string();
    editor.form.last_name = "Lovelace".to_string();
    editor.form.email = "ada@example.com".to_string();
    // Saturday becomes available, Monday the 23rd does not
    assert!(editor.click_day(21));
    assert!(editor.click_day(23));
    // Sunday joins the weekly pattern
    assert!(editor.click_header(0));

    let agent_id = editor.submit(&client).await.expect("submit succeeds");

    let stored = stub
        .state
        .lock()
        .availability
        .get(&agent_id)
        .cloned()
        .expect("availability stored");
    assert_eq!(
        stored,
        json!({
            "weeklyAvailability": {"weekdays": [0, 1, 2, 3, 4, 5]},
            "specificDates": {"2025-5": [21, 23]}
        })
    );
}

/// ## Summary
/// Test that stored availability in legacy or partly malformed shape still
/// opens, dropping only the unusable parts.
#[test_log::test(tokio::test)]
async fn lenient_hydration_of_existing_agent() {
    let stub = StubService::start().await;
    let agent_id = stub.state.seed_agent("Bob", "Byron", true);
    stub.state.seed_availability(
        agent_id,
        json!({
            "weeklyAvailability": ["1", 3, 9, "x"],
            "specificDates": {
                "2025-5": [21, 40],
                "2025-12": [1],
                "junk": [2],
                "2025-1": []
            }
        }),
    );
    let client = stub.logged_in_client().await;
    let agents = client.list_agents(None).await.expect("list succeeds");

    let editor = AgentEditor::open_existing(&client, &agents[0], date(2025, 6, 18)).await;
    assert_eq!(editor.load_error(), None);

    let snapshot = editor.availability.snapshot();
    let weekdays: Vec<Weekday> = snapshot.weekdays.iter().collect();
    assert_eq!(weekdays, vec![Weekday::Mon, Weekday::Wed]);

    let june = MonthKey::new(2025, 6).expect("valid month");
    assert!(snapshot.exceptions.contains(june, 21));
    assert!(!snapshot.exceptions.contains(june, 40));
    assert_eq!(snapshot.exceptions.month_count(), 1);

    // Saturday the 21st: not in the pattern, flipped by the exception
    assert!(editor.availability.resolve(date(2025, 6, 21)));
    // Wednesday the 18th: in the pattern
    assert!(editor.availability.resolve(date(2025, 6, 18)));
}

/// ## Summary
/// Test that a failed availability fetch still opens the dialog, empty.
#[test_log::test(tokio::test)]
async fn unavailable_availability_opens_empty() {
    let stub = StubService::start().await;
    stub.state.seed_agent("Cy", "Young", true);
    let client = stub.logged_in_client().await;
    let agents = client.list_agents(None).await.expect("list succeeds");

    stub.state.lock().fail_with = Some(502);
    let editor = AgentEditor::open_existing(&client, &agents[0], date(2025, 6, 18)).await;
    assert!(editor.load_error().is_some());
    assert!(editor.availability.snapshot().weekdays.is_empty());
    assert!(editor.availability.snapshot().exceptions.is_empty());
}
