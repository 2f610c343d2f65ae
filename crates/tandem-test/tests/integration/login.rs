//! Tests for the login flow and the session cookie.

use tandem_test::component::client::{ClientError, SchedulingApi};
use tandem_test::component::service::error::ServiceError;
use tandem_test::component::service::session::{SessionState, View};

use super::helpers::*;

/// ## Summary
/// Test that a successful login sets the flag and lets later requests through.
#[test_log::test(tokio::test)]
async fn login_opens_gated_views() {
    let stub = StubService::start().await;
    let client = stub.client();
    let mut session = SessionState::new();

    assert_eq!(session.route(View::Schedule), View::Login);
    session
        .login(&client, USERNAME, PASSWORD)
        .await
        .expect("stub accepts the test credentials");

    assert!(session.is_logged_in());
    assert_eq!(session.route(View::Schedule), View::Schedule);
    client
        .list_agents(None)
        .await
        .expect("session cookie is sent");
}

/// ## Summary
/// Test that refused credentials map to `Unauthorized` and keep the session closed.
#[test_log::test(tokio::test)]
async fn wrong_password_is_unauthorized() {
    let stub = StubService::start().await;
    let client = stub.client();
    let mut session = SessionState::new();

    let result = session.login(&client, USERNAME, "hunter2").await;
    assert!(matches!(
        result,
        Err(ServiceError::ClientError(ClientError::Unauthorized))
    ));
    assert!(!session.is_logged_in());
}

/// ## Summary
/// Test that requests without a session are refused by the service.
#[test_log::test(tokio::test)]
async fn requests_without_session_are_unauthorized() {
    let stub = StubService::start().await;
    let client = stub.client();

    assert!(matches!(
        client.fetch_schedule(date(2025, 6, 16)).await,
        Err(ClientError::Unauthorized)
    ));
}

/// ## Summary
/// Test that empty credentials are rejected before any request is made.
#[test_log::test(tokio::test)]
async fn empty_credentials_stay_local() {
    let stub = StubService::start().await;
    let client = stub.client();
    let mut session = SessionState::new();

    assert!(matches!(
        session.login(&client, "  ", PASSWORD).await,
        Err(ServiceError::Validation(_))
    ));
    assert!(stub.state.requests().is_empty());
}
