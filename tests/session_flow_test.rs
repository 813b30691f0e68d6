//! End-to-end tests for registration, login, logout and account deletion
//! against a mock API.

mod common;

use common::*;
use peerlink::actions::Registration;
use peerlink::error::PeerlinkError;
use peerlink::gate::View;
use peerlink::notifications::{Notification, Severity};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_register_short_username_never_reaches_server() {
    let harness = TestHarness::start().await;

    let result = harness
        .actions
        .register(Registration {
            username: "ab",
            email: "x@y.com",
            password: "Aa1!aaaa",
            bio: None,
        })
        .await;

    assert!(matches!(result, Err(PeerlinkError::Validation(_))));
    assert!(harness.requests().await.is_empty());
    assert_eq!(
        harness.toasts.drain(),
        vec![Notification::new(
            "Username must be 3-20 characters long and can only contain letters, numbers, and underscores.",
            Severity::Error
        )]
    );
}

#[tokio::test]
async fn test_invalid_inputs_issue_no_requests() {
    let harness = TestHarness::start().await;
    let cases = [
        ("a".repeat(21), "x@y.com", "Aa1!aaaa"),
        ("bad-name".to_string(), "x@y.com", "Aa1!aaaa"),
        ("alice".to_string(), "not-an-email", "Aa1!aaaa"),
        ("alice".to_string(), "x@y.com", "alllowercase1!"),
        ("alice".to_string(), "x@y.com", "NoDigits!!"),
    ];

    for (username, email, password) in &cases {
        let result = harness
            .actions
            .register(Registration {
                username,
                email,
                password,
                bio: None,
            })
            .await;
        assert!(result.is_err());
        assert_eq!(harness.toasts.drain().len(), 1, "{} {} {}", username, email, password);
    }
    assert!(harness.requests().await.is_empty());
}

#[tokio::test]
async fn test_register_sends_exactly_the_form() {
    let harness = TestHarness::start().await;
    Mock::given(method("POST"))
        .and(path("/api/register"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "Aa1!aaaa"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "User registered successfully",
            "username": "alice",
            "email": "alice@example.com",
            "bio": null,
            "date_joined": "2024-01-05 09:00:00.000000",
            "access_token": "jwt-alice"
        })))
        .expect(1)
        .mount(&harness.server)
        .await;

    let nav = harness
        .actions
        .register(Registration {
            username: "alice",
            email: "alice@example.com",
            password: "Aa1!aaaa",
            bio: None,
        })
        .await
        .unwrap();

    assert_eq!(nav.to, View::Profile);
    assert!(harness.state.session.is_logged_in());
    let identity = harness.state.identity.snapshot();
    assert_eq!(identity.username, "alice");
    assert_eq!(identity.access_token(), Some("jwt-alice"));
    assert_eq!(identity.joined_display(), "1/5/24, 9:00:00 AM");
    assert_eq!(harness.toast_messages(), vec!["Registered successfully!"]);
}

#[tokio::test]
async fn test_login_success_sets_session_once() {
    let harness = TestHarness::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({"username": "alice", "password": "Aa1!aaaa"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body("alice")))
        .expect(1)
        .mount(&harness.server)
        .await;

    let mut session_rx = harness.state.session.subscribe();
    let nav = harness.actions.login("alice", "Aa1!aaaa").await.unwrap();

    assert_eq!(nav.path(), "/dashboard");
    assert!(session_rx.has_changed().unwrap());
    assert!(*session_rx.borrow_and_update());

    let identity = harness.state.identity.snapshot();
    assert_eq!(identity.user_id, "42");
    assert_eq!(identity.email, "alice@example.com");
    assert_eq!(identity.access_token(), Some("jwt-alice"));
    assert!(identity.followers.is_none());

    let requests = harness.requests().await;
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_login_failures_leave_state_untouched() {
    for status in [400u16, 401, 403, 404, 500, 502] {
        let harness = TestHarness::start().await;
        mount_json(&harness.server, "POST", "/api/login", status, json!({"message": "no"})).await;

        let err = harness.actions.login("alice", "wrong").await.unwrap_err();

        assert_eq!(err.status(), Some(status));
        assert!(!harness.state.session.is_logged_in());
        assert!(harness.state.identity.snapshot().is_empty());
        assert_eq!(harness.toast_messages(), vec!["Error logging in"]);
    }
}

#[tokio::test]
async fn test_login_non_json_error_body() {
    let harness = TestHarness::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<h1>Internal Server Error</h1>"))
        .mount(&harness.server)
        .await;

    assert!(harness.actions.login("alice", "pw").await.is_err());
    assert_eq!(harness.toast_messages(), vec!["Error logging in"]);
}

#[tokio::test]
async fn test_unreachable_server_reports_connection_error() {
    let (state, toasts) = peerlink::state::AppState::with_toast_queue();
    let actions = peerlink::actions::Actions::new(unreachable_gateway(), state.clone());

    let result = actions.login("alice", "pw").await;

    assert!(matches!(result, Err(PeerlinkError::Network(_))));
    assert!(!state.session.is_logged_in());
    assert_eq!(toasts.drain(), vec![Notification::error("Error connecting to db")]);
}

#[tokio::test]
async fn test_delete_account_resets_everything() {
    let harness = TestHarness::start().await;
    harness.sign_in(identity("alice"));
    Mock::given(method("DELETE"))
        .and(path("/api/users/alice"))
        .and(header("Authorization", "Bearer token-alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "User deleted"})))
        .expect(1)
        .mount(&harness.server)
        .await;

    let nav = harness.actions.delete_account().await.unwrap();

    assert_eq!(nav.to, View::Home);
    assert!(!harness.state.session.is_logged_in());
    assert!(harness.state.identity.snapshot().is_empty());
    assert_eq!(harness.toast_messages(), vec!["User deleted successfully"]);
}

#[tokio::test]
async fn test_logout_resets_regardless_of_prior_state() {
    let harness = TestHarness::start().await;

    harness.actions.logout();
    assert!(!harness.state.session.is_logged_in());
    assert!(harness.state.identity.snapshot().is_empty());

    harness.sign_in(identity("alice"));
    harness.actions.logout();
    assert!(!harness.state.session.is_logged_in());
    assert!(harness.state.identity.snapshot().is_empty());
    assert!(harness.requests().await.is_empty());
}

#[tokio::test]
async fn test_rejected_mutation_keeps_identity() {
    let harness = TestHarness::start().await;
    harness.sign_in(identity("alice"));
    mount_json(&harness.server, "PUT", "/api/users/alice/bio", 403, json!({"message": "nope"})).await;

    let before = harness.state.identity.snapshot();
    assert!(harness.actions.change_bio("new bio").await.is_err());

    assert_eq!(harness.state.identity.snapshot(), before);
    assert!(harness.state.session.is_logged_in());
    assert_eq!(harness.toast_messages(), vec!["Unauthorized. Please log in again."]);
}

#[tokio::test]
async fn test_username_change_uses_new_token_afterwards() {
    let harness = TestHarness::start().await;
    harness.sign_in(identity("alice"));
    Mock::given(method("PUT"))
        .and(path("/api/users/alice/username"))
        .and(header("Authorization", "Bearer token-alice"))
        .and(body_json(json!({"newUsername": "alicia"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Username updated successfully",
            "username": "alicia",
            "access_token": "token-alicia"
        })))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/users/alicia/bio"))
        .and(header("Authorization", "Bearer token-alicia"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&harness.server)
        .await;

    harness.actions.change_username("alicia").await.unwrap();
    harness.actions.change_bio("renamed").await.unwrap();

    let identity = harness.state.identity.snapshot();
    assert_eq!(identity.username, "alicia");
    assert_eq!(identity.bio.as_deref(), Some("renamed"));
}
