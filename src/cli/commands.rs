//! Execution of parsed CLI commands.
//!
//! Each command runs against a fresh [`AppState`]; the notifications the
//! operations queue are printed after it finishes.

use std::io::Write;

use color_eyre::Result;

use super::args::{CliCommand, USAGE};
use super::version::version_line;
use crate::actions::{Actions, Registration};
use crate::gateway::Gateway;
use crate::notifications::ToastQueue;
use crate::reconcile::{GraphView, SearchView, ViewPhase};
use crate::state::AppState;
use crate::traits::HttpClient;

/// Run `command`, writing human-readable output to `out`.
///
/// Returns `Ok(false)` when the command ran but failed (bad input, server
/// rejection, network error); the details are in the printed notifications.
pub async fn execute<C: HttpClient>(
    command: CliCommand,
    gateway: Gateway<C>,
    out: &mut dyn Write,
) -> Result<bool> {
    let (state, toasts) = AppState::with_toast_queue();
    let actions = Actions::new(gateway.clone(), state.clone());

    let ok = match command {
        CliCommand::Version => {
            writeln!(out, "{}", version_line())?;
            true
        }
        CliCommand::Help => {
            writeln!(out, "{}", USAGE)?;
            true
        }
        CliCommand::Invalid(reason) => {
            writeln!(out, "error: {}\n\n{}", reason, USAGE)?;
            false
        }
        CliCommand::Register {
            username,
            email,
            password,
            bio,
        } => {
            let form = Registration {
                username: &username,
                email: &email,
                password: &password,
                bio: bio.as_deref(),
            };
            let ok = actions.register(form).await.is_ok();
            flush_toasts(&toasts, out)?;
            if ok {
                print_profile(&state, out)?;
            }
            ok
        }
        CliCommand::Login { username, password } => {
            let ok = actions.login(&username, &password).await.is_ok();
            flush_toasts(&toasts, out)?;
            if ok {
                print_profile(&state, out)?;
            }
            ok
        }
        CliCommand::Search {
            username,
            password,
            query,
        } => {
            if actions.login(&username, &password).await.is_err() {
                flush_toasts(&toasts, out)?;
                return Ok(false);
            }
            toasts.drain();

            let view = SearchView::new(gateway, state.clone());
            let phase = view.search(&query).await;
            flush_toasts(&toasts, out)?;
            let snapshot = view.snapshot();
            for hit in &snapshot.results {
                let following = if state.identity.snapshot().is_following(&hit.username) {
                    " (following)"
                } else {
                    ""
                };
                writeln!(
                    out,
                    "{}\t{}{}",
                    hit.username,
                    hit.email.as_deref().unwrap_or(""),
                    following
                )?;
            }
            phase == ViewPhase::Loaded
        }
        CliCommand::Followers { username, password } => {
            if actions.login(&username, &password).await.is_err() {
                flush_toasts(&toasts, out)?;
                return Ok(false);
            }
            toasts.drain();

            let view = GraphView::dashboard(gateway, state.clone());
            let phase = view.mount().await;
            let had_errors = !toasts.is_empty();
            flush_toasts(&toasts, out)?;

            let identity = state.identity.snapshot();
            writeln!(out, "followers: {}", identity.follower_names().join(", "))?;
            writeln!(out, "following: {}", identity.following_names().join(", "))?;
            phase == ViewPhase::Loaded && !had_errors
        }
    };
    Ok(ok)
}

fn flush_toasts(toasts: &ToastQueue, out: &mut dyn Write) -> Result<()> {
    for toast in toasts.drain() {
        writeln!(out, "[{}] {}", toast.severity, toast.message)?;
    }
    Ok(())
}

fn print_profile(state: &AppState, out: &mut dyn Write) -> Result<()> {
    let identity = state.identity.snapshot();
    writeln!(out, "username: {}", identity.username)?;
    writeln!(out, "email:    {}", identity.email)?;
    writeln!(out, "joined:   {}", identity.joined_display())?;
    if let Some(bio) = identity.bio.as_deref().filter(|b| !b.is_empty()) {
        writeln!(out, "bio:      {}", bio)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapters::{MockHttpClient, MockResponse};
    use crate::config::ClientConfig;
    use serde_json::json;

    const BASE: &str = "http://api.test/api";

    fn gateway() -> (Gateway<MockHttpClient>, Arc<MockHttpClient>) {
        let http = Arc::new(MockHttpClient::new());
        let gateway = Gateway::with_shared(
            Arc::clone(&http),
            ClientConfig::new().with_api_base_url(BASE),
        );
        (gateway, http)
    }

    fn login_ok(http: &MockHttpClient) {
        http.set_response(
            &format!("{}/login", BASE),
            MockResponse::json(
                200,
                json!({
                    "username": "alice",
                    "email": "alice@example.com",
                    "date_joined": "2024-01-05T15:04:05Z",
                    "access_token": "tok"
                }),
            ),
        );
    }

    async fn run(command: CliCommand, gateway: Gateway<MockHttpClient>) -> (bool, String) {
        let mut out = Vec::new();
        let ok = execute(command, gateway, &mut out).await.unwrap();
        (ok, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_login_prints_profile() {
        let (gateway, http) = gateway();
        login_ok(&http);

        let (ok, out) = run(
            CliCommand::Login {
                username: "alice".into(),
                password: "pw".into(),
            },
            gateway,
        )
        .await;

        assert!(ok);
        assert!(out.contains("[success] Logged in successfully!"));
        assert!(out.contains("username: alice"));
        assert!(out.contains("joined:   1/5/24, 3:04:05 PM"));
    }

    #[tokio::test]
    async fn test_register_validation_failure() {
        let (gateway, http) = gateway();
        let (ok, out) = run(
            CliCommand::Register {
                username: "ab".into(),
                email: "x@y.com".into(),
                password: "Aa1!aaaa".into(),
                bio: None,
            },
            gateway,
        )
        .await;

        assert!(!ok);
        assert_eq!(http.request_count(), 0);
        assert!(out.starts_with("[error] Username must be 3-20 characters long"));
    }

    #[tokio::test]
    async fn test_followers_reports_partial_failure() {
        let (gateway, http) = gateway();
        login_ok(&http);
        http.set_response(
            &format!("{}/users/alice/followers", BASE),
            MockResponse::json(500, json!({})),
        );
        http.set_response(
            &format!("{}/users/alice/following", BASE),
            MockResponse::json(200, json!({"following": [{"username": "bob"}]})),
        );

        let (ok, out) = run(
            CliCommand::Followers {
                username: "alice".into(),
                password: "pw".into(),
            },
            gateway,
        )
        .await;

        assert!(!ok);
        assert!(out.contains("[error] Internal Server Error: Please try again later."));
        assert!(out.contains("following: bob"));
    }

    #[tokio::test]
    async fn test_search_lists_hits() {
        let (gateway, http) = gateway();
        login_ok(&http);
        http.set_response(
            &format!("{}/users/search?q=bo", BASE),
            MockResponse::json(
                200,
                json!({"users": [{"username": "bob", "email": "bob@x.io", "bio": null}]}),
            ),
        );

        let (ok, out) = run(
            CliCommand::Search {
                username: "alice".into(),
                password: "pw".into(),
                query: "bo".into(),
            },
            gateway,
        )
        .await;

        assert!(ok);
        assert!(out.contains("bob\tbob@x.io"));
    }

    #[tokio::test]
    async fn test_invalid_prints_usage() {
        let (gateway, _http) = gateway();
        let (ok, out) = run(CliCommand::Invalid("unknown command 'x'".into()), gateway).await;
        assert!(!ok);
        assert!(out.contains("Usage: peerlink"));
    }
}
