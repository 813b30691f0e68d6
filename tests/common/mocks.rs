//! Canned API responses and wiremock helpers.

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mount a JSON response for `verb` + `route`.
#[allow(dead_code)]
pub async fn mount_json(server: &MockServer, verb: &str, route: &str, status: u16, body: Value) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Body of a successful login for `username`.
#[allow(dead_code)]
pub fn login_body(username: &str) -> Value {
    json!({
        "message": "Login successful",
        "user_id": 42,
        "username": username,
        "email": format!("{}@example.com", username),
        "bio": null,
        "date_joined": "Fri, 05 Jan 2024 09:00:00 GMT",
        "access_token": format!("jwt-{}", username)
    })
}

/// A followers/following list body.
#[allow(dead_code)]
pub fn follow_list(key: &str, names: &[&str]) -> Value {
    let entries: Vec<Value> = names
        .iter()
        .map(|n| {
            json!({
                "username": n,
                "dateJoined": "Fri, 05 Jan 2024 09:00:00 GMT",
                "userId": 7,
                "email": format!("{}@example.com", n),
                "bio": null
            })
        })
        .collect();
    let mut body = serde_json::Map::new();
    body.insert(key.to_string(), Value::Array(entries));
    Value::Object(body)
}
