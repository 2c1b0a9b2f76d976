//! HTTP surface: handlers called directly, and the router served on a
//! loopback listener.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::net::SocketAddr;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use turnstile_gate::app_state::AppState;
use turnstile_gate::config;
use turnstile_gate::http::handlers::{self, CanReq, IsAReq};
use turnstile_gate::router;

const CFG: &str = r#"
version: 1
policies:
  - key: register
    policy: allow_all
  - key: edit_post
    policy: owns_resource
roles: [admin, editor]
subjects:
  - id: "1"
    roles: [editor]
"#;

fn state() -> AppState {
    AppState::new(config::load_from_str(CFG).unwrap()).unwrap()
}

fn can_req(subject: &str, policy: &str, data: Value) -> Json<CanReq> {
    Json(CanReq {
        subject: subject.into(),
        policy: policy.into(),
        data: data.as_object().cloned().unwrap_or_default(),
    })
}

fn is_a_req(role: &str) -> Json<IsAReq> {
    Json(IsAReq {
        subject: "1".into(),
        role: role.into(),
    })
}

/// Serve the full router on an ephemeral port.
async fn serve() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router::build_router(state());
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    addr
}

struct Reply {
    status: u16,
    content_type: String,
    body: String,
}

/// Minimal HTTP/1.1 exchange; the server closes after one response.
async fn send(addr: SocketAddr, method: &str, path: &str, body: &str) -> Reply {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let req = format!(
        "{method} {path} HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\n\
         Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(req.as_bytes()).await.unwrap();

    let mut raw = String::new();
    stream.read_to_string(&mut raw).await.unwrap();
    let (head, body) = raw.split_once("\r\n\r\n").unwrap();

    let status = head.split_whitespace().nth(1).unwrap().parse().unwrap();
    let content_type = head
        .lines()
        .find_map(|l| {
            let l = l.to_ascii_lowercase();
            l.strip_prefix("content-type:").map(|v| v.trim().to_string())
        })
        .unwrap_or_default();

    Reply {
        status,
        content_type,
        body: body.to_string(),
    }
}

fn json_body(reply: &Reply) -> Value {
    assert!(
        reply.content_type.starts_with("application/json"),
        "content-type={}",
        reply.content_type
    );
    serde_json::from_str(&reply.body).unwrap()
}

#[tokio::test]
async fn can_allows() {
    let Json(d) = handlers::can(State(state()), Ok(can_req("1", "register", json!({}))))
        .await
        .unwrap();
    assert!(d.allowed);
    assert!(d.reason.is_none());
}

#[tokio::test]
async fn can_denies_with_reason() {
    let req = can_req("1", "edit_post", json!({ "user_id": 9 }));
    let Json(d) = handlers::can(State(state()), Ok(req)).await.unwrap();
    assert!(!d.allowed);
    assert_eq!(d.reason.unwrap().as_str(), Some("not_owner"));
}

#[tokio::test]
async fn unknown_policy_is_404() {
    let req = can_req("1", "nonexistent_key", json!({}));
    let err = handlers::can(State(state()), Ok(req)).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    assert_eq!(err.0.client_code().as_str(), "POLICY_NOT_FOUND");
}

#[tokio::test]
async fn unknown_subject_is_404() {
    let req = can_req("42", "register", json!({}));
    let err = handlers::can(State(state()), Ok(req)).await.unwrap_err();
    assert_eq!(err.0.client_code().as_str(), "SUBJECT_NOT_FOUND");
}

#[tokio::test]
async fn is_a_checks_roles() {
    let Json(d) = handlers::is_a(State(state()), Ok(is_a_req("editor"))).await.unwrap();
    assert!(d.allowed);

    let Json(d) = handlers::is_a(State(state()), Ok(is_a_req("admin"))).await.unwrap();
    assert!(!d.allowed);

    let err = handlers::is_a(State(state()), Ok(is_a_req("wizard"))).await.unwrap_err();
    assert_eq!(err.0.client_code().as_str(), "ROLE_NOT_FOUND");
}

#[tokio::test]
async fn router_serves_healthz() {
    let addr = serve().await;
    let reply = send(addr, "GET", "/healthz", "").await;
    assert_eq!(reply.status, 200);
    assert_eq!(reply.body, "ok");
}

#[tokio::test]
async fn router_answers_can_and_is_a() {
    let addr = serve().await;

    let reply = send(addr, "POST", "/v1/can", r#"{"subject":"1","policy":"register"}"#).await;
    assert_eq!(reply.status, 200);
    assert_eq!(json_body(&reply), json!({ "allowed": true }));

    let body = r#"{"subject":"1","policy":"edit_post","data":{"user_id":2}}"#;
    let reply = send(addr, "POST", "/v1/can", body).await;
    assert_eq!(reply.status, 200);
    assert_eq!(json_body(&reply), json!({ "allowed": false, "reason": "not_owner" }));

    let reply = send(addr, "POST", "/v1/is-a", r#"{"subject":"1","role":"editor"}"#).await;
    assert_eq!(reply.status, 200);
    assert_eq!(json_body(&reply)["allowed"], true);
}

#[tokio::test]
async fn router_reports_errors_as_json() {
    let addr = serve().await;

    let reply = send(addr, "POST", "/v1/can", r#"{"subject":"1","policy":"nope"}"#).await;
    assert_eq!(reply.status, 404);
    assert_eq!(json_body(&reply)["code"], "POLICY_NOT_FOUND");

    let reply = send(addr, "POST", "/v1/is-a", r#"{"subject":"1","role":"wizard"}"#).await;
    assert_eq!(reply.status, 404);
    assert_eq!(json_body(&reply)["code"], "ROLE_NOT_FOUND");
}

#[tokio::test]
async fn malformed_bodies_are_json_bad_request() {
    let addr = serve().await;

    let bodies = [
        r#"{"subject":"1","polcy":"register"}"#,
        r#"{"subject":"1","policy":"register","data":[1]}"#,
        r#"{"subject":"1""#,
    ];
    for body in bodies {
        let reply = send(addr, "POST", "/v1/can", body).await;
        assert_eq!(reply.status, 400, "body={body}");
        let v = json_body(&reply);
        assert_eq!(v["code"], "BAD_REQUEST", "body={body}");
        assert!(v["message"].as_str().is_some_and(|m| !m.is_empty()));
    }

    let reply = send(addr, "POST", "/v1/is-a", r#"{"subject":"1"}"#).await;
    assert_eq!(reply.status, 400);
    assert_eq!(json_body(&reply)["code"], "BAD_REQUEST");
}

#[test]
fn state_exposes_config_and_directory() {
    let s = state();
    assert_eq!(s.cfg().policies.len(), 2);
    let roles: Vec<&str> = s.directory().roles().iter().map(|r| r.name()).collect();
    assert_eq!(roles, vec!["admin", "editor"]);
}
