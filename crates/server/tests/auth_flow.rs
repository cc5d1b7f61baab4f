use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::Service;
use uuid::Uuid;

use service::auth::repo::file::FileAuthRepository;
use service::auth::service::{AuthConfig, AuthService};
use service::profile::ProfileStore;
use service::stats::{github::GithubClient, leetcode::LeetcodeClient, medium::MediumClient};

use server::routes::{self, auth};

fn cors() -> tower_http::cors::CorsLayer {
    tower_http::cors::CorsLayer::very_permissive()
}

async fn build_app() -> anyhow::Result<Router> {
    let temp_id = Uuid::new_v4();
    let users_path = std::env::temp_dir().join(format!("devlink_users_{temp_id}.json"));
    let profiles_path = std::env::temp_dir().join(format!("devlink_profiles_{temp_id}.json"));

    let repo = FileAuthRepository::new(users_path).await?;
    let auth_svc = Arc::new(AuthService::new(
        repo,
        AuthConfig { jwt_secret: Some("test-secret".into()), ..AuthConfig::default() },
    ));
    let profiles = ProfileStore::new(profiles_path).await?;

    let state = auth::ServerState {
        auth: auth_svc,
        profiles,
        github: GithubClient::new(None, 1)?,
        leetcode: LeetcodeClient::new("http://127.0.0.1:9", "http://127.0.0.1:9", 1)?,
        medium: MediumClient::new(1)?,
    };
    Ok(routes::build_router(cors(), state))
}

async fn body_json(resp: axum::response::Response) -> anyhow::Result<serde_json::Value> {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_register_and_login_flow() -> anyhow::Result<()> {
    let mut app = build_app().await?;

    let email = format!("user_{}@example.com", Uuid::new_v4());
    let password = "S3curePass!";

    let resp = app
        .call(json_request(
            "POST",
            "/api/auth/register",
            json!({"name": "Tester", "email": email, "password": password}),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await?;
    assert_eq!(body["success"], true);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    let resp = app
        .call(json_request(
            "POST",
            "/api/auth/login",
            json!({"email": email, "password": password}),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    // Must set the auth cookie
    let cookie = resp.headers().get("set-cookie").and_then(|v| v.to_str().ok());
    assert!(cookie.is_some_and(|c| c.contains("auth_token=")));

    let body = body_json(resp).await?;
    let token = body["token"].as_str().unwrap().to_string();

    // Bearer token resolves the user
    let req = Request::builder()
        .method("GET")
        .uri("/api/auth/me")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["email"], email.as_str());

    Ok(())
}

#[tokio::test]
async fn test_login_wrong_password() -> anyhow::Result<()> {
    let mut app = build_app().await?;
    let email = format!("user_{}@example.com", Uuid::new_v4());

    let resp = app
        .call(json_request(
            "POST",
            "/api/auth/register",
            json!({"name": "Tester", "email": email, "password": "StrongPass123"}),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .call(json_request(
            "POST",
            "/api/auth/login",
            json!({"email": email, "password": "wrong-password"}),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await?;
    assert_eq!(body["success"], false);
    Ok(())
}

#[tokio::test]
async fn test_register_short_password_rejected() -> anyhow::Result<()> {
    let mut app = build_app().await?;
    let resp = app
        .call(json_request(
            "POST",
            "/api/auth/register",
            json!({"name": "A", "email": "a@b.com", "password": "short"}),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() -> anyhow::Result<()> {
    let mut app = build_app().await?;
    let email = format!("dup_{}@example.com", Uuid::new_v4());
    let payload = json!({"name": "Dup", "email": email, "password": "StrongPass123"});

    let resp = app.call(json_request("POST", "/api/auth/register", payload.clone())).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.call(json_request("POST", "/api/auth/register", payload)).await?;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn test_protected_route_requires_token() -> anyhow::Result<()> {
    let mut app = build_app().await?;

    let req = Request::builder().method("GET").uri("/api/auth/me").body(Body::empty())?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await?;
    assert_eq!(body["error"], "Not authorized to access this route");

    // Garbage bearer token is rejected too
    let req = Request::builder()
        .method("GET")
        .uri("/api/profiles")
        .header("authorization", "Bearer not-a-jwt")
        .body(Body::empty())?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_logout_clears_cookie_for_whole_site() -> anyhow::Result<()> {
    let mut app = build_app().await?;
    let email = format!("out_{}@example.com", Uuid::new_v4());

    let resp = app
        .call(json_request(
            "POST",
            "/api/auth/register",
            json!({"name": "Out", "email": email, "password": "StrongPass123"}),
        ))
        .await?;
    let token = body_json(resp).await?["token"].as_str().unwrap().to_string();

    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/logout")
        .header("cookie", format!("auth_token={token}"))
        .body(Body::empty())?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // The removal cookie must match the login cookie's Path=/ to take effect
    let set_cookie = resp
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .expect("removal cookie present");
    assert!(set_cookie.starts_with("auth_token="));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age=0"));
    Ok(())
}

#[tokio::test]
async fn test_cookie_token_accepted() -> anyhow::Result<()> {
    let mut app = build_app().await?;
    let email = format!("cookie_{}@example.com", Uuid::new_v4());

    let resp = app
        .call(json_request(
            "POST",
            "/api/auth/register",
            json!({"name": "Cookie", "email": email, "password": "StrongPass123"}),
        ))
        .await?;
    let token = body_json(resp).await?["token"].as_str().unwrap().to_string();

    let req = Request::builder()
        .method("GET")
        .uri("/api/auth/me")
        .header("cookie", format!("auth_token={token}"))
        .body(Body::empty())?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}
