use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use tracing::warn;

use common::types::Envelope;
use service::auth::domain::{AuthUser, LoginInput, RegisterInput};
use service::auth::repo::file::FileAuthRepository;
use service::auth::service::AuthService;
use service::profile::ProfileStore;
use service::stats::{github::GithubClient, leetcode::LeetcodeClient, medium::MediumClient};

use crate::errors::JsonApiError;

/// Shared application state for all routes.
#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService<FileAuthRepository>>,
    pub profiles: Arc<ProfileStore>,
    pub github: GithubClient,
    pub leetcode: LeetcodeClient,
    pub medium: MediumClient,
}

#[derive(Serialize)]
pub struct TokenOutput {
    pub success: bool,
    pub token: String,
}

#[utoipa::path(post, path = "/api/auth/register", tag = "auth", request_body = crate::openapi::RegisterRequest, responses((status = 200, description = "Registered"), (status = 400, description = "Bad Request"), (status = 409, description = "User already exists")))]
pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<RegisterInput>,
) -> Result<Json<TokenOutput>, JsonApiError> {
    let user = state.auth.register(input).await?;
    let token = state
        .auth
        .issue_token(&user)?
        .ok_or_else(|| JsonApiError::internal("token generation failed"))?;
    Ok(Json(TokenOutput { success: true, token }))
}

#[utoipa::path(post, path = "/api/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged In"), (status = 401, description = "Invalid credentials")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<TokenOutput>), JsonApiError> {
    let session = state.auth.login(input).await?;
    let token = session
        .token
        .ok_or_else(|| JsonApiError::internal("token generation failed"))?;

    let mut cookie = Cookie::new("auth_token", token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    let jar = jar.add(cookie);

    Ok((jar, Json(TokenOutput { success: true, token })))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    // The removal cookie must carry the same path the login cookie was set
    // with, or browsers keep the stored cookie.
    let jar = jar.remove(Cookie::build(("auth_token", "")).path("/"));
    (jar, StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/auth/me", tag = "auth", responses((status = 200, description = "Current user"), (status = 401, description = "Unauthorized")))]
pub async fn me(Extension(user): Extension<AuthUser>) -> Json<Envelope<AuthUser>> {
    Json(Envelope::ok(user))
}

/// Middleware for protected routes: accept `Authorization: Bearer <token>`
/// with a fallback to the `auth_token` cookie, then resolve the user.
pub async fn require_user(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_string();

    let token = bearer_token(&req).or_else(|| cookie_token(&req));
    let token = match token {
        Some(t) if !t.is_empty() => t,
        _ => {
            warn!(path = %path, "missing Authorization header and auth_token cookie");
            return Err(JsonApiError::new(
                StatusCode::UNAUTHORIZED,
                "Not authorized to access this route",
            ));
        }
    };

    match state.auth.authenticate(&token).await {
        Ok(user) => {
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            warn!(path = %path, code = e.code(), error = %e, "token validation failed");
            Err(JsonApiError::new(
                StatusCode::UNAUTHORIZED,
                "Not authorized to access this route",
            ))
        }
    }
}

fn bearer_token(req: &Request) -> Option<String> {
    let value = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    value.strip_prefix("Bearer ").map(|t| t.to_string())
}

fn cookie_token(req: &Request) -> Option<String> {
    let header = req
        .headers()
        .get(axum::http::header::COOKIE)?
        .to_str()
        .ok()?;
    header.split(';').find_map(|part| {
        part.trim().strip_prefix("auth_token=").map(|t| t.to_string())
    })
}
