use axum::extract::{Path, State};
use axum::{Extension, Json};
use uuid::Uuid;

use common::types::{CountedEnvelope, Envelope};
use models::profile::{PlatformLinkInput, Profile, ProfileInput, ProfileSummary};
use service::auth::domain::AuthUser;

use crate::errors::JsonApiError;
use crate::routes::auth::ServerState;

#[utoipa::path(post, path = "/api/profiles", tag = "profiles", request_body = crate::openapi::ProfileRequest, responses((status = 200, description = "Profile created or updated"), (status = 400, description = "Validation error")))]
pub async fn upsert(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<ProfileInput>,
) -> Result<Json<Envelope<Profile>>, JsonApiError> {
    let profile = state.profiles.upsert(user.id, input).await?;
    Ok(Json(Envelope::ok(profile)))
}

#[utoipa::path(get, path = "/api/profiles", tag = "profiles", responses((status = 200, description = "Caller's profile"), (status = 404, description = "Profile not found")))]
pub async fn mine(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Envelope<Profile>>, JsonApiError> {
    state
        .profiles
        .get_by_user(user.id)
        .await
        .map(|p| Json(Envelope::ok(p)))
        .ok_or_else(|| JsonApiError::new(axum::http::StatusCode::NOT_FOUND, "Profile not found"))
}

#[utoipa::path(get, path = "/api/profiles/all", tag = "profiles", responses((status = 200, description = "All profiles")))]
pub async fn all(State(state): State<ServerState>) -> Json<CountedEnvelope<Profile>> {
    Json(CountedEnvelope::ok(state.profiles.list_all().await))
}

#[utoipa::path(get, path = "/api/profiles/summary", tag = "profiles", responses((status = 200, description = "Portfolio summary"), (status = 404, description = "Profile not found")))]
pub async fn summary(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Envelope<ProfileSummary>>, JsonApiError> {
    let summary = state.profiles.summary(user.id).await?;
    Ok(Json(Envelope::ok(summary)))
}

#[utoipa::path(get, path = "/api/profiles/{id}", tag = "profiles", params(("id" = Uuid, Path, description = "Profile id")), responses((status = 200, description = "Profile"), (status = 404, description = "Profile not found")))]
pub async fn by_id(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<Profile>>, JsonApiError> {
    state
        .profiles
        .get_by_id(id)
        .await
        .map(|p| Json(Envelope::ok(p)))
        .ok_or_else(|| JsonApiError::new(axum::http::StatusCode::NOT_FOUND, "Profile not found"))
}

#[utoipa::path(delete, path = "/api/profiles", tag = "profiles", responses((status = 200, description = "Profile deleted")))]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Envelope<serde_json::Value>>, JsonApiError> {
    state.profiles.delete_by_user(user.id).await?;
    Ok(Json(Envelope::ok(serde_json::json!({}))))
}

#[utoipa::path(post, path = "/api/profiles/platform", tag = "profiles", request_body = crate::openapi::PlatformLinkRequest, responses((status = 200, description = "Platform added"), (status = 404, description = "Profile not found")))]
pub async fn add_platform(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<PlatformLinkInput>,
) -> Result<Json<Envelope<Profile>>, JsonApiError> {
    let profile = state.profiles.add_platform(user.id, input).await?;
    Ok(Json(Envelope::ok(profile)))
}

#[utoipa::path(delete, path = "/api/profiles/platform/{id}", tag = "profiles", params(("id" = Uuid, Path, description = "Platform link id")), responses((status = 200, description = "Platform removed"), (status = 404, description = "Profile not found")))]
pub async fn remove_platform(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<Profile>>, JsonApiError> {
    let profile = state.profiles.remove_platform(user.id, id).await?;
    Ok(Json(Envelope::ok(profile)))
}
