use axum::extract::{Path, State};
use axum::{Extension, Json};

use common::types::Envelope;
use models::platform::PlatformName;
use service::auth::domain::AuthUser;
use service::stats::github::GithubStats;
use service::stats::hackerrank::{self, HackerrankStats};
use service::stats::leetcode::LeetcodeStats;
use service::stats::linkedin::{self, IntegrationNotice};
use service::stats::medium::Article;
use service::stats::twitter;

use crate::errors::JsonApiError;
use crate::routes::auth::ServerState;

#[utoipa::path(get, path = "/api/github/stats/{username}", tag = "github", params(("username" = String, Path, description = "GitHub username")), responses((status = 200, description = "Aggregated GitHub stats"), (status = 404, description = "GitHub user not found"), (status = 429, description = "Rate limited")))]
pub async fn github_by_username(
    State(state): State<ServerState>,
    Path(username): Path<String>,
) -> Result<Json<Envelope<GithubStats>>, JsonApiError> {
    let stats = state.github.fetch_stats(&username).await?;
    Ok(Json(Envelope::ok(stats)))
}

#[utoipa::path(get, path = "/api/github/stats", tag = "github", responses((status = 200, description = "Aggregated GitHub stats for the caller"), (status = 404, description = "Profile or GitHub link missing")))]
pub async fn github_mine(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Envelope<GithubStats>>, JsonApiError> {
    let username = state
        .profiles
        .linked_username(user.id, PlatformName::GitHub)
        .await?;
    let stats = state.github.fetch_stats(&username).await?;
    Ok(Json(Envelope::ok(stats)))
}

#[utoipa::path(get, path = "/api/leetcode/stats/{username}", tag = "leetcode", params(("username" = String, Path, description = "LeetCode username")), responses((status = 200, description = "Normalized LeetCode stats"), (status = 404, description = "User not found on any source")))]
pub async fn leetcode_by_username(
    State(state): State<ServerState>,
    Path(username): Path<String>,
) -> Result<Json<Envelope<LeetcodeStats>>, JsonApiError> {
    let stats = state.leetcode.fetch_stats(&username).await?;
    Ok(Json(Envelope::ok(stats)))
}

#[utoipa::path(get, path = "/api/leetcode/stats", tag = "leetcode", responses((status = 200, description = "Normalized LeetCode stats for the caller"), (status = 404, description = "Profile or LeetCode link missing")))]
pub async fn leetcode_mine(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Envelope<LeetcodeStats>>, JsonApiError> {
    let username = state
        .profiles
        .linked_username(user.id, PlatformName::LeetCode)
        .await?;
    let stats = state.leetcode.fetch_stats(&username).await?;
    Ok(Json(Envelope::ok(stats)))
}

#[utoipa::path(get, path = "/api/hackerrank/stats/{username}", tag = "hackerrank", params(("username" = String, Path, description = "HackerRank username")), responses((status = 200, description = "Synthesized HackerRank stats")))]
pub async fn hackerrank_by_username(
    Path(username): Path<String>,
) -> Json<Envelope<HackerrankStats>> {
    Json(Envelope::ok(hackerrank::stats_for(&username)))
}

#[utoipa::path(get, path = "/api/hackerrank/stats", tag = "hackerrank", responses((status = 200, description = "Synthesized HackerRank stats for the caller"), (status = 404, description = "Profile or HackerRank link missing")))]
pub async fn hackerrank_mine(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Envelope<HackerrankStats>>, JsonApiError> {
    let username = state
        .profiles
        .linked_username(user.id, PlatformName::HackerRank)
        .await?;
    Ok(Json(Envelope::ok(hackerrank::stats_for(&username))))
}

#[utoipa::path(get, path = "/api/medium/articles/{username}", tag = "medium", params(("username" = String, Path, description = "Medium username, without the leading @")), responses((status = 200, description = "Recent articles"), (status = 502, description = "Feed unavailable")))]
pub async fn medium_by_username(
    State(state): State<ServerState>,
    Path(username): Path<String>,
) -> Result<Json<Envelope<Vec<Article>>>, JsonApiError> {
    let articles = state.medium.fetch_articles(&username).await?;
    Ok(Json(Envelope::ok(articles)))
}

#[utoipa::path(get, path = "/api/medium/articles", tag = "medium", responses((status = 200, description = "Recent articles for the caller"), (status = 404, description = "Profile or Medium link missing")))]
pub async fn medium_mine(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Envelope<Vec<Article>>>, JsonApiError> {
    let username = state
        .profiles
        .linked_username(user.id, PlatformName::Medium)
        .await?;
    let articles = state.medium.fetch_articles(&username).await?;
    Ok(Json(Envelope::ok(articles)))
}

#[utoipa::path(get, path = "/api/linkedin/profile/{username}", tag = "linkedin", params(("username" = String, Path, description = "LinkedIn username or profile URL")), responses((status = 200, description = "Integration-required notice")))]
pub async fn linkedin_by_username(Path(username): Path<String>) -> Json<IntegrationNotice> {
    Json(linkedin::profile_notice(&linkedin::normalize_username(&username)))
}

#[utoipa::path(get, path = "/api/linkedin/profile", tag = "linkedin", responses((status = 200, description = "Integration-required notice for the caller"), (status = 404, description = "Profile or LinkedIn link missing")))]
pub async fn linkedin_mine(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<IntegrationNotice>, JsonApiError> {
    let username = state
        .profiles
        .linked_username(user.id, PlatformName::LinkedIn)
        .await?;
    Ok(Json(linkedin::profile_notice(&linkedin::normalize_username(&username))))
}

#[utoipa::path(get, path = "/api/twitter/tweets/{username}", tag = "twitter", params(("username" = String, Path, description = "Twitter/X handle or profile URL")), responses((status = 200, description = "Integration-required notice")))]
pub async fn twitter_by_username(Path(username): Path<String>) -> Json<IntegrationNotice> {
    Json(twitter::tweets_notice(&twitter::normalize_username(&username)))
}

#[utoipa::path(get, path = "/api/twitter/tweets", tag = "twitter", responses((status = 200, description = "Integration-required notice for the caller"), (status = 404, description = "Profile or Twitter link missing")))]
pub async fn twitter_mine(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<IntegrationNotice>, JsonApiError> {
    // A linked platform named either Twitter or X counts.
    let profile = state
        .profiles
        .get_by_user(user.id)
        .await
        .ok_or_else(|| JsonApiError::new(axum::http::StatusCode::NOT_FOUND, "Profile not found"))?;
    let link = profile
        .platform(PlatformName::Twitter)
        .or_else(|| profile.platform(PlatformName::X))
        .ok_or_else(|| {
            JsonApiError::new(axum::http::StatusCode::NOT_FOUND, "Twitter profile not found")
        })?;
    Ok(Json(twitter::tweets_notice(&twitter::normalize_username(&link.username))))
}
