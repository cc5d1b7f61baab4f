use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(utoipa::ToSchema)]
pub struct RegisterRequest { pub name: String, pub email: String, pub password: String }

#[derive(utoipa::ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(utoipa::ToSchema)]
pub struct ProfileRequest {
    pub name: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub tech_stack: Vec<String>,
    pub platforms: Vec<PlatformLinkRequest>,
}

#[derive(utoipa::ToSchema)]
pub struct PlatformLinkRequest {
    pub name: String,
    pub username: String,
    pub url: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::me,
        crate::routes::profiles::upsert,
        crate::routes::profiles::mine,
        crate::routes::profiles::all,
        crate::routes::profiles::summary,
        crate::routes::profiles::by_id,
        crate::routes::profiles::delete,
        crate::routes::profiles::add_platform,
        crate::routes::profiles::remove_platform,
        crate::routes::platforms::list,
        crate::routes::stats::github_by_username,
        crate::routes::stats::github_mine,
        crate::routes::stats::leetcode_by_username,
        crate::routes::stats::leetcode_mine,
        crate::routes::stats::hackerrank_by_username,
        crate::routes::stats::hackerrank_mine,
        crate::routes::stats::medium_by_username,
        crate::routes::stats::medium_mine,
        crate::routes::stats::linkedin_by_username,
        crate::routes::stats::linkedin_mine,
        crate::routes::stats::twitter_by_username,
        crate::routes::stats::twitter_mine,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            ProfileRequest,
            PlatformLinkRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "profiles"),
        (name = "platforms"),
        (name = "github"),
        (name = "leetcode"),
        (name = "hackerrank"),
        (name = "medium"),
        (name = "linkedin"),
        (name = "twitter")
    )
)]
pub struct ApiDoc;
