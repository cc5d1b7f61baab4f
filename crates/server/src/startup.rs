use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, auth::ServerState};
use service::auth::repo::file::FileAuthRepository;
use service::auth::service::{AuthConfig, AuthService};
use service::profile::ProfileStore;
use service::runtime;
use service::stats::{github::GithubClient, leetcode::LeetcodeClient, medium::MediumClient};

fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Public entry: load config, wire the stores and upstream clients, serve.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = configs::AppConfig::load_and_validate()?;
    runtime::ensure_env(&cfg.storage.data_dir).await?;

    let users_path = format!("{}/users.json", cfg.storage.data_dir);
    let profiles_path = format!("{}/profiles.json", cfg.storage.data_dir);

    let repo = FileAuthRepository::new(users_path).await?;
    let auth = Arc::new(AuthService::new(
        repo,
        AuthConfig {
            jwt_secret: cfg.auth.jwt_secret.clone(),
            token_ttl_hours: cfg.auth.token_ttl_hours,
            ..AuthConfig::default()
        },
    ));
    let profiles = ProfileStore::new(profiles_path).await?;

    let github = GithubClient::new(cfg.upstream.github_token.clone(), cfg.upstream.timeout_secs)?;
    let leetcode = LeetcodeClient::new(
        cfg.upstream.leetcode_primary.clone(),
        cfg.upstream.leetcode_fallback.clone(),
        cfg.upstream.timeout_secs,
    )?;
    let medium = MediumClient::new(cfg.upstream.timeout_secs)?;

    let state = ServerState { auth, profiles, github, leetcode, medium };

    let app: Router = routes::build_router(build_cors(), state);

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "starting devlink server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
