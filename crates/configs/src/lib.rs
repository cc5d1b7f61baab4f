use anyhow::{anyhow, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 5000, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret; falls back to JWT_SECRET env var.
    #[serde(default)]
    pub jwt_secret: Option<String>,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { jwt_secret: None, token_ttl_hours: default_token_ttl() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: default_data_dir() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Optional GitHub token; raises the unauthenticated rate limit.
    #[serde(default)]
    pub github_token: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_leetcode_primary")]
    pub leetcode_primary: String,
    #[serde(default = "default_leetcode_fallback")]
    pub leetcode_fallback: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            github_token: None,
            timeout_secs: default_timeout(),
            leetcode_primary: default_leetcode_primary(),
            leetcode_fallback: default_leetcode_fallback(),
        }
    }
}

fn default_token_ttl() -> i64 { 12 }
fn default_data_dir() -> String { "data".into() }
fn default_timeout() -> u64 { 10 }
fn default_leetcode_primary() -> String { "https://leetcode-stats-api.herokuapp.com".into() }
fn default_leetcode_fallback() -> String { "https://alfa-leetcode-api.onrender.com".into() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load from CONFIG_PATH (default `config.toml`), then normalize and
    /// validate. Only a missing file yields defaults plus env overrides; an
    /// unreadable or malformed file is an error.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e)
                if e.downcast_ref::<std::io::Error>()
                    .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound) =>
            {
                AppConfig::default()
            }
            Err(e) => return Err(e),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.auth.normalize_from_env();
        self.storage.normalize();
        self.upstream.normalize_from_env()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl AuthConfig {
    pub fn normalize_from_env(&mut self) {
        if self.jwt_secret.as_deref().map_or(true, |s| s.trim().is_empty()) {
            if let Ok(secret) = std::env::var("JWT_SECRET") {
                self.jwt_secret = Some(secret);
            }
        }
        if self.token_ttl_hours <= 0 {
            self.token_ttl_hours = default_token_ttl();
        }
    }
}

impl StorageConfig {
    fn normalize(&mut self) {
        if self.data_dir.trim().is_empty() {
            self.data_dir = default_data_dir();
        }
    }
}

impl UpstreamConfig {
    pub fn normalize_from_env(&mut self) -> Result<()> {
        if self.github_token.as_deref().map_or(true, |s| s.trim().is_empty()) {
            self.github_token = std::env::var("GITHUB_TOKEN").ok().filter(|s| !s.is_empty());
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("upstream.timeout_secs must be a positive number of seconds"));
        }
        for url in [&self.leetcode_primary, &self.leetcode_fallback] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(anyhow!("upstream leetcode endpoints must start with http(s)"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let mut cfg = AppConfig::default();
        cfg.normalize_and_validate().expect("defaults validate");
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.auth.token_ttl_hours, 12);
        assert_eq!(cfg.storage.data_dir, "data");
        assert!(cfg.upstream.leetcode_primary.starts_with("https://"));
    }

    #[test]
    fn zero_port_rejected() {
        let mut cfg = AppConfig::default();
        cfg.server.port = 0;
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn zero_workers_normalized() {
        let mut cfg = AppConfig::default();
        cfg.server.worker_threads = Some(0);
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.worker_threads, Some(4));
    }

    #[test]
    fn bad_leetcode_endpoint_rejected() {
        let mut cfg = AppConfig::default();
        cfg.upstream.leetcode_fallback = "ftp://nope".into();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("devlink_cfg_bad_{}.toml", std::process::id()));
        std::fs::write(&path, "[server]\nport = \"not a number\"\n").unwrap();
        let path_str = path.to_str().unwrap();

        assert!(load_from_file(path_str).is_err());

        // load_and_validate must propagate the parse error, not fall back
        std::env::set_var("CONFIG_PATH", path_str);
        let result = AppConfig::load_and_validate();
        assert!(result.is_err());

        // a missing file, by contrast, still yields defaults
        std::env::set_var("CONFIG_PATH", "/nonexistent/devlink-config.toml");
        let cfg = AppConfig::load_and_validate().expect("missing file yields defaults");
        assert_eq!(cfg.server.port, 5000);
        std::env::remove_var("CONFIG_PATH");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn toml_overrides_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [auth]
            token_ttl_hours = 24

            [upstream]
            timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.auth.token_ttl_hours, 24);
        assert_eq!(cfg.upstream.timeout_secs, 5);
        assert_eq!(cfg.storage.data_dir, "data");
    }
}
