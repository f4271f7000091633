//! Process configuration resolved once at startup.
//!
//! All environment access happens here; the resulting struct is passed into
//! the server state explicitly so no component reads `std::env` on its own.

#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP listener binds to.
    pub http_port: u16,
    /// Root folder for the JSON document collections.
    pub data_root: String,
    /// Secret used to sign bearer tokens.
    pub token_secret: String,
    /// Token lifetime in seconds. Fixed at issuance; no refresh.
    pub token_ttl_secs: u64,
}

impl Config {
    pub const DEFAULT_TOKEN_TTL_SECS: u64 = 2 * 3600;

    /// Resolve configuration from the environment with sensible defaults.
    /// The secret has a dev default so a bare `cargo run` works; deployments
    /// set TASKLANE_SECRET.
    pub fn from_env() -> Self {
        let http_port = std::env::var("TASKLANE_HTTP_PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(7878);
        let data_root = std::env::var("TASKLANE_DB_FOLDER").unwrap_or_else(|_| "dbs".to_string());
        let token_secret = std::env::var("TASKLANE_SECRET").unwrap_or_else(|_| "tasklane-dev-secret".to_string());
        let token_ttl_secs = std::env::var("TASKLANE_TOKEN_TTL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(Self::DEFAULT_TOKEN_TTL_SECS);
        Self { http_port, data_root, token_secret, token_ttl_secs }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 7878,
            data_root: "dbs".to_string(),
            token_secret: "tasklane-dev-secret".to_string(),
            token_ttl_secs: Self::DEFAULT_TOKEN_TTL_SECS,
        }
    }
}
