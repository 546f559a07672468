use std::env;
use std::net::SocketAddr;
use thiserror::Error;

/// Paths of the collaborator API, relative to `api_base_url`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRoutes {
    pub companies: String,
    pub units: String,
    pub developments: String,
    /// `{id}` is substituted with the development id.
    pub publish: String,
    pub import: String,
    pub create_unit: String,
}

impl Default for ApiRoutes {
    fn default() -> Self {
        Self {
            companies: "/api/construtoras".to_string(),
            units: "/unidades".to_string(),
            developments: "/empreendimentos".to_string(),
            publish: "/empreendimentos/{id}/publicar".to_string(),
            import: "/empreendimentos/upload".to_string(),
            create_unit: "/api/unidades".to_string(),
        }
    }
}

impl ApiRoutes {
    pub fn publish_path(&self, id: i64) -> String {
        self.publish.replace("{id}", &id.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub bind_addr: SocketAddr,
    pub api_base_url: String,
    pub api_timeout_secs: u64,
    pub max_workers: usize,
    /// Value of the "published only" filter after `clear()` and on first load.
    pub published_only_default: bool,
    pub max_upload_bytes: usize,
    /// Sessions unseen for this long are dropped along with any file they hold.
    pub session_ttl_secs: u64,
    pub max_sessions: usize,
    pub routes: ApiRoutes,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            api_base_url: "http://127.0.0.1:5000".to_string(),
            api_timeout_secs: 30,
            max_workers: 8,
            published_only_default: false,
            max_upload_bytes: 16 * 1024 * 1024,
            session_ttl_secs: 2 * 60 * 60,
            max_sessions: 1024,
            routes: ApiRoutes::default(),
        }
    }
}

impl ConsoleConfig {
    /// Defaults overridden by `OBRAS_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        cfg.apply_vars(|name| env::var(name).ok())?;
        Ok(cfg)
    }

    fn apply_vars<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("OBRAS_BIND_ADDR") {
            self.bind_addr = parse_var("OBRAS_BIND_ADDR", &v)?;
        }
        if let Some(v) = lookup("OBRAS_API_BASE_URL") {
            url::Url::parse(&v).map_err(|e| ConfigError::InvalidValue {
                var: "OBRAS_API_BASE_URL",
                value: v.clone(),
                reason: e.to_string(),
            })?;
            self.api_base_url = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = lookup("OBRAS_API_TIMEOUT_SECS") {
            self.api_timeout_secs = parse_positive("OBRAS_API_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = lookup("OBRAS_MAX_WORKERS") {
            self.max_workers = parse_positive("OBRAS_MAX_WORKERS", &v)?;
        }
        if let Some(v) = lookup("OBRAS_PUBLISHED_ONLY_DEFAULT") {
            self.published_only_default = parse_flag("OBRAS_PUBLISHED_ONLY_DEFAULT", &v)?;
        }
        if let Some(v) = lookup("OBRAS_MAX_UPLOAD_BYTES") {
            self.max_upload_bytes = parse_positive("OBRAS_MAX_UPLOAD_BYTES", &v)?;
        }
        if let Some(v) = lookup("OBRAS_SESSION_TTL_SECS") {
            self.session_ttl_secs = parse_positive("OBRAS_SESSION_TTL_SECS", &v)?;
        }
        if let Some(v) = lookup("OBRAS_MAX_SESSIONS") {
            self.max_sessions = parse_positive("OBRAS_MAX_SESSIONS", &v)?;
        }
        Ok(())
    }
}

fn parse_var<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            var,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Like `parse_var`, for settings where zero would disable the server.
fn parse_positive<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + Default + PartialEq,
    T::Err: std::fmt::Display,
{
    let parsed: T = parse_var(var, value)?;
    if parsed == T::default() {
        return Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(parsed)
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}
