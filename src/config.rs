use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Explorer settings, read from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub project_name: String,

    /// SPARQL endpoint used to resolve entities
    pub dbpedia_endpoint: String,

    pub host: String,
    pub port: u16,

    /// Origins allowed by CORS (frontend URLs)
    pub allowed_origins: Vec<String>,

    /// Per-request timeout towards the endpoint, in seconds
    pub request_timeout_secs: u64,

    /// Related entities resolved at the same time
    pub max_concurrent_fetches: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_name: "DBpedia Visual Explorer".to_string(),
            dbpedia_endpoint: "https://dbpedia.org/sparql".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
            allowed_origins: vec!["http://localhost:3000".to_string()],
            request_timeout_secs: 10,
            max_concurrent_fetches: 8,
        }
    }
}

impl Settings {
    /// Load from process environment, after reading `.env` if one exists
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup, missing keys keep their default
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or(defaults.allowed_origins);

        Self {
            project_name: lookup("PROJECT_NAME").unwrap_or(defaults.project_name),
            dbpedia_endpoint: lookup("DBPEDIA_ENDPOINT").unwrap_or(defaults.dbpedia_endpoint),
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port),
            allowed_origins,
            request_timeout_secs: parse_or(&lookup, "REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs),
            max_concurrent_fetches: parse_or(&lookup, "MAX_CONCURRENT_FETCHES", defaults.max_concurrent_fetches)
                .max(1),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid {}='{}', using {}", key, raw, default);
            default
        }),
        None => default,
    }
}
