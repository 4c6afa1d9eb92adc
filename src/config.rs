//! Runtime settings, read from the environment (and an optional `.env`).

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use http::HeaderValue;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_DB_PATH: &str = "./todo-db.json";
pub const DEFAULT_STATIC_DIR: &str = "./views";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// The single JSON file holding the whole collection.
    pub db_path: PathBuf,
    /// Served at `/` next to the API.
    pub static_dir: PathBuf,
    /// The only origin CORS lets through.
    pub allowed_origin: HeaderValue,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys take the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let bind_addr = var("BIND_ADDR", DEFAULT_BIND_ADDR);
        let allowed_origin = var("CORS_ALLOWED_ORIGIN", DEFAULT_ALLOWED_ORIGIN);
        Ok(Self {
            bind_addr: bind_addr.parse().with_context(|| format!("invalid BIND_ADDR {bind_addr:?}"))?,
            db_path: var("TODO_DB_PATH", DEFAULT_DB_PATH).into(),
            static_dir: var("STATIC_DIR", DEFAULT_STATIC_DIR).into(),
            allowed_origin: HeaderValue::from_str(&allowed_origin)
                .with_context(|| format!("invalid CORS_ALLOWED_ORIGIN {allowed_origin:?}"))?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            db_path: DEFAULT_DB_PATH.into(),
            static_dir: DEFAULT_STATIC_DIR.into(),
            allowed_origin: HeaderValue::from_static(DEFAULT_ALLOWED_ORIGIN),
        }
    }
}
