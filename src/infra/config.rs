//! Centralized configuration (environment variables + defaults).

use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_DATA_FILE: &str = "albums.json";

/// Listen address.
pub fn bind_addr() -> String {
    std::env::var("ALBUMS_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
}

/// Path of the JSON document holding the collection.
pub fn data_file() -> PathBuf {
    std::env::var("ALBUMS_DATA_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_FILE))
}

/// Hold one process-wide lock around every read-modify-write (default: true).
pub fn serialize_writes() -> bool {
    env_bool("ALBUMS_SERIALIZE_WRITES", true)
}

/// Terminate the process on storage failures instead of answering 500 (default: false).
pub fn fatal_storage_errors() -> bool {
    env_bool("ALBUMS_FATAL_STORAGE_ERRORS", false)
}

/// Mount Swagger UI and the OpenAPI document (default: false).
pub fn swagger_ui() -> bool {
    env_bool("ALBUMS_SWAGGER_UI", false)
}

/// Emit JSON log lines (default: false).
pub fn log_json() -> bool {
    env_bool("LOG_JSON", false)
}

fn env_bool(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| parse_bool(&v))
        .unwrap_or(default)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Snapshot of every setting the server reads at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub data_file: PathBuf,
    pub serialize_writes: bool,
    pub fatal_storage_errors: bool,
    pub swagger_ui: bool,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self {
            bind_addr: bind_addr(),
            data_file: data_file(),
            serialize_writes: serialize_writes(),
            fatal_storage_errors: fatal_storage_errors(),
            swagger_ui: swagger_ui(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            serialize_writes: true,
            fatal_storage_errors: false,
            swagger_ui: false,
        }
    }
}
