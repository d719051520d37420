use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tienda_core::config::{AppConfig, LoadOptions};
use toml::Value;

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    let fields: [(&str, String, Option<&str>); 8] = [
        (
            "storage.data_file",
            config.storage.data_file.display().to_string(),
            Some("TIENDA_DATA_FILE"),
        ),
        (
            "server.bind_address",
            config.server.bind_address.clone(),
            Some("TIENDA_SERVER_BIND_ADDRESS"),
        ),
        ("server.port", config.server.port.to_string(), Some("TIENDA_SERVER_PORT")),
        (
            "server.graceful_shutdown_secs",
            config.server.graceful_shutdown_secs.to_string(),
            Some("TIENDA_SERVER_GRACEFUL_SHUTDOWN_SECS"),
        ),
        (
            "pagination.default_limit",
            config.pagination.default_limit.to_string(),
            Some("TIENDA_PAGINATION_DEFAULT_LIMIT"),
        ),
        (
            "pagination.max_limit",
            config.pagination.max_limit.to_string(),
            Some("TIENDA_PAGINATION_MAX_LIMIT"),
        ),
        ("logging.level", config.logging.level.clone(), Some("TIENDA_LOGGING_LEVEL")),
        (
            "logging.format",
            format!("{:?}", config.logging.format).to_lowercase(),
            Some("TIENDA_LOGGING_FORMAT"),
        ),
    ];

    for (key, value, env_key) in fields {
        lines.push(render_line(
            key,
            &value,
            field_source(key, env_key, config_file_doc.as_ref(), config_file_path.as_deref()),
        ));
    }

    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    let root = PathBuf::from("tienda.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/tienda.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_key: Option<&str>,
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_key {
        if env::var_os(env_key).is_some() {
            return format!("env ({env_key})");
        }
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
