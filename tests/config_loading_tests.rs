// Config loading tests - env file parsing and AppConfig construction
//
// Env files are parsed without touching the process environment, so these
// tests never race with each other over global state.

use openwebui_mcp_server::config::loader::read_env_file;
use openwebui_mcp_server::config::{AppConfig, ConfigError};
use openwebui_mcp_server::constants::{API_URL_ENV, FALLBACK_MODEL};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_env(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join(".env");
    fs::write(&path, content).expect("Failed to write .env");
    path
}

#[test]
fn returns_error_when_explicit_env_file_missing() {
    let result = AppConfig::load(Some(Path::new("/nonexistent/path/.env")));
    assert!(matches!(result, Err(ConfigError::NotFound { .. })));
}

#[test]
fn returns_error_when_env_file_malformed() {
    let dir = tempdir().expect("tempdir");
    let path = write_env(dir.path(), "this is not a valid line\n");

    let result = AppConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn env_file_values_build_config() {
    let dir = tempdir().expect("tempdir");
    let path = write_env(
        dir.path(),
        r#"
# OpenWebUI connection
OPENWEBUI_API_URL=http://localhost:3000/api
OPENWEBUI_API_KEY="sk-from-file"
DEFAULT_MODEL=llama3
"#,
    );

    let vars = read_env_file(&path).expect("parse env file");
    let config = AppConfig::from_lookup(|key| vars.get(key).cloned());

    assert_eq!(config.api_url, "http://localhost:3000/api");
    assert_eq!(config.api_key, "sk-from-file");
    assert_eq!(config.default_model, "llama3");
}

#[test]
fn env_file_without_model_uses_fallback() {
    let dir = tempdir().expect("tempdir");
    let path = write_env(dir.path(), "OPENWEBUI_API_KEY=sk\n");

    let vars = read_env_file(&path).expect("parse env file");
    let config = AppConfig::from_lookup(|key| vars.get(key).cloned());

    assert_eq!(config.api_url, "");
    assert_eq!(config.default_model, FALLBACK_MODEL);
    assert!(config.has_api_key());
}

#[test]
fn load_reads_explicit_env_file() {
    if std::env::var(API_URL_ENV).is_ok() {
        eprintln!("SKIPPED: {API_URL_ENV} is set in the process environment");
        return;
    }
    let dir = tempdir().expect("tempdir");
    let path = write_env(dir.path(), "OPENWEBUI_API_URL=http://from-file.test\n");

    let config = AppConfig::load(Some(&path)).expect("load config");
    assert_eq!(config.api_url, "http://from-file.test");
}
