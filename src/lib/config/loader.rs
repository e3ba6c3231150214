use super::error::ConfigError;
use crate::constants::ENV_PATH;
use std::collections::HashMap;
use std::env;
use std::path::Path;
use tracing::{debug, warn};

/// Load configuration, layering the process environment over an env file.
///
/// An explicitly requested env file must exist and parse. The default
/// `config/.env` is optional.
pub fn load_config(env_file: Option<&Path>) -> Result<super::AppConfig, ConfigError> {
    let file_vars = match env_file {
        Some(path) => read_env_file(path)?,
        None => match read_env_file(Path::new(ENV_PATH)) {
            Ok(vars) => vars,
            Err(ConfigError::NotFound { path }) => {
                debug!(path = %path.display(), "No default env file, using process environment only");
                HashMap::new()
            }
            Err(err) => {
                warn!(%err, "Ignoring unreadable default env file");
                HashMap::new()
            }
        },
    };

    let config = super::AppConfig::from_lookup(|key| {
        env::var(key)
            .ok()
            .or_else(|| file_vars.get(key).cloned())
    });
    debug!(
        api_url = config.api_url.as_str(),
        default_model = config.default_model.as_str(),
        api_key_set = config.has_api_key(),
        "Configuration resolved"
    );
    Ok(config)
}

/// Parse an env file without touching the process environment.
pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    debug!(path = %path.display(), "Reading env file");

    let iter = dotenvy::from_filename_iter(path).map_err(|source| {
        if source.not_found() {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let mut vars = HashMap::new();
    for item in iter {
        let (key, value) = item.map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        vars.insert(key, value);
    }
    Ok(vars)
}
