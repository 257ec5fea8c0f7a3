//! Overcast configuration directory discovery
//!
//! Everything Overcast persists (the cluster registry, SSH keys) lives in a
//! single `.overcast` directory. This crate finds it and names the
//! well-known files inside it.

pub mod error;

pub use error::*;

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Config directory name
pub const CONFIG_DIRNAME: &str = ".overcast";

/// Environment variable overriding discovery
pub const CONFIG_DIR_ENV: &str = "OVERCAST_DIR";

const CLUSTERS_FILENAME: &str = "clusters.json";
const KEYS_DIRNAME: &str = "keys";
const DEFAULT_KEY_FILENAME: &str = "overcast.key";

/// Find the Overcast config directory
///
/// Search order:
/// 1. `OVERCAST_DIR` environment variable
/// 2. `.overcast` in the current directory, then each parent
/// 3. `~/.overcast` (created if missing)
#[tracing::instrument]
pub fn find_config_dir() -> Result<PathBuf> {
    if let Ok(path_str) = std::env::var(CONFIG_DIR_ENV) {
        let path = PathBuf::from(&path_str);
        debug!(env_path = %path_str, "Checking OVERCAST_DIR");
        if path.is_dir() {
            info!(config_dir = %path.display(), "Using config directory from environment variable");
            return Ok(path);
        }
        warn!(env_path = %path_str, "OVERCAST_DIR is set but is not a directory");
    }

    if let Ok(cwd) = std::env::current_dir()
        && let Some(found) = find_config_dir_from(&cwd)
    {
        return Ok(found);
    }

    let home_config = dirs::home_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .join(CONFIG_DIRNAME);

    if !home_config.exists() {
        std::fs::create_dir_all(&home_config)?;
        info!(config_dir = %home_config.display(), "Created config directory");
    }

    Ok(home_config)
}

/// Search upwards from `start_dir` for a `.overcast` directory
pub fn find_config_dir_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    debug!(start_dir = %start_dir.display(), "Searching for {}", CONFIG_DIRNAME);

    loop {
        let candidate = current.join(CONFIG_DIRNAME);
        if candidate.is_dir() {
            info!(config_dir = %candidate.display(), "Found config directory");
            return Some(candidate);
        }

        if !current.pop() {
            break;
        }
    }

    debug!("Config directory not found above {}", start_dir.display());
    None
}

/// Path of the cluster registry file
pub fn clusters_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CLUSTERS_FILENAME)
}

/// Default private key used for new and imported instances
pub fn default_ssh_key_path(config_dir: &Path) -> PathBuf {
    config_dir.join(KEYS_DIRNAME).join(DEFAULT_KEY_FILENAME)
}
