//! Registry persistence
//!
//! Manages the `clusters.json` file inside the config directory. Every
//! write replaces the whole document atomically: the new snapshot is
//! written to a temp file next to the target, synced, then renamed over
//! it, so a reader never observes a half-written registry.

use crate::error::{RegistryError, Result};
use crate::model::Clusters;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Handle to the registry file
///
/// Transactions started through [`RegistryStore::update`] on the same
/// handle run one at a time. Nothing guards against a second process
/// writing the same file; the last writer wins.
pub struct RegistryStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl RegistryStore {
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Store for `clusters.json` inside an Overcast config directory
    pub fn at_config_dir(config_dir: &Path) -> Self {
        Self::open(overcast_config::clusters_path(config_dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the registry, or an empty one if none has been written yet
    pub async fn load(&self) -> Result<Clusters> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Registry file not found, returning empty registry");
                return Ok(Clusters::new());
            }
            Err(source) => {
                return Err(RegistryError::StorageUnavailable {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if content.trim().is_empty() {
            tracing::debug!("Registry file is empty, returning empty registry");
            return Ok(Clusters::new());
        }

        let clusters: Clusters =
            serde_json::from_str(&content).map_err(|source| RegistryError::CorruptRegistry {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!("Loaded registry with {} clusters", clusters.len());
        Ok(clusters)
    }

    /// Persist the full registry; resolves once the new file is in place
    pub async fn save(&self, clusters: &Clusters) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.write_atomic(clusters).await
    }

    /// Run one load → mutate → save transaction
    ///
    /// The closure receives the current snapshot. If it returns `Ok`, the
    /// mutated snapshot is saved before the value is handed back; if it
    /// returns `Err`, nothing is written.
    pub async fn update<F, T, E>(&self, mutate: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut Clusters) -> std::result::Result<T, E>,
        E: From<RegistryError>,
    {
        let _guard = self.write_lock.lock().await;

        let mut clusters = self.load().await?;
        let value = mutate(&mut clusters)?;
        self.write_atomic(&clusters).await?;

        Ok(value)
    }

    async fn write_atomic(&self, clusters: &Clusters) -> Result<()> {
        let write_error = |source: std::io::Error| RegistryError::StorageWriteError {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await.map_err(write_error)?;
        }

        let mut content = serde_json::to_string_pretty(clusters)
            .map_err(|e| write_error(std::io::Error::other(e)))?;
        content.push('\n');

        let temp_path = self.temp_path();
        if let Err(source) = write_synced(&temp_path, content.as_bytes()).await {
            discard(&temp_path).await;
            return Err(write_error(source));
        }

        if let Err(source) = fs::rename(&temp_path, &self.path).await {
            discard(&temp_path).await;
            return Err(write_error(source));
        }

        sync_parent_dir(&self.path).await;

        tracing::debug!("Saved registry with {} clusters", clusters.len());
        Ok(())
    }

    /// Unique sibling of the registry file, so the final rename stays on one filesystem
    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "clusters.json".to_string());
        let sequence = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        self.path.with_file_name(format!(
            ".{}.{}.{}.tmp",
            file_name,
            std::process::id(),
            sequence
        ))
    }
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    file.sync_all().await
}

async fn discard(temp_path: &Path) {
    if let Err(e) = fs::remove_file(temp_path).await
        && e.kind() != std::io::ErrorKind::NotFound
    {
        tracing::warn!("Failed to remove temp file {}: {}", temp_path.display(), e);
    }
}

/// Make the rename itself durable. Best effort; not every filesystem
/// lets a directory be opened for syncing.
#[cfg(unix)]
async fn sync_parent_dir(path: &Path) {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return;
    };
    match fs::File::open(parent).await {
        Ok(dir) => {
            if let Err(e) = dir.sync_all().await {
                tracing::debug!("Could not sync {}: {}", parent.display(), e);
            }
        }
        Err(e) => tracing::debug!("Could not open {}: {}", parent.display(), e),
    }
}

#[cfg(not(unix))]
async fn sync_parent_dir(_path: &Path) {}
