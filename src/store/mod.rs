pub mod accounts;
pub mod branding;
pub mod companies;
pub mod posts;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::store::branding::BrandingCache;

/// File names within the data directory. These match the layout of earlier
/// deployments, so an existing data directory keeps working.
pub const ACCOUNTS_FILE: &str = "auth.json";
pub const COMPANIES_FILE: &str = "companies.json";
pub const POSTS_FILE: &str = "posts.json";
pub const ACTIVITY_FILE: &str = "users.json";
pub const BRANDING_FILE: &str = "customer_config.json";
pub const SEQUENCES_FILE: &str = "sequences.json";

const DEFAULT_BRANDING_TTL: Duration = Duration::from_secs(60);

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io { path, source } => {
                write!(f, "I/O error on {}: {source}", path.display())
            }
            StoreError::Corrupt { path, source } => {
                write!(f, "Corrupt JSON in {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Flat-file JSON record store. Each collection lives in one pretty-printed
/// JSON file; every mutation loads the full collection, rewrites it in
/// memory, and saves the full snapshot back. A per-collection mutex makes
/// each collection single-writer within this process, and all writes go
/// through a temp-file-then-rename so a crash never leaves a half-written
/// file behind.
pub struct Store {
    dir: PathBuf,
    pub(crate) accounts_lock: Mutex<()>,
    pub(crate) companies_lock: Mutex<()>,
    pub(crate) posts_lock: Mutex<()>,
    pub(crate) branding_cache: Mutex<BrandingCache>,
    pub(crate) branding_ttl: Duration,
}

impl Store {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Store {
            dir,
            accounts_lock: Mutex::new(()),
            companies_lock: Mutex::new(()),
            posts_lock: Mutex::new(()),
            branding_cache: Mutex::new(BrandingCache::new()),
            branding_ttl: DEFAULT_BRANDING_TTL,
        })
    }

    /// Override the branding cache TTL. Tests use a zero TTL to force a
    /// re-read on every load.
    pub fn with_branding_ttl(mut self, ttl: Duration) -> Self {
        self.branding_ttl = ttl;
        self
    }

    pub(crate) fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Load a collection. A missing file is an empty collection; an
    /// unreadable or corrupt file is an error, never silently empty.
    pub(crate) async fn read_collection<T: DeserializeOwned>(
        &self,
        file: &str,
    ) -> Result<Vec<T>, StoreError> {
        let path = self.path(file);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        serde_json::from_slice(&bytes).map_err(|source| {
            tracing::error!("Corrupt collection {}: {source}", path.display());
            StoreError::Corrupt { path, source }
        })
    }

    /// Overwrite a collection with the given snapshot.
    pub(crate) async fn write_collection<T: Serialize>(
        &self,
        file: &str,
        records: &[T],
    ) -> Result<(), StoreError> {
        self.write_value(file, &records).await
    }

    /// Atomically replace `file` with the pretty-printed JSON of `value`:
    /// write to a unique temp file in the same directory, fsync, rename.
    pub(crate) async fn write_value<T: Serialize + ?Sized>(
        &self,
        file: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        let path = self.path(file);
        let json = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Corrupt {
            path: path.clone(),
            source,
        })?;

        let tmp = self.dir.join(format!(".{file}.{}.tmp", uuid::Uuid::new_v4()));
        let result = write_and_rename(&tmp, &path, &json).await;
        if result.is_err() {
            let _ = tokio::fs::remove_file(&tmp).await;
        }
        result
    }

    /// Next value of a named monotonic counter, persisted in
    /// `sequences.json`. Counters survive record deletion, so ids handed
    /// out are never reused.
    pub(crate) async fn next_sequence(&self, name: &str) -> Result<u64, StoreError> {
        let path = self.path(SEQUENCES_FILE);
        let mut sequences: serde_json::Map<String, serde_json::Value> =
            match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                        path: path.clone(),
                        source,
                    })?
                }
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => serde_json::Map::new(),
                Err(source) => return Err(StoreError::Io { path, source }),
            };

        let next = sequences
            .get(name)
            .and_then(serde_json::Value::as_u64)
            .unwrap_or(0)
            + 1;
        sequences.insert(name.to_string(), serde_json::Value::from(next));
        self.write_value(SEQUENCES_FILE, &sequences).await?;
        Ok(next)
    }
}

async fn write_and_rename(tmp: &Path, path: &Path, json: &[u8]) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = tokio::fs::File::create(tmp).await.map_err(io_err)?;
    file.write_all(json).await.map_err(io_err)?;
    file.sync_all().await.map_err(io_err)?;
    drop(file);

    tokio::fs::rename(tmp, path).await.map_err(io_err)
}
