//! Branding singleton with a small read cache keyed on the backing file's
//! mtime plus a wall-clock TTL. A save always replaces the cache, so a
//! writer observes its own write immediately.

use std::time::{Instant, SystemTime};

use crate::error::AppError;
use crate::models::Branding;
use crate::store::{BRANDING_FILE, Store, StoreError};

pub(crate) struct BrandingCache {
    entry: Option<CacheEntry>,
}

struct CacheEntry {
    value: Branding,
    mtime: SystemTime,
    loaded_at: Instant,
}

impl BrandingCache {
    pub(crate) fn new() -> Self {
        BrandingCache { entry: None }
    }
}

/// Load the branding config. A missing file is created with the defaults;
/// a partial file deserializes with defaults filled in, so the result is
/// always fully populated.
pub async fn load(store: &Store) -> Result<Branding, AppError> {
    let mut cache = store.branding_cache.lock().await;
    let path = store.path(BRANDING_FILE);

    let mtime = match tokio::fs::metadata(&path).await {
        Ok(meta) => meta.modified().map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let value = Branding::default();
            store.write_value(BRANDING_FILE, &value).await?;
            refresh_cache(store, &mut cache, value.clone()).await?;
            return Ok(value);
        }
        Err(source) => return Err(StoreError::Io { path, source }.into()),
    };

    if let Some(entry) = &cache.entry
        && entry.loaded_at.elapsed() < store.branding_ttl
        && entry.mtime == mtime
    {
        return Ok(entry.value.clone());
    }

    let bytes = tokio::fs::read(&path).await.map_err(|source| StoreError::Io {
        path: path.clone(),
        source,
    })?;
    let value: Branding =
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt { path, source })?;

    cache.entry = Some(CacheEntry {
        value: value.clone(),
        mtime,
        loaded_at: Instant::now(),
    });
    Ok(value)
}

/// Persist the branding config and replace the cache. The value is always
/// written complete; request bodies missing keys were already filled with
/// defaults at deserialization.
pub async fn save(store: &Store, value: Branding) -> Result<Branding, AppError> {
    let mut cache = store.branding_cache.lock().await;
    store.write_value(BRANDING_FILE, &value).await?;
    refresh_cache(store, &mut cache, value.clone()).await?;
    Ok(value)
}

async fn refresh_cache(
    store: &Store,
    cache: &mut BrandingCache,
    value: Branding,
) -> Result<(), StoreError> {
    let path = store.path(BRANDING_FILE);
    let mtime = tokio::fs::metadata(&path)
        .await
        .and_then(|meta| meta.modified())
        .map_err(|source| StoreError::Io { path, source })?;
    cache.entry = Some(CacheEntry {
        value,
        mtime,
        loaded_at: Instant::now(),
    });
    Ok(())
}
