use crate::config::settings::{AppConfig, StorageBackend};
use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;

pub mod local;
pub mod memory;
pub mod s3;

pub use local::LocalStorage;
pub use memory::MemoryStorage;
pub use s3::S3Storage;

/// Object store for uploaded images, addressed by slash-separated keys.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> Result<()>;

    /// Deleting a missing object is not an error.
    async fn delete_object(&self, key: &str) -> Result<()>;

    /// URL clients fetch `key` from.
    fn public_url(&self, key: &str) -> String;
}

pub type DynStorage = Arc<dyn ImageStorage>;

pub async fn build_storage(config: &AppConfig) -> Result<DynStorage> {
    match config.storage_backend {
        StorageBackend::Local => {
            let storage = LocalStorage::new(&config.media_root, &config.media_url)
                .await
                .with_context(|| format!("failed to prepare {}", config.media_root.display()))?;
            Ok(Arc::new(storage))
        }
        StorageBackend::S3 => {
            let s3 = config
                .s3
                .as_ref()
                .context("S3 storage selected without MinIO settings")?;
            Ok(Arc::new(S3Storage::new(s3)))
        }
    }
}

/// Keys are generated by the service, but never let one escape the storage root.
pub(crate) fn is_safe_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('/')
        && key
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

#[cfg(test)]
mod tests {
    use super::is_safe_key;

    #[test]
    fn rejects_traversal_and_absolute_keys() {
        assert!(is_safe_key("movies/1/poster.png"));
        assert!(!is_safe_key("../etc/passwd"));
        assert!(!is_safe_key("/movies/poster.png"));
        assert!(!is_safe_key("movies//poster.png"));
        assert!(!is_safe_key(""));
    }
}
