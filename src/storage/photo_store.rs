//! Filesystem-backed photo storage with collision-free references.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::domain::{PhotoExtension, PhotoReference};
use crate::error::ApiError;

/// Stores uploaded photo bytes under random, collision-free references.
///
/// References are UUIDv4-based (see [`PhotoReference::generate`]), so
/// concurrent stores never race on a name and no synchronization beyond
/// the process-wide random generator is needed. Each write goes to a
/// temporary file first and is renamed into place, so a reference is only
/// ever observable with its full payload behind it.
#[derive(Debug, Clone)]
pub struct PhotoStore {
    root: PathBuf,
}

impl PhotoStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::StorageFailure`] when the directory cannot be
    /// created.
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, ApiError> {
        let root = root.into();
        fs::create_dir_all(&root).await.map_err(|e| {
            tracing::error!(error = %e, "failed to create upload directory");
            ApiError::StorageFailure("could not create upload directory".to_string())
        })?;
        Ok(Self { root })
    }

    /// Writes `bytes` under a freshly generated reference and returns it.
    ///
    /// The caller must not record a snapshot referencing the result unless
    /// this call succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::StorageFailure`] when the write or rename
    /// fails; no reference is handed out in that case.
    pub async fn store(
        &self,
        bytes: &[u8],
        extension: PhotoExtension,
    ) -> Result<PhotoReference, ApiError> {
        let reference = PhotoReference::generate(extension);
        let tmp = self.root.join(format!("{}.tmp", reference.as_str()));
        let path = self.path_of(&reference);

        if let Err(e) = fs::write(&tmp, bytes).await {
            tracing::error!(error = %e, reference = %reference, "photo write failed");
            return Err(ApiError::StorageFailure("photo write failed".to_string()));
        }
        if let Err(e) = fs::rename(&tmp, &path).await {
            tracing::error!(error = %e, reference = %reference, "photo publish failed");
            // Leave nothing half-visible behind the reference.
            let _ = fs::remove_file(&tmp).await;
            return Err(ApiError::StorageFailure("photo write failed".to_string()));
        }

        tracing::debug!(reference = %reference, size = bytes.len(), "photo stored");
        Ok(reference)
    }

    /// Reads the stored bytes for `reference`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PhotoNotFound`] when nothing is stored under
    /// the reference, [`ApiError::StorageFailure`] on any other I/O error.
    pub async fn open(&self, reference: &PhotoReference) -> Result<Vec<u8>, ApiError> {
        match fs::read(self.path_of(reference)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(ApiError::PhotoNotFound(reference.to_string()))
            }
            Err(e) => {
                tracing::error!(error = %e, reference = %reference, "photo read failed");
                Err(ApiError::StorageFailure("photo read failed".to_string()))
            }
        }
    }

    /// On-disk location of a reference. Never exposed outside the store.
    fn path_of(&self, reference: &PhotoReference) -> PathBuf {
        self.root.join(reference.as_str())
    }

    /// The storage root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn temp_store() -> (PhotoStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = PhotoStore::new(dir.path()).await.unwrap();
        (store, dir)
    }

    #[tokio::test]
    async fn store_then_open_round_trips_bytes() {
        let (store, _dir) = temp_store().await;
        let payload = b"fake jpeg bytes";
        let reference = store.store(payload, PhotoExtension::Jpg).await.unwrap();
        assert!(reference.as_str().ends_with(".jpg"));
        let read_back = store.open(&reference).await.unwrap();
        assert_eq!(read_back, payload);
    }

    #[tokio::test]
    async fn identical_payloads_get_distinct_references() {
        let (store, _dir) = temp_store().await;
        let a = store.store(b"same", PhotoExtension::Png).await.unwrap();
        let b = store.store(b"same", PhotoExtension::Png).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(store.open(&a).await.unwrap(), b"same");
        assert_eq!(store.open(&b).await.unwrap(), b"same");
    }

    #[tokio::test]
    async fn concurrent_stores_never_collide() {
        let (store, _dir) = temp_store().await;
        let mut handles = Vec::new();
        for i in 0..16u8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.store(&[i], PhotoExtension::Jpeg).await
            }));
        }
        let mut references = Vec::new();
        for handle in handles {
            references.push(handle.await.unwrap().unwrap());
        }
        let before = references.len();
        references.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        references.dedup();
        assert_eq!(references.len(), before);
    }

    #[tokio::test]
    async fn open_missing_reference_is_not_found() {
        let (store, _dir) = temp_store().await;
        let reference = PhotoReference::generate(PhotoExtension::Png);
        let err = store.open(&reference).await.unwrap_err();
        assert!(matches!(err, ApiError::PhotoNotFound(_)));
    }

    #[tokio::test]
    async fn no_temp_files_remain_after_store() {
        let (store, dir) = temp_store().await;
        store.store(b"abc", PhotoExtension::Png).await.unwrap();
        let mut entries = std::fs::read_dir(dir.path()).unwrap();
        assert!(entries.all(|e| {
            let name = e.unwrap().file_name();
            !name.to_string_lossy().ends_with(".tmp")
        }));
    }
}
