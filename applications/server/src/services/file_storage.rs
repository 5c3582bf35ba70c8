/// File storage service - keeps uploaded payloads on disk
use crate::error::{Result, ServerError};
use mus_core::StorageId;
use std::path::PathBuf;
use tokio::fs;

/// Flat directory of payload files named by storage id
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    /// Initialize storage directory
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    /// Path of the payload for `storage_id`
    ///
    /// Storage ids are generated server-side, so anything beyond
    /// alphanumerics and dashes is rejected rather than joined onto the base
    /// path.
    pub fn blob_path(&self, storage_id: &StorageId) -> Result<PathBuf> {
        let id = storage_id.as_str();
        let valid = !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid {
            return Err(ServerError::BadRequest(format!("Invalid storage id: {}", id)));
        }
        Ok(self.base_path.join(id))
    }

    /// Store a payload
    pub async fn store(&self, storage_id: &StorageId, data: &[u8]) -> Result<PathBuf> {
        let path = self.blob_path(storage_id)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&path, data).await?;
        Ok(path)
    }

    /// Open a stored payload, returning the file and its size
    pub async fn open(&self, storage_id: &StorageId) -> Result<(fs::File, u64)> {
        let path = self.blob_path(storage_id)?;
        let file = fs::File::open(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ServerError::NotFound(format!("Stored file missing: {}", storage_id))
            } else {
                ServerError::Io(e)
            }
        })?;

        let size = file.metadata().await?.len();
        Ok((file, size))
    }

    /// Remove a payload; missing files are ignored
    pub async fn delete(&self, storage_id: &StorageId) -> Result<()> {
        let path = self.blob_path(storage_id)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
