/// Upload and blob types
use super::{StorageId, UploadId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Handle for a client-side upload of a binary payload
///
/// The client POSTs raw bytes to `url` once; the target is consumed by that
/// request whether or not it succeeds afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTarget {
    pub upload_id: UploadId,
    pub url: String,
    pub expires_at: DateTime<Utc>,
}

impl UploadTarget {
    /// Whether the target can no longer be used at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Metadata for a stored binary payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    pub id: StorageId,
    pub content_type: String,
    pub size: i64,
    pub created_at: DateTime<Utc>,
}

/// Response body of a completed upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    pub storage_id: StorageId,
}
