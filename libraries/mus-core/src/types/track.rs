/// Track domain types
use super::{StorageId, TrackId, User, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Track as stored by the catalog provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRecord {
    pub id: TrackId,
    pub title: String,

    /// Audio payload
    pub song: StorageId,

    /// Cover image payload, attached after upload
    pub image: Option<StorageId>,

    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Owner summary embedded in catalog entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackOwner {
    pub id: UserId,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl From<User> for TrackOwner {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            display_name: user.full_name,
            avatar_url: user.image_url,
        }
    }
}

/// Track as seen by a specific caller
///
/// This is the catalog projection: locators are resolved to URLs, the owner
/// is joined in and `favorite` reflects the *requesting caller's* marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub audio_url: String,
    pub cover_url: Option<String>,
    pub owner: TrackOwner,
    pub favorite: bool,
    pub created_at: DateTime<Utc>,
}
