mod ids;
mod track;
mod upload;
mod user;

pub use ids::{StorageId, TrackId, UploadId, UserId};
pub use track::{Track, TrackOwner, TrackRecord};
pub use upload::{Blob, UploadReceipt, UploadTarget};
pub use user::{CallerIdentity, User};
