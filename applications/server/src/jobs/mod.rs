/// Background jobs
pub mod upload_cleanup;

pub use upload_cleanup::UploadCleanup;
