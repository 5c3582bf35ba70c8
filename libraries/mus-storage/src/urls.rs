//! Resolution of stored payload ids into fetchable URLs

use mus_core::types::{StorageId, UploadId};

/// Builds public URLs for blobs and upload targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlResolver {
    base_url: String,
}

impl UrlResolver {
    /// `public_url` is the externally reachable origin of the server,
    /// e.g. `https://music.example.com`
    pub fn new(public_url: impl Into<String>) -> Self {
        let base_url = public_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL serving the payload's bytes
    pub fn storage_url(&self, id: &StorageId) -> String {
        format!("{}/api/storage/{}", self.base_url, id)
    }

    /// URL accepting the bytes for an upload target
    pub fn upload_url(&self, id: &UploadId) -> String {
        format!("{}/api/uploads/{}", self.base_url, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let urls = UrlResolver::new("http://localhost:8080//");
        assert_eq!(urls.base_url(), "http://localhost:8080");
        assert_eq!(
            urls.storage_url(&StorageId::new("abc")),
            "http://localhost:8080/api/storage/abc"
        );
    }

    #[test]
    fn upload_url_points_at_upload_route() {
        let urls = UrlResolver::new("https://music.example.com");
        assert_eq!(
            urls.upload_url(&UploadId::new("u1")),
            "https://music.example.com/api/uploads/u1"
        );
    }
}
