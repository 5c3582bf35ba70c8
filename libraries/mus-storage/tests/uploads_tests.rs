//! Integration tests for upload targets and blob metadata


use chrono::{Duration, Utc};
use mus_core::{Blob, CatalogProvider, MusError, StorageId};
use test_helpers::*;

#[tokio::test]
async fn test_upload_target_requires_registered_caller() {
    let test_db = TestDb::new().await;

    let err = test_db.catalog().request_upload_target().await.unwrap_err();
    assert!(err.is_authorization());

    let unregistered = test_db.catalog().for_caller(Some(identity("Ada")));
    let err = unregistered.request_upload_target().await.unwrap_err();
    assert!(err.is_consistency());
}

#[tokio::test]
async fn test_upload_target_url_and_deadline() {
    let test_db = TestDb::new().await;
    let (ada, _) = registered(&test_db.catalog(), "Ada").await;

    let before = Utc::now();
    let target = ada.request_upload_target().await.unwrap();

    assert_eq!(
        target.url,
        format!("{}/api/uploads/{}", PUBLIC_URL, target.upload_id)
    );
    assert!(target.expires_at > before + Duration::minutes(59));
    assert!(!target.is_expired_at(Utc::now()));
}

#[tokio::test]
async fn test_upload_target_is_single_use() {
    let test_db = TestDb::new().await;
    let (ada, ada_id) = registered(&test_db.catalog(), "Ada").await;
    let target = ada.request_upload_target().await.unwrap();

    let owner = mus_storage::uploads::consume(test_db.pool(), &target.upload_id, Utc::now())
        .await
        .unwrap();
    assert_eq!(owner, ada_id);

    let err = mus_storage::uploads::consume(test_db.pool(), &target.upload_id, Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, MusError::UploadNotFound(_)));
}

#[tokio::test]
async fn test_expired_upload_target_is_rejected() {
    let test_db = TestDb::new().await;
    let (ada, _) = registered(&test_db.catalog(), "Ada").await;
    let target = ada.request_upload_target().await.unwrap();

    let later = target.expires_at + Duration::seconds(1);
    let err = mus_storage::uploads::consume(test_db.pool(), &target.upload_id, later)
        .await
        .unwrap_err();
    assert!(matches!(err, MusError::UploadExpired(_)));
}

#[tokio::test]
async fn test_custom_upload_ttl() {
    let test_db = TestDb::new().await;
    let catalog = test_db.catalog().with_upload_ttl(Duration::seconds(5));
    let (ada, _) = registered(&catalog, "Ada").await;

    let target = ada.request_upload_target().await.unwrap();
    assert!(target.expires_at <= Utc::now() + Duration::seconds(5));
}

#[tokio::test]
async fn test_purge_expired_targets() {
    let test_db = TestDb::new().await;
    let (ada, _) = registered(&test_db.catalog(), "Ada").await;

    let first = ada.request_upload_target().await.unwrap();
    let second = ada.request_upload_target().await.unwrap();

    let purged = mus_storage::uploads::purge_expired(
        test_db.pool(),
        Utc::now() + Duration::hours(2),
    )
    .await
    .unwrap();
    assert_eq!(purged, 2);

    for target in [first, second] {
        let err = mus_storage::uploads::consume(test_db.pool(), &target.upload_id, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, MusError::UploadNotFound(_)));
    }
}

#[tokio::test]
async fn test_blob_metadata_round_trip() {
    let test_db = TestDb::new().await;

    let blob = Blob {
        id: StorageId::generate(),
        content_type: "audio/flac".to_string(),
        size: 4096,
        created_at: Utc::now(),
    };
    mus_storage::blobs::insert(test_db.pool(), &blob).await.unwrap();

    assert!(mus_storage::blobs::exists(test_db.pool(), &blob.id).await.unwrap());

    let stored = mus_storage::blobs::get_by_id(test_db.pool(), &blob.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.content_type, "audio/flac");
    assert_eq!(stored.size, 4096);
    assert_eq!(
        stored.created_at.timestamp_millis(),
        blob.created_at.timestamp_millis()
    );

    assert!(
        mus_storage::blobs::get_by_id(test_db.pool(), &StorageId::new("missing"))
            .await
            .unwrap()
            .is_none()
    );
}
