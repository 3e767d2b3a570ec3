// collabsync-service/src/tests/store_tests.rs
use crate::models::ServiceError;
use crate::utils::entity_store;
use futures::future::join_all;
use serde_json::{json, Value};
use uuid::Uuid;

const COLLECTION: &str = "workspaces";

async fn create_indexed_doc() -> String {
    let id = format!("ws-{}", Uuid::new_v4());
    let doc = json!({
        "id": id,
        "pending_videos": [],
        "uploaded_videos": [],
    });
    entity_store::create_doc(COLLECTION, Some(&id), &doc)
        .await
        .unwrap();
    id
}

fn array_of<'a>(doc: &'a Value, field: &str) -> &'a Vec<Value> {
    doc[field].as_array().unwrap()
}

#[actix_rt::test]
async fn union_append_is_idempotent() {
    let id = create_indexed_doc().await;

    entity_store::union_append(COLLECTION, &id, "pending_videos", "video-1")
        .await
        .unwrap();
    entity_store::union_append(COLLECTION, &id, "pending_videos", "video-1")
        .await
        .unwrap();

    let doc: Value = entity_store::fetch_doc(COLLECTION, &id).await.unwrap().unwrap();
    assert_eq!(array_of(&doc, "pending_videos").len(), 1);
}

#[actix_rt::test]
async fn move_between_sets_is_atomic_remove_plus_add() {
    let id = create_indexed_doc().await;

    entity_store::union_append(COLLECTION, &id, "pending_videos", "video-a")
        .await
        .unwrap();
    entity_store::union_append(COLLECTION, &id, "pending_videos", "video-b")
        .await
        .unwrap();

    entity_store::move_between_sets(COLLECTION, &id, "pending_videos", "uploaded_videos", "video-a")
        .await
        .unwrap();

    let doc: Value = entity_store::fetch_doc(COLLECTION, &id).await.unwrap().unwrap();
    assert_eq!(array_of(&doc, "pending_videos"), &vec![json!("video-b")]);
    assert_eq!(array_of(&doc, "uploaded_videos"), &vec![json!("video-a")]);

    // Moving the same value again changes nothing
    entity_store::move_between_sets(COLLECTION, &id, "pending_videos", "uploaded_videos", "video-a")
        .await
        .unwrap();

    let doc: Value = entity_store::fetch_doc(COLLECTION, &id).await.unwrap().unwrap();
    assert_eq!(array_of(&doc, "uploaded_videos").len(), 1);
}

#[actix_rt::test]
async fn update_fields_applies_all_updates_in_one_step() {
    let id = create_indexed_doc().await;

    entity_store::update_fields(
        COLLECTION,
        &id,
        vec![("name", json!("renamed")), ("channel_id", json!("UC-x"))],
    )
    .await
    .unwrap();

    let doc: Value = entity_store::fetch_doc(COLLECTION, &id).await.unwrap().unwrap();
    assert_eq!(doc["name"], json!("renamed"));
    assert_eq!(doc["channel_id"], json!("UC-x"));
    // Untouched fields survive the write
    assert_eq!(array_of(&doc, "pending_videos").len(), 0);
}

#[actix_rt::test]
async fn update_fields_on_missing_document_is_not_found() {
    let result = entity_store::update_fields(
        COLLECTION,
        "ws-does-not-exist",
        vec![("name", json!("ghost"))],
    )
    .await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}

#[actix_rt::test]
async fn union_append_on_missing_document_is_not_found() {
    let result =
        entity_store::union_append(COLLECTION, "ws-does-not-exist", "pending_videos", "v").await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}

#[actix_rt::test]
async fn create_doc_refuses_overwrite() {
    let id = create_indexed_doc().await;
    let result = entity_store::create_doc(COLLECTION, Some(&id), &json!({ "id": id })).await;
    assert!(matches!(result, Err(ServiceError::Validation(_))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_union_appends_never_lose_updates() {
    let id = create_indexed_doc().await;

    let tasks: Vec<_> = (0..16)
        .map(|i| {
            let id = id.clone();
            tokio::spawn(async move {
                entity_store::union_append(
                    "workspaces",
                    &id,
                    "pending_videos",
                    &format!("video-{}", i),
                )
                .await
            })
        })
        .collect();

    for result in join_all(tasks).await {
        result.unwrap().unwrap();
    }

    let doc: Value = entity_store::fetch_doc("workspaces", &id).await.unwrap().unwrap();
    assert_eq!(array_of(&doc, "pending_videos").len(), 16);
}
