// collabsync-service/src/tests/routes_tests.rs
use crate::routes::{user_routes, video_routes, workspace_routes};
use actix_web::{test, App};
use serde_json::json;
use uuid::Uuid;

#[actix_rt::test]
async fn account_routes_are_idempotent_and_redact_tokens() {
    let app = test::init_service(
        App::new().configure(user_routes::init_routes),
    )
    .await;

    let user_id = format!("user-{}", Uuid::new_v4());
    let body = json!({
        "id": user_id,
        "email": "creator@example.com",
        "access_token": "secret-token",
        "refresh_token": "secret-refresh"
    });

    let request = test::TestRequest::post()
        .uri("/api/user")
        .set_json(&body)
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 201);

    // Second creation is a no-op
    let request = test::TestRequest::post()
        .uri("/api/user")
        .set_json(&body)
        .to_request();
    let response: serde_json::Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(response["message"], "User already exists.");

    // The user view never exposes tokens
    let request = test::TestRequest::get()
        .uri(&format!("/api/user/{}", user_id))
        .to_request();
    let user: serde_json::Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(user["id"], json!(user_id));
    assert_eq!(user["roles"]["creator"], json!(true));
    assert!(user.get("access_token").is_none());
}

#[actix_rt::test]
async fn short_ids_fail_validation() {
    let app = test::init_service(
        App::new().configure(user_routes::init_routes),
    )
    .await;

    let request = test::TestRequest::post()
        .uri("/api/user")
        .set_json(&json!({ "id": "abc", "email": "short@example.com" }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 400);
}

#[actix_rt::test]
async fn missing_entities_return_404_with_stable_kind() {
    let app = test::init_service(
        App::new()
            .configure(user_routes::init_routes)
            .configure(workspace_routes::init_routes),
    )
    .await;

    let request = test::TestRequest::get()
        .uri("/api/user/user-does-not-exist")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 404);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "not_found");

    let request = test::TestRequest::get()
        .uri("/api/workspace/ws-does-not-exist")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 404);
}

#[actix_rt::test]
async fn submit_flow_over_http() {
    let app = test::init_service(
        App::new()
            .configure(user_routes::init_routes)
            .configure(workspace_routes::init_routes)
            .configure(video_routes::init_routes),
    )
    .await;

    let user_id = format!("user-{}", Uuid::new_v4());
    let request = test::TestRequest::post()
        .uri("/api/user")
        .set_json(&json!({
            "id": user_id,
            "email": "creator@example.com",
            "access_token": "secret-token"
        }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 201);

    // Bind the channel explicitly so creation never leaves the process
    let request = test::TestRequest::post()
        .uri("/api/workspace")
        .set_json(&json!({
            "userId": user_id,
            "workspaceName": "http-flow",
            "channelId": "UC-http-test"
        }))
        .to_request();
    let created: serde_json::Value = test::call_and_read_body_json(&app, request).await;
    let workspace_id = created["id"].as_str().unwrap().to_string();

    // A malformed storage URL never reaches the core
    let request = test::TestRequest::post()
        .uri("/api/video")
        .set_json(&json!({
            "uploaderId": user_id,
            "workspaceId": workspace_id,
            "storageUrl": "not a url",
            "metadata": { "title": "clip" }
        }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 400);

    let request = test::TestRequest::post()
        .uri("/api/video")
        .set_json(&json!({
            "uploaderId": user_id,
            "workspaceId": workspace_id,
            "storageUrl": "https://cdn.example.com/clip.mp4",
            "metadata": { "title": "clip", "privacyStatus": "private" }
        }))
        .to_request();
    let submitted: serde_json::Value = test::call_and_read_body_json(&app, request).await;
    let video_id = submitted["id"].as_str().unwrap().to_string();

    let request = test::TestRequest::get()
        .uri(&format!("/api/workspace/videos/{}", workspace_id))
        .to_request();
    let videos: serde_json::Value = test::call_and_read_body_json(&app, request).await;
    let pending = videos["pending"].as_array().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["id"], json!(video_id));
    assert_eq!(videos["uploaded"].as_array().unwrap().len(), 0);

    // Submission by an unknown uploader is denied with no record created
    let request = test::TestRequest::post()
        .uri("/api/video")
        .set_json(&json!({
            "uploaderId": "user-unknown-000001",
            "workspaceId": workspace_id,
            "storageUrl": "https://cdn.example.com/other.mp4",
            "metadata": { "title": "other" }
        }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 404);
}
