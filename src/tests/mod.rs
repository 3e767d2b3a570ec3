mod routes_tests;
mod store_tests;

use crate::models::{CreateAccountRequest, PlatformCredentials, ServiceError, VideoMetadata};
use crate::services::user_service;
use crate::services::youtube::PublishingPlatform;
use serde_json::{json, Map, Value};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

// Stub publishing platform with a call log. Never touches the network.
pub struct StubPlatform {
    pub publish_calls: Arc<Mutex<Vec<String>>>,
    pub fail_publish: bool,
    // Store file removed right after a successful upload, to exercise the
    // window between external acknowledgment and the local record update
    pub remove_after_upload: Option<String>,
}

impl StubPlatform {
    pub fn new() -> Self {
        Self {
            publish_calls: Arc::new(Mutex::new(Vec::new())),
            fail_publish: false,
            remove_after_upload: None,
        }
    }

    pub fn failing() -> Self {
        Self {
            publish_calls: Arc::new(Mutex::new(Vec::new())),
            fail_publish: true,
            remove_after_upload: None,
        }
    }

    pub fn removing_after_upload(path: String) -> Self {
        Self {
            publish_calls: Arc::new(Mutex::new(Vec::new())),
            fail_publish: false,
            remove_after_upload: Some(path),
        }
    }

    pub fn publish_count(&self) -> usize {
        self.publish_calls.lock().unwrap().len()
    }
}

impl PublishingPlatform for StubPlatform {
    async fn publish(
        &self,
        _creds: &PlatformCredentials,
        metadata: &VideoMetadata,
        media_url: &str,
    ) -> Result<Value, ServiceError> {
        self.publish_calls.lock().unwrap().push(media_url.to_string());

        if self.fail_publish {
            return Err(ServiceError::PublishFailed(
                "stub platform rejected the upload".to_string(),
            ));
        }

        if let Some(path) = &self.remove_after_upload {
            let _ = std::fs::remove_file(path);
        }

        Ok(json!({
            "id": "yt-stub-video",
            "snippet": { "title": metadata.title }
        }))
    }

    async fn fetch_channel(
        &self,
        _creds: &PlatformCredentials,
        channel_id: &str,
    ) -> Result<Value, ServiceError> {
        Ok(json!({ "items": [{ "id": channel_id }] }))
    }

    async fn fetch_analytics(
        &self,
        _creds: &PlatformCredentials,
        channel_id: &str,
        _start_date: Option<&str>,
    ) -> Result<Value, ServiceError> {
        Ok(json!({ "rows": [], "channel": channel_id }))
    }

    async fn fetch_top_videos(
        &self,
        _creds: &PlatformCredentials,
        _channel_id: &str,
        _max_results: u32,
    ) -> Result<Value, ServiceError> {
        Ok(json!({ "items": [] }))
    }

    async fn resolve_own_channel(
        &self,
        _creds: &PlatformCredentials,
    ) -> Result<Option<String>, ServiceError> {
        Ok(Some("UC-stub-channel".to_string()))
    }
}

// Create a user through the service, with or without platform credentials
pub async fn create_test_user(with_credentials: bool) -> String {
    let user_id = format!("user-{}", Uuid::new_v4());
    let request = CreateAccountRequest {
        id: user_id.clone(),
        email: format!("{}@example.com", user_id),
        access_token: with_credentials.then(|| "test-access-token".to_string()),
        refresh_token: with_credentials.then(|| "test-refresh-token".to_string()),
        expires_at: None,
    };

    user_service::create_account(request).await.unwrap();
    user_id
}

pub fn test_metadata(title: &str) -> VideoMetadata {
    VideoMetadata {
        title: title.to_string(),
        description: Some("made in a test".to_string()),
        tags: Some(vec!["test".to_string()]),
        privacy_status: Some("private".to_string()),
        author: None,
        format: None,
        extra: Map::new(),
    }
}
