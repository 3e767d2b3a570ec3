// collabsync-service/src/models/video.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Lifecycle state of a video. `Published` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoStatus {
    #[serde(rename = "submitted")]
    Submitted,
    #[serde(rename = "published")]
    Published,
}

// Metadata forwarded to the publishing platform. `extra` keeps the free-form
// author/format fields clients attach without a schema migration.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VideoMetadata {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(rename = "privacyStatus", skip_serializing_if = "Option::is_none")]
    pub privacy_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// Video entity, stored as a document in the `videos` collection.
// `status` is the authoritative lifecycle state; the owning workspace's
// pending/uploaded arrays are the derived index.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Video {
    pub id: String,
    // User id of the submitter
    pub uploader: String,
    // Owning workspace, immutable after creation
    pub workspace_id: String,
    // Opaque locator for the stored media; the service never touches bytes
    pub storage_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub metadata: VideoMetadata,
    // User id of the creator who published the video
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approver: Option<String>,
    pub status: VideoStatus,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
}

// Request to submit a video into a workspace
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SubmitVideoRequest {
    pub uploader_id: String,
    pub workspace_id: String,
    pub storage_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub metadata: VideoMetadata,
}

// Request to publish a pending video to the external platform
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    pub video_id: String,
    pub owner_id: String,
}
