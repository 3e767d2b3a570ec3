// collabsync-service/src/models/workspace.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Workspace entity, stored as a document in the `workspaces` collection.
//
// `pending_videos` and `uploaded_videos` are a query-time index over the
// videos linked to this workspace, partitioned by lifecycle state. The
// authoritative state lives on each Video record; the lifecycle manager keeps
// the index in step. The two arrays are disjoint at every observable point.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Workspace {
    pub id: String,
    pub name: String,
    // User id of the creator, immutable after creation
    pub creator: String,
    // External platform channel bound at creation time, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    // User ids granted submission rights, grown via set-union appends
    pub editors: Vec<String>,
    pub pending_videos: Vec<String>,
    pub uploaded_videos: Vec<String>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
}

// Request to create a workspace
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkspaceRequest {
    pub user_id: String,
    pub workspace_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
}

// Request to invite an editor into a workspace
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddEditorRequest {
    pub user_id: String,
    pub editor_id: String,
}

// Request for the channel info / analytics / best-videos routes
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChannelRequest {
    pub user_id: String,
    pub workspace_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
}
