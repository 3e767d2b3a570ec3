// collabsync-service/src/services/video_service.rs
//
// Video lifecycle: Submitted -> Published, nothing else. A video record and
// its link into the owning workspace's pending index are a single logical
// step; publish only touches local state after the platform acknowledged the
// upload, so no id ever reaches the uploaded index without a successful
// publish.
use crate::models::{ServiceError, SubmitVideoRequest, User, Video, VideoStatus, Workspace};
use crate::services::authorization;
use crate::services::youtube::PublishingPlatform;
use crate::utils::entity_store::{self, USERS, VIDEOS, WORKSPACES};
use chrono::Utc;
use log::{error, info};
use serde_json::{json, Value};
use uuid::Uuid;

// Submit a video into a workspace's pending backlog.
// Returns the new video id.
pub async fn submit_video(req: SubmitVideoRequest) -> Result<String, ServiceError> {
    let uploader: User = entity_store::fetch_doc(USERS, &req.uploader_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("user {}", req.uploader_id)))?;
    let workspace: Workspace = entity_store::fetch_doc(WORKSPACES, &req.workspace_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("workspace {}", req.workspace_id)))?;

    if !authorization::can_submit_video(&uploader, &workspace) {
        return Err(ServiceError::PermissionDenied(
            "no submission rights on this workspace".to_string(),
        ));
    }

    let video = Video {
        id: Uuid::new_v4().to_string(),
        uploader: req.uploader_id,
        workspace_id: req.workspace_id,
        storage_url: req.storage_url,
        thumbnail_url: req.thumbnail_url,
        metadata: req.metadata,
        approver: None,
        status: VideoStatus::Submitted,
        created_at: Utc::now(),
    };

    entity_store::create_doc(VIDEOS, Some(&video.id), &video).await?;

    // Link into the pending index. The set-union append is idempotent and
    // commutes, so concurrent submissions to the same workspace never
    // overwrite each other. If the append fails after the create succeeded,
    // the video is orphaned: fatal, surfaced, never retried with a duplicate
    // create.
    entity_store::union_append(WORKSPACES, &video.workspace_id, "pending_videos", &video.id)
        .await
        .map_err(|e| {
            error!(
                "❌ Video {} created but not linked to workspace {}: {}",
                video.id, video.workspace_id, e
            );
            ServiceError::StoreInconsistency(format!(
                "video {} created but not linked to workspace {}",
                video.id, video.workspace_id
            ))
        })?;

    info!(
        "✅ Video {} submitted to workspace {} by {}",
        video.id, video.workspace_id, video.uploader
    );
    Ok(video.id)
}

// Fetch a video by id
pub async fn get_video(video_id: &str) -> Result<Video, ServiceError> {
    entity_store::fetch_doc(VIDEOS, video_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("video {}", video_id)))
}

// Publish a pending video to the external platform on behalf of `owner_id`.
//
// Order matters: authorize, call the platform, and only then mutate local
// state. An adapter failure propagates as-is and leaves the video Submitted.
// The platform call is at-most-once; a caller re-issuing the request after a
// lost acknowledgment accepts the risk of a duplicate external artifact. Two
// publishes racing past the terminal-state check below share the same
// accepted risk: the check is a read, not a reservation.
pub async fn publish_video<P: PublishingPlatform>(
    platform: &P,
    video_id: &str,
    owner_id: &str,
) -> Result<Value, ServiceError> {
    let video = get_video(video_id).await?;
    let owner: User = entity_store::fetch_doc(USERS, owner_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("user {}", owner_id)))?;

    if !authorization::can_approve(&owner) {
        return Err(ServiceError::PermissionDenied(
            "only creators can publish videos".to_string(),
        ));
    }

    // Published is terminal
    if video.status == VideoStatus::Published {
        return Err(ServiceError::Validation(format!(
            "video {} is already published",
            video.id
        )));
    }

    let creds = owner.credentials().ok_or_else(|| {
        ServiceError::PublishFailed(format!("user {} has no platform credentials", owner_id))
    })?;

    let platform_data = platform
        .publish(&creds, &video.metadata, &video.storage_url)
        .await?;

    // The platform acknowledged: flip the record, then move the index entry.
    // Status and approver land in one locked write; any failure past this
    // point leaves an acknowledged upload behind a stale local record, which
    // must reach an operator as an inconsistency, never as a generic error.
    entity_store::update_fields(
        VIDEOS,
        &video.id,
        vec![("status", json!("published")), ("approver", json!(owner_id))],
    )
    .await
    .map_err(|e| {
        error!(
            "❌ Video {} uploaded but record not flipped to published: {}",
            video.id, e
        );
        ServiceError::StoreInconsistency(format!(
            "video {} uploaded but record not flipped to published",
            video.id
        ))
    })?;

    entity_store::move_between_sets(
        WORKSPACES,
        &video.workspace_id,
        "pending_videos",
        "uploaded_videos",
        &video.id,
    )
    .await
    .map_err(|e| {
        error!(
            "❌ Video {} published but workspace {} index not moved: {}",
            video.id, video.workspace_id, e
        );
        ServiceError::StoreInconsistency(format!(
            "video {} published but workspace {} index not updated",
            video.id, video.workspace_id
        ))
    })?;

    info!(
        "✅ Video {} published from workspace {} by {}",
        video.id, video.workspace_id, owner_id
    );
    Ok(platform_data)
}
