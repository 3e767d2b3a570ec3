// collabsync-service/src/services/workspace_service.rs
use crate::models::{PlatformCredentials, ServiceError, User, Video, Workspace};
use crate::services::authorization;
use crate::services::youtube::PublishingPlatform;
use crate::utils::entity_store::{self, USERS, VIDEOS, WORKSPACES};
use chrono::Utc;
use futures::future::join_all;
use log::{error, info, warn};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

// Pending/uploaded partition of a workspace's videos
#[derive(Serialize, Debug, Default)]
pub struct WorkspaceVideos {
    pub pending: Vec<Video>,
    pub uploaded: Vec<Video>,
}

// Create a workspace owned by `user_id`.
//
// Channel binding is best-effort: an explicit `channel_id` wins; otherwise,
// when the creator has platform credentials, their own channel is looked up.
// A failed lookup is logged and the workspace is created without a binding,
// never half-initialized.
pub async fn create_workspace<P: PublishingPlatform>(
    platform: &P,
    user_id: &str,
    name: &str,
    channel_id: Option<String>,
) -> Result<String, ServiceError> {
    let user: User = entity_store::fetch_doc(USERS, user_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("user {}", user_id)))?;

    if !authorization::can_create_workspace(&user) {
        return Err(ServiceError::PermissionDenied(
            "only creators can create workspaces".to_string(),
        ));
    }

    let channel_id = match channel_id {
        Some(id) => Some(id),
        None => match user.credentials() {
            Some(creds) => match platform.resolve_own_channel(&creds).await {
                Ok(resolved) => resolved,
                Err(e) => {
                    warn!("⚠️ Channel resolution failed for user {}: {}", user_id, e);
                    None
                }
            },
            None => None,
        },
    };

    let workspace = Workspace {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        creator: user_id.to_string(),
        channel_id,
        editors: Vec::new(),
        pending_videos: Vec::new(),
        uploaded_videos: Vec::new(),
        created_at: Utc::now(),
    };

    entity_store::create_doc(WORKSPACES, Some(&workspace.id), &workspace).await?;

    // Link the workspace onto the creator. A failure here leaves an orphaned
    // workspace document, which is a fatal inconsistency, not a retry case.
    entity_store::union_append(USERS, user_id, "workspaces", &workspace.id)
        .await
        .map_err(|e| {
            error!(
                "❌ Workspace {} created but not linked to user {}: {}",
                workspace.id, user_id, e
            );
            ServiceError::StoreInconsistency(format!(
                "workspace {} created but not linked to user {}",
                workspace.id, user_id
            ))
        })?;

    info!("✅ Workspace created: {} for user: {}", workspace.id, user_id);
    Ok(workspace.id)
}

// Fetch a workspace by id
pub async fn get_workspace(workspace_id: &str) -> Result<Workspace, ServiceError> {
    entity_store::fetch_doc(WORKSPACES, workspace_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("workspace {}", workspace_id)))
}

// Invite an editor into a workspace. Append-only on both sides: the editor id
// joins the workspace's editors set and the workspace id joins the editor's
// workspaces set.
pub async fn add_editor(
    workspace_id: &str,
    user_id: &str,
    editor_id: &str,
) -> Result<(), ServiceError> {
    let user: User = entity_store::fetch_doc(USERS, user_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("user {}", user_id)))?;
    let workspace = get_workspace(workspace_id).await?;

    if !authorization::can_invite_editor(&user, &workspace) {
        return Err(ServiceError::PermissionDenied(
            "only the workspace creator can invite editors".to_string(),
        ));
    }

    if entity_store::fetch_doc::<User>(USERS, editor_id).await?.is_none() {
        return Err(ServiceError::NotFound(format!("user {}", editor_id)));
    }

    entity_store::union_append(WORKSPACES, workspace_id, "editors", editor_id).await?;
    entity_store::union_append(USERS, editor_id, "workspaces", workspace_id)
        .await
        .map_err(|e| {
            error!(
                "❌ Editor {} added to workspace {} but workspace not linked back: {}",
                editor_id, workspace_id, e
            );
            ServiceError::StoreInconsistency(format!(
                "editor {} granted on workspace {} but user record not updated",
                editor_id, workspace_id
            ))
        })?;

    info!("✅ Editor {} invited to workspace {}", editor_id, workspace_id);
    Ok(())
}

// Fan out independent lookups for every video linked to the workspace.
// All lookups run concurrently; a dangling id is logged and dropped so a
// single bad reference cannot fail the whole listing.
pub async fn list_videos(workspace_id: &str) -> Result<WorkspaceVideos, ServiceError> {
    let workspace = get_workspace(workspace_id).await?;

    let pending = fetch_videos(&workspace.pending_videos).await;
    let uploaded = fetch_videos(&workspace.uploaded_videos).await;

    Ok(WorkspaceVideos { pending, uploaded })
}

async fn fetch_videos(ids: &[String]) -> Vec<Video> {
    let lookups = ids
        .iter()
        .map(|video_id| async move {
            match entity_store::fetch_doc::<Video>(VIDEOS, video_id).await {
                Ok(Some(video)) => Some(video),
                Ok(None) => {
                    warn!("⚠️ Dangling video reference: {}", video_id);
                    None
                }
                Err(e) => {
                    warn!("⚠️ Failed to load video {}: {}", video_id, e);
                    None
                }
            }
        })
        .collect::<Vec<_>>();

    join_all(lookups).await.into_iter().flatten().collect()
}

// Resolve the workspace's bound channel and the credentials of its owning
// user. Pure credential resolution; no local state changes.
async fn with_channel_credentials(
    requester_id: &str,
    workspace_id: &str,
) -> Result<(PlatformCredentials, String), ServiceError> {
    let requester: User = entity_store::fetch_doc(USERS, requester_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("user {}", requester_id)))?;
    let workspace = get_workspace(workspace_id).await?;

    if !authorization::can_view_channel(&requester, &workspace) {
        return Err(ServiceError::PermissionDenied(
            "no access to this workspace's channel".to_string(),
        ));
    }

    let channel_id = workspace.channel_id.clone().ok_or_else(|| {
        ServiceError::Validation(format!("workspace {} has no bound channel", workspace_id))
    })?;

    let owner: User = entity_store::fetch_doc(USERS, &workspace.creator)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("user {}", workspace.creator)))?;

    let creds = owner.credentials().ok_or_else(|| {
        ServiceError::Validation(format!(
            "workspace owner {} has no platform credentials",
            workspace.creator
        ))
    })?;

    Ok((creds, channel_id))
}

// Channel info for the workspace's bound channel
pub async fn get_channel<P: PublishingPlatform>(
    platform: &P,
    requester_id: &str,
    workspace_id: &str,
) -> Result<Value, ServiceError> {
    let (creds, channel_id) = with_channel_credentials(requester_id, workspace_id).await?;
    platform.fetch_channel(&creds, &channel_id).await
}

// Channel analytics time series
pub async fn get_channel_analytics<P: PublishingPlatform>(
    platform: &P,
    requester_id: &str,
    workspace_id: &str,
    start_date: Option<&str>,
) -> Result<Value, ServiceError> {
    let (creds, channel_id) = with_channel_credentials(requester_id, workspace_id).await?;
    platform.fetch_analytics(&creds, &channel_id, start_date).await
}

// Best-performing videos of the bound channel
pub async fn get_best_videos<P: PublishingPlatform>(
    platform: &P,
    requester_id: &str,
    workspace_id: &str,
    max_results: Option<u32>,
) -> Result<Value, ServiceError> {
    let (creds, channel_id) = with_channel_credentials(requester_id, workspace_id).await?;
    platform
        .fetch_top_videos(&creds, &channel_id, max_results.unwrap_or(10))
        .await
}
