// collabsync-service/src/routes/workspace_routes.rs
use crate::models::{AddEditorRequest, ChannelRequest, CreateWorkspaceRequest, ServiceError};
use crate::services::workspace_service;
use crate::services::youtube::YoutubeApi;
use crate::utils::validators;
use actix_web::{get, post, web, HttpResponse};
use log::info;
use serde_json::json;

// Create a new workspace
#[post("/api/workspace")]
async fn create_workspace(
    body: web::Json<CreateWorkspaceRequest>,
) -> Result<HttpResponse, ServiceError> {
    let request = body.into_inner();
    validators::validate_id("userId", &request.user_id)?;

    info!(
        "📝 Creating workspace: {} for user: {}",
        request.workspace_name, request.user_id
    );

    let platform = YoutubeApi::new()?;
    let workspace_id = workspace_service::create_workspace(
        &platform,
        &request.user_id,
        &request.workspace_name,
        request.channel_id,
    )
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "id": workspace_id,
        "message": "Workspace created successfully."
    })))
}

// Get the pending/uploaded video partition of a workspace
#[get("/api/workspace/videos/{workspace_id}")]
async fn get_workspace_videos(path: web::Path<String>) -> Result<HttpResponse, ServiceError> {
    let workspace_id = path.into_inner();
    validators::validate_id("workspaceId", &workspace_id)?;

    let videos = workspace_service::list_videos(&workspace_id).await?;

    Ok(HttpResponse::Ok().json(videos))
}

// Invite an editor into a workspace
#[post("/api/workspace/{workspace_id}/editors")]
async fn add_editor(
    path: web::Path<String>,
    body: web::Json<AddEditorRequest>,
) -> Result<HttpResponse, ServiceError> {
    let workspace_id = path.into_inner();
    let request = body.into_inner();
    validators::validate_id("workspaceId", &workspace_id)?;
    validators::validate_id("editorId", &request.editor_id)?;

    workspace_service::add_editor(&workspace_id, &request.user_id, &request.editor_id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Editor invited successfully.",
        "workspaceId": workspace_id,
        "editorId": request.editor_id
    })))
}

// Channel info for the workspace's bound channel
#[post("/api/workspace/channel")]
async fn get_channel(body: web::Json<ChannelRequest>) -> Result<HttpResponse, ServiceError> {
    let request = body.into_inner();
    validators::validate_id("userId", &request.user_id)?;
    validators::validate_id("workspaceId", &request.workspace_id)?;

    let platform = YoutubeApi::new()?;
    let data =
        workspace_service::get_channel(&platform, &request.user_id, &request.workspace_id).await?;

    Ok(HttpResponse::Ok().json(json!({ "data": data })))
}

// Channel analytics time series
#[post("/api/workspace/channel-analytics")]
async fn get_channel_analytics(
    body: web::Json<ChannelRequest>,
) -> Result<HttpResponse, ServiceError> {
    let request = body.into_inner();
    validators::validate_id("userId", &request.user_id)?;
    validators::validate_id("workspaceId", &request.workspace_id)?;

    let platform = YoutubeApi::new()?;
    let data = workspace_service::get_channel_analytics(
        &platform,
        &request.user_id,
        &request.workspace_id,
        request.start_date.as_deref(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(json!({ "data": data })))
}

// Best-performing videos of the bound channel
#[post("/api/workspace/channel-bestvideos")]
async fn get_best_videos(body: web::Json<ChannelRequest>) -> Result<HttpResponse, ServiceError> {
    let request = body.into_inner();
    validators::validate_id("userId", &request.user_id)?;
    validators::validate_id("workspaceId", &request.workspace_id)?;

    let platform = YoutubeApi::new()?;
    let data = workspace_service::get_best_videos(
        &platform,
        &request.user_id,
        &request.workspace_id,
        request.max_results,
    )
    .await?;

    Ok(HttpResponse::Ok().json(json!({ "data": data })))
}

// Get workspace data by ID
#[get("/api/workspace/{workspace_id}")]
async fn get_workspace(path: web::Path<String>) -> Result<HttpResponse, ServiceError> {
    let workspace_id = path.into_inner();
    validators::validate_id("workspaceId", &workspace_id)?;

    let workspace = workspace_service::get_workspace(&workspace_id).await?;

    Ok(HttpResponse::Ok().json(workspace))
}

// Register all workspace routes. The fixed-path routes must come before the
// generic {workspace_id} route.
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_workspace)
        .service(get_workspace_videos)
        .service(add_editor)
        .service(get_channel)
        .service(get_channel_analytics)
        .service(get_best_videos)
        .service(get_workspace);
}
