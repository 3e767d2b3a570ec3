// collabsync-service/src/routes/video_routes.rs
use crate::models::{PublishRequest, ServiceError, SubmitVideoRequest};
use crate::services::video_service;
use crate::services::youtube::YoutubeApi;
use crate::utils::validators;
use actix_web::{get, post, web, HttpResponse};
use log::info;
use serde_json::json;

// Submit a video into a workspace's pending backlog
#[post("/api/video")]
async fn submit_video(body: web::Json<SubmitVideoRequest>) -> Result<HttpResponse, ServiceError> {
    let request = body.into_inner();
    validators::validate_id("uploaderId", &request.uploader_id)?;
    validators::validate_id("workspaceId", &request.workspace_id)?;
    validators::validate_url("storageUrl", &request.storage_url)?;

    info!(
        "📝 Video submission to workspace: {} by user: {}",
        request.workspace_id, request.uploader_id
    );

    let video_id = video_service::submit_video(request).await?;

    Ok(HttpResponse::Ok().json(json!({
        "id": video_id,
        "message": "Video submitted successfully."
    })))
}

// Publish a pending video to the external platform
#[post("/api/video/publish")]
async fn publish_video(body: web::Json<PublishRequest>) -> Result<HttpResponse, ServiceError> {
    let request = body.into_inner();
    validators::validate_id("videoId", &request.video_id)?;
    validators::validate_id("ownerId", &request.owner_id)?;

    info!(
        "🚀 Publish request for video: {} by user: {}",
        request.video_id, request.owner_id
    );

    let platform = YoutubeApi::new()?;
    let data =
        video_service::publish_video(&platform, &request.video_id, &request.owner_id).await?;

    Ok(HttpResponse::Ok().json(json!({ "data": data })))
}

// Get video data by ID
#[get("/api/video/{video_id}")]
async fn get_video(path: web::Path<String>) -> Result<HttpResponse, ServiceError> {
    let video_id = path.into_inner();
    validators::validate_id("videoId", &video_id)?;

    let video = video_service::get_video(&video_id).await?;

    Ok(HttpResponse::Ok().json(video))
}

// Register all video routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(submit_video)
        .service(publish_video)
        .service(get_video);
}
