// collabsync-service/src/routes/user_routes.rs
use crate::models::{CreateAccountRequest, ServiceError, UserView};
use crate::services::user_service::{self, AccountOutcome};
use crate::utils::validators;
use actix_web::{get, post, web, HttpResponse};
use log::info;
use serde_json::json;

// Create a user account (idempotent)
#[post("/api/user")]
async fn create_account(
    body: web::Json<CreateAccountRequest>,
) -> Result<HttpResponse, ServiceError> {
    let request = body.into_inner();
    validators::validate_id("id", &request.id)?;

    info!("📝 Account creation request for user: {}", request.id);

    match user_service::create_account(request).await? {
        AccountOutcome::Created => Ok(HttpResponse::Created().json(json!({
            "message": "User account created successfully."
        }))),
        AccountOutcome::AlreadyExists => Ok(HttpResponse::Ok().json(json!({
            "message": "User already exists."
        }))),
    }
}

// Get all workspaces a user participates in
#[get("/api/user/workspaces/{creator_id}")]
async fn get_user_workspaces(path: web::Path<String>) -> Result<HttpResponse, ServiceError> {
    let creator_id = path.into_inner();
    validators::validate_id("creatorId", &creator_id)?;

    let workspaces = user_service::get_user_workspaces(&creator_id).await?;

    info!("✅ Found {} workspaces for user: {}", workspaces.len(), creator_id);

    Ok(HttpResponse::Ok().json(json!({ "workspaces": workspaces })))
}

// Get user data by ID. OAuth tokens are never returned.
#[get("/api/user/{id}")]
async fn get_user(path: web::Path<String>) -> Result<HttpResponse, ServiceError> {
    let user_id = path.into_inner();
    validators::validate_id("id", &user_id)?;

    let user = user_service::get_user(&user_id).await?;

    Ok(HttpResponse::Ok().json(UserView::from(user)))
}

// Register all user routes. The workspaces route must come before the
// generic {id} route.
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_account)
        .service(get_user_workspaces)
        .service(get_user);
}
