// collabsync-service/src/main.rs
use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use collabsync_service::routes::{user_routes, video_routes, workspace_routes};
use collabsync_service::utils::auth_middleware::Authentication;
use collabsync_service::utils::entity_store;
use log::info;
use std::env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let address = env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    entity_store::ensure_collections()?;

    info!("🚀 CollabSync service starting at {}", address);

    HttpServer::new(|| {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .wrap(Authentication)
            .configure(user_routes::init_routes)
            .configure(workspace_routes::init_routes)
            .configure(video_routes::init_routes)
    })
    .bind(address)?
    .run()
    .await
}
