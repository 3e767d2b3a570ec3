// collabsync-service/src/routes/mod.rs
pub mod user_routes;
pub mod video_routes;
pub mod workspace_routes;
