// collabsync-service/src/services/mod.rs
pub mod authorization;
pub mod user_service;
pub mod video_service;
pub mod workspace_service;
pub mod youtube;
