// collabsync-service/src/services/user_service.rs
use crate::models::{CreateAccountRequest, Roles, ServiceError, User};
use crate::utils::entity_store::{self, USERS, WORKSPACES};
use chrono::Utc;
use futures::future::join_all;
use log::{info, warn};
use serde_json::Value;

// Outcome of account creation. Creation is idempotent: re-creating an
// existing id is a no-op reported as `AlreadyExists`.
#[derive(Debug, PartialEq, Eq)]
pub enum AccountOutcome {
    Created,
    AlreadyExists,
}

// Create a user account. The creator role is granted only when an access
// token was supplied, i.e. the user connected a publishing account.
//
// Idempotency rides on the store's create-once check rather than a lookup
// beforehand, so two racing creations for the same id both succeed: one
// creates, the loser observes the existing record.
pub async fn create_account(req: CreateAccountRequest) -> Result<AccountOutcome, ServiceError> {
    let user = User {
        id: req.id.clone(),
        email: req.email,
        roles: Roles {
            creator: req.access_token.is_some(),
            editor: true,
        },
        access_token: req.access_token,
        refresh_token: req.refresh_token,
        expires_at: req.expires_at,
        workspaces: Vec::new(),
        created_at: Utc::now(),
    };

    match entity_store::create_doc(USERS, Some(&user.id), &user).await {
        Ok(_) => {
            info!("✅ User account created: {}", user.id);
            Ok(AccountOutcome::Created)
        }
        Err(ServiceError::Validation(_)) => {
            info!("👤 User already exists: {}", user.id);
            Ok(AccountOutcome::AlreadyExists)
        }
        Err(e) => Err(e),
    }
}

// Fetch a user by id
pub async fn get_user(user_id: &str) -> Result<User, ServiceError> {
    entity_store::fetch_doc(USERS, user_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("user {}", user_id)))
}

// Resolve all workspaces a user participates in. The lookups are independent
// and run concurrently; a dangling workspace id is logged and dropped rather
// than failing the whole read.
pub async fn get_user_workspaces(user_id: &str) -> Result<Vec<Value>, ServiceError> {
    let user = get_user(user_id).await?;

    let lookups = user
        .workspaces
        .iter()
        .map(|workspace_id| async move {
            match entity_store::fetch_doc::<Value>(WORKSPACES, workspace_id).await {
                Ok(Some(doc)) => Some(doc),
                Ok(None) => {
                    warn!(
                        "⚠️ User {} references missing workspace {}",
                        user_id, workspace_id
                    );
                    None
                }
                Err(e) => {
                    warn!("⚠️ Failed to load workspace {}: {}", workspace_id, e);
                    None
                }
            }
        })
        .collect::<Vec<_>>();

    Ok(join_all(lookups).await.into_iter().flatten().collect())
}
