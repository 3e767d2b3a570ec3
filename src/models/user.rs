// collabsync-service/src/models/user.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Role claims on a user. A user may hold both; `creator` is granted only when
// OAuth credentials were supplied at account creation, since only someone who
// connected a publishing account can own a channel.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Roles {
    pub creator: bool,
    pub editor: bool,
}

// User entity, stored as a document in the `users` collection.
// Field names match the document layout of the store.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    pub roles: Roles,
    // Workspace ids the user participates in, creator or invited.
    // Grows monotonically via set-union appends.
    pub workspaces: Vec<String>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
}

impl User {
    // OAuth token pair for the external platform, when the user connected one
    pub fn credentials(&self) -> Option<PlatformCredentials> {
        self.access_token.as_ref().map(|token| PlatformCredentials {
            access_token: token.clone(),
            refresh_token: self.refresh_token.clone(),
        })
    }
}

// Per-call credentials handed to the publishing adapter. Never persisted or
// refreshed by the adapter itself.
#[derive(Debug, Clone)]
pub struct PlatformCredentials {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

// Public view of a user, with OAuth tokens withheld
#[derive(Serialize, Deserialize, Debug)]
pub struct UserView {
    pub id: String,
    pub email: String,
    pub roles: Roles,
    pub workspaces: Vec<String>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        UserView {
            id: user.id,
            email: user.email,
            roles: user.roles,
            workspaces: user.workspaces,
            created_at: user.created_at,
        }
    }
}

// Request to create a user account. Token fields arrive snake_cased from the
// OAuth callback handler, unlike the camelCased workspace/video requests.
#[derive(Serialize, Deserialize, Debug)]
pub struct CreateAccountRequest {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}
