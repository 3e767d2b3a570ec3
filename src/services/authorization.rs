// collabsync-service/src/services/authorization.rs
//
// Pure role checks. No I/O; every check runs before any persistence or
// external call, and a failed check produces PermissionDenied without any
// partial mutation.
//
// Submission rights are scoped to the workspace: its creator plus the users
// in its editors set. The upstream behavior let any editor-role holder submit
// to any workspace; that was a hole, not a feature.
use crate::models::{User, Workspace};

// A user may submit a video iff they created the workspace or were invited
// into its editors set.
pub fn can_submit_video(user: &User, workspace: &Workspace) -> bool {
    workspace.creator == user.id || workspace.editors.iter().any(|e| e == &user.id)
}

// Workspace creation requires the creator role, i.e. a connected publishing
// account.
pub fn can_create_workspace(user: &User) -> bool {
    user.roles.creator
}

// Approving and publishing a video requires the creator role
pub fn can_approve(user: &User) -> bool {
    user.roles.creator
}

// Only the workspace creator may invite editors
pub fn can_invite_editor(user: &User, workspace: &Workspace) -> bool {
    workspace.creator == user.id
}

// Read access to a workspace's channel data: creator or invited editor
pub fn can_view_channel(user: &User, workspace: &Workspace) -> bool {
    can_submit_video(user, workspace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Roles;
    use chrono::Utc;

    fn user(id: &str, creator: bool, editor: bool) -> User {
        User {
            id: id.to_string(),
            email: format!("{}@example.com", id),
            access_token: creator.then(|| "token".to_string()),
            refresh_token: None,
            expires_at: None,
            roles: Roles { creator, editor },
            workspaces: vec![],
            created_at: Utc::now(),
        }
    }

    fn workspace(creator: &str, editors: &[&str]) -> Workspace {
        Workspace {
            id: "ws-000001".to_string(),
            name: "test".to_string(),
            creator: creator.to_string(),
            channel_id: None,
            editors: editors.iter().map(|e| e.to_string()).collect(),
            pending_videos: vec![],
            uploaded_videos: vec![],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn creator_can_submit_to_own_workspace() {
        let u = user("creator-1", true, false);
        let w = workspace("creator-1", &[]);
        assert!(can_submit_video(&u, &w));
    }

    #[test]
    fn invited_editor_can_submit() {
        let u = user("editor-1", false, true);
        let w = workspace("creator-1", &["editor-1"]);
        assert!(can_submit_video(&u, &w));
    }

    #[test]
    fn uninvited_editor_cannot_submit() {
        // Holding the editor role globally is not enough
        let u = user("editor-2", false, true);
        let w = workspace("creator-1", &["editor-1"]);
        assert!(!can_submit_video(&u, &w));
    }

    #[test]
    fn only_creators_create_workspaces_and_approve() {
        let creator = user("creator-1", true, true);
        let editor = user("editor-1", false, true);
        assert!(can_create_workspace(&creator));
        assert!(!can_create_workspace(&editor));
        assert!(can_approve(&creator));
        assert!(!can_approve(&editor));
    }

    #[test]
    fn only_workspace_creator_invites() {
        let creator = user("creator-1", true, false);
        let editor = user("editor-1", false, true);
        let w = workspace("creator-1", &["editor-1"]);
        assert!(can_invite_editor(&creator, &w));
        assert!(!can_invite_editor(&editor, &w));
    }
}
