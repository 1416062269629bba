//! End-to-end lifecycle tests for the collaboration services.
//!
//! These exercise the full stack (services over the in-memory stores)
//! through the scenarios the engine exists for: workspace creation, the
//! invite/accept handshake, authorization refusals, per-resource sharing,
//! and expiry, plus the racing-transition guarantees.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use platform_collab::{
    capabilities, CollabError, InvitationService, InvitationStore, MemoryInvitationStore,
    MemoryUserDirectory, MemoryWorkspaceStore, SharedPermissions, SharedResource, UserRecord,
    WorkspaceService, WorkspaceStore,
};
use platform_workspace::{InvitationStatus, InvitedIdentity, WorkspaceRole};

struct TestApp {
    workspaces: Arc<MemoryWorkspaceStore>,
    invitations: Arc<MemoryInvitationStore>,
    directory: Arc<MemoryUserDirectory>,
    workspace_service: WorkspaceService,
    invitation_service: InvitationService,
}

impl TestApp {
    async fn new() -> Self {
        let workspaces = Arc::new(MemoryWorkspaceStore::new());
        let invitations = Arc::new(MemoryInvitationStore::new());
        let directory = Arc::new(MemoryUserDirectory::new());
        Self {
            workspace_service: WorkspaceService::new(
                workspaces.clone(),
                invitations.clone(),
                directory.clone(),
            ),
            invitation_service: InvitationService::new(
                workspaces.clone(),
                invitations.clone(),
                directory.clone(),
            ),
            workspaces,
            invitations,
            directory,
        }
    }

    async fn seed_user(&self, email: &str, username: &str) -> Uuid {
        let id = Uuid::now_v7();
        self.directory
            .insert(UserRecord::new(id, email, username))
            .await;
        id
    }
}

/// A task as the task service would model it, carrying the sharing fields.
struct Task {
    owner_id: Uuid,
    workspace_id: Option<Uuid>,
    is_shared_to_workspace: bool,
    assigned_to: Option<Uuid>,
    shared_permissions: Option<SharedPermissions>,
}

impl SharedResource for Task {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }
    fn workspace_id(&self) -> Option<Uuid> {
        self.workspace_id
    }
    fn is_shared_to_workspace(&self) -> bool {
        self.is_shared_to_workspace
    }
    fn assigned_user_id(&self) -> Option<Uuid> {
        self.assigned_to
    }
    fn shared_permissions(&self) -> Option<&SharedPermissions> {
        self.shared_permissions.as_ref()
    }
}

#[tokio::test]
async fn create_workspace_seeds_owner_membership() {
    let app = TestApp::new().await;
    let u1 = app.seed_user("u1@example.com", "u1").await;

    let workspace = app
        .workspace_service
        .create_workspace("Eng", None, u1)
        .await
        .unwrap();

    assert_eq!(workspace.member_count(), 1);
    let owner = workspace.find_member(u1).unwrap();
    assert_eq!(owner.role, WorkspaceRole::Owner);
    assert!(owner.is_active());
}

#[tokio::test]
async fn invite_and_accept_handshake() {
    let app = TestApp::new().await;
    let u1 = app.seed_user("u1@example.com", "u1").await;
    let u2 = app.seed_user("u2@example.com", "u2").await;

    let workspace = app
        .workspace_service
        .create_workspace("Eng", None, u1)
        .await
        .unwrap();

    let invitation = app
        .invitation_service
        .send_invitation(
            workspace.id,
            u1,
            InvitedIdentity::Email("u2@example.com".into()),
            WorkspaceRole::Editor,
        )
        .await
        .unwrap();

    assert_eq!(invitation.status, InvitationStatus::Pending);
    assert_eq!(invitation.role, WorkspaceRole::Editor);
    let ttl = invitation.expires_at - invitation.created_at;
    assert_eq!(ttl, Duration::days(7));

    let accepted = app
        .invitation_service
        .accept_by_token(&invitation.token, u2)
        .await
        .unwrap();
    assert_eq!(accepted.status, InvitationStatus::Accepted);

    let workspace = app
        .workspace_service
        .get_workspace(workspace.id, u2)
        .await
        .unwrap();
    assert_eq!(workspace.member_count(), 2);
    let member = workspace.find_member(u2).unwrap();
    assert_eq!(member.role, WorkspaceRole::Editor);
    assert!(member.is_active());
}

#[tokio::test]
async fn non_admin_cannot_invite() {
    let app = TestApp::new().await;
    let u1 = app.seed_user("u1@example.com", "u1").await;
    let u3 = app.seed_user("u3@example.com", "u3").await;
    app.seed_user("u4@example.com", "u4").await;

    let workspace = app
        .workspace_service
        .create_workspace("Eng", None, u1)
        .await
        .unwrap();
    app.workspace_service
        .add_member(workspace.id, u1, u3, WorkspaceRole::Viewer)
        .await
        .unwrap();

    let err = app
        .invitation_service
        .send_invitation(
            workspace.id,
            u3,
            InvitedIdentity::Email("u4@example.com".into()),
            WorkspaceRole::Viewer,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CollabError::Forbidden(_)));
}

#[tokio::test]
async fn owner_role_is_immutable_even_to_self() {
    let app = TestApp::new().await;
    let u1 = app.seed_user("u1@example.com", "u1").await;

    let workspace = app
        .workspace_service
        .create_workspace("Eng", None, u1)
        .await
        .unwrap();

    let err = app
        .workspace_service
        .update_member_role(workspace.id, u1, u1, WorkspaceRole::Admin)
        .await
        .unwrap_err();
    assert!(matches!(err, CollabError::Forbidden(_)));
}

#[tokio::test]
async fn shared_task_capabilities_follow_grant_lists() {
    let app = TestApp::new().await;
    let u1 = app.seed_user("u1@example.com", "u1").await;
    let u2 = app.seed_user("u2@example.com", "u2").await;
    let u5 = app.seed_user("u5@example.com", "u5").await;
    let u6 = app.seed_user("u6@example.com", "u6").await;

    let workspace = app
        .workspace_service
        .create_workspace("Eng", None, u1)
        .await
        .unwrap();

    let mut permissions = SharedPermissions::new();
    permissions.grant_view(u2);
    let task = Task {
        owner_id: u5,
        workspace_id: Some(workspace.id),
        is_shared_to_workspace: true,
        assigned_to: None,
        shared_permissions: Some(permissions),
    };

    let u2_caps = capabilities(&task, u2);
    assert!(u2_caps.view);
    assert!(!u2_caps.edit);

    let u6_caps = capabilities(&task, u6);
    assert!(!u6_caps.view);

    let owner_caps = capabilities(&task, u5);
    assert!(owner_caps.view && owner_caps.edit && owner_caps.delete);
}

#[tokio::test]
async fn expired_invitation_rejects_accept_then_sweeps() {
    let app = TestApp::new().await;
    let u1 = app.seed_user("u1@example.com", "u1").await;
    let u2 = app.seed_user("u2@example.com", "u2").await;

    let workspace = app
        .workspace_service
        .create_workspace("Eng", None, u1)
        .await
        .unwrap();
    let invitation = app
        .invitation_service
        .send_invitation(
            workspace.id,
            u1,
            InvitedIdentity::UserId(u2),
            WorkspaceRole::Editor,
        )
        .await
        .unwrap();

    // Eight days pass.
    let mut lapsed = invitation.clone();
    lapsed.expires_at = Utc::now() - Duration::days(1);
    app.invitations.update(lapsed).await.unwrap();

    let err = app
        .invitation_service
        .accept_by_id(invitation.id, u2)
        .await
        .unwrap_err();
    assert!(matches!(err, CollabError::Expired));

    let swept = app
        .invitation_service
        .sweep_expired(Utc::now())
        .await
        .unwrap();
    assert_eq!(swept, 1);

    let stored = app.invitations.get(invitation.id).await.unwrap().unwrap();
    assert_eq!(stored.status, InvitationStatus::Expired);
    assert!(stored.responded_at.is_none());

    // The would-be member never joined.
    let workspace = app
        .workspace_service
        .get_workspace(workspace.id, u1)
        .await
        .unwrap();
    assert_eq!(workspace.member_count(), 1);
}

#[tokio::test]
async fn racing_accepts_produce_exactly_one_membership() {
    let app = TestApp::new().await;
    let u1 = app.seed_user("u1@example.com", "u1").await;
    let u2 = app.seed_user("u2@example.com", "u2").await;

    let workspace = app
        .workspace_service
        .create_workspace("Eng", None, u1)
        .await
        .unwrap();
    let invitation = app
        .invitation_service
        .send_invitation(
            workspace.id,
            u1,
            InvitedIdentity::UserId(u2),
            WorkspaceRole::Editor,
        )
        .await
        .unwrap();

    let (first, second) = tokio::join!(
        app.invitation_service.accept_by_id(invitation.id, u2),
        app.invitation_service.accept_by_id(invitation.id, u2),
    );

    // Exactly one accept wins; the loser fails cleanly without
    // double-adding the member.
    assert!(first.is_ok() != second.is_ok());
    let loser = if first.is_ok() { second } else { first };
    assert!(matches!(
        loser.unwrap_err(),
        CollabError::InvalidState(_) | CollabError::Conflict(_)
    ));

    let workspace = app.workspaces.get(workspace.id).await.unwrap().unwrap();
    assert_eq!(workspace.member_count(), 2);
    assert_eq!(
        workspace
            .members()
            .iter()
            .filter(|m| m.user_id == u2)
            .count(),
        1
    );
}

#[tokio::test]
async fn sweep_racing_decline_applies_one_transition() {
    let app = TestApp::new().await;
    let u1 = app.seed_user("u1@example.com", "u1").await;
    let u2 = app.seed_user("u2@example.com", "u2").await;

    let workspace = app
        .workspace_service
        .create_workspace("Eng", None, u1)
        .await
        .unwrap();
    let invitation = app
        .invitation_service
        .send_invitation(
            workspace.id,
            u1,
            InvitedIdentity::UserId(u2),
            WorkspaceRole::Viewer,
        )
        .await
        .unwrap();

    let declined = app
        .invitation_service
        .decline_by_id(invitation.id, u2)
        .await
        .unwrap();
    assert_eq!(declined.status, InvitationStatus::Declined);

    // A sweep running after (or concurrently with) the decline must not
    // overwrite the terminal state.
    let swept = app
        .invitation_service
        .sweep_expired(Utc::now() + Duration::days(30))
        .await
        .unwrap();
    assert_eq!(swept, 0);

    let stored = app.invitations.get(invitation.id).await.unwrap().unwrap();
    assert_eq!(stored.status, InvitationStatus::Declined);
}

#[tokio::test]
async fn concurrent_member_adds_converge() {
    let app = TestApp::new().await;
    let u1 = app.seed_user("u1@example.com", "u1").await;
    let u2 = app.seed_user("u2@example.com", "u2").await;

    let workspace = app
        .workspace_service
        .create_workspace("Eng", None, u1)
        .await
        .unwrap();

    let (first, second) = tokio::join!(
        app.workspace_service
            .add_member(workspace.id, u1, u2, WorkspaceRole::Editor),
        app.workspace_service
            .add_member(workspace.id, u1, u2, WorkspaceRole::Editor),
    );
    assert!(first.is_ok());
    assert!(second.is_ok());

    let workspace = app.workspaces.get(workspace.id).await.unwrap().unwrap();
    assert_eq!(
        workspace
            .members()
            .iter()
            .filter(|m| m.user_id == u2)
            .count(),
        1
    );
}

#[tokio::test]
async fn deleting_workspace_cascades_invitations() {
    let app = TestApp::new().await;
    let u1 = app.seed_user("u1@example.com", "u1").await;
    let u2 = app.seed_user("u2@example.com", "u2").await;

    let workspace = app
        .workspace_service
        .create_workspace("Eng", None, u1)
        .await
        .unwrap();
    let invitation = app
        .invitation_service
        .send_invitation(
            workspace.id,
            u1,
            InvitedIdentity::UserId(u2),
            WorkspaceRole::Viewer,
        )
        .await
        .unwrap();

    app.workspace_service
        .delete_workspace(workspace.id, u1)
        .await
        .unwrap();

    assert!(app.invitations.get(invitation.id).await.unwrap().is_none());
    let err = app
        .invitation_service
        .get_by_token(&invitation.token)
        .await
        .unwrap_err();
    assert!(matches!(err, CollabError::NotFound(_)));
}

#[tokio::test]
async fn accepted_invitation_never_returns_to_pending_without_resend() {
    let app = TestApp::new().await;
    let u1 = app.seed_user("u1@example.com", "u1").await;
    let u2 = app.seed_user("u2@example.com", "u2").await;

    let workspace = app
        .workspace_service
        .create_workspace("Eng", None, u1)
        .await
        .unwrap();
    let invitation = app
        .invitation_service
        .send_invitation(
            workspace.id,
            u1,
            InvitedIdentity::UserId(u2),
            WorkspaceRole::Viewer,
        )
        .await
        .unwrap();

    app.invitation_service
        .accept_by_id(invitation.id, u2)
        .await
        .unwrap();

    // Neither a sweep nor a late decline can move it.
    app.invitation_service
        .sweep_expired(Utc::now() + Duration::days(30))
        .await
        .unwrap();
    let err = app
        .invitation_service
        .decline_by_id(invitation.id, u2)
        .await
        .unwrap_err();
    assert!(matches!(err, CollabError::InvalidState(_)));

    let stored = app.invitations.get(invitation.id).await.unwrap().unwrap();
    assert_eq!(stored.status, InvitationStatus::Accepted);

    // An explicit resend is the one sanctioned way back to Pending.
    let resent = app
        .invitation_service
        .resend(invitation.id, u1)
        .await
        .unwrap();
    assert_eq!(resent.status, InvitationStatus::Pending);
}

#[tokio::test]
async fn personal_task_is_owner_only() {
    let app = TestApp::new().await;
    let u1 = app.seed_user("u1@example.com", "u1").await;
    let u2 = app.seed_user("u2@example.com", "u2").await;

    let task = Task {
        owner_id: u1,
        workspace_id: None,
        is_shared_to_workspace: false,
        assigned_to: None,
        shared_permissions: None,
    };

    assert!(capabilities(&task, u1).delete);
    let stranger = capabilities(&task, u2);
    assert!(!stranger.view && !stranger.edit && !stranger.delete);
}
