//! Invitation orchestration service
//!
//! Drives the invitation state machine end to end: sending, responding,
//! cancelling, resending, and sweeping expired records. Accepting an
//! invitation mutates a second aggregate (the workspace), so it runs as an
//! explicit two-step transaction with a compensating rollback; the
//! compare-and-set contract of the invitation store is the serialization
//! point that keeps racing transitions from double-applying.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{CollabError, CollabResult};
use crate::store::{InvitationStore, UserDirectory, UserRecord, WorkspaceStore};
use platform_workspace::{
    InvitedIdentity, Workspace, WorkspaceInvitation, WorkspaceRole,
};

/// Orchestrates the invitation lifecycle for workspaces.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use uuid::Uuid;
/// use platform_collab::{
///     InvitationService, MemoryInvitationStore, MemoryUserDirectory, MemoryWorkspaceStore,
/// };
/// use platform_workspace::{InvitedIdentity, WorkspaceRole};
///
/// # async fn example(workspace_id: uuid::Uuid, owner_id: uuid::Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let service = InvitationService::new(
///     Arc::new(MemoryWorkspaceStore::new()),
///     Arc::new(MemoryInvitationStore::new()),
///     Arc::new(MemoryUserDirectory::new()),
/// );
///
/// let invitation = service
///     .send_invitation(
///         workspace_id,
///         owner_id,
///         InvitedIdentity::Email("dev@example.com".into()),
///         WorkspaceRole::Editor,
///     )
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct InvitationService {
    workspaces: Arc<dyn WorkspaceStore>,
    invitations: Arc<dyn InvitationStore>,
    users: Arc<dyn UserDirectory>,
}

impl InvitationService {
    /// Create a new invitation service over the given stores.
    pub fn new(
        workspaces: Arc<dyn WorkspaceStore>,
        invitations: Arc<dyn InvitationStore>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            workspaces,
            invitations,
            users,
        }
    }

    async fn load_workspace(&self, workspace_id: Uuid) -> CollabResult<Workspace> {
        self.workspaces
            .get(workspace_id)
            .await?
            .ok_or(CollabError::NotFound("workspace"))
    }

    async fn load_invitation(&self, invitation_id: Uuid) -> CollabResult<WorkspaceInvitation> {
        self.invitations
            .get(invitation_id)
            .await?
            .ok_or(CollabError::NotFound("invitation"))
    }

    async fn resolve_identity(
        &self,
        identity: &InvitedIdentity,
    ) -> CollabResult<Option<UserRecord>> {
        match identity {
            InvitedIdentity::Email(email) => self.users.find_by_email(email).await,
            InvitedIdentity::Username(username) => self.users.find_by_username(username).await,
            InvitedIdentity::UserId(user_id) => self.users.find_by_id(*user_id).await,
        }
    }

    /// Send an invitation to join a workspace.
    ///
    /// Preconditions, checked in order against freshly loaded state:
    /// - the role is grantable (never Owner), regardless of who asks
    /// - the inviter holds admin privileges on the workspace
    /// - the target identity resolves to a known user
    /// - the target is not already a member
    /// - no pending invitation already addresses the target here
    ///
    /// # Errors
    ///
    /// `InvalidArgument`, `Forbidden`, `NotFound`, or `Conflict` per the
    /// failed precondition.
    pub async fn send_invitation(
        &self,
        workspace_id: Uuid,
        inviter_id: Uuid,
        identity: InvitedIdentity,
        role: WorkspaceRole,
    ) -> CollabResult<WorkspaceInvitation> {
        if !role.is_grantable() {
            return Err(CollabError::InvalidArgument(format!(
                "role '{}' cannot be granted through an invitation",
                role.as_str()
            )));
        }

        let workspace = self.load_workspace(workspace_id).await?;
        if !workspace.has_admin_role(inviter_id) {
            return Err(CollabError::Forbidden(
                "admin privileges required to invite members",
            ));
        }

        let user = self
            .resolve_identity(&identity)
            .await?
            .ok_or(CollabError::NotFound("user"))?;

        if workspace.find_member(user.id).is_some() {
            return Err(CollabError::Conflict(
                "user is already a member of this workspace",
            ));
        }

        let now = Utc::now();
        if self
            .invitations
            .find_pending_for_identity(workspace_id, &user, now)
            .await?
            .is_some()
        {
            return Err(CollabError::Conflict(
                "a pending invitation already exists for this user",
            ));
        }

        let invitation = WorkspaceInvitation::new(workspace_id, inviter_id, identity, role)?;
        let invitation = self.invitations.create(invitation).await?;
        tracing::debug!(
            invitation_id = %invitation.id,
            workspace_id = %workspace_id,
            role = invitation.role.as_str(),
            "Invitation sent"
        );
        Ok(invitation)
    }

    /// All invitations for a workspace, any status. Admin-gated.
    pub async fn list_for_workspace(
        &self,
        workspace_id: Uuid,
        requester_id: Uuid,
    ) -> CollabResult<Vec<WorkspaceInvitation>> {
        let workspace = self.load_workspace(workspace_id).await?;
        if !workspace.has_admin_role(requester_id) {
            return Err(CollabError::Forbidden(
                "admin privileges required to list invitations",
            ));
        }
        self.invitations.list_for_workspace(workspace_id).await
    }

    /// All pending, unexpired invitations addressed to a user.
    pub async fn list_pending_for_user(
        &self,
        user_id: Uuid,
    ) -> CollabResult<Vec<WorkspaceInvitation>> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(CollabError::NotFound("user"))?;
        self.invitations.list_pending_for_user(&user, Utc::now()).await
    }

    /// Look up an invitation by its opaque token.
    ///
    /// This is the entry point for "accept by link" flows; the token is the
    /// sole public identifier an anonymous invitee holds.
    pub async fn get_by_token(&self, token: &str) -> CollabResult<WorkspaceInvitation> {
        self.invitations
            .get_by_token(token)
            .await?
            .ok_or(CollabError::NotFound("invitation"))
    }

    /// Accept an invitation by ID.
    pub async fn accept_by_id(
        &self,
        invitation_id: Uuid,
        user_id: Uuid,
    ) -> CollabResult<WorkspaceInvitation> {
        let invitation = self.load_invitation(invitation_id).await?;
        self.accept(invitation, user_id).await
    }

    /// Accept an invitation by token.
    pub async fn accept_by_token(
        &self,
        token: &str,
        user_id: Uuid,
    ) -> CollabResult<WorkspaceInvitation> {
        let invitation = self.get_by_token(token).await?;
        self.accept(invitation, user_id).await
    }

    /// Accept an invitation, joining the accepting user to the workspace.
    ///
    /// Runs as a two-step transaction:
    ///
    /// 1. the invitation transitions to `Accepted` through the store's
    ///    compare-and-set guard, which also binds the accepting user id to
    ///    an invitation addressed by email or username
    /// 2. the member is added to the workspace and the workspace persisted
    ///
    /// If the second step fails the first is compensated: the invitation is
    /// restored to its prior pending state, so it is never left `Accepted`
    /// without a matching membership.
    ///
    /// # Errors
    ///
    /// `Expired` past the expiry instant, `InvalidState` when no longer
    /// pending (including losing a race against another transition),
    /// `Forbidden` when the accepting identity does not match,
    /// `Conflict` when the acceptor is already a member.
    async fn accept(
        &self,
        invitation: WorkspaceInvitation,
        user_id: Uuid,
    ) -> CollabResult<WorkspaceInvitation> {
        let now = Utc::now();
        self.check_responding(&invitation, user_id, now).await?;

        let mut workspace = self.load_workspace(invitation.workspace_id).await?;
        if workspace.find_member(user_id).is_some() {
            return Err(CollabError::Conflict(
                "user is already a member of this workspace",
            ));
        }

        let mut accepted = invitation.clone();
        accepted.claim(user_id);
        accepted.mark_accepted(now);
        if !self.invitations.update_if_pending(accepted.clone()).await? {
            return Err(CollabError::InvalidState("invitation is no longer pending"));
        }

        if let Err(err) = self.join_workspace(&mut workspace, user_id, accepted.role).await {
            self.rollback_transition(&invitation).await;
            return Err(err);
        }

        tracing::debug!(
            invitation_id = %accepted.id,
            workspace_id = %accepted.workspace_id,
            user_id = %user_id,
            "Invitation accepted"
        );
        Ok(accepted)
    }

    /// Decline an invitation by ID.
    pub async fn decline_by_id(
        &self,
        invitation_id: Uuid,
        user_id: Uuid,
    ) -> CollabResult<WorkspaceInvitation> {
        let invitation = self.load_invitation(invitation_id).await?;
        self.decline(invitation, user_id).await
    }

    /// Decline an invitation by token.
    pub async fn decline_by_token(
        &self,
        token: &str,
        user_id: Uuid,
    ) -> CollabResult<WorkspaceInvitation> {
        let invitation = self.get_by_token(token).await?;
        self.decline(invitation, user_id).await
    }

    /// Decline an invitation. Same identity preconditions as accept; the
    /// workspace is not touched.
    async fn decline(
        &self,
        invitation: WorkspaceInvitation,
        user_id: Uuid,
    ) -> CollabResult<WorkspaceInvitation> {
        let now = Utc::now();
        self.check_responding(&invitation, user_id, now).await?;

        let mut declined = invitation.clone();
        declined.claim(user_id);
        declined.mark_declined(now);
        if !self.invitations.update_if_pending(declined.clone()).await? {
            return Err(CollabError::InvalidState("invitation is no longer pending"));
        }

        tracing::debug!(
            invitation_id = %declined.id,
            workspace_id = %declined.workspace_id,
            "Invitation declined"
        );
        Ok(declined)
    }

    /// Cancel (delete) an invitation.
    ///
    /// Allowed for the original inviter or any workspace admin. The record
    /// is removed outright, not soft-terminated.
    pub async fn cancel(&self, invitation_id: Uuid, requester_id: Uuid) -> CollabResult<()> {
        let invitation = self.load_invitation(invitation_id).await?;

        let allowed = invitation.inviter_id == requester_id || {
            let workspace = self.load_workspace(invitation.workspace_id).await?;
            workspace.has_admin_role(requester_id)
        };
        if !allowed {
            return Err(CollabError::Forbidden(
                "only the inviter or a workspace admin can cancel an invitation",
            ));
        }

        self.invitations.delete(invitation_id).await?;
        tracing::debug!(
            invitation_id = %invitation_id,
            workspace_id = %invitation.workspace_id,
            "Invitation cancelled"
        );
        Ok(())
    }

    /// Resend an invitation: fresh token, fresh expiry, status back to
    /// `Pending`. Admin-gated. The target identity and role are unchanged.
    pub async fn resend(
        &self,
        invitation_id: Uuid,
        requester_id: Uuid,
    ) -> CollabResult<WorkspaceInvitation> {
        let mut invitation = self.load_invitation(invitation_id).await?;

        let workspace = self.load_workspace(invitation.workspace_id).await?;
        if !workspace.has_admin_role(requester_id) {
            return Err(CollabError::Forbidden(
                "admin privileges required to resend an invitation",
            ));
        }

        invitation.regenerate();
        let invitation = self.invitations.update(invitation).await?;
        tracing::debug!(
            invitation_id = %invitation.id,
            workspace_id = %invitation.workspace_id,
            "Invitation resent"
        );
        Ok(invitation)
    }

    /// Expire every pending invitation whose expiry has passed.
    ///
    /// Identity-free batch repair, intended to be triggered by an external
    /// timer. Idempotent and race-safe: each record transitions at most
    /// once because the new state is terminal and the write goes through
    /// the compare-and-set guard. A persistence failure on one record is
    /// logged and the sweep continues with the next.
    ///
    /// # Arguments
    ///
    /// * `as_of` - The instant to evaluate expiry against
    ///
    /// # Returns
    ///
    /// Number of invitations transitioned to `Expired`
    pub async fn sweep_expired(&self, as_of: DateTime<Utc>) -> CollabResult<usize> {
        let lapsed = self.invitations.list_lapsed(as_of).await?;
        let mut swept = 0;

        for invitation in lapsed {
            let mut expired = invitation.clone();
            expired.mark_expired();
            match self.invitations.update_if_pending(expired).await {
                Ok(true) => swept += 1,
                // Lost the race to a concurrent accept/decline; nothing to repair.
                Ok(false) => {}
                Err(err) => {
                    tracing::warn!(
                        invitation_id = %invitation.id,
                        error = %err,
                        "Failed to expire invitation; continuing sweep"
                    );
                }
            }
        }

        if swept > 0 {
            tracing::debug!(swept, "Expired invitations swept");
        }
        Ok(swept)
    }

    /// Shared preconditions for accept and decline: the invitation must be
    /// responding-eligible and addressed to the responding user.
    async fn check_responding(
        &self,
        invitation: &WorkspaceInvitation,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> CollabResult<()> {
        if invitation.is_expired(now) {
            return Err(CollabError::Expired);
        }
        if !invitation.is_pending(now) {
            return Err(CollabError::InvalidState("invitation is no longer pending"));
        }

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(CollabError::NotFound("user"))?;
        if !invitation.matches_identity(user.id, Some(&user.email), Some(&user.username)) {
            return Err(CollabError::Forbidden(
                "invitation is addressed to a different identity",
            ));
        }
        Ok(())
    }

    async fn join_workspace(
        &self,
        workspace: &mut Workspace,
        user_id: Uuid,
        role: WorkspaceRole,
    ) -> CollabResult<()> {
        workspace.add_member(user_id, role)?;
        self.workspaces.update(workspace.clone()).await?;
        Ok(())
    }

    /// Compensate a transition whose follow-up step failed by restoring
    /// the invitation's prior state.
    async fn rollback_transition(&self, original: &WorkspaceInvitation) {
        if let Err(err) = self.invitations.update(original.clone()).await {
            tracing::warn!(
                invitation_id = %original.id,
                error = %err,
                "Failed to restore invitation after member-add failure"
            );
        }
    }
}
