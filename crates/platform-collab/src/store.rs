//! Persistence and user-directory seams
//!
//! This module defines the abstract collaborators the services are built
//! over. Implementations may be backed by anything that can honor the
//! contracts; the crate ships an in-memory backend suitable for
//! single-process applications and testing (see [`crate::memory`]).
//!
//! The one contract that matters for correctness under concurrency is
//! [`InvitationStore::update_if_pending`]: it is the serialization point
//! that makes invitation state transitions race-safe without in-process
//! locks. Persistent implementations are expected to realize it with a
//! conditional update (version field or status guard in the write).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CollabResult;
use platform_workspace::{Workspace, WorkspaceInvitation};

/// A user as seen by the external user directory.
///
/// The directory is the source of truth for identity resolution; the
/// collaboration engine never creates or mutates users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Stable user ID
    pub id: Uuid,

    /// Primary email address
    pub email: String,

    /// Unique username
    pub username: String,
}

impl UserRecord {
    /// Create a new user record.
    pub fn new(id: Uuid, email: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            username: username.into(),
        }
    }
}

/// Lookup interface over the external user directory.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user by email address (case-insensitive).
    async fn find_by_email(&self, email: &str) -> CollabResult<Option<UserRecord>>;

    /// Find a user by username.
    async fn find_by_username(&self, username: &str) -> CollabResult<Option<UserRecord>>;

    /// Find a user by ID.
    async fn find_by_id(&self, id: Uuid) -> CollabResult<Option<UserRecord>>;

    /// Check if a user ID exists.
    async fn exists(&self, id: Uuid) -> CollabResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}

/// Persistence for workspace aggregates.
#[async_trait]
pub trait WorkspaceStore: Send + Sync {
    /// Persist a new workspace.
    ///
    /// Fails with `Conflict` if the owner already has a workspace with the
    /// same name; the store enforces the `(name, owner)` uniqueness the way
    /// a database would with a unique index.
    async fn create(&self, workspace: Workspace) -> CollabResult<Workspace>;

    /// Load a workspace by ID.
    async fn get(&self, id: Uuid) -> CollabResult<Option<Workspace>>;

    /// Persist the current state of an existing workspace.
    ///
    /// Fails with `NotFound` if the workspace no longer exists, and with
    /// `Conflict` if a rename collides with another workspace of the same
    /// owner.
    async fn update(&self, workspace: Workspace) -> CollabResult<Workspace>;

    /// Delete a workspace.
    ///
    /// # Returns
    ///
    /// `true` if a workspace was deleted, `false` if none existed
    async fn delete(&self, id: Uuid) -> CollabResult<bool>;

    /// All workspaces owned by a user.
    async fn find_by_owner(&self, owner_id: Uuid) -> CollabResult<Vec<Workspace>>;
}

/// Persistence for workspace invitations.
#[async_trait]
pub trait InvitationStore: Send + Sync {
    /// Persist a new invitation.
    ///
    /// Fails with `Conflict` if the token is already in use; tokens are
    /// globally unique.
    async fn create(&self, invitation: WorkspaceInvitation) -> CollabResult<WorkspaceInvitation>;

    /// Load an invitation by ID.
    async fn get(&self, id: Uuid) -> CollabResult<Option<WorkspaceInvitation>>;

    /// Load an invitation by its opaque token.
    async fn get_by_token(&self, token: &str) -> CollabResult<Option<WorkspaceInvitation>>;

    /// Persist the current state of an existing invitation unconditionally.
    async fn update(&self, invitation: WorkspaceInvitation) -> CollabResult<WorkspaceInvitation>;

    /// Persist `invitation` only if the stored record is still `Pending`.
    ///
    /// This is the compare-and-set guard for all transitions out of
    /// `Pending`: of any number of racing accept/decline/sweep transitions
    /// on one invitation, exactly one observes `true`; the rest observe
    /// `false` and must fail their operation cleanly.
    ///
    /// # Returns
    ///
    /// `true` if the write was applied, `false` if the stored status had
    /// already left `Pending`
    async fn update_if_pending(&self, invitation: WorkspaceInvitation) -> CollabResult<bool>;

    /// Delete an invitation.
    ///
    /// # Returns
    ///
    /// `true` if an invitation was deleted, `false` if none existed
    async fn delete(&self, id: Uuid) -> CollabResult<bool>;

    /// Delete every invitation for a workspace (cascade on workspace
    /// deletion).
    ///
    /// # Returns
    ///
    /// Number of invitations deleted
    async fn delete_for_workspace(&self, workspace_id: Uuid) -> CollabResult<usize>;

    /// All invitations for a workspace, any status.
    async fn list_for_workspace(
        &self,
        workspace_id: Uuid,
    ) -> CollabResult<Vec<WorkspaceInvitation>>;

    /// Find the pending, unexpired invitation addressed to a user within
    /// one workspace, if any.
    ///
    /// Identity resolution checks whichever of the invitation's target
    /// fields are set against the given record. At most one such invitation
    /// exists; the store enforces it together with
    /// [`InvitationService::send_invitation`](crate::InvitationService::send_invitation).
    async fn find_pending_for_identity(
        &self,
        workspace_id: Uuid,
        user: &UserRecord,
        as_of: DateTime<Utc>,
    ) -> CollabResult<Option<WorkspaceInvitation>>;

    /// All pending, unexpired invitations addressed to a user, across
    /// workspaces.
    async fn list_pending_for_user(
        &self,
        user: &UserRecord,
        as_of: DateTime<Utc>,
    ) -> CollabResult<Vec<WorkspaceInvitation>>;

    /// All invitations still marked `Pending` whose expiry has passed as of
    /// the given instant. Input to the expiry sweep.
    async fn list_lapsed(&self, as_of: DateTime<Utc>) -> CollabResult<Vec<WorkspaceInvitation>>;
}
