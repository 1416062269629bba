//! Workspace orchestration service
//!
//! Wraps the workspace aggregate with authorization gates and persistence.
//! Every mutation loads the current stored state and re-checks the
//! requester's privilege against it immediately before mutating, closing
//! the window for stale-authorization races across service instances.

use std::sync::Arc;
use uuid::Uuid;

use crate::error::{CollabError, CollabResult};
use crate::store::{InvitationStore, UserDirectory, WorkspaceStore};
use platform_workspace::{Membership, Workspace, WorkspaceRole, WorkspaceSummary};

/// Orchestrates workspace lifecycle and membership management.
///
/// The service holds no state of its own; it composes the persistence and
/// directory seams and enforces the authorization rules the aggregate
/// cannot see (who is asking).
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use uuid::Uuid;
/// use platform_collab::{MemoryInvitationStore, MemoryUserDirectory, MemoryWorkspaceStore, WorkspaceService};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let service = WorkspaceService::new(
///     Arc::new(MemoryWorkspaceStore::new()),
///     Arc::new(MemoryInvitationStore::new()),
///     Arc::new(MemoryUserDirectory::new()),
/// );
///
/// let owner_id = Uuid::now_v7();
/// let workspace = service.create_workspace("Engineering", None, owner_id).await?;
/// assert_eq!(workspace.member_count(), 1);
/// # Ok(())
/// # }
/// ```
pub struct WorkspaceService {
    workspaces: Arc<dyn WorkspaceStore>,
    invitations: Arc<dyn InvitationStore>,
    users: Arc<dyn UserDirectory>,
}

impl WorkspaceService {
    /// Create a new workspace service over the given stores.
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

    /// Load a workspace or fail with `NotFound`.
    async fn load(&self, workspace_id: Uuid) -> CollabResult<Workspace> {
        self.workspaces
            .get(workspace_id)
            .await?
            .ok_or(CollabError::NotFound("workspace"))
    }

    /// Load a workspace and require admin privileges of the requester.
    async fn load_for_admin(
        &self,
        workspace_id: Uuid,
        requester_id: Uuid,
    ) -> CollabResult<Workspace> {
        let workspace = self.load(workspace_id).await?;
        if !workspace.has_admin_role(requester_id) {
            return Err(CollabError::Forbidden(
                "admin privileges required for this operation",
            ));
        }
        Ok(workspace)
    }

    /// Create a workspace owned by `owner_id`.
    ///
    /// The owner membership is seeded atomically with the workspace.
    ///
    /// # Errors
    ///
    /// `Conflict` if the owner already has a workspace with this name.
    pub async fn create_workspace(
        &self,
        name: impl Into<String>,
        description: Option<String>,
        owner_id: Uuid,
    ) -> CollabResult<Workspace> {
        let mut workspace = Workspace::new(name, owner_id);
        workspace.description = description;

        let workspace = self.workspaces.create(workspace).await?;
        tracing::debug!(
            workspace_id = %workspace.id,
            owner_id = %owner_id,
            "Workspace created"
        );
        Ok(workspace)
    }

    /// Load a workspace on behalf of a member.
    ///
    /// # Errors
    ///
    /// `NotFound` if the workspace does not exist, `Forbidden` if the
    /// requester is not an active member.
    pub async fn get_workspace(
        &self,
        workspace_id: Uuid,
        requester_id: Uuid,
    ) -> CollabResult<Workspace> {
        let workspace = self.load(workspace_id).await?;
        if !workspace.can_user_view(requester_id) {
            return Err(CollabError::Forbidden("not a member of this workspace"));
        }
        Ok(workspace)
    }

    /// All workspaces the requester owns, as summaries.
    pub async fn list_owned(&self, owner_id: Uuid) -> CollabResult<Vec<WorkspaceSummary>> {
        let workspaces = self.workspaces.find_by_owner(owner_id).await?;
        Ok(workspaces
            .iter()
            .filter_map(|w| WorkspaceSummary::for_member(w, owner_id))
            .collect())
    }

    /// Update workspace name and/or description.
    ///
    /// Admin-gated; the privilege check runs against freshly loaded state.
    ///
    /// # Errors
    ///
    /// `Forbidden` without admin privileges; `Conflict` if a rename
    /// collides with another workspace of the same owner.
    pub async fn update_workspace(
        &self,
        workspace_id: Uuid,
        requester_id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> CollabResult<Workspace> {
        let mut workspace = self.load_for_admin(workspace_id, requester_id).await?;

        if let Some(name) = name {
            workspace.name = name;
        }
        if let Some(description) = description {
            workspace.description = Some(description);
        }
        workspace.touch();

        self.workspaces.update(workspace).await
    }

    /// Delete a workspace and cascade deletion of its invitations.
    ///
    /// Only the owner may delete. Shared resources referencing the
    /// workspace are left to their own services to unshare.
    ///
    /// # Errors
    ///
    /// `NotFound` if the workspace does not exist, `Forbidden` for any
    /// requester but the owner.
    pub async fn delete_workspace(
        &self,
        workspace_id: Uuid,
        requester_id: Uuid,
    ) -> CollabResult<()> {
        let workspace = self.load(workspace_id).await?;
        if workspace.owner_id != requester_id {
            return Err(CollabError::Forbidden(
                "only the owner can delete a workspace",
            ));
        }

        self.workspaces.delete(workspace_id).await?;
        let cancelled = self.invitations.delete_for_workspace(workspace_id).await?;
        tracing::debug!(
            workspace_id = %workspace_id,
            cancelled_invitations = cancelled,
            "Workspace deleted"
        );
        Ok(())
    }

    /// List the membership records of a workspace.
    ///
    /// Any active member may list; non-members are refused.
    pub async fn list_members(
        &self,
        workspace_id: Uuid,
        requester_id: Uuid,
    ) -> CollabResult<Vec<Membership>> {
        let workspace = self.get_workspace(workspace_id, requester_id).await?;
        Ok(workspace.members().to_vec())
    }

    /// Add a member directly, without an invitation.
    ///
    /// Admin-gated. Adding an existing member is a no-op, so concurrent
    /// adds converge on one membership record.
    ///
    /// # Errors
    ///
    /// `Forbidden` without admin privileges, `NotFound` if the user does
    /// not resolve in the directory, `InvalidArgument` for the Owner role.
    pub async fn add_member(
        &self,
        workspace_id: Uuid,
        requester_id: Uuid,
        user_id: Uuid,
        role: WorkspaceRole,
    ) -> CollabResult<Workspace> {
        let mut workspace = self.load_for_admin(workspace_id, requester_id).await?;

        if !self.users.exists(user_id).await? {
            return Err(CollabError::NotFound("user"));
        }

        workspace.add_member(user_id, role)?;
        let workspace = self.workspaces.update(workspace).await?;
        tracing::debug!(
            workspace_id = %workspace_id,
            user_id = %user_id,
            role = role.as_str(),
            "Member added"
        );
        Ok(workspace)
    }

    /// Remove a member.
    ///
    /// Admin-gated; the owner can never be removed, even by another admin.
    pub async fn remove_member(
        &self,
        workspace_id: Uuid,
        requester_id: Uuid,
        user_id: Uuid,
    ) -> CollabResult<Workspace> {
        let mut workspace = self.load_for_admin(workspace_id, requester_id).await?;
        workspace.remove_member(user_id)?;
        let workspace = self.workspaces.update(workspace).await?;
        tracing::debug!(
            workspace_id = %workspace_id,
            user_id = %user_id,
            "Member removed"
        );
        Ok(workspace)
    }

    /// Change a member's role.
    ///
    /// Admin-gated; the owner's role is immutable and Owner can never be
    /// granted.
    pub async fn update_member_role(
        &self,
        workspace_id: Uuid,
        requester_id: Uuid,
        user_id: Uuid,
        new_role: WorkspaceRole,
    ) -> CollabResult<Workspace> {
        let mut workspace = self.load_for_admin(workspace_id, requester_id).await?;
        workspace.update_member_role(user_id, new_role)?;
        let workspace = self.workspaces.update(workspace).await?;
        tracing::debug!(
            workspace_id = %workspace_id,
            user_id = %user_id,
            role = new_role.as_str(),
            "Member role updated"
        );
        Ok(workspace)
    }
}
