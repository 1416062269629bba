//! Workspace domain models
//!
//! This module provides the core Workspace aggregate. A workspace is a named
//! collaborative container that owns its membership list; every membership
//! mutation goes through aggregate methods so the ownership and uniqueness
//! invariants hold at all times.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{WorkspaceError, WorkspaceResult};
use crate::membership::{Membership, MembershipStatus};
use crate::roles::WorkspaceRole;

/// A workspace is a collaborative container owning a membership list.
///
/// Users can belong to multiple workspaces with different roles. The
/// membership list is private: callers query and mutate it exclusively
/// through aggregate methods, which preserve two invariants atomically:
///
/// - the owner always has an active membership with the Owner role, seeded
///   at construction
/// - no second membership ever carries the Owner role
///
/// # Architecture
///
/// ```text
/// Workspace
///   ├─ Members (via Membership)
///   ├─ Invitations (stored separately, see WorkspaceInvitation)
///   └─ Shared resources (tasks/notes referencing workspace_id)
/// ```
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use platform_workspace::Workspace;
///
/// let owner_id = Uuid::now_v7();
/// let workspace = Workspace::new("Engineering", owner_id);
/// assert_eq!(workspace.name, "Engineering");
/// assert_eq!(workspace.member_count(), 1);
/// assert!(workspace.has_admin_role(owner_id));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    /// Unique identifier for the workspace
    pub id: Uuid,

    /// Human-readable name (unique per owner)
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Owner user ID (the user who created the workspace)
    pub owner_id: Uuid,

    /// Membership list, owned by the aggregate
    members: Vec<Membership>,

    /// When the workspace was created
    pub created_at: DateTime<Utc>,

    /// When the workspace was last updated
    pub updated_at: DateTime<Utc>,
}

impl Workspace {
    /// Creates a new workspace with the owner membership seeded.
    ///
    /// The workspace is created with:
    /// - A newly generated UUID v7 ID
    /// - An active Owner membership for `owner_id`
    /// - Current timestamp for created_at and updated_at
    ///
    /// # Arguments
    ///
    /// * `name` - The workspace name
    /// * `owner_id` - The user ID who owns this workspace
    ///
    /// # Examples
    ///
    /// ```
    /// use uuid::Uuid;
    /// use platform_workspace::Workspace;
    ///
    /// let workspace = Workspace::new("Engineering", Uuid::now_v7());
    /// ```
    pub fn new(name: impl Into<String>, owner_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            description: None,
            owner_id,
            members: vec![Membership::new(owner_id, WorkspaceRole::Owner)],
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the description on a freshly built workspace.
    ///
    /// # Arguments
    ///
    /// * `description` - The description text
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Refresh the updated_at timestamp.
    ///
    /// Called by every successful mutation; read-only queries never touch it.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Add a member to the workspace.
    ///
    /// Adding a user who is already a member is a no-op, so concurrent adds
    /// for the same user converge on a single membership record.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user to add
    /// * `role` - The role to grant; must not be Owner
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::RoleNotGrantable`] if `role` is Owner.
    pub fn add_member(&mut self, user_id: Uuid, role: WorkspaceRole) -> WorkspaceResult<()> {
        if !role.is_grantable() {
            return Err(WorkspaceError::RoleNotGrantable(role));
        }
        if self.find_member(user_id).is_some() {
            return Ok(());
        }
        self.members.push(Membership::new(user_id, role));
        self.touch();
        Ok(())
    }

    /// Remove a member from the workspace.
    ///
    /// The owner can never be removed, not even by another admin.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user to remove
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::OwnerImmutable`] if `user_id` is the owner,
    /// or [`WorkspaceError::MemberNotFound`] if there is no such membership.
    pub fn remove_member(&mut self, user_id: Uuid) -> WorkspaceResult<()> {
        if user_id == self.owner_id {
            return Err(WorkspaceError::OwnerImmutable);
        }
        let before = self.members.len();
        self.members.retain(|m| m.user_id != user_id);
        if self.members.len() == before {
            return Err(WorkspaceError::MemberNotFound);
        }
        self.touch();
        Ok(())
    }

    /// Change a member's role in place.
    ///
    /// The owner's role is immutable and the Owner role can never be granted
    /// here, so exactly one membership carries Owner for the lifetime of the
    /// workspace.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The member whose role changes
    /// * `new_role` - The role to assign; must not be Owner
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::OwnerImmutable`] if `user_id` is the owner,
    /// [`WorkspaceError::RoleNotGrantable`] if `new_role` is Owner, or
    /// [`WorkspaceError::MemberNotFound`] if there is no such membership.
    pub fn update_member_role(
        &mut self,
        user_id: Uuid,
        new_role: WorkspaceRole,
    ) -> WorkspaceResult<()> {
        if user_id == self.owner_id {
            return Err(WorkspaceError::OwnerImmutable);
        }
        if !new_role.is_grantable() {
            return Err(WorkspaceError::RoleNotGrantable(new_role));
        }
        let member = self
            .members
            .iter_mut()
            .find(|m| m.user_id == user_id)
            .ok_or(WorkspaceError::MemberNotFound)?;
        member.role = new_role;
        self.touch();
        Ok(())
    }

    /// Change a member's status in place.
    ///
    /// The owner's membership stays active for the lifetime of the
    /// workspace.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The member whose status changes
    /// * `status` - The status to assign
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::OwnerImmutable`] if `user_id` is the owner,
    /// or [`WorkspaceError::MemberNotFound`] if there is no such membership.
    pub fn update_member_status(
        &mut self,
        user_id: Uuid,
        status: MembershipStatus,
    ) -> WorkspaceResult<()> {
        if user_id == self.owner_id {
            return Err(WorkspaceError::OwnerImmutable);
        }
        let member = self
            .members
            .iter_mut()
            .find(|m| m.user_id == user_id)
            .ok_or(WorkspaceError::MemberNotFound)?;
        member.status = status;
        self.touch();
        Ok(())
    }

    /// Find a member by user ID.
    ///
    /// # Returns
    ///
    /// The membership record, or `None` if the user is not a member
    pub fn find_member(&self, user_id: Uuid) -> Option<&Membership> {
        self.members.iter().find(|m| m.user_id == user_id)
    }

    /// All membership records, in join order.
    pub fn members(&self) -> &[Membership] {
        &self.members
    }

    /// Check if a user currently holds admin privileges here.
    ///
    /// # Returns
    ///
    /// `true` iff the user is an active member with the Admin or Owner role
    pub fn has_admin_role(&self, user_id: Uuid) -> bool {
        self.find_member(user_id)
            .map(Membership::has_admin_privileges)
            .unwrap_or(false)
    }

    /// Check if a user can currently edit shared resources here.
    ///
    /// # Returns
    ///
    /// `true` iff the user is an active member with Editor role or above
    pub fn can_user_edit(&self, user_id: Uuid) -> bool {
        self.find_member(user_id)
            .map(Membership::can_edit)
            .unwrap_or(false)
    }

    /// Check if a user can currently view workspace resources.
    ///
    /// # Returns
    ///
    /// `true` iff the user is an active member, whatever the role
    pub fn can_user_view(&self, user_id: Uuid) -> bool {
        self.find_member(user_id)
            .map(Membership::can_view)
            .unwrap_or(false)
    }

    /// Count of active members.
    pub fn member_count(&self) -> usize {
        self.members.iter().filter(|m| m.is_active()).count()
    }
}

/// Summary of a workspace for list displays.
///
/// This is a lightweight representation that includes the requesting user's
/// own role alongside aggregate counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceSummary {
    /// Workspace ID
    pub id: Uuid,

    /// Workspace name
    pub name: String,

    /// User's role in this workspace
    pub user_role: WorkspaceRole,

    /// Number of active members
    pub member_count: usize,
}

impl WorkspaceSummary {
    /// Build a summary for one member's view of a workspace.
    ///
    /// # Returns
    ///
    /// `None` if the user is not a member
    pub fn for_member(workspace: &Workspace, user_id: Uuid) -> Option<Self> {
        workspace.find_member(user_id).map(|m| Self {
            id: workspace.id,
            name: workspace.name.clone(),
            user_role: m.role,
            member_count: workspace.member_count(),
        })
    }
}
