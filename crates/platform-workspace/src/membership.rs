//! Membership domain models
//!
//! This module provides the membership entity that links users to workspaces.
//! A membership defines a user's role and status within a single workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::roles::WorkspaceRole;

/// Lifecycle status of a workspace membership.
///
/// Only `Active` members count toward the workspace member total and only
/// `Active` members may act on shared resources, whatever their role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    /// Membership exists but has not been activated yet
    Pending,

    /// Member in good standing
    Active,

    /// Membership temporarily revoked without being removed
    Suspended,
}

impl MembershipStatus {
    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Suspended => "suspended",
        }
    }
}

/// Workspace membership linking a user to a workspace.
///
/// This represents a user's membership in a workspace, including their role,
/// status, and when they joined. Memberships are owned exclusively by their
/// [`Workspace`](crate::Workspace) aggregate; a workspace holds at most one
/// membership per user.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use platform_workspace::{Membership, MembershipStatus, WorkspaceRole};
///
/// let user_id = Uuid::now_v7();
/// let membership = Membership::new(user_id, WorkspaceRole::Editor);
/// assert_eq!(membership.status, MembershipStatus::Active);
/// assert!(membership.is_active());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    /// User ID
    pub user_id: Uuid,

    /// Role within the workspace
    pub role: WorkspaceRole,

    /// Membership status
    pub status: MembershipStatus,

    /// When the user joined
    pub joined_at: DateTime<Utc>,
}

impl Membership {
    /// Creates a new active membership.
    ///
    /// The membership is created with:
    /// - Active status
    /// - Current timestamp for joined_at
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user ID
    /// * `role` - The user's role in the workspace
    ///
    /// # Examples
    ///
    /// ```
    /// use uuid::Uuid;
    /// use platform_workspace::{Membership, WorkspaceRole};
    ///
    /// let membership = Membership::new(Uuid::now_v7(), WorkspaceRole::Viewer);
    /// ```
    pub fn new(user_id: Uuid, role: WorkspaceRole) -> Self {
        Self {
            user_id,
            role,
            status: MembershipStatus::Active,
            joined_at: Utc::now(),
        }
    }

    /// Set the status on a freshly built membership.
    ///
    /// # Arguments
    ///
    /// * `status` - The status to set
    pub fn with_status(mut self, status: MembershipStatus) -> Self {
        self.status = status;
        self
    }

    /// Check if the membership is active.
    pub fn is_active(&self) -> bool {
        self.status == MembershipStatus::Active
    }

    /// Check if this member currently holds admin privileges.
    ///
    /// Requires both an admin-level role and active status.
    pub fn has_admin_privileges(&self) -> bool {
        self.is_active() && self.role.is_admin_or_owner()
    }

    /// Check if this member can currently edit shared resources.
    pub fn can_edit(&self) -> bool {
        self.is_active() && self.role.can_edit()
    }

    /// Check if this member can currently view workspace resources.
    pub fn can_view(&self) -> bool {
        self.is_active() && self.role.can_view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_creation() {
        let user_id = Uuid::now_v7();
        let membership = Membership::new(user_id, WorkspaceRole::Editor);

        assert_eq!(membership.user_id, user_id);
        assert_eq!(membership.role, WorkspaceRole::Editor);
        assert_eq!(membership.status, MembershipStatus::Active);
        assert!(membership.is_active());
    }

    #[test]
    fn test_membership_with_status() {
        let membership = Membership::new(Uuid::now_v7(), WorkspaceRole::Viewer)
            .with_status(MembershipStatus::Suspended);

        assert_eq!(membership.status, MembershipStatus::Suspended);
        assert!(!membership.is_active());
    }

    #[test]
    fn test_suspended_member_loses_capabilities() {
        let membership = Membership::new(Uuid::now_v7(), WorkspaceRole::Admin)
            .with_status(MembershipStatus::Suspended);

        assert!(!membership.has_admin_privileges());
        assert!(!membership.can_edit());
        assert!(!membership.can_view());
    }

    #[test]
    fn test_capabilities_follow_role() {
        let viewer = Membership::new(Uuid::now_v7(), WorkspaceRole::Viewer);
        assert!(viewer.can_view());
        assert!(!viewer.can_edit());
        assert!(!viewer.has_admin_privileges());

        let editor = Membership::new(Uuid::now_v7(), WorkspaceRole::Editor);
        assert!(editor.can_edit());
        assert!(!editor.has_admin_privileges());

        let admin = Membership::new(Uuid::now_v7(), WorkspaceRole::Admin);
        assert!(admin.has_admin_privileges());
    }
}
