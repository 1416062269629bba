//! Role-based access control
//!
//! This module defines the workspace role hierarchy and the capability
//! predicates derived from it.

use serde::{Deserialize, Serialize};

/// User role within a workspace.
///
/// Roles are hierarchical, with each role inheriting the permissions of lower roles.
/// The hierarchy is: Viewer < Editor < Admin < Owner
///
/// # Permission Model
///
/// - **Viewer**: Read-only access to workspace resources
/// - **Editor**: Can create and edit shared resources
/// - **Admin**: Can manage members and invitations, edit workspace metadata
/// - **Owner**: Full workspace control including deletion; exactly one per
///   workspace, assigned at creation and immutable afterwards
///
/// Capability predicates are written as explicit role matches rather than
/// numeric comparisons, so reordering the enum cannot silently change what a
/// role is allowed to do. The derived ordering is kept for display and
/// validation purposes only.
///
/// # Examples
///
/// ```
/// use platform_workspace::WorkspaceRole;
///
/// let role = WorkspaceRole::Editor;
/// assert!(role.can_edit());
/// assert!(!role.is_admin_or_owner());
///
/// let admin = WorkspaceRole::Admin;
/// assert!(admin.is_admin_or_owner());
/// assert!(!admin.can_delete_workspace());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WorkspaceRole {
    /// Read-only access to workspace resources
    Viewer = 1,

    /// Can create and edit shared resources
    Editor = 2,

    /// Can manage members and invitations
    Admin = 3,

    /// Full workspace control (exactly one per workspace)
    Owner = 4,
}

impl WorkspaceRole {
    /// Check if this role has admin privileges.
    ///
    /// Admin privileges allow managing members and invitations and editing
    /// workspace metadata.
    ///
    /// # Returns
    ///
    /// `true` for Admin and Owner roles
    pub fn is_admin_or_owner(&self) -> bool {
        matches!(self, Self::Admin | Self::Owner)
    }

    /// Check if this role can edit shared resources.
    ///
    /// # Returns
    ///
    /// `true` for Editor, Admin, and Owner roles
    pub fn can_edit(&self) -> bool {
        matches!(self, Self::Editor | Self::Admin | Self::Owner)
    }

    /// Check if this role can view workspace resources.
    ///
    /// Every role grants view access; membership status, not role, is what
    /// gates visibility.
    ///
    /// # Returns
    ///
    /// `true` for all roles
    pub fn can_view(&self) -> bool {
        matches!(
            self,
            Self::Viewer | Self::Editor | Self::Admin | Self::Owner
        )
    }

    /// Check if this role can delete the workspace.
    ///
    /// # Returns
    ///
    /// `true` only for the Owner role
    pub fn can_delete_workspace(&self) -> bool {
        matches!(self, Self::Owner)
    }

    /// Parse role from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive)
    ///
    /// # Returns
    ///
    /// `Some(WorkspaceRole)` if valid, `None` otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// use platform_workspace::WorkspaceRole;
    ///
    /// assert_eq!(WorkspaceRole::parse("admin"), Some(WorkspaceRole::Admin));
    /// assert_eq!(WorkspaceRole::parse("VIEWER"), Some(WorkspaceRole::Viewer));
    /// assert_eq!(WorkspaceRole::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "viewer" => Some(Self::Viewer),
            "editor" => Some(Self::Editor),
            "admin" => Some(Self::Admin),
            "owner" => Some(Self::Owner),
            _ => None,
        }
    }

    /// Get string representation of the role.
    ///
    /// # Returns
    ///
    /// Lowercase string representation
    ///
    /// # Examples
    ///
    /// ```
    /// use platform_workspace::WorkspaceRole;
    ///
    /// assert_eq!(WorkspaceRole::Admin.as_str(), "admin");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Editor => "editor",
            Self::Admin => "admin",
            Self::Owner => "owner",
        }
    }

    /// Get a human-readable display name for the role.
    ///
    /// # Examples
    ///
    /// ```
    /// use platform_workspace::WorkspaceRole;
    ///
    /// assert_eq!(WorkspaceRole::Admin.display_name(), "Admin");
    /// ```
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Viewer => "Viewer",
            Self::Editor => "Editor",
            Self::Admin => "Admin",
            Self::Owner => "Owner",
        }
    }

    /// Roles that may be granted to invited or added members.
    ///
    /// Owner is excluded: the owner role is assigned once at workspace
    /// creation and can never be granted through membership management.
    ///
    /// # Returns
    ///
    /// Slice of grantable roles, lowest privilege first
    pub fn grantable() -> &'static [WorkspaceRole] {
        &[Self::Viewer, Self::Editor, Self::Admin]
    }

    /// Check if this role may be granted to a member.
    ///
    /// # Returns
    ///
    /// `true` for every role except Owner
    pub fn is_grantable(&self) -> bool {
        !matches!(self, Self::Owner)
    }
}

impl Default for WorkspaceRole {
    fn default() -> Self {
        Self::Viewer
    }
}

impl std::fmt::Display for WorkspaceRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_hierarchy() {
        assert!(WorkspaceRole::Owner > WorkspaceRole::Admin);
        assert!(WorkspaceRole::Admin > WorkspaceRole::Editor);
        assert!(WorkspaceRole::Editor > WorkspaceRole::Viewer);
    }

    #[test]
    fn test_role_permissions() {
        assert!(!WorkspaceRole::Viewer.can_edit());
        assert!(WorkspaceRole::Viewer.can_view());
        assert!(WorkspaceRole::Editor.can_edit());
        assert!(!WorkspaceRole::Editor.is_admin_or_owner());
        assert!(WorkspaceRole::Admin.is_admin_or_owner());
        assert!(!WorkspaceRole::Admin.can_delete_workspace());
        assert!(WorkspaceRole::Owner.can_delete_workspace());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(WorkspaceRole::parse("admin"), Some(WorkspaceRole::Admin));
        assert_eq!(WorkspaceRole::parse("VIEWER"), Some(WorkspaceRole::Viewer));
        assert_eq!(WorkspaceRole::parse("invalid"), None);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(WorkspaceRole::Admin.to_string(), "admin");
        assert_eq!(WorkspaceRole::Owner.to_string(), "owner");
    }

    #[test]
    fn test_role_round_trip() {
        for role in [
            WorkspaceRole::Viewer,
            WorkspaceRole::Editor,
            WorkspaceRole::Admin,
            WorkspaceRole::Owner,
        ] {
            assert_eq!(WorkspaceRole::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_grantable_excludes_owner() {
        assert!(!WorkspaceRole::grantable().contains(&WorkspaceRole::Owner));
        assert!(WorkspaceRole::Admin.is_grantable());
        assert!(!WorkspaceRole::Owner.is_grantable());
    }
}
