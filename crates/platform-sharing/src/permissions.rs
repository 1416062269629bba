//! # Shared permission lists
//!
//! Per-resource view/edit ACLs, independent of workspace roles. A resource
//! (task or note) embeds one of these to grant access to specific users
//! regardless of their workspace membership.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Per-resource ACL of view and edit grants.
///
/// The sets maintain the invariant `can_edit ⊆ can_view` through every
/// mutation: granting edit also grants view, and revoking view also revokes
/// edit. A user may hold view without edit, never the reverse.
///
/// # Example
///
/// ```
/// use uuid::Uuid;
/// use platform_sharing::SharedPermissions;
///
/// let user_id = Uuid::now_v7();
/// let mut permissions = SharedPermissions::new();
///
/// permissions.grant_edit(user_id);
/// assert!(permissions.can_view(user_id));
/// assert!(permissions.can_edit(user_id));
///
/// permissions.revoke_view(user_id);
/// assert!(!permissions.can_edit(user_id));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SharedPermissions {
    /// Users granted view access.
    #[serde(default)]
    can_view: HashSet<Uuid>,

    /// Users granted edit access (always a subset of `can_view`).
    #[serde(default)]
    can_edit: HashSet<Uuid>,
}

impl SharedPermissions {
    /// Create an empty permission list.
    pub fn new() -> Self {
        Self {
            can_view: HashSet::new(),
            can_edit: HashSet::new(),
        }
    }

    /// Grant view access to a user.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user to grant view access to
    pub fn grant_view(&mut self, user_id: Uuid) {
        self.can_view.insert(user_id);
    }

    /// Grant edit access to a user.
    ///
    /// Granting edit implies view, so both sets are updated in the same
    /// operation.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user to grant edit access to
    pub fn grant_edit(&mut self, user_id: Uuid) {
        self.can_view.insert(user_id);
        self.can_edit.insert(user_id);
    }

    /// Revoke view access from a user.
    ///
    /// Revoking view also revokes edit; a user can never hold edit without
    /// view.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user to revoke
    ///
    /// # Returns
    ///
    /// `true` if the user had view access, `false` otherwise
    pub fn revoke_view(&mut self, user_id: Uuid) -> bool {
        self.can_edit.remove(&user_id);
        self.can_view.remove(&user_id)
    }

    /// Revoke edit access from a user, leaving any view grant in place.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user to revoke
    ///
    /// # Returns
    ///
    /// `true` if the user had edit access, `false` otherwise
    pub fn revoke_edit(&mut self, user_id: Uuid) -> bool {
        self.can_edit.remove(&user_id)
    }

    /// Check if a user holds view access.
    pub fn can_view(&self, user_id: Uuid) -> bool {
        self.can_view.contains(&user_id)
    }

    /// Check if a user holds edit access.
    pub fn can_edit(&self, user_id: Uuid) -> bool {
        self.can_edit.contains(&user_id)
    }

    /// All users with view access.
    pub fn viewers(&self) -> impl Iterator<Item = &Uuid> {
        self.can_view.iter()
    }

    /// All users with edit access.
    pub fn editors(&self) -> impl Iterator<Item = &Uuid> {
        self.can_edit.iter()
    }

    /// Number of users with view access.
    pub fn len(&self) -> usize {
        self.can_view.len()
    }

    /// Check if no user has been granted anything.
    pub fn is_empty(&self) -> bool {
        self.can_view.is_empty()
    }

    /// Remove every grant.
    pub fn clear(&mut self) {
        self.can_view.clear();
        self.can_edit.clear();
    }

    /// Merge another permission list into this one.
    ///
    /// # Arguments
    ///
    /// * `other` - The permission list to merge
    pub fn merge(&mut self, other: &SharedPermissions) {
        self.can_view.extend(other.can_view.iter().copied());
        self.can_edit.extend(other.can_edit.iter().copied());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit_subset_of_view(permissions: &SharedPermissions) -> bool {
        permissions.editors().all(|u| permissions.can_view(*u))
    }

    #[test]
    fn test_grant_view() {
        let user_id = Uuid::now_v7();
        let mut permissions = SharedPermissions::new();

        permissions.grant_view(user_id);
        assert!(permissions.can_view(user_id));
        assert!(!permissions.can_edit(user_id));
        assert!(edit_subset_of_view(&permissions));
    }

    #[test]
    fn test_grant_edit_implies_view() {
        let user_id = Uuid::now_v7();
        let mut permissions = SharedPermissions::new();

        permissions.grant_edit(user_id);
        assert!(permissions.can_view(user_id));
        assert!(permissions.can_edit(user_id));
        assert!(edit_subset_of_view(&permissions));
    }

    #[test]
    fn test_revoke_view_cascades_to_edit() {
        let user_id = Uuid::now_v7();
        let mut permissions = SharedPermissions::new();

        permissions.grant_edit(user_id);
        assert!(permissions.revoke_view(user_id));

        assert!(!permissions.can_view(user_id));
        assert!(!permissions.can_edit(user_id));
        assert!(edit_subset_of_view(&permissions));
    }

    #[test]
    fn test_revoke_edit_keeps_view() {
        let user_id = Uuid::now_v7();
        let mut permissions = SharedPermissions::new();

        permissions.grant_edit(user_id);
        assert!(permissions.revoke_edit(user_id));

        assert!(permissions.can_view(user_id));
        assert!(!permissions.can_edit(user_id));
    }

    #[test]
    fn test_revoke_absent_user() {
        let mut permissions = SharedPermissions::new();
        assert!(!permissions.revoke_view(Uuid::now_v7()));
        assert!(!permissions.revoke_edit(Uuid::now_v7()));
    }

    #[test]
    fn test_invariant_holds_across_mutation_sequences() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();
        let c = Uuid::now_v7();
        let mut permissions = SharedPermissions::new();

        permissions.grant_view(a);
        permissions.grant_edit(b);
        permissions.grant_edit(c);
        permissions.revoke_edit(b);
        permissions.revoke_view(c);
        permissions.grant_edit(a);

        assert!(edit_subset_of_view(&permissions));
        assert_eq!(permissions.len(), 2);
    }

    #[test]
    fn test_merge() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();

        let mut first = SharedPermissions::new();
        first.grant_view(a);

        let mut second = SharedPermissions::new();
        second.grant_edit(b);

        first.merge(&second);
        assert!(first.can_view(a));
        assert!(first.can_edit(b));
        assert!(edit_subset_of_view(&first));
    }

    #[test]
    fn test_clear() {
        let mut permissions = SharedPermissions::new();
        permissions.grant_edit(Uuid::now_v7());
        permissions.clear();
        assert!(permissions.is_empty());
    }
}
