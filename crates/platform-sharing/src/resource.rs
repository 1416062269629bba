//! # Resource authorization
//!
//! The capability evaluation for shared resources (tasks and notes). All
//! precedence rules live in one pure function so they can be tested without
//! persistence and cannot drift apart across resource types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::actions::Action;
use crate::permissions::SharedPermissions;

/// A resource that can be shared into a workspace.
///
/// Task and note entities implement this trait to expose the fields the
/// capability evaluation needs. A resource with no workspace is "personal"
/// and visible to its owner alone.
pub trait SharedResource {
    /// The user who owns (authored) the resource.
    fn owner_id(&self) -> Uuid;

    /// The workspace the resource belongs to, if any.
    fn workspace_id(&self) -> Option<Uuid>;

    /// Whether the resource is shared to its workspace.
    fn is_shared_to_workspace(&self) -> bool;

    /// The user the resource is assigned to, if the resource type supports
    /// assignment (tasks do, notes do not).
    fn assigned_user_id(&self) -> Option<Uuid> {
        None
    }

    /// The per-resource permission list, if one exists.
    fn shared_permissions(&self) -> Option<&SharedPermissions>;
}

/// The capability set a user holds on one resource.
///
/// # Example
///
/// ```
/// use platform_sharing::{Action, Capabilities};
///
/// let caps = Capabilities::OWNER;
/// assert!(caps.allows(Action::Delete));
///
/// let none = Capabilities::NONE;
/// assert!(!none.allows(Action::View));
/// ```
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Capabilities {
    /// May read the resource
    pub view: bool,

    /// May modify the resource
    pub edit: bool,

    /// May permanently remove the resource
    pub delete: bool,
}

impl Capabilities {
    /// No access at all.
    pub const NONE: Self = Self {
        view: false,
        edit: false,
        delete: false,
    };

    /// Full access, held only by the resource owner.
    pub const OWNER: Self = Self {
        view: true,
        edit: true,
        delete: true,
    };

    /// View-only access.
    pub const VIEW: Self = Self {
        view: true,
        edit: false,
        delete: false,
    };

    /// View and edit, without delete.
    pub const EDIT: Self = Self {
        view: true,
        edit: true,
        delete: false,
    };

    /// Check if these capabilities allow the given action.
    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::View => self.view,
            Action::Edit => self.edit,
            Action::Delete => self.delete,
        }
    }
}

/// Evaluate the capability set a user holds on a resource.
///
/// The precedence is fixed, first match wins:
///
/// 1. The owner holds full access, whatever the workspace state.
/// 2. A personal resource (no workspace) denies everyone else.
/// 3. The assigned user holds view and edit (assignment implies edit).
/// 4. A per-resource permission grant yields view, and edit if granted.
/// 5. Otherwise no access.
///
/// Delete is owner-only in every branch: no sharing grant ever implies
/// delete rights.
///
/// # Arguments
///
/// * `resource` - The resource being accessed
/// * `actor` - The requesting user
///
/// # Example
///
/// ```
/// use uuid::Uuid;
/// use platform_sharing::{capabilities, Capabilities, SharedPermissions, SharedResource};
///
/// struct Note {
///     owner_id: Uuid,
///     workspace_id: Option<Uuid>,
///     shared: bool,
///     permissions: Option<SharedPermissions>,
/// }
///
/// impl SharedResource for Note {
///     fn owner_id(&self) -> Uuid { self.owner_id }
///     fn workspace_id(&self) -> Option<Uuid> { self.workspace_id }
///     fn is_shared_to_workspace(&self) -> bool { self.shared }
///     fn shared_permissions(&self) -> Option<&SharedPermissions> { self.permissions.as_ref() }
/// }
///
/// let owner_id = Uuid::now_v7();
/// let note = Note { owner_id, workspace_id: None, shared: false, permissions: None };
///
/// assert_eq!(capabilities(&note, owner_id), Capabilities::OWNER);
/// assert_eq!(capabilities(&note, Uuid::now_v7()), Capabilities::NONE);
/// ```
pub fn capabilities<R: SharedResource + ?Sized>(resource: &R, actor: Uuid) -> Capabilities {
    if actor == resource.owner_id() {
        return Capabilities::OWNER;
    }

    // Personal resources bypass all sharing logic.
    if resource.workspace_id().is_none() {
        return Capabilities::NONE;
    }

    if resource.assigned_user_id() == Some(actor) {
        return Capabilities::EDIT;
    }

    if let Some(permissions) = resource.shared_permissions() {
        if permissions.can_view(actor) {
            return if permissions.can_edit(actor) {
                Capabilities::EDIT
            } else {
                Capabilities::VIEW
            };
        }
    }

    Capabilities::NONE
}

/// Check if a user may view a resource.
pub fn can_view<R: SharedResource + ?Sized>(resource: &R, actor: Uuid) -> bool {
    capabilities(resource, actor).view
}

/// Check if a user may edit a resource.
pub fn can_edit<R: SharedResource + ?Sized>(resource: &R, actor: Uuid) -> bool {
    capabilities(resource, actor).edit
}

/// Check if a user may delete a resource.
///
/// Always restricted to the owner.
pub fn can_delete<R: SharedResource + ?Sized>(resource: &R, actor: Uuid) -> bool {
    capabilities(resource, actor).delete
}
