//! # Actions
//!
//! Defines the actions that can be performed on a shared resource.
//! Authorization answers are always phrased in terms of these actions.

use serde::{Deserialize, Serialize};

/// Actions that can be performed on a shared resource.
///
/// - **View**: Read the resource
/// - **Edit**: Modify the resource
/// - **Delete**: Remove the resource permanently
///
/// Delete is never granted through sharing; only the resource owner holds it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// View/read the resource.
    View,

    /// Modify the resource.
    Edit,

    /// Permanently remove the resource.
    Delete,
}

impl Action {
    /// Get the string representation of the action.
    ///
    /// # Returns
    ///
    /// A static string representation of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Edit => "edit",
            Action::Delete => "delete",
        }
    }

    /// Parse action from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive, supports aliases)
    ///
    /// # Returns
    ///
    /// `Some(Action)` if valid, `None` otherwise
    ///
    /// # Example
    ///
    /// ```
    /// use platform_sharing::Action;
    ///
    /// assert_eq!(Action::parse("view"), Some(Action::View));
    /// assert_eq!(Action::parse("write"), Some(Action::Edit)); // Alias
    /// assert_eq!(Action::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "view" | "read" | "get" => Some(Action::View),
            "edit" | "update" | "write" | "modify" => Some(Action::Edit),
            "delete" | "remove" | "destroy" => Some(Action::Delete),
            _ => None,
        }
    }

    /// Get all actions.
    pub fn all() -> &'static [Action] {
        &[Action::View, Action::Edit, Action::Delete]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_round_trip() {
        for action in Action::all() {
            assert_eq!(Action::parse(action.as_str()), Some(*action));
        }
    }

    #[test]
    fn test_action_aliases() {
        assert_eq!(Action::parse("read"), Some(Action::View));
        assert_eq!(Action::parse("WRITE"), Some(Action::Edit));
        assert_eq!(Action::parse("remove"), Some(Action::Delete));
        assert_eq!(Action::parse("share"), None);
    }
}
