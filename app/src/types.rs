//! Domain types for the todo list feature.
//!
//! The whole feature state is one value: the item list, the compose buffer,
//! and the optional edit draft. It is owned by the store and replaced only
//! through reducer transitions.

use serde::{Deserialize, Serialize};

/// Unique identifier for a todo item
///
/// Opaque to the feature; values come from the environment's `IdGenerator`
/// and are unique for the lifetime of the process.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TodoId(String);

impl TodoId {
    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TodoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier
    pub id: TodoId,
    /// Display text, exactly as the user entered it
    pub text: String,
    /// Whether the item is completed
    pub completed: bool,
}

impl TodoItem {
    /// Creates a new, not-yet-completed todo item
    #[must_use]
    pub const fn new(id: TodoId, text: String) -> Self {
        Self {
            id,
            text,
            completed: false,
        }
    }
}

/// The item currently in edit mode, together with its pending text
///
/// The draft's existence IS the editing flag: when nothing is being edited
/// there is no draft, so a stale edit buffer cannot outlive its item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditDraft {
    /// Identifier of the item being edited
    pub id: TodoId,
    /// Pending replacement text
    pub text: String,
}

/// State of the todo list feature
///
/// Items keep their insertion order; identifiers are unique within the list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// All items, in insertion order
    pub todos: Vec<TodoItem>,
    /// Text being composed for a new item
    pub compose_text: String,
    /// The single item in edit mode, if any
    pub editing: Option<EditDraft>,
}

impl TodoState {
    /// Creates a new empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of items
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Returns the number of completed items
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }

    /// Returns an item by id
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&TodoItem> {
        self.todos.iter().find(|t| t.id == *id)
    }

    /// Checks whether an item exists
    #[must_use]
    pub fn contains(&self, id: &TodoId) -> bool {
        self.get(id).is_some()
    }

    /// Checks whether the given item is the one in edit mode
    #[must_use]
    pub fn is_editing(&self, id: &TodoId) -> bool {
        self.editing.as_ref().is_some_and(|draft| draft.id == *id)
    }
}
