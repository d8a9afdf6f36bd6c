//! Reducer logic for the todo list feature.
//!
//! One exhaustive transition function over a closed action set. Validation
//! happens before any mutation, so a rejected action leaves the state
//! exactly as it was.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tasklist_core::{SmallVec, effect::Effect, environment::IdGenerator, reducer::Reducer};
use thiserror::Error;

use crate::types::{EditDraft, TodoId, TodoItem, TodoState};

/// Actions driving the todo list
///
/// Commands sent by the presentation layer in response to user input.
/// Unknown identifiers are silent no-ops; only empty input is rejected.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum TodoAction {
    /// Replace the compose buffer with `text`
    SetComposeText {
        /// New compose buffer contents
        text: String,
    },

    /// Append a new item built from the compose buffer, then clear it
    AddTodo,

    /// Flip the completion flag of the matching item
    ToggleTodo {
        /// Item to toggle
        id: TodoId,
    },

    /// Remove the matching item, preserving the order of the rest
    DeleteTodo {
        /// Item to delete
        id: TodoId,
    },

    /// Put an item into edit mode, seeding the draft with its current text
    BeginEdit {
        /// Item to edit
        id: TodoId,
    },

    /// Replace the edit draft's pending text
    SetEditText {
        /// New draft contents
        text: String,
    },

    /// Replace the target item's text and leave edit mode
    SaveEdit {
        /// Item whose text to replace
        id: TodoId,
        /// Replacement text
        text: String,
    },
}

/// Validation failures surfaced to the caller
///
/// The presentation layer decides how to show these (dialog, inline
/// message, toast); the state is guaranteed untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoError {
    /// Submitted text was empty after trimming
    #[error("please enter at least one letter")]
    EmptyInputRejected,
}

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Source of fresh item identifiers
    pub ids: Arc<dyn IdGenerator>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }
}

/// Reducer for the todo list feature
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Rejects text that is empty once trimmed
    fn validate_text(text: &str) -> Result<(), TodoError> {
        if text.trim().is_empty() {
            return Err(TodoError::EmptyInputRejected);
        }

        Ok(())
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;
    type Rejection = TodoError;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Result<SmallVec<[Effect<Self::Action>; 4]>, Self::Rejection> {
        match action {
            TodoAction::SetComposeText { text } => {
                state.compose_text = text;
            },

            TodoAction::AddTodo => {
                Self::validate_text(&state.compose_text)?;

                let id = TodoId::from(env.ids.generate());
                let text = std::mem::take(&mut state.compose_text);
                state.todos.push(TodoItem::new(id, text));
            },

            TodoAction::ToggleTodo { id } => {
                if let Some(todo) = state.todos.iter_mut().find(|t| t.id == id) {
                    todo.completed = !todo.completed;
                }
            },

            TodoAction::DeleteTodo { id } => {
                state.todos.retain(|t| t.id != id);

                // The draft must never point at an item that is gone.
                if state.is_editing(&id) {
                    state.editing = None;
                }
            },

            TodoAction::BeginEdit { id } => {
                let current = state
                    .todos
                    .iter()
                    .find(|t| t.id == id)
                    .map(|t| t.text.clone());

                if let Some(text) = current {
                    state.editing = Some(EditDraft { id, text });
                }
            },

            TodoAction::SetEditText { text } => {
                if let Some(draft) = state.editing.as_mut() {
                    draft.text = text;
                }
            },

            TodoAction::SaveEdit { id, text } => {
                Self::validate_text(&text)?;

                if let Some(todo) = state.todos.iter_mut().find(|t| t.id == id) {
                    todo.text = text;
                }
                state.editing = None;
            },
        }

        // Pure state machine: transitions never produce side effects.
        Ok(SmallVec::new())
    }
}

#[cfg(test)]
mod tests {
    use tasklist_testing::{ReducerTest, assertions, test_ids};

    use super::*;

    fn test_env() -> TodoEnvironment {
        TodoEnvironment::new(test_ids())
    }

    fn item(id: &str, text: &str) -> TodoItem {
        TodoItem::new(TodoId::from(id), text.to_string())
    }

    fn state_with(todos: Vec<TodoItem>) -> TodoState {
        TodoState {
            todos,
            ..TodoState::new()
        }
    }

    #[test]
    fn set_compose_text_replaces_buffer() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::SetComposeText {
                text: "Buy milk".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.compose_text, "Buy milk");
                assert_eq!(state.count(), 0);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn add_todo_appends_item_and_clears_buffer() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(TodoState {
                compose_text: "  Buy milk  ".to_string(),
                ..TodoState::new()
            })
            .when_action(TodoAction::AddTodo)
            .then_state(|state| {
                assert_eq!(state.count(), 1);
                // The untrimmed input is preserved; only validation trims.
                assert_eq!(state.todos[0].text, "  Buy milk  ");
                assert!(!state.todos[0].completed);
                assert!(state.compose_text.is_empty());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn add_todo_rejects_whitespace_only_input() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(TodoState {
                compose_text: "   ".to_string(),
                ..TodoState::new()
            })
            .when_action(TodoAction::AddTodo)
            .then_rejection(|rejection| {
                assert_eq!(*rejection, TodoError::EmptyInputRejected);
            })
            .then_state(|state| {
                assert_eq!(state.count(), 0);
                assert_eq!(state.compose_text, "   ");
            })
            .run();
    }

    #[test]
    fn add_todo_generates_fresh_unique_ids() {
        let reducer = TodoReducer::new();
        let env = test_env();
        let mut state = TodoState::new();

        for text in ["One", "Two", "Three"] {
            let _ = reducer.reduce(
                &mut state,
                TodoAction::SetComposeText {
                    text: text.to_string(),
                },
                &env,
            );
            let _ = reducer.reduce(&mut state, TodoAction::AddTodo, &env);
        }

        assert_eq!(state.count(), 3);
        assert_eq!(state.todos[0].id, TodoId::from("id-1"));
        assert_eq!(state.todos[1].id, TodoId::from("id-2"));
        assert_eq!(state.todos[2].id, TodoId::from("id-3"));
    }

    #[test]
    fn toggle_flips_only_the_target() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(state_with(vec![item("id-1", "One"), item("id-2", "Two")]))
            .when_action(TodoAction::ToggleTodo {
                id: TodoId::from("id-1"),
            })
            .then_state(|state| {
                assert!(state.todos[0].completed);
                assert!(!state.todos[1].completed);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn toggle_twice_restores_the_flag() {
        let reducer = TodoReducer::new();
        let env = test_env();
        let mut state = state_with(vec![item("id-1", "One")]);

        let toggle = || TodoAction::ToggleTodo {
            id: TodoId::from("id-1"),
        };

        let _ = reducer.reduce(&mut state, toggle(), &env);
        assert!(state.todos[0].completed);

        let _ = reducer.reduce(&mut state, toggle(), &env);
        assert!(!state.todos[0].completed);
    }

    #[test]
    fn toggle_missing_id_is_a_noop() {
        let initial = state_with(vec![item("id-1", "One")]);
        let expected = initial.clone();

        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(initial)
            .when_action(TodoAction::ToggleTodo {
                id: TodoId::from("id-404"),
            })
            .then_state(move |state| {
                assert_eq!(*state, expected);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn delete_preserves_order_of_remaining_items() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(state_with(vec![
                item("id-1", "One"),
                item("id-2", "Two"),
                item("id-3", "Three"),
            ]))
            .when_action(TodoAction::DeleteTodo {
                id: TodoId::from("id-2"),
            })
            .then_state(|state| {
                let texts: Vec<_> = state.todos.iter().map(|t| t.text.as_str()).collect();
                assert_eq!(texts, ["One", "Three"]);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn delete_twice_removes_only_once() {
        let reducer = TodoReducer::new();
        let env = test_env();
        let mut state = state_with(vec![item("id-1", "One"), item("id-2", "Two")]);

        let delete = || TodoAction::DeleteTodo {
            id: TodoId::from("id-1"),
        };

        let _ = reducer.reduce(&mut state, delete(), &env);
        assert_eq!(state.count(), 1);

        let _ = reducer.reduce(&mut state, delete(), &env);
        assert_eq!(state.count(), 1);
    }

    #[test]
    fn delete_clears_the_draft_for_the_edited_item() {
        let mut initial = state_with(vec![item("id-1", "One")]);
        initial.editing = Some(EditDraft {
            id: TodoId::from("id-1"),
            text: "One".to_string(),
        });

        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(initial)
            .when_action(TodoAction::DeleteTodo {
                id: TodoId::from("id-1"),
            })
            .then_state(|state| {
                assert_eq!(state.count(), 0);
                assert!(state.editing.is_none());
            })
            .run();
    }

    #[test]
    fn delete_keeps_the_draft_for_other_items() {
        let mut initial = state_with(vec![item("id-1", "One"), item("id-2", "Two")]);
        initial.editing = Some(EditDraft {
            id: TodoId::from("id-1"),
            text: "One".to_string(),
        });

        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(initial)
            .when_action(TodoAction::DeleteTodo {
                id: TodoId::from("id-2"),
            })
            .then_state(|state| {
                assert!(state.is_editing(&TodoId::from("id-1")));
            })
            .run();
    }

    #[test]
    fn begin_edit_seeds_the_draft_with_current_text() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(state_with(vec![item("id-1", "One")]))
            .when_action(TodoAction::BeginEdit {
                id: TodoId::from("id-1"),
            })
            .then_state(|state| {
                assert_eq!(
                    state.editing,
                    Some(EditDraft {
                        id: TodoId::from("id-1"),
                        text: "One".to_string(),
                    })
                );
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn begin_edit_missing_id_is_a_noop() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(state_with(vec![item("id-1", "One")]))
            .when_action(TodoAction::BeginEdit {
                id: TodoId::from("id-404"),
            })
            .then_state(|state| {
                assert!(state.editing.is_none());
            })
            .run();
    }

    #[test]
    fn set_edit_text_replaces_the_draft_text() {
        let mut initial = state_with(vec![item("id-1", "One")]);
        initial.editing = Some(EditDraft {
            id: TodoId::from("id-1"),
            text: "One".to_string(),
        });

        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(initial)
            .when_action(TodoAction::SetEditText {
                text: "One!".to_string(),
            })
            .then_state(|state| {
                assert_eq!(
                    state.editing.as_ref().map(|d| d.text.as_str()),
                    Some("One!")
                );
                // The item itself is untouched until the edit is saved.
                assert_eq!(state.todos[0].text, "One");
            })
            .run();
    }

    #[test]
    fn set_edit_text_without_a_draft_is_a_noop() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(state_with(vec![item("id-1", "One")]))
            .when_action(TodoAction::SetEditText {
                text: "ignored".to_string(),
            })
            .then_state(|state| {
                assert!(state.editing.is_none());
                assert_eq!(state.todos[0].text, "One");
            })
            .run();
    }

    #[test]
    fn save_edit_replaces_text_and_leaves_edit_mode() {
        let mut initial = state_with(vec![item("id-1", "One"), item("id-2", "Two")]);
        initial.todos[1].completed = true;
        initial.editing = Some(EditDraft {
            id: TodoId::from("id-1"),
            text: "One!".to_string(),
        });
        let untouched = initial.todos[1].clone();

        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(initial)
            .when_action(TodoAction::SaveEdit {
                id: TodoId::from("id-1"),
                text: "One!".to_string(),
            })
            .then_state(move |state| {
                assert_eq!(state.todos[0].text, "One!");
                assert!(state.editing.is_none());
                assert_eq!(state.todos[1], untouched);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn save_edit_rejects_empty_text_and_stays_in_edit_mode() {
        let mut initial = state_with(vec![item("id-1", "One")]);
        initial.editing = Some(EditDraft {
            id: TodoId::from("id-1"),
            text: " ".to_string(),
        });

        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(initial)
            .when_action(TodoAction::SaveEdit {
                id: TodoId::from("id-1"),
                text: " ".to_string(),
            })
            .then_rejection(|rejection| {
                assert_eq!(*rejection, TodoError::EmptyInputRejected);
            })
            .then_state(|state| {
                assert_eq!(state.todos[0].text, "One");
                assert!(state.is_editing(&TodoId::from("id-1")));
            })
            .run();
    }

    #[test]
    fn save_edit_for_a_vanished_item_still_leaves_edit_mode() {
        let mut initial = state_with(vec![item("id-2", "Two")]);
        initial.editing = Some(EditDraft {
            id: TodoId::from("id-1"),
            text: "stale".to_string(),
        });

        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(initial)
            .when_action(TodoAction::SaveEdit {
                id: TodoId::from("id-1"),
                text: "stale".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.todos[0].text, "Two");
                assert!(state.editing.is_none());
            })
            .run();
    }

    #[test]
    fn compose_add_toggle_edit_save_scenario() {
        let reducer = TodoReducer::new();
        let env = test_env();
        let mut state = TodoState::new();

        let _ = reducer.reduce(
            &mut state,
            TodoAction::SetComposeText {
                text: "Buy milk".to_string(),
            },
            &env,
        );
        let _ = reducer.reduce(&mut state, TodoAction::AddTodo, &env);

        assert_eq!(state.count(), 1);
        let id = state.todos[0].id.clone();
        assert_eq!(state.todos[0].text, "Buy milk");
        assert!(!state.todos[0].completed);

        let _ = reducer.reduce(&mut state, TodoAction::ToggleTodo { id: id.clone() }, &env);
        assert!(state.todos[0].completed);

        let _ = reducer.reduce(&mut state, TodoAction::BeginEdit { id: id.clone() }, &env);
        let _ = reducer.reduce(
            &mut state,
            TodoAction::SetEditText {
                text: "Buy oat milk".to_string(),
            },
            &env,
        );
        let _ = reducer.reduce(
            &mut state,
            TodoAction::SaveEdit {
                id,
                text: "Buy oat milk".to_string(),
            },
            &env,
        );

        assert_eq!(state.todos[0].text, "Buy oat milk");
        assert!(state.todos[0].completed);
        assert!(state.editing.is_none());
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn double_toggle_restores_completion(completed: bool, text in ".{1,20}") {
                let reducer = TodoReducer::new();
                let env = test_env();
                let mut state = state_with(vec![TodoItem {
                    id: TodoId::from("id-1"),
                    text,
                    completed,
                }]);

                for _ in 0..2 {
                    let _ = reducer.reduce(
                        &mut state,
                        TodoAction::ToggleTodo { id: TodoId::from("id-1") },
                        &env,
                    );
                }

                prop_assert_eq!(state.todos[0].completed, completed);
            }

            #[test]
            fn add_appends_exactly_one_untrimmed_item(text in ".{0,40}") {
                prop_assume!(!text.trim().is_empty());

                let reducer = TodoReducer::new();
                let env = test_env();
                let mut state = TodoState {
                    compose_text: text.clone(),
                    ..TodoState::new()
                };

                let result = reducer.reduce(&mut state, TodoAction::AddTodo, &env);

                prop_assert!(result.is_ok());
                prop_assert_eq!(state.todos.len(), 1);
                prop_assert_eq!(&state.todos[0].text, &text);
                prop_assert!(!state.todos[0].completed);
                prop_assert!(state.compose_text.is_empty());
            }

            #[test]
            fn add_rejects_any_whitespace_only_buffer(text in "[ \\t]{0,10}") {
                let reducer = TodoReducer::new();
                let env = test_env();
                let mut state = TodoState {
                    compose_text: text.clone(),
                    ..TodoState::new()
                };

                let result = reducer.reduce(&mut state, TodoAction::AddTodo, &env);

                prop_assert!(matches!(result, Err(TodoError::EmptyInputRejected)));
                prop_assert_eq!(state.todos.len(), 0);
                prop_assert_eq!(&state.compose_text, &text);
            }
        }
    }
}
