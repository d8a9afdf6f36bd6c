//! Single-screen todo list built on the tasklist architecture.
//!
//! The feature is a pure state machine: a closed set of actions, one
//! exhaustive reducer, and no side effects. The store owns the state and
//! serializes transitions; the presentation layer sends actions, re-renders
//! from the state after each one, and surfaces rejections however it likes.
//!
//! It demonstrates:
//!
//! - Flat list state with insertion order preserved
//! - Compose and edit buffers modeled in state, not in the view
//! - Typed validation rejections (`TodoError`) returned to the caller
//! - Environment-injected id generation
//! - Testing with `ReducerTest`
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tasklist_app::{TodoAction, TodoEnvironment, TodoReducer, TodoState};
//! use tasklist_core::environment::UuidGenerator;
//! use tasklist_runtime::Store;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create environment and store
//! let env = TodoEnvironment::new(Arc::new(UuidGenerator));
//! let store = Store::new(TodoState::new(), TodoReducer::new(), env);
//!
//! // Compose and add an item
//! store
//!     .send(TodoAction::SetComposeText {
//!         text: "Buy milk".to_string(),
//!     })
//!     .await?;
//! store.send(TodoAction::AddTodo).await?;
//!
//! // Read state
//! let state = store.state(|s| s.clone()).await;
//! println!("Total items: {}", state.count());
//! # Ok(())
//! # }
//! ```

pub mod reducer;
pub mod types;

// Re-export commonly used types
pub use reducer::{TodoAction, TodoEnvironment, TodoError, TodoReducer};
pub use types::{EditDraft, TodoId, TodoItem, TodoState};
