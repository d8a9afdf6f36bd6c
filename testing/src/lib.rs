//! # Tasklist Testing
//!
//! Testing utilities and helpers for the tasklist architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A fluent Given/When/Then harness for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_testing::{ReducerTest, test_ids};
//!
//! ReducerTest::new(TodoReducer::new())
//!     .with_env(TodoEnvironment::new(test_ids()))
//!     .given_state(TodoState::new())
//!     .when_action(TodoAction::AddTodo)
//!     .then_rejection(|rejection| {
//!         assert_eq!(*rejection, TodoError::EmptyInputRejected);
//!     })
//!     .run();
//! ```


/// Mock implementations of Environment traits
///
/// Deterministic stand-ins for the production implementations in
/// `tasklist-core`, so reducer tests are reproducible.
pub mod mocks {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};

    use tasklist_core::environment::IdGenerator;

    /// Sequential id generator for deterministic tests
    ///
    /// Produces `"id-1"`, `"id-2"`, … in call order, so tests can name the
    /// ids they expect instead of capturing random ones.
    ///
    /// # Example
    ///
    /// ```
    /// use tasklist_core::environment::IdGenerator;
    /// use tasklist_testing::mocks::SequentialIdGenerator;
    ///
    /// let ids = SequentialIdGenerator::new();
    /// assert_eq!(ids.generate(), "id-1");
    /// assert_eq!(ids.generate(), "id-2");
    /// ```
    #[derive(Debug)]
    pub struct SequentialIdGenerator {
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Create a generator whose first id is `"id-1"`
        #[must_use]
        pub const fn new() -> Self {
            Self {
                next: AtomicU64::new(1),
            }
        }
    }

    impl Default for SequentialIdGenerator {
        fn default() -> Self {
            Self::new()
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn generate(&self) -> String {
            format!("id-{}", self.next.fetch_add(1, Ordering::SeqCst))
        }
    }

    /// Create a shared sequential id generator for tests
    #[must_use]
    pub fn test_ids() -> Arc<dyn IdGenerator> {
        Arc::new(SequentialIdGenerator::new())
    }
}

// Re-export commonly used items
pub use mocks::{SequentialIdGenerator, test_ids};
pub use reducer_test::{ReducerTest, assertions};
