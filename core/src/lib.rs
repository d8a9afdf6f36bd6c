//! # Tasklist Core
//!
//! Core traits and types for the tasklist architecture.
//!
//! This crate provides the fundamental abstractions for building features as
//! pure state machines driven by a store runtime.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature
//! - **Action**: All possible inputs to a reducer, as a closed tagged union
//! - **Reducer**: Pure function `(State, Action, Environment) → Result<Effects, Rejection>`
//! - **Rejection**: Typed validation failure returned to the caller with state untouched
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Explicit Effects (no hidden I/O)
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```
//! use tasklist_core::{SmallVec, effect::Effect, reducer::Reducer};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: i64,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!     type Rejection = std::convert::Infallible;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!         _env: &(),
//!     ) -> Result<SmallVec<[Effect<CounterAction>; 4]>, Self::Rejection> {
//!         match action {
//!             CounterAction::Increment => state.count += 1,
//!         }
//!         Ok(SmallVec::new())
//!     }
//! }
//! ```

// Re-export the effect buffer type so reducers don't need a direct smallvec
// dependency for their return signature.
pub use smallvec::{SmallVec, smallvec};

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions:
/// `(State, Action, Environment) → Result<Effects, Rejection>`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::SmallVec;
    use super::effect::Effect;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    /// - `Rejection`: The typed validation failure this reducer can return
    ///
    /// # Contract
    ///
    /// A reducer must be deterministic given `(state, action, environment)`,
    /// and on `Err` it must leave the state exactly as it received it:
    /// validate first, mutate after. The store relies on this to report a
    /// rejection to the caller while guaranteeing the state did not move.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// The validation failure type returned to the caller
        type Rejection;

        /// Reduce an action into state changes and effects
        ///
        /// 1. Validates the action against the current state
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed by the runtime
        ///
        /// # Errors
        ///
        /// Returns the reducer's `Rejection` when the action fails
        /// validation. State must be untouched on this path.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> Result<SmallVec<[Effect<Self::Action>; 4]>, Self::Rejection>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values, not execution: a reducer returns them, the store
/// executes them and feeds any resulting actions back into the reducer.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what
    /// should happen, returned from reducers and executed by the Store
    /// runtime. Effects in one returned batch execute concurrently.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Delayed action (for timeouts, debounce-style flows)
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after the delay
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if `Some`, the action is fed back into
        /// the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    impl<Action> Effect<Action> {
        /// Wrap an async computation as an effect
        ///
        /// ```
        /// use tasklist_core::effect::Effect;
        ///
        /// #[derive(Debug)]
        /// enum Action { Loaded }
        ///
        /// let effect = Effect::future(async { Some(Action::Loaded) });
        /// assert!(matches!(effect, Effect::Future(_)));
        /// ```
        pub fn future<F>(fut: F) -> Self
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Effect::Future(Box::pin(fut))
        }

        /// Dispatch an action after a delay
        #[must_use]
        pub fn delay(duration: Duration, action: Action) -> Self {
            Effect::Delay {
                duration,
                action: Box::new(action),
            }
        }
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter. Production implementations live next to
/// the trait; deterministic test implementations live in the testing crate.
pub mod environment {
    use uuid::Uuid;

    /// `IdGenerator` trait - abstracts identifier generation for testability
    ///
    /// Implementations must produce values unique among concurrently live
    /// items for the lifetime of the process.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasklist_core::environment::{IdGenerator, UuidGenerator};
    ///
    /// let ids = UuidGenerator;
    /// assert_ne!(ids.generate(), ids.generate());
    /// ```
    pub trait IdGenerator: Send + Sync {
        /// Generate a fresh identifier
        fn generate(&self) -> String;
    }

    /// Production id generator backed by UUID v4
    #[derive(Debug, Clone, Copy, Default)]
    pub struct UuidGenerator;

    impl IdGenerator for UuidGenerator {
        fn generate(&self) -> String {
            Uuid::new_v4().to_string()
        }
    }
}
