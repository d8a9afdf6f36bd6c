//! # Tasklist Runtime
//!
//! Runtime implementation for the tasklist architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that owns state and executes effects
//! - **Effect Executor**: Executes effect descriptions and feeds actions back to reducers
//! - **`EffectHandle`**: Lets callers wait for the effects of a `send` to finish
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action; a rejected action surfaces as StoreError::Rejected
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tasklist_core::{effect::Effect, reducer::Reducer};
use tokio::sync::{RwLock, watch};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur when sending an action to a Store
    ///
    /// The only failure mode of a transition is the reducer rejecting the
    /// action; the rejection is carried here so the presentation layer can
    /// decide how to surface it (dialog, inline message, log line).
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError<Rejection> {
        /// The reducer rejected the action
        ///
        /// State is guaranteed to be exactly as it was before the `send`.
        #[error("action rejected: {0}")]
        Rejected(Rejection),
    }

    impl<Rejection> StoreError<Rejection> {
        /// Unwrap the rejection carried by this error
        pub fn into_rejection(self) -> Rejection {
            match self {
                Self::Rejected(rejection) => rejection,
            }
        }
    }
}

pub use error::StoreError;

/// Handle for tracking effect completion
///
/// Returned by [`Store::send`] to allow waiting for effects to complete.
/// Each action gets a handle that can be awaited to know when the effects it
/// produced (and the reducer runs of any actions they fed back) are done.
///
/// # Example
///
/// ```ignore
/// let mut handle = store.send(Action::Start).await?;
/// handle.wait().await;
/// // All effects from Action::Start have now dispatched
/// ```
#[derive(Clone)]
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    /// Create a new effect handle together with its tracking side
    fn new() -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            effects: Arc::clone(&counter),
            completion: rx,
        };

        let tracking = EffectTracking {
            counter,
            notifier: tx,
        };

        (handle, tracking)
    }

    /// Create a handle that's already complete
    ///
    /// Useful for initialization in loops where you need a `last_handle`.
    #[must_use]
    pub fn completed() -> Self {
        let (tx, rx) = watch::channel(());
        let _ = tx.send(());

        Self {
            effects: Arc::new(AtomicUsize::new(0)),
            completion: rx,
        }
    }

    /// Wait for all effects to complete
    ///
    /// Returns immediately if the originating `send` produced no effects.
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            let _ = self.completion.changed().await;
        }
    }

    /// Wait for all effects to complete, giving up after `timeout`
    ///
    /// # Errors
    ///
    /// Returns [`tokio::time::error::Elapsed`] if the timeout expires before
    /// all effects complete.
    pub async fn wait_with_timeout(
        &mut self,
        timeout: Duration,
    ) -> Result<(), tokio::time::error::Elapsed> {
        tokio::time::timeout(timeout, self.wait()).await
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending_effects", &self.effects.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Internal: effect tracking context passed through effect execution
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: watch::Sender<()>,
}

impl EffectTracking {
    /// Effect started
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    /// Effect completed; notifies waiters when the counter reaches zero
    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _ = self.notifier.send(());
        }
    }
}

/// Internal: RAII guard that decrements the effect counter on drop
///
/// Ensures the counter is always decremented, even if the effect panics.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{
        Arc, DecrementGuard, Effect, EffectHandle, EffectTracking, Reducer, RwLock, StoreError,
    };

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`; the write lock serializes transitions)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
            }
        }
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
        R::Rejection: std::fmt::Debug + Send + 'static,
        A: Send + 'static,
        S: Send + Sync + 'static,
        E: Clone + Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
            }
        }

        /// Send an action to the store
        ///
        /// This is the primary way to interact with the store:
        /// 1. Acquires the write lock on state
        /// 2. Calls the reducer with (state, action, environment)
        /// 3. Executes returned effects asynchronously
        /// 4. Effects may produce more actions (feedback loop)
        ///
        /// The reducer executes synchronously while holding the write lock,
        /// so concurrent `send` calls serialize at the reducer level and the
        /// state transition is complete when `send` returns. Effects execute
        /// in spawned tasks; use the returned [`EffectHandle`] to wait for
        /// them.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::Rejected`] when the reducer rejects the
        /// action; state is left exactly as it was.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError<R::Rejection>> {
            tracing::debug!("processing action");

            let (handle, tracking) = EffectHandle::new();

            let effects = {
                let mut state = self.state.write().await;
                tracing::trace!("acquired write lock on state");

                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();

                self.reducer
                    .reduce(&mut state, action, &self.environment)
                    .map_err(StoreError::Rejected)?
            };

            tracing::trace!(count = effects.len(), "reducer completed, executing effects");
            for effect in effects {
                self.execute_effect(effect, tracking.clone());
            }

            Ok(handle)
        }

        /// Read current state via a closure
        ///
        /// Access state through a closure to ensure the read lock is
        /// released promptly:
        ///
        /// ```ignore
        /// let todo_count = store.state(|s| s.todos.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&state)
        }

        /// Execute an effect with tracking
        ///
        /// - `None`: no-op
        /// - `Delay`: waits for the duration, then sends the action
        /// - `Future`: awaits the computation, sends the resulting action if `Some`
        ///
        /// Effects are fire-and-forget: a feedback action that is itself
        /// rejected is logged and dropped. The [`DecrementGuard`] keeps the
        /// handle's counter accurate even if an effect panics.
        #[tracing::instrument(skip_all, name = "execute_effect")]
        fn execute_effect(&self, effect: Effect<A>, tracking: EffectTracking) {
            match effect {
                Effect::None => {
                    tracing::trace!("no-op effect");
                },
                Effect::Delay { duration, action } => {
                    tracing::trace!(?duration, "scheduling delayed action");
                    tracking.increment();

                    let store = self.clone();
                    tokio::spawn(async move {
                        let _guard = DecrementGuard(tracking);

                        tokio::time::sleep(duration).await;
                        if let Err(error) = store.send(*action).await {
                            tracing::warn!(?error, "delayed action rejected");
                        }
                    });
                },
                Effect::Future(fut) => {
                    tracing::trace!("spawning effect future");
                    tracking.increment();

                    let store = self.clone();
                    tokio::spawn(async move {
                        let _guard = DecrementGuard(tracking);

                        if let Some(action) = fut.await {
                            tracing::trace!("effect produced an action, feeding back");
                            if let Err(error) = store.send(action).await {
                                tracing::warn!(?error, "feedback action rejected");
                            }
                        } else {
                            tracing::trace!("effect completed with no action");
                        }
                    });
                },
            }
        }
    }
}

pub use store::Store;
