//! # Checkout Flow Runtime
//!
//! Runtime implementation for the checkout flow architecture.
//!
//! This crate provides the [`Store`] runtime that coordinates reducer
//! execution and effect handling, plus the [`checkout::Checkout`] command
//! facade the presentation layer talks to.
//!
//! ## Core Components
//!
//! - **Store**: the runtime that manages state and executes effects
//! - **Effect executor**: runs effect descriptions and feeds actions back to the reducer
//! - **Command facade**: validates inputs, dispatches commands, and awaits terminal actions
//!
//! ## Concurrency model
//!
//! The store is the single writer: `send()` applies the reducer under a write
//! lock, so reducer application is the only serialization point. Effects run
//! in spawned tasks and complete in non-deterministic order - two concurrent
//! saves interleave freely, each writing its own slice plus a wholesale
//! replacement of the cart snapshot (last write wins). There is no automatic
//! retry: a failed command surfaces its error once and waits for the caller
//! to re-invoke it.
//!
//! ## Example
//!
//! ```ignore
//! let store = Store::new(CheckoutState::default(), CheckoutReducer, environment);
//!
//! // Send an action
//! let handle = store.send(CheckoutAction::FetchCart).await?;
//! handle.wait().await;
//!
//! // Read state
//! let step = store.state(|s| s.current_step).await;
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use checkout_flow_core::effect::Effect;
use checkout_flow_core::reducer::Reducer;
use tokio::sync::{RwLock, broadcast, watch};

pub mod checkout;

pub use checkout::{Checkout, CheckoutStore, CommandError};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        #[error("store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        #[error("shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// Timeout waiting for a terminal action
        ///
        /// Returned by `send_and_wait_for` when the timeout expires before
        /// a matching action is received.
        #[error("timeout waiting for action")]
        Timeout,

        /// Action broadcast channel closed
        #[error("action broadcast channel closed")]
        ChannelClosed,
    }
}

pub use error::StoreError;

/// Configuration for a [`Store`]
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Capacity of the action broadcast channel
    pub broadcast_capacity: usize,
    /// Default timeout for [`Store::shutdown`]
    pub shutdown_timeout: Duration,
}

impl StoreConfig {
    /// Set the broadcast capacity
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }

    /// Set the default shutdown timeout
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: 16,
            shutdown_timeout: Duration::from_secs(30),
        }
    }
}

/// Handle for tracking effect completion
///
/// Returned by [`Store::send()`] to allow waiting for the effects spawned by
/// an action to finish. Cloning the handle shares the same underlying
/// counter.
///
/// # Example
///
/// ```ignore
/// let mut handle = store.send(CheckoutAction::FetchCart).await?;
/// handle.wait_with_timeout(Duration::from_secs(5)).await?;
/// // The fetch effect (and its feedback action) has been dispatched
/// ```
#[derive(Clone)]
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    fn new() -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (notifier, completion) = watch::channel(());

        let handle = Self {
            effects: Arc::clone(&counter),
            completion,
        };
        let tracking = EffectTracking { counter, notifier };

        (handle, tracking)
    }

    /// Create a handle that is already complete
    ///
    /// Useful for initialization in loops where you need a `last_handle`.
    #[must_use]
    pub fn completed() -> Self {
        let (notifier, completion) = watch::channel(());
        let _ = notifier.send(());

        Self {
            effects: Arc::new(AtomicUsize::new(0)),
            completion,
        }
    }

    /// Wait for all effects spawned by the action to complete
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            let _ = self.completion.changed().await;
        }
    }

    /// Wait for all effects with a timeout
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the timeout expires before all
    /// effects complete.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
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
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _ = self.notifier.send(());
        }
    }
}

/// Internal: RAII guard that decrements the effect counter on drop, so the
/// counter stays correct even when an effect task panics.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Guard that decrements an atomic counter on drop (for shutdown tracking)
struct AtomicCounterGuard(Arc<AtomicUsize>);

impl Drop for AtomicCounterGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// The Store - runtime coordinator for a reducer
///
/// The Store manages:
/// 1. State (behind `RwLock` for concurrent access)
/// 2. Reducer (business logic)
/// 3. Environment (injected dependencies)
/// 4. Effect execution (with feedback loop)
///
/// # Type Parameters
///
/// - `S`: state type
/// - `A`: action type
/// - `E`: environment type
/// - `R`: reducer implementation
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: R,
    environment: E,
    shutdown: Arc<AtomicBool>,
    pending_effects: Arc<AtomicUsize>,
    /// Action broadcast channel for observing actions produced by effects.
    ///
    /// All actions produced by effects (feedback from `Effect::Future` and
    /// `Effect::Delay`) are broadcast to observers. This is what
    /// `send_and_wait_for` builds its request/response pattern on.
    action_broadcast: broadcast::Sender<A>,
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
    A: Send + Clone + 'static,
    S: Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Create a new store with initial state, reducer, and environment
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self::with_config(initial_state, reducer, environment, StoreConfig::default())
    }

    /// Create a new store with custom configuration
    #[must_use]
    pub fn with_config(initial_state: S, reducer: R, environment: E, config: StoreConfig) -> Self {
        let (action_broadcast, _) = broadcast::channel(config.broadcast_capacity.max(1));

        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer,
            environment,
            shutdown: Arc::new(AtomicBool::new(false)),
            pending_effects: Arc::new(AtomicUsize::new(0)),
            action_broadcast,
        }
    }

    /// Send an action through the store
    ///
    /// 1. Acquires the state write lock
    /// 2. Calls the reducer with (state, action, environment)
    /// 3. Executes returned effects asynchronously
    /// 4. Effects may produce more actions (feedback loop)
    ///
    /// `send()` returns after *starting* effect execution, not completion;
    /// await the returned [`EffectHandle`] to wait for the effects. Multiple
    /// concurrent `send()` calls serialize at the reducer level only.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    #[tracing::instrument(skip(self, action), name = "store_send")]
    pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
        if self.shutdown.load(Ordering::Acquire) {
            tracing::warn!("rejected action: store is shutting down");
            metrics::counter!("store.shutdown.rejected_actions").increment(1);
            return Err(StoreError::ShutdownInProgress);
        }

        tracing::debug!("processing action");
        metrics::counter!("store.commands.total").increment(1);

        let (handle, tracking) = EffectHandle::new();

        let effects = {
            let mut state = self.state.write().await;
            tracing::trace!("acquired write lock on state");

            let start = std::time::Instant::now();
            let effects = self.reducer.reduce(&mut state, action, &self.environment);
            metrics::histogram!("store.reducer.duration_seconds")
                .record(start.elapsed().as_secs_f64());

            tracing::trace!("reducer completed, returned {} effects", effects.len());
            effects
        };

        for effect in effects {
            self.execute_effect(effect, tracking.clone());
        }

        Ok(handle)
    }

    /// Send an action and wait for a matching result action
    ///
    /// Designed for request-response command patterns: subscribe to the
    /// action broadcast *before* sending (avoids the race), send the initial
    /// action, then wait for the first effect-produced action matching the
    /// predicate.
    ///
    /// Only actions produced by effects are broadcast, not the initial
    /// action. With concurrent commands on the same field, the first matching
    /// terminal action wins - callers that need to distinguish requests
    /// should match on payload.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Timeout`]: timeout expired before a matching action
    /// - [`StoreError::ChannelClosed`]: broadcast closed (store shutting down)
    /// - [`StoreError::ShutdownInProgress`]: store is shutting down
    pub async fn send_and_wait_for<F>(
        &self,
        action: A,
        predicate: F,
        timeout: Duration,
    ) -> Result<A, StoreError>
    where
        F: Fn(&A) -> bool,
    {
        let mut rx = self.action_broadcast.subscribe();

        self.send(action).await?;

        tokio::time::timeout(timeout, async {
            loop {
                match rx.recv().await {
                    Ok(action) if predicate(&action) => return Ok(action),
                    Ok(_) => {},
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // Slow consumer; if the terminal action was dropped
                        // the timeout catches it.
                        tracing::warn!(skipped, "action observer lagged");
                    },
                    Err(broadcast::error::RecvError::Closed) => {
                        return Err(StoreError::ChannelClosed);
                    },
                }
            }
        })
        .await
        .map_err(|_| StoreError::Timeout)?
    }

    /// Subscribe to all actions produced by effects
    #[must_use]
    pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
        self.action_broadcast.subscribe()
    }

    /// Read current state via a closure
    ///
    /// Access state through a closure so the read lock is released promptly:
    ///
    /// ```ignore
    /// let step = store.state(|s| s.current_step).await;
    /// ```
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&state)
    }

    /// Number of effects currently running
    #[must_use]
    pub fn pending_effects(&self) -> usize {
        self.pending_effects.load(Ordering::SeqCst)
    }

    /// Stop accepting actions and wait for running effects to drain
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] when effects are still running
    /// after the timeout.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        self.shutdown.store(true, Ordering::Release);
        tracing::info!("store shutdown initiated");

        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let pending = self.pending_effects.load(Ordering::SeqCst);
            if pending == 0 {
                tracing::info!("store shutdown complete");
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                tracing::warn!(pending, "store shutdown timed out");
                return Err(StoreError::ShutdownTimeout(pending));
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    /// Execute an effect with completion tracking
    ///
    /// Effects are fire-and-forget: a failing or panicking effect task is
    /// logged and the counter still decrements via [`DecrementGuard`].
    /// Reducer panics, by contrast, propagate - reducers are pure functions
    /// and must not panic.
    fn execute_effect(&self, effect: Effect<A>, tracking: EffectTracking) {
        match effect {
            Effect::None => {
                metrics::counter!("store.effects.executed", "type" => "none").increment(1);
            },
            Effect::Future(fut) => {
                metrics::counter!("store.effects.executed", "type" => "future").increment(1);
                tracking.increment();

                self.pending_effects.fetch_add(1, Ordering::SeqCst);
                let pending_guard = AtomicCounterGuard(Arc::clone(&self.pending_effects));

                let store = self.clone();
                tokio::spawn(async move {
                    let _guard = DecrementGuard(tracking);
                    let _pending_guard = pending_guard;

                    if let Some(action) = fut.await {
                        tracing::trace!("effect produced an action, feeding back");
                        // Apply before broadcasting: an observer resumed by
                        // `send_and_wait_for` must read post-transition state.
                        let _ = store.send(action.clone()).await;
                        let _ = store.action_broadcast.send(action);
                    }
                });
            },
            Effect::Delay { duration, action } => {
                metrics::counter!("store.effects.executed", "type" => "delay").increment(1);
                tracking.increment();

                self.pending_effects.fetch_add(1, Ordering::SeqCst);
                let pending_guard = AtomicCounterGuard(Arc::clone(&self.pending_effects));

                let store = self.clone();
                tokio::spawn(async move {
                    let _guard = DecrementGuard(tracking);
                    let _pending_guard = pending_guard;

                    tokio::time::sleep(duration).await;
                    let _ = store.send((*action).clone()).await;
                    let _ = store.action_broadcast.send(*action);
                });
            },
            Effect::Parallel(effects) => {
                metrics::counter!("store.effects.executed", "type" => "parallel").increment(1);
                for effect in effects {
                    self.execute_effect(effect, tracking.clone());
                }
            },
            Effect::Sequential(effects) => {
                metrics::counter!("store.effects.executed", "type" => "sequential").increment(1);
                tracking.increment();

                self.pending_effects.fetch_add(1, Ordering::SeqCst);
                let pending_guard = AtomicCounterGuard(Arc::clone(&self.pending_effects));

                let store = self.clone();
                tokio::spawn(async move {
                    let _guard = DecrementGuard(tracking);
                    let _pending_guard = pending_guard;

                    for effect in effects {
                        // Sub-tracking per step so each effect finishes before
                        // the next one starts
                        let (sub_notifier, mut sub_rx) = watch::channel(());
                        let sub_tracking = EffectTracking {
                            counter: Arc::new(AtomicUsize::new(0)),
                            notifier: sub_notifier,
                        };

                        store.execute_effect(effect, sub_tracking.clone());

                        while sub_tracking.counter.load(Ordering::SeqCst) > 0 {
                            let _ = sub_rx.changed().await;
                        }
                    }
                });
            },
        }
    }
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
            shutdown: Arc::clone(&self.shutdown),
            pending_effects: Arc::clone(&self.pending_effects),
            action_broadcast: self.action_broadcast.clone(),
        }
    }
}
