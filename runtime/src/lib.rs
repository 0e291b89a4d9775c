//! # Taskdeck Runtime
//!
//! Runtime implementation for the taskdeck architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling for one screen session.
//!
//! ## Core Components
//!
//! - **Store**: owns the state snapshot, runs the reducer, executes effects
//! - **Effect execution**: spawned futures feed produced events back into the
//!   reducer; notifications go out over a bounded one-shot channel
//! - **EffectHandle**: lets callers wait for the transitive completion of the
//!   work a single dispatch started
//!
//! ## Concurrency model
//!
//! Each `send` reduces under a write lock, so individual state replacements
//! are atomic and pure events apply before `send` returns. Effect futures run
//! as independent spawned tasks: two in-flight units of work race freely and
//! the last snapshot write wins. This deliberately mirrors the screen's
//! accepted behavior; nothing serializes one in-flight mutation against the
//! next.
//!
//! ## Example
//!
//! ```ignore
//! use taskdeck_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Dispatch an event
//! let handle = store.send(Event::Refresh).await?;
//!
//! // Read state
//! let loading = store.state(|s| s.is_loading).await;
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use taskdeck_core::{effect::Effect, reducer::Reducer};
use tokio::sync::{RwLock, broadcast, watch};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new events
        ///
        /// This error is returned when `send()` is called after shutdown
        /// initiated.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        ///
        /// Some effects were still running when the timeout elapsed.
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),
    }
}

pub use error::StoreError;

/// Configuration for Store instances
///
/// # Example
///
/// ```ignore
/// let config = StoreConfig::default()
///     .with_side_effect_capacity(4)
///     .with_shutdown_timeout(Duration::from_secs(60));
///
/// let store = Store::with_config(state, reducer, env, config);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Capacity of the one-shot side-effect channel
    ///
    /// The default of 1 gives at-most-one buffered notification; a lagging
    /// consumer loses the oldest value.
    pub side_effect_capacity: usize,
    /// Default timeout for graceful shutdown
    pub default_shutdown_timeout: Duration,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(side_effect_capacity: usize, default_shutdown_timeout: Duration) -> Self {
        Self {
            side_effect_capacity,
            default_shutdown_timeout,
        }
    }

    /// Set the side-effect channel capacity
    #[must_use]
    pub const fn with_side_effect_capacity(mut self, capacity: usize) -> Self {
        self.side_effect_capacity = capacity;
        self
    }

    /// Set the default shutdown timeout
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.default_shutdown_timeout = timeout;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            side_effect_capacity: 1,
            default_shutdown_timeout: Duration::from_secs(30),
        }
    }
}

/// Handle for tracking effect completion
///
/// Returned by [`Store::send()`] to allow waiting for effects to complete.
/// Tracking is transitive: an effect future whose event triggers further
/// effects keeps the handle pending until the whole cascade has drained.
///
/// # Example
///
/// ```ignore
/// let mut handle = store.send(Event::Refresh).await?;
/// handle.wait_with_timeout(Duration::from_secs(5)).await?;
/// // All work started by Event::Refresh is now complete
/// ```
#[derive(Clone)]
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    /// Create a new effect handle together with its tracking token
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

    /// Wait for all effects (including cascaded ones) to complete
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            let _ = self.completion.changed().await;
        }
    }

    /// Wait for all effects to complete with a timeout
    ///
    /// # Errors
    ///
    /// Returns `Err(())` if the timeout expires before all effects complete.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), ()> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| ())
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending_effects", &self.effects.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Internal: effect tracking token passed through effect execution
///
/// Cloned into every spawned effect; feedback events re-enter the reducer
/// with the same token so the counter covers the transitive cascade.
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: watch::Sender<()>,
}

impl EffectTracking {
    /// Increment the effect counter (effect started)
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    /// Decrement the effect counter (effect completed)
    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            // Counter reached zero, notify waiters
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

/// Guard that decrements an atomic counter on drop (for shutdown tracking)
struct AtomicCounterGuard(Arc<AtomicUsize>);

impl Drop for AtomicCounterGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Store module - the runtime for reducers
pub mod store {
    use super::{
        Arc, AtomicBool, AtomicCounterGuard, AtomicUsize, DecrementGuard, Duration, Effect,
        EffectHandle, EffectTracking, Ordering, Reducer, RwLock, StoreConfig, StoreError,
        broadcast, watch,
    };

    /// The Store - runtime coordinator for one reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`; replaced wholesale and republished as a
    ///    snapshot after every reduce)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (spawned futures with a feedback loop)
    /// 5. The one-shot side-effect channel
    ///
    /// # Type Parameters
    ///
    /// - `S`: state type
    /// - `E`: event type
    /// - `N`: side-effect (notification) type
    /// - `Env`: environment type
    /// - `R`: reducer implementation
    pub struct Store<S, E, N, Env, R>
    where
        R: Reducer<State = S, Event = E, SideEffect = N, Environment = Env>,
    {
        state: Arc<RwLock<S>>,
        snapshots: watch::Sender<S>,
        reducer: R,
        environment: Env,
        side_effects: broadcast::Sender<N>,
        shutdown: Arc<AtomicBool>,
        pending_effects: Arc<AtomicUsize>,
    }

    impl<S, E, N, Env, R> Store<S, E, N, Env, R>
    where
        R: Reducer<State = S, Event = E, SideEffect = N, Environment = Env>
            + Send
            + Sync
            + 'static,
        S: Clone + Send + Sync + 'static,
        E: Send + 'static,
        N: Clone + Send + 'static,
        Env: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses the default configuration: side-effect channel capacity 1,
        /// 30 second shutdown timeout.
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: Env) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new store with custom configuration
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: Env,
            config: StoreConfig,
        ) -> Self {
            let (side_effects, _) = broadcast::channel(config.side_effect_capacity.max(1));
            let (snapshots, _) = watch::channel(initial_state.clone());

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                snapshots,
                reducer,
                environment,
                side_effects,
                shutdown: Arc::new(AtomicBool::new(false)),
                pending_effects: Arc::new(AtomicUsize::new(0)),
            }
        }

        /// Send an event to the store
        ///
        /// This is the primary way to interact with the store:
        /// 1. Acquires the write lock on state
        /// 2. Calls the reducer with (state, event, environment)
        /// 3. Publishes the new snapshot
        /// 4. Executes returned effects asynchronously
        ///
        /// Pure events are fully applied before `send` returns; I/O-bound
        /// effects run as spawned tasks and may still be in flight. The
        /// returned [`EffectHandle`] waits for the transitive cascade: a
        /// feedback event's own effects count against the same handle.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is
        /// shutting down.
        #[tracing::instrument(skip(self, event), name = "store_send")]
        pub async fn send(&self, event: E) -> Result<EffectHandle, StoreError>
        where
            R: Clone,
            Env: Clone,
        {
            let (handle, tracking) = EffectHandle::new();
            self.send_tracked(event, &tracking).await?;
            Ok(handle)
        }

        /// Internal send implementation carrying the tracking token
        async fn send_tracked(&self, event: E, tracking: &EffectTracking) -> Result<(), StoreError>
        where
            R: Clone,
            Env: Clone,
        {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected event: store is shutting down");
                metrics::counter!("store.shutdown.rejected_events").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            metrics::counter!("store.events.total").increment(1);

            let effects = {
                let mut state = self.state.write().await;

                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();

                let start = std::time::Instant::now();
                let effects = self.reducer.reduce(&mut state, event, &self.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(start.elapsed().as_secs_f64());

                // Publish the snapshot while still holding the write lock so
                // observers never see snapshots out of order.
                self.snapshots.send_replace((*state).clone());

                effects
            };

            tracing::trace!("Reducer returned {} effects", effects.len());
            for effect in effects {
                self.execute_effect(effect, tracking.clone());
            }

            Ok(())
        }

        /// Execute one effect with tracking
        ///
        /// - `None`: no-op
        /// - `Notify`: publish on the side-effect channel; dropped (and
        ///   counted) when no consumer is attached
        /// - `Future`: spawned task; a produced event re-enters the reducer
        ///   with the same tracking token
        fn execute_effect(&self, effect: Effect<E, N>, tracking: EffectTracking)
        where
            R: Clone,
            Env: Clone,
        {
            match effect {
                Effect::None => {
                    metrics::counter!("store.effects.executed", "type" => "none").increment(1);
                },
                Effect::Notify(notice) => {
                    metrics::counter!("store.effects.executed", "type" => "notify").increment(1);
                    if self.side_effects.send(notice).is_err() {
                        // No consumer attached at emission time; one-shot
                        // notifications are not retained for late subscribers.
                        tracing::debug!("Side effect dropped: no subscriber");
                        metrics::counter!("store.side_effects.dropped").increment(1);
                    }
                },
                Effect::Future(fut) => {
                    metrics::counter!("store.effects.executed", "type" => "future").increment(1);
                    tracking.increment();

                    // Track global pending effects for shutdown
                    self.pending_effects.fetch_add(1, Ordering::SeqCst);
                    let pending_guard = AtomicCounterGuard(Arc::clone(&self.pending_effects));

                    let store = self.clone();

                    tokio::spawn(async move {
                        let _guard = DecrementGuard(tracking.clone());
                        let _pending_guard = pending_guard; // Decrement on drop

                        if let Some(event) = fut.await {
                            tracing::trace!("Effect produced an event, feeding back");
                            let _ = store.send_tracked(event, &tracking).await;
                        }
                    });
                },
            }
        }

        /// Read current state via a closure
        ///
        /// Access state through a closure to ensure the lock is released
        /// promptly:
        ///
        /// ```ignore
        /// let task_count = store.state(|s| s.tasks.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&state)
        }

        /// Subscribe to state snapshots
        ///
        /// Every reduce publishes the whole new snapshot; receivers observe
        /// the latest value and never a partially updated one.
        #[must_use]
        pub fn subscribe_state(&self) -> watch::Receiver<S> {
            self.snapshots.subscribe()
        }

        /// Subscribe to one-shot side effects
        ///
        /// Each value is delivered to the consumers attached at emission
        /// time; nothing is replayed to late subscribers, and a lagging
        /// consumer loses the oldest buffered value.
        #[must_use]
        pub fn subscribe_side_effects(&self) -> broadcast::Receiver<N> {
            self.side_effects.subscribe()
        }

        /// Initiate graceful shutdown of the store
        ///
        /// Sets the shutdown flag (rejecting new events), then waits for
        /// pending effects to complete.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if the timeout expires
        /// before all pending effects complete.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Initiating graceful shutdown");
            metrics::counter!("store.shutdown.initiated").increment(1);

            self.shutdown.store(true, Ordering::Release);

            let start = std::time::Instant::now();
            let poll_interval = Duration::from_millis(100);

            loop {
                let pending = self.pending_effects.load(Ordering::Acquire);

                if pending == 0 {
                    tracing::info!("All effects completed, shutdown successful");
                    return Ok(());
                }

                if start.elapsed() >= timeout {
                    tracing::error!(pending_effects = pending, "Shutdown timed out");
                    return Err(StoreError::ShutdownTimeout(pending));
                }

                tokio::time::sleep(poll_interval).await;
            }
        }
    }

    impl<S, E, N, Env, R> Clone for Store<S, E, N, Env, R>
    where
        R: Reducer<State = S, Event = E, SideEffect = N, Environment = Env> + Clone,
        Env: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                snapshots: self.snapshots.clone(),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                side_effects: self.side_effects.clone(),
                shutdown: Arc::clone(&self.shutdown),
                pending_effects: Arc::clone(&self.pending_effects),
            }
        }
    }
}

// Re-export for convenience
pub use store::Store;
