//! # Cupcake Runtime
//!
//! Runtime implementation for the cupcake order flow.
//!
//! This crate provides the [`Store`] that coordinates reducer execution and
//! observer notification.
//!
//! ## Core Components
//!
//! - **Store**: owns the state and serializes every mutation through the reducer
//! - **Observers**: callbacks invoked synchronously after each mutation, in order
//! - **Shutdown**: stops accepting actions and drains the ones in flight
//!
//! ## Example
//!
//! ```ignore
//! use cupcake_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! store.observe(|state| println!("price is now {}", state.price));
//! store.send(Action::DoSomething).await?;
//!
//! let value = store.state(|s| s.some_field).await;
//! ```

use cupcake_core::reducer::Reducer;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::RwLock;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after shutdown initiated.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for in-flight actions to complete
        #[error("Shutdown timed out with {0} actions still in flight")]
        ShutdownTimeout(usize),
    }
}

pub use error::StoreError;

/// Identifier returned by [`Store::observe`], used to remove the observer again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Callback invoked with the state after every mutation
type Observer<S> = Arc<dyn Fn(&S) + Send + Sync>;

/// Registered observers, in registration order
struct ObserverList<S> {
    next_id: AtomicU64,
    entries: Mutex<Vec<(ObserverId, Observer<S>)>>,
}

impl<S> ObserverList<S> {
    fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            entries: Mutex::new(Vec::new()),
        }
    }

    fn add(&self, observer: Observer<S>) -> ObserverId {
        let id = ObserverId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, observer));
        id
    }

    fn remove(&self, id: ObserverId) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|(existing, _)| *existing != id);
        entries.len() != before
    }

    fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn notify(&self, state: &S) {
        // Snapshot the list so a callback may register or remove observers
        let observers: Vec<Observer<S>> = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        for observer in observers {
            observer(state);
        }
    }
}

/// Internal: RAII guard that marks an action as no longer in flight
///
/// Keeps the counter honest even if the reducer or an observer panics.
struct InFlightGuard(Arc<AtomicUsize>);

impl InFlightGuard {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{
        Arc, AtomicBool, AtomicUsize, Duration, InFlightGuard, ObserverId, ObserverList,
        Ordering, Reducer, RwLock, StoreError,
    };

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Observers notified after each mutation
    ///
    /// Cloning a Store yields another handle onto the same state.
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        observers: Arc<ObserverList<S>>,
        shutdown: Arc<AtomicBool>,
        in_flight: Arc<AtomicUsize>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                observers: Arc::new(ObserverList::new()),
                shutdown: Arc::new(AtomicBool::new(false)),
                in_flight: Arc::new(AtomicUsize::new(0)),
            }
        }

        /// The injected environment
        #[must_use]
        pub const fn environment(&self) -> &E {
            &self.environment
        }

        /// Register a callback invoked with the new state after every action
        ///
        /// Callbacks run synchronously inside [`Store::send`], in registration
        /// order, while the state lock is held. They must not call back into
        /// the store.
        pub fn observe<F>(&self, observer: F) -> ObserverId
        where
            F: Fn(&S) + Send + Sync + 'static,
        {
            let id = self.observers.add(Arc::new(observer));
            tracing::debug!(observer = id.0, "Observer registered");
            id
        }

        /// Remove a previously registered observer
        ///
        /// Returns `false` if the id was unknown.
        pub fn unobserve(&self, id: ObserverId) -> bool {
            let removed = self.observers.remove(id);
            tracing::debug!(observer = id.0, removed, "Observer removed");
            removed
        }

        /// Number of registered observers
        #[must_use]
        pub fn observer_count(&self) -> usize {
            self.observers.len()
        }

        /// Number of actions currently being reduced or waiting for the lock
        #[must_use]
        pub fn in_flight(&self) -> usize {
            self.in_flight.load(Ordering::Acquire)
        }

        /// Initiate graceful shutdown of the store
        ///
        /// Rejects new actions, then waits for actions already inside
        /// [`Store::send`] to finish.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if the timeout expires before
        /// every in-flight action completes.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Initiating graceful shutdown");
            self.shutdown.store(true, Ordering::Release);

            let start = std::time::Instant::now();
            let poll_interval = Duration::from_millis(10);

            loop {
                let pending = self.in_flight();

                if pending == 0 {
                    tracing::info!("All actions completed, shutdown successful");
                    return Ok(());
                }

                if start.elapsed() >= timeout {
                    tracing::error!(in_flight = pending, "Shutdown timeout");
                    return Err(StoreError::ShutdownTimeout(pending));
                }

                tokio::time::sleep(poll_interval).await;
            }
        }

        /// Send an action to the store
        ///
        /// 1. Acquires write lock on state
        /// 2. Calls reducer with (state, action, environment)
        /// 3. Notifies observers with the updated state
        ///
        /// Observers have seen the new state by the time this returns.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<(), StoreError> {
            let _in_flight = InFlightGuard::enter(&self.in_flight);

            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.commands.rejected").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            metrics::counter!("store.commands.total").increment(1);

            let mut state = self.state.write().await;
            self.reducer.reduce(&mut *state, action, &self.environment);
            tracing::trace!("Reducer completed");

            self.observers.notify(&*state);
            Ok(())
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let quantity = store.state(|s| s.quantity()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
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
                observers: Arc::clone(&self.observers),
                shutdown: Arc::clone(&self.shutdown),
                in_flight: Arc::clone(&self.in_flight),
            }
        }
    }
}

// Re-export for convenience
pub use store::Store;
