//! # Taskdeck Core
//!
//! Core traits and types for the taskdeck architecture: a unidirectional
//! loop in which UI events are reduced into a new state snapshot plus a set
//! of one-shot effect descriptions.
//!
//! ## Core Concepts
//!
//! - **State**: the single snapshot a screen session owns
//! - **Event**: all possible inputs to a reducer (UI intents and the results
//!   that asynchronous work feeds back in)
//! - **Reducer**: pure function `(State, Event, Environment) → (State, Effects)`
//! - **Effect**: side-effect descriptions (not execution)
//! - **Environment**: injected dependencies via traits
//!
//! ## Architecture Principles
//!
//! - Functional core, imperative shell: reducers never perform I/O
//! - Unidirectional data flow: effects feed events back in, nothing else
//!   mutates state
//! - Dependency injection via the `Environment` associated type
//!
//! ## Example
//!
//! ```ignore
//! use taskdeck_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! impl Reducer for ScreenReducer {
//!     type State = ScreenState;
//!     type Event = ScreenEvent;
//!     type SideEffect = ScreenNotice;
//!     type Environment = ScreenEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut ScreenState,
//!         event: ScreenEvent,
//!         env: &ScreenEnvironment,
//!     ) -> SmallVec<[Effect<ScreenEvent, ScreenNotice>; 4]> {
//!         // Business logic goes here
//!         smallvec![]
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

/// Reducer module - the core trait for business logic
///
/// Reducers are pure functions: `(State, Event, Environment) → (State, Effects)`.
/// They contain all transition logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for screen business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: the state snapshot this reducer operates on
    /// - `Event`: the event type this reducer processes
    /// - `SideEffect`: the one-shot notification type this reducer may emit
    /// - `Environment`: the injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The event type this reducer processes
        type Event;

        /// The one-shot notification type this reducer may emit
        type SideEffect;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an event into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Inspects the event
        /// 2. Updates state in place (the runtime owns snapshot publication)
        /// 3. Returns effect descriptions to be executed
        fn reduce(
            &self,
            state: &mut Self::State,
            event: Self::Event,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Event, Self::SideEffect>; 4]>;
    }
}

/// Effect module - side-effect descriptions
///
/// Effects describe side effects to be performed by the runtime. They are
/// values (not execution): the reducer returns them and the Store spawns or
/// delivers them.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what
    /// should happen, returned from reducers and executed by the Store
    /// runtime.
    ///
    /// # Type Parameters
    ///
    /// - `E`: the event type that effects can produce (feedback loop)
    /// - `N`: the one-shot notification type delivered out-of-band
    pub enum Effect<E, N> {
        /// No-op effect
        None,

        /// Arbitrary async computation
        ///
        /// Returns `Option<E>` - if `Some`, the event is fed back into the
        /// reducer as a separate unit of work.
        Future(Pin<Box<dyn Future<Output = Option<E>> + Send>>),

        /// A one-shot notification for the side-effect channel
        ///
        /// Notifications are never part of state; they are delivered at most
        /// once to the currently attached consumer and dropped otherwise.
        Notify(N),
    }

    impl<E, N> Effect<E, N> {
        /// Box and pin an async computation into an [`Effect::Future`]
        pub fn future<F>(fut: F) -> Self
        where
            F: Future<Output = Option<E>> + Send + 'static,
        {
            Effect::Future(Box::pin(fut))
        }
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<E, N> std::fmt::Debug for Effect<E, N>
    where
        N: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
                Effect::Notify(notice) => {
                    f.debug_tuple("Effect::Notify").field(notice).finish()
                },
            }
        }
    }
}

/// Environment module - dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected via
/// each reducer's `Environment` type.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// Production uses [`SystemClock`]; tests use a fixed clock so timestamp
    /// assertions stay deterministic.
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// System clock - the production [`Clock`]
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
