//! Side effect descriptions.
//!
//! Effects are NOT executed immediately. They are descriptions of what should
//! happen, returned from reducers and executed by the Store runtime. This
//! keeps reducers pure and directly testable: a test can assert on the
//! returned effects without running any I/O.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Effect type - describes a side effect to be executed
///
/// # Type Parameters
///
/// - `Action`: the action type that effects can produce (feedback loop)
///
/// The dominant variant in this workspace is [`Effect::Future`]: a command
/// reducer arm flips its loading flag and returns a future that calls the
/// checkout API and feeds the success/failure action back into the store.
#[allow(missing_docs)]
pub enum Effect<Action> {
    /// No-op effect
    None,

    /// Run effects in parallel
    Parallel(Vec<Effect<Action>>),

    /// Run effects sequentially
    Sequential(Vec<Effect<Action>>),

    /// Delayed action (for timeouts)
    Delay {
        /// How long to wait
        duration: Duration,
        /// Action to dispatch after delay
        action: Box<Action>,
    },

    /// Arbitrary async computation
    ///
    /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
    Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
}

// Manual Debug implementation since Future doesn't implement Debug
impl<Action> std::fmt::Debug for Effect<Action>
where
    Action: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::None => write!(f, "Effect::None"),
            Effect::Parallel(effects) => f.debug_tuple("Effect::Parallel").field(effects).finish(),
            Effect::Sequential(effects) => {
                f.debug_tuple("Effect::Sequential").field(effects).finish()
            },
            Effect::Delay { duration, action } => f
                .debug_struct("Effect::Delay")
                .field("duration", duration)
                .field("action", action)
                .finish(),
            Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
        }
    }
}

impl<Action> Effect<Action> {
    /// Combine effects to run in parallel
    #[must_use]
    pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
        Effect::Parallel(effects)
    }

    /// Chain effects to run sequentially
    #[must_use]
    pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
        Effect::Sequential(effects)
    }

    /// Wrap a future producing an action into an effect
    ///
    /// Convenience for the common "call the API, feed the result back" shape:
    ///
    /// ```ignore
    /// Effect::from_future(async move {
    ///     match api.fetch_cart().await {
    ///         Ok(cart) => CheckoutAction::CartFetched(Box::new(cart)),
    ///         Err(error) => CheckoutAction::CartFetchFailed(error.to_string()),
    ///     }
    /// })
    /// ```
    pub fn from_future<F>(future: F) -> Effect<Action>
    where
        F: Future<Output = Action> + Send + 'static,
    {
        Effect::Future(Box::pin(async move { Some(future.await) }))
    }
}
