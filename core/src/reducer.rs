//! The core trait for business logic.
//!
//! Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
//! They contain all business rules, update state in place, and describe any
//! I/O as [`Effect`](crate::effect::Effect) values for the runtime to execute.

use crate::effect::Effect;

/// The Reducer trait - core abstraction for business logic
///
/// # Type Parameters
///
/// - `State`: the domain state this reducer operates on
/// - `Action`: the action type this reducer processes
/// - `Environment`: the injected dependencies this reducer needs
///
/// # Example
///
/// ```ignore
/// impl Reducer for CheckoutReducer {
///     type State = CheckoutState;
///     type Action = CheckoutAction;
///     type Environment = CheckoutEnvironment;
///
///     fn reduce(
///         &self,
///         state: &mut CheckoutState,
///         action: CheckoutAction,
///         env: &CheckoutEnvironment,
///     ) -> Vec<Effect<CheckoutAction>> {
///         match action {
///             CheckoutAction::Reset => {
///                 *state = CheckoutState::default();
///                 vec![Effect::None]
///             }
///             _ => vec![Effect::None],
///         }
///     }
/// }
/// ```
pub trait Reducer {
    /// The state type this reducer operates on
    type State;

    /// The action type this reducer processes
    type Action;

    /// The environment type with injected dependencies
    type Environment;

    /// Reduce an action into state changes and effects
    ///
    /// This is a pure function that:
    /// 1. Validates the action against the current state
    /// 2. Updates state in place
    /// 3. Returns effect descriptions to be executed by the runtime
    ///
    /// # Arguments
    ///
    /// - `state`: mutable reference to current state
    /// - `action`: the action to process
    /// - `env`: reference to injected dependencies
    ///
    /// # Returns
    ///
    /// A vector of effects to be executed by the runtime
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Vec<Effect<Self::Action>>;
}
