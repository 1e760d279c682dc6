//! # Checkout Flow Core
//!
//! Core traits and types for the checkout flow architecture.
//!
//! This crate holds the pure half of the system: the [`reducer::Reducer`]
//! abstraction, [`effect::Effect`] descriptions, the cart domain model, and
//! the checkout state machine built on top of them.
//!
//! ## Core Concepts
//!
//! - **State**: the [`state::CheckoutState`] aggregate, owned by a single store
//! - **Action**: all possible inputs to the machine (commands, API feedback)
//! - **Reducer**: pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: side effect descriptions (not execution)
//! - **Environment**: injected dependencies ([`environment::CheckoutApi`], [`environment::Clock`])
//!
//! ## Architecture Principles
//!
//! - Functional core, imperative shell: all business rules live in
//!   [`machine::CheckoutReducer`]; the runtime crate executes the effects
//! - Unidirectional data flow: commands go in, a new state snapshot comes out
//! - The cart snapshot returned by the API is the source of truth; local
//!   slices are projections of it plus optimistic editing flags
//!
//! ## Example
//!
//! ```
//! use checkout_flow_core::machine::{CheckoutEnvironment, CheckoutReducer};
//! use checkout_flow_core::reducer::Reducer;
//! use checkout_flow_core::state::{CheckoutState, CheckoutStep};
//! use checkout_flow_core::action::CheckoutAction;
//!
//! # fn example(env: &CheckoutEnvironment) {
//! let reducer = CheckoutReducer;
//! let mut state = CheckoutState::default();
//!
//! let _effects = reducer.reduce(&mut state, CheckoutAction::SetDeliveryEditing(true), env);
//! assert_eq!(state.current_step, CheckoutStep::Delivery);
//! # }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};

pub mod action;
pub mod address;
pub mod cart;
pub mod effect;
pub mod environment;
pub mod error;
pub mod extract;
pub mod machine;
pub mod payment;
pub mod reducer;
pub mod state;
pub mod validate;
