//! # Checkout Flow Testing
//!
//! Testing utilities and helpers for the checkout flow workspace.
//!
//! This crate provides:
//! - Mock implementations of the environment traits ([`FixedClock`],
//!   [`InMemoryCheckoutApi`])
//! - Cart and form fixtures shared across the workspace's tests
//! - The [`ReducerTest`] fluent harness for pure reducer tests
//!
//! ## Example
//!
//! ```ignore
//! use checkout_flow_testing::{test_clock, InMemoryCheckoutApi};
//!
//! #[tokio::test]
//! async fn test_checkout_flow() {
//!     let api = Arc::new(InMemoryCheckoutApi::new());
//!     let checkout = Checkout::new(api, Arc::new(test_clock()));
//!
//!     checkout.fetch_cart().await.unwrap();
//!     assert!(checkout.state().await.cart.is_some());
//! }
//! ```

pub mod fixtures;
pub mod mocks;
pub mod reducer_test;

// Re-export commonly used items
pub use mocks::{FixedClock, InMemoryCheckoutApi, MockOperation, test_clock};
pub use reducer_test::ReducerTest;
