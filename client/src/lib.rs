//! # Checkout Flow Client
//!
//! HTTP implementation of the checkout API boundary.
//!
//! [`HttpCheckoutApi`] implements
//! [`CheckoutApi`](checkout_flow_core::environment::CheckoutApi) against the
//! storefront checkout REST endpoints. Every operation is a JSON
//! request/response; any non-success status is treated as a failure whatever
//! the body says.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use checkout_flow_client::{ClientConfig, HttpCheckoutApi};
//!
//! # fn main() -> Result<(), checkout_flow_client::ClientError> {
//! let api = HttpCheckoutApi::new(ClientConfig::new("https://shop.example.com"))?;
//! let api: Arc<dyn checkout_flow_core::environment::CheckoutApi> = Arc::new(api);
//! # Ok(())
//! # }
//! ```

mod config;
mod http;

pub use config::{ClientConfig, ClientError};
pub use http::HttpCheckoutApi;
