//! Dependency injection traits.
//!
//! All external dependencies are abstracted behind traits and injected via
//! the reducer's Environment parameter. The two dependencies of the checkout
//! machine are a [`Clock`] and the [`CheckoutApi`] boundary.
//!
//! # Dyn Compatibility
//!
//! [`CheckoutApi`] uses explicit `Pin<Box<dyn Future>>` returns instead of
//! `async fn` to enable trait object usage (`Arc<dyn CheckoutApi>`). This is
//! required for the effect system, where reducers create futures that capture
//! the API handle.

use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, Utc};

use crate::address::{Address, BillingAddress};
use crate::cart::{Cart, GiftMessage, PlacedOrder};
use crate::error::ApiError;
use crate::payment::{CreditCardRequest, GiftCardRequest, PlaceOrderRequest};

/// Clock trait - abstracts time operations for testability
///
/// Production code injects a [`SystemClock`]; tests inject a fixed clock so
/// timestamps are deterministic.
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Boxed future returned by [`CheckoutApi`] operations
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// The checkout API boundary
///
/// Every operation is asynchronous request/response: on success the server
/// returns the full updated [`Cart`] snapshot (the source of truth for the
/// order), on failure the implementation returns an [`ApiError`]. A non-2xx
/// transport status MUST surface as an error, whatever the transport's own
/// success representation looks like.
///
/// Implementations: `HttpCheckoutApi` in the client crate (production) and
/// `InMemoryCheckoutApi` in the testing crate.
pub trait CheckoutApi: Send + Sync {
    /// Fetch the current cart snapshot
    fn fetch_cart(&self) -> ApiFuture<'_, Cart>;

    /// Persist the shipping address; the returned cart has `shipping_address` populated
    fn save_shipping_address(&self, address: Address) -> ApiFuture<'_, Cart>;

    /// Persist the gift message; the returned cart has `gift_message` populated
    fn save_gift_message(&self, gift_message: GiftMessage) -> ApiFuture<'_, Cart>;

    /// Remove the gift message; the returned cart has `gift_message` cleared
    fn remove_gift_message(&self) -> ApiFuture<'_, Cart>;

    /// Apply a gift card; the returned cart carries the applied card in
    /// `payment_details.payment_classification.gift_card`
    fn apply_gift_card(&self, request: GiftCardRequest) -> ApiFuture<'_, Cart>;

    /// Remove an applied gift card by its payment id
    fn remove_gift_card(&self, payment_id: String) -> ApiFuture<'_, Cart>;

    /// Persist the credit card; the returned cart has `payment_details` populated
    fn save_credit_card(&self, request: CreditCardRequest) -> ApiFuture<'_, Cart>;

    /// Persist the billing address; the returned cart has `billing_address`
    /// and `billing_same_as_shipping` populated
    fn save_billing_address(&self, address: BillingAddress) -> ApiFuture<'_, Cart>;

    /// Place the order for the given cart number
    fn place_order(&self, request: PlaceOrderRequest) -> ApiFuture<'_, PlacedOrder>;
}
