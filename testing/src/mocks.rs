//! Mock implementations of the environment traits.

use std::sync::Mutex;

use checkout_flow_core::address::{Address, BillingAddress};
use checkout_flow_core::cart::{
    Cart, CreditCardDetails, GiftCardDetails, GiftMessage, PaymentClassification, PaymentDetails,
    PlacedOrder,
};
use checkout_flow_core::environment::{ApiFuture, CheckoutApi, Clock};
use checkout_flow_core::error::ApiError;
use checkout_flow_core::payment::{
    CardBrand, CreditCardRequest, GiftCardRequest, PlaceOrderRequest,
};
use chrono::{DateTime, Utc};

use crate::fixtures;

/// Fixed clock for deterministic tests
///
/// Always returns the same time, making tests reproducible.
#[derive(Debug, Clone)]
pub struct FixedClock {
    time: DateTime<Utc>,
}

impl FixedClock {
    /// Create a new fixed clock with the given time
    #[must_use]
    pub const fn new(time: DateTime<Utc>) -> Self {
        Self { time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.time
    }
}

/// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
///
/// # Panics
///
/// Panics if the hardcoded timestamp fails to parse, which should never
/// happen in practice.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_clock() -> FixedClock {
    FixedClock::new(
        DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .expect("hardcoded timestamp should always parse")
            .with_timezone(&Utc),
    )
}

/// The checkout operations, for arming one-shot failures on the mock API
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum MockOperation {
    FetchCart,
    SaveShippingAddress,
    SaveGiftMessage,
    RemoveGiftMessage,
    ApplyGiftCard,
    RemoveGiftCard,
    SaveCreditCard,
    SaveBillingAddress,
    PlaceOrder,
}

struct MockState {
    cart: Cart,
    next_gift_card_id: u32,
    next_order_number: u32,
    fail_next: Option<(MockOperation, String)>,
}

/// Stateful in-memory implementation of the checkout API.
///
/// Behaves like the storefront backend: every save merges the payload into
/// one shared cart and answers with the full updated snapshot. Gift cards
/// apply a fixed $50 with sequential `gc-<n>` ids; credit cards get their
/// brand classified from the number; placing an order stamps a sequential
/// order number. Use [`fail_next`](Self::fail_next) to make exactly one
/// upcoming operation fail, so error paths are testable.
pub struct InMemoryCheckoutApi {
    state: Mutex<MockState>,
}

impl InMemoryCheckoutApi {
    /// Create a mock seeded with the default one-item cart
    #[must_use]
    pub fn new() -> Self {
        Self::seeded_with(fixtures::empty_cart())
    }

    /// Create a mock seeded with a specific cart snapshot
    #[must_use]
    pub fn seeded_with(cart: Cart) -> Self {
        Self {
            state: Mutex::new(MockState {
                cart,
                next_gift_card_id: 1,
                next_order_number: 1,
                fail_next: None,
            }),
        }
    }

    /// Make the next call of `operation` fail with `message`
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned (a prior test panicked
    /// mid-operation).
    #[allow(clippy::expect_used)]
    pub fn fail_next(&self, operation: MockOperation, message: impl Into<String>) {
        let mut state = self.state.lock().expect("mock state lock");
        state.fail_next = Some((operation, message.into()));
    }

    /// Current cart snapshot held by the mock
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn cart(&self) -> Cart {
        self.state.lock().expect("mock state lock").cart.clone()
    }

    /// Lock the state, honor an armed failure, otherwise run the mutation
    #[allow(clippy::expect_used)]
    fn respond<T>(
        &self,
        operation: MockOperation,
        mutate: impl FnOnce(&mut MockState) -> T,
    ) -> Result<T, ApiError> {
        let mut state = self.state.lock().expect("mock state lock");

        if let Some((armed, message)) = state.fail_next.take() {
            if armed == operation {
                return Err(ApiError::Transport(message));
            }
            state.fail_next = Some((armed, message));
        }

        Ok(mutate(&mut state))
    }

    fn last4(number: &str) -> String {
        let digits: String = number.chars().filter(char::is_ascii_digit).collect();
        let cut = digits.len().saturating_sub(4);
        digits[cut..].to_string()
    }
}

impl Default for InMemoryCheckoutApi {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutApi for InMemoryCheckoutApi {
    fn fetch_cart(&self) -> ApiFuture<'_, Cart> {
        let result = self.respond(MockOperation::FetchCart, |state| state.cart.clone());
        Box::pin(async move { result })
    }

    fn save_shipping_address(&self, address: Address) -> ApiFuture<'_, Cart> {
        let result = self.respond(MockOperation::SaveShippingAddress, |state| {
            state.cart.shipping_address = Some(address);
            state.cart.clone()
        });
        Box::pin(async move { result })
    }

    fn save_gift_message(&self, gift_message: GiftMessage) -> ApiFuture<'_, Cart> {
        let result = self.respond(MockOperation::SaveGiftMessage, |state| {
            state.cart.gift_message = Some(gift_message);
            state.cart.gift_order = true;
            state.cart.clone()
        });
        Box::pin(async move { result })
    }

    fn remove_gift_message(&self) -> ApiFuture<'_, Cart> {
        let result = self.respond(MockOperation::RemoveGiftMessage, |state| {
            state.cart.gift_message = None;
            state.cart.gift_order = false;
            state.cart.clone()
        });
        Box::pin(async move { result })
    }

    fn apply_gift_card(&self, request: GiftCardRequest) -> ApiFuture<'_, Cart> {
        let result = self.respond(MockOperation::ApplyGiftCard, |state| {
            let last4 = Self::last4(&request.card_number);
            let id = format!("gc-{}", state.next_gift_card_id);
            state.next_gift_card_id += 1;

            let details = state.cart.payment_details.get_or_insert_with(PaymentDetails::default);
            details.last4_digits = Some(last4.clone());
            details.payment_method = Some("GIFT_CARD".into());
            details
                .payment_classification
                .get_or_insert_with(PaymentClassification::default)
                .gift_card = Some(GiftCardDetails {
                id: Some(id),
                last4_digits: Some(last4),
                applied_amount: Some(50.0),
                amount: None,
            });

            state.cart.clone()
        });
        Box::pin(async move { result })
    }

    fn remove_gift_card(&self, _payment_id: String) -> ApiFuture<'_, Cart> {
        let result = self.respond(MockOperation::RemoveGiftCard, |state| {
            if let Some(classification) = state
                .cart
                .payment_details
                .as_mut()
                .and_then(|details| details.payment_classification.as_mut())
            {
                classification.gift_card = None;
            }
            state.cart.clone()
        });
        Box::pin(async move { result })
    }

    fn save_credit_card(&self, request: CreditCardRequest) -> ApiFuture<'_, Cart> {
        let result = self.respond(MockOperation::SaveCreditCard, |state| {
            let last4 = Self::last4(&request.card_number);
            let brand = CardBrand::from_number(&request.card_number).to_string();

            let details = state.cart.payment_details.get_or_insert_with(PaymentDetails::default);
            details.card_holder_name = Some(request.card_holder_name.clone());
            details.masked_number = Some(format!("****{last4}"));
            details.last4_digits = Some(last4.clone());
            details.expiration_month = Some(request.expiration_month.clone());
            details.expiration_year = Some(request.expiration_year.clone());
            details.card_type = Some(brand.clone());
            details.payment_method = Some("CREDIT_CARD".into());
            // An applied gift card survives saving a credit card
            details
                .payment_classification
                .get_or_insert_with(PaymentClassification::default)
                .credit_card = Some(CreditCardDetails {
                card_type: Some(brand),
                last4_digits: Some(last4),
                expiration_month: Some(request.expiration_month),
                expiration_year: Some(request.expiration_year),
                card_holder_name: Some(request.card_holder_name),
            });

            state.cart.clone()
        });
        Box::pin(async move { result })
    }

    fn save_billing_address(&self, address: BillingAddress) -> ApiFuture<'_, Cart> {
        let result = self.respond(MockOperation::SaveBillingAddress, |state| {
            state.cart.billing_same_as_shipping = Some(address.billing_same_as_shipping);
            state.cart.billing_address = Some(address.address);
            state.cart.clone()
        });
        Box::pin(async move { result })
    }

    fn place_order(&self, request: PlaceOrderRequest) -> ApiFuture<'_, PlacedOrder> {
        let result = self.respond(MockOperation::PlaceOrder, |state| {
            let order_number = format!("ORD-{:06}", state.next_order_number);
            state.next_order_number += 1;

            let mut cart = state.cart.clone();
            cart.cart_number = Some(request.cart_number);
            cart.cart_state = Some("Ordered".into());

            PlacedOrder {
                order_number,
                order_date: Some(Utc::now().format("%m/%d/%Y").to_string()),
                cart,
            }
        });
        Box::pin(async move { result })
    }
}
