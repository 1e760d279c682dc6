//! The checkout state aggregate.
//!
//! One [`CheckoutState`] value exists per checkout session, owned exclusively
//! by the store; the presentation layer only ever sees read-only snapshots.
//! Two kinds of flags coexist and must never be conflated:
//!
//! - `is_complete` is **server-derived**: it is set by explicit completion
//!   events and by cart hydration, both of which require the backing data to
//!   actually exist on the snapshot.
//! - `is_editing` is **local-only and optimistic**: it is toggled by the
//!   presentation layer and is never touched by hydration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::address::{Address, BillingAddress};
use crate::cart::{Cart, GiftMessage};
use crate::payment::{CreditCardSummary, GiftCardSummary};

/// The three sequential steps of the checkout wizard
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CheckoutStep {
    /// Step 1: shipping address and gift message
    #[default]
    Delivery,
    /// Step 2: payment methods and billing address
    Payment,
    /// Step 3: review and place order
    Review,
}

impl CheckoutStep {
    /// One-based step number as the wizard displays it
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Delivery => 1,
            Self::Payment => 2,
            Self::Review => 3,
        }
    }
}

impl std::fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Delivery => "Delivery",
            Self::Payment => "Payment",
            Self::Review => "Review",
        };
        write!(f, "{name}")
    }
}

/// Delivery step slice: shipping address plus the optional gift message
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliverySlice {
    /// Saved shipping address
    pub shipping_address: Option<Address>,
    /// Saved gift message (optional content of the step, no own completeness flag)
    pub gift_message: Option<GiftMessage>,
    /// Whether the step has been completed (implies `shipping_address` is present)
    pub is_complete: bool,
    /// Whether the customer reopened the step for editing
    pub is_editing: bool,
}

/// Payment step slice: payment methods plus the billing address
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentSlice {
    /// Applied gift card
    pub gift_card: Option<GiftCardSummary>,
    /// Saved credit card
    pub credit_card: Option<CreditCardSummary>,
    /// Saved billing address
    pub billing_address: Option<BillingAddress>,
    /// Whether the step has been completed (implies billing address and a payment method)
    pub is_complete: bool,
    /// Whether the customer reopened the step for editing
    pub is_editing: bool,
}

/// Per-operation in-flight flags, one per saveable field
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadingFlags {
    /// Shipping address save in flight
    pub shipping_address: bool,
    /// Gift message save in flight
    pub gift_message: bool,
    /// Gift card application in flight
    pub gift_card: bool,
    /// Credit card save in flight
    pub credit_card: bool,
    /// Billing address save in flight
    pub billing_address: bool,
}

impl LoadingFlags {
    /// Whether any save is currently in flight
    #[must_use]
    pub const fn any(self) -> bool {
        self.shipping_address
            || self.gift_message
            || self.gift_card
            || self.credit_card
            || self.billing_address
    }
}

/// Per-operation error messages, same key set as [`LoadingFlags`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors {
    /// Last shipping address save failure
    pub shipping_address: Option<String>,
    /// Last gift message save/remove failure
    pub gift_message: Option<String>,
    /// Last gift card apply/remove failure
    pub gift_card: Option<String>,
    /// Last credit card save failure
    pub credit_card: Option<String>,
    /// Last billing address save failure
    pub billing_address: Option<String>,
}

/// The process-wide checkout aggregate
///
/// Created empty at session start, mutated exclusively by
/// [`CheckoutReducer`](crate::machine::CheckoutReducer), reset wholesale by
/// the `Reset` action. `cart` is replaced in full on every successful API
/// response; the slices are projections of it plus the local editing flags.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutState {
    /// The step the wizard is showing
    pub current_step: CheckoutStep,
    /// Delivery step slice
    pub delivery: DeliverySlice,
    /// Payment step slice
    pub payment: PaymentSlice,
    /// Latest cart snapshot (`None` until the first successful fetch)
    pub cart: Option<Cart>,
    /// Per-field in-flight flags
    pub loading: LoadingFlags,
    /// Per-field error messages
    pub errors: FieldErrors,
    /// Last cart fetch failure; cleared when a fetch starts
    ///
    /// A failed fetch records its message here and leaves `cart` and
    /// `current_step` untouched, so "no data yet" and "fetch failed" stay
    /// distinguishable for the presentation layer.
    pub fetch_error: Option<String>,
    /// When the cart snapshot was last replaced by a successful API response
    pub last_synced_at: Option<DateTime<Utc>>,
}

impl CheckoutState {
    /// Guard for completing the delivery step: the shipping address must
    /// already be saved
    #[must_use]
    pub const fn can_complete_delivery(&self) -> bool {
        self.delivery.shipping_address.is_some()
    }

    /// Guard for completing the payment step: a billing address plus at least
    /// one payment method must already be saved
    #[must_use]
    pub const fn can_complete_payment(&self) -> bool {
        self.payment.billing_address.is_some()
            && (self.payment.credit_card.is_some() || self.payment.gift_card.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_empty_and_at_delivery() {
        let state = CheckoutState::default();
        assert_eq!(state.current_step, CheckoutStep::Delivery);
        assert_eq!(state.current_step.number(), 1);
        assert!(state.cart.is_none());
        assert!(!state.delivery.is_complete);
        assert!(!state.payment.is_complete);
        assert!(!state.loading.any());
        assert_eq!(state.errors, FieldErrors::default());
        assert!(state.fetch_error.is_none());
    }

    #[test]
    fn payment_guard_needs_billing_and_a_method() {
        let mut state = CheckoutState::default();
        assert!(!state.can_complete_payment());

        state.payment.billing_address = Some(BillingAddress::default());
        assert!(!state.can_complete_payment());

        state.payment.gift_card = Some(GiftCardSummary::default());
        assert!(state.can_complete_payment());

        state.payment.billing_address = None;
        assert!(!state.can_complete_payment());
    }
}
