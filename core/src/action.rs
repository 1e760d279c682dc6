//! All inputs to the checkout state machine.
//!
//! Commands (imperative, issued by the presentation layer) and API feedback
//! events (produced by effects) share one action type, so the reducer is the
//! single place every transition is written down. Each async save follows the
//! same three-action family: `Save… → …Saved | …Failed`. Removals are
//! fire-and-forget: they have no pending action, only terminal ones.

use serde::{Deserialize, Serialize};

use crate::address::{Address, BillingAddress};
use crate::cart::{Cart, GiftMessage};
use crate::payment::{CreditCardRequest, GiftCardRequest};
use crate::state::CheckoutStep;

/// Input to [`CheckoutReducer`](crate::machine::CheckoutReducer)
///
/// Cart snapshots are boxed to keep the action small enough to move through
/// channels cheaply.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CheckoutAction {
    //
    // ===== Synchronous wizard transitions =====
    //
    /// Unconditionally show a step; the caller is responsible for sensibility
    SetCurrentStep(CheckoutStep),
    /// Toggle delivery editing; `true` also forces the wizard back to Delivery
    SetDeliveryEditing(bool),
    /// Toggle payment editing; `true` also forces the wizard back to Payment
    SetPaymentEditing(bool),
    /// Complete the delivery step (guarded: requires a saved shipping address)
    CompleteDeliveryStep,
    /// Complete the payment step (guarded: requires billing address and a payment method)
    CompletePaymentStep,
    /// Discard everything and return to the initial state
    Reset,

    //
    // ===== Cart fetch =====
    //
    /// Command: fetch the cart snapshot
    FetchCart,
    /// Event: fetch succeeded; hydrate progress from the snapshot
    CartFetched(Box<Cart>),
    /// Event: fetch failed
    CartFetchFailed(String),

    //
    // ===== Shipping address =====
    //
    /// Command: persist the shipping address
    SaveShippingAddress(Address),
    /// Event: save succeeded
    ShippingAddressSaved(Box<Cart>),
    /// Event: save failed
    ShippingAddressFailed(String),

    //
    // ===== Gift message =====
    //
    /// Command: persist the gift message
    SaveGiftMessage(GiftMessage),
    /// Event: save succeeded
    GiftMessageSaved(Box<Cart>),
    /// Event: save failed
    GiftMessageFailed(String),
    /// Command: remove the gift message
    RemoveGiftMessage,
    /// Event: removal succeeded
    GiftMessageRemoved(Box<Cart>),
    /// Event: removal failed
    GiftMessageRemovalFailed(String),

    //
    // ===== Gift card =====
    //
    /// Command: apply a gift card
    ApplyGiftCard(GiftCardRequest),
    /// Event: application succeeded
    GiftCardApplied(Box<Cart>),
    /// Event: application failed
    GiftCardFailed(String),
    /// Command: remove an applied gift card
    RemoveGiftCard {
        /// Server-side payment id of the applied card
        payment_id: String,
    },
    /// Event: removal succeeded
    GiftCardRemoved(Box<Cart>),
    /// Event: removal failed
    GiftCardRemovalFailed(String),

    //
    // ===== Credit card =====
    //
    /// Command: persist the credit card
    SaveCreditCard(CreditCardRequest),
    /// Event: save succeeded
    CreditCardSaved(Box<Cart>),
    /// Event: save failed
    CreditCardFailed(String),

    //
    // ===== Billing address =====
    //
    /// Command: persist the billing address
    SaveBillingAddress(BillingAddress),
    /// Event: save succeeded
    BillingAddressSaved(Box<Cart>),
    /// Event: save failed
    BillingAddressFailed(String),
}
