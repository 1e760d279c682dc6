//! The checkout state machine: reducer, transition rules, and cart hydration.
//!
//! # Transition rules
//!
//! `current_step` walks `Delivery → Payment → Review` through the guarded
//! completion actions; the editing toggles provide the only controlled
//! backward transitions (`… → Delivery` and `… → Payment`). There is no
//! direct `Review → Delivery` edge: editing delivery from review goes through
//! `SetDeliveryEditing(true)`, which also forces the step back.
//!
//! Guard failures on the completion actions are silent no-ops by contract -
//! the command facade in the runtime crate checks the same guards up front
//! and surfaces a typed error to its caller.
//!
//! # Async command pattern
//!
//! Every save follows the same shape: the command arm flips the field's
//! loading flag, clears its error, and returns an [`Effect`] that calls the
//! injected [`CheckoutApi`] and feeds the terminal action back. Success
//! replaces `cart` wholesale and projects the field's slice out of the new
//! snapshot; failure records the message and leaves both the slice and
//! `cart` untouched. Removals are fire-and-forget: no loading flag, but a
//! removal failure still lands in the field's error entry.

use std::sync::Arc;

use crate::action::CheckoutAction;
use crate::cart::Cart;
use crate::effect::Effect;
use crate::environment::{CheckoutApi, Clock};
use crate::extract;
use crate::reducer::Reducer;
use crate::state::{CheckoutState, CheckoutStep};

/// Dependencies injected into the checkout reducer
#[derive(Clone)]
pub struct CheckoutEnvironment {
    /// The checkout API boundary
    pub api: Arc<dyn CheckoutApi>,
    /// Clock for the sync timestamp
    pub clock: Arc<dyn Clock>,
}

impl CheckoutEnvironment {
    /// Create a new environment
    #[must_use]
    pub fn new(api: Arc<dyn CheckoutApi>, clock: Arc<dyn Clock>) -> Self {
        Self { api, clock }
    }
}

/// Reducer for the checkout aggregate
#[derive(Clone, Copy, Debug, Default)]
pub struct CheckoutReducer;

impl CheckoutReducer {
    /// Replace the cart snapshot and stamp the sync time
    fn commit_cart(state: &mut CheckoutState, cart: Cart, env: &CheckoutEnvironment) {
        state.cart = Some(cart);
        state.last_synced_at = Some(env.clock.now());
    }

    /// Reconstruct checkout progress from a freshly fetched cart snapshot.
    ///
    /// This is the resume-checkout algorithm and runs on every successful
    /// fetch, not only the first one. Earlier steps' data is populated
    /// regardless of which step ends up current; the step itself is derived
    /// by a fixed priority order (complete payment wins, then a saved
    /// shipping address, otherwise the step is left alone). The `is_editing`
    /// flags are local-only and are never touched here.
    fn hydrate(state: &mut CheckoutState, cart: Cart, env: &CheckoutEnvironment) {
        if let Some(address) = cart.shipping_address.clone() {
            state.delivery.shipping_address = Some(address);
            state.delivery.is_complete = true;
        }
        if let Some(message) = cart.gift_message.clone() {
            state.delivery.gift_message = Some(message);
        }
        if let Some(billing) = extract::billing_address(&cart) {
            state.payment.billing_address = Some(billing);
        }
        if let Some(gift_card) = extract::gift_card(&cart) {
            state.payment.gift_card = Some(gift_card);
        }
        if let Some(credit_card) = extract::credit_card(&cart) {
            state.payment.credit_card = Some(credit_card);
        }

        state.fetch_error = None;
        Self::commit_cart(state, cart, env);

        if state.can_complete_payment() {
            state.payment.is_complete = true;
            state.current_step = CheckoutStep::Review;
        } else if state.delivery.shipping_address.is_some() {
            state.delivery.is_complete = true;
            state.current_step = CheckoutStep::Payment;
        }
    }
}

impl Reducer for CheckoutReducer {
    type State = CheckoutState;
    type Action = CheckoutAction;
    type Environment = CheckoutEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per event; splitting would hide the transition table
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Vec<Effect<Self::Action>> {
        match action {
            //
            // ===== Synchronous wizard transitions =====
            //
            CheckoutAction::SetCurrentStep(step) => {
                state.current_step = step;
                vec![Effect::None]
            },

            CheckoutAction::SetDeliveryEditing(editing) => {
                state.delivery.is_editing = editing;
                if editing {
                    state.current_step = CheckoutStep::Delivery;
                }
                vec![Effect::None]
            },

            CheckoutAction::SetPaymentEditing(editing) => {
                state.payment.is_editing = editing;
                if editing {
                    state.current_step = CheckoutStep::Payment;
                }
                vec![Effect::None]
            },

            CheckoutAction::CompleteDeliveryStep => {
                if state.can_complete_delivery() {
                    state.delivery.is_complete = true;
                    state.delivery.is_editing = false;
                    state.current_step = CheckoutStep::Payment;
                }
                vec![Effect::None]
            },

            CheckoutAction::CompletePaymentStep => {
                if state.can_complete_payment() {
                    state.payment.is_complete = true;
                    state.payment.is_editing = false;
                    state.current_step = CheckoutStep::Review;
                }
                vec![Effect::None]
            },

            CheckoutAction::Reset => {
                *state = CheckoutState::default();
                vec![Effect::None]
            },

            //
            // ===== Cart fetch =====
            //
            CheckoutAction::FetchCart => {
                state.fetch_error = None;
                let api = Arc::clone(&env.api);
                vec![Effect::from_future(async move {
                    match api.fetch_cart().await {
                        Ok(cart) => CheckoutAction::CartFetched(Box::new(cart)),
                        Err(error) => CheckoutAction::CartFetchFailed(error.to_string()),
                    }
                })]
            },

            CheckoutAction::CartFetched(cart) => {
                Self::hydrate(state, *cart, env);
                vec![Effect::None]
            },

            CheckoutAction::CartFetchFailed(message) => {
                // No placeholder cart: stale progress must not be advanced and
                // "fetch failed" stays distinguishable from "no data yet".
                state.fetch_error = Some(message);
                vec![Effect::None]
            },

            //
            // ===== Shipping address =====
            //
            CheckoutAction::SaveShippingAddress(address) => {
                state.loading.shipping_address = true;
                state.errors.shipping_address = None;
                let api = Arc::clone(&env.api);
                vec![Effect::from_future(async move {
                    match api.save_shipping_address(address).await {
                        Ok(cart) => CheckoutAction::ShippingAddressSaved(Box::new(cart)),
                        Err(error) => CheckoutAction::ShippingAddressFailed(error.to_string()),
                    }
                })]
            },

            CheckoutAction::ShippingAddressSaved(cart) => {
                state.loading.shipping_address = false;
                state.delivery.shipping_address = cart.shipping_address.clone();
                Self::commit_cart(state, *cart, env);
                vec![Effect::None]
            },

            CheckoutAction::ShippingAddressFailed(message) => {
                state.loading.shipping_address = false;
                state.errors.shipping_address = Some(message);
                vec![Effect::None]
            },

            //
            // ===== Gift message =====
            //
            CheckoutAction::SaveGiftMessage(gift_message) => {
                state.loading.gift_message = true;
                state.errors.gift_message = None;
                let api = Arc::clone(&env.api);
                vec![Effect::from_future(async move {
                    match api.save_gift_message(gift_message).await {
                        Ok(cart) => CheckoutAction::GiftMessageSaved(Box::new(cart)),
                        Err(error) => CheckoutAction::GiftMessageFailed(error.to_string()),
                    }
                })]
            },

            CheckoutAction::GiftMessageSaved(cart) => {
                state.loading.gift_message = false;
                state.delivery.gift_message = cart.gift_message.clone();
                Self::commit_cart(state, *cart, env);
                vec![Effect::None]
            },

            CheckoutAction::GiftMessageFailed(message) => {
                state.loading.gift_message = false;
                state.errors.gift_message = Some(message);
                vec![Effect::None]
            },

            CheckoutAction::RemoveGiftMessage => {
                let api = Arc::clone(&env.api);
                vec![Effect::from_future(async move {
                    match api.remove_gift_message().await {
                        Ok(cart) => CheckoutAction::GiftMessageRemoved(Box::new(cart)),
                        Err(error) => CheckoutAction::GiftMessageRemovalFailed(error.to_string()),
                    }
                })]
            },

            CheckoutAction::GiftMessageRemoved(cart) => {
                state.delivery.gift_message = None;
                Self::commit_cart(state, *cart, env);
                vec![Effect::None]
            },

            CheckoutAction::GiftMessageRemovalFailed(message) => {
                state.errors.gift_message = Some(message);
                vec![Effect::None]
            },

            //
            // ===== Gift card =====
            //
            CheckoutAction::ApplyGiftCard(request) => {
                state.loading.gift_card = true;
                state.errors.gift_card = None;
                let api = Arc::clone(&env.api);
                vec![Effect::from_future(async move {
                    match api.apply_gift_card(request).await {
                        Ok(cart) => CheckoutAction::GiftCardApplied(Box::new(cart)),
                        Err(error) => CheckoutAction::GiftCardFailed(error.to_string()),
                    }
                })]
            },

            CheckoutAction::GiftCardApplied(cart) => {
                state.loading.gift_card = false;
                // Retain the previous value when the snapshot has no usable
                // entry; only an explicit removal clears the slice.
                if let Some(summary) = extract::gift_card(&cart) {
                    state.payment.gift_card = Some(summary);
                }
                Self::commit_cart(state, *cart, env);
                vec![Effect::None]
            },

            CheckoutAction::GiftCardFailed(message) => {
                state.loading.gift_card = false;
                state.errors.gift_card = Some(message);
                vec![Effect::None]
            },

            CheckoutAction::RemoveGiftCard { payment_id } => {
                let api = Arc::clone(&env.api);
                vec![Effect::from_future(async move {
                    match api.remove_gift_card(payment_id).await {
                        Ok(cart) => CheckoutAction::GiftCardRemoved(Box::new(cart)),
                        Err(error) => CheckoutAction::GiftCardRemovalFailed(error.to_string()),
                    }
                })]
            },

            CheckoutAction::GiftCardRemoved(cart) => {
                state.payment.gift_card = None;
                // Dropping the only payment method invalidates a completed
                // payment step; the step shown is left alone.
                if state.payment.is_complete && !state.can_complete_payment() {
                    state.payment.is_complete = false;
                }
                Self::commit_cart(state, *cart, env);
                vec![Effect::None]
            },

            CheckoutAction::GiftCardRemovalFailed(message) => {
                state.errors.gift_card = Some(message);
                vec![Effect::None]
            },

            //
            // ===== Credit card =====
            //
            CheckoutAction::SaveCreditCard(request) => {
                state.loading.credit_card = true;
                state.errors.credit_card = None;
                let api = Arc::clone(&env.api);
                vec![Effect::from_future(async move {
                    match api.save_credit_card(request).await {
                        Ok(cart) => CheckoutAction::CreditCardSaved(Box::new(cart)),
                        Err(error) => CheckoutAction::CreditCardFailed(error.to_string()),
                    }
                })]
            },

            CheckoutAction::CreditCardSaved(cart) => {
                state.loading.credit_card = false;
                if let Some(summary) = extract::credit_card(&cart) {
                    state.payment.credit_card = Some(summary);
                }
                Self::commit_cart(state, *cart, env);
                vec![Effect::None]
            },

            CheckoutAction::CreditCardFailed(message) => {
                state.loading.credit_card = false;
                state.errors.credit_card = Some(message);
                vec![Effect::None]
            },

            //
            // ===== Billing address =====
            //
            CheckoutAction::SaveBillingAddress(address) => {
                state.loading.billing_address = true;
                state.errors.billing_address = None;
                let api = Arc::clone(&env.api);
                vec![Effect::from_future(async move {
                    match api.save_billing_address(address).await {
                        Ok(cart) => CheckoutAction::BillingAddressSaved(Box::new(cart)),
                        Err(error) => CheckoutAction::BillingAddressFailed(error.to_string()),
                    }
                })]
            },

            CheckoutAction::BillingAddressSaved(cart) => {
                state.loading.billing_address = false;
                if let Some(billing) = extract::billing_address(&cart) {
                    state.payment.billing_address = Some(billing);
                }
                Self::commit_cart(state, *cart, env);
                vec![Effect::None]
            },

            CheckoutAction::BillingAddressFailed(message) => {
                state.loading.billing_address = false;
                state.errors.billing_address = Some(message);
                vec![Effect::None]
            },
        }
    }
}


#[cfg(test)]
mod properties {
    use super::tests::{cart_with_gift_card, cart_with_payment, cart_with_shipping, reduce};
    use super::*;
    use proptest::prelude::*;

    // `current_step ∈ {Delivery, Payment, Review}` holds by construction
    // (the step is an enum); the properties below cover the invariants the
    // type system cannot express.

    fn action_strategy() -> impl Strategy<Value = CheckoutAction> {
        prop_oneof![
            Just(CheckoutAction::CompleteDeliveryStep),
            Just(CheckoutAction::CompletePaymentStep),
            any::<bool>().prop_map(CheckoutAction::SetDeliveryEditing),
            any::<bool>().prop_map(CheckoutAction::SetPaymentEditing),
            prop_oneof![
                Just(CheckoutStep::Delivery),
                Just(CheckoutStep::Payment),
                Just(CheckoutStep::Review),
            ]
            .prop_map(CheckoutAction::SetCurrentStep),
            Just(CheckoutAction::Reset),
            // Fetches and saves answer with server-contract-conforming
            // snapshots: a save's success payload always carries the saved
            // field.
            Just(CheckoutAction::CartFetched(Box::new(Cart::default()))),
            Just(CheckoutAction::CartFetched(Box::new(cart_with_shipping()))),
            Just(CheckoutAction::CartFetched(Box::new(cart_with_payment()))),
            Just(CheckoutAction::CartFetched(Box::new(cart_with_gift_card()))),
            Just(CheckoutAction::ShippingAddressSaved(Box::new(cart_with_shipping()))),
            Just(CheckoutAction::BillingAddressSaved(Box::new(cart_with_payment()))),
            Just(CheckoutAction::CreditCardSaved(Box::new(cart_with_payment()))),
            Just(CheckoutAction::GiftCardApplied(Box::new(cart_with_gift_card()))),
            Just(CheckoutAction::GiftCardRemoved(Box::new(Cart::default()))),
            Just(CheckoutAction::GiftMessageRemoved(Box::new(Cart::default()))),
            Just(CheckoutAction::ShippingAddressFailed("network error".into())),
            Just(CheckoutAction::GiftCardFailed("declined".into())),
            Just(CheckoutAction::CartFetchFailed("network error".into())),
        ]
    }

    proptest! {
        #[test]
        fn completion_flags_always_imply_their_backing_data(
            actions in proptest::collection::vec(action_strategy(), 0..40)
        ) {
            let mut state = CheckoutState::default();
            for action in actions {
                reduce(&mut state, action);

                prop_assert!(
                    !state.delivery.is_complete || state.delivery.shipping_address.is_some(),
                    "delivery completed without a shipping address"
                );
                prop_assert!(
                    !state.payment.is_complete
                        || (state.payment.billing_address.is_some()
                            && (state.payment.credit_card.is_some()
                                || state.payment.gift_card.is_some())),
                    "payment completed without billing address and a payment method"
                );
            }
        }

        #[test]
        fn reset_always_restores_the_initial_state(
            actions in proptest::collection::vec(action_strategy(), 0..40)
        ) {
            let mut state = CheckoutState::default();
            for action in actions {
                reduce(&mut state, action);
            }

            reduce(&mut state, CheckoutAction::Reset);
            prop_assert_eq!(state, CheckoutState::default());
        }
    }
}
