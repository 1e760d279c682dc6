//! End-to-end checkout flows through the command facade against the
//! in-memory API double.

#![allow(clippy::expect_used, clippy::panic)] // Test code can use expect and panic

use std::sync::Arc;

use checkout_flow_core::address::Address;
use checkout_flow_core::state::CheckoutStep;
use checkout_flow_runtime::{Checkout, CommandError};
use checkout_flow_testing::fixtures::{
    cart_with_payment, sample_address, sample_billing_address, sample_credit_card,
    sample_gift_card, sample_gift_message,
};
use checkout_flow_testing::{InMemoryCheckoutApi, MockOperation, test_clock};

fn checkout_with(api: Arc<InMemoryCheckoutApi>) -> Checkout {
    Checkout::new(api, Arc::new(test_clock()))
}

fn checkout() -> (Checkout, Arc<InMemoryCheckoutApi>) {
    let api = Arc::new(InMemoryCheckoutApi::new());
    (checkout_with(Arc::clone(&api)), api)
}

#[tokio::test]
async fn full_checkout_happy_path() {
    let (checkout, _api) = checkout();

    checkout.fetch_cart().await.expect("fetch");
    let state = checkout.state().await;
    assert_eq!(state.current_step, CheckoutStep::Delivery);
    assert!(state.cart.is_some());
    assert!(state.last_synced_at.is_some());

    // Delivery
    checkout
        .save_shipping_address(sample_address())
        .await
        .expect("save shipping");
    checkout
        .save_gift_message(sample_gift_message())
        .await
        .expect("save gift message");
    checkout.complete_delivery_step().await.expect("complete delivery");

    let state = checkout.state().await;
    assert_eq!(state.current_step, CheckoutStep::Payment);
    assert!(state.delivery.is_complete);
    assert!(state.delivery.gift_message.is_some());
    assert!(!state.loading.any());

    // Payment
    checkout
        .apply_gift_card(sample_gift_card())
        .await
        .expect("apply gift card");
    checkout
        .save_credit_card(sample_credit_card())
        .await
        .expect("save credit card");
    checkout
        .save_billing_address(sample_billing_address())
        .await
        .expect("save billing");
    checkout.complete_payment_step().await.expect("complete payment");

    let state = checkout.state().await;
    assert_eq!(state.current_step, CheckoutStep::Review);
    assert!(state.payment.is_complete);
    let gift_card = state.payment.gift_card.expect("gift card");
    assert_eq!(gift_card.id, "gc-1");
    let credit_card = state.payment.credit_card.expect("credit card");
    assert_eq!(credit_card.card_type, "Visa");

    // Review
    let order = checkout.place_order().await.expect("place order");
    assert_eq!(order.order_number, "ORD-000001");
    assert_eq!(order.cart.cart_state.as_deref(), Some("Ordered"));
}

#[tokio::test]
async fn validation_failure_blocks_dispatch_entirely() {
    let (checkout, _api) = checkout();

    let result = checkout.save_shipping_address(Address::default()).await;

    let Err(CommandError::Invalid(errors)) = result else {
        panic!("expected a validation failure");
    };
    assert!(errors.get("firstName").is_some());
    assert!(errors.get("zipCode").is_some());

    // Nothing reached the machine: no loading flip, no error entry
    let state = checkout.state().await;
    assert!(!state.loading.any());
    assert!(state.errors.shipping_address.is_none());
    assert!(state.delivery.shipping_address.is_none());
}

#[tokio::test]
async fn api_failure_lands_in_the_errors_slice_and_the_result() {
    let (checkout, api) = checkout();
    api.fail_next(MockOperation::SaveShippingAddress, "network error");

    let result = checkout.save_shipping_address(sample_address()).await;

    let Err(CommandError::Api(message)) = result else {
        panic!("expected an API failure");
    };
    assert_eq!(message, "network error");

    let state = checkout.state().await;
    assert_eq!(state.errors.shipping_address.as_deref(), Some("network error"));
    assert!(!state.loading.shipping_address);
    assert!(state.delivery.shipping_address.is_none());
    assert!(state.cart.is_none(), "a failed save must not install a cart");

    // Re-invoking after the failure succeeds and clears the error
    checkout
        .save_shipping_address(sample_address())
        .await
        .expect("retry succeeds");
    let state = checkout.state().await;
    assert!(state.errors.shipping_address.is_none());
    assert!(state.delivery.shipping_address.is_some());
}

#[tokio::test]
async fn fetch_failure_leaves_the_cart_unset() {
    let (checkout, api) = checkout();
    api.fail_next(MockOperation::FetchCart, "network error");

    let result = checkout.fetch_cart().await;
    assert!(matches!(result, Err(CommandError::Api(_))));

    let state = checkout.state().await;
    assert!(state.cart.is_none());
    assert_eq!(state.fetch_error.as_deref(), Some("network error"));
    assert_eq!(state.current_step, CheckoutStep::Delivery);

    // The next fetch succeeds and clears the recorded failure
    checkout.fetch_cart().await.expect("fetch succeeds");
    let state = checkout.state().await;
    assert!(state.cart.is_some());
    assert!(state.fetch_error.is_none());
}

#[tokio::test]
async fn fetching_a_cart_with_prior_progress_resumes_at_review() {
    let api = Arc::new(InMemoryCheckoutApi::seeded_with(cart_with_payment()));
    let checkout = checkout_with(api);

    checkout.fetch_cart().await.expect("fetch");

    let state = checkout.state().await;
    assert_eq!(state.current_step, CheckoutStep::Review);
    assert!(state.delivery.is_complete);
    assert!(state.payment.is_complete);
    assert!(state.payment.billing_address.expect("billing").billing_same_as_shipping);
}

#[tokio::test]
async fn completion_guards_surface_typed_failures() {
    let (checkout, _api) = checkout();

    let delivery = checkout.complete_delivery_step().await;
    assert!(matches!(delivery, Err(CommandError::Incomplete(_))));

    let payment = checkout.complete_payment_step().await;
    assert!(matches!(payment, Err(CommandError::Incomplete(_))));

    let order = checkout.place_order().await;
    assert!(matches!(order, Err(CommandError::Incomplete(_))));

    assert_eq!(checkout.state().await, Default::default());
}

#[tokio::test]
async fn editing_from_review_walks_the_wizard_backwards() {
    let api = Arc::new(InMemoryCheckoutApi::seeded_with(cart_with_payment()));
    let checkout = checkout_with(api);
    checkout.fetch_cart().await.expect("fetch");
    assert_eq!(checkout.state().await.current_step, CheckoutStep::Review);

    checkout.set_delivery_editing(true).await.expect("edit delivery");
    let state = checkout.state().await;
    assert_eq!(state.current_step, CheckoutStep::Delivery);
    assert!(state.delivery.is_editing);
    assert!(state.delivery.is_complete, "editing must not clear completion");

    checkout.complete_delivery_step().await.expect("complete again");
    let state = checkout.state().await;
    assert_eq!(state.current_step, CheckoutStep::Payment);
    assert!(!state.delivery.is_editing);
}

#[tokio::test]
async fn removing_the_gift_card_clears_the_slice() {
    let (checkout, _api) = checkout();

    checkout.apply_gift_card(sample_gift_card()).await.expect("apply");
    let id = checkout
        .read(|s| s.payment.gift_card.as_ref().map(|g| g.id.clone()))
        .await
        .expect("gift card applied");

    checkout.remove_gift_card(id).await.expect("remove");

    assert!(checkout.state().await.payment.gift_card.is_none());
}

#[tokio::test]
async fn gift_message_round_trip() {
    let (checkout, _api) = checkout();

    checkout
        .save_gift_message(sample_gift_message())
        .await
        .expect("save");
    assert!(checkout.state().await.delivery.gift_message.is_some());

    checkout.remove_gift_message().await.expect("remove");
    assert!(checkout.state().await.delivery.gift_message.is_none());
}

#[tokio::test]
async fn concurrent_saves_interleave_and_both_slices_land() {
    let (checkout, _api) = checkout();

    let (card, billing) = tokio::join!(
        checkout.save_credit_card(sample_credit_card()),
        checkout.save_billing_address(sample_billing_address()),
    );
    card.expect("credit card saved");
    billing.expect("billing saved");

    let state = checkout.state().await;
    assert!(state.payment.credit_card.is_some());
    assert!(state.payment.billing_address.is_some());
    // Each save wrote its own slice; whichever response arrived last owns the
    // cart snapshot wholesale, so either server snapshot is a legal outcome.
    assert!(state.cart.is_some());
}

#[tokio::test]
async fn reset_discards_the_session() {
    let api = Arc::new(InMemoryCheckoutApi::seeded_with(cart_with_payment()));
    let checkout = checkout_with(api);
    checkout.fetch_cart().await.expect("fetch");
    assert_ne!(checkout.state().await, Default::default());

    checkout.reset().await.expect("reset");

    assert_eq!(checkout.state().await, Default::default());
}
