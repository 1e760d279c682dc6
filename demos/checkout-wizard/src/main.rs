//! Scripted checkout walkthrough.
//!
//! Drives a full checkout session against the in-memory API double: fetch,
//! delivery, payment (including a failed save and its retry), review, and
//! place order. Run with `RUST_LOG=debug` to watch the store at work.

use std::sync::Arc;

use checkout_flow_core::environment::SystemClock;
use checkout_flow_core::state::CheckoutState;
use checkout_flow_runtime::Checkout;
use checkout_flow_testing::fixtures::{
    sample_address, sample_billing_address, sample_credit_card, sample_gift_card,
    sample_gift_message,
};
use checkout_flow_testing::{InMemoryCheckoutApi, MockOperation};

fn print_state(label: &str, state: &CheckoutState) {
    println!("-- {label}");
    println!("   step: {} ({})", state.current_step, state.current_step.number());
    println!(
        "   delivery: complete={} address={} gift_message={}",
        state.delivery.is_complete,
        state.delivery.shipping_address.is_some(),
        state.delivery.gift_message.is_some(),
    );
    println!(
        "   payment:  complete={} billing={} credit_card={} gift_card={}",
        state.payment.is_complete,
        state.payment.billing_address.is_some(),
        state.payment.credit_card.is_some(),
        state.payment.gift_card.is_some(),
    );
    println!();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Checkout Wizard ===\n");

    let api = Arc::new(InMemoryCheckoutApi::new());
    let checkout = Checkout::new(
        Arc::clone(&api) as Arc<dyn checkout_flow_core::environment::CheckoutApi>,
        Arc::new(SystemClock),
    );

    // Session start: fetch the cart and resume wherever it left off
    checkout.fetch_cart().await?;
    let state = checkout.state().await;
    if let Some(cart) = &state.cart {
        for item in &cart.line_items {
            println!(
                "in cart: {} x{} (${:.2})",
                item.name.as_deref().unwrap_or("<unnamed>"),
                item.quantity,
                item.total_price.unwrap_or(0.0),
            );
        }
        if let Some(summary) = &cart.order_summary {
            println!("order total: ${:.2}\n", summary.total_price);
        }
    }
    print_state("after fetch", &state);

    // Step 1: delivery
    checkout.save_shipping_address(sample_address()).await?;
    checkout.save_gift_message(sample_gift_message()).await?;
    checkout.complete_delivery_step().await?;
    print_state("delivery complete", &checkout.state().await);

    // Step 2: payment. The first credit card save fails; the error lands in
    // the state and the retry goes through.
    checkout.apply_gift_card(sample_gift_card()).await?;

    api.fail_next(MockOperation::SaveCreditCard, "network error");
    if let Err(error) = checkout.save_credit_card(sample_credit_card()).await {
        let recorded = checkout.read(|s| s.errors.credit_card.clone()).await;
        println!("credit card save failed: {error} (recorded: {recorded:?})");
        println!("retrying...\n");
    }
    checkout.save_credit_card(sample_credit_card()).await?;

    checkout.save_billing_address(sample_billing_address()).await?;
    checkout.complete_payment_step().await?;
    print_state("payment complete", &checkout.state().await);

    // Step 3: review and place the order
    let order = checkout.place_order().await?;
    println!(
        "order placed: {} on {}",
        order.order_number,
        order.order_date.as_deref().unwrap_or("-"),
    );

    Ok(())
}
