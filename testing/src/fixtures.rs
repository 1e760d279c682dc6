//! Shared fixtures: realistic cart snapshots and form payloads.

use checkout_flow_core::address::{Address, BillingAddress};
use checkout_flow_core::cart::{
    Cart, GiftMessage, LineItem, OrderSummary, PaymentClassification, PaymentDetails, Variant,
};
use checkout_flow_core::payment::{CreditCardRequest, GiftCardRequest};

/// A one-item active cart with no checkout progress, shaped like the
/// storefront returns it (payment details present but empty).
#[must_use]
pub fn empty_cart() -> Cart {
    Cart {
        id: "1d2c5a6e-8a54-4f08-9a5d-1f6f3f3a9c01".into(),
        cart_number: Some(67_376_322),
        cart_state: Some("Active".into()),
        customer_email: Some("test@example.com".into()),
        line_item_count: Some(1),
        line_items: vec![LineItem {
            id: "9f3a1c0d-7a54-47b2-a63a-97a62c1c2f41".into(),
            product_id: Some("ba1a7e00-fdc2-4183-9d1c-59926759bae2".into()),
            product_key: Some("DA4912-81144715".into()),
            name: Some("Pre-Lit Artificial Christmas Tree - 5 ft".into()),
            product_slug: Some("DA4912-81144715".into()),
            variant: Some(Variant {
                id: Some(1),
                sku: Some("5961339".into()),
                key: Some("81144715".into()),
                image_set: None,
            }),
            original_price_per_quantity: Some(139.98),
            discounted_price_per_quantity: Some(69.99),
            total_price: Some(69.99),
            quantity: 1,
        }],
        total_line_item_quantity: Some(1),
        gift_order: false,
        gift_message: None,
        order_summary: Some(OrderSummary {
            merchandise_price: 139.98,
            merchandise_discount: 69.99,
            merchandise_sub_total: 69.99,
            standard_shipping: 12.95,
            shipping_sub_total: 12.95,
            total_price: 88.98,
            total_saved: 69.99,
            total_tax: 6.04,
            ..OrderSummary::default()
        }),
        shipping_address: None,
        billing_address: None,
        billing_same_as_shipping: Some(false),
        display_gift_card_payment: true,
        payment_details: Some(PaymentDetails {
            payment_method: Some(String::new()),
            payment_classification: Some(PaymentClassification::default()),
            ..PaymentDetails::default()
        }),
    }
}

/// [`empty_cart`] with a shipping address already saved
#[must_use]
pub fn cart_with_shipping_address() -> Cart {
    Cart {
        shipping_address: Some(sample_address()),
        ..empty_cart()
    }
}

/// [`empty_cart`] with shipping, billing, and a saved Visa card: a checkout
/// one click away from review
#[must_use]
pub fn cart_with_payment() -> Cart {
    Cart {
        shipping_address: Some(sample_address()),
        billing_address: Some(sample_address()),
        billing_same_as_shipping: Some(true),
        payment_details: Some(PaymentDetails {
            card_holder_name: Some("John Doe".into()),
            masked_number: Some("****1111".into()),
            last4_digits: Some("1111".into()),
            expiration_month: Some("12".into()),
            expiration_year: Some("2028".into()),
            card_type: Some("Visa".into()),
            payment_method: Some("CREDIT_CARD".into()),
            ..PaymentDetails::default()
        }),
        ..empty_cart()
    }
}

/// A complete, valid shipping address
#[must_use]
pub fn sample_address() -> Address {
    Address {
        first_name: "John".into(),
        last_name: "Doe".into(),
        company: None,
        street_name: "123 Main Street".into(),
        additional_street_info: Some("Apt 4B".into()),
        city: "Oklahoma City".into(),
        state: "OK".into(),
        postal_code: "73114".into(),
        country: "US".into(),
        phone: Some("(405) 555-1234".into()),
        email: Some("john.doe@example.com".into()),
    }
}

/// A valid billing address reusing the shipping address
#[must_use]
pub fn sample_billing_address() -> BillingAddress {
    BillingAddress::new(sample_address(), true)
}

/// A valid gift message
#[must_use]
pub fn sample_gift_message() -> GiftMessage {
    GiftMessage {
        gift_message: "Happy holidays!".into(),
        gift_sender_name: "John".into(),
        gift_receiver_name: "Jane".into(),
    }
}

/// A valid Visa credit card request
#[must_use]
pub fn sample_credit_card() -> CreditCardRequest {
    CreditCardRequest {
        card_number: "4111111111111111".into(),
        card_holder_name: "John Doe".into(),
        expiration_month: "12".into(),
        expiration_year: "2028".into(),
        cvv: "123".into(),
    }
}

/// A valid gift card request
#[must_use]
pub fn sample_gift_card() -> GiftCardRequest {
    GiftCardRequest {
        card_number: "6006491234567890".into(),
        pin: "1234".into(),
    }
}
