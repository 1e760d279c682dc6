//! The cart snapshot wire model.
//!
//! The cart is the server-owned source of truth for the in-progress order.
//! Every successful checkout API call returns the full updated snapshot and
//! the state machine replaces its copy wholesale. The schema here is a typed
//! partial view of the storefront payload: anything that can be absent is
//! optional, unknown keys are ignored, and no field is trusted beyond what
//! [`crate::extract`] reads out of it.

use serde::{Deserialize, Serialize};

use crate::address::Address;

/// Gift message attached to a delivery
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GiftMessage {
    /// The message itself, at most [`crate::validate::MAX_GIFT_MESSAGE_LEN`] characters
    pub gift_message: String,
    /// Name of the sender
    pub gift_sender_name: String,
    /// Name of the recipient
    pub gift_receiver_name: String,
}

/// A product variant on a line item
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Variant {
    /// Variant id within the product
    pub id: Option<u64>,
    /// Stock keeping unit
    pub sku: Option<String>,
    /// Variant key
    pub key: Option<String>,
    /// Image set URL
    pub image_set: Option<String>,
}

/// A single line item on the cart
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItem {
    /// Line item id
    pub id: String,
    /// Product id
    pub product_id: Option<String>,
    /// Product key
    pub product_key: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Slug used for product links
    pub product_slug: Option<String>,
    /// Selected variant
    pub variant: Option<Variant>,
    /// Undiscounted unit price
    pub original_price_per_quantity: Option<f64>,
    /// Discounted unit price
    pub discounted_price_per_quantity: Option<f64>,
    /// Line total
    pub total_price: Option<f64>,
    /// Quantity ordered
    pub quantity: u32,
}

/// Order totals breakdown
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderSummary {
    /// Merchandise price before discounts
    pub merchandise_price: f64,
    /// Merchandise discount
    pub merchandise_discount: f64,
    /// Merchandise subtotal
    pub merchandise_sub_total: f64,
    /// Standard shipping charge
    pub standard_shipping: f64,
    /// Shipping discount
    pub shipping_discount: f64,
    /// Additional shipping charge
    pub additional_shipping: f64,
    /// Carrier surcharge
    pub carrier_sur_charge: f64,
    /// Shipping subtotal
    pub shipping_sub_total: f64,
    /// Order total
    pub total_price: f64,
    /// Total saved
    pub total_saved: f64,
    /// Total tax
    pub total_tax: f64,
    /// Gift card processing fee
    pub gift_card_processing_fee: f64,
    /// Whether applied gift cards cover the full payment
    #[serde(rename = "isGCCoversFullPayment")]
    pub is_gc_covers_full_payment: bool,
    /// Retail delivery fee
    pub retail_delivery_fee: f64,
    /// Label for the retail delivery fee line
    pub retail_delivery_fee_label: String,
}

/// Gift card entry inside [`PaymentDetails`]
///
/// The two server generations disagree on field names (`appliedAmount` vs
/// `amount`), so both are modeled; [`crate::extract::gift_card`] owns the
/// fallback order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GiftCardDetails {
    /// Server-side payment id
    pub id: Option<String>,
    /// Last four digits of the card
    pub last4_digits: Option<String>,
    /// Amount applied to the order
    pub applied_amount: Option<f64>,
    /// Legacy name for the applied amount
    pub amount: Option<f64>,
}

/// Credit card entry inside [`PaymentClassification`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreditCardDetails {
    /// Card brand
    pub card_type: Option<String>,
    /// Last four digits
    pub last4_digits: Option<String>,
    /// Two-digit expiration month
    pub expiration_month: Option<String>,
    /// Four-digit expiration year
    pub expiration_year: Option<String>,
    /// Name on the card
    pub card_holder_name: Option<String>,
}

/// Payment methods applied to the cart, keyed by kind
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentClassification {
    /// Applied gift card, if any
    pub gift_card: Option<GiftCardDetails>,
    /// Saved credit card, if any
    pub credit_card: Option<CreditCardDetails>,
}

/// Payment state of the cart as the server reports it
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentDetails {
    /// Name on the saved card
    pub card_holder_name: Option<String>,
    /// Masked card number (`****1234`)
    pub masked_number: Option<String>,
    /// Last four digits of the saved card
    pub last4_digits: Option<String>,
    /// Two-digit expiration month
    pub expiration_month: Option<String>,
    /// Four-digit expiration year
    pub expiration_year: Option<String>,
    /// Card brand
    pub card_type: Option<String>,
    /// Payment method marker (`CREDIT_CARD`, `GIFT_CARD`, ...)
    pub payment_method: Option<String>,
    /// Amount charged to the card
    pub amount: Option<f64>,
    /// Per-kind payment entries
    pub payment_classification: Option<PaymentClassification>,
    /// Legacy location for the applied gift card
    pub gift_card: Option<GiftCardDetails>,
}

/// The cart snapshot
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cart {
    /// Cart id
    pub id: String,
    /// Human-facing cart number, used to place the order
    pub cart_number: Option<u64>,
    /// Cart lifecycle state (`Active`, `Ordered`, ...)
    pub cart_state: Option<String>,
    /// Customer e-mail, when known
    pub customer_email: Option<String>,
    /// Number of distinct line items
    pub line_item_count: Option<u32>,
    /// Line items
    pub line_items: Vec<LineItem>,
    /// Total quantity across line items
    pub total_line_item_quantity: Option<u32>,
    /// Whether this order is marked as a gift
    pub gift_order: bool,
    /// Gift message, when one has been saved
    pub gift_message: Option<GiftMessage>,
    /// Totals breakdown
    pub order_summary: Option<OrderSummary>,
    /// Saved shipping address
    pub shipping_address: Option<Address>,
    /// Saved billing address (the reuse marker is the sibling field below)
    pub billing_address: Option<Address>,
    /// Whether the billing address mirrors the shipping address
    pub billing_same_as_shipping: Option<bool>,
    /// Whether the gift card payment option is offered
    pub display_gift_card_payment: bool,
    /// Payment state
    pub payment_details: Option<PaymentDetails>,
}

/// Response of the place-order operation: order identifiers plus the final cart
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    /// Assigned order number
    pub order_number: String,
    /// Order date as the server formats it
    #[serde(default)]
    pub order_date: Option<String>,
    /// The cart the order was placed from
    #[serde(flatten)]
    pub cart: Cart,
}
