//! Pure projections from a cart snapshot into checkout slices.
//!
//! The storefront payload is duck-typed and has grown two generations of
//! payment shapes, so all field extraction is centralized here instead of
//! being repeated at every reducer arm. Each function returns `None` when the
//! snapshot carries no usable value for the slice; the caller decides whether
//! `None` means "retain the previous value" (saves, gift card on fetch) or
//! "clear" (explicit removals).

use crate::address::BillingAddress;
use crate::cart::{Cart, GiftCardDetails, PaymentDetails};
use crate::payment::{CreditCardSummary, GiftCardSummary};

/// Extract the applied gift card from a cart snapshot.
///
/// Source priority: `payment_details.payment_classification.gift_card`, then
/// the legacy `payment_details.gift_card`. Field fallbacks within the entry:
/// `id` defaults to `""`; `last4_digits` falls back to
/// `payment_details.last4_digits`, then `""`; `applied_amount` falls back to
/// the entry's legacy `amount`, then `0`.
#[must_use]
pub fn gift_card(cart: &Cart) -> Option<GiftCardSummary> {
    let details = cart.payment_details.as_ref()?;
    let entry = classification_gift_card(details).or(details.gift_card.as_ref())?;

    Some(GiftCardSummary {
        id: entry.id.clone().unwrap_or_default(),
        last4_digits: entry
            .last4_digits
            .clone()
            .or_else(|| details.last4_digits.clone())
            .unwrap_or_default(),
        applied_amount: entry.applied_amount.or(entry.amount).unwrap_or(0.0),
    })
}

fn classification_gift_card(details: &PaymentDetails) -> Option<&GiftCardDetails> {
    details
        .payment_classification
        .as_ref()
        .and_then(|classification| classification.gift_card.as_ref())
}

/// Extract the saved credit card from a cart snapshot.
///
/// A card is considered present only when `payment_details.card_type` or
/// `payment_details.last4_digits` carries a non-empty value; every summary
/// field defaults to `""` when omitted.
#[must_use]
pub fn credit_card(cart: &Cart) -> Option<CreditCardSummary> {
    let details = cart.payment_details.as_ref()?;

    let has_card = details.card_type.as_deref().is_some_and(|s| !s.is_empty())
        || details.last4_digits.as_deref().is_some_and(|s| !s.is_empty());
    if !has_card {
        return None;
    }

    Some(CreditCardSummary {
        card_type: details.card_type.clone().unwrap_or_default(),
        last4_digits: details.last4_digits.clone().unwrap_or_default(),
        expiration_month: details.expiration_month.clone().unwrap_or_default(),
        expiration_year: details.expiration_year.clone().unwrap_or_default(),
        card_holder_name: details.card_holder_name.clone().unwrap_or_default(),
    })
}

/// Extract the billing address from a cart snapshot, merging in the sibling
/// `billing_same_as_shipping` marker (absent means `false`).
#[must_use]
pub fn billing_address(cart: &Cart) -> Option<BillingAddress> {
    cart.billing_address.as_ref().map(|address| BillingAddress {
        address: address.clone(),
        billing_same_as_shipping: cart.billing_same_as_shipping.unwrap_or(false),
    })
}

#[cfg(test)]
#[allow(clippy::expect_used)] // Test code can use expect
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::cart::PaymentClassification;

    fn cart_with_details(details: PaymentDetails) -> Cart {
        Cart {
            payment_details: Some(details),
            ..Cart::default()
        }
    }

    #[test]
    fn gift_card_prefers_the_classification_entry() {
        let cart = cart_with_details(PaymentDetails {
            last4_digits: Some("9999".into()),
            payment_classification: Some(PaymentClassification {
                gift_card: Some(GiftCardDetails {
                    id: Some("gc1".into()),
                    last4_digits: Some("1234".into()),
                    applied_amount: Some(50.0),
                    amount: None,
                }),
                credit_card: None,
            }),
            gift_card: Some(GiftCardDetails {
                id: Some("legacy".into()),
                ..GiftCardDetails::default()
            }),
            ..PaymentDetails::default()
        });

        let summary = gift_card(&cart).expect("gift card present");
        assert_eq!(summary.id, "gc1");
        assert_eq!(summary.last4_digits, "1234");
        assert!((summary.applied_amount - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn gift_card_falls_back_to_the_legacy_location_and_fields() {
        let cart = cart_with_details(PaymentDetails {
            last4_digits: Some("4321".into()),
            gift_card: Some(GiftCardDetails {
                id: None,
                last4_digits: None,
                applied_amount: None,
                amount: Some(25.0),
            }),
            ..PaymentDetails::default()
        });

        let summary = gift_card(&cart).expect("legacy gift card present");
        assert_eq!(summary.id, "");
        assert_eq!(summary.last4_digits, "4321");
        assert!((summary.applied_amount - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn gift_card_is_none_when_neither_source_is_present() {
        assert_eq!(gift_card(&Cart::default()), None);
        assert_eq!(gift_card(&cart_with_details(PaymentDetails::default())), None);
    }

    #[test]
    fn credit_card_requires_card_type_or_last4() {
        let empty = cart_with_details(PaymentDetails {
            card_holder_name: Some("J Doe".into()),
            ..PaymentDetails::default()
        });
        assert_eq!(credit_card(&empty), None);

        let blank_strings = cart_with_details(PaymentDetails {
            card_type: Some(String::new()),
            last4_digits: Some(String::new()),
            ..PaymentDetails::default()
        });
        assert_eq!(credit_card(&blank_strings), None);

        let by_type = cart_with_details(PaymentDetails {
            card_type: Some("Visa".into()),
            ..PaymentDetails::default()
        });
        let summary = credit_card(&by_type).expect("card present");
        assert_eq!(summary.card_type, "Visa");
        assert_eq!(summary.last4_digits, "");
        assert_eq!(summary.card_holder_name, "");
    }

    #[test]
    fn billing_address_merges_the_reuse_marker() {
        let mut cart = Cart {
            billing_address: Some(Address {
                first_name: "Jane".into(),
                ..Address::default()
            }),
            billing_same_as_shipping: Some(true),
            ..Cart::default()
        };

        let billing = billing_address(&cart).expect("billing present");
        assert!(billing.billing_same_as_shipping);
        assert_eq!(billing.address.first_name, "Jane");

        cart.billing_same_as_shipping = None;
        let billing = billing_address(&cart).expect("billing present");
        assert!(!billing.billing_same_as_shipping);
    }
}
