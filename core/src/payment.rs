//! Payment method types: request payloads sent to the API and the summaries
//! the state machine keeps after a cart snapshot has been ingested.

use serde::{Deserialize, Serialize};

/// Gift card application request: the raw card number and PIN as entered
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftCardRequest {
    /// Full gift card number
    pub card_number: String,
    /// Card PIN
    pub pin: String,
}

/// Credit card save request
///
/// Carries the full PAN and CVV; neither is ever stored in checkout state -
/// the machine only retains the [`CreditCardSummary`] the server echoes back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardRequest {
    /// Full card number
    pub card_number: String,
    /// Name on the card
    pub card_holder_name: String,
    /// Two-digit expiration month
    pub expiration_month: String,
    /// Four-digit expiration year
    pub expiration_year: String,
    /// Card verification value
    pub cvv: String,
}

/// Place-order request for a fetched cart
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    /// The cart number being converted into an order
    pub cart_number: u64,
}

/// Applied gift card, as projected out of a cart snapshot
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftCardSummary {
    /// Server-side payment id (empty when the server did not assign one)
    pub id: String,
    /// Last four digits of the card
    pub last4_digits: String,
    /// Amount applied to the order
    pub applied_amount: f64,
}

/// Saved credit card, as projected out of a cart snapshot
///
/// Every field defaults to the empty string when the server omits it; the
/// machine never re-derives these locally from the request payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardSummary {
    /// Card brand as classified by the server
    pub card_type: String,
    /// Last four digits of the card
    pub last4_digits: String,
    /// Two-digit expiration month
    pub expiration_month: String,
    /// Four-digit expiration year
    pub expiration_year: String,
    /// Name on the card
    pub card_holder_name: String,
}

/// Card brand classified from the leading digits of a card number
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardBrand {
    /// 4xxx...
    Visa,
    /// 51xx-55xx
    Mastercard,
    /// 34xx / 37xx
    AmericanExpress,
    /// 6xxx...
    Discover,
    /// Anything else
    Unknown,
}

impl CardBrand {
    /// Classify a card number by its leading digits, ignoring spaces
    #[must_use]
    pub fn from_number(card_number: &str) -> Self {
        let digits: String = card_number.chars().filter(|c| !c.is_whitespace()).collect();
        let prefix2: u8 = digits.get(..2).and_then(|p| p.parse().ok()).unwrap_or(0);

        match digits.as_bytes().first() {
            Some(b'4') => Self::Visa,
            Some(b'5') if (51..=55).contains(&prefix2) => Self::Mastercard,
            Some(b'3') if prefix2 == 34 || prefix2 == 37 => Self::AmericanExpress,
            Some(b'6') => Self::Discover,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for CardBrand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Visa => "Visa",
            Self::Mastercard => "Mastercard",
            Self::AmericanExpress => "American Express",
            Self::Discover => "Discover",
            Self::Unknown => "Unknown",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_brands() {
        assert_eq!(CardBrand::from_number("4111 1111 1111 1111"), CardBrand::Visa);
        assert_eq!(CardBrand::from_number("5500005555555559"), CardBrand::Mastercard);
        assert_eq!(CardBrand::from_number("371449635398431"), CardBrand::AmericanExpress);
        assert_eq!(CardBrand::from_number("6011000990139424"), CardBrand::Discover);
    }

    #[test]
    fn everything_else_is_unknown() {
        assert_eq!(CardBrand::from_number("9999"), CardBrand::Unknown);
        assert_eq!(CardBrand::from_number("30569309025904"), CardBrand::Unknown);
        assert_eq!(CardBrand::from_number(""), CardBrand::Unknown);
        // 50xx and 56xx fall outside the Mastercard range
        assert_eq!(CardBrand::from_number("5000"), CardBrand::Unknown);
        assert_eq!(CardBrand::from_number("5600"), CardBrand::Unknown);
    }
}
