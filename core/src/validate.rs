//! Client-side field validation.
//!
//! Validation is local and blocks command dispatch entirely: the command
//! facade runs these checks before anything reaches the state machine, so a
//! validation failure never flips a loading flag or lands in the per-field
//! `errors` slice. Field keys and messages mirror the storefront forms.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::address::{Address, BillingAddress};
use crate::cart::GiftMessage;
use crate::payment::{CreditCardRequest, GiftCardRequest};

/// Maximum gift message length in characters
pub const MAX_GIFT_MESSAGE_LEN: usize = 72;

#[allow(clippy::expect_used)] // The pattern is a compile-time constant
static ZIP_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("ZIP pattern compiles"));

#[allow(clippy::expect_used)] // The pattern is a compile-time constant
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("e-mail pattern compiles"));

#[allow(clippy::expect_used)] // The pattern is a compile-time constant
static CARD_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{13,19}$").expect("card pattern compiles"));

#[allow(clippy::expect_used)] // The pattern is a compile-time constant
static CVV: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3,4}$").expect("CVV pattern compiles"));

/// Field-keyed validation messages.
///
/// Empty means valid. Keys are the storefront form field names
/// (`firstName`, `zipCode`, `cardNumber`, ...), so the presentation layer can
/// attach messages to inputs directly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    entries: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.entries.entry(field).or_insert_with(|| message.into());
    }

    /// Whether no field failed validation
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Message for a field, if it failed
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries.get(field).map(String::as_str)
    }

    /// Iterate over `(field, message)` pairs in field order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// Convert into a `Result`, erring with `self` when any field failed
    ///
    /// # Errors
    ///
    /// Returns `Err(self)` when at least one field failed validation.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in &self.entries {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Which form an address is validated for: shipping requires contact fields,
/// billing does not.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressKind {
    /// Shipping address form (e-mail and phone required)
    Shipping,
    /// Billing address form
    Billing,
}

/// Validate an address for the given form
#[must_use]
pub fn address(address: &Address, kind: AddressKind) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if address.first_name.trim().is_empty() {
        errors.push("firstName", "Please enter a first name.");
    }
    if address.last_name.trim().is_empty() {
        errors.push("lastName", "Please enter a last name.");
    }
    if address.street_name.trim().is_empty() {
        errors.push("addressLineOne", "Please enter an address.");
    }
    if address.city.trim().is_empty() {
        errors.push("city", "Please enter a city.");
    }
    if address.state.trim().is_empty() {
        errors.push("state", "Please select a state.");
    }
    if address.postal_code.trim().is_empty() {
        errors.push("zipCode", "Please enter a ZIP Code.");
    } else if !ZIP_CODE.is_match(address.postal_code.trim()) {
        errors.push("zipCode", "Please enter a valid ZIP Code.");
    }

    let email = address.email.as_deref().unwrap_or("").trim();
    if kind == AddressKind::Shipping && email.is_empty() {
        errors.push("emailAddress", "Please enter an email address.");
    } else if !email.is_empty() && !EMAIL.is_match(email) {
        errors.push("emailAddress", "Please enter a valid email address.");
    }

    let phone = address.phone.as_deref().unwrap_or("").trim();
    if kind == AddressKind::Shipping && phone.is_empty() {
        errors.push("phone", "Please enter a phone number.");
    }

    errors
}

/// Validate a billing address (the reuse marker needs no checking)
#[must_use]
pub fn billing_address(billing: &BillingAddress) -> ValidationErrors {
    address(&billing.address, AddressKind::Billing)
}

/// Validate a gift message
#[must_use]
pub fn gift_message(message: &GiftMessage) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if message.gift_sender_name.trim().is_empty() {
        errors.push("giftSenderName", "Please enter sender's name.");
    }
    if message.gift_receiver_name.trim().is_empty() {
        errors.push("giftReceiverName", "Please enter recipient's name.");
    }
    if message.gift_message.chars().count() > MAX_GIFT_MESSAGE_LEN {
        errors.push(
            "giftMessage",
            format!("Gift message must be {MAX_GIFT_MESSAGE_LEN} characters or fewer."),
        );
    }

    errors
}

/// Validate a credit card request
#[must_use]
pub fn credit_card(card: &CreditCardRequest) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    let number: String = card.card_number.chars().filter(|c| !c.is_whitespace()).collect();
    if number.is_empty() {
        errors.push("cardNumber", "Please enter a card number.");
    } else if !CARD_NUMBER.is_match(&number) {
        errors.push("cardNumber", "Please enter a valid card number.");
    }

    if card.card_holder_name.trim().is_empty() {
        errors.push("cardHolderName", "Please enter the cardholder name.");
    }
    if card.expiration_month.trim().is_empty() {
        errors.push("expirationMonth", "Please select expiration month.");
    }
    if card.expiration_year.trim().is_empty() {
        errors.push("expirationYear", "Please select expiration year.");
    }

    if card.cvv.trim().is_empty() {
        errors.push("cvv", "Please enter CVV.");
    } else if !CVV.is_match(card.cvv.trim()) {
        errors.push("cvv", "Please enter a valid CVV.");
    }

    errors
}

/// Validate a gift card request
#[must_use]
pub fn gift_card(card: &GiftCardRequest) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if card.card_number.trim().is_empty() {
        errors.push("cardNumber", "Please enter a gift card number.");
    }
    if card.pin.trim().is_empty() {
        errors.push("pin", "Please enter the PIN.");
    }

    errors
}
