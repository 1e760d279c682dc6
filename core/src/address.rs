//! Address types shared by the delivery and payment steps.

use serde::{Deserialize, Serialize};

/// A postal address as the storefront wire format carries it.
///
/// The wire payload is duck-typed (saved addresses come back with extra keys,
/// nullable fields, and so on), so every field that can legitimately be
/// absent is optional and the rest default to empty strings on
/// deserialization. [`crate::validate`] enforces what is actually required
/// before an address is ever sent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    /// Recipient first name
    pub first_name: String,
    /// Recipient last name
    pub last_name: String,
    /// Optional company line
    pub company: Option<String>,
    /// Street and house number
    pub street_name: String,
    /// Apartment, suite, unit, ...
    pub additional_street_info: Option<String>,
    /// City
    pub city: String,
    /// State or province code
    pub state: String,
    /// ZIP / postal code
    pub postal_code: String,
    /// ISO country code
    pub country: String,
    /// Contact phone number (required for shipping)
    pub phone: Option<String>,
    /// Contact e-mail (required for shipping)
    pub email: Option<String>,
}

/// Billing address: a postal address plus the "same as shipping" marker.
///
/// On the wire the marker is a sibling of the address on the cart snapshot
/// (`billingSameAsShipping`); this type is the merged client-side view built
/// by [`crate::extract::billing_address`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingAddress {
    /// The postal address
    #[serde(flatten)]
    pub address: Address,
    /// Whether the customer reused the shipping address
    #[serde(default)]
    pub billing_same_as_shipping: bool,
}

impl BillingAddress {
    /// Build a billing address from a plain address and the reuse marker
    #[must_use]
    pub const fn new(address: Address, billing_same_as_shipping: bool) -> Self {
        Self {
            address,
            billing_same_as_shipping,
        }
    }
}

impl From<Address> for BillingAddress {
    fn from(address: Address) -> Self {
        Self::new(address, false)
    }
}
