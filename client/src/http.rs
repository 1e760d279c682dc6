//! The reqwest-backed checkout API implementation.

use checkout_flow_core::address::{Address, BillingAddress};
use checkout_flow_core::cart::{Cart, GiftMessage, PlacedOrder};
use checkout_flow_core::environment::{ApiFuture, CheckoutApi};
use checkout_flow_core::error::ApiError;
use checkout_flow_core::payment::{CreditCardRequest, GiftCardRequest, PlaceOrderRequest};
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::{ClientConfig, ClientError};

/// HTTP implementation of the checkout API
///
/// | Operation | Method & path |
/// |---|---|
/// | fetch cart | `GET /api/cart` |
/// | save shipping address | `POST /api/checkout/shipping-address` |
/// | save / remove gift message | `POST` / `DELETE /api/checkout/gift-message` |
/// | apply gift card | `POST /api/checkout/gift-card` |
/// | remove gift card | `DELETE /api/checkout/gift-card/{payment_id}` |
/// | save credit card | `POST /api/checkout/credit-card` |
/// | save billing address | `POST /api/checkout/billing-address` |
/// | place order | `POST /api/checkout/place-order` |
#[derive(Clone)]
pub struct HttpCheckoutApi {
    client: Client,
    base_url: String,
}

impl HttpCheckoutApi {
    /// Build a client from the given configuration
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Build`] when the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| ClientError::Build(error.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    /// Build a client configured from `CHECKOUT_API_URL`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingBaseUrl`] when the variable is unset, or
    /// [`ClientError::Build`] when the HTTP client cannot be constructed.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ClientConfig::from_env()?)
    }

    async fn request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&(impl Serialize + Sync)>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%method, %url, "checkout API request");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|error| ApiError::Transport(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), %url, "checkout API request failed");
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|error| ApiError::Decode(error.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, None::<&()>).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, ApiError> {
        self.request(Method::POST, path, Some(body)).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::DELETE, path, None::<&()>).await
    }
}

impl CheckoutApi for HttpCheckoutApi {
    fn fetch_cart(&self) -> ApiFuture<'_, Cart> {
        Box::pin(self.get("/api/cart"))
    }

    fn save_shipping_address(&self, address: Address) -> ApiFuture<'_, Cart> {
        Box::pin(async move { self.post("/api/checkout/shipping-address", &address).await })
    }

    fn save_gift_message(&self, gift_message: GiftMessage) -> ApiFuture<'_, Cart> {
        Box::pin(async move { self.post("/api/checkout/gift-message", &gift_message).await })
    }

    fn remove_gift_message(&self) -> ApiFuture<'_, Cart> {
        Box::pin(self.delete("/api/checkout/gift-message"))
    }

    fn apply_gift_card(&self, request: GiftCardRequest) -> ApiFuture<'_, Cart> {
        Box::pin(async move { self.post("/api/checkout/gift-card", &request).await })
    }

    fn remove_gift_card(&self, payment_id: String) -> ApiFuture<'_, Cart> {
        Box::pin(async move {
            self.delete(&format!("/api/checkout/gift-card/{payment_id}")).await
        })
    }

    fn save_credit_card(&self, request: CreditCardRequest) -> ApiFuture<'_, Cart> {
        Box::pin(async move { self.post("/api/checkout/credit-card", &request).await })
    }

    fn save_billing_address(&self, address: BillingAddress) -> ApiFuture<'_, Cart> {
        Box::pin(async move { self.post("/api/checkout/billing-address", &address).await })
    }

    fn place_order(&self, request: PlaceOrderRequest) -> ApiFuture<'_, PlacedOrder> {
        Box::pin(async move { self.post("/api/checkout/place-order", &request).await })
    }
}
