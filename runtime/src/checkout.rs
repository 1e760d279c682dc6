//! The command facade the presentation layer drives.
//!
//! [`Checkout`] wraps a [`Store`] running the checkout reducer and turns each
//! wizard interaction into a single async call:
//!
//! 1. **Validate locally.** Field validation failures block dispatch
//!    entirely - nothing reaches the state machine, no loading flag flips,
//!    and the caller gets [`CommandError::Invalid`] with per-field messages.
//! 2. **Dispatch and await the terminal action.** Saves resolve when the
//!    API round-trip lands back in the store; an API failure is already
//!    recorded in the `errors` slice by the time [`CommandError::Api`]
//!    reaches the caller.
//! 3. **Surface guard failures.** The reducer keeps its silent no-op
//!    contract for the step-completion guards; the facade checks the same
//!    guards first and returns [`CommandError::Incomplete`] so the UI can
//!    react instead of appearing unresponsive.

use std::sync::Arc;
use std::time::Duration;

use checkout_flow_core::action::CheckoutAction;
use checkout_flow_core::address::{Address, BillingAddress};
use checkout_flow_core::cart::{GiftMessage, PlacedOrder};
use checkout_flow_core::environment::{CheckoutApi, Clock};
use checkout_flow_core::machine::{CheckoutEnvironment, CheckoutReducer};
use checkout_flow_core::payment::{CreditCardRequest, GiftCardRequest, PlaceOrderRequest};
use checkout_flow_core::state::{CheckoutState, CheckoutStep};
use checkout_flow_core::validate::{self, AddressKind, ValidationErrors};
use thiserror::Error;

use crate::{Store, StoreError};

/// The store type the checkout machine runs on
pub type CheckoutStore = Store<CheckoutState, CheckoutAction, CheckoutEnvironment, CheckoutReducer>;

/// Default time a command waits for its API round-trip
const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors surfaced by [`Checkout`] commands
#[derive(Error, Debug)]
pub enum CommandError {
    /// Local validation failed; nothing was dispatched
    #[error("validation failed: {0}")]
    Invalid(ValidationErrors),

    /// The API rejected or failed the operation; the message is also
    /// recorded in the corresponding `errors` entry of the state
    #[error("{0}")]
    Api(String),

    /// A step-completion guard did not hold
    #[error("step precondition not met: {0}")]
    Incomplete(&'static str),

    /// The store rejected or timed out the command
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// High-level command API over the checkout state machine
///
/// Clone-cheap: clones share the same store.
///
/// # Example
///
/// ```ignore
/// let checkout = Checkout::new(api, Arc::new(SystemClock));
/// checkout.fetch_cart().await?;
/// checkout.save_shipping_address(address).await?;
/// checkout.complete_delivery_step().await?;
/// assert_eq!(checkout.state().await.current_step, CheckoutStep::Payment);
/// ```
#[derive(Clone)]
pub struct Checkout {
    store: Arc<CheckoutStore>,
    api: Arc<dyn CheckoutApi>,
    timeout: Duration,
}

impl Checkout {
    /// Create a checkout session with an empty initial state
    #[must_use]
    pub fn new(api: Arc<dyn CheckoutApi>, clock: Arc<dyn Clock>) -> Self {
        let environment = CheckoutEnvironment::new(Arc::clone(&api), clock);
        let store = Arc::new(Store::new(
            CheckoutState::default(),
            CheckoutReducer,
            environment,
        ));

        Self {
            store,
            api,
            timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    /// Override the per-command timeout
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Arc fields keep this non-const
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The underlying store, for observers and direct action access
    #[must_use]
    pub const fn store(&self) -> &Arc<CheckoutStore> {
        &self.store
    }

    /// Snapshot of the full checkout state
    pub async fn state(&self) -> CheckoutState {
        self.store.state(Clone::clone).await
    }

    /// Read a projection of the state via a closure
    pub async fn read<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&CheckoutState) -> T,
    {
        self.store.state(f).await
    }

    /// Dispatch a command and wait for one of its terminal actions
    async fn round_trip<F>(&self, action: CheckoutAction, terminal: F) -> Result<CheckoutAction, CommandError>
    where
        F: Fn(&CheckoutAction) -> bool,
    {
        Ok(self.store.send_and_wait_for(action, terminal, self.timeout).await?)
    }

    //
    // ===== Cart =====
    //

    /// Fetch the cart and hydrate checkout progress from it
    ///
    /// Runs the resume algorithm on every call: fetch at session start and
    /// after reloads to land the customer on the right step.
    ///
    /// # Errors
    ///
    /// [`CommandError::Api`] when the fetch fails; the message is also in
    /// `state.fetch_error` and no progress has been touched.
    #[tracing::instrument(skip(self), name = "checkout_fetch_cart")]
    pub async fn fetch_cart(&self) -> Result<(), CommandError> {
        let outcome = self
            .round_trip(CheckoutAction::FetchCart, |a| {
                matches!(
                    a,
                    CheckoutAction::CartFetched(_) | CheckoutAction::CartFetchFailed(_)
                )
            })
            .await?;

        match outcome {
            CheckoutAction::CartFetchFailed(message) => Err(CommandError::Api(message)),
            _ => Ok(()),
        }
    }

    /// Place the order for the fetched cart
    ///
    /// Requires the payment step to be complete. Goes straight to the API -
    /// a placed order ends the session, so machine state is left alone for
    /// the confirmation screen to read.
    ///
    /// # Errors
    ///
    /// [`CommandError::Incomplete`] before the payment step is complete or a
    /// cart has been fetched; [`CommandError::Api`] when the API fails.
    #[tracing::instrument(skip(self), name = "checkout_place_order")]
    pub async fn place_order(&self) -> Result<PlacedOrder, CommandError> {
        let (ready, cart_number) = self
            .read(|s| {
                (
                    s.payment.is_complete,
                    s.cart.as_ref().and_then(|cart| cart.cart_number),
                )
            })
            .await;

        if !ready {
            return Err(CommandError::Incomplete("payment step has not been completed"));
        }
        let Some(cart_number) = cart_number else {
            return Err(CommandError::Incomplete("no cart snapshot has been fetched"));
        };

        self.api
            .place_order(PlaceOrderRequest { cart_number })
            .await
            .map_err(|error| CommandError::Api(error.to_string()))
    }

    //
    // ===== Delivery step =====
    //

    /// Validate and persist the shipping address
    ///
    /// # Errors
    ///
    /// [`CommandError::Invalid`] on validation failure (nothing dispatched),
    /// [`CommandError::Api`] when the save fails.
    #[tracing::instrument(skip_all, name = "checkout_save_shipping_address")]
    pub async fn save_shipping_address(&self, address: Address) -> Result<(), CommandError> {
        validate::address(&address, AddressKind::Shipping)
            .into_result()
            .map_err(CommandError::Invalid)?;

        let outcome = self
            .round_trip(CheckoutAction::SaveShippingAddress(address), |a| {
                matches!(
                    a,
                    CheckoutAction::ShippingAddressSaved(_)
                        | CheckoutAction::ShippingAddressFailed(_)
                )
            })
            .await?;

        match outcome {
            CheckoutAction::ShippingAddressFailed(message) => Err(CommandError::Api(message)),
            _ => Ok(()),
        }
    }

    /// Validate and persist the gift message
    ///
    /// # Errors
    ///
    /// [`CommandError::Invalid`] on validation failure,
    /// [`CommandError::Api`] when the save fails.
    #[tracing::instrument(skip_all, name = "checkout_save_gift_message")]
    pub async fn save_gift_message(&self, gift_message: GiftMessage) -> Result<(), CommandError> {
        validate::gift_message(&gift_message)
            .into_result()
            .map_err(CommandError::Invalid)?;

        let outcome = self
            .round_trip(CheckoutAction::SaveGiftMessage(gift_message), |a| {
                matches!(
                    a,
                    CheckoutAction::GiftMessageSaved(_) | CheckoutAction::GiftMessageFailed(_)
                )
            })
            .await?;

        match outcome {
            CheckoutAction::GiftMessageFailed(message) => Err(CommandError::Api(message)),
            _ => Ok(()),
        }
    }

    /// Remove the saved gift message
    ///
    /// # Errors
    ///
    /// [`CommandError::Api`] when the removal fails.
    pub async fn remove_gift_message(&self) -> Result<(), CommandError> {
        let outcome = self
            .round_trip(CheckoutAction::RemoveGiftMessage, |a| {
                matches!(
                    a,
                    CheckoutAction::GiftMessageRemoved(_)
                        | CheckoutAction::GiftMessageRemovalFailed(_)
                )
            })
            .await?;

        match outcome {
            CheckoutAction::GiftMessageRemovalFailed(message) => Err(CommandError::Api(message)),
            _ => Ok(()),
        }
    }

    /// Complete the delivery step and advance the wizard to Payment
    ///
    /// # Errors
    ///
    /// [`CommandError::Incomplete`] when no shipping address has been saved.
    pub async fn complete_delivery_step(&self) -> Result<(), CommandError> {
        if !self.read(CheckoutState::can_complete_delivery).await {
            return Err(CommandError::Incomplete("shipping address has not been saved"));
        }
        self.store.send(CheckoutAction::CompleteDeliveryStep).await?;
        Ok(())
    }

    //
    // ===== Payment step =====
    //

    /// Validate and apply a gift card
    ///
    /// # Errors
    ///
    /// [`CommandError::Invalid`] on validation failure,
    /// [`CommandError::Api`] when the application fails.
    #[tracing::instrument(skip_all, name = "checkout_apply_gift_card")]
    pub async fn apply_gift_card(&self, request: GiftCardRequest) -> Result<(), CommandError> {
        validate::gift_card(&request)
            .into_result()
            .map_err(CommandError::Invalid)?;

        let outcome = self
            .round_trip(CheckoutAction::ApplyGiftCard(request), |a| {
                matches!(
                    a,
                    CheckoutAction::GiftCardApplied(_) | CheckoutAction::GiftCardFailed(_)
                )
            })
            .await?;

        match outcome {
            CheckoutAction::GiftCardFailed(message) => Err(CommandError::Api(message)),
            _ => Ok(()),
        }
    }

    /// Remove an applied gift card
    ///
    /// # Errors
    ///
    /// [`CommandError::Api`] when the removal fails.
    pub async fn remove_gift_card(&self, payment_id: impl Into<String>) -> Result<(), CommandError> {
        let outcome = self
            .round_trip(
                CheckoutAction::RemoveGiftCard {
                    payment_id: payment_id.into(),
                },
                |a| {
                    matches!(
                        a,
                        CheckoutAction::GiftCardRemoved(_)
                            | CheckoutAction::GiftCardRemovalFailed(_)
                    )
                },
            )
            .await?;

        match outcome {
            CheckoutAction::GiftCardRemovalFailed(message) => Err(CommandError::Api(message)),
            _ => Ok(()),
        }
    }

    /// Validate and persist the credit card
    ///
    /// # Errors
    ///
    /// [`CommandError::Invalid`] on validation failure,
    /// [`CommandError::Api`] when the save fails.
    #[tracing::instrument(skip_all, name = "checkout_save_credit_card")]
    pub async fn save_credit_card(&self, request: CreditCardRequest) -> Result<(), CommandError> {
        validate::credit_card(&request)
            .into_result()
            .map_err(CommandError::Invalid)?;

        let outcome = self
            .round_trip(CheckoutAction::SaveCreditCard(request), |a| {
                matches!(
                    a,
                    CheckoutAction::CreditCardSaved(_) | CheckoutAction::CreditCardFailed(_)
                )
            })
            .await?;

        match outcome {
            CheckoutAction::CreditCardFailed(message) => Err(CommandError::Api(message)),
            _ => Ok(()),
        }
    }

    /// Validate and persist the billing address
    ///
    /// # Errors
    ///
    /// [`CommandError::Invalid`] on validation failure,
    /// [`CommandError::Api`] when the save fails.
    #[tracing::instrument(skip_all, name = "checkout_save_billing_address")]
    pub async fn save_billing_address(&self, address: BillingAddress) -> Result<(), CommandError> {
        validate::billing_address(&address)
            .into_result()
            .map_err(CommandError::Invalid)?;

        let outcome = self
            .round_trip(CheckoutAction::SaveBillingAddress(address), |a| {
                matches!(
                    a,
                    CheckoutAction::BillingAddressSaved(_)
                        | CheckoutAction::BillingAddressFailed(_)
                )
            })
            .await?;

        match outcome {
            CheckoutAction::BillingAddressFailed(message) => Err(CommandError::Api(message)),
            _ => Ok(()),
        }
    }

    /// Complete the payment step and advance the wizard to Review
    ///
    /// # Errors
    ///
    /// [`CommandError::Incomplete`] when the billing address or every payment
    /// method is missing.
    pub async fn complete_payment_step(&self) -> Result<(), CommandError> {
        if !self.read(CheckoutState::can_complete_payment).await {
            return Err(CommandError::Incomplete(
                "billing address and a payment method are required",
            ));
        }
        self.store.send(CheckoutAction::CompletePaymentStep).await?;
        Ok(())
    }

    //
    // ===== Wizard navigation =====
    //

    /// Show a step without any guard; caller responsibility
    ///
    /// # Errors
    ///
    /// [`CommandError::Store`] when the store is shutting down.
    pub async fn set_current_step(&self, step: CheckoutStep) -> Result<(), CommandError> {
        self.store.send(CheckoutAction::SetCurrentStep(step)).await?;
        Ok(())
    }

    /// Toggle delivery editing; `true` forces the wizard back to Delivery
    ///
    /// # Errors
    ///
    /// [`CommandError::Store`] when the store is shutting down.
    pub async fn set_delivery_editing(&self, editing: bool) -> Result<(), CommandError> {
        self.store.send(CheckoutAction::SetDeliveryEditing(editing)).await?;
        Ok(())
    }

    /// Toggle payment editing; `true` forces the wizard back to Payment
    ///
    /// # Errors
    ///
    /// [`CommandError::Store`] when the store is shutting down.
    pub async fn set_payment_editing(&self, editing: bool) -> Result<(), CommandError> {
        self.store.send(CheckoutAction::SetPaymentEditing(editing)).await?;
        Ok(())
    }

    /// Discard the session and return to the initial state
    ///
    /// # Errors
    ///
    /// [`CommandError::Store`] when the store is shutting down.
    pub async fn reset(&self) -> Result<(), CommandError> {
        self.store.send(CheckoutAction::Reset).await?;
        Ok(())
    }
}
