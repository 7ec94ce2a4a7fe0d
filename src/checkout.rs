//! Checkout
//!
//! An [`OrderSession`] owns one buyer's ledger and identity. Submitting
//! validates the identity, reduces the ledger into an immutable order, exports
//! it and composes the seller notification. The ledger is only read, so a
//! failed export leaves the cart exactly as it was and can be retried.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    catalog::InventoryRow,
    config::{ConfigError, OrderConfig},
    export::{ExportError, ExportRequest, OrderExporter},
    ledger::QuantityLedger,
    notify::{CustomerIdentity, NotificationComposer, NotificationInput},
    order::{Order, reduce},
    pricing::PricingPolicy,
};

/// Placeholder link used when the exporter succeeds without returning one.
pub const MISSING_EXPORT_URL: &str = "No generado";

/// Buyer details missing before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No customer name was entered.
    #[error("customer name is required")]
    MissingCustomerName,

    /// No phone number was entered and the session requires one.
    #[error("customer phone is required")]
    MissingCustomerPhone,
}

/// Errors that can occur while submitting an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The buyer identity is incomplete.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The exporter failed or declined the order.
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission<'a> {
    /// The order that was exported
    pub order: Order<'a>,

    /// Link to the exported document
    pub export_url: String,

    /// Message to forward to the seller
    pub message: String,
}

/// A single buyer's ordering session.
#[derive(Debug, Clone)]
pub struct OrderSession<'a> {
    ledger: QuantityLedger<'a>,
    customer: CustomerIdentity,
    pricing: PricingPolicy,
    shipping_fee: Money<'a, Currency>,
    require_phone: bool,
}

impl<'a> OrderSession<'a> {
    /// Create a session over a ledger.
    pub fn new(
        ledger: QuantityLedger<'a>,
        pricing: PricingPolicy,
        shipping_fee: Money<'a, Currency>,
    ) -> Self {
        Self {
            ledger,
            customer: CustomerIdentity::default(),
            pricing,
            shipping_fee,
            require_phone: false,
        }
    }

    /// Require a phone number before submitting.
    #[must_use]
    pub fn with_required_phone(mut self, require_phone: bool) -> Self {
        self.require_phone = require_phone;
        self
    }

    /// Quantity ledger for the session
    pub fn ledger(&self) -> &QuantityLedger<'a> {
        &self.ledger
    }

    /// Quantity ledger for the session, for buyer edits.
    pub fn ledger_mut(&mut self) -> &mut QuantityLedger<'a> {
        &mut self.ledger
    }

    /// Buyer identity
    pub fn customer(&self) -> &CustomerIdentity {
        &self.customer
    }

    /// Replace the buyer identity.
    pub fn set_customer(&mut self, customer: CustomerIdentity) {
        self.customer = customer;
    }

    /// Check that the buyer identity is complete.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first missing field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.customer.name.trim().is_empty() {
            return Err(ValidationError::MissingCustomerName);
        }

        let has_phone = self
            .customer
            .phone
            .as_deref()
            .is_some_and(|phone| !phone.trim().is_empty());

        if self.require_phone && !has_phone {
            return Err(ValidationError::MissingCustomerPhone);
        }

        Ok(())
    }

    /// Reduce the current cart without validating the buyer.
    pub fn preview(&self) -> Order<'a> {
        reduce(self.ledger.variants(), &self.pricing, self.shipping_fee)
    }

    /// Validate, export and compose the notification for the current cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Validation`] before anything is exported if
    /// the identity is incomplete, and [`CheckoutError::Export`] if the
    /// exporter fails or reports `ok: false`. The ledger is untouched either way.
    pub async fn submit(
        &self,
        exporter: &dyn OrderExporter,
        composer: &dyn NotificationComposer,
    ) -> Result<Submission<'a>, CheckoutError> {
        self.validate()?;

        let order = self.preview();
        let request = ExportRequest::new(self.customer.name.trim(), &order);

        let response = match exporter.export(&request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "order export failed");
                return Err(err.into());
            }
        };

        if !response.ok {
            let reason = response
                .error
                .unwrap_or_else(|| "exporter reported failure".to_string());

            tracing::warn!(%reason, "order export rejected");

            return Err(ExportError::Rejected(reason).into());
        }

        let export_url = response
            .url
            .unwrap_or_else(|| MISSING_EXPORT_URL.to_string());

        let message = composer.compose(&NotificationInput {
            customer: &self.customer,
            order: &order,
            export_url: &export_url,
        });

        tracing::info!(
            customer = %self.customer.name.trim(),
            lines = order.lines().len(),
            pieces = order.totals().total_pieces,
            grand_total = %order.totals().grand_total,
            "order submitted"
        );

        Ok(Submission {
            order,
            export_url,
            message,
        })
    }
}

impl OrderSession<'static> {
    /// Build a session from catalog rows and a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCurrency`] if the configured currency is
    /// not an ISO currency.
    pub fn from_config(rows: &[InventoryRow], config: &OrderConfig) -> Result<Self, ConfigError> {
        let currency = config.currency()?;
        let ledger = QuantityLedger::from_rows(rows, currency, config.duplicate_sizes);

        Ok(
            Self::new(ledger, config.pricing, config.shipping_fee(currency))
                .with_required_phone(config.require_phone),
        )
    }
}
