//! Order configuration
//!
//! Session-wide settings, loaded from a YAML file. Every field has a default,
//! so an empty file is a valid configuration.

use std::{fs, path::Path};

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::lenient,
    export::HttpExporterConfig,
    order::DEFAULT_SHIPPING_FEE,
    pricing::PricingPolicy,
    variants::{DuplicateSizePolicy, to_money},
};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the configuration file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Settings for an ordering session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    /// ISO 4217 code of the catalog currency
    pub currency: String,

    /// Flat shipping fee in major units
    #[serde(deserialize_with = "lenient::decimal")]
    pub shipping_fee: Decimal,

    /// Price tier rules
    pub pricing: PricingPolicy,

    /// Handling of repeated sizes within a variant
    pub duplicate_sizes: DuplicateSizePolicy,

    /// Whether a phone number is required before submitting
    pub require_phone: bool,

    /// Document-generation endpoint, if orders should be exported over HTTP
    pub export: Option<HttpExporterConfig>,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            currency: "MXN".to_string(),
            shipping_fee: Decimal::from(DEFAULT_SHIPPING_FEE),
            pricing: PricingPolicy::default(),
            duplicate_sizes: DuplicateSizePolicy::default(),
            require_phone: false,
            export: None,
        }
    }
}

impl OrderConfig {
    /// Parse a configuration from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the document is malformed.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(serde_norway::from_str(contents)?)
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Resolve the configured currency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCurrency`] if the code is not an ISO currency.
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        iso::find(self.currency.trim())
            .ok_or_else(|| ConfigError::UnknownCurrency(self.currency.clone()))
    }

    /// Shipping fee in the given currency.
    pub fn shipping_fee<'a>(&self, currency: &'a Currency) -> Money<'a, Currency> {
        to_money(self.shipping_fee, currency)
    }
}
