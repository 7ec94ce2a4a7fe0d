//! Command-line arguments for the order walkthrough

use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use thiserror::Error;

use crate::{checkout::OrderSession, notify::CustomerIdentity, variants::VariantKey};

/// Errors parsing a quantity edit
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditParseError {
    /// The edit has no `=` separating target and quantity.
    #[error("expected TARGET=QUANTITY, got `{0}`")]
    MissingQuantity(String),

    /// The target does not have the expected number of `/`-separated parts.
    #[error("expected {expected}, got `{target}`")]
    InvalidTarget {
        /// Expected shape of the target
        expected: &'static str,

        /// The target as given
        target: String,
    },

    /// The quantity is not an integer.
    #[error("invalid quantity `{0}`")]
    InvalidQuantity(String),
}

/// Set every size of a variant to the same quantity: `SERIES/COLOR=N`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunEdit {
    /// Variant being edited
    pub key: VariantKey,

    /// Pieces per size
    pub quantity: i64,
}

/// Set one size of a variant: `SERIES/COLOR/SIZE=N`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeEdit {
    /// Variant being edited
    pub key: VariantKey,

    /// Size label
    pub size: String,

    /// Pieces requested
    pub quantity: i64,
}

fn split_edit(input: &str) -> Result<(&str, i64), EditParseError> {
    let (target, quantity) = input
        .rsplit_once('=')
        .ok_or_else(|| EditParseError::MissingQuantity(input.to_string()))?;

    let quantity = quantity
        .trim()
        .parse()
        .map_err(|_err| EditParseError::InvalidQuantity(quantity.trim().to_string()))?;

    Ok((target.trim(), quantity))
}

impl FromStr for RunEdit {
    type Err = EditParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (target, quantity) = split_edit(s)?;

        match target.split('/').collect::<Vec<_>>().as_slice() {
            [series, color] => Ok(Self {
                key: VariantKey::new(series.trim(), color.trim()),
                quantity,
            }),
            _ => Err(EditParseError::InvalidTarget {
                expected: "SERIES/COLOR",
                target: target.to_string(),
            }),
        }
    }
}

impl FromStr for SizeEdit {
    type Err = EditParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (target, quantity) = split_edit(s)?;

        match target.split('/').collect::<Vec<_>>().as_slice() {
            [series, color, size] => Ok(Self {
                key: VariantKey::new(series.trim(), color.trim()),
                size: size.trim().to_string(),
                quantity,
            }),
            _ => Err(EditParseError::InvalidTarget {
                expected: "SERIES/COLOR/SIZE",
                target: target.to_string(),
            }),
        }
    }
}

/// Arguments for the order walkthrough
#[derive(Debug, Parser)]
#[command(name = "corrida-order", about = "Build and submit a wholesale apparel order", long_about = None)]
pub struct OrderArgs {
    /// Inventory catalog (JSON or YAML)
    #[arg(
        short,
        long,
        env = "CORRIDA_CATALOG",
        default_value = "fixtures/catalogs/margu.json"
    )]
    pub catalog: PathBuf,

    /// Order configuration file (YAML)
    #[arg(long, env = "CORRIDA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Buyer name; the order is only submitted when given
    #[arg(long)]
    pub customer: Option<String>,

    /// Buyer phone
    #[arg(long)]
    pub phone: Option<String>,

    /// Note for the seller
    #[arg(long)]
    pub comment: Option<String>,

    /// Order a run, `SERIES/COLOR=N` (repeatable)
    #[arg(short, long = "run", value_name = "SERIES/COLOR=N")]
    pub runs: Vec<RunEdit>,

    /// Order a single size, `SERIES/COLOR/SIZE=N` (repeatable)
    #[arg(short, long = "qty", value_name = "SERIES/COLOR/SIZE=N")]
    pub quantities: Vec<SizeEdit>,

    /// Post the order to the configured export endpoint
    #[arg(long)]
    pub export: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl OrderArgs {
    /// Apply the run edits, then the size edits, to a session.
    pub fn apply_edits(&self, session: &mut OrderSession<'_>) {
        let ledger = session.ledger_mut();

        for edit in &self.runs {
            ledger.set_run_quantity(&edit.key, edit.quantity);
        }

        for edit in &self.quantities {
            ledger.set_size_quantity(&edit.key, &edit.size, edit.quantity);
        }
    }

    /// Buyer identity, if a name was given.
    pub fn customer(&self) -> Option<CustomerIdentity> {
        self.customer.as_ref().map(|name| CustomerIdentity {
            name: name.clone(),
            phone: self.phone.clone(),
            comment: self.comment.clone(),
        })
    }
}
