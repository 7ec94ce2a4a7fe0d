//! Order export
//!
//! The exporter turns a finished order into a shareable document and hands
//! back its URL. The engine only branches on whether the export succeeded.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::order::{Order, OrderLine};

pub mod http;

pub use http::{HttpExporterConfig, HttpOrderExporter};

/// Errors that can occur while exporting an order.
#[derive(Debug, Error)]
pub enum ExportError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The exporter returned a non-2xx response or an unreadable body.
    #[error("unexpected response from exporter: {0}")]
    UnexpectedResponse(String),

    /// The exporter answered but declined the order.
    #[error("export rejected: {0}")]
    Rejected(String),
}

/// One line of the exported order document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportLine {
    /// Lot code
    #[serde(rename = "lote")]
    pub lot_code: String,

    /// Series
    #[serde(rename = "serie")]
    pub series: String,

    /// Barcode
    #[serde(rename = "cb")]
    pub barcode: String,

    /// Color
    #[serde(rename = "color")]
    pub color: String,

    /// Size label
    #[serde(rename = "talla")]
    pub size: String,

    /// Units ordered
    #[serde(rename = "cantidad")]
    pub quantity: u32,

    /// Photo reference
    #[serde(rename = "foto")]
    pub photo_ref: String,

    /// Unit price in major units
    #[serde(rename = "precio")]
    pub unit_price: Decimal,
}

impl From<&OrderLine<'_>> for ExportLine {
    fn from(line: &OrderLine<'_>) -> Self {
        Self {
            lot_code: line.lot_code.clone(),
            series: line.series.clone(),
            barcode: line.barcode.clone(),
            color: line.color.clone(),
            size: line.size.clone(),
            quantity: line.quantity,
            photo_ref: line.photo_ref.clone(),
            unit_price: *line.unit_price.amount(),
        }
    }
}

/// Payload handed to an [`OrderExporter`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    /// Name of the buyer
    pub customer_name: String,

    /// Line items of the order
    pub lines: Vec<ExportLine>,
}

impl ExportRequest {
    /// Build the export payload for an order.
    pub fn new(customer_name: impl Into<String>, order: &Order<'_>) -> Self {
        Self {
            customer_name: customer_name.into(),
            lines: order.lines().iter().map(ExportLine::from).collect(),
        }
    }
}

/// Outcome reported by an [`OrderExporter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportResponse {
    /// Whether the document was generated
    pub ok: bool,

    /// Link to the generated document
    pub url: Option<String>,

    /// Reason given for a failed export
    pub error: Option<String>,
}

/// Generates an order document and returns where it can be found.
#[automock]
#[async_trait]
pub trait OrderExporter: Send + Sync {
    /// Export an order.
    async fn export(&self, request: &ExportRequest) -> Result<ExportResponse, ExportError>;
}
