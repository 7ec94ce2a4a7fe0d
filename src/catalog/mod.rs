//! Catalog
//!
//! Flat inventory rows as published by the seller, one row per garment, color
//! and size. The Spanish column names are the wire contract.

use std::{fs, path::Path};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

pub(crate) mod lenient;

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML catalog: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// The file extension does not name a supported format
    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),
}

/// A single inventory row (garment × color × size).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InventoryRow {
    /// Gender category (`Genero`)
    #[serde(rename = "Genero", default, deserialize_with = "lenient::text")]
    pub gender_category: String,

    /// Lot code (`Lote`)
    #[serde(rename = "Lote", default, deserialize_with = "lenient::text")]
    pub lot_code: String,

    /// Series (`Serie`)
    #[serde(rename = "Serie", default, deserialize_with = "lenient::text")]
    pub series: String,

    /// Garment name (`Prenda`)
    #[serde(rename = "Prenda", default, deserialize_with = "lenient::text")]
    pub garment_name: String,

    /// Color (`Color`)
    #[serde(rename = "Color", default, deserialize_with = "lenient::text")]
    pub color: String,

    /// Barcode (`CB`)
    #[serde(rename = "CB", default, deserialize_with = "lenient::text")]
    pub barcode: String,

    /// Size label (`Talla`)
    #[serde(rename = "Talla", default, deserialize_with = "lenient::text")]
    pub size: String,

    /// Age label (`Edad`)
    #[serde(rename = "Edad", default, deserialize_with = "lenient::text")]
    pub age_label: String,

    /// Units in stock (`Inventario`)
    #[serde(rename = "Inventario", default, deserialize_with = "lenient::quantity")]
    pub stock_quantity: u32,

    /// Photo reference (`Foto`)
    #[serde(rename = "Foto", default, deserialize_with = "lenient::text")]
    pub photo_ref: String,

    /// Retail unit price in major units (`Menudeo`)
    #[serde(rename = "Menudeo", default, deserialize_with = "lenient::decimal")]
    pub retail_price: Decimal,

    /// Wholesale unit price in major units (`Mayoreo`)
    #[serde(rename = "Mayoreo", default, deserialize_with = "lenient::decimal")]
    pub wholesale_price: Decimal,

    /// Full-run unit price in major units (`Corrida`)
    #[serde(rename = "Corrida", default, deserialize_with = "lenient::decimal")]
    pub run_price: Decimal,
}

/// Catalog of inventory rows, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    rows: Vec<InventoryRow>,
}

impl Catalog {
    /// Create a catalog from already decoded rows.
    pub fn new(rows: impl Into<Vec<InventoryRow>>) -> Self {
        Self { rows: rows.into() }
    }

    /// Parse a catalog from a JSON array of rows.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] if the document is not an array of objects.
    pub fn from_json_str(contents: &str) -> Result<Self, CatalogError> {
        let rows: Vec<InventoryRow> = serde_json::from_str(contents)?;

        Ok(Self::new(rows))
    }

    /// Parse a catalog from a YAML sequence of rows.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Yaml`] if the document is not a sequence of mappings.
    pub fn from_yaml_str(contents: &str) -> Result<Self, CatalogError> {
        let rows: Vec<InventoryRow> = serde_norway::from_str(contents)?;

        Ok(Self::new(rows))
    }

    /// Load a catalog file, picking the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// extension is not one of `json`, `yml` or `yaml`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let contents = fs::read_to_string(path)?;

        let catalog = match extension.as_str() {
            "json" => Self::from_json_str(&contents)?,
            "yml" | "yaml" => Self::from_yaml_str(&contents)?,
            _ => return Err(CatalogError::UnsupportedFormat(path.display().to_string())),
        };

        tracing::debug!(path = %path.display(), rows = catalog.len(), "loaded catalog");

        Ok(catalog)
    }

    /// Rows in source order.
    pub fn rows(&self) -> &[InventoryRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the catalog has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
