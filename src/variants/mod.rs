//! Variants
//!
//! Sellable product variants: every inventory row sharing a series and color
//! folds into one [`Variant`], with one [`SizeLine`] per row.

use std::fmt;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use smallvec::SmallVec;

use crate::{catalog::InventoryRow, pricing::PriceTier};

pub mod filter;
pub mod sizes;

pub use filter::{VariantFacets, VariantFilter};
pub use sizes::natural_size_cmp;

/// Identity of a variant, independent of size.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantKey {
    series: String,
    color: String,
}

impl VariantKey {
    /// Create a new key from a series and a color.
    pub fn new(series: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            series: series.into(),
            color: color.into(),
        }
    }

    /// Series of the key
    pub fn series(&self) -> &str {
        &self.series
    }

    /// Color of the key
    pub fn color(&self) -> &str {
        &self.color
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.series, self.color)
    }
}

/// What to do when a variant receives a second row for a size it already has.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateSizePolicy {
    /// Every row becomes its own size line. Edits address a size by label,
    /// landing on its first in-stock line.
    Append,

    /// The later row replaces the age label and stock of the earlier line.
    #[default]
    LastWriteWins,

    /// The later row's stock is added to the earlier line.
    Accumulate,
}

/// Per-size stock and requested quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeLine {
    size: String,
    age_label: String,
    stock_quantity: u32,
    requested_quantity: u32,
}

impl SizeLine {
    /// Create a size line with nothing requested.
    pub fn new(size: impl Into<String>, age_label: impl Into<String>, stock_quantity: u32) -> Self {
        Self {
            size: size.into(),
            age_label: age_label.into(),
            stock_quantity,
            requested_quantity: 0,
        }
    }

    /// Size label
    pub fn size(&self) -> &str {
        &self.size
    }

    /// Age label
    pub fn age_label(&self) -> &str {
        &self.age_label
    }

    /// Units in stock
    pub fn stock_quantity(&self) -> u32 {
        self.stock_quantity
    }

    /// Units requested by the buyer
    pub fn requested_quantity(&self) -> u32 {
        self.requested_quantity
    }

    /// Whether the size can be ordered at all.
    pub fn is_available(&self) -> bool {
        self.stock_quantity > 0
    }

    /// Whether the buyer has requested any units of this size.
    pub fn is_ordered(&self) -> bool {
        self.requested_quantity > 0
    }

    /// Set the requested quantity, keeping out-of-stock sizes at zero.
    pub(crate) fn set_requested(&mut self, quantity: u32) {
        self.requested_quantity = if self.is_available() { quantity } else { 0 };
    }
}

/// A sellable product variant keyed by series and color.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant<'a> {
    key: VariantKey,
    garment_name: String,
    gender_category: String,
    lot_code: String,
    barcode: String,
    photo_ref: String,
    retail_price: Money<'a, Currency>,
    wholesale_price: Money<'a, Currency>,
    run_price: Money<'a, Currency>,
    sizes: SmallVec<[SizeLine; 8]>,
    run_quantity_hint: u32,
}

impl<'a> Variant<'a> {
    /// Create a variant from the first row seen for its key, with no sizes.
    pub fn from_row(row: &InventoryRow, currency: &'a Currency) -> Self {
        Self {
            key: VariantKey::new(row.series.as_str(), row.color.as_str()),
            garment_name: row.garment_name.clone(),
            gender_category: row.gender_category.clone(),
            lot_code: row.lot_code.clone(),
            barcode: row.barcode.clone(),
            photo_ref: row.photo_ref.clone(),
            retail_price: to_money(row.retail_price, currency),
            wholesale_price: to_money(row.wholesale_price, currency),
            run_price: to_money(row.run_price, currency),
            sizes: SmallVec::new(),
            run_quantity_hint: 0,
        }
    }

    /// Key of the variant
    pub fn key(&self) -> &VariantKey {
        &self.key
    }

    /// Series of the variant
    pub fn series(&self) -> &str {
        self.key.series()
    }

    /// Color of the variant
    pub fn color(&self) -> &str {
        self.key.color()
    }

    /// Garment name
    pub fn garment_name(&self) -> &str {
        &self.garment_name
    }

    /// Gender category
    pub fn gender_category(&self) -> &str {
        &self.gender_category
    }

    /// Lot code
    pub fn lot_code(&self) -> &str {
        &self.lot_code
    }

    /// Barcode
    pub fn barcode(&self) -> &str {
        &self.barcode
    }

    /// Photo reference
    pub fn photo_ref(&self) -> &str {
        &self.photo_ref
    }

    /// Unit price for the given tier.
    pub fn price(&self, tier: PriceTier) -> Money<'a, Currency> {
        match tier {
            PriceTier::Retail => self.retail_price,
            PriceTier::Wholesale => self.wholesale_price,
            PriceTier::Run => self.run_price,
        }
    }

    /// Size lines in the order their rows were encountered.
    pub fn sizes(&self) -> &[SizeLine] {
        &self.sizes
    }

    /// Size lines sorted with [`natural_size_cmp`].
    pub fn sizes_in_natural_order(&self) -> Vec<&SizeLine> {
        let mut sizes: Vec<&SizeLine> = self.sizes.iter().collect();

        sizes.sort_by(|a, b| natural_size_cmp(a.size(), b.size()));

        sizes
    }

    /// First size line with the given label.
    pub fn size(&self, size: &str) -> Option<&SizeLine> {
        self.sizes.iter().find(|line| line.size == size)
    }

    /// Last run quantity entered for this variant.
    pub fn run_quantity_hint(&self) -> u32 {
        self.run_quantity_hint
    }

    /// Total units requested across all sizes.
    pub fn requested_pieces(&self) -> u64 {
        self.sizes
            .iter()
            .map(|line| u64::from(line.requested_quantity))
            .sum()
    }

    /// Whether any size has a requested quantity.
    pub fn has_order(&self) -> bool {
        self.sizes.iter().any(SizeLine::is_ordered)
    }

    /// Whether any line with the given label has a requested quantity.
    pub fn is_size_ordered(&self, size: &str) -> bool {
        self.sizes
            .iter()
            .any(|line| line.size == size && line.is_ordered())
    }

    /// Set the requested quantity of a size label.
    ///
    /// When several lines share the label, the first in-stock one takes the
    /// quantity and the others are cleared. Returns `false` for an unknown label.
    pub(crate) fn set_size_requested(&mut self, size: &str, quantity: u32) -> bool {
        let target = self
            .sizes
            .iter()
            .position(|line| line.size == size && line.is_available())
            .or_else(|| self.sizes.iter().position(|line| line.size == size));

        let Some(target) = target else {
            return false;
        };

        for (idx, line) in self.sizes.iter_mut().enumerate() {
            if line.size == size {
                line.set_requested(if idx == target { quantity } else { 0 });
            }
        }

        true
    }

    pub(crate) fn set_run_quantity(&mut self, quantity: u32) {
        self.run_quantity_hint = quantity;

        for line in &mut self.sizes {
            line.set_requested(quantity);
        }
    }

    pub(crate) fn clear_quantities(&mut self) {
        self.set_run_quantity(0);
    }

    fn push_size(&mut self, line: SizeLine, policy: DuplicateSizePolicy) {
        let key = &self.key;

        let existing = match policy {
            DuplicateSizePolicy::Append => None,
            DuplicateSizePolicy::LastWriteWins | DuplicateSizePolicy::Accumulate => {
                self.sizes.iter_mut().find(|current| current.size == line.size)
            }
        };

        let Some(existing) = existing else {
            self.sizes.push(line);
            return;
        };

        tracing::debug!(variant = %key, size = %line.size, ?policy, "merging duplicate size row");

        if policy == DuplicateSizePolicy::Accumulate {
            existing.stock_quantity = existing.stock_quantity.saturating_add(line.stock_quantity);
        } else {
            existing.age_label = line.age_label;
            existing.stock_quantity = line.stock_quantity;
        }

        if !existing.is_available() {
            existing.requested_quantity = 0;
        }
    }
}

/// Fold inventory rows into variants keyed by series and color.
///
/// Variants come out in the order their key was first seen and sizes in the
/// order their rows were encountered. The first row of a key provides the
/// shared fields (garment, lot, barcode, photo and prices).
pub fn group<'a>(
    rows: &[InventoryRow],
    currency: &'a Currency,
    policy: DuplicateSizePolicy,
) -> Vec<Variant<'a>> {
    let mut index: FxHashMap<VariantKey, usize> = FxHashMap::default();
    let mut variants: Vec<Variant<'a>> = Vec::new();

    for row in rows {
        let next = variants.len();
        let idx = *index
            .entry(VariantKey::new(row.series.as_str(), row.color.as_str()))
            .or_insert(next);

        if idx == next {
            variants.push(Variant::from_row(row, currency));
        }

        if let Some(variant) = variants.get_mut(idx) {
            variant.push_size(
                SizeLine::new(row.size.as_str(), row.age_label.as_str(), row.stock_quantity),
                policy,
            );
        }
    }

    variants
}

/// Convert a major-unit decimal amount into money in the given currency.
///
/// Amounts are rounded to the currency's minor unit; anything that does not
/// fit falls back to zero.
pub fn to_money(amount: Decimal, currency: &Currency) -> Money<'_, Currency> {
    let scale = Decimal::from(10_i64.pow(currency.exponent));

    let minor_units = amount
        .checked_mul(scale)
        .and_then(|value| value.round_dp(0).to_i64())
        .unwrap_or(0);

    Money::from_minor(minor_units, currency)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::MXN;
    use testresult::TestResult;

    use super::*;

    fn row(series: &str, color: &str, size: &str, stock: u32) -> InventoryRow {
        InventoryRow {
            series: series.to_string(),
            color: color.to_string(),
            size: size.to_string(),
            stock_quantity: stock,
            garment_name: format!("{series} garment"),
            retail_price: Decimal::from(100),
            wholesale_price: Decimal::from(90),
            run_price: Decimal::from(80),
            ..InventoryRow::default()
        }
    }

    #[test]
    fn group_partitions_by_series_and_color() {
        let rows = [
            row("V1", "Rojo", "2", 5),
            row("V2", "Azul", "2", 1),
            row("V1", "Rojo", "4", 5),
            row("V1", "Azul", "2", 0),
        ];

        let variants = group(&rows, MXN, DuplicateSizePolicy::Append);

        let keys: Vec<String> = variants.iter().map(|v| v.key().to_string()).collect();
        assert_eq!(keys, vec!["V1/Rojo", "V2/Azul", "V1/Azul"]);

        let total_sizes: usize = variants.iter().map(|v| v.sizes().len()).sum();
        assert_eq!(total_sizes, rows.len());
    }

    #[test]
    fn group_keeps_first_row_shared_fields() -> TestResult {
        let mut later = row("V1", "Rojo", "4", 5);
        later.garment_name = "Renamed".to_string();
        later.run_price = Decimal::from(1);

        let variants = group(&[row("V1", "Rojo", "2", 5), later], MXN, DuplicateSizePolicy::Append);
        let variant = variants.first().ok_or("missing variant")?;

        assert_eq!(variant.garment_name(), "V1 garment");
        assert_eq!(variant.price(PriceTier::Run), Money::from_minor(8000, MXN));

        Ok(())
    }

    #[test]
    fn group_keeps_sizes_in_encounter_order() -> TestResult {
        let rows = [row("V1", "Rojo", "10", 1), row("V1", "Rojo", "2", 1)];

        let variants = group(&rows, MXN, DuplicateSizePolicy::Append);
        let variant = variants.first().ok_or("missing variant")?;

        let encountered: Vec<&str> = variant.sizes().iter().map(SizeLine::size).collect();
        let natural: Vec<&str> = variant
            .sizes_in_natural_order()
            .into_iter()
            .map(SizeLine::size)
            .collect();

        assert_eq!(encountered, vec!["10", "2"]);
        assert_eq!(natural, vec!["2", "10"]);

        Ok(())
    }

    #[test]
    fn last_write_wins_replaces_duplicate_size() -> TestResult {
        let rows = [row("V1", "Rojo", "2", 5), row("V1", "Rojo", "2", 0)];

        let variants = group(&rows, MXN, DuplicateSizePolicy::LastWriteWins);
        let variant = variants.first().ok_or("missing variant")?;

        assert_eq!(variant.sizes().len(), 1);
        assert_eq!(variant.size("2").map(SizeLine::stock_quantity), Some(0));

        Ok(())
    }

    #[test]
    fn accumulate_adds_duplicate_stock() -> TestResult {
        let rows = [row("V1", "Rojo", "2", 5), row("V1", "Rojo", "2", 3)];

        let variants = group(&rows, MXN, DuplicateSizePolicy::Accumulate);
        let variant = variants.first().ok_or("missing variant")?;

        assert_eq!(variant.sizes().len(), 1);
        assert_eq!(variant.size("2").map(SizeLine::stock_quantity), Some(8));

        Ok(())
    }

    #[test]
    fn append_keeps_duplicate_sizes() {
        let rows = [row("V1", "Rojo", "2", 5), row("V1", "Rojo", "2", 3)];

        let variants = group(&rows, MXN, DuplicateSizePolicy::Append);

        assert_eq!(variants.iter().map(|v| v.sizes().len()).sum::<usize>(), 2);
    }

    #[test]
    fn set_size_requested_lands_on_first_in_stock_duplicate() -> TestResult {
        let rows = [
            row("V1", "Rojo", "2", 0),
            row("V1", "Rojo", "2", 3),
            row("V1", "Rojo", "2", 4),
        ];

        let mut variants = group(&rows, MXN, DuplicateSizePolicy::Append);
        let variant = variants.first_mut().ok_or("missing variant")?;

        assert!(variant.set_size_requested("2", 5));
        assert!(variant.is_size_ordered("2"));
        assert_eq!(variant.requested_pieces(), 5);

        let requested: Vec<u32> = variant.sizes().iter().map(SizeLine::requested_quantity).collect();
        assert_eq!(requested, vec![0, 5, 0]);

        assert!(!variant.set_size_requested("4", 1));

        Ok(())
    }

    #[test]
    fn default_policy_merges_duplicates() {
        assert_eq!(DuplicateSizePolicy::default(), DuplicateSizePolicy::LastWriteWins);
    }

    #[test]
    fn sizes_start_unrequested() {
        let variants = group(&[row("V1", "Rojo", "2", 5)], MXN, DuplicateSizePolicy::Append);

        assert!(variants.iter().all(|v| !v.has_order() && v.run_quantity_hint() == 0));
    }

    #[test]
    fn set_requested_clamps_out_of_stock() {
        let mut line = SizeLine::new("2", "", 0);

        line.set_requested(4);

        assert_eq!(line.requested_quantity(), 0);
    }

    #[test]
    fn to_money_rounds_to_minor_units() {
        assert_eq!(to_money(Decimal::new(89_507, 3), MXN), Money::from_minor(8951, MXN));
        assert_eq!(to_money(Decimal::from(250), MXN), Money::from_minor(25_000, MXN));
    }
}
