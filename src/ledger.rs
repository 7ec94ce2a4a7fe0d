//! Quantity Ledger
//!
//! The ledger owns the variants of a session and is the only writer of their
//! requested quantities. Edits are tolerant: unknown keys or sizes are
//! ignored, negative quantities clamp to zero, and out-of-stock sizes stay at
//! zero whatever is asked for.

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;

use crate::{
    catalog::InventoryRow,
    variants::{DuplicateSizePolicy, Variant, VariantFacets, VariantFilter, VariantKey, group},
};

/// Per-variant, per-size requested quantities for one session.
#[derive(Debug, Clone, Default)]
pub struct QuantityLedger<'a> {
    variants: Vec<Variant<'a>>,
    index: FxHashMap<VariantKey, usize>,
}

impl<'a> QuantityLedger<'a> {
    /// Create a ledger holding the given variants.
    ///
    /// If two variants share a key, edits address the first one.
    pub fn new(variants: Vec<Variant<'a>>) -> Self {
        let mut index = FxHashMap::default();

        for (idx, variant) in variants.iter().enumerate() {
            index.entry(variant.key().clone()).or_insert(idx);
        }

        Self { variants, index }
    }

    /// Group inventory rows and hold the resulting variants.
    pub fn from_rows(
        rows: &[InventoryRow],
        currency: &'a Currency,
        policy: DuplicateSizePolicy,
    ) -> Self {
        Self::new(group(rows, currency, policy))
    }

    /// Set the requested quantity of one size of a variant.
    ///
    /// The quantity is clamped to zero from below. If the variant has several
    /// lines with the same size label, the first in-stock one takes the
    /// quantity and the rest are cleared.
    pub fn set_size_quantity(&mut self, key: &VariantKey, size: &str, quantity: i64) {
        let Some(variant) = self.variant_mut(key) else {
            tracing::debug!(variant = %key, size, "ignoring quantity edit for unknown variant");
            return;
        };

        let quantity = clamp_quantity(quantity);
        let in_stock = variant
            .sizes()
            .iter()
            .any(|line| line.size() == size && line.is_available());

        if !variant.set_size_requested(size, quantity) {
            tracing::debug!(variant = %key, size, "ignoring quantity edit for unknown size");
            return;
        }

        if quantity > 0 && !in_stock {
            tracing::debug!(variant = %key, size, quantity, "size out of stock; keeping zero");
        }
    }

    /// Request the same quantity of every in-stock size of a variant.
    ///
    /// Out-of-stock sizes are forced to zero. A quantity of zero (or less)
    /// clears the variant and resets its run hint.
    pub fn set_run_quantity(&mut self, key: &VariantKey, quantity: i64) {
        let Some(variant) = self.variant_mut(key) else {
            tracing::debug!(variant = %key, "ignoring run edit for unknown variant");
            return;
        };

        variant.set_run_quantity(clamp_quantity(quantity));
    }

    /// Reset every requested quantity and run hint to zero.
    pub fn clear_quantities(&mut self) {
        for variant in &mut self.variants {
            variant.clear_quantities();
        }
    }

    /// Variants in first-seen order.
    pub fn variants(&self) -> &[Variant<'a>] {
        &self.variants
    }

    /// Look up a variant by key.
    pub fn variant(&self, key: &VariantKey) -> Option<&Variant<'a>> {
        self.index
            .get(key)
            .and_then(|&idx| self.variants.get(idx))
    }

    /// Iterate over the variants in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &Variant<'a>> {
        self.variants.iter()
    }

    /// Variants passing a browsing filter, in first-seen order.
    pub fn filtered<'l>(
        &'l self,
        filter: &'l VariantFilter,
    ) -> impl Iterator<Item = &'l Variant<'a>> {
        self.variants
            .iter()
            .filter(move |variant| filter.matches(variant))
    }

    /// Filter options offered by the ledger's variants.
    pub fn facets(&self) -> VariantFacets {
        VariantFacets::from_variants(&self.variants)
    }

    /// Number of variants.
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Check if the ledger holds no variants.
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Units requested across every variant.
    pub fn total_pieces(&self) -> u64 {
        self.variants.iter().map(Variant::requested_pieces).sum()
    }

    fn variant_mut(&mut self, key: &VariantKey) -> Option<&mut Variant<'a>> {
        let idx = *self.index.get(key)?;

        self.variants.get_mut(idx)
    }
}

fn clamp_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(0)).unwrap_or(u32::MAX)
}
