//! Pricing
//!
//! Every ordered variant is charged a single unit price. Ordering at least one
//! unit of every size in the run earns the run price; anything short of that
//! falls back to the non-run tier, which is wholesale unless a retail
//! threshold is configured.

use std::fmt;

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

use crate::variants::Variant;

/// Price tier applied to an ordered variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceTier {
    /// Retail (`menudeo`), only used below a configured piece threshold.
    Retail,

    /// Wholesale (`mayoreo`), the price for size-incomplete orders.
    Wholesale,

    /// Full run (`corrida`), the price for size-complete orders.
    Run,
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PriceTier::Retail => "Retail",
            PriceTier::Wholesale => "Wholesale",
            PriceTier::Run => "Run",
        })
    }
}

/// Which sizes must be ordered for a variant to count as a full run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunScope {
    /// Only sizes with stock; out-of-stock sizes never block a run.
    #[default]
    AvailableSizes,

    /// Every size listed in the catalog, in stock or not.
    ListedSizes,
}

/// Pricing policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PricingPolicy {
    /// Sizes that make up a full run.
    pub run_scope: RunScope,

    /// When set, non-run variants pay retail until the cart holds more than
    /// this many pieces, then wholesale.
    pub retail_until_pieces: Option<u64>,
}

/// Cart-wide figures some policies depend on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PricingContext {
    /// Units requested across every variant in the cart.
    pub cart_pieces: u64,
}

/// The tier and unit price resolved for an ordered variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceResolution<'a> {
    /// Tier applied to every ordered size of the variant.
    pub tier: PriceTier,

    /// Unit price for that tier.
    pub unit_price: Money<'a, Currency>,
}

impl PricingPolicy {
    /// Whether the variant's ordered sizes cover its whole run.
    ///
    /// Completeness is judged per size label, so repeated lines for one label
    /// are covered once any of them is ordered.
    pub fn is_full_run(&self, variant: &Variant<'_>) -> bool {
        variant
            .sizes()
            .iter()
            .filter(|line| match self.run_scope {
                RunScope::AvailableSizes => line.is_available(),
                RunScope::ListedSizes => true,
            })
            .all(|line| variant.is_size_ordered(line.size()))
    }

    /// Tier for a variant that has been ordered.
    pub fn tier_for(&self, variant: &Variant<'_>, context: PricingContext) -> PriceTier {
        if self.is_full_run(variant) {
            return PriceTier::Run;
        }

        match self.retail_until_pieces {
            Some(threshold) if context.cart_pieces <= threshold => PriceTier::Retail,
            _ => PriceTier::Wholesale,
        }
    }

    /// Resolve the unit price of a variant.
    ///
    /// Returns `None` when nothing of the variant has been requested.
    pub fn resolve<'a>(
        &self,
        variant: &Variant<'a>,
        context: PricingContext,
    ) -> Option<PriceResolution<'a>> {
        if !variant.has_order() {
            return None;
        }

        let tier = self.tier_for(variant, context);

        Some(PriceResolution {
            tier,
            unit_price: variant.price(tier),
        })
    }
}

/// Resolve a variant's unit price under the default policy.
pub fn resolve_unit_price<'a>(variant: &Variant<'a>) -> Option<PriceResolution<'a>> {
    PricingPolicy::default().resolve(variant, PricingContext::default())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso::MXN;
    use testresult::TestResult;

    use crate::{
        catalog::InventoryRow,
        ledger::QuantityLedger,
        variants::{DuplicateSizePolicy, VariantKey},
    };

    use super::*;

    fn ledger(stock: &[(&str, u32)]) -> QuantityLedger<'static> {
        let rows: Vec<InventoryRow> = stock
            .iter()
            .map(|(size, stock)| InventoryRow {
                series: "V1".to_string(),
                color: "Rojo".to_string(),
                size: (*size).to_string(),
                stock_quantity: *stock,
                retail_price: Decimal::from(100),
                wholesale_price: Decimal::from(90),
                run_price: Decimal::from(80),
                ..InventoryRow::default()
            })
            .collect();

        QuantityLedger::from_rows(&rows, MXN, DuplicateSizePolicy::Append)
    }

    fn key() -> VariantKey {
        VariantKey::new("V1", "Rojo")
    }

    #[test]
    fn unordered_variant_resolves_to_none() -> TestResult {
        let ledger = ledger(&[("S", 5), ("M", 5)]);
        let variant = ledger.variant(&key()).ok_or("missing variant")?;

        assert_eq!(resolve_unit_price(variant), None);

        Ok(())
    }

    #[test]
    fn full_run_gets_run_price_regardless_of_quantity() -> TestResult {
        let mut ledger = ledger(&[("S", 5), ("M", 5), ("L", 5)]);
        ledger.set_size_quantity(&key(), "S", 1);
        ledger.set_size_quantity(&key(), "M", 7);
        ledger.set_size_quantity(&key(), "L", 30);

        let variant = ledger.variant(&key()).ok_or("missing variant")?;
        let resolution = resolve_unit_price(variant).ok_or("expected a price")?;

        assert_eq!(resolution.tier, PriceTier::Run);
        assert_eq!(resolution.unit_price, Money::from_minor(8000, MXN));

        Ok(())
    }

    #[test]
    fn partial_run_gets_wholesale_price() -> TestResult {
        let mut ledger = ledger(&[("S", 5), ("M", 5), ("L", 5)]);
        ledger.set_size_quantity(&key(), "S", 1);
        ledger.set_size_quantity(&key(), "M", 1);

        let variant = ledger.variant(&key()).ok_or("missing variant")?;
        let resolution = resolve_unit_price(variant).ok_or("expected a price")?;

        assert_eq!(resolution.tier, PriceTier::Wholesale);
        assert_eq!(resolution.unit_price, Money::from_minor(9000, MXN));

        Ok(())
    }

    #[test]
    fn out_of_stock_sizes_do_not_block_a_run() -> TestResult {
        let mut ledger = ledger(&[("S", 5), ("M", 5), ("L", 0)]);
        ledger.set_size_quantity(&key(), "S", 2);
        ledger.set_size_quantity(&key(), "M", 2);

        let variant = ledger.variant(&key()).ok_or("missing variant")?;

        assert_eq!(
            resolve_unit_price(variant).map(|r| r.tier),
            Some(PriceTier::Run)
        );

        Ok(())
    }

    #[test]
    fn single_available_size_is_a_run() -> TestResult {
        let mut ledger = ledger(&[("S", 0), ("M", 3)]);
        ledger.set_size_quantity(&key(), "M", 1);

        let variant = ledger.variant(&key()).ok_or("missing variant")?;

        assert_eq!(
            resolve_unit_price(variant).map(|r| r.tier),
            Some(PriceTier::Run)
        );

        Ok(())
    }

    #[test]
    fn listed_sizes_scope_requires_every_catalog_size() -> TestResult {
        let mut ledger = ledger(&[("S", 5), ("M", 5), ("L", 0)]);
        ledger.set_run_quantity(&key(), 2);

        let policy = PricingPolicy {
            run_scope: RunScope::ListedSizes,
            ..PricingPolicy::default()
        };

        let variant = ledger.variant(&key()).ok_or("missing variant")?;

        assert!(!policy.is_full_run(variant));
        assert_eq!(
            policy.tier_for(variant, PricingContext::default()),
            PriceTier::Wholesale
        );

        Ok(())
    }

    #[test]
    fn retail_threshold_applies_until_exceeded() -> TestResult {
        let mut ledger = ledger(&[("S", 5), ("M", 5)]);
        ledger.set_size_quantity(&key(), "S", 3);

        let policy = PricingPolicy {
            retail_until_pieces: Some(12),
            ..PricingPolicy::default()
        };

        let variant = ledger.variant(&key()).ok_or("missing variant")?;

        let small = policy.resolve(variant, PricingContext { cart_pieces: 12 });
        let large = policy.resolve(variant, PricingContext { cart_pieces: 13 });

        assert_eq!(small.map(|r| r.tier), Some(PriceTier::Retail));
        assert_eq!(small.map(|r| r.unit_price), Some(Money::from_minor(10_000, MXN)));
        assert_eq!(large.map(|r| r.tier), Some(PriceTier::Wholesale));

        Ok(())
    }

    #[test]
    fn retail_threshold_never_overrides_a_run() -> TestResult {
        let mut ledger = ledger(&[("S", 5)]);
        ledger.set_size_quantity(&key(), "S", 1);

        let policy = PricingPolicy {
            retail_until_pieces: Some(12),
            ..PricingPolicy::default()
        };

        let variant = ledger.variant(&key()).ok_or("missing variant")?;

        assert_eq!(
            policy.tier_for(variant, PricingContext { cart_pieces: 1 }),
            PriceTier::Run
        );

        Ok(())
    }
}
