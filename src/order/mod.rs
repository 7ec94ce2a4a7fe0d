//! Orders
//!
//! Reduces the variants of a ledger into priced line items and totals.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    pricing::{PriceTier, PricingContext, PricingPolicy},
    variants::Variant,
};

mod summary;

/// Default shipping fee in major units.
pub const DEFAULT_SHIPPING_FEE: i64 = 250;

/// Errors that can occur when rendering an order.
#[derive(Debug, Error)]
pub enum OrderError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// One ordered size of a variant, at its resolved unit price.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine<'a> {
    /// Lot code
    pub lot_code: String,

    /// Series
    pub series: String,

    /// Barcode
    pub barcode: String,

    /// Color
    pub color: String,

    /// Size label
    pub size: String,

    /// Units ordered
    pub quantity: u32,

    /// Photo reference
    pub photo_ref: String,

    /// Unit price charged
    pub unit_price: Money<'a, Currency>,

    /// Tier the unit price came from
    pub tier: PriceTier,
}

impl<'a> OrderLine<'a> {
    /// Quantity multiplied by unit price.
    pub fn amount(&self) -> Money<'a, Currency> {
        Money::from_minor(
            line_amount_minor(self.unit_price.to_minor_units(), self.quantity),
            self.unit_price.currency(),
        )
    }
}

/// Aggregate figures for an order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderTotals<'a> {
    /// Sum of every line amount
    pub subtotal: Money<'a, Currency>,

    /// Flat shipping fee, charged even for an empty cart
    pub shipping_fee: Money<'a, Currency>,

    /// Subtotal plus shipping
    pub grand_total: Money<'a, Currency>,

    /// Units across every line
    pub total_pieces: u64,
}

/// Per-variant piece count, used for the order message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSummary {
    /// Series
    pub series: String,

    /// Garment name
    pub garment_name: String,

    /// Color
    pub color: String,

    /// Units ordered across the variant's sizes
    pub pieces: u64,

    /// Tier applied to the variant
    pub tier: PriceTier,
}

/// Final, immutable order computed from a ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Order<'a> {
    lines: Vec<OrderLine<'a>>,
    summaries: Vec<VariantSummary>,
    totals: OrderTotals<'a>,
}

impl<'a> Order<'a> {
    /// Line items, grouped by variant in ledger order.
    pub fn lines(&self) -> &[OrderLine<'a>] {
        &self.lines
    }

    /// Totals for the order
    pub fn totals(&self) -> &OrderTotals<'a> {
        &self.totals
    }

    /// One summary per ordered variant, in ledger order.
    pub fn variant_summaries(&self) -> &[VariantSummary] {
        &self.summaries
    }

    /// Check if nothing was ordered.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Currency used for all monetary values.
    pub fn currency(&self) -> &'a Currency {
        self.totals.shipping_fee.currency()
    }

    /// Split the order into its line items and totals.
    pub fn into_parts(self) -> (Vec<OrderLine<'a>>, OrderTotals<'a>) {
        (self.lines, self.totals)
    }
}

/// Reduce variants into line items and totals.
///
/// Each ordered variant has its unit price resolved once; every size with a
/// requested quantity becomes one line at that price. The shipping fee is
/// always added, so an empty cart totals the shipping fee alone.
pub fn reduce<'a>(
    variants: &[Variant<'a>],
    policy: &PricingPolicy,
    shipping_fee: Money<'a, Currency>,
) -> Order<'a> {
    let context = PricingContext {
        cart_pieces: variants.iter().map(Variant::requested_pieces).sum(),
    };

    let mut lines = Vec::new();
    let mut summaries = Vec::new();
    let mut subtotal_minor: i64 = 0;
    let mut total_pieces: u64 = 0;

    for variant in variants {
        let Some(resolution) = policy.resolve(variant, context) else {
            continue;
        };

        let unit_minor = resolution.unit_price.to_minor_units();
        let mut variant_pieces: u64 = 0;

        for size in variant.sizes().iter().filter(|line| line.is_ordered()) {
            let quantity = size.requested_quantity();

            subtotal_minor = subtotal_minor.saturating_add(line_amount_minor(unit_minor, quantity));
            variant_pieces += u64::from(quantity);

            lines.push(OrderLine {
                lot_code: variant.lot_code().to_string(),
                series: variant.series().to_string(),
                barcode: variant.barcode().to_string(),
                color: variant.color().to_string(),
                size: size.size().to_string(),
                quantity,
                photo_ref: variant.photo_ref().to_string(),
                unit_price: resolution.unit_price,
                tier: resolution.tier,
            });
        }

        total_pieces += variant_pieces;

        summaries.push(VariantSummary {
            series: variant.series().to_string(),
            garment_name: variant.garment_name().to_string(),
            color: variant.color().to_string(),
            pieces: variant_pieces,
            tier: resolution.tier,
        });
    }

    let currency = shipping_fee.currency();
    let grand_total_minor = subtotal_minor.saturating_add(shipping_fee.to_minor_units());

    Order {
        lines,
        summaries,
        totals: OrderTotals {
            subtotal: Money::from_minor(subtotal_minor, currency),
            shipping_fee,
            grand_total: Money::from_minor(grand_total_minor, currency),
            total_pieces,
        },
    }
}

fn line_amount_minor(unit_minor: i64, quantity: u32) -> i64 {
    unit_minor.saturating_mul(i64::from(quantity))
}
