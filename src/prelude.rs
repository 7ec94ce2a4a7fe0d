//! Corrida prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{Catalog, CatalogError, InventoryRow},
    checkout::{CheckoutError, MISSING_EXPORT_URL, OrderSession, Submission, ValidationError},
    config::{ConfigError, OrderConfig},
    export::{
        ExportError, ExportLine, ExportRequest, ExportResponse, HttpExporterConfig,
        HttpOrderExporter, OrderExporter,
    },
    ledger::QuantityLedger,
    notify::{CustomerIdentity, NotificationComposer, NotificationInput, PlainTextComposer},
    order::{Order, OrderError, OrderLine, OrderTotals, VariantSummary, reduce},
    pricing::{PriceResolution, PriceTier, PricingContext, PricingPolicy, RunScope},
    variants::{
        DuplicateSizePolicy, SizeLine, Variant, VariantFacets, VariantFilter, VariantKey, group,
        natural_size_cmp,
    },
};
