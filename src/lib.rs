//! Corrida
//!
//! Corrida turns a flat apparel inventory catalog into a priced wholesale order.
//! Rows are grouped into series/color variants, the buyer edits per-size or per-run
//! quantities, each variant is priced at retail, wholesale or full-run rates, and the
//! result is reduced into order lines and totals ready to be exported.

pub mod catalog;
pub mod checkout;
pub mod cli;
pub mod config;
pub mod export;
pub mod ledger;
pub mod notify;
pub mod order;
pub mod prelude;
pub mod pricing;
pub mod variants;
