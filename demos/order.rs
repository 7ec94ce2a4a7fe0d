//! Order Example
//!
//! This example loads a catalog, applies quantity edits and prints the priced order.
//!
//! Use `-c` to pick a catalog file (JSON or YAML)
//! Use `--config` to load an order configuration (YAML)
//! Use `-r SERIES/COLOR=N` to order a full run, `-q SERIES/COLOR/SIZE=N` for a single size
//! Use `--customer` to submit the order and print the seller message
//! Use `--export` to post the order to the configured endpoint

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use corrida::{
    catalog::Catalog,
    checkout::{MISSING_EXPORT_URL, OrderSession},
    cli::OrderArgs,
    config::OrderConfig,
    export::HttpOrderExporter,
    notify::{NotificationComposer, NotificationInput, PlainTextComposer},
};

/// Order Example
#[expect(clippy::print_stdout, reason = "Example code")]
#[tokio::main]
pub async fn main() -> Result<()> {
    let args = OrderArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    let config = match args.config.as_deref() {
        Some(path) => OrderConfig::load(path)?,
        None => OrderConfig::default(),
    };

    let catalog = Catalog::load(&args.catalog)?;

    let mut session = OrderSession::from_config(catalog.rows(), &config)?;
    args.apply_edits(&mut session);

    let order = session.preview();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    order.write_to(&mut handle)?;

    let Some(customer) = args.customer() else {
        return Ok(());
    };

    session.set_customer(customer);

    let message = match config.export.clone() {
        Some(export) if args.export => {
            let exporter = HttpOrderExporter::new(export)?;

            session.submit(&exporter, &PlainTextComposer).await?.message
        }
        _ => {
            if args.export {
                tracing::warn!("no export endpoint configured, skipping export");
            }

            session.validate()?;

            PlainTextComposer.compose(&NotificationInput {
                customer: session.customer(),
                order: &order,
                export_url: MISSING_EXPORT_URL,
            })
        }
    };

    println!("\n{message}");

    Ok(())
}
