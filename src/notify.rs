//! Order notification
//!
//! Composes the message forwarded to the seller once an order has been
//! exported. Delivering it (messaging deep link, email) is up to the caller.

use std::fmt::Write;

use crate::order::Order;

/// Who is placing the order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerIdentity {
    /// Buyer name, required before submitting
    pub name: String,

    /// Contact phone
    pub phone: Option<String>,

    /// Free-text note for the seller
    pub comment: Option<String>,
}

impl CustomerIdentity {
    /// Create an identity with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Everything a composer can draw on.
#[derive(Debug, Clone, Copy)]
pub struct NotificationInput<'n, 'a> {
    /// Buyer identity
    pub customer: &'n CustomerIdentity,

    /// The exported order
    pub order: &'n Order<'a>,

    /// Link to the exported document
    pub export_url: &'n str,
}

/// Turns an exported order into a message for the seller.
pub trait NotificationComposer {
    /// Compose the message text.
    fn compose(&self, input: &NotificationInput<'_, '_>) -> String;
}

/// Plain-text Spanish message, one line per ordered variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextComposer;

impl NotificationComposer for PlainTextComposer {
    fn compose(&self, input: &NotificationInput<'_, '_>) -> String {
        let NotificationInput {
            customer,
            order,
            export_url,
        } = *input;
        let totals = order.totals();

        let mut msg = format!("Hola! Soy {}.\n", customer.name.trim());

        if let Some(phone) = non_blank(customer.phone.as_deref()) {
            _ = writeln!(msg, "Tel: {phone}");
        }

        msg.push_str("\nAquí está mi pedido:\n");

        for summary in order.variant_summaries() {
            _ = writeln!(
                msg,
                "{} - {} ({}): {} piezas",
                summary.series, summary.garment_name, summary.color, summary.pieces
            );
        }

        _ = write!(
            msg,
            "\nPiezas: {}\nSubtotal: {}\nEnvío: {}\nTotal: {}\n",
            totals.total_pieces, totals.subtotal, totals.shipping_fee, totals.grand_total
        );

        if let Some(comment) = non_blank(customer.comment.as_deref()) {
            _ = writeln!(msg, "Comentario: {comment}");
        }

        _ = write!(msg, "\nArchivo del pedido:\n{export_url}");

        msg
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::{Money, iso::MXN};

    use crate::{
        catalog::InventoryRow,
        ledger::QuantityLedger,
        order::reduce,
        pricing::PricingPolicy,
        variants::{DuplicateSizePolicy, VariantKey},
    };

    use super::*;

    fn order() -> Order<'static> {
        let rows = [
            InventoryRow {
                series: "V1".to_string(),
                garment_name: "Vestido".to_string(),
                color: "Rojo".to_string(),
                size: "2".to_string(),
                stock_quantity: 5,
                run_price: Decimal::from(80),
                ..InventoryRow::default()
            },
            InventoryRow {
                series: "V1".to_string(),
                color: "Rojo".to_string(),
                size: "4".to_string(),
                stock_quantity: 5,
                ..InventoryRow::default()
            },
        ];

        let mut ledger = QuantityLedger::from_rows(&rows, MXN, DuplicateSizePolicy::Append);
        ledger.set_run_quantity(&VariantKey::new("V1", "Rojo"), 2);

        reduce(
            ledger.variants(),
            &PricingPolicy::default(),
            Money::from_minor(25_000, MXN),
        )
    }

    #[test]
    fn compose_includes_customer_summary_and_link() {
        let order = order();
        let customer = CustomerIdentity::new("Ana López");

        let msg = PlainTextComposer.compose(&NotificationInput {
            customer: &customer,
            order: &order,
            export_url: "https://docs.example/pedido",
        });

        assert!(msg.starts_with("Hola! Soy Ana López.\n"));
        assert!(msg.contains("V1 - Vestido (Rojo): 4 piezas"));
        assert!(msg.contains("Piezas: 4"));
        assert!(msg.contains(&format!("Total: {}", order.totals().grand_total)));
        assert!(msg.ends_with("https://docs.example/pedido"));
        assert!(!msg.contains("Tel:"), "no phone was given");
        assert!(!msg.contains("Comentario:"), "no comment was given");
    }

    #[test]
    fn compose_adds_phone_and_comment_when_present() {
        let order = order();
        let customer = CustomerIdentity {
            name: "Ana".to_string(),
            phone: Some("3471234567".to_string()),
            comment: Some("Enviar por paquetería".to_string()),
        };

        let msg = PlainTextComposer.compose(&NotificationInput {
            customer: &customer,
            order: &order,
            export_url: "No generado",
        });

        assert!(msg.contains("Tel: 3471234567\n"));
        assert!(msg.contains("Comentario: Enviar por paquetería\n"));
    }

    #[test]
    fn compose_skips_blank_optional_fields() {
        let order = order();
        let customer = CustomerIdentity {
            name: "Ana".to_string(),
            phone: Some("  ".to_string()),
            comment: Some(String::new()),
        };

        let msg = PlainTextComposer.compose(&NotificationInput {
            customer: &customer,
            order: &order,
            export_url: "No generado",
        });

        assert!(!msg.contains("Tel:"));
        assert!(!msg.contains("Comentario:"));
    }
}
