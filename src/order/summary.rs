//! Order summary table

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};

use super::{Order, OrderError};

impl Order<'_> {
    /// Writes the order as a table followed by its totals.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::IO`] if the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), OrderError> {
        let mut builder = Builder::default();

        builder.push_record([
            "", "Series", "Color", "Size", "Qty", "Tier", "Unit Price", "Amount",
        ]);

        for (idx, line) in self.lines.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.series.clone(),
                line.color.clone(),
                line.size.clone(),
                line.quantity.to_string(),
                line.tier.to_string(),
                format!("{}", line.unit_price),
                format!("{}", line.amount()),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(
            1,
            HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
        );

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(4..5), Alignment::right());
        table.modify(Columns::new(6..8), Alignment::right());

        writeln!(out, "\n{table}").map_err(|_err| OrderError::IO)?;

        write_totals(&mut out, self)
    }
}

fn write_totals(out: &mut impl io::Write, order: &Order<'_>) -> Result<(), OrderError> {
    let totals = order.totals();

    let rows = [
        (" Pieces:", totals.total_pieces.to_string()),
        (" Subtotal:", totals.subtotal.to_string()),
        (" Shipping:", totals.shipping_fee.to_string()),
        (" Total:", totals.grand_total.to_string()),
    ];

    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

    for (label, value) in rows {
        writeln!(out, "{label:<label_width$} {value:>value_width$}")
            .map_err(|_err| OrderError::IO)?;
    }

    Ok(())
}
