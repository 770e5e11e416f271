//! Receipt

use std::io;

use rust_decimal::Decimal;
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{checkout::CheckoutLine, rules::RuleBook, search::SearchResult};

/// Errors that can occur when building or writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// A winning rule identifier was missing from the rule book.
    #[error("rule {0} is not in the rule book")]
    UnknownRule(String),

    /// IO error writing the rendered table.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// One printable line: item name, optional quantity, price.
#[derive(Debug, Clone)]
struct ReceiptRow {
    item: String,
    quantity: Option<Decimal>,
    price: Decimal,
}

/// A renderable summary of a pricing run.
#[derive(Debug, Clone)]
pub struct Receipt {
    rows: SmallVec<[ReceiptRow; 8]>,
    total: Decimal,
}

impl Receipt {
    /// Build a receipt from an optimal bundle search result.
    ///
    /// Each applied bundle becomes one row, priced from the rule book.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::UnknownRule`] if an applied identifier is
    /// not in the rule book.
    pub fn from_search(result: &SearchResult<'_>, rules: &RuleBook) -> Result<Self, ReceiptError> {
        let mut rows: SmallVec<[ReceiptRow; 8]> = SmallVec::new();

        for &id in &result.applications {
            let rule = rules
                .find(id)
                .ok_or_else(|| ReceiptError::UnknownRule(id.to_owned()))?;

            rows.push(ReceiptRow {
                item: id.to_owned(),
                quantity: None,
                price: rule.price(),
            });
        }

        Ok(Self {
            rows,
            total: result.total,
        })
    }

    /// Build a receipt from linear checkout lines.
    #[must_use]
    pub fn from_lines(lines: &[CheckoutLine]) -> Self {
        let rows = lines
            .iter()
            .map(|line| ReceiptRow {
                item: line.label.to_string(),
                quantity: Some(line.quantity),
                price: line.price,
            })
            .collect();

        Self {
            rows,
            total: lines.iter().map(|line| line.price).sum(),
        }
    }

    /// The receipt total.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Render the receipt as a table to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::Io`] if writing fails.
    pub fn write_to(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Qty", "Price"]);

        for row in &self.rows {
            builder.push_record([
                row.item.clone(),
                row.quantity.map_or_else(String::new, format_quantity),
                format_price(row.price),
            ]);
        }

        builder.push_record(["Total".to_owned(), String::new(), format_price(self.total)]);

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());
        let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(1, separator);
        theme.insert_horizontal_line(self.rows.len() + 1, separator);

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(1..3), Alignment::right());

        writeln!(out, "{table}")?;
        Ok(())
    }
}

/// Fixed two-decimal money rendering.
fn format_price(price: Decimal) -> String {
    format!("{:.2}", price.round_dp(2))
}

/// Quantities print without trailing zeros (`2.5`, not `2.50`).
fn format_quantity(quantity: Decimal) -> String {
    quantity.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::{basket::Basket, search::BundlePricer};

    use super::*;

    fn kata_rules() -> TestResult<RuleBook> {
        Ok(RuleBook::from_pairs([
            ("A", Decimal::ONE),
            ("AAA", Decimal::from(2)),
            ("AAAAA", Decimal::new(34, 1)),
        ])?)
    }

    #[test]
    fn from_search_prices_each_bundle_row() -> TestResult {
        let rules = kata_rules()?;
        let result = BundlePricer::new(&rules).best_price(&Basket::from("AAAAAA"))?;

        let receipt = Receipt::from_search(&result, &rules)?;

        assert_eq!(receipt.total(), Decimal::from(4));
        assert_eq!(receipt.rows.len(), 2);

        Ok(())
    }

    #[test]
    fn from_search_with_foreign_rule_errors() -> TestResult {
        let rules = kata_rules()?;
        let result = BundlePricer::new(&rules).best_price(&Basket::from("AAA"))?;

        let other_rules = RuleBook::from_pairs([("B", Decimal::ONE)])?;

        assert!(matches!(
            Receipt::from_search(&result, &other_rules),
            Err(ReceiptError::UnknownRule(id)) if id == "AAA"
        ));

        Ok(())
    }

    #[test]
    fn from_lines_totals_the_lines() {
        let lines = [
            CheckoutLine {
                label: 'A',
                quantity: Decimal::from(4),
                price: Decimal::from(4),
            },
            CheckoutLine {
                label: 'F',
                quantity: Decimal::new(25, 1),
                price: Decimal::from(25),
            },
        ];

        let receipt = Receipt::from_lines(&lines);

        assert_eq!(receipt.total(), Decimal::from(29));
    }

    #[test]
    fn rendered_table_lists_items_and_total() -> TestResult {
        let receipt = Receipt {
            rows: smallvec![ReceiptRow {
                item: "AAA".to_owned(),
                quantity: None,
                price: Decimal::from(2),
            }],
            total: Decimal::from(2),
        };

        let mut out = Vec::new();
        receipt.write_to(&mut out)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("AAA"), "missing bundle row: {rendered}");
        assert!(rendered.contains("2.00"), "missing price: {rendered}");
        assert!(rendered.contains("Total"), "missing total row: {rendered}");

        Ok(())
    }

    #[test]
    fn quantities_render_without_trailing_zeros() {
        assert_eq!(format_quantity(Decimal::new(25, 1)), "2.5");
        assert_eq!(format_quantity(Decimal::new(400, 2)), "4");
    }
}
