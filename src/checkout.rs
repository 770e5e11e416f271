//! Checkout
//!
//! The linear pricing engine: items are scanned one at a time, quantities
//! accumulate per label, and the total sums each label's configured
//! strategy applied to its accumulated quantity. Labels price independently
//! here; for cross-item bundle pricing see the search engine.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{basket::ItemLabel, strategies::PricingStrategy};

/// Errors raised while totalling a checkout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// A label was scanned that has no configured strategy.
    #[error("no pricing strategy configured for item {0}")]
    UnknownItem(ItemLabel),
}

/// One totalled label on a checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLine {
    /// The item label.
    pub label: ItemLabel,

    /// Accumulated quantity scanned for the label.
    pub quantity: Decimal,

    /// The label's strategy applied to the accumulated quantity.
    pub price: Decimal,
}

/// Scan/accumulate bookkeeping over per-label pricing strategies.
#[derive(Debug, Default)]
pub struct Checkout {
    strategies: FxHashMap<ItemLabel, PricingStrategy>,
    scanned: FxHashMap<ItemLabel, Decimal>,
}

impl Checkout {
    /// Create a checkout over the given per-label strategies.
    #[must_use]
    pub fn new(strategies: FxHashMap<ItemLabel, PricingStrategy>) -> Self {
        Self {
            strategies,
            scanned: FxHashMap::default(),
        }
    }

    /// Scan a single unit of `label`.
    pub fn scan(&mut self, label: ItemLabel) {
        self.scan_quantity(label, Decimal::ONE);
    }

    /// Scan `quantity` units of `label`.
    ///
    /// Fractional quantities are how weighed goods are scanned.
    pub fn scan_quantity(&mut self, label: ItemLabel, quantity: Decimal) {
        *self.scanned.entry(label).or_insert(Decimal::ZERO) += quantity;
    }

    /// Accumulated quantity for a label.
    #[must_use]
    pub fn quantity(&self, label: ItemLabel) -> Decimal {
        self.scanned.get(&label).copied().unwrap_or(Decimal::ZERO)
    }

    /// Price every scanned label through its strategy, sorted by label.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::UnknownItem`] if a scanned label has no
    /// configured strategy.
    pub fn lines(&self) -> Result<SmallVec<[CheckoutLine; 8]>, CheckoutError> {
        let mut lines: SmallVec<[CheckoutLine; 8]> = SmallVec::new();

        for (&label, &quantity) in &self.scanned {
            let strategy = self
                .strategies
                .get(&label)
                .ok_or(CheckoutError::UnknownItem(label))?;

            lines.push(CheckoutLine {
                label,
                quantity,
                price: strategy.price_for(quantity),
            });
        }

        lines.sort_unstable_by_key(|line| line.label);
        Ok(lines)
    }

    /// Total price of everything scanned so far.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::UnknownItem`] if a scanned label has no
    /// configured strategy.
    pub fn total(&self) -> Result<Decimal, CheckoutError> {
        Ok(self.lines()?.iter().map(|line| line.price).sum())
    }
}
