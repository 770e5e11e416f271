//! Bundle rules
//!
//! A bundle rule names one or more item units sold together at a fixed
//! combined price, e.g. `"AAA"` for three units of item `A`.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::basket::ItemLabel;

/// Errors related to rule or rule book construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    /// A rule price was negative.
    #[error("rule {id} has a negative price: {price}")]
    NegativePrice {
        /// Offending rule identifier
        id: String,
        /// The negative price supplied
        price: Decimal,
    },

    /// A rule identifier was empty, so it could never consume an item.
    #[error("rule identifiers must name at least one item label")]
    EmptyIdentifier,

    /// The same identifier was supplied more than once.
    #[error("rule {0} was supplied more than once")]
    DuplicateIdentifier(String),
}

/// A bundle of item units sold at a fixed combined price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleRule {
    id: String,
    price: Decimal,
}

impl BundleRule {
    /// Create a new bundle rule.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleError`] if the identifier is empty or the price is
    /// negative.
    pub fn new(id: impl Into<String>, price: Decimal) -> Result<Self, RuleError> {
        let id = id.into();

        if id.is_empty() {
            return Err(RuleError::EmptyIdentifier);
        }

        if price < Decimal::ZERO {
            return Err(RuleError::NegativePrice { id, price });
        }

        Ok(Self { id, price })
    }

    /// The rule identifier, one character per consumed item unit.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The combined price of the bundle.
    #[must_use]
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Iterate over the item labels the rule consumes, repeats included.
    pub fn labels(&self) -> impl Iterator<Item = ItemLabel> + '_ {
        self.id.chars()
    }
}

/// An ordered mapping of rule identifiers to bundle prices.
///
/// Iteration order is insertion order. It drives the search exploration
/// order, which decides which of several equally-priced optima is reported,
/// never the price itself.
#[derive(Debug, Clone, Default)]
pub struct RuleBook {
    rules: Vec<BundleRule>,
}

impl RuleBook {
    /// Create an empty rule book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a rule book from `(identifier, price)` pairs.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleError`] if any pair fails rule validation or repeats
    /// an identifier.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        let mut book = Self::new();

        for (id, price) in pairs {
            book.insert(BundleRule::new(id, price)?)?;
        }

        Ok(book)
    }

    /// Append a rule to the book.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::DuplicateIdentifier`] if the book already holds
    /// a rule with the same identifier.
    pub fn insert(&mut self, rule: BundleRule) -> Result<(), RuleError> {
        if self.rules.iter().any(|existing| existing.id() == rule.id()) {
            return Err(RuleError::DuplicateIdentifier(rule.id().to_owned()));
        }

        self.rules.push(rule);
        Ok(())
    }

    /// Get a rule by its position in insertion order.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&BundleRule> {
        self.rules.get(index)
    }

    /// Find a rule by its identifier.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&BundleRule> {
        self.rules.iter().find(|rule| rule.id() == id)
    }

    /// Iterate over the rules in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &BundleRule> {
        self.rules.iter()
    }

    /// Number of rules in the book.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the book holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
