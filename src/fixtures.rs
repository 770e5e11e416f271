//! Fixtures
//!
//! Named fixture sets load a rule book and a strategy catalogue from YAML
//! files, for the demo binaries and integration tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    basket::ItemLabel,
    checkout::Checkout,
    rules::{BundleRule, RuleBook, RuleError},
    strategies::{PricingStrategy, StrategyError},
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid bundle rule
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// Invalid strategy configuration
    #[error(transparent)]
    Strategy(#[from] StrategyError),

    /// A label appeared twice in the strategy catalogue
    #[error("label {0} is configured twice")]
    DuplicateLabel(ItemLabel),
}

/// Raw bundle rule as written in fixture files.
#[derive(Debug, Deserialize)]
struct RuleConfig {
    id: String,
    price: Decimal,
}

/// Raw strategy configuration as written in fixture files.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
enum StrategyConfig {
    Regular {
        unit: Decimal,
    },
    Discount {
        unit: Decimal,
        percent: u32,
    },
    ThresholdDiscount {
        unit: Decimal,
        threshold: u32,
        percent: u32,
    },
    BuyNGetMFree {
        unit: Decimal,
        buy: u32,
        free: u32,
    },
    GroupPrice {
        unit: Decimal,
        group: u32,
        group_price: Decimal,
    },
    ByWeight {
        unit: Decimal,
        denominator: Decimal,
    },
}

impl StrategyConfig {
    /// Build the validated strategy this configuration describes.
    fn build(self) -> Result<PricingStrategy, StrategyError> {
        match self {
            Self::Regular { unit } => PricingStrategy::regular(unit),
            Self::Discount { unit, percent } => PricingStrategy::discount(unit, percent),
            Self::ThresholdDiscount {
                unit,
                threshold,
                percent,
            } => PricingStrategy::threshold_discount(unit, threshold, percent),
            Self::BuyNGetMFree { unit, buy, free } => {
                PricingStrategy::buy_n_get_m_free(unit, buy, free)
            }
            Self::GroupPrice {
                unit,
                group,
                group_price,
            } => PricingStrategy::group_price(unit, group, group_price),
            Self::ByWeight { unit, denominator } => PricingStrategy::by_weight(unit, denominator),
        }
    }
}

/// One catalogue entry: a label and its strategy configuration.
#[derive(Debug, Deserialize)]
struct CatalogueEntry {
    label: ItemLabel,

    #[serde(flatten)]
    strategy: StrategyConfig,
}

/// On-disk shape of a fixture file.
#[derive(Debug, Deserialize)]
struct FixtureFile {
    #[serde(default)]
    rules: Vec<RuleConfig>,

    #[serde(default)]
    catalogue: Vec<CatalogueEntry>,
}

/// A named fixture set: bundle rules plus a per-label strategy catalogue.
#[derive(Debug)]
pub struct Fixture {
    rules: RuleBook,
    strategies: FxHashMap<ItemLabel, PricingStrategy>,
}

impl Fixture {
    /// Load a named set from the `fixtures/` directory.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the file cannot be read, parsed, or
    /// validated.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_path(PathBuf::from("fixtures").join(format!("{name}.yaml")))
    }

    /// Load fixture data from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the file cannot be read, parsed, or
    /// validated.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let raw: FixtureFile = serde_norway::from_str(&fs::read_to_string(path)?)?;

        let mut rules = RuleBook::new();
        for rule in raw.rules {
            rules.insert(BundleRule::new(rule.id, rule.price)?)?;
        }

        let mut strategies = FxHashMap::default();
        for entry in raw.catalogue {
            if strategies.contains_key(&entry.label) {
                return Err(FixtureError::DuplicateLabel(entry.label));
            }

            strategies.insert(entry.label, entry.strategy.build()?);
        }

        Ok(Self { rules, strategies })
    }

    /// The bundle rule book.
    #[must_use]
    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    /// A fresh checkout over the strategy catalogue.
    #[must_use]
    pub fn checkout(&self) -> Checkout {
        Checkout::new(self.strategies.clone())
    }
}
