//! Tally prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    basket::{Basket, ItemLabel},
    checkout::{Checkout, CheckoutError, CheckoutLine},
    fixtures::{Fixture, FixtureError},
    receipt::{Receipt, ReceiptError},
    rules::{BundleRule, RuleBook, RuleError},
    search::{BundlePricer, MAX_BASKET_ITEMS, SearchError, SearchResult},
    strategies::{PricingStrategy, StrategyError},
};
