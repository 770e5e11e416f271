//! Search tree nodes
//!
//! The tree is an arena of parent-linked nodes: each node records the rule
//! applied to reach it and the items still unconsumed. Children reference
//! their parent, never the other way round, so the winning path is recovered
//! by walking parent keys back to the root.

use rust_decimal::Decimal;
use slotmap::new_key_type;

use crate::{basket::Basket, rules::BundleRule};

new_key_type! {
    /// Key identifying a node in the search tree arena.
    pub struct NodeKey;
}

/// A snapshot of the search after applying a sequence of rules.
#[derive(Debug, Clone)]
pub(crate) struct SearchNode {
    /// Arena key of the node this one was expanded from, `None` at the root.
    pub parent: Option<NodeKey>,

    /// Index into the rule book of the rule applied to reach this node,
    /// `None` at the root.
    pub rule: Option<usize>,

    /// Items not yet consumed by any applied rule. Meaningless when the node
    /// is invalid.
    pub remaining: Basket,

    /// Cumulative price of every rule applied from the root to this node.
    pub price: Decimal,

    /// Whether the rule could be fully applied against the parent's
    /// remaining items.
    pub valid: bool,
}

impl SearchNode {
    /// The root of a search: the full basket, nothing applied, price zero.
    pub fn root(basket: Basket) -> Self {
        Self {
            parent: None,
            rule: None,
            remaining: basket,
            price: Decimal::ZERO,
            valid: true,
        }
    }

    /// Apply `rule` against a parent's remaining items and running price.
    ///
    /// Every label in the identifier must match an available unit, repeats
    /// counted. The first missing label marks the child invalid; the child's
    /// remaining items are then unused, so partially-taken units are never
    /// observed.
    pub fn apply(
        parent: NodeKey,
        remaining: &Basket,
        price: Decimal,
        rule_index: usize,
        rule: &BundleRule,
    ) -> Self {
        let mut remaining = remaining.clone();
        let valid = rule.labels().all(|label| remaining.take(label));

        Self {
            parent: Some(parent),
            rule: Some(rule_index),
            remaining,
            price: price + rule.price(),
            valid,
        }
    }
}
