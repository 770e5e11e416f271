//! Optimal bundle search
//!
//! Finds the cheapest partition of a basket into priced bundles by
//! exhaustively exploring every order of rule application. Greedy selection
//! is not optimal when rules overlap (two `"AAA"` bundles beat `"AAAAA"`
//! plus a single `"A"` for six items), so the engine trades efficiency for
//! correctness: the full tree is explored, pruned only by comparing each
//! completed total against the best found so far. Equivalent item states
//! reached via different rule orders are re-explored, never memoized.

use rust_decimal::Decimal;
use slotmap::SlotMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{basket::Basket, rules::RuleBook};

use self::tree::{NodeKey, SearchNode};

mod tree;

/// Largest basket `best_price` accepts.
///
/// Every applied rule consumes at least one item, so recursion depth is
/// bounded by the basket size; this ceiling keeps it comfortably inside the
/// default stack.
pub const MAX_BASKET_ITEMS: usize = 64;

/// Search Errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// The basket holds items but the rule book is empty.
    #[error("the rule book is empty but the basket still holds {item_count} items")]
    NoApplicableRules {
        /// Number of items no rule can consume
        item_count: usize,
    },

    /// No sequence of rule applications can consume every item.
    #[error("no combination of bundle rules can consume every item in the basket")]
    NoSolution,

    /// The basket exceeds [`MAX_BASKET_ITEMS`].
    #[error("basket holds {item_count} items, above the supported maximum of {max}")]
    BasketTooLarge {
        /// Number of items in the rejected basket
        item_count: usize,
        /// The ceiling that was exceeded
        max: usize,
    },

    /// The configured node budget ran out before the search finished.
    #[error("search expanded more than {budget} nodes")]
    BudgetExhausted {
        /// The configured budget
        budget: usize,
    },

    /// Internal search invariant was violated (this is a bug).
    #[error("search invariant violated: {message}")]
    InvariantViolation {
        /// What invariant was violated
        message: &'static str,
    },
}

/// The cheapest pricing found for a basket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult<'a> {
    /// Minimum achievable total price.
    pub total: Decimal,

    /// Identifiers of the applied rules, in application (root-to-leaf)
    /// order. Replaying them against the original basket consumes every
    /// item exactly.
    pub applications: SmallVec<[&'a str; 8]>,
}

/// Tracks the best terminal node seen during one `best_price` call.
///
/// Built fresh at every call, so consecutive searches on one pricer never
/// see each other's state.
#[derive(Debug, Default)]
struct BestSoFar {
    price: Option<Decimal>,
    node: Option<NodeKey>,
    expanded: usize,
}

impl BestSoFar {
    /// Record `node` if it undercuts the best price seen so far.
    ///
    /// The comparison is strictly `<`, so among equally-priced terminals the
    /// first one reached in traversal order is kept.
    fn offer(&mut self, node: NodeKey, price: Decimal) {
        if self.price.is_none_or(|best| price < best) {
            self.price = Some(price);
            self.node = Some(node);
        }
    }
}

/// Exhaustive minimum-price searcher over a rule book.
#[derive(Debug, Clone)]
pub struct BundlePricer<'a> {
    rules: &'a RuleBook,
    node_budget: Option<usize>,
}

impl<'a> BundlePricer<'a> {
    /// Create a pricer over the given rule book.
    #[must_use]
    pub fn new(rules: &'a RuleBook) -> Self {
        Self {
            rules,
            node_budget: None,
        }
    }

    /// Cap the number of nodes a single search may expand.
    ///
    /// The tree is exponential in basket and rule-book size; a budget turns
    /// a runaway search into [`SearchError::BudgetExhausted`] instead of an
    /// open-ended computation.
    #[must_use]
    pub fn with_node_budget(mut self, budget: usize) -> Self {
        self.node_budget = Some(budget);
        self
    }

    /// Find the minimum total price for `basket` and the rule sequence that
    /// achieves it.
    ///
    /// # Errors
    ///
    /// - [`SearchError::BasketTooLarge`]: the basket exceeds
    ///   [`MAX_BASKET_ITEMS`].
    /// - [`SearchError::NoApplicableRules`]: the basket holds items but the
    ///   rule book is empty.
    /// - [`SearchError::NoSolution`]: no rule sequence consumes every item.
    /// - [`SearchError::BudgetExhausted`]: the configured node budget ran
    ///   out.
    pub fn best_price(&self, basket: &Basket) -> Result<SearchResult<'a>, SearchError> {
        if basket.len() > MAX_BASKET_ITEMS {
            return Err(SearchError::BasketTooLarge {
                item_count: basket.len(),
                max: MAX_BASKET_ITEMS,
            });
        }

        if self.rules.is_empty() && !basket.is_empty() {
            return Err(SearchError::NoApplicableRules {
                item_count: basket.len(),
            });
        }

        let mut arena = SlotMap::with_key();
        let root = arena.insert(SearchNode::root(basket.clone()));

        let mut best = BestSoFar::default();
        self.expand(&mut arena, root, &mut best)?;

        let (Some(total), Some(leaf)) = (best.price, best.node) else {
            return Err(SearchError::NoSolution);
        };

        Ok(SearchResult {
            total,
            applications: applications(&arena, self.rules, leaf)?,
        })
    }

    /// Depth-first expansion of one node.
    ///
    /// Terminal nodes (nothing remaining) are offered to the best tracker
    /// and never expanded. Otherwise every rule is tried in rule-book order;
    /// invalid children are discarded without entering the arena.
    fn expand(
        &self,
        arena: &mut SlotMap<NodeKey, SearchNode>,
        key: NodeKey,
        best: &mut BestSoFar,
    ) -> Result<(), SearchError> {
        best.expanded += 1;

        if let Some(budget) = self.node_budget {
            if best.expanded > budget {
                return Err(SearchError::BudgetExhausted { budget });
            }
        }

        let (remaining, price) = {
            let node = arena.get(key).ok_or(SearchError::InvariantViolation {
                message: "expanded node missing from arena",
            })?;

            (node.remaining.clone(), node.price)
        };

        if remaining.is_empty() {
            best.offer(key, price);
            return Ok(());
        }

        for (rule_index, rule) in self.rules.iter().enumerate() {
            let child = SearchNode::apply(key, &remaining, price, rule_index, rule);

            if !child.valid {
                continue;
            }

            let child_key = arena.insert(child);
            self.expand(arena, child_key, best)?;
        }

        Ok(())
    }
}

/// Walk parent links leaf-to-root collecting applied rule identifiers, then
/// reverse them into application order.
fn applications<'a>(
    arena: &SlotMap<NodeKey, SearchNode>,
    rules: &'a RuleBook,
    leaf: NodeKey,
) -> Result<SmallVec<[&'a str; 8]>, SearchError> {
    let mut ids: SmallVec<[&'a str; 8]> = SmallVec::new();
    let mut cursor = Some(leaf);

    while let Some(key) = cursor {
        let node = arena.get(key).ok_or(SearchError::InvariantViolation {
            message: "path node missing from arena",
        })?;

        if let Some(rule_index) = node.rule {
            let rule = rules
                .get(rule_index)
                .ok_or(SearchError::InvariantViolation {
                    message: "applied rule missing from rule book",
                })?;

            ids.push(rule.id());
        }

        cursor = node.parent;
    }

    ids.reverse();
    Ok(ids)
}
