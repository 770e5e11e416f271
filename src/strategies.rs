//! Pricing strategies
//!
//! Each strategy is a pure quantity → price function for one item type in
//! the linear checkout engine. Configuration is validated by the
//! constructors, never at calculation time, so `price_for` itself cannot
//! fail. Monetary results are rounded to two decimal places wherever the
//! reference arithmetic rounds; `Decimal::round_dp` uses banker's rounding.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while constructing a strategy.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StrategyError {
    /// A unit or group price was negative.
    #[error("price cannot be negative, got {0}")]
    NegativePrice(Decimal),

    /// A discount lay outside 0..=100 percent points.
    #[error("discount must be between 0 and 100, got {0}")]
    DiscountOutOfRange(u32),

    /// A weight denominator was negative.
    #[error("weight cannot be negative, got {0}")]
    NegativeWeight(Decimal),

    /// A weight denominator was zero, so no quantity could ever be priced.
    #[error("weight cannot be zero")]
    ZeroWeight,

    /// A group worked out to zero units, so no quantity could ever fill it.
    #[error("group must cover at least one unit")]
    EmptyGroup,
}

/// A pricing scheme for a single item type.
///
/// Build values through the constructors ([`PricingStrategy::regular`] and
/// friends); they validate configuration up front and round unit prices to
/// two decimal places.
#[derive(Debug, Clone, PartialEq)]
pub enum PricingStrategy {
    /// Flat per-unit price.
    Regular {
        /// Price per unit.
        unit: Decimal,
    },

    /// Every unit discounted by a flat percentage.
    Discount {
        /// Price per unit before the discount.
        unit: Decimal,

        /// Discount as a fraction of the unit price.
        percent: Percentage,
    },

    /// Discount on every unit, but only once the quantity reaches the
    /// threshold.
    ThresholdDiscount {
        /// Price per unit before the discount.
        unit: Decimal,

        /// Minimum quantity (inclusive) for the discount to apply.
        threshold: u32,

        /// Discount as a fraction of the unit price.
        percent: Percentage,
    },

    /// Buy `buy` units, get `free` further units at no charge.
    BuyNGetMFree {
        /// Price per charged unit.
        unit: Decimal,

        /// Units charged per complete group.
        buy: u32,

        /// Units given away per complete group.
        free: u32,
    },

    /// Every complete group of `group` units at a fixed combined price.
    GroupPrice {
        /// Price per unit outside a complete group.
        unit: Decimal,

        /// Units per complete group.
        group: u32,

        /// Combined price of a complete group.
        group_price: Decimal,
    },

    /// Price per `denominator` units of weight; quantities may be
    /// fractional.
    ByWeight {
        /// Price per weight denomination.
        unit: Decimal,

        /// Weight units covered by one `unit` price.
        denominator: Decimal,
    },
}

impl PricingStrategy {
    /// Flat per-unit pricing.
    ///
    /// # Errors
    ///
    /// Returns [`StrategyError::NegativePrice`] if `unit` is negative.
    pub fn regular(unit: Decimal) -> Result<Self, StrategyError> {
        Ok(Self::Regular {
            unit: checked_price(unit)?,
        })
    }

    /// A flat percentage off every unit.
    ///
    /// # Errors
    ///
    /// Returns a [`StrategyError`] if `unit` is negative or
    /// `percent_points` exceeds 100.
    pub fn discount(unit: Decimal, percent_points: u32) -> Result<Self, StrategyError> {
        Ok(Self::Discount {
            unit: checked_price(unit)?,
            percent: checked_percent(percent_points)?,
        })
    }

    /// A percentage off every unit once the quantity reaches `threshold`.
    ///
    /// # Errors
    ///
    /// Returns a [`StrategyError`] if `unit` is negative or
    /// `percent_points` exceeds 100.
    pub fn threshold_discount(
        unit: Decimal,
        threshold: u32,
        percent_points: u32,
    ) -> Result<Self, StrategyError> {
        Ok(Self::ThresholdDiscount {
            unit: checked_price(unit)?,
            threshold,
            percent: checked_percent(percent_points)?,
        })
    }

    /// Buy `buy` units, get `free` more at no charge.
    ///
    /// # Errors
    ///
    /// Returns a [`StrategyError`] if `unit` is negative or the group
    /// (`buy + free`) covers no units at all.
    pub fn buy_n_get_m_free(unit: Decimal, buy: u32, free: u32) -> Result<Self, StrategyError> {
        if buy == 0 && free == 0 {
            return Err(StrategyError::EmptyGroup);
        }

        Ok(Self::BuyNGetMFree {
            unit: checked_price(unit)?,
            buy,
            free,
        })
    }

    /// Every complete group of `group` units for `group_price`, remainder at
    /// the unit price.
    ///
    /// # Errors
    ///
    /// Returns a [`StrategyError`] if either price is negative or `group`
    /// is zero.
    pub fn group_price(
        unit: Decimal,
        group: u32,
        group_price: Decimal,
    ) -> Result<Self, StrategyError> {
        if group == 0 {
            return Err(StrategyError::EmptyGroup);
        }

        if group_price < Decimal::ZERO {
            return Err(StrategyError::NegativePrice(group_price));
        }

        Ok(Self::GroupPrice {
            unit: checked_price(unit)?,
            group,
            group_price,
        })
    }

    /// Weight-based pricing: `unit` buys `denominator` units of weight.
    ///
    /// # Errors
    ///
    /// Returns a [`StrategyError`] if `unit` is negative or `denominator`
    /// is negative or zero.
    pub fn by_weight(unit: Decimal, denominator: Decimal) -> Result<Self, StrategyError> {
        if denominator < Decimal::ZERO {
            return Err(StrategyError::NegativeWeight(denominator));
        }

        if denominator == Decimal::ZERO {
            return Err(StrategyError::ZeroWeight);
        }

        Ok(Self::ByWeight {
            unit: checked_price(unit)?,
            denominator,
        })
    }

    /// Price `quantity` units (or weight units) under this strategy.
    #[must_use]
    pub fn price_for(&self, quantity: Decimal) -> Decimal {
        match self {
            Self::Regular { unit } => (*unit * quantity).round_dp(2),
            Self::Discount { unit, percent } => {
                (discounted_unit(*unit, *percent) * quantity).round_dp(2)
            }
            Self::ThresholdDiscount {
                unit,
                threshold,
                percent,
            } => {
                if quantity < Decimal::from(*threshold) {
                    // Below the threshold the raw product is returned
                    // without the final rounding the other branches apply.
                    *unit * quantity
                } else {
                    (discounted_unit(*unit, *percent) * quantity).round_dp(2)
                }
            }
            Self::BuyNGetMFree { unit, buy, free } => {
                let group = Decimal::from(buy + free);
                let sets = (quantity / group).floor();
                let remainder = quantity - sets * group;
                let buy = Decimal::from(*buy);

                (*unit * buy * sets + *unit * remainder.min(buy)).round_dp(2)
            }
            Self::GroupPrice {
                unit,
                group,
                group_price,
            } => {
                let group = Decimal::from(*group);
                let sets = (quantity / group).floor();
                let remainder = quantity - sets * group;

                (*group_price * sets + *unit * remainder).round_dp(2)
            }
            Self::ByWeight { unit, denominator } => (*unit * quantity / *denominator).round_dp(2),
        }
    }
}

/// Reject negative prices and settle the rest to two decimal places.
fn checked_price(price: Decimal) -> Result<Decimal, StrategyError> {
    if price < Decimal::ZERO {
        return Err(StrategyError::NegativePrice(price));
    }

    Ok(price.round_dp(2))
}

/// Convert validated percent points into a fraction.
fn checked_percent(points: u32) -> Result<Percentage, StrategyError> {
    if points > 100 {
        return Err(StrategyError::DiscountOutOfRange(points));
    }

    Ok(Percentage::from(Decimal::new(i64::from(points), 2)))
}

/// The unit price with the discount applied, rounded to two decimal places.
fn discounted_unit(unit: Decimal, percent: Percentage) -> Decimal {
    (unit - percent * unit).round_dp(2)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn dec(value: &str) -> TestResult<Decimal> {
        Ok(value.parse::<Decimal>()?)
    }

    #[test]
    fn constructors_round_unit_prices() -> TestResult {
        let up = PricingStrategy::regular(dec("10.666")?)?;
        let down = PricingStrategy::regular(dec("10.444")?)?;

        assert_eq!(up, PricingStrategy::Regular { unit: dec("10.67")? });
        assert_eq!(down, PricingStrategy::Regular { unit: dec("10.44")? });

        Ok(())
    }

    #[test]
    fn negative_price_is_rejected_up_front() {
        let result = PricingStrategy::regular(Decimal::from(-1));

        assert!(matches!(result, Err(StrategyError::NegativePrice(_))));
    }

    #[test]
    fn regular_multiplies_and_rounds() -> TestResult {
        let strategy = PricingStrategy::regular(Decimal::from(2))?;

        assert_eq!(strategy.price_for(Decimal::from(2)), Decimal::from(4));
        assert_eq!(strategy.price_for(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(strategy.price_for(dec("1.111")?), dec("2.22")?);

        Ok(())
    }

    #[test]
    fn discount_range_is_checked() {
        assert!(matches!(
            PricingStrategy::discount(Decimal::TEN, 101),
            Err(StrategyError::DiscountOutOfRange(101))
        ));
    }

    #[test]
    fn discount_applies_to_every_unit() -> TestResult {
        let strategy = PricingStrategy::discount(Decimal::TEN, 10)?;

        assert_eq!(strategy.price_for(Decimal::TEN), Decimal::from(90));
        assert_eq!(strategy.price_for(Decimal::ZERO), Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn threshold_discount_applies_at_exactly_the_threshold() -> TestResult {
        // At the threshold, not only strictly above it.
        let strategy = PricingStrategy::threshold_discount(Decimal::TEN, 10, 10)?;

        assert_eq!(strategy.price_for(Decimal::TEN), Decimal::from(90));

        Ok(())
    }

    #[test]
    fn threshold_discount_charges_full_price_below_threshold() -> TestResult {
        let strategy = PricingStrategy::threshold_discount(Decimal::TEN, 10, 10)?;

        assert_eq!(strategy.price_for(Decimal::from(5)), Decimal::from(50));

        Ok(())
    }

    #[test]
    fn below_threshold_price_is_the_raw_unrounded_product() -> TestResult {
        // The reference implementation skips the final rounding on the
        // below-threshold branch only. That asymmetry is reproduced here on
        // purpose; this test documents it rather than "fixing" it.
        let strategy = PricingStrategy::threshold_discount(dec("1.11")?, 10, 10)?;

        assert_eq!(strategy.price_for(dec("2.5")?), dec("2.775")?);

        // The branch at or above the threshold still rounds.
        assert_eq!(strategy.price_for(dec("10")?), dec("10.00")?);

        Ok(())
    }

    #[test]
    fn buy_n_get_m_free_charges_buy_units_per_group() -> TestResult {
        let strategy = PricingStrategy::buy_n_get_m_free(Decimal::ONE, 3, 2)?;

        assert_eq!(strategy.price_for(Decimal::from(11)), Decimal::from(7));
        assert_eq!(strategy.price_for(Decimal::from(9)), Decimal::from(6));
        assert_eq!(strategy.price_for(Decimal::from(3)), Decimal::from(3));

        Ok(())
    }

    #[test]
    fn buy_n_get_m_free_at_exactly_one_group_charges_buy_units() -> TestResult {
        let strategy = PricingStrategy::buy_n_get_m_free(Decimal::ONE, 3, 2)?;

        assert_eq!(strategy.price_for(Decimal::from(5)), Decimal::from(3));

        Ok(())
    }

    #[test]
    fn buy_n_get_m_free_below_buy_quantity_charges_everything() -> TestResult {
        let strategy = PricingStrategy::buy_n_get_m_free(Decimal::ONE, 3, 2)?;

        assert_eq!(strategy.price_for(Decimal::from(2)), Decimal::from(2));

        Ok(())
    }

    #[test]
    fn empty_buy_n_get_m_group_is_rejected() {
        assert!(matches!(
            PricingStrategy::buy_n_get_m_free(Decimal::ONE, 0, 0),
            Err(StrategyError::EmptyGroup)
        ));
    }

    #[test]
    fn group_price_charges_groups_and_remainder() -> TestResult {
        let strategy = PricingStrategy::group_price(Decimal::TEN, 3, Decimal::from(20))?;

        assert_eq!(strategy.price_for(Decimal::from(7)), Decimal::from(50));
        assert_eq!(strategy.price_for(Decimal::from(2)), Decimal::from(20));

        Ok(())
    }

    #[test]
    fn zero_sized_group_is_rejected() {
        assert!(matches!(
            PricingStrategy::group_price(Decimal::TEN, 0, Decimal::from(20)),
            Err(StrategyError::EmptyGroup)
        ));
    }

    #[test]
    fn negative_group_price_is_rejected() {
        assert!(matches!(
            PricingStrategy::group_price(Decimal::TEN, 3, Decimal::from(-20)),
            Err(StrategyError::NegativePrice(_))
        ));
    }

    #[test]
    fn by_weight_scales_fractional_quantities() -> TestResult {
        let strategy = PricingStrategy::by_weight(Decimal::TEN, Decimal::from(2))?;

        assert_eq!(strategy.price_for(Decimal::from(3)), Decimal::from(15));

        Ok(())
    }

    #[test]
    fn negative_and_zero_weights_are_rejected() {
        assert!(matches!(
            PricingStrategy::by_weight(Decimal::TEN, Decimal::from(-1)),
            Err(StrategyError::NegativeWeight(_))
        ));
        assert!(matches!(
            PricingStrategy::by_weight(Decimal::TEN, Decimal::ZERO),
            Err(StrategyError::ZeroWeight)
        ));
    }
}
