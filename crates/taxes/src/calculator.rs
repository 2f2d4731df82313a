use crate::error::TaxError;
use crate::states::icms_rate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// A stateless calculator that grosses up a tax-exclusive factory price by
/// a state tax rate.
///
/// The formula is `price = pf / (1 - rate/100)`: ICMS is charged "inside"
/// the price, so the gross-up divides rather than multiplies.
#[derive(Debug, Default, Clone)]
pub struct TaxAdjustmentCalculator {}

impl TaxAdjustmentCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts a tax-exclusive price into the tax-inclusive gross price.
    ///
    /// # Arguments
    ///
    /// * `tax_exclusive_price` - The "PF sem impostos" reference price.
    /// * `rate_percent` - The state tax rate, as a percentage in `[0, 100)`.
    ///
    /// # Returns
    ///
    /// The gross price rounded to 4 decimal places, or a `TaxError` when the
    /// price is not strictly positive or the rate leaves the valid range
    /// (a rate of 100% or more makes the denominator non-positive).
    pub fn gross_price(
        &self,
        tax_exclusive_price: Decimal,
        rate_percent: Decimal,
    ) -> Result<Decimal, TaxError> {
        // --- 1. Validation ---
        if tax_exclusive_price <= Decimal::ZERO {
            return Err(TaxError::InvalidPrice(tax_exclusive_price));
        }
        if rate_percent < Decimal::ZERO || rate_percent >= dec!(100) {
            return Err(TaxError::InvalidRate(rate_percent));
        }

        // --- 2. Gross-up ---
        let denominator = Decimal::ONE - rate_percent / dec!(100);
        let gross = tax_exclusive_price / denominator;

        // Round to 4 decimal places, the precision CMED publishes prices at.
        Ok(gross.round_dp(4))
    }

    /// Lenient variant reproducing the legacy batch behavior: invalid
    /// inputs yield a zero price instead of an error, so one dirty row
    /// never aborts a whole table conversion.
    pub fn gross_price_or_zero(
        &self,
        tax_exclusive_price: Decimal,
        rate_percent: Decimal,
    ) -> Decimal {
        match self.gross_price(tax_exclusive_price, rate_percent) {
            Ok(price) => price,
            Err(err) => {
                tracing::warn!("gross_price_or_zero substituting 0: {err}");
                Decimal::ZERO
            }
        }
    }

    /// Grosses up a price using the ICMS rate of the given state.
    ///
    /// Unknown state codes are surfaced as `TaxError::UnknownState`.
    pub fn gross_price_for_state(
        &self,
        tax_exclusive_price: Decimal,
        state_code: &str,
    ) -> Result<Decimal, TaxError> {
        let rate = icms_rate(state_code)?;
        self.gross_price(tax_exclusive_price, rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grosses_up_by_the_inside_rate() {
        let calculator = TaxAdjustmentCalculator::new();
        // 100 / 0.82 = 121.9512...
        let gross = calculator.gross_price(dec!(100), dec!(18)).unwrap();
        assert_eq!(gross, dec!(121.9512));
        assert_eq!(gross.round_dp(2), dec!(121.95));
    }

    #[test]
    fn zero_rate_is_a_no_op() {
        let calculator = TaxAdjustmentCalculator::new();
        assert_eq!(calculator.gross_price(dec!(50), dec!(0)).unwrap(), dec!(50));
    }

    #[test]
    fn rate_of_one_hundred_or_more_is_invalid() {
        let calculator = TaxAdjustmentCalculator::new();
        assert_eq!(
            calculator.gross_price(dec!(100), dec!(100)).unwrap_err(),
            TaxError::InvalidRate(dec!(100))
        );
        assert!(calculator.gross_price(dec!(100), dec!(120)).is_err());
        assert!(calculator.gross_price(dec!(100), dec!(-1)).is_err());
    }

    #[test]
    fn non_positive_price_is_invalid() {
        let calculator = TaxAdjustmentCalculator::new();
        assert_eq!(
            calculator.gross_price(dec!(0), dec!(18)).unwrap_err(),
            TaxError::InvalidPrice(dec!(0))
        );
    }

    #[test]
    fn lenient_variant_substitutes_zero() {
        let calculator = TaxAdjustmentCalculator::new();
        assert_eq!(calculator.gross_price_or_zero(dec!(100), dec!(100)), dec!(0));
        assert_eq!(
            calculator.gross_price_or_zero(dec!(100), dec!(18)),
            dec!(121.9512)
        );
    }

    #[test]
    fn state_lookup_composes_with_the_gross_up() {
        let calculator = TaxAdjustmentCalculator::new();
        // São Paulo is 18%.
        assert_eq!(
            calculator.gross_price_for_state(dec!(100), "SP").unwrap(),
            dec!(121.9512)
        );
        assert!(matches!(
            calculator.gross_price_for_state(dec!(100), "ZZ"),
            Err(TaxError::UnknownState(_))
        ));
    }
}
