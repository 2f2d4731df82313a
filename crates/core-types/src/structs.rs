use chrono::NaiveDate;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::enums::QuoteSource;
use crate::error::CoreError;

/// A single raw price observation for one entity (medicine, substance or
/// supplier contract), as supplied by the data-access layer.
///
/// Quotes for an entity are expected ordered by `quote_date` ascending; the
/// analysis crates rely on that ordering when pairing consecutive
/// observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub entity_id: String,
    /// Unit price in BRL. Always strictly positive once validated.
    pub price: Decimal,
    pub quote_date: NaiveDate,
    pub source: QuoteSource,
}

/// One row of the CMED reference table: the tax-exclusive factory price
/// ("PF sem impostos") published for an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulatedPrice {
    pub entity_id: String,
    pub tax_exclusive_price: Decimal,
    pub publication_date: NaiveDate,
}

/// The officially authorized annual price adjustment ("reajuste") for one
/// calendar year. There is exactly one per year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualAdjustment {
    pub year: i32,
    pub percentage: Decimal,
}

/// One row of the fixed ICMS state tax table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateTaxRate {
    /// Two-letter state code, e.g. "SP".
    pub state_code: String,
    pub state_name: String,
    pub percentage: Decimal,
}

/// A generic (year, value) point of an annual series, such as the yearly
/// average price of an entity or the yearly exchange-rate variation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnualValue {
    pub year: i32,
    pub value: Decimal,
}

impl AnnualValue {
    pub fn new(year: i32, value: Decimal) -> Self {
        Self { year, value }
    }
}

/// Two consecutive price observations of the same entity, with the observed
/// percentage variation between them.
///
/// The variation is computed once, at construction, so every downstream
/// consumer (compliance, outlier detection, elasticity) works from the same
/// number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceChange {
    pub entity_id: String,
    pub price_prev: Decimal,
    pub price_now: Decimal,
    pub variation_percent: Decimal,
}

impl PriceChange {
    /// Builds a `PriceChange`, computing `(now - prev) / prev * 100`.
    ///
    /// Fails when `price_prev` is not strictly positive: a zero previous
    /// price makes the variation undefined, and negative prices are dirty
    /// data that must not reach a report.
    pub fn new(
        entity_id: impl Into<String>,
        price_prev: Decimal,
        price_now: Decimal,
    ) -> Result<Self, CoreError> {
        if price_prev <= Decimal::ZERO {
            return Err(CoreError::InvalidInput(
                "price_prev".to_string(),
                format!("must be strictly positive, got {price_prev}"),
            ));
        }
        let variation_percent =
            (price_now - price_prev) / price_prev * Decimal::from(100);
        Ok(Self {
            entity_id: entity_id.into(),
            price_prev,
            price_now,
            variation_percent,
        })
    }

    /// Deviation of the observed variation from an official adjustment.
    pub fn deviation_from(&self, adjustment_percent: Decimal) -> Decimal {
        self.variation_percent - adjustment_percent
    }
}

/// A price-quote row exactly as it leaves the dynamically shaped RPC layer:
/// every field may be absent and the price arrives as a float.
///
/// Call [`RawQuoteRow::validate`] to turn it into a typed [`PriceQuote`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawQuoteRow {
    pub entity_id: Option<String>,
    pub price: Option<f64>,
    pub quote_date: Option<NaiveDate>,
    pub source: Option<String>,
}

impl RawQuoteRow {
    /// Validates the raw row into a [`PriceQuote`].
    ///
    /// Rejects missing fields, NaN/infinite prices and non-positive prices.
    pub fn validate(&self) -> Result<PriceQuote, CoreError> {
        let entity_id = self
            .entity_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| CoreError::MissingField("entity_id".to_string()))?
            .to_string();

        let raw_price = self
            .price
            .ok_or_else(|| CoreError::MissingField("price".to_string()))?;
        // Decimal::from_f64 returns None for NaN and infinities.
        let price = Decimal::from_f64(raw_price).ok_or_else(|| {
            CoreError::InvalidInput(
                "price".to_string(),
                format!("not a finite number: {raw_price}"),
            )
        })?;
        if price <= Decimal::ZERO {
            return Err(CoreError::InvalidInput(
                "price".to_string(),
                format!("must be strictly positive, got {price}"),
            ));
        }

        let quote_date = self
            .quote_date
            .ok_or_else(|| CoreError::MissingField("quote_date".to_string()))?;

        let source = self
            .source
            .as_deref()
            .ok_or_else(|| CoreError::MissingField("source".to_string()))?
            .parse::<QuoteSource>()?;

        Ok(PriceQuote {
            entity_id,
            price,
            quote_date,
            source,
        })
    }
}

/// Validates a whole batch of raw rows, partitioning it into accepted quotes
/// and per-row rejection reasons.
///
/// A single dirty record never aborts a whole report: rejected rows are
/// logged at `warn` and returned alongside the accepted ones so the caller
/// can surface them if it wants to.
pub fn validate_batch(rows: &[RawQuoteRow]) -> (Vec<PriceQuote>, Vec<(usize, CoreError)>) {
    let mut accepted = Vec::with_capacity(rows.len());
    let mut rejected = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        match row.validate() {
            Ok(quote) => accepted.push(quote),
            Err(err) => {
                tracing::warn!("Dropping malformed quote row {index}: {err}");
                rejected.push((index, err));
            }
        }
    }

    (accepted, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn raw_row(price: f64) -> RawQuoteRow {
        RawQuoteRow {
            entity_id: Some("dipirona-500mg".to_string()),
            price: Some(price),
            quote_date: NaiveDate::from_ymd_opt(2022, 3, 15),
            source: Some("supplier".to_string()),
        }
    }

    #[test]
    fn price_change_computes_variation() {
        let change = PriceChange::new("med-x", dec!(10.00), dec!(12.00)).unwrap();
        assert_eq!(change.variation_percent, dec!(20));
        assert_eq!(change.deviation_from(dec!(8)), dec!(12));
    }

    #[test]
    fn price_change_rejects_zero_previous_price() {
        let err = PriceChange::new("med-x", Decimal::ZERO, dec!(12.00)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(field, _) if field == "price_prev"));
    }

    #[test]
    fn raw_row_validates_into_typed_quote() {
        let quote = raw_row(10.50).validate().unwrap();
        assert_eq!(quote.entity_id, "dipirona-500mg");
        assert_eq!(quote.price, dec!(10.50));
        assert_eq!(quote.source, QuoteSource::Supplier);
    }

    #[test]
    fn raw_row_rejects_nan_and_non_positive_prices() {
        assert!(raw_row(f64::NAN).validate().is_err());
        assert!(raw_row(-3.20).validate().is_err());
        assert!(raw_row(0.0).validate().is_err());
    }

    #[test]
    fn raw_row_rejects_unknown_source() {
        let mut row = raw_row(10.0);
        row.source = Some("planilha".to_string());
        assert!(row.validate().is_err());
    }

    #[test]
    fn batch_validation_partitions_dirty_rows() {
        let rows = vec![raw_row(10.0), raw_row(f64::NAN), RawQuoteRow::default()];
        let (accepted, rejected) = validate_batch(&rows);
        assert_eq!(accepted.len(), 1);
        assert_eq!(rejected.len(), 2);
        assert_eq!(rejected[0].0, 1);
        assert_eq!(rejected[1].0, 2);
    }
}
