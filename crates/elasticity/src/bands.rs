use core_types::PriceChange;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A half-open price interval `[lower, upper)` used to bucket price
/// changes by their previous price. The last band of a partition has no
/// upper bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBand {
    pub label: String,
    pub lower: Decimal,
    pub upper: Option<Decimal>,
}

impl PriceBand {
    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.lower
            && match self.upper {
                Some(upper) => price < upper,
                None => true,
            }
    }
}

/// Builds the default four-band partition from the quartiles of
/// `price_prev` over the given changes.
///
/// This is the bucketing the dashboard uses; callers with their own band
/// definitions can pass any partition to the analyzer instead. Returns an
/// empty partition for an empty input.
pub fn quartile_bands(changes: &[PriceChange]) -> Vec<PriceBand> {
    if changes.is_empty() {
        return Vec::new();
    }

    let mut prices: Vec<Decimal> = changes.iter().map(|c| c.price_prev).collect();
    prices.sort();

    // Nearest-rank quartiles; exact interpolation is not needed for bucketing.
    let quartile = |k: usize| prices[(prices.len() - 1) * k / 4];
    let (q1, q2, q3) = (quartile(1), quartile(2), quartile(3));

    vec![
        PriceBand {
            label: format!("Faixa 1 (até {q1})"),
            lower: Decimal::ZERO,
            upper: Some(q1),
        },
        PriceBand {
            label: format!("Faixa 2 ({q1} a {q2})"),
            lower: q1,
            upper: Some(q2),
        },
        PriceBand {
            label: format!("Faixa 3 ({q2} a {q3})"),
            lower: q2,
            upper: Some(q3),
        },
        PriceBand {
            label: format!("Faixa 4 (acima de {q3})"),
            lower: q3,
            upper: None,
        },
    ]
}
