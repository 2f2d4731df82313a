use crate::error::TaxError;
use core_types::StateTaxRate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// The fixed ICMS table: one row per Brazilian state plus the Federal
/// District, 27 rows total. Rates are the standard medicine rates, between
/// 17% and 20%, with Rondônia at 17.5%.
pub const STATE_TAX_TABLE: [(&str, &str, Decimal); 27] = [
    ("AC", "Acre", dec!(19)),
    ("AL", "Alagoas", dec!(19)),
    ("AM", "Amazonas", dec!(20)),
    ("AP", "Amapá", dec!(18)),
    ("BA", "Bahia", dec!(19)),
    ("CE", "Ceará", dec!(18)),
    ("DF", "Distrito Federal", dec!(18)),
    ("ES", "Espírito Santo", dec!(17)),
    ("GO", "Goiás", dec!(17)),
    ("MA", "Maranhão", dec!(20)),
    ("MG", "Minas Gerais", dec!(18)),
    ("MS", "Mato Grosso do Sul", dec!(17)),
    ("MT", "Mato Grosso", dec!(17)),
    ("PA", "Pará", dec!(19)),
    ("PB", "Paraíba", dec!(20)),
    ("PE", "Pernambuco", dec!(20)),
    ("PI", "Piauí", dec!(20)),
    ("PR", "Paraná", dec!(19)),
    ("RJ", "Rio de Janeiro", dec!(20)),
    ("RN", "Rio Grande do Norte", dec!(20)),
    ("RO", "Rondônia", dec!(17.5)),
    ("RR", "Roraima", dec!(20)),
    ("RS", "Rio Grande do Sul", dec!(17)),
    ("SC", "Santa Catarina", dec!(17)),
    ("SE", "Sergipe", dec!(19)),
    ("SP", "São Paulo", dec!(18)),
    ("TO", "Tocantins", dec!(20)),
];

/// Looks up the ICMS rate for a two-letter state code.
///
/// The lookup is case-insensitive. An unknown code is a caller bug (the
/// table is fixed and complete), so it is surfaced as an error and never
/// silently defaulted.
pub fn icms_rate(state_code: &str) -> Result<Decimal, TaxError> {
    let code = state_code.trim().to_ascii_uppercase();
    STATE_TAX_TABLE
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, _, rate)| *rate)
        .ok_or_else(|| TaxError::UnknownState(state_code.to_string()))
}

/// Materializes the whole table as `StateTaxRate` rows for the reporting
/// collaborator.
pub fn all_states() -> Vec<StateTaxRate> {
    STATE_TAX_TABLE
        .iter()
        .map(|(code, name, rate)| StateTaxRate {
            state_code: (*code).to_string(),
            state_name: (*name).to_string(),
            percentage: *rate,
        })
        .collect()
}
