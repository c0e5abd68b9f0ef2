//! Lenient deserializers for ledger rows coming from upstream systems.
//!
//! Policy, not oversight: malformed monetary fields coerce to zero and
//! unparsable dates become `None`, so a single dirty row cannot take down
//! reporting. Aggregates stay resilient at the cost of masking data-entry
//! bugs upstream.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use crate::decimal::Money;

/// deserialize a monetary field from a number, a numeric string, or garbage
/// (null, missing, non-numeric text), coercing anything unusable to zero
pub fn money_or_zero<'de, D>(deserializer: D) -> Result<Money, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(Decimal),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Raw::deserialize(deserializer) {
        Ok(Raw::Num(d)) => Money::from_decimal(d),
        Ok(Raw::Text(s)) => Money::from_str_exact(s.trim()).unwrap_or(Money::ZERO),
        _ => Money::ZERO,
    })
}

/// deserialize a `YYYY-MM-DD` date field, mapping anything unparsable to `None`
pub fn date_or_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Raw::deserialize(deserializer) {
        Ok(Raw::Text(s)) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok(),
        _ => None,
    })
}
