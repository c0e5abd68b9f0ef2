use chrono::{Datelike, NaiveDate};

use crate::decimal::Money;
use crate::types::{CollectionSummary, PaymentRecord};

/// collection figures over the full ledger.
///
/// Records whose payment date failed the lenient parse (`date == None`)
/// still count toward the grand total but fall out of the month and year
/// windows; there is no date to place them in.
pub struct CollectionAggregator;

impl CollectionAggregator {
    pub fn total(ledger: &[PaymentRecord]) -> Money {
        ledger.iter().map(|r| r.total_amount).sum()
    }

    pub fn this_month(ledger: &[PaymentRecord], today: NaiveDate) -> Money {
        ledger
            .iter()
            .filter(|r| {
                r.date
                    .is_some_and(|d| d.month() == today.month() && d.year() == today.year())
            })
            .map(|r| r.total_amount)
            .sum()
    }

    pub fn this_year(ledger: &[PaymentRecord], today: NaiveDate) -> Money {
        ledger
            .iter()
            .filter(|r| r.date.is_some_and(|d| d.year() == today.year()))
            .map(|r| r.total_amount)
            .sum()
    }

    pub fn summarize(ledger: &[PaymentRecord], today: NaiveDate) -> CollectionSummary {
        CollectionSummary {
            total: Self::total(ledger),
            this_month: Self::this_month(ledger, today),
            this_year: Self::this_year(ledger, today),
        }
    }
}
