//! Academic calendar arithmetic.
//!
//! The school cycle runs April through March of the following calendar year:
//! April is month 1 of the cycle, March is month 12 and belongs to
//! `start_year + 1`. Only month granularity matters here.

use chrono::{Datelike, NaiveDate};

use crate::types::{Month, MonthRef};

/// calendar month number of April, the first month of the academic cycle
const CYCLE_START_MONTH: u32 = 4;

/// the twelve cycle months in order, paired with their calendar-year offset
/// relative to the academic start year (January–March roll into the next year)
pub const MONTH_SEQUENCE: [(Month, i32); 12] = [
    (Month::April, 0),
    (Month::May, 0),
    (Month::June, 0),
    (Month::July, 0),
    (Month::August, 0),
    (Month::September, 0),
    (Month::October, 0),
    (Month::November, 0),
    (Month::December, 0),
    (Month::January, 1),
    (Month::February, 1),
    (Month::March, 1),
];

/// calendar year in which the academic year containing `today` started
pub fn academic_year_start(today: NaiveDate) -> i32 {
    if today.month() >= CYCLE_START_MONTH {
        today.year()
    } else {
        today.year() - 1
    }
}

/// number of cycle months elapsed through `today`, inclusive (April = 1,
/// March = 12)
pub fn months_elapsed(today: NaiveDate) -> u32 {
    let month = today.month();
    if month >= CYCLE_START_MONTH {
        month - CYCLE_START_MONTH + 1
    } else {
        month + 12 - CYCLE_START_MONTH + 1
    }
}

/// cycle months due so far this academic year, labeled with calendar years
pub fn months_due(today: NaiveDate) -> Vec<MonthRef> {
    let start_year = academic_year_start(today);
    let elapsed = months_elapsed(today) as usize;
    MONTH_SEQUENCE[..elapsed]
        .iter()
        .map(|&(month, offset)| MonthRef::new(month, start_year + offset))
        .collect()
}

/// whether a labeled month falls within the academic year starting `start_year`
pub fn in_academic_year(month_ref: MonthRef, start_year: i32) -> bool {
    MONTH_SEQUENCE
        .iter()
        .any(|&(month, offset)| month == month_ref.month && month_ref.year == start_year + offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_academic_year_start() {
        assert_eq!(academic_year_start(date(2024, 4, 1)), 2024);
        assert_eq!(academic_year_start(date(2024, 12, 31)), 2024);
        assert_eq!(academic_year_start(date(2025, 1, 1)), 2024);
        assert_eq!(academic_year_start(date(2025, 3, 31)), 2024);
    }

    #[test]
    fn test_months_elapsed_bounds() {
        // first day of the cycle
        assert_eq!(months_elapsed(date(2024, 4, 1)), 1);
        // last day of the cycle, following calendar year
        assert_eq!(months_elapsed(date(2025, 3, 31)), 12);
        assert_eq!(months_elapsed(date(2024, 8, 15)), 5);
        assert_eq!(months_elapsed(date(2024, 12, 1)), 9);
        assert_eq!(months_elapsed(date(2025, 1, 10)), 10);
    }

    #[test]
    fn test_months_due_crosses_year_boundary() {
        let due = months_due(date(2025, 1, 10));
        assert_eq!(due.len(), 10);
        assert_eq!(due.first().unwrap().to_string(), "April 2024");
        assert_eq!(due.last().unwrap().to_string(), "January 2025");
    }

    #[test]
    fn test_in_academic_year() {
        assert!(in_academic_year(MonthRef::new(Month::April, 2024), 2024));
        assert!(in_academic_year(MonthRef::new(Month::March, 2025), 2024));
        assert!(!in_academic_year(MonthRef::new(Month::March, 2024), 2024));
        assert!(!in_academic_year(MonthRef::new(Month::April, 2025), 2024));
    }

    #[test]
    fn test_months_due_mid_year() {
        let due = months_due(date(2024, 8, 15));
        let labels: Vec<String> = due.iter().map(|m| m.to_string()).collect();
        assert_eq!(
            labels,
            vec!["April 2024", "May 2024", "June 2024", "July 2024", "August 2024"]
        );
    }
}
