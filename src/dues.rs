//! Dues reconciliation: the single source of truth for pending amounts.
//!
//! Every view of a student's pending state reads one [`DuesSnapshot`]
//! produced here. The pending amount is derived from the unpaid month list
//! (`pending_months.len() * rate`), never from `total_due - total_paid`;
//! the two diverge once one-time fees enter the ledger.

use chrono::NaiveDate;
use std::collections::HashSet;

use crate::calendar;
use crate::catalog::FeeStructureCatalog;
use crate::events::{Event, EventStore};
use crate::types::{DuesSnapshot, MonthRef, PaymentRecord, Student};

pub struct DuesCalculator;

impl DuesCalculator {
    /// compute a student's dues snapshot from the fee schedule, their ledger
    /// slice, and today's date.
    ///
    /// A class with no configured fee structure degrades to a zero-valued
    /// snapshot instead of failing, so reporting views stay up for
    /// unconfigured classes; the fallback is recorded as
    /// [`Event::MissingFeeStructure`].
    pub fn compute(
        student: &Student,
        ledger_for_student: &[PaymentRecord],
        catalog: &FeeStructureCatalog,
        today: NaiveDate,
        events: &mut EventStore,
    ) -> DuesSnapshot {
        let Some(structure) = catalog.lookup(&student.classname) else {
            events.emit(Event::MissingFeeStructure {
                student_id: student.id,
                classname: student.classname.clone(),
                date: today,
            });
            return DuesSnapshot::empty(student.id);
        };

        let rate = FeeStructureCatalog::effective_monthly_rate(structure, student.uses_bus);
        let months_due = calendar::months_due(today);

        // months whose recurring component has been paid; one-time-only
        // records (exam/other/fine without a monthly portion) do not cover
        // the month
        let paid_months: HashSet<MonthRef> = ledger_for_student
            .iter()
            .filter(|r| r.student_id == student.id && r.monthly_fees.is_positive())
            .map(|r| r.month_ref())
            .collect();

        let pending_months: Vec<MonthRef> = months_due
            .iter()
            .copied()
            .filter(|m| !paid_months.contains(m))
            .collect();

        let total_due = rate.times(months_due.len() as u32).round_major();
        // recurring component only; one-time fees are billed once, not
        // part of the monthly reconciliation
        let total_paid = ledger_for_student
            .iter()
            .filter(|r| r.student_id == student.id)
            .map(|r| r.monthly_fees)
            .sum();
        let pending_amount = rate.times(pending_months.len() as u32);

        DuesSnapshot {
            student_id: student.id,
            monthly_fee: rate.round_major(),
            total_due,
            total_paid,
            pending_amount,
            pending_months,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Money;
    use crate::types::{FeeStructure, Month, PaymentMode, ReceiptNumber};
    use uuid::Uuid;

    fn catalog() -> FeeStructureCatalog {
        FeeStructureCatalog::from_structures(vec![FeeStructure {
            classname: "Three".to_string(),
            monthly_fee: Money::from_major(500),
            annual_fee: Money::from_major(1200),
            exam_fee: Money::from_major(300),
            other_fee: Money::from_major(150),
            fine: Money::from_major(50),
            bus_fee: Money::from_major(100),
        }])
        .unwrap()
    }

    fn student(classname: &str) -> Student {
        Student {
            id: Uuid::new_v4(),
            classname: classname.to_string(),
            uses_bus: true,
            admission_no: "ADM-101".to_string(),
            roll_no: "7".to_string(),
            name: "Asha Verma".to_string(),
        }
    }

    fn monthly_record(student: &Student, month: Month, year: i32, amount: i64) -> PaymentRecord {
        PaymentRecord {
            id: Uuid::new_v4(),
            student_id: student.id,
            month,
            year,
            monthly_fees: Money::from_major(amount),
            exam_fees: Money::ZERO,
            other_fee: Money::ZERO,
            fine: Money::ZERO,
            total_amount: Money::from_major(amount),
            payment_mode: PaymentMode::Cash,
            receipt_no: ReceiptNumber("REC-20240815-0001".to_string()),
            date: NaiveDate::from_ymd_opt(year, month.number(), 10),
            notes: None,
        }
    }

    fn aug_15() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 15).unwrap()
    }

    #[test]
    fn test_no_payments_all_months_pending() {
        // scenario A: rate 600, five elapsed months, nothing paid
        let student = student("Three");
        let mut events = EventStore::new();

        let snapshot = DuesCalculator::compute(&student, &[], &catalog(), aug_15(), &mut events);

        assert_eq!(snapshot.monthly_fee, Money::from_major(600));
        assert_eq!(snapshot.total_due, Money::from_major(3000));
        assert_eq!(snapshot.total_paid, Money::ZERO);
        assert_eq!(snapshot.pending_amount, Money::from_major(3000));
        let labels: Vec<String> = snapshot.pending_months.iter().map(|m| m.to_string()).collect();
        assert_eq!(
            labels,
            vec!["April 2024", "May 2024", "June 2024", "July 2024", "August 2024"]
        );
        assert!(events.events().is_empty());
    }

    #[test]
    fn test_partial_payments_reduce_pending() {
        // scenario B: April and May paid (monthly only)
        let student = student("Three");
        let ledger = vec![
            monthly_record(&student, Month::April, 2024, 600),
            monthly_record(&student, Month::May, 2024, 600),
        ];
        let mut events = EventStore::new();

        let snapshot =
            DuesCalculator::compute(&student, &ledger, &catalog(), aug_15(), &mut events);

        let labels: Vec<String> = snapshot.pending_months.iter().map(|m| m.to_string()).collect();
        assert_eq!(labels, vec!["June 2024", "July 2024", "August 2024"]);
        assert_eq!(snapshot.pending_amount, Money::from_major(1800));
        assert_eq!(snapshot.total_paid, Money::from_major(1200));
        assert_eq!(snapshot.total_due, Money::from_major(3000));
    }

    #[test]
    fn test_one_time_only_record_does_not_cover_month() {
        let student = student("Three");
        let mut record = monthly_record(&student, Month::April, 2024, 0);
        record.monthly_fees = Money::ZERO;
        record.exam_fees = Money::from_major(300);
        record.total_amount = Money::from_major(300);
        let mut events = EventStore::new();

        let snapshot =
            DuesCalculator::compute(&student, &[record], &catalog(), aug_15(), &mut events);

        assert_eq!(snapshot.pending_months.len(), 5);
        assert_eq!(snapshot.total_paid, Money::ZERO);
    }

    #[test]
    fn test_missing_structure_degrades_to_zero_snapshot() {
        let student = student("Nursery");
        let mut events = EventStore::new();

        let snapshot = DuesCalculator::compute(&student, &[], &catalog(), aug_15(), &mut events);

        assert_eq!(snapshot, DuesSnapshot::empty(student.id));
        assert_eq!(
            events.events(),
            &[Event::MissingFeeStructure {
                student_id: student.id,
                classname: "Nursery".to_string(),
                date: aug_15(),
            }]
        );
    }

    #[test]
    fn test_compute_is_idempotent() {
        let student = student("Three");
        let ledger = vec![monthly_record(&student, Month::April, 2024, 600)];
        let mut events = EventStore::new();

        let first = DuesCalculator::compute(&student, &ledger, &catalog(), aug_15(), &mut events);
        let second = DuesCalculator::compute(&student, &ledger, &catalog(), aug_15(), &mut events);

        assert_eq!(first, second);
    }

    #[test]
    fn test_non_bus_student_uses_base_rate() {
        let mut student = student("Three");
        student.uses_bus = false;
        let mut events = EventStore::new();

        let snapshot = DuesCalculator::compute(&student, &[], &catalog(), aug_15(), &mut events);

        assert_eq!(snapshot.monthly_fee, Money::from_major(500));
        assert_eq!(snapshot.total_due, Money::from_major(2500));
    }

    #[test]
    fn test_march_covers_full_cycle() {
        let student = student("Three");
        let mut events = EventStore::new();
        let march = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();

        let snapshot = DuesCalculator::compute(&student, &[], &catalog(), march, &mut events);

        assert_eq!(snapshot.pending_months.len(), 12);
        assert_eq!(snapshot.total_due, Money::from_major(7200));
        assert_eq!(
            snapshot.pending_months.last().unwrap().to_string(),
            "March 2025"
        );
    }
}
