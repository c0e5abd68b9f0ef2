//! Duplicate-payment guard and batch record construction.
//!
//! The ledger check here is an early reject, not the final word: two
//! concurrent submissions can both pass it before either row lands. The
//! persistence layer must still enforce uniqueness on
//! `(student_id, month, year)`.

use chrono::NaiveDate;
use std::collections::HashSet;
use uuid::Uuid;

use crate::calendar;
use crate::catalog::FeeStructureCatalog;
use crate::decimal::Money;
use crate::errors::{FeeError, Result};
use crate::payments::PaymentBatch;
use crate::types::{
    FeeStructure, MonthRef, OneTimeFee, PaymentRecord, ReceiptNumber, Student,
};

pub struct PaymentGuard;

impl PaymentGuard {
    /// validate a checkout batch against the student's ledger slice and build
    /// the records to hand to the persistence layer.
    ///
    /// Rejects the whole batch on the first rule violation; no partial
    /// commit. The recurring monthly component applies to every month in the
    /// batch; the selected one-time components land on the first record only,
    /// so a multi-month checkout cannot double-bill them.
    pub fn build_batch(
        student: &Student,
        ledger_for_student: &[PaymentRecord],
        structure: &FeeStructure,
        batch: &PaymentBatch,
        receipt_no: ReceiptNumber,
        today: NaiveDate,
    ) -> Result<Vec<PaymentRecord>> {
        batch.validate()?;

        let conflicts = Self::find_conflicts(student, ledger_for_student, &batch.months);
        if !conflicts.is_empty() {
            return Err(FeeError::DuplicatePayment { conflicts });
        }

        let start_year = calendar::academic_year_start(today);
        for &fee in &batch.one_time_fees {
            if Self::one_time_applied(student, ledger_for_student, fee, start_year) {
                return Err(FeeError::OneTimeFeeAlreadyApplied {
                    fee,
                    year: start_year,
                });
            }
        }

        let rate = FeeStructureCatalog::effective_monthly_rate(structure, student.uses_bus);
        let records = batch
            .months
            .iter()
            .enumerate()
            .map(|(i, &month_ref)| {
                Self::build_record(student, structure, batch, month_ref, rate, &receipt_no, today, i == 0)
            })
            .collect();

        Ok(records)
    }

    /// requested pairs already covered in the ledger, plus pairs repeated
    /// within the batch itself, in request order
    fn find_conflicts(
        student: &Student,
        ledger_for_student: &[PaymentRecord],
        months: &[MonthRef],
    ) -> Vec<MonthRef> {
        let covered: HashSet<MonthRef> = ledger_for_student
            .iter()
            .filter(|r| r.student_id == student.id)
            .map(|r| r.month_ref())
            .collect();

        let mut seen = HashSet::new();
        let mut conflicts = Vec::new();
        for &month_ref in months {
            if covered.contains(&month_ref) || !seen.insert(month_ref) {
                conflicts.push(month_ref);
            }
        }
        conflicts
    }

    /// whether a one-time component was already billed to this student in
    /// the current academic year; derived from the ledger, not batch shape
    fn one_time_applied(
        student: &Student,
        ledger_for_student: &[PaymentRecord],
        fee: OneTimeFee,
        start_year: i32,
    ) -> bool {
        ledger_for_student
            .iter()
            .filter(|r| r.student_id == student.id)
            .filter(|r| calendar::in_academic_year(r.month_ref(), start_year))
            .any(|r| {
                let component = match fee {
                    OneTimeFee::Exam => r.exam_fees,
                    // annual fees are billed through the other-fee column
                    OneTimeFee::Annual | OneTimeFee::Other => r.other_fee,
                    OneTimeFee::Fine => r.fine,
                };
                component.is_positive()
            })
    }

    #[allow(clippy::too_many_arguments)]
    fn build_record(
        student: &Student,
        structure: &FeeStructure,
        batch: &PaymentBatch,
        month_ref: MonthRef,
        rate: Money,
        receipt_no: &ReceiptNumber,
        today: NaiveDate,
        first: bool,
    ) -> PaymentRecord {
        let mut exam_fees = Money::ZERO;
        let mut other_fee = Money::ZERO;
        let mut fine = Money::ZERO;

        if first {
            for &fee in &batch.one_time_fees {
                let amount = structure.one_time_amount(fee);
                match fee {
                    OneTimeFee::Exam => exam_fees += amount,
                    OneTimeFee::Annual | OneTimeFee::Other => other_fee += amount,
                    OneTimeFee::Fine => fine += amount,
                }
            }
        }

        let total_amount = rate + exam_fees + other_fee + fine;

        PaymentRecord {
            id: Uuid::new_v4(),
            student_id: student.id,
            month: month_ref.month,
            year: month_ref.year,
            monthly_fees: rate,
            exam_fees,
            other_fee,
            fine,
            total_amount,
            payment_mode: batch.payment_mode.clone(),
            receipt_no: receipt_no.clone(),
            date: Some(today),
            notes: batch.notes.clone(),
        }
    }
}
