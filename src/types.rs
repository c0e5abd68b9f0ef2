use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::decimal::Money;
use crate::serialization::{date_or_none, money_or_zero};

/// unique identifier for a student
pub type StudentId = Uuid;

/// unique identifier for a payment record
pub type RecordId = Uuid;

/// calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// calendar month number, 1..=12
    pub fn number(&self) -> u32 {
        *self as u32 + 1
    }

    pub fn from_number(n: u32) -> Option<Month> {
        Month::ALL.get(n.checked_sub(1)? as usize).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// a month in a specific calendar year, e.g. "April 2024"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthRef {
    pub month: Month,
    pub year: i32,
}

impl MonthRef {
    pub fn new(month: Month, year: i32) -> Self {
        Self { month, year }
    }
}

impl fmt::Display for MonthRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}

/// student details consumed from the external registry; read-only here
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub classname: String,
    pub uses_bus: bool,
    pub admission_no: String,
    pub roll_no: String,
    pub name: String,
}

/// per-class fee schedule; one row per class, admin-owned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeStructure {
    pub classname: String,
    pub monthly_fee: Money,
    pub annual_fee: Money,
    pub exam_fee: Money,
    pub other_fee: Money,
    pub fine: Money,
    pub bus_fee: Money,
}

impl FeeStructure {
    /// amount of a one-time component per this class's schedule
    pub fn one_time_amount(&self, fee: OneTimeFee) -> Money {
        match fee {
            OneTimeFee::Exam => self.exam_fee,
            OneTimeFee::Annual => self.annual_fee,
            OneTimeFee::Other => self.other_fee,
            OneTimeFee::Fine => self.fine,
        }
    }
}

/// payment mode recorded against a ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMode {
    Cash,
    Cheque,
    Online,
    Other(String),
}

/// one-time fee components, billed once per academic cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OneTimeFee {
    Exam,
    Annual,
    Other,
    Fine,
}

impl fmt::Display for OneTimeFee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OneTimeFee::Exam => "exam fee",
            OneTimeFee::Annual => "annual fee",
            OneTimeFee::Other => "other fee",
            OneTimeFee::Fine => "fine",
        };
        f.write_str(label)
    }
}

/// receipt number stamped across every record of one checkout batch
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReceiptNumber(pub String);

impl fmt::Display for ReceiptNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// one ledger entry: a single month's payment for a single student.
///
/// Append-only. Invariant: `total_amount` equals the sum of the four
/// components; at most one record exists per `(student_id, month, year)`.
/// Monetary fields deserialize leniently (garbage coerces to zero) and the
/// date deserializes to `None` when unparsable, so dirty upstream rows do
/// not poison reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: RecordId,
    pub student_id: StudentId,
    pub month: Month,
    pub year: i32,
    #[serde(default, deserialize_with = "money_or_zero")]
    pub monthly_fees: Money,
    #[serde(default, deserialize_with = "money_or_zero")]
    pub exam_fees: Money,
    #[serde(default, deserialize_with = "money_or_zero")]
    pub other_fee: Money,
    #[serde(default, deserialize_with = "money_or_zero")]
    pub fine: Money,
    #[serde(default, deserialize_with = "money_or_zero")]
    pub total_amount: Money,
    pub payment_mode: PaymentMode,
    pub receipt_no: ReceiptNumber,
    #[serde(default, deserialize_with = "date_or_none")]
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl PaymentRecord {
    pub fn month_ref(&self) -> MonthRef {
        MonthRef::new(self.month, self.year)
    }

    /// sum of the record's own components
    pub fn components_total(&self) -> Money {
        self.monthly_fees + self.exam_fees + self.other_fee + self.fine
    }
}

/// computed-on-demand dues summary; never persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuesSnapshot {
    pub student_id: StudentId,
    pub monthly_fee: Money,
    pub total_due: Money,
    pub total_paid: Money,
    pub pending_amount: Money,
    pub pending_months: Vec<MonthRef>,
}

impl DuesSnapshot {
    /// zero-valued snapshot, used when the student's class has no fee structure
    pub fn empty(student_id: StudentId) -> Self {
        Self {
            student_id,
            monthly_fee: Money::ZERO,
            total_due: Money::ZERO,
            total_paid: Money::ZERO,
            pending_amount: Money::ZERO,
            pending_months: Vec::new(),
        }
    }

    pub fn is_settled(&self) -> bool {
        self.pending_months.is_empty()
    }
}

/// collection totals over the full ledger
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct CollectionSummary {
    pub total: Money,
    pub this_month: Money,
    pub this_year: Money,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_numbers() {
        assert_eq!(Month::January.number(), 1);
        assert_eq!(Month::December.number(), 12);
        assert_eq!(Month::from_number(4), Some(Month::April));
        assert_eq!(Month::from_number(0), None);
        assert_eq!(Month::from_number(13), None);
    }

    #[test]
    fn test_month_ref_display() {
        let m = MonthRef::new(Month::April, 2024);
        assert_eq!(m.to_string(), "April 2024");
    }

    #[test]
    fn test_one_time_amount() {
        let structure = FeeStructure {
            classname: "Three".to_string(),
            monthly_fee: Money::from_major(500),
            annual_fee: Money::from_major(1200),
            exam_fee: Money::from_major(300),
            other_fee: Money::from_major(150),
            fine: Money::from_major(50),
            bus_fee: Money::from_major(100),
        };
        assert_eq!(structure.one_time_amount(OneTimeFee::Exam), Money::from_major(300));
        assert_eq!(structure.one_time_amount(OneTimeFee::Annual), Money::from_major(1200));
        assert_eq!(structure.one_time_amount(OneTimeFee::Fine), Money::from_major(50));
    }

    #[test]
    fn test_empty_snapshot_is_settled() {
        let snapshot = DuesSnapshot::empty(Uuid::new_v4());
        assert!(snapshot.is_settled());
        assert_eq!(snapshot.total_due, Money::ZERO);
    }
}
