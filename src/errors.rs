use thiserror::Error;

use crate::types::{MonthRef, OneTimeFee};

#[derive(Error, Debug)]
pub enum FeeError {
    #[error("duplicate payment: {} already recorded", format_pairs(.conflicts))]
    DuplicatePayment {
        conflicts: Vec<MonthRef>,
    },

    #[error("one-time fee already applied: {fee} for academic year {year}")]
    OneTimeFeeAlreadyApplied {
        fee: OneTimeFee,
        year: i32,
    },

    #[error("bulk update failed: invalid rows for classes {}", .failed_classes.join(", "))]
    BulkUpdateFailed {
        failed_classes: Vec<String>,
    },

    #[error("payment batch contains no months")]
    EmptyBatch,

    #[error("no fee structure configured for class {classname}")]
    MissingFeeStructure {
        classname: String,
    },
}

fn format_pairs(pairs: &[MonthRef]) -> String {
    pairs
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, FeeError>;
