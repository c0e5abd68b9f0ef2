pub mod guard;
pub mod receipt;

use serde::{Deserialize, Serialize};

use crate::errors::{FeeError, Result};
use crate::types::{MonthRef, OneTimeFee, PaymentMode};

pub use guard::PaymentGuard;
pub use receipt::ReceiptSequence;

/// one checkout: the months being paid for and the one-time components
/// selected alongside them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentBatch {
    pub months: Vec<MonthRef>,
    pub one_time_fees: Vec<OneTimeFee>,
    pub payment_mode: PaymentMode,
    pub notes: Option<String>,
}

impl PaymentBatch {
    pub fn monthly_only(months: Vec<MonthRef>, payment_mode: PaymentMode) -> Self {
        Self {
            months,
            one_time_fees: Vec::new(),
            payment_mode,
            notes: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.months.is_empty() {
            return Err(FeeError::EmptyBatch);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Month;

    #[test]
    fn test_empty_batch_rejected() {
        let batch = PaymentBatch::monthly_only(Vec::new(), PaymentMode::Cash);
        assert!(matches!(batch.validate(), Err(FeeError::EmptyBatch)));
    }

    #[test]
    fn test_valid_batch() {
        let batch = PaymentBatch::monthly_only(
            vec![MonthRef::new(Month::May, 2024)],
            PaymentMode::Online,
        );
        assert!(batch.validate().is_ok());
    }
}
