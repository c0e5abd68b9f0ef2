//! Receipt number generation.
//!
//! Format `REC-{YYYYMMDD}-{XXXX}` where the suffix is a monotonic counter
//! rendered as four uppercase base36 characters. One number is issued per
//! checkout batch and stamped on every record of that batch, so the records
//! sharing it reconstruct to one coherent line-item set for printing.

use chrono::NaiveDate;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::types::ReceiptNumber;

const SUFFIX_LEN: usize = 4;
const BASE: u32 = 36;
const SUFFIX_SPACE: u32 = BASE.pow(SUFFIX_LEN as u32);
const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// thread-safe monotonic receipt number source.
///
/// Numbers repeat only after 36^4 batches through one generator; wire format
/// is unchanged from the legacy random-suffix scheme.
#[derive(Debug, Default)]
pub struct ReceiptSequence {
    counter: AtomicU32,
}

impl ReceiptSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// resume from a known counter value, e.g. restored from storage
    pub fn starting_at(counter: u32) -> Self {
        Self {
            counter: AtomicU32::new(counter),
        }
    }

    /// issue the next receipt number, stamped with the checkout date
    pub fn next(&self, date: NaiveDate) -> ReceiptNumber {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) % SUFFIX_SPACE;
        ReceiptNumber(format!("REC-{}-{}", date.format("%Y%m%d"), encode_base36(n)))
    }
}

fn encode_base36(mut n: u32) -> String {
    let mut buf = [b'0'; SUFFIX_LEN];
    for slot in buf.iter_mut().rev() {
        *slot = DIGITS[(n % BASE) as usize];
        n /= BASE;
    }
    String::from_utf8_lossy(&buf).into_owned()
}
