pub mod aggregate;
pub mod calendar;
pub mod catalog;
pub mod decimal;
pub mod dues;
pub mod engine;
pub mod errors;
pub mod events;
pub mod payments;
pub mod serialization;
pub mod types;

// re-export key types
pub use aggregate::CollectionAggregator;
pub use catalog::FeeStructureCatalog;
pub use decimal::Money;
pub use dues::DuesCalculator;
pub use engine::FeeEngine;
pub use errors::{FeeError, Result};
pub use events::{Event, EventStore};
pub use payments::{PaymentBatch, PaymentGuard, ReceiptSequence};
pub use types::{
    CollectionSummary, DuesSnapshot, FeeStructure, Month, MonthRef, OneTimeFee, PaymentMode,
    PaymentRecord, ReceiptNumber, RecordId, Student, StudentId,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
