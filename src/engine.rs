use hourglass_rs::SafeTimeProvider;

use crate::aggregate::CollectionAggregator;
use crate::catalog::FeeStructureCatalog;
use crate::dues::DuesCalculator;
use crate::errors::{FeeError, Result};
use crate::events::{Event, EventStore};
use crate::payments::{PaymentBatch, PaymentGuard, ReceiptSequence};
use crate::types::{CollectionSummary, DuesSnapshot, FeeStructure, PaymentRecord, Student};

/// core fee engine: catalog + receipt source + event collection.
///
/// The ledger itself is owned by an external persistence layer; operations
/// take the relevant slice and hand back records for that layer to insert.
/// A batch is final once accepted. The duplicate pre-check in
/// [`PaymentGuard`] is an early reject only; the persistence boundary must
/// enforce the `(student_id, month, year)` uniqueness constraint.
pub struct FeeEngine {
    catalog: FeeStructureCatalog,
    receipts: ReceiptSequence,
    pub events: EventStore,
}

impl FeeEngine {
    pub fn new(catalog: FeeStructureCatalog) -> Self {
        Self {
            catalog,
            receipts: ReceiptSequence::new(),
            events: EventStore::new(),
        }
    }

    /// resume with a receipt counter restored from storage
    pub fn with_receipt_counter(catalog: FeeStructureCatalog, counter: u32) -> Self {
        Self {
            catalog,
            receipts: ReceiptSequence::starting_at(counter),
            events: EventStore::new(),
        }
    }

    pub fn catalog(&self) -> &FeeStructureCatalog {
        &self.catalog
    }

    /// recompute a student's dues snapshot from their ledger slice
    pub fn compute_dues(
        &mut self,
        student: &Student,
        ledger_for_student: &[PaymentRecord],
        time_provider: &SafeTimeProvider,
    ) -> DuesSnapshot {
        let today = time_provider.now().date_naive();
        DuesCalculator::compute(
            student,
            ledger_for_student,
            &self.catalog,
            today,
            &mut self.events,
        )
    }

    /// validate a checkout batch, stamp one receipt number across it, and
    /// return the records for the persistence layer to insert
    pub fn submit_payment(
        &mut self,
        student: &Student,
        ledger_for_student: &[PaymentRecord],
        batch: &PaymentBatch,
        time_provider: &SafeTimeProvider,
    ) -> Result<Vec<PaymentRecord>> {
        let today = time_provider.now().date_naive();

        let structure = self
            .catalog
            .lookup(&student.classname)
            .cloned()
            .ok_or_else(|| FeeError::MissingFeeStructure {
                classname: student.classname.clone(),
            })?;

        let receipt_no = self.receipts.next(today);
        let result = PaymentGuard::build_batch(
            student,
            ledger_for_student,
            &structure,
            batch,
            receipt_no.clone(),
            today,
        );

        match result {
            Ok(records) => {
                let amount = records.iter().map(|r| r.total_amount).sum();
                self.events.emit(Event::PaymentBatchAccepted {
                    student_id: student.id,
                    receipt_no,
                    months: batch.months.clone(),
                    amount,
                    date: today,
                });
                Ok(records)
            }
            Err(err) => {
                if let FeeError::DuplicatePayment { conflicts } = &err {
                    self.events.emit(Event::DuplicatePaymentRejected {
                        student_id: student.id,
                        conflicts: conflicts.clone(),
                        date: today,
                    });
                }
                Err(err)
            }
        }
    }

    /// collection totals over the full ledger
    pub fn aggregate_collections(
        &self,
        ledger: &[PaymentRecord],
        time_provider: &SafeTimeProvider,
    ) -> CollectionSummary {
        CollectionAggregator::summarize(ledger, time_provider.now().date_naive())
    }

    /// replace fee schedule rows, all-or-nothing
    pub fn bulk_update_fee_structure(&mut self, updates: Vec<FeeStructure>) -> Result<()> {
        let classes: Vec<String> = updates.iter().map(|s| s.classname.clone()).collect();
        self.catalog.bulk_update(updates)?;
        self.events.emit(Event::FeeStructureUpdated { classes });
        Ok(())
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }
}
