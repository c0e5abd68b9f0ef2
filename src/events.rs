use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{MonthRef, ReceiptNumber, StudentId};

/// all events emitted by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // payment events
    PaymentBatchAccepted {
        student_id: StudentId,
        receipt_no: ReceiptNumber,
        months: Vec<MonthRef>,
        amount: Money,
        date: NaiveDate,
    },
    DuplicatePaymentRejected {
        student_id: StudentId,
        conflicts: Vec<MonthRef>,
        date: NaiveDate,
    },

    // dues events
    MissingFeeStructure {
        student_id: StudentId,
        classname: String,
        date: NaiveDate,
    },

    // catalog events
    FeeStructureUpdated {
        classes: Vec<String>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
