/// dues reconciliation walkthrough with pinned time
///
/// Runs the August 15, 2024 scenario: five elapsed months, two paid, a
/// multi-month checkout with an exam fee, and a rejected double payment.
use fee_ledger_rs::chrono::{TimeZone, Utc};
use fee_ledger_rs::{
    FeeEngine, FeeStructure, FeeStructureCatalog, Money, Month, MonthRef, OneTimeFee,
    PaymentBatch, PaymentMode, PaymentRecord, SafeTimeProvider, Student, TimeSource, Uuid,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = FeeStructureCatalog::from_structures(vec![FeeStructure {
        classname: "Three".to_string(),
        monthly_fee: Money::from_major(500),
        annual_fee: Money::from_major(1200),
        exam_fee: Money::from_major(300),
        other_fee: Money::from_major(150),
        fine: Money::from_major(50),
        bus_fee: Money::from_major(100),
    }])?;
    let mut engine = FeeEngine::new(catalog);

    let student = Student {
        id: Uuid::new_v4(),
        classname: "Three".to_string(),
        uses_bus: true,
        admission_no: "ADM-101".to_string(),
        roll_no: "7".to_string(),
        name: "Asha Verma".to_string(),
    };

    // pin the clock to August 15, 2024: April through August are due
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 8, 15, 10, 0, 0).unwrap(),
    ));

    let mut ledger: Vec<PaymentRecord> = Vec::new();

    let dues = engine.compute_dues(&student, &ledger, &time);
    println!("before any payment:");
    println!("  total due      {}", dues.total_due);
    println!("  pending months {:?}", labels(&dues.pending_months));

    // pay April and May, monthly component only
    let batch = PaymentBatch::monthly_only(
        vec![
            MonthRef::new(Month::April, 2024),
            MonthRef::new(Month::May, 2024),
        ],
        PaymentMode::Cash,
    );
    ledger.extend(engine.submit_payment(&student, &ledger, &batch, &time)?);

    let dues = engine.compute_dues(&student, &ledger, &time);
    println!("after paying April and May:");
    println!("  pending amount {}", dues.pending_amount);
    println!("  pending months {:?}", labels(&dues.pending_months));

    // clear the rest in one checkout, exam fee billed once on the first month
    let batch = PaymentBatch {
        months: dues.pending_months.clone(),
        one_time_fees: vec![OneTimeFee::Exam],
        payment_mode: PaymentMode::Online,
        notes: Some("cleared to date".to_string()),
    };
    let records = engine.submit_payment(&student, &ledger, &batch, &time)?;
    let batch_total: Money = records.iter().map(|r| r.total_amount).sum();
    println!(
        "checkout of {} months, receipt {}, total {}",
        records.len(),
        records[0].receipt_no,
        batch_total
    );
    ledger.extend(records);

    // paying May again is rejected with the conflicting month named
    let retry = PaymentBatch::monthly_only(
        vec![MonthRef::new(Month::May, 2024)],
        PaymentMode::Cash,
    );
    match engine.submit_payment(&student, &ledger, &retry, &time) {
        Err(e) => println!("second May payment: {e}"),
        Ok(_) => unreachable!("duplicate must be rejected"),
    }

    Ok(())
}

fn labels(months: &[MonthRef]) -> Vec<String> {
    months.iter().map(|m| m.to_string()).collect()
}
