/// quick start - minimal example to get started
use fee_ledger_rs::{
    FeeEngine, FeeStructure, FeeStructureCatalog, Money, PaymentBatch, PaymentMode,
    SafeTimeProvider, Student, TimeSource, Uuid,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // one class, 500/month plus 100 bus fee
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

    let time = SafeTimeProvider::new(TimeSource::System);

    // what does she owe right now?
    let dues = engine.compute_dues(&student, &[], &time);
    println!(
        "pending: {} across {} months",
        dues.pending_amount,
        dues.pending_months.len()
    );

    // pay the first pending month
    if let Some(&first) = dues.pending_months.first() {
        let batch = PaymentBatch::monthly_only(vec![first], PaymentMode::Cash);
        let records = engine.submit_payment(&student, &[], &batch, &time)?;
        println!("paid {} with receipt {}", first, records[0].receipt_no);
    }

    Ok(())
}
