/// collection summaries and json state
///
/// Builds a small multi-student ledger, prints total / this-month /
/// this-year figures, and round-trips a record through json including a
/// dirty row whose amount and date need lenient parsing.
use fee_ledger_rs::chrono::{TimeZone, Utc};
use fee_ledger_rs::{
    CollectionAggregator, FeeEngine, FeeStructure, FeeStructureCatalog, Money, Month, MonthRef,
    PaymentBatch, PaymentMode, PaymentRecord, SafeTimeProvider, Student, TimeSource, Uuid,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = FeeStructureCatalog::from_structures(vec![
        FeeStructure {
            classname: "Three".to_string(),
            monthly_fee: Money::from_major(500),
            annual_fee: Money::from_major(1200),
            exam_fee: Money::from_major(300),
            other_fee: Money::from_major(150),
            fine: Money::from_major(50),
            bus_fee: Money::from_major(100),
        },
        FeeStructure {
            classname: "Four".to_string(),
            monthly_fee: Money::from_major(550),
            annual_fee: Money::from_major(1300),
            exam_fee: Money::from_major(300),
            other_fee: Money::from_major(150),
            fine: Money::from_major(50),
            bus_fee: Money::from_major(100),
        },
    ])?;
    let mut engine = FeeEngine::new(catalog);

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 8, 15, 10, 0, 0).unwrap(),
    ));

    let mut ledger: Vec<PaymentRecord> = Vec::new();
    for (classname, uses_bus, name) in [
        ("Three", true, "Asha Verma"),
        ("Four", false, "Rohan Gupta"),
    ] {
        let student = Student {
            id: Uuid::new_v4(),
            classname: classname.to_string(),
            uses_bus,
            admission_no: format!("ADM-{}", name.len()),
            roll_no: "1".to_string(),
            name: name.to_string(),
        };
        let batch = PaymentBatch::monthly_only(
            vec![
                MonthRef::new(Month::April, 2024),
                MonthRef::new(Month::May, 2024),
            ],
            PaymentMode::Online,
        );
        ledger.extend(engine.submit_payment(&student, &ledger, &batch, &time)?);
    }

    let summary = engine.aggregate_collections(&ledger, &time);
    println!("total collected : {}", summary.total);
    println!("this month      : {}", summary.this_month);
    println!("this year       : {}", summary.this_year);

    // records serialize cleanly...
    let json = serde_json::to_string_pretty(&ledger[0])?;
    println!("{json}");

    // ...and a dirty upstream row coerces instead of crashing reporting
    let dirty = json
        .replace("\"2024-08-15\"", "\"15/08/2024\"")
        .replacen("\"600\"", "\"n/a\"", 1);
    let parsed: PaymentRecord = serde_json::from_str(&dirty)?;
    println!(
        "dirty row: date={:?} still counted in total={}",
        parsed.date,
        CollectionAggregator::total(&[parsed.clone()])
    );

    Ok(())
}
