use clap::Args;
use sqlx::PgPool;

use ops_core::reports::DEFAULT_TRAILING_MONTHS;
use ops_service::OpsService;

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Trailing window for the monthly activity table
    #[arg(long, default_value_t = DEFAULT_TRAILING_MONTHS)]
    pub months: u32,
}

pub async fn execute(pool: PgPool, args: ReportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let service = OpsService::new(pool);
    let report = service.overview(args.months).await?;

    println!("📅 Monthly Activity (last {} months)", args.months);
    for row in &report.months {
        println!("   {}  created {:>3}  completed {:>3}", row.month, row.created, row.completed);
    }

    println!("📦 Open Items by Module");
    if report.open_by_module.is_empty() {
        println!("   (nothing open)");
    }
    for bucket in &report.open_by_module {
        println!("   {:<24} {:>3}", bucket.label, bucket.open);
    }

    println!("🏥 NGO Health");
    for ngo in &report.ngo_health {
        println!(
            "   {:<32} open {:>3}  overdue {:>3}  missing evidence {:>3}",
            ngo.name, ngo.open, ngo.overdue, ngo.missing_evidence
        );
    }

    Ok(())
}
