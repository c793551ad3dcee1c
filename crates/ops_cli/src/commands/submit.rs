use std::path::PathBuf;

use clap::Args;
use sqlx::PgPool;
use uuid::Uuid;

use ops_service::OpsService;

#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// The form template UUID to submit against
    #[arg(short, long)]
    pub template: Uuid,

    /// Path to a JSON file holding the payload object
    #[arg(short, long)]
    pub payload: PathBuf,

    /// NGO the submission belongs to
    #[arg(long)]
    pub ngo: Option<Uuid>,

    /// Staff user recorded as the submitter
    #[arg(long)]
    pub actor: Option<Uuid>,
}

pub async fn execute(pool: PgPool, args: SubmitArgs) -> Result<(), Box<dyn std::error::Error>> {
    println!("📨 Submitting form payload...");

    let raw = std::fs::read_to_string(&args.payload)?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    let payload = match value {
        serde_json::Value::Object(map) => map,
        _ => return Err(format!("{:?} must hold a JSON object", args.payload).into()),
    };

    let service = OpsService::new(pool);
    let outcome = service
        .submit_form(args.template, payload, args.ngo, args.actor)
        .await?;

    println!("✅ Submission recorded. UUID: {}", outcome.submission.id);
    match outcome.work_item {
        Some(item) => println!("📋 Work item {} [{}] \"{}\"", item.id, item.status, item.title),
        None => println!("📋 No work item produced (mapping action: none)."),
    }
    Ok(())
}
