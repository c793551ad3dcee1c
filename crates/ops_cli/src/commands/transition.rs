use clap::Args;
use sqlx::PgPool;
use uuid::Uuid;

use ops_core::status::WorkItemStatus;
use ops_service::OpsService;

#[derive(Debug, Args)]
pub struct TransitionArgs {
    /// The work item UUID
    #[arg(short, long)]
    pub id: Uuid,

    /// Target status (e.g. in_progress, submitted, complete)
    #[arg(long)]
    pub to: WorkItemStatus,

    /// Staff user recorded in the audit trail
    #[arg(long)]
    pub actor: Option<Uuid>,
}

pub async fn execute(pool: PgPool, args: TransitionArgs) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔀 Transitioning work item {}...", args.id);

    let service = OpsService::new(pool);
    let item = service.transition_status(args.id, args.to, args.actor).await?;

    println!("✅ Now {} \"{}\"", item.status, item.title);
    Ok(())
}
