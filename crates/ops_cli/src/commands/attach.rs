use std::path::PathBuf;

use clap::Args;
use sqlx::PgPool;
use uuid::Uuid;

use ops_service::documents::AttachEvidenceParams;
use ops_service::OpsService;

#[derive(Debug, Args)]
pub struct AttachArgs {
    /// The work item UUID to attach this file to
    #[arg(short, long)]
    pub id: Uuid,

    /// Path to the physical file (e.g. ./receipt.pdf)
    #[arg(short, long)]
    pub file: PathBuf,

    /// The document title (e.g. "January receipts")
    #[arg(short, long)]
    pub title: String,

    /// Staff user recorded as the uploader
    #[arg(long)]
    pub actor: Option<Uuid>,
}

pub async fn execute(pool: PgPool, args: AttachArgs) -> Result<(), Box<dyn std::error::Error>> {
    println!("📎 Attaching Evidence via Service Layer...");

    let service = OpsService::new(pool);
    let doc = service
        .attach_evidence(AttachEvidenceParams {
            work_item_id: args.id,
            file_path: args.file,
            title: args.title,
            actor: args.actor,
        })
        .await?;

    println!("✅ Document Attached. UUID: {}", doc.id);
    if let Some(checksum) = doc.checksum {
        println!("🔑 SHA-256: {checksum}");
    }
    Ok(())
}
