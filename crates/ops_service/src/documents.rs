use sha2::{Digest, Sha256};
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use uuid::Uuid;

use ops_core::models::DocumentRecord;
use ops_core::status::EvidenceStatus;
use ops_db::error::{Error, Result};
use ops_db::repository::{AuditRepository, DocumentRepository, NewDocument, WorkItemRepository};

use crate::OpsService;

#[derive(Debug)]
pub struct AttachEvidenceParams {
    pub work_item_id: Uuid,
    pub file_path: std::path::PathBuf,
    pub title: String,
    pub actor: Option<Uuid>,
}

impl OpsService {
    /// Attaches an evidence document to a work item: checksums the file,
    /// records the metadata row, and moves missing evidence to uploaded.
    /// The review itself happens later via `set_evidence_status`.
    pub async fn attach_evidence(&self, params: AttachEvidenceParams) -> Result<DocumentRecord> {
        let items = WorkItemRepository::new(self.pool.clone());
        let item = items.fetch(params.work_item_id).await?;

        // 1. Checksum (streaming from disk)
        let mut file = File::open(&params.file_path)
            .await
            .map_err(|e| Error::Validation(format!("cannot open {:?}: {e}", params.file_path)))?;

        let mut hasher = Sha256::new();
        let mut buffer = [0; 8192]; // 8KB chunks
        loop {
            let n = file
                .read(&mut buffer)
                .await
                .map_err(|e| Error::Validation(format!("read failed: {e}")))?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
        }
        let checksum = hex::encode(hasher.finalize());

        // 2. Persist the metadata row
        let doc = DocumentRepository::new(self.pool.clone())
            .insert(&NewDocument {
                id: Uuid::new_v4(),
                work_item_id: Some(item.id),
                ngo_id: item.ngo_id,
                title: params.title,
                path: params.file_path.to_string_lossy().to_string(),
                checksum: Some(checksum),
                uploaded_by_user_id: params.actor,
            })
            .await?;

        // 3. First upload against required evidence moves missing -> uploaded
        if item.evidence_required && item.evidence_status == EvidenceStatus::Missing {
            items
                .set_evidence_status(item.id, EvidenceStatus::Uploaded)
                .await?;
        }

        AuditRepository::new(self.pool.clone())
            .record(
                "work_item",
                item.id,
                "evidence_attached",
                params.actor,
                Some(doc.path.clone()),
            )
            .await?;

        Ok(doc)
    }

    pub async fn list_documents(&self, work_item_id: Uuid) -> Result<Vec<DocumentRecord>> {
        DocumentRepository::new(self.pool.clone())
            .list_for_work_item(work_item_id)
            .await
    }
}
