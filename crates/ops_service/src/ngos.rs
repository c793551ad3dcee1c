use uuid::Uuid;

use ops_core::models::Ngo;
use ops_db::error::Result;
use ops_db::repository::{AuditRepository, NewNgo, NgoPatch, NgoRepository};

use crate::OpsService;

impl OpsService {
    pub async fn create_ngo(&self, params: NewNgo, actor: Option<Uuid>) -> Result<Ngo> {
        let ngo = NgoRepository::new(self.pool.clone()).insert(&params).await?;

        AuditRepository::new(self.pool.clone())
            .record("ngo", ngo.id, "created", actor, None)
            .await?;

        Ok(ngo)
    }

    pub async fn update_ngo(&self, id: Uuid, patch: NgoPatch, actor: Option<Uuid>) -> Result<Ngo> {
        let ngo = NgoRepository::new(self.pool.clone()).update(id, &patch).await?;

        AuditRepository::new(self.pool.clone())
            .record("ngo", id, "updated", actor, None)
            .await?;

        Ok(ngo)
    }

    pub async fn get_ngo(&self, id: Uuid) -> Result<Ngo> {
        NgoRepository::new(self.pool.clone()).fetch(id).await
    }

    pub async fn list_ngos(&self) -> Result<Vec<Ngo>> {
        NgoRepository::new(self.pool.clone()).list_all().await
    }
}
