use ops_core::bundles::{aggregate_bundles, BundleSummary};
use ops_db::error::{Error, Result};
use ops_db::repository::{BundleChange, NgoRepository};

use crate::OpsService;

impl OpsService {
    /// Bundles are derived, not stored: group the NGO rows on their bundle
    /// tag at read time.
    pub async fn list_bundles(&self) -> Result<Vec<BundleSummary>> {
        let ngos = NgoRepository::new(self.pool.clone()).list_all().await?;
        Ok(aggregate_bundles(&ngos))
    }

    /// A bundle edit is a bulk rewrite across every member NGO row. Returns
    /// the member count touched.
    pub async fn update_bundle(&self, name: &str, change: BundleChange) -> Result<u64> {
        let touched = NgoRepository::new(self.pool.clone())
            .update_bundle(name, &change)
            .await?;

        if touched == 0 {
            return Err(Error::NotFound(format!("bundle '{name}'")));
        }
        Ok(touched)
    }
}
