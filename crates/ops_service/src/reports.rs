use serde::Serialize;
use time::OffsetDateTime;

use ops_core::reports::{
    monthly_activity, ngo_health, open_by_module, ModuleLoad, MonthlyActivity, NgoHealth,
};
use ops_db::error::Result;
use ops_db::repository::{NgoRepository, WorkItemRepository};

use crate::OpsService;

#[derive(Debug, Serialize)]
pub struct OverviewReport {
    pub months: Vec<MonthlyActivity>,
    pub open_by_module: Vec<ModuleLoad>,
    pub ngo_health: Vec<NgoHealth>,
}

impl OpsService {
    /// Pure reduction over freshly-fetched rows; nothing is materialized.
    pub async fn overview(&self, trailing_months: u32) -> Result<OverviewReport> {
        let items = WorkItemRepository::new(self.pool.clone()).list_all().await?;
        let ngos = NgoRepository::new(self.pool.clone()).list_all().await?;

        let now = OffsetDateTime::now_utc();
        Ok(OverviewReport {
            months: monthly_activity(&items, now, trailing_months),
            open_by_module: open_by_module(&items),
            ngo_health: ngo_health(&ngos, &items, now.date()),
        })
    }
}
