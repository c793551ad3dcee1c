pub mod bundles;
pub mod mapping;
pub mod models;
pub mod reports;
pub mod session;
pub mod status;
pub mod validation;

pub use mapping::{build_work_item_plan, WorkItemDraft, WorkItemPatch, WorkItemPlan};
pub use status::{EvidenceStatus, Module, NgoStatus, Priority, WorkItemStatus};
