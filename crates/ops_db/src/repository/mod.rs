pub mod forms;
pub mod ngos;
pub mod satellites;
pub mod work_items;

pub use forms::{FormRepository, NewFormTemplate, NewSubmission};
pub use ngos::{BundleChange, NewNgo, NgoPatch, NgoRepository};
pub use satellites::{
    AuditRepository, CommentRepository, ContactRepository, DocumentRepository, NewDocument,
    ReminderRepository,
};
pub use work_items::{NewWorkItem, WorkItemRepository};
