pub mod form;
pub mod ngo;
pub mod satellite;
pub mod work_item;

pub use form::{FieldDef, FieldType, FormSubmission, FormTemplate, SubmissionStatus};
pub use ngo::Ngo;
pub use satellite::{AuditEntry, Comment, Contact, DocumentRecord, Reminder, ReminderStatus};
pub use work_item::WorkItem;
