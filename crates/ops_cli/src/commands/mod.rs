pub mod attach;
pub mod rebuild;
pub mod report;
pub mod submit;
pub mod transition;
