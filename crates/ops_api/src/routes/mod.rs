use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers::{self, forms, ngos, portal, reminders, reports, work_items};
use crate::AppState;

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/work-items",
            get(work_items::list_work_items).post(work_items::create_work_item),
        )
        .route("/work-items/:id", get(work_items::get_work_item))
        .route("/work-items/:id/status", post(work_items::transition_status))
        .route("/work-items/:id/owner", post(work_items::reassign_owner))
        .route("/work-items/:id/evidence", post(work_items::review_evidence))
        .route(
            "/work-items/:id/comments",
            get(work_items::list_comments).post(work_items::add_comment),
        )
        .route("/work-items/:id/documents", get(work_items::list_documents))
        .route("/work-items/:id/audit", get(work_items::audit_trail))
        .route("/views/my-queue", get(work_items::my_queue))
        .route("/views/missing-items", get(work_items::missing_items))
        .route("/views/reminders", get(reminders::due_reminders))
        .route("/reminders", post(reminders::schedule_reminder))
        .route("/reminders/:id/seen", post(reminders::mark_seen))
        .route("/ngos", get(ngos::list_ngos).post(ngos::create_ngo))
        .route("/ngos/:id", get(ngos::get_ngo).patch(ngos::update_ngo))
        .route(
            "/ngos/:id/contacts",
            get(ngos::list_contacts).post(ngos::add_contact),
        )
        .route("/bundles", get(ngos::list_bundles))
        .route("/bundles/:name", patch(ngos::update_bundle))
        .route(
            "/forms/templates",
            get(forms::list_templates).post(forms::save_template),
        )
        .route("/forms/templates/:id", get(forms::get_template))
        .route(
            "/forms/templates/:id/submissions",
            get(forms::list_submissions),
        )
        .route("/forms/submissions/:id", get(forms::get_submission))
        .route("/forms/:id/submit", post(forms::submit_form))
        .route("/reports/overview", get(reports::overview))
        .route("/portal/work-items", get(portal::list_work_items))
        .route("/portal/forms/:id/submit", post(portal::submit_form))
        .with_state(state)
}
