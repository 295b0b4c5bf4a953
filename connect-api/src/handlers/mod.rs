pub mod contacts;
pub mod export;
pub mod notification;
pub mod page;

use actix_web::web;

/// Registers every route served by the contact page.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(page::index))
        .route("/health", web::get().to(health))
        .route("/contacts/{id}/toggle", web::post().to(page::toggle))
        .route("/export", web::post().to(page::export))
        .route("/notification/dismiss", web::post().to(page::dismiss))
        .route("/api/contacts", web::get().to(contacts::list_contacts))
        .route("/api/contacts/{id}/toggle", web::post().to(contacts::toggle_contact))
        .route("/api/export", web::post().to(export::export_selected))
        .route("/api/notification", web::get().to(notification::get_notification))
        .route(
            "/api/notification/dismiss",
            web::post().to(notification::dismiss_notification),
        );
}

async fn health() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy"
    }))
}

#[cfg(test)]
pub(crate) mod tests {
    use actix_web::web;
    use shared_types::ContactRecord;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    use crate::export::tests::RecordingSink;
    use crate::export::{ConfiguredProbe, ContactsPicker};
    use crate::view::{ContactListView, SharedView};

    pub(crate) fn two_contacts() -> Vec<ContactRecord> {
        vec![
            ContactRecord::new(1, "Office of Student Housing", "4154226824"),
            ContactRecord::new(2, "USF Public Safety", "4154222911"),
        ]
    }

    pub(crate) fn view_data(
        contacts: Vec<ContactRecord>,
        picker: Option<Arc<dyn ContactsPicker>>,
        sink: Arc<RecordingSink>,
    ) -> web::Data<SharedView> {
        let view = ContactListView::new(contacts, Arc::new(ConfiguredProbe::new(picker)), sink);
        web::Data::new(Arc::new(Mutex::new(view)))
    }

    pub(crate) fn shared_view(sink: Arc<RecordingSink>) -> web::Data<SharedView> {
        view_data(two_contacts(), None, sink)
    }
}
