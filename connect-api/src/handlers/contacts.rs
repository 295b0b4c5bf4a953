use actix_web::{web, HttpResponse, Result as ActixResult};
use shared_types::ContactsResponse;

use crate::view::SharedView;

pub async fn list_contacts(view: web::Data<SharedView>) -> ActixResult<HttpResponse> {
    let view = view.lock().await;

    Ok(HttpResponse::Ok().json(ContactsResponse {
        contacts: view.contacts().to_vec(),
    }))
}

/// Unknown ids leave the list unchanged and still answer 200.
pub async fn toggle_contact(
    view: web::Data<SharedView>,
    path: web::Path<u32>,
) -> ActixResult<HttpResponse> {
    let contact_id = path.into_inner();
    let mut view = view.lock().await;
    view.toggle(contact_id);

    Ok(HttpResponse::Ok().json(ContactsResponse {
        contacts: view.contacts().to_vec(),
    }))
}
