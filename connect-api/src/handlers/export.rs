use actix_web::{web, HttpResponse, Result as ActixResult};
use shared_types::ExportResponse;

use crate::view::{export_shared, SharedView};

pub async fn export_selected(view: web::Data<SharedView>) -> ActixResult<HttpResponse> {
    let (outcome, notification) = export_shared(&view).await;

    Ok(HttpResponse::Ok().json(ExportResponse {
        outcome,
        notification,
    }))
}
