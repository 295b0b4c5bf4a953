use actix_web::{web, HttpResponse, Result as ActixResult};
use shared_types::NotificationResponse;

use crate::view::SharedView;

pub async fn get_notification(view: web::Data<SharedView>) -> ActixResult<HttpResponse> {
    let view = view.lock().await;

    Ok(HttpResponse::Ok().json(NotificationResponse {
        notification: view.notification().cloned(),
    }))
}

pub async fn dismiss_notification(view: web::Data<SharedView>) -> ActixResult<HttpResponse> {
    view.lock().await.dismiss_notification();

    Ok(HttpResponse::Ok().json(NotificationResponse { notification: None }))
}
