use actix_web::{http::header, web, HttpResponse, Result as ActixResult};

use crate::view::{export_shared, SharedView};

pub async fn index(view: web::Data<SharedView>) -> ActixResult<HttpResponse> {
    let html = view.lock().await.render();

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

pub async fn toggle(
    view: web::Data<SharedView>,
    path: web::Path<u32>,
) -> ActixResult<HttpResponse> {
    view.lock().await.toggle(path.into_inner());
    Ok(back_to_index())
}

pub async fn export(view: web::Data<SharedView>) -> ActixResult<HttpResponse> {
    export_shared(&view).await;
    Ok(back_to_index())
}

pub async fn dismiss(view: web::Data<SharedView>) -> ActixResult<HttpResponse> {
    view.lock().await.dismiss_notification();
    Ok(back_to_index())
}

fn back_to_index() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish()
}
