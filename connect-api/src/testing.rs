use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer};

/// Starts a one-worker server on an ephemeral port that answers every
/// request with `status` and `body`. Returns its base URL.
pub(crate) fn canned_server(status: StatusCode, body: &'static str) -> (String, ServerHandle) {
    let server = HttpServer::new(move || {
        App::new().default_service(web::to(move || async move {
            HttpResponse::build(status).body(body)
        }))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    (format!("http://{addr}"), handle)
}
