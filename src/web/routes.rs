use actix_web::{http::Method, web};
use crate::web::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health_check))
        .service(
            web::resource(["/", "/chat"])
                .route(web::post().to(handlers::conversation))
                .route(web::method(Method::OPTIONS).to(handlers::conversation)),
        );
}
