pub mod auth;
pub mod docs;
pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;

use crate::errors;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(errors::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(errors::path_error_handler))
        .service(
            web::scope("/api")
                .route("", web::get().to(docs::api_docs))
                .service(health::health_check)
                .configure(auth::auth_routes)
                .configure(users::users_routes)
                .configure(tasks::tasks_routes),
        )
        .default_service(web::to(docs::not_found));
}
