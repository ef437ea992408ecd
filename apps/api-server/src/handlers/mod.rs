//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::web;

use crate::middleware::error::{json_error_handler, query_error_handler};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .content_type_required(false)
            .error_handler(json_error_handler),
    )
    .app_data(web::QueryConfig::default().error_handler(query_error_handler))
    .route("/health", web::get().to(health::health_check))
    // Tenant-scoped post routes
    .service(
        web::scope("/tenant/{tenant_id}/posts")
            .route("", web::get().to(posts::list))
            .route("", web::post().to(posts::create))
            .route("/{slug}", web::get().to(posts::get))
            .route("/{slug}", web::delete().to(posts::delete))
            .route("/{slug}", web::post().to(posts::update))
            .route("/{slug}/publish", web::put().to(posts::publish)),
    );
}
