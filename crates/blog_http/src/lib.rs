//! HTTP adapter for the blog entity store.
//!
//! # Responsibility
//! - Map JSON requests on `/users`, `/posts` and `/comments` to store calls.
//! - Map store outcomes to status codes (201/200, 404, 409, 422, 500).
//!
//! # Invariants
//! - Every request runs on its own session opened by [`SessionFactory`].
//! - Handlers hold no state between requests.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod session;

pub use error::ApiError;
pub use session::SessionFactory;

use actix_web::web;

/// Registers extractor error handlers and every blog route.
///
/// Callers provide `web::Data<SessionFactory>` as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::path_config())
        .app_data(error::query_config())
        .service(web::resource("/users").route(web::post().to(handlers::users::create_user)))
        .service(
            web::resource("/users/{user_id}")
                .route(web::get().to(handlers::users::get_user))
                .route(web::patch().to(handlers::users::update_user))
                .route(web::delete().to(handlers::users::delete_user)),
        )
        .service(web::resource("/posts").route(web::post().to(handlers::posts::create_post)))
        .service(
            web::resource("/posts/{post_id}")
                .route(web::get().to(handlers::posts::get_post))
                .route(web::patch().to(handlers::posts::update_post))
                .route(web::delete().to(handlers::posts::delete_post)),
        )
        .service(
            web::resource("/comments").route(web::post().to(handlers::comments::create_comment)),
        )
        .service(
            web::resource("/comments/{comment_id}")
                .route(web::get().to(handlers::comments::get_comment))
                .route(web::patch().to(handlers::comments::update_comment))
                .route(web::delete().to(handlers::comments::delete_comment)),
        );
}
