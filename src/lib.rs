pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod model;
pub mod password;
pub mod response;
pub mod routes;

use actix_web::web;

use routes::{follow, message, pages, user};

/// Registers the full route table; main and the test harness share it.
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(web::scope("/user").configure(user::config))
            .service(web::scope("/message").configure(message::config))
            .service(web::scope("/follow").configure(follow::config)),
    );
    pages::config(cfg);
}
