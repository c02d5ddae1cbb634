use actix_web::{middleware, web, App, HttpServer};
use log::info;

use warbler_backend::config::AppConfig;
use warbler_backend::configure_app;
use warbler_backend::db::connect_db;
use warbler_backend::response::json_error_handler;
use warbler_backend::routes::cors;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    let config = AppConfig::from_env();
    let db = connect_db(&config).await;
    let server_port = config.server_port;

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(db.clone()))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .wrap(middleware::Logger::default())
            .wrap(actix_web::middleware::from_fn(cors::cors_handler))
            .configure(configure_app)
    })
    .bind(("0.0.0.0", server_port))?;
    info!("server started at http://0.0.0.0:{}", server_port);
    server.run().await
}
