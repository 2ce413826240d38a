mod config;
mod routes;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use config::ServerConfig;
use routes::configure_routes;
use shared::ClientConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env().map_err(|e| {
        log::error!("Invalid server configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    log::info!("Serving frontend from {}", config.frontend_dir.display());
    if !config.frontend_dir.join("index.html").exists() {
        log::warn!("No index.html in the frontend directory. Build the frontend with `trunk build`.");
    }
    log::info!("Detection service: {}", config.detection_endpoint);

    let client_config = ClientConfig::from(&config.detection_endpoint);
    let frontend_dir = config.frontend_dir.clone();
    let bind_address = config.bind_address();

    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(client_config.clone()))
            .configure(|cfg| configure_routes(cfg, frontend_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
