use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use dotenv::dotenv;

mod api;
mod config;
mod db;
mod error;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv().ok();

    env_logger::init();

    let config = config::AppConfig::new().context("failed to load configuration")?;

    log::info!(
        "Starting server on {}:{} with {:?} storage",
        config.server.host,
        config.server.port,
        config.database.backend
    );

    let store = db::connect(&config.database)
        .await
        .context("failed to initialize video storage")?;

    let docs_enabled = config.docs.enabled;
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::from(store.clone()))
            .wrap(Logger::default())
            .wrap(actix_cors::Cors::permissive()) // Configure properly in production
            .configure(|cfg| api::configure(cfg, docs_enabled))
    })
    .bind((config.server.host.clone(), config.server.port))?
    .run()
    .await?;

    Ok(())
}
