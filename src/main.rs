// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, database, API clients, and start HTTP server

mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod services;

use actix_web::{middleware::Logger, web, App, HttpServer};
use config::Config;
use dotenv::dotenv;
use services::{GooglePlacesClient, WeatherClient};
use std::io;
use std::time::Duration;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info,actix_web=info,sqlx=warn"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    // Missing API keys are fatal: nothing in this service works without
    // both providers
    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    log::info!("Starting globemate-places service...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Initialize database connection pool
    let pool = match config::init_db_pool(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    // 5. Construct API clients once; handlers receive them via web::Data
    let timeout = Duration::from_secs(config.http_timeout);

    let google = match GooglePlacesClient::new(config.google_api_key.clone(), timeout) {
        Ok(client) => web::Data::new(client),
        Err(e) => {
            log::error!("Failed to initialize Google Places client: {}", e);
            std::process::exit(1);
        }
    };

    let weather = match WeatherClient::new(config.open_weather_api_key.clone(), timeout) {
        Ok(client) => web::Data::new(client),
        Err(e) => {
            log::error!("Failed to initialize weather client: {}", e);
            std::process::exit(1);
        }
    };

    // 6. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);

    HttpServer::new(move || {
        App::new()
            // Application state (database pool and API clients)
            .app_data(web::Data::new(pool.clone()))
            .app_data(google.clone())
            .app_data(weather.clone())
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::places_config)
            .configure(handlers::preferences_config)
    })
    .bind(&server_addr)?
    .run()
    .await
}
