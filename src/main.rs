use crate::config::Config;
use crate::services::SearchService;
use actix_rt::signal::unix;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use futures_lite::FutureExt;
use itunes_catalog::ItunesClient;
use std::io::{Error, ErrorKind};
use std::sync::Arc;
use tracing::{error, info};

mod config;
mod http;
mod services;
mod storage;
mod types;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    let mut terminate = unix::signal(unix::SignalKind::terminate())?;
    let mut interrupt = unix::signal(unix::SignalKind::interrupt())?;

    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env().map_err(|error| {
        error!(?error, "Invalid configuration");
        Error::new(ErrorKind::InvalidInput, error)
    })?;

    info!("Starting application...");

    let catalog_client = ItunesClient::create(&config.catalog_endpoint, config.request_timeout())
        .map_err(|error| {
            error!(?error, "Unable to initialize catalog client");
            Error::new(ErrorKind::InvalidInput, error)
        })?;
    let endpoint = catalog_client.endpoint().clone();
    let search_service = Arc::new(SearchService::new(
        Arc::new(catalog_client),
        endpoint,
        config.session_ttl(),
    ));

    let shutdown_timeout = config.shutdown_timeout;
    let bind_address = config.bind_address.clone();

    let server = HttpServer::new({
        move || {
            App::new()
                .app_data(Data::from(Arc::clone(&search_service)))
                .configure(http::configure)
        }
    })
    .shutdown_timeout(shutdown_timeout)
    .bind(bind_address)?
    .run();

    let server_handle = server.handle();

    actix_rt::spawn({
        async move {
            if let Err(error) = server.await {
                error!(?error, "Error on http server");
            }
        }
    });

    info!(catalog_endpoint = %config.catalog_endpoint, "Application started");

    interrupt.recv().or(terminate.recv()).await;

    info!("Received shutdown signal. Shutting down gracefully...");

    server_handle.stop(true).await;

    Ok(())
}
