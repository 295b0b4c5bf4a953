use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_subscriber::prelude::*;

use connect_api::config::ConnectConfig;
use connect_api::export::{CapabilityProbe, ConfiguredProbe, DirectoryDownloads, DownloadSink};
use connect_api::handlers;
use connect_api::store::FirestoreSource;
use connect_api::view::populate;
use connect_api::{ContactListView, ContactStore, SharedView};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long)]
    log_file_path: Option<String>,

    /// Use this config file instead of the per-user default
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_tracing(args.log_file_path.as_deref());

    let (config, config_path) =
        ConnectConfig::load(args.config.as_deref()).context("Failed to load config")?;
    tracing::info!("Loaded config from {:?}", config_path);

    if config.source.project_id.is_empty() {
        tracing::warn!("No source.project_id configured; the contact fetch will fail");
    }

    let source = FirestoreSource::new(
        &config.source.base_url,
        &config.source.project_id,
        config.source.api_key.clone(),
    );
    let store = ContactStore::new(Box::new(source), config.source.collection.clone());

    let probe: Arc<dyn CapabilityProbe> =
        Arc::new(ConfiguredProbe::from_endpoint(config.native_endpoint()));
    if probe.native_contacts().is_some() {
        tracing::info!("Native contacts capability enabled");
    } else {
        tracing::info!(
            "No native contacts capability; exporting vCards to {:?}",
            config.downloads_directory()
        );
    }
    let downloads: Arc<dyn DownloadSink> =
        Arc::new(DirectoryDownloads::new(config.downloads_directory()));

    let view: SharedView = Arc::new(Mutex::new(
        ContactListView::new(Vec::new(), probe, downloads)
            .with_notification_timeout(config.notification_timeout()),
    ));

    // The page is served while the fetch is in flight; the list fills in
    // once it settles.
    tokio::spawn(populate(view.clone(), store));

    let (host, port) = config.bind_address();
    tracing::info!("Server will listen on {}:{}", host, port);

    let cors_config = config.cors.clone();
    let server = HttpServer::new(move || {
        let cors = match &cors_config {
            Some(cors_config) => {
                let mut cors_builder = Cors::default();
                for origin in &cors_config.allowed_origins {
                    cors_builder = cors_builder.allowed_origin(origin);
                }
                cors_builder
            }
            None => Cors::default().allow_any_origin(),
        }
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec!["Accept", "Content-Type"])
        .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(view.clone()))
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))
    .with_context(|| format!("Failed to bind {}:{}", host, port))?
    .run();

    let handle = server.handle();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }

        tracing::info!("Ctrl+C received, shutting down...");
        handle.stop(true).await;
    });

    server.await?;
    Ok(())
}

fn init_tracing(log_file_path: Option<&str>) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = log_file_path {
        let log_path = std::path::Path::new(log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("kikis-connect.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        // The writer must outlive every log call for the whole process.
        std::mem::forget(guard);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}
