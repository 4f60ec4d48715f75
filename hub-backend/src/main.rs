//! Local hub: clipboard, todo.txt, notes and process metrics over HTTP for a
//! single user's browser frontend on the LAN.

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

mod clipboard;
mod config;
mod controllers;
mod error;
mod metrics;
mod notes;
mod todos;

use clipboard::ClipboardStore;
use config::Config;
use notes::NoteStore;
use todos::TodoFile;

#[global_allocator]
static ALLOCATOR: metrics::CountingAllocator = metrics::CountingAllocator;

pub struct AppState {
    pub config: Config,
    /// Expiring in-memory clipboard, swept in the background
    pub clipboard: Arc<ClipboardStore>,
    pub notes: Arc<NoteStore>,
    pub todos: Arc<TodoFile>,
    /// Server start time for uptime calculation
    pub started_at: std::time::Instant,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    log::info!("Local hub v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using data directory: {}", config.data_dir.display());
    config.ensure_data_dirs();

    let clipboard = Arc::new(ClipboardStore::new());
    let notes = Arc::new(NoteStore::new(config.notes_dir()));
    let todos = Arc::new(TodoFile::new(config.todo_file()));

    // Start clipboard sweeper background task
    let sweeper_shutdown = CancellationToken::new();
    let sweeper_handle =
        clipboard.start_sweeper(config.clipboard_sweep_interval, sweeper_shutdown.clone());
    log::info!(
        "Clipboard sweeper running every {}s",
        config.clipboard_sweep_interval.as_secs()
    );

    let web_dist = config.web_dist.clone();
    let serve_frontend = web_dist.is_dir();
    if serve_frontend {
        log::info!("Serving frontend from: {}", web_dist.display());
    } else {
        log::warn!("Frontend dir {} not found, static files disabled", web_dist.display());
    }

    let bind = (config.host.clone(), config.port);
    let started_at = std::time::Instant::now();
    let state = web::Data::new(AppState {
        config,
        clipboard,
        notes,
        todos,
        started_at,
    });

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        let mut app = App::new()
            .app_data(state.clone())
            .app_data(controllers::json_config())
            .app_data(controllers::query_config())
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config_routes)
            .configure(controllers::metrics::config)
            .configure(controllers::clipboard::config)
            .configure(controllers::notes::config)
            .configure(controllers::todos::config);

        // Static frontend last so API routes win
        if serve_frontend {
            app = app.service(Files::new("/", web_dist.clone()).index_file("index.html"));
        }

        app
    })
    .disable_signals()
    .bind(bind.clone())?
    .run();

    log::info!("Listening on http://{}:{}", bind.0, bind.1);

    let server_handle = server.handle();

    // Spawn Ctrl+C handler
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        log::info!("Received Ctrl+C, shutting down...");

        sweeper_shutdown.cancel();
        if let Err(e) = sweeper_handle.await {
            log::warn!("Clipboard sweeper ended abnormally: {}", e);
        }

        log::info!("Stopping HTTP server...");
        let server_stop = server_handle.stop(true);
        if tokio::time::timeout(std::time::Duration::from_secs(5), server_stop)
            .await
            .is_err()
        {
            log::warn!("Timeout waiting for HTTP server to stop, forcing exit...");
        }

        log::info!("Shutdown complete");
    });

    server.await
}
