use std::sync::Arc;
use tokio::signal;
use tracing::info;

use palabras_core::{PalabrasGame, ScoreLedger, WordCatalog};
use palabras_persistence::{
    open_points_store, open_word_source, repositories::WordRepository,
};
use palabras_server::{config::Config, create_routes, game_manager::GameManager};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Palabras server...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    let game_config = match config.game_config() {
        Ok(game_config) => game_config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    // The game cannot run without words
    let word_location = config
        .words_url
        .clone()
        .unwrap_or_else(|| config.words_file.display().to_string());
    info!("Loading words from {}", word_location);

    let word_source = open_word_source(&config.words_file, config.words_url.as_deref());
    let catalog = match WordCatalog::load(word_source.as_ref()).await {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!("Failed to load words from '{}': {}", word_location, e);
            tracing::error!(
                "Set WORDS_FILE or WORDS_URL to a document of the form {{\"words\": [...]}}."
            );
            std::process::exit(1);
        }
    };

    let points_store = match open_points_store(
        &config.points_file,
        config.points_backup_file.as_deref(),
    ) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open points store: {:#}", e);
            std::process::exit(1);
        }
    };
    let ledger = ScoreLedger::load(points_store);
    info!(
        "Points loaded: {} stars, best streak {}",
        ledger.total_stars(),
        ledger.max_streak()
    );

    let game = PalabrasGame::new(catalog, ledger, game_config);
    let game_manager = Arc::new(GameManager::new(game));
    let word_repository = Arc::new(WordRepository::new(word_source));

    let routes = create_routes(game_manager, word_repository, config.public_dir.clone());

    info!("Server starting on {}:{}", config.host, config.port);

    let (addr, server) = warp::serve(routes)
        .bind_with_graceful_shutdown((config.host, config.port), shutdown_signal());

    info!(
        "Server started successfully on http://{}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use signal::unix::{SignalKind, signal};

        match (
            signal(SignalKind::interrupt()),
            signal(SignalKind::terminate()),
        ) {
            (Ok(mut sigint), Ok(mut sigterm)) => {
                tokio::select! {
                    _ = sigint.recv() => {
                        info!("Received SIGINT, shutting down gracefully...");
                    }
                    _ = sigterm.recv() => {
                        info!("Received SIGTERM, shutting down gracefully...");
                    }
                }
                return;
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!("Failed to install signal handlers: {}", e);
            }
        }
    }

    match signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down gracefully..."),
        Err(e) => {
            tracing::error!("Failed to listen for ctrl+c: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
