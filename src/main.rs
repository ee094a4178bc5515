//! Evenza Server — Event Management Platform Backend
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tokio::sync::watch;
use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use evenza_core::config::AppConfig;
use evenza_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("EVENZA_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Evenza v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = evenza_database::connection::DatabasePool::connect(&config.database).await?;
    let db_pool = db.into_pool();

    evenza_database::migration::run_migrations(&db_pool).await?;

    // ── Step 2: Initialize repositories ──────────────────────────
    let user_repo = Arc::new(evenza_database::repositories::user::UserRepository::new(
        db_pool.clone(),
    ));
    let event_repo = Arc::new(evenza_database::repositories::event::EventRepository::new(
        db_pool.clone(),
    ));
    let registration_repo = Arc::new(
        evenza_database::repositories::registration::RegistrationRepository::new(db_pool.clone()),
    );
    let announcement_repo = Arc::new(
        evenza_database::repositories::announcement::AnnouncementRepository::new(db_pool.clone()),
    );
    let notification_repo = Arc::new(
        evenza_database::repositories::notification::NotificationRepository::new(db_pool.clone()),
    );

    // ── Step 3: Initialize auth system ───────────────────────────
    let password_hasher = evenza_auth::password::hasher::PasswordHasher::new();
    let jwt_encoder = Arc::new(evenza_auth::jwt::encoder::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(evenza_auth::jwt::decoder::JwtDecoder::new(&config.auth));

    // ── Step 4: Initialize services ──────────────────────────────
    let auth_service = Arc::new(evenza_service::auth::service::AuthService::new(
        Arc::clone(&user_repo),
        password_hasher,
        Arc::clone(&jwt_encoder),
        Arc::clone(&jwt_decoder),
    ));
    let event_service = Arc::new(evenza_service::event::service::EventService::new(
        Arc::clone(&event_repo),
        Arc::clone(&registration_repo),
    ));
    let announcement_service = Arc::new(
        evenza_service::announcement::service::AnnouncementService::new(
            Arc::clone(&announcement_repo),
            Arc::clone(&notification_repo),
            Arc::clone(&event_repo),
            Arc::clone(&registration_repo),
        ),
    );
    let notification_service = Arc::new(
        evenza_service::notification::service::NotificationService::new(Arc::clone(
            &notification_repo,
        )),
    );

    tracing::info!("Services initialized");

    // ── Step 5: Shutdown channel ─────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Step 6: Start announcement sweep worker ──────────────────
    let worker_handle = if config.worker.enabled {
        let runner = evenza_worker::runner::SweepRunner::new(
            Arc::clone(&announcement_service),
            config.worker.clone(),
        );

        let worker_cancel = shutdown_rx.clone();
        let handle = tokio::spawn(async move {
            runner.run(worker_cancel).await;
        });

        tracing::info!("Announcement sweep worker started");
        Some(handle)
    } else {
        tracing::info!("Announcement sweep worker disabled");
        None
    };

    // ── Step 7: Build and start HTTP server ──────────────────────
    let app_state = evenza_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        jwt_decoder: Arc::clone(&jwt_decoder),
        auth_service: Arc::clone(&auth_service),
        event_service: Arc::clone(&event_service),
        announcement_service: Arc::clone(&announcement_service),
        notification_service: Arc::clone(&notification_service),
    };

    let app = evenza_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Evenza server listening on {}", addr);

    // ── Step 8: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 9: Wait for background tasks ────────────────────────
    if let Some(handle) = worker_handle {
        let _ = tokio::time::timeout(std::time::Duration::from_secs(30), handle).await;
    }

    tracing::info!("Evenza server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
