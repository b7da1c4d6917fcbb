use std::sync::Arc;

use tracing::{error, info};

use letterdesk::web::handlers::AppState;
use letterdesk::web::middleware::JwtState;
use letterdesk::web::router::create_router;
use letterdesk::{Config, Database};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    // Initialize logging
    if let Err(e) = letterdesk::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        letterdesk::logging::init_console_only(&config.logging.level);
    }

    info!("Letterdesk - campus letter service");

    // The storage handle is process-wide: opened once here, closed at
    // shutdown, and a failure to open terminates the process.
    let db = match Database::open(&config.database.path).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Failed to open database: {e}");
            std::process::exit(1);
        }
    };

    let app_state = Arc::new(AppState::new(
        db.clone(),
        &config.web.jwt_secret,
        config.web.jwt_access_token_expiry_secs,
    ));
    let jwt_state = Arc::new(JwtState::new(&config.web.jwt_secret));

    let router = create_router(app_state, jwt_state, &config.web.cors_origins);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };

    info!("Listening on {addr}");

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {e}");
    }

    db.close().await;
}
