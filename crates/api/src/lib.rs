//! # StudioSync API
//!
//! The web server for the studio's weekly class schedule. It serves the
//! schedule over REST, accepts edits from the admin surface, and pushes a
//! `scheduleUpdated` event to every live viewer after each successful edit.
//!
//! ## Architecture
//!
//! - **Routes**: API endpoints and URL structure
//! - **Handlers**: request extraction and response shaping
//! - **Service**: validation, persistence and notification of schedule edits
//! - **Notifier**: fan-out of change events to connected viewers
//! - **Middleware**: admin gate and error mapping
//! - **Config**: environment configuration
//!
//! The API uses Axum as the web framework; storage sits behind the
//! `ScheduleStore` trait from `studiosync-db`.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Change notification fan-out
pub mod notifier;
/// Route definitions and API endpoint structure
pub mod routes;
/// Schedule read/update operations
pub mod service;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use eyre::Result;
use studiosync_db::{
    create_pool,
    memory::InMemoryScheduleStore,
    schema::initialize_database,
    seed::seed_default_schedule,
    store::{AdminStore, PgScheduleStore, ScheduleStore},
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::{
    config::{ApiConfig, CorsOrigins, StoreBackend},
    notifier::ScheduleNotifier,
    service::ScheduleService,
};

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```rust,ignore
/// let state = Arc::new(ApiState::new(service, None));
/// let app = studiosync_api::router(state);
/// ```
pub struct ApiState {
    /// Schedule operations, including the notifier they publish to
    pub service: ScheduleService,
    /// Credential store for the admin gate; `None` leaves writes open
    pub admins: Option<Arc<dyn AdminStore>>,
}

impl ApiState {
    pub fn new(service: ScheduleService, admins: Option<Arc<dyn AdminStore>>) -> Self {
        Self { service, admins }
    }
}

/// Builds the application router with every route and the shared state.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Schedule endpoints, including the live channel
        .merge(routes::schedule::routes(Arc::clone(&state)))
        // Attach shared state to all routes
        .with_state(state)
}

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    match origins {
        CorsOrigins::Any => cors.allow_origin(Any),
        CorsOrigins::List(origins) => cors
            .allow_origin(
                origins
                    .iter()
                    .filter_map(|origin| match origin.parse::<HeaderValue>() {
                        Ok(value) => Some(value),
                        Err(_) => {
                            warn!(origin = %origin, "ignoring invalid CORS origin");
                            None
                        }
                    })
                    .collect::<Vec<_>>(),
            )
            .allow_credentials(true),
    }
}

/// Opens the configured store. Postgres stores get their schema created.
pub async fn open_store(
    config: &ApiConfig,
) -> Result<(Arc<dyn ScheduleStore>, Arc<dyn AdminStore>)> {
    match &config.store {
        StoreBackend::Postgres { database_url } => {
            let pool = create_pool(database_url).await?;
            initialize_database(&pool).await?;
            let store = Arc::new(PgScheduleStore::new(pool));
            let schedules: Arc<dyn ScheduleStore> = store.clone();
            let admins: Arc<dyn AdminStore> = store;
            Ok((schedules, admins))
        }
        StoreBackend::Memory => {
            warn!("using in-memory store, schedule changes will not survive a restart");
            let store = Arc::new(InMemoryScheduleStore::new());
            if let Some((username, password)) = &config.admin_credentials {
                store
                    .add_admin(username, &middleware::auth::hash_password(password)?)
                    .await;
            }
            let schedules: Arc<dyn ScheduleStore> = store.clone();
            let admins: Arc<dyn AdminStore> = store;
            Ok((schedules, admins))
        }
    }
}

/// Starts the API server with the provided configuration
///
/// Sets up logging, opens the store, wires the notifier into the service,
/// and serves until Ctrl-C.
pub async fn start_server(config: ApiConfig) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let (store, admins) = open_store(&config).await?;

    if config.seed_default_schedule {
        seed_default_schedule(store.as_ref()).await?;
    }

    // One notifier for the whole process, handed to the service
    let notifier = ScheduleNotifier::new(config.notifier_capacity, config.max_viewers);
    let service = ScheduleService::new(store, notifier);
    let admins = if config.admin_auth {
        info!("admin credentials required for schedule edits");
        Some(admins)
    } else {
        None
    };
    let state = Arc::new(ApiState::new(service, admins));

    let app = router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
