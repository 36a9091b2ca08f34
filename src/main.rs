//! Formflow server binary.
//!
//! Loads configuration, wires adapters to ports, and serves the HTTP API
//! plus the live analytics WebSocket endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, Method};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use formflow::adapters::http::{api_router, AnalyticsHandlers, FormHandlers, ResponseHandlers};
use formflow::adapters::websocket::{websocket_router, WebSocketState};
use formflow::adapters::{
    InMemoryAnalyticsStore, InMemoryEventBus, JwtSessionValidator, PostgresFormRepository,
    PostgresResponseRepository, RoomManager, WebSocketEventBridge,
};
use formflow::adapters::CsvExportService;
use formflow::application::handlers::analytics::{ExportResponsesHandler, GetAnalyticsHandler};
use formflow::application::handlers::form::{
    CreateFormHandler, GetFormHandler, ListFormsHandler, PublishFormHandler, UpdateFormHandler,
};
use formflow::application::handlers::response::SubmitResponseHandler;
use formflow::config::AppConfig;
use formflow::ports::{
    AnalyticsStore, EventPublisher, FormRepository, ResponseRepository, SessionValidator,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    tracing::info!(
        environment = ?config.server.environment,
        "starting formflow server"
    );

    // Infrastructure
    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(&config.database.url)
        .await?;

    // Adapters
    let form_repository: Arc<dyn FormRepository> =
        Arc::new(PostgresFormRepository::new(pool.clone()));
    let response_repository: Arc<dyn ResponseRepository> =
        Arc::new(PostgresResponseRepository::new(pool));
    let analytics_store: Arc<dyn AnalyticsStore> = Arc::new(InMemoryAnalyticsStore::new(
        response_repository.clone(),
    ));
    let event_bus = Arc::new(InMemoryEventBus::new());
    let event_publisher: Arc<dyn EventPublisher> = event_bus.clone();
    let session_validator: Arc<dyn SessionValidator> = Arc::new(JwtSessionValidator::new(
        config.auth.jwt_secret.clone(),
    ));

    // Live update plumbing: accepted responses fan out to form rooms.
    let room_manager = Arc::new(RoomManager::with_default_capacity());
    let bridge = WebSocketEventBridge::new_shared(room_manager.clone());
    bridge.register(event_bus.as_ref());

    // Application handlers
    let form_handlers = FormHandlers::new(
        Arc::new(CreateFormHandler::new(form_repository.clone())),
        Arc::new(UpdateFormHandler::new(form_repository.clone())),
        Arc::new(PublishFormHandler::new(
            form_repository.clone(),
            event_publisher.clone(),
        )),
        Arc::new(GetFormHandler::new(form_repository.clone())),
        Arc::new(ListFormsHandler::new(form_repository.clone())),
    );
    let response_handlers = ResponseHandlers::new(Arc::new(SubmitResponseHandler::new(
        form_repository.clone(),
        response_repository.clone(),
        analytics_store.clone(),
        event_publisher,
    )));
    let analytics_handlers = AnalyticsHandlers::new(
        Arc::new(GetAnalyticsHandler::new(
            form_repository.clone(),
            analytics_store,
        )),
        Arc::new(ExportResponsesHandler::new(
            form_repository,
            response_repository,
            Arc::new(CsvExportService::new()),
        )),
    );

    // Router
    let cors = cors_layer(&config);
    let app = api_router(
        form_handlers,
        response_handlers,
        analytics_handlers,
        session_validator,
    )
    .merge(websocket_router(WebSocketState::new(room_manager)))
    .layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.server.request_timeout_secs,
            )))
            .layer(cors),
    );

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins = config.server.cors_origins_list();
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer.allow_origin(origins)
    }
}
