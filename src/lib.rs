//! MySlide content backend.
//!
//! Serves the agency site's quotes, resources, portfolio and internal guidelines
//! from a document store, and gates the admin mutations behind a login.

pub mod api;
pub mod config;
pub mod errors;
pub mod gateway;
pub mod models;
pub mod rotation;
pub mod session;
pub mod store;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use gateway::ContentGateway;
use models::{Quote, Resource, SlideWork};
use rotation::QuoteRotation;
use session::SessionGate;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<ContentGateway>,
    pub sessions: Arc<SessionGate>,
    pub rotation: QuoteRotation,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wire up state around an opened gateway; rotation is activated now.
    pub fn new(config: Config, gateway: ContentGateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
            sessions: Arc::new(SessionGate::new(config.admin_credentials.clone())),
            rotation: QuoteRotation::new(config.quote_rotation),
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let gate = state.sessions.clone();
    let session_layer = middleware::from_fn(move |req, next| {
        session::session_layer(gate.clone(), req, next)
    });

    // Everything below requires an open session
    let admin_routes = Router::new()
        .route("/quotes", post(api::create_record::<Quote>))
        .route(
            "/quotes/{id}",
            patch(api::update_record::<Quote>).delete(api::delete_record::<Quote>),
        )
        .route("/resources", post(api::create_record::<Resource>))
        .route(
            "/resources/{id}",
            patch(api::update_record::<Resource>).delete(api::delete_record::<Resource>),
        )
        .route("/portfolio", post(api::create_record::<SlideWork>))
        .route(
            "/portfolio/{id}",
            patch(api::update_record::<SlideWork>).delete(api::delete_record::<SlideWork>),
        )
        .route("/guidelines", put(api::save_guidelines))
        .layer(session_layer.clone());

    // Public reads, login, and logout (which needs a session)
    let public_routes = Router::new()
        .route("/content", get(api::get_content))
        .route("/guidelines", get(api::get_guidelines))
        .route("/quotes/current", get(api::get_current_quote))
        .route(
            "/session",
            post(api::login).merge(delete(api::logout).route_layer(session_layer)),
        );

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", public_routes.nest("/admin", admin_routes))
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
