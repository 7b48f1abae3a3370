use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod policy;
pub mod repository;

// Routing, split by resource.
pub mod routes;
use auth::Requester;
use routes::{posts, topics};

// --- Public Re-exports ---

// Core state types for the application entry point (main.rs) and tests.
pub use config::AppConfig;
pub use error::ApiError;
pub use repository::{PostgresRepository, RepositoryState};

/// ApiDoc
///
/// Auto-generates the OpenAPI documentation for the forum surface. Aggregates
/// every handler decorated with `#[utoipa::path]` and the schemas used in
/// request/response bodies. Served as JSON at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_topics, handlers::get_topic_details, handlers::create_topic,
        handlers::update_topic, handlers::delete_topic, handlers::list_topic_posts,
        handlers::create_post, handlers::update_post, handlers::delete_post
    ),
    components(
        schemas(
            models::Topic, models::Post,
            models::CreateTopicRequest, models::UpdateTopicRequest,
            models::CreatePostRequest, models::UpdatePostRequest,
            pagination::Page<models::Topic>, pagination::Page<models::Post>,
        )
    ),
    tags(
        (name = "forum", description = "Topics and posts with role-gated moderation")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, thread-safe container holding the repository and the loaded
/// configuration. Cloned per request by axum; immutable after startup.
#[derive(Clone)]
pub struct AppState {
    /// Repository layer: persistence access behind the `ForumRepository` trait.
    pub repo: RepositoryState,
    /// Configuration: the loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// Allow extractors to pull individual components out of the shared state.

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// auth_middleware
///
/// Enforces the bearer credential on every forum route. The `Requester`
/// extractor rejects with a structured 422 before the handler runs; handlers
/// then re-extract the identity they need. Keeping the layer here means no
/// forum route can be added without passing through credential validation.
async fn auth_middleware(_requester: Requester, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// create_router
///
/// Assembles the application's routing structure, applies the middleware
/// stack, and registers the shared state.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for request correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // Forum routes: every one of them requires a valid credential.
    let forum_router = topics::topic_routes()
        .merge(posts::post_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let base_router = Router::new()
        // Documentation: serve the auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Liveness probe for monitoring and load balancer checks.
        .route("/health", axum::routing::get(|| async { "ok" }))
        // The authenticated forum surface, under its path prefix.
        .nest("/api/forum", forum_router)
        .with_state(state);

    // Observability and correlation layers, applied outermost.
    base_router
        .layer(
            ServiceBuilder::new()
                // Unique id per incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // Wrap the request/response lifecycle in a tracing span that
                // carries the request id.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // Return the generated x-request-id header to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Span factory for `TraceLayer`: includes the `x-request-id` header in the
/// structured logging metadata alongside the HTTP method and URI, so every
/// log line of a single request correlates by id.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
