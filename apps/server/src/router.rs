use axum::Router;
use ihub::kernel::prelude::ApiState;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
struct ApiDoc;

/// Assembles the full HTTP surface: every slice router plus the system
/// routes, wrapped in request tracing, with the interactive documentation
/// served at `/api`.
#[allow(unreachable_pub)]
pub fn init(state: ApiState) -> Router {
    let (api_routes, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(ihub::server::router::api_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .split_for_parts();

    Router::new().merge(api_routes).merge(Scalar::with_url("/api", api_doc))
}
