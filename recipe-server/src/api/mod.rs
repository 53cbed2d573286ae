//! HTTP API
//!
//! One module per resource; [`build_app`] adds the tower-http stack, the
//! media file service and state.

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::AppState;

pub mod auth;
pub mod health;
pub mod ingredients;
pub mod links;
pub mod recipes;
pub mod tags;
pub mod users;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Router with every API route registered (no middleware, no state)
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(recipes::router())
        .merge(tags::router())
        .merge(ingredients::router())
        .merge(users::router())
        .merge(auth::router())
        .merge(links::router())
        .merge(health::router())
}

/// Fully configured application, used by the server and by tests
pub fn build_app(state: AppState) -> Router {
    let media = ServeDir::new(state.media.root());

    build_router()
        .nest_service("/media", media)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .with_state(state)
}
