//! User API: registration, profiles, avatar and subscriptions

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list).post(handler::register))
        .route("/me", get(handler::me))
        .route("/set_password", post(handler::set_password))
        .route(
            "/me/avatar",
            get(handler::get_avatar)
                .put(handler::set_avatar)
                .delete(handler::delete_avatar),
        )
        .route("/subscriptions", get(handler::subscriptions))
        .route("/{id}", get(handler::get_by_id))
        .route(
            "/{id}/subscribe",
            get(handler::subscription_card)
                .post(handler::subscribe)
                .delete(handler::unsubscribe),
        )
}
