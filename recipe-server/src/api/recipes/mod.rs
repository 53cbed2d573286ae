//! Recipe API

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/recipes", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/download_shopping_cart", get(handler::download_shopping_cart))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .patch(handler::update)
                .delete(handler::delete),
        )
        .route(
            "/{id}/favorite",
            post(handler::add_favorite).delete(handler::remove_favorite),
        )
        .route(
            "/{id}/shopping_cart",
            post(handler::add_to_cart).delete(handler::remove_from_cart),
        )
        .route("/{id}/get-link", get(handler::get_link))
}
