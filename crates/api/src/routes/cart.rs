//! Route definitions for the `/cart` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::cart;
use crate::state::AppState;

/// Routes mounted at `/cart`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::view))
        .route("/items", post(cart::add_item))
        .route("/items/{product_id}", delete(cart::remove_item))
}
