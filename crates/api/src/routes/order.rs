//! Route definitions for the `/orders` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::order;
use crate::state::AppState;

/// Routes mounted at `/orders`.
///
/// ```text
/// GET  /                  -> list (by user)
/// POST /from-quote        -> create_from_quote
/// POST /from-cart         -> create_from_cart
/// GET  /{id}              -> get_by_id (order + positions)
/// POST /{id}/checkout     -> finalize_checkout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(order::list))
        .route("/from-quote", post(order::create_from_quote))
        .route("/from-cart", post(order::create_from_cart))
        .route("/{id}", get(order::get_by_id))
        .route("/{id}/checkout", post(order::finalize_checkout))
}
