//! Route definitions for the public `/products` (shop) resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::product;
use crate::state::AppState;

/// Routes mounted at `/products`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(product::list_shop))
        .route("/{id}", get(product::get_by_id))
}
