//! Route definitions for stored addresses and payment methods.

use axum::routing::get;
use axum::Router;

use crate::handlers::account;
use crate::state::AppState;

/// Merged into `/api/v1` directly (no nesting prefix).
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/addresses",
            get(account::list_addresses).post(account::create_address),
        )
        .route(
            "/payment-methods",
            get(account::list_payment_methods).post(account::create_payment_method),
        )
}
