pub mod account;
pub mod admin;
pub mod cart;
pub mod health;
pub mod order;
pub mod product;
pub mod project;

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /projects          customer project submission and chat
/// /orders            quote/cart orders and checkout
/// /cart              shopping cart
/// /products          shop listing
/// /addresses         stored shipping addresses
/// /payment-methods   stored payment methods
/// /catalog           materials, print profiles, categories
/// /admin             review, quoting, shop and manufacturing control
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/orders", order::router())
        .nest("/cart", cart::router())
        .nest("/products", product::router())
        .merge(account::router())
        .route("/catalog", get(catalog::catalog))
        .nest("/admin", admin::router())
}
