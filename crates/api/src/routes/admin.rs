//! Route definitions for the admin control surface.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{admin, manufacturing, product};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /projects                          -> list_projects
/// POST   /projects/{id}/review              -> send_review_message
/// POST   /projects/{id}/decision            -> apply_decision (ACCEPT/REJECT)
/// POST   /projects/{id}/pricing             -> pricing_preview
/// POST   /projects/{id}/quote               -> finalize_quote
/// POST   /projects/{id}/complete            -> complete_project
/// POST   /projects/{id}/messages/read       -> mark_messages_read
///
/// POST   /projects/{id}/manufacturing        -> load_to_manufacturing
/// DELETE /projects/{id}/manufacturing        -> delete_blueprint
/// PUT    /projects/{id}/manufacturing/status -> update_blueprint_status
/// PUT    /projects/{id}/bom                  -> store_bom
/// POST   /projects/{id}/production-jobs      -> expand_bom
/// GET    /projects/{id}/production-jobs      -> list_project_jobs
/// GET    /blueprints                         -> list_blueprints
/// GET    /production-jobs                    -> list_jobs
/// PUT    /production-jobs/{id}/status        -> update_job_status
/// PUT    /production-jobs/{id}/printer       -> assign_printer
///
/// POST   /products                           -> create (with first price)
/// POST   /products/{id}/prices               -> add_price
/// GET    /products/{id}/prices               -> list_prices
/// PUT    /orders/{id}/status                 -> update_order_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", get(admin::list_projects))
        .route("/projects/{id}/review", post(admin::send_review_message))
        .route("/projects/{id}/decision", post(admin::apply_decision))
        .route("/projects/{id}/pricing", post(admin::pricing_preview))
        .route("/projects/{id}/quote", post(admin::finalize_quote))
        .route("/projects/{id}/complete", post(admin::complete_project))
        .route(
            "/projects/{id}/messages/read",
            post(admin::mark_messages_read),
        )
        .route(
            "/projects/{id}/manufacturing",
            post(manufacturing::load_to_manufacturing)
                .delete(manufacturing::delete_blueprint),
        )
        .route(
            "/projects/{id}/manufacturing/status",
            put(manufacturing::update_blueprint_status),
        )
        .route("/projects/{id}/bom", put(manufacturing::store_bom))
        .route(
            "/projects/{id}/production-jobs",
            post(manufacturing::expand_bom).get(manufacturing::list_project_jobs),
        )
        .route("/blueprints", get(manufacturing::list_blueprints))
        .route("/production-jobs", get(manufacturing::list_jobs))
        .route(
            "/production-jobs/{id}/status",
            put(manufacturing::update_job_status),
        )
        .route(
            "/production-jobs/{id}/printer",
            put(manufacturing::assign_printer),
        )
        .route("/products", post(product::create))
        .route(
            "/products/{id}/prices",
            post(product::add_price).get(product::list_prices),
        )
        .route("/orders/{id}/status", put(admin::update_order_status))
}
