//! Handlers for the admin control surface.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use printforge_core::error::CoreError;
use printforge_core::money;
use printforge_core::pricing::{self, PricingInput};
use printforge_core::status::{AdminDecision, OrderStatus, ProjectStatus};
use printforge_core::types::DbId;
use serde::{Deserialize, Serialize};

use printforge_db::models::message::ProjectMessage;
use printforge_db::models::order::{Order, UpdateOrderStatus};
use printforge_db::models::product::Product;
use printforge_db::models::project::{Project, QuoteInput};
use printforge_db::repositories::{CatalogRepo, MessageRepo, OrderRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/admin/projects
pub async fn list_projects(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list_all(&state.pool).await?;
    Ok(Json(projects))
}

#[derive(Deserialize)]
pub struct ReviewMessageInput {
    pub body: String,
    #[serde(default)]
    pub skip_first_review: bool,
    #[serde(default)]
    pub request_file_upload: bool,
}

#[derive(Serialize)]
pub struct ReviewMessageResponse {
    pub message: ProjectMessage,
    pub status: ProjectStatus,
}

/// POST /api/v1/admin/projects/{id}/review
///
/// Appends an admin message; with `skip_first_review` the project
/// additionally moves on to `WAITING_FOR_QUOTE`. `request_file_upload`
/// only flags the message for the customer UI, it never touches the
/// status.
pub async fn send_review_message(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReviewMessageInput>,
) -> AppResult<(StatusCode, Json<ReviewMessageResponse>)> {
    if input.body.trim().is_empty() {
        return Err(CoreError::Validation("message must not be empty".to_string()).into());
    }
    let (message, status) = ProjectRepo::send_review_message(
        &state.pool,
        id,
        &input.body,
        input.skip_first_review,
        input.request_file_upload,
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(ReviewMessageResponse { message, status }),
    ))
}

#[derive(Deserialize)]
pub struct DecisionInput {
    pub decision: AdminDecision,
}

/// POST /api/v1/admin/projects/{id}/decision
///
/// The initial ACCEPT/REJECT review action. Only legal while the
/// project is still under review.
pub async fn apply_decision(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DecisionInput>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::apply_admin_decision(&state.pool, id, input.decision).await?;
    Ok(Json(project))
}

#[derive(Deserialize)]
pub struct PricingPreviewInput {
    pub print_time_min: f64,
    pub material_g: f64,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub manual_surcharge: f64,
    pub profile_id: Option<DbId>,
    pub material_name: Option<String>,
}

#[derive(Serialize)]
pub struct PricingPreviewResponse {
    pub base_cost_cents: i64,
    pub markup_factor: f64,
    pub suggested_quote_cents: i64,
}

/// POST /api/v1/admin/projects/{id}/pricing
///
/// Ad-hoc calculation preview: resolves cost constants from the
/// catalog and runs the pricing engine. Nothing is persisted; the
/// admin applies the suggestion via the quote endpoint.
pub async fn pricing_preview(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<PricingPreviewInput>,
) -> AppResult<Json<PricingPreviewResponse>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "project",
            id,
        }))?;

    let constants = CatalogRepo::cost_constants(
        &state.pool,
        input.profile_id,
        input.material_name.as_deref(),
    )
    .await?;
    let result = pricing::calculate_pricing(
        PricingInput {
            print_time_min: input.print_time_min,
            material_g: input.material_g,
            quantity: input
                .quantity
                .unwrap_or(project.requested_quantity.max(1) as u32),
            manual_surcharge: input.manual_surcharge,
        },
        constants,
    )?;

    let base_cost_cents = money::euros_to_cents(result.base_cost)?;
    let suggested_quote_cents = money::euros_to_cents(result.base_cost * result.markup_factor)?;
    Ok(Json(PricingPreviewResponse {
        base_cost_cents,
        markup_factor: result.markup_factor,
        suggested_quote_cents,
    }))
}

#[derive(Serialize)]
pub struct QuoteResponse {
    pub project: Project,
    pub product: Product,
}

/// POST /api/v1/admin/projects/{id}/quote
///
/// Finalize the quote: metrics and price land on the project, the
/// derived product and its first price row are created, all in one
/// transaction.
pub async fn finalize_quote(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<QuoteInput>,
) -> AppResult<(StatusCode, Json<QuoteResponse>)> {
    let (project, product) = ProjectRepo::finalize_quote(&state.pool, id, &input).await?;
    Ok((StatusCode::CREATED, Json(QuoteResponse { project, product })))
}

/// POST /api/v1/admin/projects/{id}/complete
pub async fn complete_project(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::complete(&state.pool, id).await?;
    Ok(Json(project))
}

/// POST /api/v1/admin/projects/{id}/messages/read
pub async fn mark_messages_read(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let marked = MessageRepo::mark_read_by_admin(&state.pool, id).await?;
    Ok(Json(serde_json::json!({ "marked_read": marked })))
}

/// PUT /api/v1/admin/orders/{id}/status
///
/// Setting `PAID` also forces the payment status to `PAID`.
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateOrderStatus>,
) -> AppResult<Json<Order>> {
    if input.status == OrderStatus::Draft {
        return Err(CoreError::Validation(
            "orders cannot be moved back to DRAFT".to_string(),
        )
        .into());
    }
    let order = OrderRepo::update_status(&state.pool, id, input.status).await?;
    Ok(Json(order))
}
