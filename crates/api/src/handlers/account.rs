//! Handlers for stored customer data: addresses and payment methods.
//!
//! Both feed the checkout UI so a returning customer can pick an
//! existing entry instead of retyping it.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use printforge_core::types::DbId;
use serde::Deserialize;

use printforge_db::models::address::{Address, CreateAddress};
use printforge_db::models::payment_method::{NewPaymentMethod, PaymentMethod};
use printforge_db::repositories::{AddressRepo, PaymentMethodRepo};

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserQuery {
    pub user_id: DbId,
}

/// GET /api/v1/addresses?user_id=
pub async fn list_addresses(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> AppResult<Json<Vec<Address>>> {
    let addresses = AddressRepo::list_for_user(&state.pool, query.user_id).await?;
    Ok(Json(addresses))
}

#[derive(Deserialize)]
pub struct NewAddressInput {
    pub user_id: DbId,
    #[serde(flatten)]
    pub address: CreateAddress,
}

/// POST /api/v1/addresses
pub async fn create_address(
    State(state): State<AppState>,
    Json(input): Json<NewAddressInput>,
) -> AppResult<(StatusCode, Json<Address>)> {
    let address = AddressRepo::create(&state.pool, input.user_id, &input.address).await?;
    Ok((StatusCode::CREATED, Json(address)))
}

/// GET /api/v1/payment-methods?user_id=
pub async fn list_payment_methods(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> AppResult<Json<Vec<PaymentMethod>>> {
    let methods = PaymentMethodRepo::list_for_user(&state.pool, query.user_id).await?;
    Ok(Json(methods))
}

#[derive(Deserialize)]
pub struct NewPaymentMethodInput {
    pub user_id: DbId,
    #[serde(flatten)]
    pub method: NewPaymentMethod,
}

/// POST /api/v1/payment-methods
///
/// Validates and masks the method before anything hits the database;
/// raw card numbers are never stored.
pub async fn create_payment_method(
    State(state): State<AppState>,
    Json(input): Json<NewPaymentMethodInput>,
) -> AppResult<(StatusCode, Json<PaymentMethod>)> {
    let stored = input.method.into_stored()?;
    let method = PaymentMethodRepo::create(&state.pool, input.user_id, &stored).await?;
    Ok((StatusCode::CREATED, Json(method)))
}
