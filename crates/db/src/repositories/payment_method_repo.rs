//! Repository for the `payment_methods` table.

use printforge_core::types::DbId;
use sqlx::PgPool;

use crate::models::payment_method::{PaymentMethod, StoredPaymentMethod};

const COLUMNS: &str = "id, user_id, method_type, label, token, created_at";

pub struct PaymentMethodRepo;

impl PaymentMethodRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        stored: &StoredPaymentMethod,
    ) -> Result<PaymentMethod, sqlx::Error> {
        let query = format!(
            "INSERT INTO payment_methods (user_id, method_type, label, token)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PaymentMethod>(&query)
            .bind(user_id)
            .bind(stored.method_type)
            .bind(&stored.label)
            .bind(&stored.token)
            .fetch_one(pool)
            .await
    }

    /// Find a payment method, scoped to its owner.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<PaymentMethod>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM payment_methods WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, PaymentMethod>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<PaymentMethod>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payment_methods WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, PaymentMethod>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
