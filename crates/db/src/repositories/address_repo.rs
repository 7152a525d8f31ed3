//! Repository for the `addresses` table.

use printforge_core::types::DbId;
use sqlx::PgPool;

use crate::models::address::{Address, CreateAddress};

const COLUMNS: &str = "id, user_id, recipient, street, postal_code, city, country, created_at";

pub struct AddressRepo;

impl AddressRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateAddress,
    ) -> Result<Address, sqlx::Error> {
        let query = format!(
            "INSERT INTO addresses (user_id, recipient, street, postal_code, city, country)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Address>(&query)
            .bind(user_id)
            .bind(&input.recipient)
            .bind(&input.street)
            .bind(&input.postal_code)
            .bind(&input.city)
            .bind(&input.country)
            .fetch_one(pool)
            .await
    }

    /// Find an address, scoped to its owner.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Address>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM addresses WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Address>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Address>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM addresses WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Address>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
