//! Repository for the `carts` and `cart_positions` tables.

use printforge_core::error::CoreError;
use printforge_core::types::DbId;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::cart::{AddCartItem, CartItem};

pub struct CartRepo;

impl CartRepo {
    /// Add a product to the user's cart, creating the cart lazily and
    /// summing quantities on repeated adds.
    pub async fn add_item(
        pool: &PgPool,
        user_id: DbId,
        input: &AddCartItem,
    ) -> Result<(), DbError> {
        if input.quantity <= 0 {
            return Err(CoreError::Validation(
                "quantity must be at least 1".to_string(),
            )
            .into());
        }

        let mut tx = pool.begin().await?;

        let (cart_id,): (DbId,) = sqlx::query_as(
            "INSERT INTO carts (user_id) VALUES ($1)
             ON CONFLICT ON CONSTRAINT uq_carts_user DO UPDATE SET user_id = EXCLUDED.user_id
             RETURNING id",
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO cart_positions (cart_id, product_id, quantity)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_cart_positions_cart_product
             DO UPDATE SET quantity = cart_positions.quantity + EXCLUDED.quantity",
        )
        .bind(cart_id)
        .bind(input.product_id)
        .bind(input.quantity)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Remove a product from the user's cart. Returns `true` when a
    /// line was removed.
    pub async fn remove_item(
        pool: &PgPool,
        user_id: DbId,
        product_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM cart_positions
             WHERE product_id = $2
               AND cart_id IN (SELECT id FROM carts WHERE user_id = $1)",
        )
        .bind(user_id)
        .bind(product_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Cart lines joined to product name and newest price, the shape
    /// an order is created from.
    pub async fn items_with_current_price(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<CartItem>, sqlx::Error> {
        sqlx::query_as::<_, CartItem>(
            "SELECT cp.product_id, p.name AS product_name, cp.quantity, pp.price_cents
             FROM carts c
             JOIN cart_positions cp ON cp.cart_id = c.id
             JOIN products p ON p.id = cp.product_id
             JOIN LATERAL (
                 SELECT price_cents FROM product_prices
                 WHERE product_id = cp.product_id
                 ORDER BY created_at DESC, id DESC
                 LIMIT 1
             ) pp ON TRUE
             WHERE c.user_id = $1
             ORDER BY cp.id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
