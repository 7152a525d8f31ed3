//! Repository for the `orders` and `order_positions` tables.
//!
//! Order creation and checkout are the operations where a reader must
//! never observe half a purchase, so every multi-statement path here is
//! one transaction.

use printforge_core::error::CoreError;
use printforge_core::status::{OrderStatus, PaymentStatus, ProjectStatus};
use printforge_core::types::DbId;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::order::{AddressSelection, CheckoutInput, Order, OrderPosition, PaymentSelection};
use crate::repositories::project_repo::{lock_project_status, update_status_in_tx};

const ORDER_COLUMNS: &str = "id, user_id, source_project_id, status, payment_status, \
     amount_cents, address_id, payment_method_id, created_at, updated_at";

const POSITION_COLUMNS: &str =
    "id, order_id, product_id, description, quantity, price_per_unit_cents, created_at";

pub struct OrderRepo;

impl OrderRepo {
    /// Start an order from an accepted quote.
    ///
    /// Idempotent per project and user: if an open (not yet finalized)
    /// order for the pair exists it is returned instead of creating a
    /// duplicate. Otherwise, in one transaction, the project is locked
    /// and must be `QUOTED_AWAITING_CUSTOMER` with a quote price, a
    /// single-line DRAFT order snapshots that price, and the project
    /// moves to `ORDER_STARTED`.
    pub async fn create_from_quote(
        pool: &PgPool,
        user_id: DbId,
        project_id: DbId,
    ) -> Result<Order, DbError> {
        let mut tx = pool.begin().await?;

        let existing_query = format!(
            "SELECT {ORDER_COLUMNS} FROM orders
             WHERE user_id = $1 AND source_project_id = $2
               AND status IN ('DRAFT', 'ORDER_CREATED')"
        );
        let existing = sqlx::query_as::<_, Order>(&existing_query)
            .bind(user_id)
            .bind(project_id)
            .fetch_optional(&mut *tx)
            .await?;
        if let Some(order) = existing {
            return Ok(order);
        }

        let status = lock_project_status(&mut tx, project_id).await?;
        if status != ProjectStatus::QuotedAwaitingCustomer {
            return Err(CoreError::StateConflict {
                entity: "project",
                current: status.as_str().to_string(),
            }
            .into());
        }

        let (owner_id, name, quantity, price_cents): (DbId, String, i32, Option<i64>) =
            sqlx::query_as(
                "SELECT user_id, name, requested_quantity, final_quote_price_cents
                 FROM projects WHERE id = $1",
            )
            .bind(project_id)
            .fetch_one(&mut *tx)
            .await?;
        if owner_id != user_id {
            return Err(CoreError::NotFound {
                entity: "project",
                id: project_id,
            }
            .into());
        }
        let price_cents = price_cents.ok_or_else(|| {
            CoreError::Internal(format!("project {project_id} is quoted but has no price"))
        })?;

        let product_id: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM products WHERE source_project_id = $1")
                .bind(project_id)
                .fetch_optional(&mut *tx)
                .await?;

        let order_query = format!(
            "INSERT INTO orders (user_id, source_project_id, status, payment_status, amount_cents)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {ORDER_COLUMNS}"
        );
        let order = sqlx::query_as::<_, Order>(&order_query)
            .bind(user_id)
            .bind(project_id)
            .bind(OrderStatus::Draft.as_str())
            .bind(PaymentStatus::PendingPayment.as_str())
            .bind(price_cents)
            .fetch_one(&mut *tx)
            .await?;

        // The quote price covers the whole requested quantity, so the
        // line carries it as one unit.
        sqlx::query(
            "INSERT INTO order_positions (order_id, product_id, description, quantity, price_per_unit_cents)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(order.id)
        .bind(product_id.map(|(id,)| id))
        .bind(format!("{name} (quantity {quantity})"))
        .bind(1)
        .bind(price_cents)
        .execute(&mut *tx)
        .await?;

        update_status_in_tx(&mut tx, project_id, ProjectStatus::OrderStarted).await?;

        tx.commit().await?;
        Ok(order)
    }

    /// Turn the user's cart into an order.
    ///
    /// Returns `None` when the cart is empty. Otherwise one transaction
    /// creates the order with amount = Σ price × quantity, one position
    /// per cart line with the unit price snapshotted, and empties the
    /// cart.
    pub async fn create_from_cart(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Order>, DbError> {
        let mut tx = pool.begin().await?;

        let items: Vec<(DbId, String, i32, i64)> = sqlx::query_as(
            "SELECT cp.product_id, p.name, cp.quantity, pp.price_cents
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
             ORDER BY cp.id
             FOR UPDATE OF cp",
        )
        .bind(user_id)
        .fetch_all(&mut *tx)
        .await?;

        if items.is_empty() {
            return Ok(None);
        }

        let amount_cents: i64 = items
            .iter()
            .map(|(_, _, quantity, price)| i64::from(*quantity) * price)
            .sum();

        let order_query = format!(
            "INSERT INTO orders (user_id, status, payment_status, amount_cents)
             VALUES ($1, $2, $3, $4)
             RETURNING {ORDER_COLUMNS}"
        );
        let order = sqlx::query_as::<_, Order>(&order_query)
            .bind(user_id)
            .bind(OrderStatus::Draft.as_str())
            .bind(PaymentStatus::PendingPayment.as_str())
            .bind(amount_cents)
            .fetch_one(&mut *tx)
            .await?;

        for (product_id, name, quantity, price_cents) in &items {
            sqlx::query(
                "INSERT INTO order_positions (order_id, product_id, description, quantity, price_per_unit_cents)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(order.id)
            .bind(product_id)
            .bind(name)
            .bind(quantity)
            .bind(price_cents)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            "DELETE FROM cart_positions
             WHERE cart_id IN (SELECT id FROM carts WHERE user_id = $1)",
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(order))
    }

    /// Commit a draft order: resolve address and payment method
    /// (reuse or create), attach them, and mark the order finalized.
    /// The source project, if any, is marked `ORDER_FINALIZED` in the
    /// same transaction.
    pub async fn finalize_checkout(
        pool: &PgPool,
        order_id: DbId,
        input: &CheckoutInput,
    ) -> Result<(Order, DbId, DbId), DbError> {
        let mut tx = pool.begin().await?;

        let row: Option<(DbId, String, Option<DbId>)> = sqlx::query_as(
            "SELECT user_id, status, source_project_id FROM orders WHERE id = $1 FOR UPDATE",
        )
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?;
        let (owner_id, status, source_project_id) = row.ok_or(CoreError::NotFound {
            entity: "order",
            id: order_id,
        })?;
        if owner_id != input.user_id {
            return Err(CoreError::NotFound {
                entity: "order",
                id: order_id,
            }
            .into());
        }
        let status = OrderStatus::try_from(status)?;
        if status != OrderStatus::Draft {
            return Err(CoreError::StateConflict {
                entity: "order",
                current: status.as_str().to_string(),
            }
            .into());
        }

        let address_id = match &input.address {
            AddressSelection::Existing { address_id } => {
                let found: Option<(DbId,)> =
                    sqlx::query_as("SELECT id FROM addresses WHERE id = $1 AND user_id = $2")
                        .bind(address_id)
                        .bind(input.user_id)
                        .fetch_optional(&mut *tx)
                        .await?;
                found
                    .ok_or(CoreError::NotFound {
                        entity: "address",
                        id: *address_id,
                    })?
                    .0
            }
            AddressSelection::New(address) => {
                let (id,): (DbId,) = sqlx::query_as(
                    "INSERT INTO addresses (user_id, recipient, street, postal_code, city, country)
                     VALUES ($1, $2, $3, $4, $5, $6)
                     RETURNING id",
                )
                .bind(input.user_id)
                .bind(&address.recipient)
                .bind(&address.street)
                .bind(&address.postal_code)
                .bind(&address.city)
                .bind(&address.country)
                .fetch_one(&mut *tx)
                .await?;
                id
            }
        };

        let payment_method_id = match &input.payment {
            PaymentSelection::Existing { payment_method_id } => {
                let found: Option<(DbId,)> = sqlx::query_as(
                    "SELECT id FROM payment_methods WHERE id = $1 AND user_id = $2",
                )
                .bind(payment_method_id)
                .bind(input.user_id)
                .fetch_optional(&mut *tx)
                .await?;
                found
                    .ok_or(CoreError::NotFound {
                        entity: "payment method",
                        id: *payment_method_id,
                    })?
                    .0
            }
            PaymentSelection::New { method } => {
                let stored = method.clone().into_stored()?;
                let (id,): (DbId,) = sqlx::query_as(
                    "INSERT INTO payment_methods (user_id, method_type, label, token)
                     VALUES ($1, $2, $3, $4)
                     RETURNING id",
                )
                .bind(input.user_id)
                .bind(stored.method_type)
                .bind(&stored.label)
                .bind(&stored.token)
                .fetch_one(&mut *tx)
                .await?;
                id
            }
        };

        let update_query = format!(
            "UPDATE orders SET
                address_id = $2,
                payment_method_id = $3,
                status = $4,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {ORDER_COLUMNS}"
        );
        let order = sqlx::query_as::<_, Order>(&update_query)
            .bind(order_id)
            .bind(address_id)
            .bind(payment_method_id)
            .bind(OrderStatus::OrderFinalized.as_str())
            .fetch_one(&mut *tx)
            .await?;

        if let Some(project_id) = source_project_id {
            // The checkout only advances a project still waiting on it.
            // A project the admin already closed out keeps its terminal
            // status.
            let project_status = lock_project_status(&mut tx, project_id).await?;
            if project_status == ProjectStatus::OrderStarted {
                update_status_in_tx(&mut tx, project_id, ProjectStatus::OrderFinalized).await?;
            }
        }

        tx.commit().await?;
        Ok((order, address_id, payment_method_id))
    }

    /// Plain status update. Setting `PAID` also forces the payment
    /// status to `PAID`; the two fields are coupled.
    pub async fn update_status(
        pool: &PgPool,
        order_id: DbId,
        new_status: OrderStatus,
    ) -> Result<Order, DbError> {
        let payment_status =
            PaymentStatus::for_order(new_status, PaymentStatus::PendingPayment);
        let query = format!(
            "UPDATE orders SET
                status = $2,
                payment_status = CASE WHEN $3 THEN $4 ELSE payment_status END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {ORDER_COLUMNS}"
        );
        let order = sqlx::query_as::<_, Order>(&query)
            .bind(order_id)
            .bind(new_status.as_str())
            .bind(new_status == OrderStatus::Paid)
            .bind(payment_status.as_str())
            .fetch_optional(pool)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "order",
                id: order_id,
            })?;
        Ok(order)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Order>, sqlx::Error> {
        let query = format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn positions(
        pool: &PgPool,
        order_id: DbId,
    ) -> Result<Vec<OrderPosition>, sqlx::Error> {
        let query = format!(
            "SELECT {POSITION_COLUMNS} FROM order_positions WHERE order_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, OrderPosition>(&query)
            .bind(order_id)
            .fetch_all(pool)
            .await
    }
}
