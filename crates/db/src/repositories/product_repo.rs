//! Repository for the `products` and `product_prices` tables.

use printforge_core::types::DbId;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::product::{CreateProduct, Product, ProductPrice, ShopProduct};

pub(crate) const PRODUCT_COLUMNS: &str = "id, user_id, category_id, source_project_id, name, \
     description, material_type, color, weight_g, print_time_min, stock_quantity, is_active, \
     shop_visible, image_path, created_at";

pub struct ProductRepo;

impl ProductRepo {
    /// Create a shop product with its first price-history row in one
    /// transaction. A product without a price is never visible.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, DbError> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO products (user_id, category_id, name, description, material_type,
                                   color, weight_g, print_time_min, stock_quantity, shop_visible, image_path)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {PRODUCT_COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(input.user_id)
            .bind(input.category_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.material_type)
            .bind(&input.color)
            .bind(input.weight_g)
            .bind(input.print_time_min)
            .bind(input.stock_quantity)
            .bind(input.shop_visible)
            .bind(&input.image_path)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO product_prices (product_id, price_cents) VALUES ($1, $2)")
            .bind(product.id)
            .bind(input.price_cents)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(product)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_source_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE source_project_id = $1"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Shop listing: active, shop-visible products with their newest
    /// price.
    pub async fn list_shop(pool: &PgPool) -> Result<Vec<ShopProduct>, sqlx::Error> {
        sqlx::query_as::<_, ShopProduct>(
            "SELECT p.id, p.name, p.description, p.category_id, p.color, p.image_path,
                    p.stock_quantity, pp.price_cents
             FROM products p
             JOIN LATERAL (
                 SELECT price_cents FROM product_prices
                 WHERE product_id = p.id
                 ORDER BY created_at DESC, id DESC
                 LIMIT 1
             ) pp ON TRUE
             WHERE p.is_active AND p.shop_visible
             ORDER BY p.name",
        )
        .fetch_all(pool)
        .await
    }

    /// The newest price of a product, if it has any.
    pub async fn current_price_cents(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Option<i64>, sqlx::Error> {
        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT price_cents FROM product_prices
             WHERE product_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT 1",
        )
        .bind(product_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(cents,)| cents))
    }

    /// Append a new price-history row; older rows are never touched.
    pub async fn add_price(
        pool: &PgPool,
        product_id: DbId,
        price_cents: i64,
    ) -> Result<ProductPrice, sqlx::Error> {
        sqlx::query_as::<_, ProductPrice>(
            "INSERT INTO product_prices (product_id, price_cents)
             VALUES ($1, $2)
             RETURNING id, product_id, price_cents, created_at",
        )
        .bind(product_id)
        .bind(price_cents)
        .fetch_one(pool)
        .await
    }

    pub async fn price_history(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<ProductPrice>, sqlx::Error> {
        sqlx::query_as::<_, ProductPrice>(
            "SELECT id, product_id, price_cents, created_at
             FROM product_prices WHERE product_id = $1
             ORDER BY created_at DESC, id DESC",
        )
        .bind(product_id)
        .fetch_all(pool)
        .await
    }
}
