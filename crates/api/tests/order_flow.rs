//! HTTP-level integration tests for quoting, orders and checkout.

mod common;

use axum::http::StatusCode;
use common::{assert_status, get, post_json, post_multipart, put_json, Part};
use sqlx::PgPool;

/// Submit a minimal project with one binary STL and return its id.
async fn submit_project(pool: &PgPool, dir: &std::path::Path, user_id: i64) -> i64 {
    let stl = vec![0u8; 84];
    let user_id_text = user_id.to_string();
    let app = common::build_test_app(pool.clone(), dir);
    let response = post_multipart(
        app,
        "/api/v1/projects",
        &[
            Part::Text("user_id", &user_id_text),
            Part::Text("name", "Spool holder"),
            Part::Text("description", "Wall mounted spool holder"),
            Part::Text("quantity", "1"),
            Part::File {
                name: "files",
                filename: "holder.stl",
                bytes: &stl,
            },
        ],
    )
    .await;
    let json = assert_status(response, StatusCode::CREATED).await;
    json["project"]["id"].as_i64().unwrap()
}

/// Walk a fresh project to `QUOTED_AWAITING_CUSTOMER` with the given
/// quote and return (project_id, product_id).
async fn quoted_project(
    pool: &PgPool,
    dir: &std::path::Path,
    user_id: i64,
    quote_price_cents: i64,
) -> (i64, i64) {
    let project_id = submit_project(pool, dir, user_id).await;

    let app = common::build_test_app(pool.clone(), dir);
    let response = post_json(
        app,
        &format!("/api/v1/admin/projects/{project_id}/review"),
        serde_json::json!({ "body": "Printable, quoting now.", "skip_first_review": true }),
    )
    .await;
    assert_status(response, StatusCode::CREATED).await;

    let app = common::build_test_app(pool.clone(), dir);
    let response = post_json(
        app,
        &format!("/api/v1/admin/projects/{project_id}/quote"),
        serde_json::json!({
            "volume_cm3": 12.5,
            "print_time_min": 90.0,
            "estimated_material_g": 35.0,
            "quote_price_cents": quote_price_cents
        }),
    )
    .await;
    let json = assert_status(response, StatusCode::CREATED).await;
    assert_eq!(json["project"]["status"], "QUOTED_AWAITING_CUSTOMER");
    assert_eq!(
        json["project"]["final_quote_price_cents"].as_i64().unwrap(),
        quote_price_cents
    );
    (project_id, json["product"]["id"].as_i64().unwrap())
}

#[sqlx::test(migrations = "../db/migrations")]
async fn finalize_quote_creates_product_with_first_price(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let user_id = common::seed_user(&pool, "quote@example.com").await;

    let (project_id, product_id) = quoted_project(&pool, dir.path(), user_id, 4250).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = get(app, &format!("/api/v1/products/{product_id}")).await;
    let json = assert_status(response, StatusCode::OK).await;
    assert_eq!(json["product"]["source_project_id"].as_i64(), Some(project_id));
    assert_eq!(json["price_cents"].as_i64(), Some(4250));

    // The link back from the project resolves to the same product.
    let linked = printforge_db::repositories::ProductRepo::find_by_source_project(&pool, project_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(linked.id, product_id);

    // Quoting the same project again conflicts: the status moved on.
    let app = common::build_test_app(pool, dir.path());
    let response = post_json(
        app,
        &format!("/api/v1/admin/projects/{project_id}/quote"),
        serde_json::json!({
            "volume_cm3": 12.5,
            "print_time_min": 90.0,
            "estimated_material_g": 35.0,
            "quote_price_cents": 9999
        }),
    )
    .await;
    let json = assert_status(response, StatusCode::CONFLICT).await;
    assert_eq!(json["code"], "STATE_CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn quote_with_nonpositive_price_changes_nothing(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let user_id = common::seed_user(&pool, "badquote@example.com").await;
    let project_id = submit_project(&pool, dir.path(), user_id).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json(
        app,
        &format!("/api/v1/admin/projects/{project_id}/quote"),
        serde_json::json!({
            "volume_cm3": 1.0,
            "print_time_min": 10.0,
            "estimated_material_g": 5.0,
            "quote_price_cents": 0
        }),
    )
    .await;
    assert_status(response, StatusCode::BAD_REQUEST).await;

    // The failed quote left no product behind and the project untouched.
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM products WHERE source_project_id = $1")
            .bind(project_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 0);

    let app = common::build_test_app(pool, dir.path());
    let response = get(app, &format!("/api/v1/projects/{project_id}")).await;
    let json = assert_status(response, StatusCode::OK).await;
    assert_eq!(json["project"]["status"], "UNDER_REVIEW");
    assert!(json["project"]["final_quote_price_cents"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn failed_quote_rolls_back_the_project_update(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let user_id = common::seed_user(&pool, "rollback@example.com").await;
    let project_id = submit_project(&pool, dir.path(), user_id).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json(
        app,
        &format!("/api/v1/admin/projects/{project_id}/review"),
        serde_json::json!({ "body": "Printable, quoting now.", "skip_first_review": true }),
    )
    .await;
    assert_status(response, StatusCode::CREATED).await;

    // A product already linked to this project makes the insert inside
    // the quote transaction trip uq_products_source_project after the
    // project row was already updated.
    sqlx::query("INSERT INTO products (user_id, name, source_project_id) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind("stale link")
        .bind(project_id)
        .execute(&pool)
        .await
        .unwrap();

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json(
        app,
        &format!("/api/v1/admin/projects/{project_id}/quote"),
        serde_json::json!({
            "volume_cm3": 12.5,
            "print_time_min": 90.0,
            "estimated_material_g": 35.0,
            "quote_price_cents": 4250
        }),
    )
    .await;
    let json = assert_status(response, StatusCode::CONFLICT).await;
    assert_eq!(json["code"], "CONFLICT");

    // The whole transaction rolled back: no price row appeared and the
    // project kept its pre-quote state.
    let (price_rows,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM product_prices p
         JOIN products pr ON pr.id = p.product_id
         WHERE pr.source_project_id = $1",
    )
    .bind(project_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(price_rows, 0);

    let app = common::build_test_app(pool, dir.path());
    let response = get(app, &format!("/api/v1/projects/{project_id}")).await;
    let json = assert_status(response, StatusCode::OK).await;
    assert_eq!(json["project"]["status"], "WAITING_FOR_QUOTE");
    assert!(json["project"]["final_quote_price_cents"].is_null());
    assert!(json["project"]["quoted_at"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn order_from_quote_is_idempotent(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let user_id = common::seed_user(&pool, "fromquote@example.com").await;
    let (project_id, _) = quoted_project(&pool, dir.path(), user_id, 4250).await;

    let body = serde_json::json!({ "user_id": user_id, "project_id": project_id });

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json(app, "/api/v1/orders/from-quote", body.clone()).await;
    let first = assert_status(response, StatusCode::CREATED).await;
    assert_eq!(first["status"], "DRAFT");
    assert_eq!(first["payment_status"], "PENDING_PAYMENT");
    assert_eq!(first["amount_cents"].as_i64(), Some(4250));

    // Repeating the call returns the same open order, no duplicate.
    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json(app, "/api/v1/orders/from-quote", body).await;
    let second = assert_status(response, StatusCode::CREATED).await;
    assert_eq!(second["id"], first["id"]);

    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM orders WHERE source_project_id = $1")
            .bind(project_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn checkout_leaves_a_completed_project_terminal(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let user_id = common::seed_user(&pool, "terminal@example.com").await;
    let (project_id, _) = quoted_project(&pool, dir.path(), user_id, 4250).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json(
        app,
        "/api/v1/orders/from-quote",
        serde_json::json!({ "user_id": user_id, "project_id": project_id }),
    )
    .await;
    let order = assert_status(response, StatusCode::CREATED).await;
    let order_id = order["id"].as_i64().unwrap();

    // Admin closes the project out while the order is still DRAFT.
    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json(
        app,
        &format!("/api/v1/admin/projects/{project_id}/complete"),
        serde_json::json!({}),
    )
    .await;
    let json = assert_status(response, StatusCode::OK).await;
    assert_eq!(json["status"], "PROJECT_COMPLETED");

    // The late checkout still finalizes the order itself.
    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json(
        app,
        &format!("/api/v1/orders/{order_id}/checkout"),
        serde_json::json!({
            "user_id": user_id,
            "address": {
                "kind": "NEW",
                "recipient": "A. Customer",
                "street": "Printweg 12",
                "postal_code": "10115",
                "city": "Berlin",
                "country": "DE"
            },
            "payment": {
                "kind": "NEW",
                "method": {
                    "method_type": "CARD",
                    "holder": "A. Customer",
                    "card_number": "4111 1111 1111 1111"
                }
            }
        }),
    )
    .await;
    let json = assert_status(response, StatusCode::OK).await;
    assert_eq!(json["order"]["status"], "ORDER_FINALIZED");

    // But the project stays in its terminal status.
    let app = common::build_test_app(pool, dir.path());
    let response = get(app, &format!("/api/v1/projects/{project_id}")).await;
    let json = assert_status(response, StatusCode::OK).await;
    assert_eq!(json["project"]["status"], "PROJECT_COMPLETED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn order_from_quote_requires_the_owner(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let owner = common::seed_user(&pool, "owner@example.com").await;
    let stranger = common::seed_user(&pool, "stranger@example.com").await;
    let (project_id, _) = quoted_project(&pool, dir.path(), owner, 4250).await;

    let app = common::build_test_app(pool, dir.path());
    let response = post_json(
        app,
        "/api/v1/orders/from-quote",
        serde_json::json!({ "user_id": stranger, "project_id": project_id }),
    )
    .await;
    assert_status(response, StatusCode::NOT_FOUND).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn quote_to_finalized_order_end_to_end(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let user_id = common::seed_user(&pool, "e2e@example.com").await;

    // Quote of 42.50 EUR, stored as 4250 cents.
    let (project_id, _) = quoted_project(&pool, dir.path(), user_id, 4250).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json(
        app,
        "/api/v1/orders/from-quote",
        serde_json::json!({ "user_id": user_id, "project_id": project_id }),
    )
    .await;
    let order = assert_status(response, StatusCode::CREATED).await;
    let order_id = order["id"].as_i64().unwrap();
    assert_eq!(order["status"], "DRAFT");
    assert_eq!(order["amount_cents"].as_i64(), Some(4250));

    // The project followed along.
    let app = common::build_test_app(pool.clone(), dir.path());
    let response = get(app, &format!("/api/v1/projects/{project_id}")).await;
    let json = assert_status(response, StatusCode::OK).await;
    assert_eq!(json["project"]["status"], "ORDER_STARTED");

    // Checkout with a new address and a new card.
    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json(
        app,
        &format!("/api/v1/orders/{order_id}/checkout"),
        serde_json::json!({
            "user_id": user_id,
            "address": {
                "kind": "NEW",
                "recipient": "A. Customer",
                "street": "Printweg 12",
                "postal_code": "10115",
                "city": "Berlin",
                "country": "DE"
            },
            "payment": {
                "kind": "NEW",
                "method": {
                    "method_type": "CARD",
                    "holder": "A. Customer",
                    "card_number": "4111 1111 1111 1111"
                }
            }
        }),
    )
    .await;
    let json = assert_status(response, StatusCode::OK).await;
    assert_eq!(json["order"]["status"], "ORDER_FINALIZED");
    assert!(json["address_id"].is_number());
    assert!(json["payment_method_id"].is_number());

    // Stored payment method is masked, never the raw card number.
    let (label, token): (String, String) =
        sqlx::query_as("SELECT label, token FROM payment_methods WHERE id = $1")
            .bind(json["payment_method_id"].as_i64().unwrap())
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(label, "Card ending in 1111");
    assert!(!token.contains("4111 1111"));

    // Project and order both read back finalized.
    let app = common::build_test_app(pool.clone(), dir.path());
    let response = get(app, &format!("/api/v1/projects/{project_id}")).await;
    let json = assert_status(response, StatusCode::OK).await;
    assert_eq!(json["project"]["status"], "ORDER_FINALIZED");

    // A second checkout attempt conflicts.
    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json(
        app,
        &format!("/api/v1/orders/{order_id}/checkout"),
        serde_json::json!({
            "user_id": user_id,
            "address": { "kind": "EXISTING", "address_id": 1 },
            "payment": { "kind": "EXISTING", "payment_method_id": 1 }
        }),
    )
    .await;
    let json = assert_status(response, StatusCode::CONFLICT).await;
    assert_eq!(json["code"], "STATE_CONFLICT");

    // Admin marks the order paid; payment status is forced along.
    let app = common::build_test_app(pool.clone(), dir.path());
    let response = put_json(
        app,
        &format!("/api/v1/admin/orders/{order_id}/status"),
        serde_json::json!({ "status": "PAID" }),
    )
    .await;
    let json = assert_status(response, StatusCode::OK).await;
    assert_eq!(json["status"], "PAID");
    assert_eq!(json["payment_status"], "PAID");

    // Close the project out.
    let app = common::build_test_app(pool, dir.path());
    let response = post_json(
        app,
        &format!("/api/v1/admin/projects/{project_id}/complete"),
        serde_json::json!({}),
    )
    .await;
    let json = assert_status(response, StatusCode::OK).await;
    assert_eq!(json["status"], "PROJECT_COMPLETED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn checkout_reuses_stored_address_and_payment_method(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let user_id = common::seed_user(&pool, "returning@example.com").await;
    let (project_id, _) = quoted_project(&pool, dir.path(), user_id, 2500).await;

    // The customer stores an address and a PayPal method up front.
    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json(
        app,
        "/api/v1/addresses",
        serde_json::json!({
            "user_id": user_id,
            "recipient": "B. Customer",
            "street": "Druckgasse 3",
            "postal_code": "50667",
            "city": "Cologne",
            "country": "DE"
        }),
    )
    .await;
    let address = assert_status(response, StatusCode::CREATED).await;
    let address_id = address["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json(
        app,
        "/api/v1/payment-methods",
        serde_json::json!({
            "user_id": user_id,
            "method_type": "PAYPAL",
            "email": "returning@example.com"
        }),
    )
    .await;
    let method = assert_status(response, StatusCode::CREATED).await;
    let payment_method_id = method["id"].as_i64().unwrap();
    assert_eq!(method["method_type"], "PAYPAL");

    // Both show up in the stored lists.
    let app = common::build_test_app(pool.clone(), dir.path());
    let response = get(app, &format!("/api/v1/addresses?user_id={user_id}")).await;
    let addresses = assert_status(response, StatusCode::OK).await;
    assert_eq!(addresses.as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = get(app, &format!("/api/v1/payment-methods?user_id={user_id}")).await;
    let methods = assert_status(response, StatusCode::OK).await;
    assert_eq!(methods.as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json(
        app,
        "/api/v1/orders/from-quote",
        serde_json::json!({ "user_id": user_id, "project_id": project_id }),
    )
    .await;
    let order = assert_status(response, StatusCode::CREATED).await;
    let order_id = order["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json(
        app,
        &format!("/api/v1/orders/{order_id}/checkout"),
        serde_json::json!({
            "user_id": user_id,
            "address": { "kind": "EXISTING", "address_id": address_id },
            "payment": { "kind": "EXISTING", "payment_method_id": payment_method_id }
        }),
    )
    .await;
    let json = assert_status(response, StatusCode::OK).await;
    assert_eq!(json["address_id"].as_i64(), Some(address_id));
    assert_eq!(json["payment_method_id"].as_i64(), Some(payment_method_id));

    // Ownership scoping: another user's stored entries are invisible.
    let stranger = common::seed_user(&pool, "otherbuyer@example.com").await;
    let found = printforge_db::repositories::AddressRepo::find_for_user(
        &pool, address_id, stranger,
    )
    .await
    .unwrap();
    assert!(found.is_none());
    let found = printforge_db::repositories::PaymentMethodRepo::find_for_user(
        &pool,
        payment_method_id,
        user_id,
    )
    .await
    .unwrap();
    assert!(found.is_some());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn pricing_preview_uses_catalog_defaults(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let user_id = common::seed_user(&pool, "pricing@example.com").await;
    let project_id = submit_project(&pool, dir.path(), user_id).await;

    // 100 g at 20 EUR/kg plus 60 min at 0.50 EUR/min, times the 1.05
    // profile multiplier: base 33.60 EUR, suggested quote 53.76 EUR.
    let app = common::build_test_app(pool, dir.path());
    let response = post_json(
        app,
        &format!("/api/v1/admin/projects/{project_id}/pricing"),
        serde_json::json!({ "print_time_min": 60.0, "material_g": 100.0 }),
    )
    .await;
    let json = assert_status(response, StatusCode::OK).await;
    assert_eq!(json["base_cost_cents"].as_i64(), Some(3360));
    assert_eq!(json["markup_factor"].as_f64(), Some(1.6));
    assert_eq!(json["suggested_quote_cents"].as_i64(), Some(5376));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_cart_cannot_become_an_order(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let user_id = common::seed_user(&pool, "emptycart@example.com").await;

    let app = common::build_test_app(pool, dir.path());
    let response = post_json(
        app,
        "/api/v1/orders/from-cart",
        serde_json::json!({ "user_id": user_id }),
    )
    .await;
    let json = assert_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn cart_order_snapshots_prices_and_empties_the_cart(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let admin_id = common::seed_user(&pool, "shopadmin@example.com").await;
    let user_id = common::seed_user(&pool, "shopper@example.com").await;

    // Admin puts a product in the shop at 15.00 EUR.
    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json(
        app,
        "/api/v1/admin/products",
        serde_json::json!({
            "user_id": admin_id,
            "name": "Cable clip",
            "description": "Pack of one",
            "shop_visible": true,
            "price_cents": 1500
        }),
    )
    .await;
    let product = assert_status(response, StatusCode::CREATED).await;
    let product_id = product["id"].as_i64().unwrap();

    // Two of them in the cart.
    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json(
        app,
        "/api/v1/cart/items",
        serde_json::json!({ "user_id": user_id, "product_id": product_id, "quantity": 2 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = get(app, &format!("/api/v1/cart?user_id={user_id}")).await;
    let cart = assert_status(response, StatusCode::OK).await;
    assert_eq!(cart[0]["quantity"], 2);
    assert_eq!(cart[0]["price_cents"], 1500);

    // Order the cart, then raise the price.
    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json(
        app,
        "/api/v1/orders/from-cart",
        serde_json::json!({ "user_id": user_id }),
    )
    .await;
    let order = assert_status(response, StatusCode::CREATED).await;
    let order_id = order["id"].as_i64().unwrap();
    assert_eq!(order["amount_cents"].as_i64(), Some(3000));

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json(
        app,
        &format!("/api/v1/admin/products/{product_id}/prices"),
        serde_json::json!({ "price_cents": 2000 }),
    )
    .await;
    assert_status(response, StatusCode::CREATED).await;

    // The order kept its snapshot.
    let app = common::build_test_app(pool.clone(), dir.path());
    let response = get(app, &format!("/api/v1/orders/{order_id}")).await;
    let json = assert_status(response, StatusCode::OK).await;
    assert_eq!(json["order"]["amount_cents"].as_i64(), Some(3000));
    assert_eq!(json["positions"][0]["price_per_unit_cents"].as_i64(), Some(1500));
    assert_eq!(json["positions"][0]["quantity"], 2);

    // Both prices remain in the history, newest first.
    let app = common::build_test_app(pool.clone(), dir.path());
    let response = get(
        app,
        &format!("/api/v1/admin/products/{product_id}/prices"),
    )
    .await;
    let history = assert_status(response, StatusCode::OK).await;
    assert_eq!(history.as_array().unwrap().len(), 2);
    assert_eq!(history[0]["price_cents"].as_i64(), Some(2000));
    assert_eq!(history[1]["price_cents"].as_i64(), Some(1500));

    // And the cart is empty again.
    let app = common::build_test_app(pool, dir.path());
    let response = get(app, &format!("/api/v1/cart?user_id={user_id}")).await;
    let cart = assert_status(response, StatusCode::OK).await;
    assert_eq!(cart.as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn orders_cannot_be_moved_back_to_draft(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let user_id = common::seed_user(&pool, "nodraft@example.com").await;
    let (project_id, _) = quoted_project(&pool, dir.path(), user_id, 1000).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json(
        app,
        "/api/v1/orders/from-quote",
        serde_json::json!({ "user_id": user_id, "project_id": project_id }),
    )
    .await;
    let order = assert_status(response, StatusCode::CREATED).await;
    let order_id = order["id"].as_i64().unwrap();

    let app = common::build_test_app(pool, dir.path());
    let response = put_json(
        app,
        &format!("/api/v1/admin/orders/{order_id}/status"),
        serde_json::json!({ "status": "DRAFT" }),
    )
    .await;
    assert_status(response, StatusCode::BAD_REQUEST).await;
}
