//! HTTP-level integration tests for the manufacturing path: blueprints,
//! BOM storage and production job expansion.

mod common;

use axum::http::StatusCode;
use common::{assert_status, get, post_json, post_multipart, put_json, put_raw, Part};
use sqlx::PgPool;

/// Submit a minimal project and return its id.
async fn submit_project(pool: &PgPool, dir: &std::path::Path, user_id: i64) -> i64 {
    let stl = vec![0u8; 84];
    let user_id_text = user_id.to_string();
    let app = common::build_test_app(pool.clone(), dir);
    let response = post_multipart(
        app,
        "/api/v1/projects",
        &[
            Part::Text("user_id", &user_id_text),
            Part::Text("name", "Enclosure"),
            Part::Text("description", "Two part electronics enclosure"),
            Part::Text("quantity", "1"),
            Part::File {
                name: "files",
                filename: "enclosure.stl",
                bytes: &stl,
            },
        ],
    )
    .await;
    let json = assert_status(response, StatusCode::CREATED).await;
    json["project"]["id"].as_i64().unwrap()
}

fn sample_bom() -> serde_json::Value {
    serde_json::json!({
        "assemblies": [
            {
                "parts": [
                    {
                        "part_name": "Base",
                        "process": "FDM_PRINT",
                        "quantity": 3,
                        "color": "black",
                        "print_time": 120.0,
                        "nozzle": 0.6,
                        "dim_x": 80.0,
                        "dim_y": 60.0,
                        "dim_z": 25.0
                    },
                    {
                        "part_name": "M3 insert",
                        "process": "FDM_PRINT",
                        "is_bought": true,
                        "quantity": 4
                    }
                ]
            }
        ],
        "loose_parts": [
            { "part_name": "Lid", "process": "FDM_PRINT", "quantity": 1 },
            { "part_name": "Seal", "process": "CNC_MILL", "quantity": 1 }
        ]
    })
}

#[sqlx::test(migrations = "../db/migrations")]
async fn loading_to_manufacturing_is_idempotent(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let user_id = common::seed_user(&pool, "mfg@example.com").await;
    let project_id = submit_project(&pool, dir.path(), user_id).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json(
        app,
        &format!("/api/v1/admin/projects/{project_id}/manufacturing"),
        serde_json::json!({}),
    )
    .await;
    let first = assert_status(response, StatusCode::CREATED).await;
    assert_eq!(first["created"], true);
    assert_eq!(first["blueprint"]["status"], "INITIALIZED");

    // Loading again reports the existing blueprint.
    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json(
        app,
        &format!("/api/v1/admin/projects/{project_id}/manufacturing"),
        serde_json::json!({}),
    )
    .await;
    let second = assert_status(response, StatusCode::OK).await;
    assert_eq!(second["created"], false);
    assert_eq!(second["blueprint"]["id"], first["blueprint"]["id"]);

    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM blueprints WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn bom_expansion_creates_one_job_per_unit(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let user_id = common::seed_user(&pool, "expand@example.com").await;
    let project_id = submit_project(&pool, dir.path(), user_id).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json(
        app,
        &format!("/api/v1/admin/projects/{project_id}/manufacturing"),
        serde_json::json!({}),
    )
    .await;
    assert_status(response, StatusCode::CREATED).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = put_raw(
        app,
        &format!("/api/v1/admin/projects/{project_id}/bom"),
        "application/json",
        sample_bom().to_string(),
    )
    .await;
    let blueprint = assert_status(response, StatusCode::OK).await;
    assert_eq!(blueprint["status"], "BOM_FINISHED");
    assert!(blueprint["bom_path"].is_string());

    // Base x3 plus one Lid; the bought insert and the milled seal are
    // filtered out.
    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json(
        app,
        &format!("/api/v1/admin/projects/{project_id}/production-jobs"),
        serde_json::json!({}),
    )
    .await;
    let json = assert_status(response, StatusCode::CREATED).await;
    assert_eq!(json["job_count"], 4);

    let jobs = json["jobs"].as_array().unwrap();
    let base_jobs: Vec<_> = jobs
        .iter()
        .filter(|j| j["part_name"] == "Base")
        .collect();
    assert_eq!(base_jobs.len(), 3);
    assert!(jobs.iter().any(|j| j["part_name"] == "Lid"));
    assert!(jobs.iter().all(|j| j["part_name"] != "M3 insert"));
    assert!(jobs.iter().all(|j| j["part_name"] != "Seal"));

    // Defaults and BOM values land on the rows.
    assert!(jobs.iter().all(|j| j["status"] == "QUEUED"));
    assert!(jobs.iter().all(|j| j["priority"] == 3));
    assert_eq!(base_jobs[0]["nozzle_diameter"].as_f64(), Some(0.6));
    let lid = jobs.iter().find(|j| j["part_name"] == "Lid").unwrap();
    assert_eq!(lid["nozzle_diameter"].as_f64(), Some(0.4));

    // Every job got a distinct code.
    let mut codes: Vec<&str> = jobs
        .iter()
        .map(|j| j["job_code"].as_str().unwrap())
        .collect();
    assert!(codes.iter().all(|c| c.starts_with("JOB_")));
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), 4);

    // The same rows are visible per project.
    let app = common::build_test_app(pool.clone(), dir.path());
    let response = get(
        app,
        &format!("/api/v1/admin/projects/{project_id}/production-jobs"),
    )
    .await;
    let listed = assert_status(response, StatusCode::OK).await;
    assert_eq!(listed.as_array().unwrap().len(), 4);

    // Once the jobs are cut, the blueprint can be closed out.
    let app = common::build_test_app(pool, dir.path());
    let response = put_json(
        app,
        &format!("/api/v1/admin/projects/{project_id}/manufacturing/status"),
        serde_json::json!({ "status": "COMPLETED" }),
    )
    .await;
    let blueprint = assert_status(response, StatusCode::OK).await;
    assert_eq!(blueprint["status"], "COMPLETED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_bom_documents_are_rejected_before_storage(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let user_id = common::seed_user(&pool, "badbom@example.com").await;
    let project_id = submit_project(&pool, dir.path(), user_id).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json(
        app,
        &format!("/api/v1/admin/projects/{project_id}/manufacturing"),
        serde_json::json!({}),
    )
    .await;
    assert_status(response, StatusCode::CREATED).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = put_raw(
        app,
        &format!("/api/v1/admin/projects/{project_id}/bom"),
        "application/json",
        "{not valid json".to_string(),
    )
    .await;
    let json = assert_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    // Still no BOM on the blueprint.
    let app = common::build_test_app(pool, dir.path());
    let response = get(app, "/api/v1/admin/blueprints").await;
    let blueprints = assert_status(response, StatusCode::OK).await;
    assert_eq!(blueprints[0]["status"], "INITIALIZED");
    assert!(blueprints[0]["bom_path"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn expansion_without_printable_parts_is_rejected(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let user_id = common::seed_user(&pool, "nothing@example.com").await;
    let project_id = submit_project(&pool, dir.path(), user_id).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json(
        app,
        &format!("/api/v1/admin/projects/{project_id}/manufacturing"),
        serde_json::json!({}),
    )
    .await;
    assert_status(response, StatusCode::CREATED).await;

    let bom = serde_json::json!({
        "loose_parts": [
            { "part_name": "Bolt", "process": "FDM_PRINT", "is_bought": true }
        ]
    });
    let app = common::build_test_app(pool.clone(), dir.path());
    let response = put_raw(
        app,
        &format!("/api/v1/admin/projects/{project_id}/bom"),
        "application/json",
        bom.to_string(),
    )
    .await;
    assert_status(response, StatusCode::OK).await;

    let app = common::build_test_app(pool, dir.path());
    let response = post_json(
        app,
        &format!("/api/v1/admin/projects/{project_id}/production-jobs"),
        serde_json::json!({}),
    )
    .await;
    let json = assert_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn jobs_move_through_the_queue(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let user_id = common::seed_user(&pool, "queue@example.com").await;
    let project_id = submit_project(&pool, dir.path(), user_id).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json(
        app,
        &format!("/api/v1/admin/projects/{project_id}/manufacturing"),
        serde_json::json!({}),
    )
    .await;
    assert_status(response, StatusCode::CREATED).await;

    let bom = serde_json::json!({
        "loose_parts": [
            { "part_name": "Knob", "process": "FDM_PRINT", "quantity": 2 }
        ]
    });
    let app = common::build_test_app(pool.clone(), dir.path());
    let response = put_raw(
        app,
        &format!("/api/v1/admin/projects/{project_id}/bom"),
        "application/json",
        bom.to_string(),
    )
    .await;
    assert_status(response, StatusCode::OK).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json(
        app,
        &format!("/api/v1/admin/projects/{project_id}/production-jobs"),
        serde_json::json!({}),
    )
    .await;
    let json = assert_status(response, StatusCode::CREATED).await;
    let job_id = json["jobs"][0]["id"].as_i64().unwrap();

    // The queue endpoint defaults to QUEUED jobs.
    let app = common::build_test_app(pool.clone(), dir.path());
    let response = get(app, "/api/v1/admin/production-jobs").await;
    let queued = assert_status(response, StatusCode::OK).await;
    assert_eq!(queued.as_array().unwrap().len(), 2);

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = put_json(
        app,
        &format!("/api/v1/admin/production-jobs/{job_id}/printer"),
        serde_json::json!({ "printer": "prusa-mk4-01" }),
    )
    .await;
    let json = assert_status(response, StatusCode::OK).await;
    assert_eq!(json["assigned_printer"], "prusa-mk4-01");

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = put_json(
        app,
        &format!("/api/v1/admin/production-jobs/{job_id}/status"),
        serde_json::json!({ "status": "PRINTING" }),
    )
    .await;
    let json = assert_status(response, StatusCode::OK).await;
    assert_eq!(json["status"], "PRINTING");

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = get(app, "/api/v1/admin/production-jobs?status=PRINTING").await;
    let printing = assert_status(response, StatusCode::OK).await;
    assert_eq!(printing.as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool, dir.path());
    let response = get(app, "/api/v1/admin/production-jobs").await;
    let queued = assert_status(response, StatusCode::OK).await;
    assert_eq!(queued.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn blueprint_delete_requires_an_existing_blueprint(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let user_id = common::seed_user(&pool, "bpdelete@example.com").await;
    let project_id = submit_project(&pool, dir.path(), user_id).await;

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = common::delete(
        app,
        &format!("/api/v1/admin/projects/{project_id}/manufacturing"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool.clone(), dir.path());
    let response = post_json(
        app,
        &format!("/api/v1/admin/projects/{project_id}/manufacturing"),
        serde_json::json!({}),
    )
    .await;
    assert_status(response, StatusCode::CREATED).await;

    let app = common::build_test_app(pool, dir.path());
    let response = common::delete(
        app,
        &format!("/api/v1/admin/projects/{project_id}/manufacturing"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
