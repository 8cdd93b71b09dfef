//! Integration tests for the Payroll Formula Engine.
//!
//! This test suite drives the HTTP router end to end:
//! - Formula building and evaluation
//! - Salary category management
//! - Payroll computation and recording
//! - Store failures and timeouts
//! - Error cases

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use payroll_engine::models::Employee;
use payroll_engine::store::{InMemoryDocumentStore, TimedDocumentStore, collections};

// =============================================================================
// Test Helpers
// =============================================================================

fn employee(emp_no: &str, name: &str, salary: f64) -> Employee {
    Employee {
        id: String::new(),
        emp_no: emp_no.to_string(),
        name: name.to_string(),
        salary,
        role: None,
        department_name: None,
    }
}

async fn seeded_store() -> Arc<InMemoryDocumentStore> {
    let store = Arc::new(InMemoryDocumentStore::new());
    store
        .seed_employees(&[
            employee("E001", "Nimal Perera", 85000.0),
            employee("E002", "Kamala Silva", 62000.0),
        ])
        .await
        .unwrap();
    store
}

fn router_for(store: Arc<InMemoryDocumentStore>, timeout: Duration) -> Router {
    let timed = Arc::new(TimedDocumentStore::new(store, timeout));
    create_router(AppState::new(timed))
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let body = body.map(|b| b.to_string()).unwrap_or_default();
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

async fn create_category(router: &Router, name: &str, formula: &str) -> String {
    let (status, body) = send(
        router,
        "POST",
        "/categories",
        Some(json!({"category_name": name, "formula": formula})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {}", body);
    body["id"].as_str().unwrap().to_string()
}

fn assert_approx(actual: &Value, expected: f64) {
    let actual = actual.as_f64().unwrap();
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {}, got {}",
        expected,
        actual
    );
}

// =============================================================================
// Formula Builder Tests
// =============================================================================

#[tokio::test]
async fn test_build_then_save_then_record() {
    let store = seeded_store().await;
    let router = router_for(store.clone(), Duration::from_secs(10));

    let (status, built) = send(
        &router,
        "POST",
        "/formulas/build",
        Some(json!({"base_salary": 85000, "percentage": "0.1", "deductions": "1000"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(built["formula"], "base_salary + (base_salary * 0.1) - 1000");
    assert_approx(&built["preview"], 92500.0);

    let category_id =
        create_category(&router, "Senior Staff", built["formula"].as_str().unwrap()).await;

    let (status, record) = send(
        &router,
        "POST",
        "/payrolls",
        Some(json!({
            "empNo": "E001",
            "category_id": category_id,
            "payroll_date": "2026-01-31"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(record["empNo"], "E001");
    assert_eq!(record["category_name"], "Senior Staff");
    assert_eq!(record["payroll_date"], "2026-01-31");
    assert_approx(&record["calculated_salary"], 92500.0);
    assert_eq!(store.count(collections::PAYROLLS).await, 1);
}

#[tokio::test]
async fn test_build_rejects_negative_deductions() {
    let router = router_for(seeded_store().await, Duration::from_secs(10));
    let (status, body) = send(
        &router,
        "POST",
        "/formulas/build",
        Some(json!({"base_salary": "50000", "percentage": "0.2", "deductions": "-5"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_evaluate_rejects_unknown_identifier() {
    let router = router_for(seeded_store().await, Duration::from_secs(10));
    let (status, body) = send(
        &router,
        "POST",
        "/formulas/evaluate",
        Some(json!({"formula": "base_salary * bonus", "base_salary": 100})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "FORMULA_SYNTAX_ERROR");
}

// =============================================================================
// Salary Category Tests
// =============================================================================

#[tokio::test]
async fn test_code_injection_is_rejected_and_not_stored() {
    let store = seeded_store().await;
    let router = router_for(store.clone(), Duration::from_secs(10));

    for formula in [
        "require('child_process').exec('rm -rf /')",
        "base_salary; process.exit(1)",
        "base_salary ** 2",
        "Math.max(base_salary, 1)",
    ] {
        let (status, body) = send(
            &router,
            "POST",
            "/categories",
            Some(json!({"category_name": "Evil", "formula": formula})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "formula {:?}", formula);
        assert_eq!(body["code"], "FORMULA_SYNTAX_ERROR");
    }

    assert_eq!(store.count(collections::SALARY_CATEGORIES).await, 0);
}

#[tokio::test]
async fn test_blank_category_name_is_rejected() {
    let router = router_for(seeded_store().await, Duration::from_secs(10));
    let (status, body) = send(
        &router,
        "POST",
        "/categories",
        Some(json!({"category_name": "   ", "formula": "base_salary"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_list_categories_returns_saved_formulas() {
    let router = router_for(seeded_store().await, Duration::from_secs(10));
    create_category(&router, "Junior", "base_salary * 1.05").await;
    create_category(&router, "Flat", "40000").await;

    let (status, body) = send(&router, "GET", "/categories", None).await;
    assert_eq!(status, StatusCode::OK);

    let mut names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["category_name"].as_str().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Flat", "Junior"]);
}

#[tokio::test]
async fn test_deleting_category_keeps_payroll_records() {
    let store = seeded_store().await;
    let router = router_for(store.clone(), Duration::from_secs(10));
    let category_id = create_category(&router, "Temporary", "base_salary - 2000").await;

    let (status, _) = send(
        &router,
        "POST",
        "/payrolls",
        Some(json!({"empNo": "E002", "category_id": category_id, "payroll_date": "2026-02-28"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&router, "DELETE", &format!("/categories/{}", category_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, payrolls) = send(&router, "GET", "/payrolls", None).await;
    assert_eq!(status, StatusCode::OK);
    let payrolls = payrolls.as_array().unwrap();
    assert_eq!(payrolls.len(), 1);
    assert_eq!(payrolls[0]["category_name"], "Temporary");
    assert_approx(&payrolls[0]["calculated_salary"], 60000.0);

    // The category is gone, so computing against it now fails.
    let (status, _) = send(
        &router,
        "POST",
        "/payrolls/compute",
        Some(json!({"empNo": "E002", "category_id": category_id})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Payroll Tests
// =============================================================================

#[tokio::test]
async fn test_compute_salary_does_not_persist() {
    let store = seeded_store().await;
    let router = router_for(store.clone(), Duration::from_secs(10));
    let category_id = create_category(&router, "Double", "base_salary * 2").await;

    let (status, body) = send(
        &router,
        "POST",
        "/payrolls/compute",
        Some(json!({"empNo": "E002", "category_id": category_id})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_approx(&body["base_salary"], 62000.0);
    assert_approx(&body["calculated_salary"], 124000.0);
    assert_eq!(body["formula"], "base_salary * 2");
    assert_eq!(store.count(collections::PAYROLLS).await, 0);
}

#[tokio::test]
async fn test_unknown_employee_returns_404_and_writes_nothing() {
    let store = seeded_store().await;
    let router = router_for(store.clone(), Duration::from_secs(10));
    let category_id = create_category(&router, "Standard", "base_salary").await;

    let (status, body) = send(
        &router,
        "POST",
        "/payrolls",
        Some(json!({"empNo": "E999", "category_id": category_id, "payroll_date": "2026-01-31"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert!(body["message"].as_str().unwrap().contains("E999"));
    assert_eq!(store.count(collections::PAYROLLS).await, 0);
}

#[tokio::test]
async fn test_division_by_zero_in_category_writes_nothing() {
    let store = seeded_store().await;
    let router = router_for(store.clone(), Duration::from_secs(10));
    let category_id =
        create_category(&router, "Broken", "base_salary / (base_salary - 85000)").await;

    let (status, body) = send(
        &router,
        "POST",
        "/payrolls",
        Some(json!({"empNo": "E001", "category_id": category_id, "payroll_date": "2026-01-31"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "DIVISION_BY_ZERO");
    assert_eq!(store.count(collections::PAYROLLS).await, 0);
}

#[tokio::test]
async fn test_payroll_summaries_include_employee_names() {
    let store = seeded_store().await;
    let router = router_for(store.clone(), Duration::from_secs(10));
    let category_id = create_category(&router, "Standard", "base_salary").await;

    for emp_no in ["E001", "E002"] {
        let (status, _) = send(
            &router,
            "POST",
            "/payrolls",
            Some(json!({
                "empNo": emp_no,
                "category_id": category_id,
                "payroll_date": "2026-03-31"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&router, "GET", "/payrolls", None).await;
    assert_eq!(status, StatusCode::OK);
    let mut pairs: Vec<(String, String)> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| {
            (
                s["empNo"].as_str().unwrap().to_string(),
                s["employee_name"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    pairs.sort();
    assert_eq!(
        pairs,
        vec![
            ("E001".to_string(), "Nimal Perera".to_string()),
            ("E002".to_string(), "Kamala Silva".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_delete_payroll_then_strict_delete_is_404() {
    let store = seeded_store().await;
    let router = router_for(store.clone(), Duration::from_secs(10));
    let category_id = create_category(&router, "Standard", "base_salary").await;

    let (_, record) = send(
        &router,
        "POST",
        "/payrolls",
        Some(json!({"empNo": "E001", "category_id": category_id, "payroll_date": "2026-01-31"})),
    )
    .await;
    let uri = format!("/payrolls/{}", record["id"].as_str().unwrap());

    let (status, _) = send(&router, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(store.count(collections::PAYROLLS).await, 0);

    let (status, _) = send(&router, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&router, "DELETE", &format!("{}?strict=true", uri), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

// =============================================================================
// Store Failure Tests
// =============================================================================

#[tokio::test]
async fn test_read_only_store_returns_503_and_leaves_no_record() {
    let store = seeded_store().await;
    let router = router_for(store.clone(), Duration::from_secs(10));
    let category_id = create_category(&router, "Standard", "base_salary").await;

    store.set_read_only(true);
    let (status, body) = send(
        &router,
        "POST",
        "/payrolls",
        Some(json!({"empNo": "E001", "category_id": category_id, "payroll_date": "2026-01-31"})),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "PERSISTENCE_ERROR");
    assert_eq!(store.count(collections::PAYROLLS).await, 0);
}

#[tokio::test]
async fn test_unavailable_store_returns_503() {
    let store = seeded_store().await;
    let router = router_for(store.clone(), Duration::from_secs(10));

    store.set_unavailable(true);
    let (status, body) = send(&router, "GET", "/categories", None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "PERSISTENCE_ERROR");
}

#[tokio::test]
async fn test_slow_store_returns_504() {
    let store = seeded_store().await;
    let router = router_for(store.clone(), Duration::from_millis(20));

    store.set_latency(Duration::from_millis(500));
    let (status, body) = send(&router, "GET", "/payrolls", None).await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["code"], "STORE_TIMEOUT");
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[tokio::test]
async fn test_seed_from_shipped_config() {
    let loader = ConfigLoader::load("./config/payroll.yaml").expect("Failed to load config");
    let config = loader.config();

    let store = Arc::new(InMemoryDocumentStore::new());
    store.seed_employees(&config.seed.employees).await.unwrap();
    let router = router_for(store, config.store.timeout());
    let category_id = create_category(&router, "Standard", "base_salary").await;

    // E002's salary is stored as text in the seed file.
    let (status, body) = send(
        &router,
        "POST",
        "/payrolls/compute",
        Some(json!({"empNo": "E002", "category_id": category_id})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_approx(&body["calculated_salary"], 62000.0);
}
