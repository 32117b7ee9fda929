use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use migration::{Migrator, MigratorTrait};
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use server::routes;
use server::state::AppState;

async fn app() -> anyhow::Result<Router> {
    let db = models::db::connect_in_memory().await?;
    Migrator::up(&db, None).await?;
    Ok(routes::build_router(AppState::new(db), CorsLayer::very_permissive()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

async fn seed_company(app: &Router, name: &str) -> i64 {
    let (status, body) = send(app, Method::POST, "/api/companies", Some(json!({ "name": name, "industry": "Technology" }))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

async fn seed_department(app: &Router, company_id: i64, name: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/departments",
        Some(json!({ "company_id": company_id, "name": name, "location": "Building A" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

fn alice(department_id: i64) -> Value {
    json!({
        "department_id": department_id,
        "employee_type": "FULL_TIME",
        "first_name": "Alice",
        "last_name": "Smith",
        "email": "alice@acme.com",
        "hire_date": "2024-01-15",
        "salary": "90000.00",
        "annual_bonus": "5000.00"
    })
}

#[tokio::test]
async fn health_endpoints() -> anyhow::Result<()> {
    let app = app().await?;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));

    let (status, body) = send(&app, Method::GET, "/api/companies/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("Company service is running".into()));

    let (_, body) = send(&app, Method::GET, "/api/departments/health", None).await;
    assert_eq!(body, Value::String("Department service is running".into()));
    let (_, body) = send(&app, Method::GET, "/api/employees/health", None).await;
    assert_eq!(body, Value::String("Employee service is running".into()));
    Ok(())
}

#[tokio::test]
async fn company_create_conflict_and_not_found() -> anyhow::Result<()> {
    let app = app().await?;
    let id = seed_company(&app, "Acme").await;

    let (status, body) = send(&app, Method::POST, "/api/companies", Some(json!({ "name": "Acme" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Conflict");

    let (status, body) = send(&app, Method::GET, &format!("/api/companies/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Acme");
    assert_eq!(body["industry"], "Technology");

    let (status, body) = send(&app, Method::GET, "/api/companies/name/Acme", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"].as_i64(), Some(id));

    let (status, _) = send(&app, Method::GET, "/api/companies/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::DELETE, "/api/companies/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, "/api/companies/search?name=acm", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn company_search_ignores_case_beyond_ascii() -> anyhow::Result<()> {
    let app = app().await?;
    let id = seed_company(&app, "Ärzte Gruppe").await;
    seed_company(&app, "Acme").await;
    for needle in ["%C3%A4rzte", "%C3%84RZTE"] {
        let (status, body) = send(&app, Method::GET, &format!("/api/companies/search?name={needle}"), None).await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<i64> = body.as_array().unwrap().iter().filter_map(|c| c["id"].as_i64()).collect();
        assert_eq!(ids, vec![id], "needle {needle}");
    }
    Ok(())
}

#[tokio::test]
async fn invalid_company_reports_violations() -> anyhow::Result<()> {
    let app = app().await?;
    let (status, body) = send(&app, Method::POST, "/api/companies", Some(json!({ "name": "A" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");
    let violations = body["violations"].as_array().unwrap();
    assert!(violations.iter().any(|v| v["field"] == "name"));

    let (status, _) = send(&app, Method::GET, "/api/companies", None).await;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn employees_are_tagged_and_carry_derived_values() -> anyhow::Result<()> {
    let app = app().await?;
    let company = seed_company(&app, "Acme").await;
    let dept = seed_department(&app, company, "Engineering").await;

    let (status, body) = send(&app, Method::POST, "/api/employees", Some(alice(dept))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["employee_type"], "FULL_TIME");
    assert_eq!(body["full_name"], "Alice Smith");
    assert_eq!(body["total_compensation"], "95000.00");
    assert!(body.get("hourly_rate").is_none());

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/departments/{dept}/employees"),
        Some(json!({
            "employee_type": "PART_TIME",
            "first_name": "Bob",
            "last_name": "Jones",
            "email": "bob@acme.com",
            "hire_date": "2024-03-01",
            "salary": "31200",
            "hours_per_week": 20,
            "contract_end_date": "2000-01-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["employee_type"], "PART_TIME");
    assert_eq!(body["hourly_rate"], "30.00");
    assert_eq!(body["contract_expired"], true);

    // email is unique across both kinds
    let mut dup = alice(dept);
    dup["first_name"] = json!("Alicia");
    let (status, _) = send(&app, Method::POST, "/api/employees", Some(dup)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = send(&app, Method::GET, "/api/employees/full-time/min-bonus/4000", None).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    let (_, body) = send(&app, Method::GET, "/api/employees/full-time/min-bonus/6000", None).await;
    assert_eq!(body.as_array().map(Vec::len), Some(0));
    let (status, _) = send(&app, Method::GET, "/api/employees/full-time/min-bonus/lots", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, Method::GET, "/api/employees/part-time/expired-contracts", None).await;
    assert_eq!(body[0]["email"], "bob@acme.com");

    let (_, body) = send(&app, Method::GET, "/api/employees/salary-range?min_salary=30000&max_salary=40000", None).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let (_, body) = send(&app, Method::GET, &format!("/api/employees/company/{company}/count"), None).await;
    assert_eq!(body, json!(2));
    let (_, body) = send(&app, Method::GET, &format!("/api/departments/{dept}/employee-count"), None).await;
    assert_eq!(body, json!(2));

    let (status, body) = send(&app, Method::GET, "/api/employees/email/alice@acme.com", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_name"], "Alice");
    Ok(())
}

#[tokio::test]
async fn deleting_a_company_cascades() -> anyhow::Result<()> {
    let app = app().await?;
    let company = seed_company(&app, "Acme").await;
    let dept = seed_department(&app, company, "Engineering").await;
    let (status, body) = send(&app, Method::POST, "/api/employees", Some(alice(dept))).await;
    assert_eq!(status, StatusCode::CREATED);
    let employee = body["id"].as_i64().unwrap();

    let (status, _) = send(&app, Method::DELETE, &format!("/api/companies/{company}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &format!("/api/departments/{dept}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::GET, &format!("/api/employees/{employee}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, body) = send(&app, Method::GET, "/api/employees", None).await;
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn openapi_document_lists_resources() -> anyhow::Result<()> {
    let app = app().await?;
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    let paths = body["paths"].as_object().unwrap();
    assert!(paths.contains_key("/api/companies"));
    assert!(paths.contains_key("/api/departments/{id}/employees"));
    assert!(paths.contains_key("/api/employees/salary-range"));
    Ok(())
}
