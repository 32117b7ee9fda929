use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;

use common::types::liveness_message;
use models::company::{self, CompanyInput};
use models::department::{self, DepartmentInput};
use service::company_service;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    pub name: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/health", get(health))
        .route("/search", get(search))
        .route("/industry/:industry", get(by_industry))
        .route("/with-min-departments/:count", get(with_min_departments))
        .route("/with-min-employees/:count", get(with_min_employees))
        .route("/name/:name", get(by_name))
        .route("/name/:name/departments", get(departments_by_company_name))
        .route("/:id", get(get_one).put(update).delete(remove))
        .route("/:id/departments", get(departments).post(add_department))
        .route("/:id/departments/:department_id", delete(remove_department))
}

#[utoipa::path(get, path = "/api/companies", tag = "companies", responses((status = 200, description = "All companies")))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<company::Model>>, JsonApiError> {
    Ok(Json(company_service::list_companies(&state.db).await?))
}

#[utoipa::path(
    post, path = "/api/companies", tag = "companies",
    request_body = crate::openapi::CompanyInputDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CompanyInput>,
) -> Result<(StatusCode, Json<company::Model>), JsonApiError> {
    let created = company_service::create_company(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/companies/{id}", tag = "companies",
    params(("id" = i32, Path, description = "Company id")),
    responses((status = 200, description = "Found"), (status = 404, description = "Not Found"))
)]
pub async fn get_one(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<company::Model>, JsonApiError> {
    company_service::get_company(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(format!("company {id} not found")))
}

#[utoipa::path(
    get, path = "/api/companies/name/{name}", tag = "companies",
    params(("name" = String, Path, description = "Exact company name")),
    responses((status = 200, description = "Found"), (status = 404, description = "Not Found"))
)]
pub async fn by_name(State(state): State<AppState>, Path(name): Path<String>) -> Result<Json<company::Model>, JsonApiError> {
    company_service::get_company_by_name(&state.db, &name)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(format!("company '{name}' not found")))
}

#[utoipa::path(
    put, path = "/api/companies/{id}", tag = "companies",
    params(("id" = i32, Path, description = "Company id")),
    request_body = crate::openapi::CompanyInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<CompanyInput>,
) -> Result<Json<company::Model>, JsonApiError> {
    Ok(Json(company_service::update_company(&state.db, id, input).await?))
}

#[utoipa::path(
    delete, path = "/api/companies/{id}", tag = "companies",
    params(("id" = i32, Path, description = "Company id")),
    responses((status = 204, description = "Deleted with its departments and employees"), (status = 404, description = "Not Found"))
)]
pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    company_service::delete_company(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/api/companies/{id}/departments", tag = "companies",
    params(("id" = i32, Path, description = "Company id")),
    responses((status = 200, description = "Departments of the company"))
)]
pub async fn departments(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Vec<department::Model>>, JsonApiError> {
    Ok(Json(company_service::departments_of_company(&state.db, id).await?))
}

#[utoipa::path(
    post, path = "/api/companies/{id}/departments", tag = "companies",
    params(("id" = i32, Path, description = "Company id")),
    request_body = crate::openapi::DepartmentInputDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Company Not Found"),
        (status = 409, description = "Name already taken in this company")
    )
)]
pub async fn add_department(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<DepartmentInput>,
) -> Result<(StatusCode, Json<department::Model>), JsonApiError> {
    let created = company_service::add_department(&state.db, id, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    delete, path = "/api/companies/{id}/departments/{department_id}", tag = "companies",
    params(
        ("id" = i32, Path, description = "Company id"),
        ("department_id" = i32, Path, description = "Department id")
    ),
    responses((status = 204, description = "Department removed"), (status = 404, description = "Not Found"))
)]
pub async fn remove_department(
    State(state): State<AppState>,
    Path((id, department_id)): Path<(i32, i32)>,
) -> Result<StatusCode, JsonApiError> {
    company_service::remove_department(&state.db, id, department_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/api/companies/name/{name}/departments", tag = "companies",
    params(("name" = String, Path, description = "Exact company name")),
    responses((status = 200, description = "Departments of the company"), (status = 404, description = "Company Not Found"))
)]
pub async fn departments_by_company_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<department::Model>>, JsonApiError> {
    Ok(Json(company_service::departments_of_company_named(&state.db, &name).await?))
}

#[utoipa::path(
    get, path = "/api/companies/industry/{industry}", tag = "companies",
    params(("industry" = String, Path, description = "Exact industry")),
    responses((status = 200, description = "Companies in the industry"))
)]
pub async fn by_industry(State(state): State<AppState>, Path(industry): Path<String>) -> Result<Json<Vec<company::Model>>, JsonApiError> {
    Ok(Json(company_service::companies_by_industry(&state.db, &industry).await?))
}

#[utoipa::path(
    get, path = "/api/companies/search", tag = "companies",
    params(NameQuery),
    responses((status = 200, description = "Companies whose name contains the needle, ignoring case"))
)]
pub async fn search(State(state): State<AppState>, Query(q): Query<NameQuery>) -> Result<Json<Vec<company::Model>>, JsonApiError> {
    Ok(Json(company_service::search_companies_by_name(&state.db, &q.name).await?))
}

#[utoipa::path(
    get, path = "/api/companies/with-min-departments/{count}", tag = "companies",
    params(("count" = i64, Path, description = "Exclusive lower bound")),
    responses((status = 200, description = "Companies with more departments than count"))
)]
pub async fn with_min_departments(State(state): State<AppState>, Path(count): Path<i64>) -> Result<Json<Vec<company::Model>>, JsonApiError> {
    Ok(Json(company_service::companies_with_more_departments_than(&state.db, count).await?))
}

#[utoipa::path(
    get, path = "/api/companies/with-min-employees/{count}", tag = "companies",
    params(("count" = i64, Path, description = "Exclusive lower bound")),
    responses((status = 200, description = "Companies with more employees than count"))
)]
pub async fn with_min_employees(State(state): State<AppState>, Path(count): Path<i64>) -> Result<Json<Vec<company::Model>>, JsonApiError> {
    Ok(Json(company_service::companies_with_more_employees_than(&state.db, count).await?))
}

#[utoipa::path(get, path = "/api/companies/health", tag = "health", responses((status = 200, description = "Company service is running")))]
pub async fn health() -> String {
    liveness_message("Company")
}
