use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use common::types::liveness_message;
use models::employee::{EmployeeProfile, NewEmployee, NewFullTimeEmployee, NewPartTimeEmployee};
use service::employee_service;

use crate::dto::{employee_list, EmployeeResponse};
use crate::errors::JsonApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameSearchQuery {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HireDateRangeQuery {
    /// `YYYY-MM-DD`, inclusive.
    pub start_date: NaiveDate,
    /// `YYYY-MM-DD`, inclusive.
    pub end_date: NaiveDate,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SalaryRangeQuery {
    pub min_salary: String,
    pub max_salary: String,
}

fn parse_amount(raw: &str) -> Result<Decimal, JsonApiError> {
    Decimal::from_str(raw.trim()).map_err(|_| JsonApiError::bad_request(format!("'{raw}' is not a valid amount")))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/health", get(health))
        .route("/search", get(search))
        .route("/hire-date-range", get(hire_date_range))
        .route("/salary-range", get(salary_range))
        .route("/salary-greater-than/:amount", get(salary_greater_than))
        .route("/email/:email", get(by_email))
        .route("/full-time", get(list_full_time).post(create_full_time))
        .route("/full-time/min-bonus/:amount", get(full_time_min_bonus))
        .route("/part-time", get(list_part_time).post(create_part_time))
        .route("/part-time/min-hours/:hours", get(part_time_min_hours))
        .route("/part-time/expired-contracts", get(part_time_expired))
        .route("/department/:id", get(by_department))
        .route("/department/:id/ordered-by-salary", get(by_department_ordered_by_salary))
        .route("/department/:id/count", get(count_by_department))
        .route("/company/:id", get(by_company))
        .route("/company/:id/count", get(count_by_company))
        .route("/:id", get(get_one).put(update).delete(remove))
}

#[utoipa::path(get, path = "/api/employees", tag = "employees", responses((status = 200, description = "All employees of both kinds")))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<EmployeeResponse>>, JsonApiError> {
    Ok(Json(employee_list(employee_service::list_employees(&state.db).await?)))
}

#[utoipa::path(
    post, path = "/api/employees", tag = "employees",
    request_body = crate::openapi::NewEmployeeDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Department Not Found"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewEmployee>,
) -> Result<(StatusCode, Json<EmployeeResponse>), JsonApiError> {
    let created = employee_service::create_employee(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    get, path = "/api/employees/{id}", tag = "employees",
    params(("id" = i32, Path, description = "Employee id")),
    responses((status = 200, description = "Found"), (status = 404, description = "Not Found"))
)]
pub async fn get_one(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<EmployeeResponse>, JsonApiError> {
    employee_service::get_employee(&state.db, id)
        .await?
        .map(|e| Json(e.into()))
        .ok_or_else(|| JsonApiError::not_found(format!("employee {id} not found")))
}

#[utoipa::path(
    put, path = "/api/employees/{id}", tag = "employees",
    params(("id" = i32, Path, description = "Employee id")),
    request_body = crate::openapi::EmployeeProfileDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(profile): Json<EmployeeProfile>,
) -> Result<Json<EmployeeResponse>, JsonApiError> {
    Ok(Json(employee_service::update_employee(&state.db, id, profile).await?.into()))
}

#[utoipa::path(
    delete, path = "/api/employees/{id}", tag = "employees",
    params(("id" = i32, Path, description = "Employee id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    employee_service::delete_employee(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/api/employees/email/{email}", tag = "employees",
    params(("email" = String, Path, description = "Exact email")),
    responses((status = 200, description = "Found"), (status = 404, description = "Not Found"))
)]
pub async fn by_email(State(state): State<AppState>, Path(email): Path<String>) -> Result<Json<EmployeeResponse>, JsonApiError> {
    employee_service::get_employee_by_email(&state.db, &email)
        .await?
        .map(|e| Json(e.into()))
        .ok_or_else(|| JsonApiError::not_found(format!("employee with email '{email}' not found")))
}

#[utoipa::path(get, path = "/api/employees/full-time", tag = "employees", responses((status = 200, description = "Full-time employees")))]
pub async fn list_full_time(State(state): State<AppState>) -> Result<Json<Vec<EmployeeResponse>>, JsonApiError> {
    Ok(Json(employee_list(employee_service::list_full_time_employees(&state.db).await?)))
}

#[utoipa::path(
    post, path = "/api/employees/full-time", tag = "employees",
    request_body = crate::openapi::NewFullTimeEmployeeDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Department Not Found"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn create_full_time(
    State(state): State<AppState>,
    Json(input): Json<NewFullTimeEmployee>,
) -> Result<(StatusCode, Json<EmployeeResponse>), JsonApiError> {
    let created = employee_service::create_full_time_employee(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    get, path = "/api/employees/full-time/min-bonus/{amount}", tag = "employees",
    params(("amount" = String, Path, description = "Exclusive lower bound on the annual bonus")),
    responses((status = 200, description = "Full-time employees with a larger bonus"), (status = 400, description = "Malformed amount"))
)]
pub async fn full_time_min_bonus(
    State(state): State<AppState>,
    Path(amount): Path<String>,
) -> Result<Json<Vec<EmployeeResponse>>, JsonApiError> {
    let bonus = parse_amount(&amount)?;
    Ok(Json(employee_list(employee_service::full_time_employees_with_bonus_above(&state.db, &bonus).await?)))
}

#[utoipa::path(get, path = "/api/employees/part-time", tag = "employees", responses((status = 200, description = "Part-time employees")))]
pub async fn list_part_time(State(state): State<AppState>) -> Result<Json<Vec<EmployeeResponse>>, JsonApiError> {
    Ok(Json(employee_list(employee_service::list_part_time_employees(&state.db).await?)))
}

#[utoipa::path(
    post, path = "/api/employees/part-time", tag = "employees",
    request_body = crate::openapi::NewPartTimeEmployeeDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Department Not Found"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn create_part_time(
    State(state): State<AppState>,
    Json(input): Json<NewPartTimeEmployee>,
) -> Result<(StatusCode, Json<EmployeeResponse>), JsonApiError> {
    let created = employee_service::create_part_time_employee(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    get, path = "/api/employees/part-time/min-hours/{hours}", tag = "employees",
    params(("hours" = i32, Path, description = "Inclusive lower bound on weekly hours")),
    responses((status = 200, description = "Part-time employees working at least that many hours"))
)]
pub async fn part_time_min_hours(
    State(state): State<AppState>,
    Path(hours): Path<i32>,
) -> Result<Json<Vec<EmployeeResponse>>, JsonApiError> {
    Ok(Json(employee_list(employee_service::part_time_employees_with_min_hours(&state.db, hours).await?)))
}

#[utoipa::path(
    get, path = "/api/employees/part-time/expired-contracts", tag = "employees",
    responses((status = 200, description = "Part-time employees whose contract ended before today"))
)]
pub async fn part_time_expired(State(state): State<AppState>) -> Result<Json<Vec<EmployeeResponse>>, JsonApiError> {
    Ok(Json(employee_list(employee_service::part_time_employees_with_expired_contracts(&state.db).await?)))
}

#[utoipa::path(
    get, path = "/api/employees/department/{id}", tag = "employees",
    params(("id" = i32, Path, description = "Department id")),
    responses((status = 200, description = "Employees of the department"))
)]
pub async fn by_department(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Vec<EmployeeResponse>>, JsonApiError> {
    Ok(Json(employee_list(employee_service::employees_of_department(&state.db, id).await?)))
}

#[utoipa::path(
    get, path = "/api/employees/department/{id}/ordered-by-salary", tag = "employees",
    params(("id" = i32, Path, description = "Department id")),
    responses((status = 200, description = "Employees of the department, highest salary first"))
)]
pub async fn by_department_ordered_by_salary(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<EmployeeResponse>>, JsonApiError> {
    Ok(Json(employee_list(employee_service::employees_of_department_by_salary(&state.db, id).await?)))
}

#[utoipa::path(
    get, path = "/api/employees/department/{id}/count", tag = "employees",
    params(("id" = i32, Path, description = "Department id")),
    responses((status = 200, description = "Number of employees in the department"))
)]
pub async fn count_by_department(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<u64>, JsonApiError> {
    Ok(Json(employee_service::employee_count_by_department(&state.db, id).await?))
}

#[utoipa::path(
    get, path = "/api/employees/company/{id}", tag = "employees",
    params(("id" = i32, Path, description = "Company id")),
    responses((status = 200, description = "Employees of every department of the company"))
)]
pub async fn by_company(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Vec<EmployeeResponse>>, JsonApiError> {
    Ok(Json(employee_list(employee_service::employees_of_company(&state.db, id).await?)))
}

#[utoipa::path(
    get, path = "/api/employees/company/{id}/count", tag = "employees",
    params(("id" = i32, Path, description = "Company id")),
    responses((status = 200, description = "Number of employees in the company"))
)]
pub async fn count_by_company(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<u64>, JsonApiError> {
    Ok(Json(employee_service::employee_count_by_company(&state.db, id).await?))
}

#[utoipa::path(
    get, path = "/api/employees/search", tag = "employees",
    params(NameSearchQuery),
    responses((status = 200, description = "Employees whose first or last name contains the needle, ignoring case"))
)]
pub async fn search(
    State(state): State<AppState>,
    Query(q): Query<NameSearchQuery>,
) -> Result<Json<Vec<EmployeeResponse>>, JsonApiError> {
    Ok(Json(employee_list(employee_service::search_employees_by_name(&state.db, &q.first_name, &q.last_name).await?)))
}

#[utoipa::path(
    get, path = "/api/employees/hire-date-range", tag = "employees",
    params(HireDateRangeQuery),
    responses((status = 200, description = "Employees hired within the range"))
)]
pub async fn hire_date_range(
    State(state): State<AppState>,
    Query(q): Query<HireDateRangeQuery>,
) -> Result<Json<Vec<EmployeeResponse>>, JsonApiError> {
    Ok(Json(employee_list(employee_service::employees_hired_between(&state.db, q.start_date, q.end_date).await?)))
}

#[utoipa::path(
    get, path = "/api/employees/salary-range", tag = "employees",
    params(SalaryRangeQuery),
    responses((status = 200, description = "Employees with a salary within the range"), (status = 400, description = "Malformed amount"))
)]
pub async fn salary_range(
    State(state): State<AppState>,
    Query(q): Query<SalaryRangeQuery>,
) -> Result<Json<Vec<EmployeeResponse>>, JsonApiError> {
    let min = parse_amount(&q.min_salary)?;
    let max = parse_amount(&q.max_salary)?;
    Ok(Json(employee_list(employee_service::employees_with_salary_between(&state.db, &min, &max).await?)))
}

#[utoipa::path(
    get, path = "/api/employees/salary-greater-than/{amount}", tag = "employees",
    params(("amount" = String, Path, description = "Exclusive lower bound on salary")),
    responses((status = 200, description = "Employees earning more"), (status = 400, description = "Malformed amount"))
)]
pub async fn salary_greater_than(
    State(state): State<AppState>,
    Path(amount): Path<String>,
) -> Result<Json<Vec<EmployeeResponse>>, JsonApiError> {
    let salary = parse_amount(&amount)?;
    Ok(Json(employee_list(employee_service::employees_with_salary_above(&state.db, &salary).await?)))
}

#[utoipa::path(get, path = "/api/employees/health", tag = "health", responses((status = 200, description = "Employee service is running")))]
pub async fn health() -> String {
    liveness_message("Employee")
}
