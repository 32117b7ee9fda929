use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};

use common::types::liveness_message;
use models::department::{self, DepartmentInput, NewDepartment};
use models::employee::EmployeeDraft;
use service::department_service;

use crate::dto::{employee_list, EmployeeResponse};
use crate::errors::JsonApiError;
use crate::routes::companies::NameQuery;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/health", get(health))
        .route("/search", get(search))
        .route("/location/:location", get(by_location))
        .route("/with-min-employees/:count", get(with_min_employees))
        .route("/ordered-by-employee-count", get(ordered_by_employee_count))
        .route("/company/:company_id", get(by_company))
        .route("/company/:company_id/name/:name/employees", get(employees_by_department_name))
        .route("/:id", get(get_one).put(update).delete(remove))
        .route("/:id/employees", get(employees).post(add_employee))
        .route("/:id/employees/:employee_id", delete(remove_employee))
        .route("/:id/employee-count", get(employee_count))
}

#[utoipa::path(get, path = "/api/departments", tag = "departments", responses((status = 200, description = "All departments")))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<department::Model>>, JsonApiError> {
    Ok(Json(department_service::list_departments(&state.db).await?))
}

#[utoipa::path(
    post, path = "/api/departments", tag = "departments",
    request_body = crate::openapi::NewDepartmentDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Company Not Found"),
        (status = 409, description = "Name already taken in this company")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewDepartment>,
) -> Result<(StatusCode, Json<department::Model>), JsonApiError> {
    let created = department_service::create_department(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/departments/{id}", tag = "departments",
    params(("id" = i32, Path, description = "Department id")),
    responses((status = 200, description = "Found"), (status = 404, description = "Not Found"))
)]
pub async fn get_one(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<department::Model>, JsonApiError> {
    department_service::get_department(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(format!("department {id} not found")))
}

#[utoipa::path(
    put, path = "/api/departments/{id}", tag = "departments",
    params(("id" = i32, Path, description = "Department id")),
    request_body = crate::openapi::DepartmentInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Name already taken in this company")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<DepartmentInput>,
) -> Result<Json<department::Model>, JsonApiError> {
    Ok(Json(department_service::update_department(&state.db, id, input).await?))
}

#[utoipa::path(
    delete, path = "/api/departments/{id}", tag = "departments",
    params(("id" = i32, Path, description = "Department id")),
    responses((status = 204, description = "Deleted with its employees"), (status = 404, description = "Not Found"))
)]
pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    department_service::delete_department(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/api/departments/{id}/employees", tag = "departments",
    params(("id" = i32, Path, description = "Department id")),
    responses((status = 200, description = "Employees of the department"))
)]
pub async fn employees(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Vec<EmployeeResponse>>, JsonApiError> {
    Ok(Json(employee_list(department_service::employees_of_department(&state.db, id).await?)))
}

#[utoipa::path(
    post, path = "/api/departments/{id}/employees", tag = "departments",
    params(("id" = i32, Path, description = "Department id")),
    request_body = crate::openapi::EmployeeDraftDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Department Not Found"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn add_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(draft): Json<EmployeeDraft>,
) -> Result<(StatusCode, Json<EmployeeResponse>), JsonApiError> {
    let created = department_service::add_employee(&state.db, id, draft).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    delete, path = "/api/departments/{id}/employees/{employee_id}", tag = "departments",
    params(
        ("id" = i32, Path, description = "Department id"),
        ("employee_id" = i32, Path, description = "Employee id")
    ),
    responses((status = 204, description = "Employee removed"), (status = 404, description = "Not Found"))
)]
pub async fn remove_employee(
    State(state): State<AppState>,
    Path((id, employee_id)): Path<(i32, i32)>,
) -> Result<StatusCode, JsonApiError> {
    department_service::remove_employee(&state.db, id, employee_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/api/departments/{id}/employee-count", tag = "departments",
    params(("id" = i32, Path, description = "Department id")),
    responses((status = 200, description = "Number of employees"))
)]
pub async fn employee_count(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<u64>, JsonApiError> {
    Ok(Json(department_service::employee_count(&state.db, id).await?))
}

#[utoipa::path(
    get, path = "/api/departments/location/{location}", tag = "departments",
    params(("location" = String, Path, description = "Exact location")),
    responses((status = 200, description = "Departments at the location"))
)]
pub async fn by_location(State(state): State<AppState>, Path(location): Path<String>) -> Result<Json<Vec<department::Model>>, JsonApiError> {
    Ok(Json(department_service::departments_by_location(&state.db, &location).await?))
}

#[utoipa::path(
    get, path = "/api/departments/search", tag = "departments",
    params(NameQuery),
    responses((status = 200, description = "Departments whose name contains the needle, ignoring case"))
)]
pub async fn search(State(state): State<AppState>, Query(q): Query<NameQuery>) -> Result<Json<Vec<department::Model>>, JsonApiError> {
    Ok(Json(department_service::search_departments_by_name(&state.db, &q.name).await?))
}

#[utoipa::path(
    get, path = "/api/departments/with-min-employees/{count}", tag = "departments",
    params(("count" = i64, Path, description = "Exclusive lower bound")),
    responses((status = 200, description = "Departments with more employees than count"))
)]
pub async fn with_min_employees(State(state): State<AppState>, Path(count): Path<i64>) -> Result<Json<Vec<department::Model>>, JsonApiError> {
    Ok(Json(department_service::departments_with_more_employees_than(&state.db, count).await?))
}

#[utoipa::path(
    get, path = "/api/departments/ordered-by-employee-count", tag = "departments",
    responses((status = 200, description = "Departments, most employees first"))
)]
pub async fn ordered_by_employee_count(State(state): State<AppState>) -> Result<Json<Vec<department::Model>>, JsonApiError> {
    Ok(Json(department_service::departments_ordered_by_employee_count(&state.db).await?))
}

#[utoipa::path(
    get, path = "/api/departments/company/{company_id}", tag = "departments",
    params(("company_id" = i32, Path, description = "Company id")),
    responses((status = 200, description = "Departments of the company"))
)]
pub async fn by_company(State(state): State<AppState>, Path(company_id): Path<i32>) -> Result<Json<Vec<department::Model>>, JsonApiError> {
    Ok(Json(department_service::departments_of_company(&state.db, company_id).await?))
}

#[utoipa::path(
    get, path = "/api/departments/company/{company_id}/name/{name}/employees", tag = "departments",
    params(
        ("company_id" = i32, Path, description = "Company id"),
        ("name" = String, Path, description = "Exact department name")
    ),
    responses((status = 200, description = "Employees of the department"), (status = 404, description = "Department Not Found"))
)]
pub async fn employees_by_department_name(
    State(state): State<AppState>,
    Path((company_id, name)): Path<(i32, String)>,
) -> Result<Json<Vec<EmployeeResponse>>, JsonApiError> {
    Ok(Json(employee_list(department_service::employees_of_department_named(&state.db, company_id, &name).await?)))
}

#[utoipa::path(get, path = "/api/departments/health", tag = "health", responses((status = 200, description = "Department service is running")))]
pub async fn health() -> String {
    liveness_message("Department")
}
