use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CompanyInputDoc {
    pub name: String,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub address: Option<String>,
}

#[derive(ToSchema)]
pub struct DepartmentInputDoc {
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
}

#[derive(ToSchema)]
pub struct NewDepartmentDoc {
    pub company_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
}

/// Amounts are decimal strings with at most two fractional digits, dates are `YYYY-MM-DD`.
#[derive(ToSchema)]
pub struct EmployeeProfileDoc {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    #[schema(example = "2024-01-15")]
    pub hire_date: String,
    #[schema(example = "90000.00")]
    pub salary: String,
    pub job_title: Option<String>,
}

/// Profile fields plus `employee_type` and the fields of that kind.
#[derive(ToSchema)]
pub struct EmployeeDraftDoc {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub hire_date: String,
    pub salary: String,
    pub job_title: Option<String>,
    #[schema(example = "FULL_TIME")]
    pub employee_type: String,
    pub annual_bonus: Option<String>,
    pub stock_options: Option<i32>,
    pub health_insurance: Option<bool>,
    pub retirement_plan: Option<bool>,
    pub hours_per_week: Option<i32>,
    pub flexible_schedule: Option<bool>,
    pub remote_work: Option<bool>,
    pub contract_end_date: Option<String>,
}

#[derive(ToSchema)]
pub struct NewEmployeeDoc {
    pub department_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub hire_date: String,
    pub salary: String,
    pub job_title: Option<String>,
    #[schema(example = "PART_TIME")]
    pub employee_type: String,
    pub annual_bonus: Option<String>,
    pub stock_options: Option<i32>,
    pub health_insurance: Option<bool>,
    pub retirement_plan: Option<bool>,
    pub hours_per_week: Option<i32>,
    pub flexible_schedule: Option<bool>,
    pub remote_work: Option<bool>,
    pub contract_end_date: Option<String>,
}

#[derive(ToSchema)]
pub struct NewFullTimeEmployeeDoc {
    pub department_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub hire_date: String,
    pub salary: String,
    pub job_title: Option<String>,
    pub annual_bonus: Option<String>,
    pub stock_options: Option<i32>,
    pub health_insurance: Option<bool>,
    pub retirement_plan: Option<bool>,
}

#[derive(ToSchema)]
pub struct NewPartTimeEmployeeDoc {
    pub department_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub hire_date: String,
    pub salary: String,
    pub job_title: Option<String>,
    pub hours_per_week: i32,
    pub flexible_schedule: Option<bool>,
    pub remote_work: Option<bool>,
    pub contract_end_date: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::companies::list,
        crate::routes::companies::create,
        crate::routes::companies::get_one,
        crate::routes::companies::update,
        crate::routes::companies::remove,
        crate::routes::companies::by_name,
        crate::routes::companies::departments_by_company_name,
        crate::routes::companies::departments,
        crate::routes::companies::add_department,
        crate::routes::companies::remove_department,
        crate::routes::companies::by_industry,
        crate::routes::companies::search,
        crate::routes::companies::with_min_departments,
        crate::routes::companies::with_min_employees,
        crate::routes::companies::health,
        crate::routes::departments::list,
        crate::routes::departments::create,
        crate::routes::departments::get_one,
        crate::routes::departments::update,
        crate::routes::departments::remove,
        crate::routes::departments::employees,
        crate::routes::departments::add_employee,
        crate::routes::departments::remove_employee,
        crate::routes::departments::employee_count,
        crate::routes::departments::by_location,
        crate::routes::departments::search,
        crate::routes::departments::with_min_employees,
        crate::routes::departments::ordered_by_employee_count,
        crate::routes::departments::by_company,
        crate::routes::departments::employees_by_department_name,
        crate::routes::departments::health,
        crate::routes::employees::list,
        crate::routes::employees::create,
        crate::routes::employees::get_one,
        crate::routes::employees::update,
        crate::routes::employees::remove,
        crate::routes::employees::by_email,
        crate::routes::employees::list_full_time,
        crate::routes::employees::create_full_time,
        crate::routes::employees::full_time_min_bonus,
        crate::routes::employees::list_part_time,
        crate::routes::employees::create_part_time,
        crate::routes::employees::part_time_min_hours,
        crate::routes::employees::part_time_expired,
        crate::routes::employees::by_department,
        crate::routes::employees::by_department_ordered_by_salary,
        crate::routes::employees::count_by_department,
        crate::routes::employees::by_company,
        crate::routes::employees::count_by_company,
        crate::routes::employees::search,
        crate::routes::employees::hire_date_range,
        crate::routes::employees::salary_range,
        crate::routes::employees::salary_greater_than,
        crate::routes::employees::health,
    ),
    components(
        schemas(
            HealthResponse,
            CompanyInputDoc,
            DepartmentInputDoc,
            NewDepartmentDoc,
            EmployeeProfileDoc,
            EmployeeDraftDoc,
            NewEmployeeDoc,
            NewFullTimeEmployeeDoc,
            NewPartTimeEmployeeDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "companies"),
        (name = "departments"),
        (name = "employees")
    )
)]
pub struct ApiDoc;
