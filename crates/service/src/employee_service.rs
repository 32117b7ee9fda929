use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use tracing::{info, instrument};

use models::employee::{Employee, EmployeeDraft, EmployeeProfile, NewEmployee, NewFullTimeEmployee, NewPartTimeEmployee};

use crate::errors::ServiceError;
use crate::repository::{department as department_repo, employee as repo};

/// Insert an employee after checking the department exists and the email
/// is unused by employees of either kind.
pub(crate) async fn insert_checked<C: ConnectionTrait>(
    conn: &C,
    department_id: i32,
    draft: &EmployeeDraft,
) -> Result<Employee, ServiceError> {
    if department_repo::find_by_id(conn, department_id).await?.is_none() {
        return Err(ServiceError::not_found("department", department_id));
    }
    if repo::exists_by_email(conn, &draft.profile.email).await? {
        return Err(ServiceError::Conflict(format!("email '{}' is already in use", draft.profile.email)));
    }
    repo::insert(conn, department_id, draft).await
}

async fn create_validated(db: &DatabaseConnection, new: NewEmployee) -> Result<Employee, ServiceError> {
    let txn = db.begin().await?;
    let created = insert_checked(&txn, new.department_id, &new.draft).await?;
    txn.commit().await?;
    info!(id = created.id, kind = %created.kind(), department_id = created.department_id, "employee created");
    Ok(created)
}

#[instrument(skip(db, new), fields(department_id = new.department_id, email = %new.draft.profile.email))]
pub async fn create_employee(db: &DatabaseConnection, new: NewEmployee) -> Result<Employee, ServiceError> {
    new.validate()?;
    create_validated(db, new).await
}

#[instrument(skip(db, new), fields(department_id = new.department_id, email = %new.profile.email))]
pub async fn create_full_time_employee(db: &DatabaseConnection, new: NewFullTimeEmployee) -> Result<Employee, ServiceError> {
    new.validate()?;
    create_validated(db, new.into()).await
}

#[instrument(skip(db, new), fields(department_id = new.department_id, email = %new.profile.email))]
pub async fn create_part_time_employee(db: &DatabaseConnection, new: NewPartTimeEmployee) -> Result<Employee, ServiceError> {
    new.validate()?;
    create_validated(db, new.into()).await
}

pub async fn list_employees(db: &DatabaseConnection) -> Result<Vec<Employee>, ServiceError> {
    repo::find_all(db).await
}

pub async fn get_employee(db: &DatabaseConnection, id: i32) -> Result<Option<Employee>, ServiceError> {
    repo::find_by_id(db, id).await
}

pub async fn get_employee_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Employee>, ServiceError> {
    repo::find_by_email(db, email).await
}

/// Overwrite the common fields; department and kind-specific terms stay.
#[instrument(skip(db, profile))]
pub async fn update_employee(db: &DatabaseConnection, id: i32, profile: EmployeeProfile) -> Result<Employee, ServiceError> {
    profile.validate()?;
    let txn = db.begin().await?;
    if repo::find_by_id(&txn, id).await?.is_none() {
        return Err(ServiceError::not_found("employee", id));
    }
    if repo::exists_by_email_excluding(&txn, &profile.email, id).await? {
        return Err(ServiceError::Conflict(format!("email '{}' is already in use", profile.email)));
    }
    let updated = repo::update_profile(&txn, id, &profile)
        .await?
        .ok_or_else(|| ServiceError::not_found("employee", id))?;
    txn.commit().await?;
    info!(id, "employee updated");
    Ok(updated)
}

#[instrument(skip(db))]
pub async fn delete_employee(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    if !repo::delete(&txn, id).await? {
        return Err(ServiceError::not_found("employee", id));
    }
    txn.commit().await?;
    info!(id, "employee deleted");
    Ok(())
}

pub async fn list_full_time_employees(db: &DatabaseConnection) -> Result<Vec<Employee>, ServiceError> {
    repo::find_full_time(db).await
}

pub async fn full_time_employees_with_bonus_above(db: &DatabaseConnection, bonus: &Decimal) -> Result<Vec<Employee>, ServiceError> {
    repo::find_full_time_with_bonus_above(db, bonus).await
}

pub async fn list_part_time_employees(db: &DatabaseConnection) -> Result<Vec<Employee>, ServiceError> {
    repo::find_part_time(db).await
}

pub async fn part_time_employees_with_min_hours(db: &DatabaseConnection, hours: i32) -> Result<Vec<Employee>, ServiceError> {
    repo::find_part_time_with_min_hours(db, hours).await
}

/// Part-time employees whose contract ended before today's local date.
pub async fn part_time_employees_with_expired_contracts(db: &DatabaseConnection) -> Result<Vec<Employee>, ServiceError> {
    part_time_employees_with_contracts_expired_on(db, Local::now().date_naive()).await
}

pub async fn part_time_employees_with_contracts_expired_on(
    db: &DatabaseConnection,
    today: NaiveDate,
) -> Result<Vec<Employee>, ServiceError> {
    repo::find_part_time_with_contract_ending_before(db, today).await
}

pub async fn employees_of_department(db: &DatabaseConnection, department_id: i32) -> Result<Vec<Employee>, ServiceError> {
    repo::find_by_department_id(db, department_id).await
}

pub async fn employees_of_company(db: &DatabaseConnection, company_id: i32) -> Result<Vec<Employee>, ServiceError> {
    repo::find_by_company_id(db, company_id).await
}

pub async fn search_employees_by_name(db: &DatabaseConnection, first: &str, last: &str) -> Result<Vec<Employee>, ServiceError> {
    repo::search_by_name(db, first, last).await
}

pub async fn employees_hired_between(db: &DatabaseConnection, start: NaiveDate, end: NaiveDate) -> Result<Vec<Employee>, ServiceError> {
    repo::find_by_hire_date_range(db, start, end).await
}

pub async fn employees_with_salary_between(db: &DatabaseConnection, min: &Decimal, max: &Decimal) -> Result<Vec<Employee>, ServiceError> {
    repo::find_by_salary_range(db, min, max).await
}

pub async fn employees_of_department_by_salary(db: &DatabaseConnection, department_id: i32) -> Result<Vec<Employee>, ServiceError> {
    repo::find_by_department_ordered_by_salary(db, department_id).await
}

pub async fn employees_with_salary_above(db: &DatabaseConnection, salary: &Decimal) -> Result<Vec<Employee>, ServiceError> {
    repo::find_by_salary_greater_than(db, salary).await
}

pub async fn employee_exists(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    Ok(repo::find_by_id(db, id).await?.is_some())
}

pub async fn employee_exists_by_email(db: &DatabaseConnection, email: &str) -> Result<bool, ServiceError> {
    repo::exists_by_email(db, email).await
}

pub async fn employee_count_by_department(db: &DatabaseConnection, department_id: i32) -> Result<u64, ServiceError> {
    repo::count_by_department_id(db, department_id).await
}

pub async fn employee_count_by_company(db: &DatabaseConnection, company_id: i32) -> Result<u64, ServiceError> {
    repo::count_by_company_id(db, company_id).await
}
