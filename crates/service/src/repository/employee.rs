use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Select, Set,
};

use models::department;
use models::employee::{self, Employee, EmployeeDraft, EmployeeKind, EmployeeProfile};
use models::money;

use super::contains_ci;
use crate::errors::ServiceError;

fn ordered() -> Select<employee::Entity> {
    employee::Entity::find().order_by_asc(employee::Column::Id)
}

fn of_kind(kind: EmployeeKind) -> Select<employee::Entity> {
    employee::Entity::find().filter(employee::Column::EmployeeType.eq(kind.as_str()))
}

async fn fetch<C: ConnectionTrait>(db: &C, select: Select<employee::Entity>) -> Result<Vec<Employee>, ServiceError> {
    let rows = select.all(db).await?;
    Ok(employee::from_models(rows)?)
}

async fn fetch_one<C: ConnectionTrait>(db: &C, select: Select<employee::Entity>) -> Result<Option<Employee>, ServiceError> {
    match select.one(db).await? {
        Some(row) => Ok(Some(Employee::try_from(row)?)),
        None => Ok(None),
    }
}

pub async fn insert<C: ConnectionTrait>(db: &C, department_id: i32, draft: &EmployeeDraft) -> Result<Employee, ServiceError> {
    let am = employee::ActiveModel::from_draft(department_id, draft, Utc::now().into())?;
    let row = am.insert(db).await?;
    Ok(Employee::try_from(row)?)
}

/// Overwrite the common fields of an employee. `None` when it does not exist.
pub async fn update_profile<C: ConnectionTrait>(
    db: &C,
    id: i32,
    profile: &EmployeeProfile,
) -> Result<Option<Employee>, ServiceError> {
    let Some(found) = employee::Entity::find_by_id(id).one(db).await? else { return Ok(None) };
    let mut am: employee::ActiveModel = found.into();
    am.apply_profile(profile)?;
    am.updated_at = Set(Utc::now().into());
    let row = am.update(db).await?;
    Ok(Some(Employee::try_from(row)?))
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ServiceError> {
    let res = employee::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Employee>, ServiceError> {
    fetch_one(db, employee::Entity::find_by_id(id)).await
}

pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Employee>, ServiceError> {
    fetch(db, ordered()).await
}

pub async fn find_by_department_id<C: ConnectionTrait>(db: &C, department_id: i32) -> Result<Vec<Employee>, ServiceError> {
    fetch(db, ordered().filter(employee::Column::DepartmentId.eq(department_id))).await
}

/// Employees of every department owned by the company.
pub async fn find_by_company_id<C: ConnectionTrait>(db: &C, company_id: i32) -> Result<Vec<Employee>, ServiceError> {
    let select = ordered()
        .inner_join(department::Entity)
        .filter(department::Column::CompanyId.eq(company_id));
    fetch(db, select).await
}

pub async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<Option<Employee>, ServiceError> {
    fetch_one(db, employee::Entity::find().filter(employee::Column::Email.eq(email))).await
}

/// First name contains `first` OR last name contains `last`, ignoring case.
pub async fn search_by_name<C: ConnectionTrait>(db: &C, first: &str, last: &str) -> Result<Vec<Employee>, ServiceError> {
    let backend = db.get_database_backend();
    let cond = Condition::any()
        .add(contains_ci(backend, employee::Column::FirstName, first))
        .add(contains_ci(backend, employee::Column::LastName, last));
    fetch(db, ordered().filter(cond)).await
}

pub async fn find_by_hire_date_range<C: ConnectionTrait>(
    db: &C,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<Employee>, ServiceError> {
    fetch(db, ordered().filter(employee::Column::HireDate.between(start, end))).await
}

pub async fn find_by_salary_greater_than<C: ConnectionTrait>(db: &C, salary: &Decimal) -> Result<Vec<Employee>, ServiceError> {
    fetch(db, ordered().filter(employee::Column::SalaryCents.gt(money::cents_floor(salary)))).await
}

pub async fn find_by_salary_range<C: ConnectionTrait>(
    db: &C,
    min: &Decimal,
    max: &Decimal,
) -> Result<Vec<Employee>, ServiceError> {
    let select = ordered()
        .filter(employee::Column::SalaryCents.gte(money::cents_ceil(min)))
        .filter(employee::Column::SalaryCents.lte(money::cents_floor(max)));
    fetch(db, select).await
}

/// Highest salary first; equal salaries by id.
pub async fn find_by_department_ordered_by_salary<C: ConnectionTrait>(
    db: &C,
    department_id: i32,
) -> Result<Vec<Employee>, ServiceError> {
    let select = employee::Entity::find()
        .filter(employee::Column::DepartmentId.eq(department_id))
        .order_by_desc(employee::Column::SalaryCents)
        .order_by_asc(employee::Column::Id);
    fetch(db, select).await
}

pub async fn exists_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<bool, ServiceError> {
    let n = employee::Entity::find().filter(employee::Column::Email.eq(email)).count(db).await?;
    Ok(n > 0)
}

pub async fn exists_by_email_excluding<C: ConnectionTrait>(db: &C, email: &str, id: i32) -> Result<bool, ServiceError> {
    let n = employee::Entity::find()
        .filter(employee::Column::Email.eq(email))
        .filter(employee::Column::Id.ne(id))
        .count(db)
        .await?;
    Ok(n > 0)
}

pub async fn count_by_department_id<C: ConnectionTrait>(db: &C, department_id: i32) -> Result<u64, ServiceError> {
    Ok(employee::Entity::find()
        .filter(employee::Column::DepartmentId.eq(department_id))
        .count(db)
        .await?)
}

pub async fn count_by_company_id<C: ConnectionTrait>(db: &C, company_id: i32) -> Result<u64, ServiceError> {
    Ok(employee::Entity::find()
        .inner_join(department::Entity)
        .filter(department::Column::CompanyId.eq(company_id))
        .count(db)
        .await?)
}

pub async fn find_full_time<C: ConnectionTrait>(db: &C) -> Result<Vec<Employee>, ServiceError> {
    fetch(db, of_kind(EmployeeKind::FullTime).order_by_asc(employee::Column::Id)).await
}

pub async fn find_part_time<C: ConnectionTrait>(db: &C) -> Result<Vec<Employee>, ServiceError> {
    fetch(db, of_kind(EmployeeKind::PartTime).order_by_asc(employee::Column::Id)).await
}

/// Full-time employees whose bonus is strictly above `bonus`.
pub async fn find_full_time_with_bonus_above<C: ConnectionTrait>(db: &C, bonus: &Decimal) -> Result<Vec<Employee>, ServiceError> {
    let select = of_kind(EmployeeKind::FullTime)
        .filter(employee::Column::AnnualBonusCents.gt(money::cents_floor(bonus)))
        .order_by_asc(employee::Column::Id);
    fetch(db, select).await
}

pub async fn find_part_time_with_min_hours<C: ConnectionTrait>(db: &C, hours: i32) -> Result<Vec<Employee>, ServiceError> {
    let select = of_kind(EmployeeKind::PartTime)
        .filter(employee::Column::HoursPerWeek.gte(hours))
        .order_by_asc(employee::Column::Id);
    fetch(db, select).await
}

/// Part-time contracts whose end date is strictly before `date`.
pub async fn find_part_time_with_contract_ending_before<C: ConnectionTrait>(
    db: &C,
    date: NaiveDate,
) -> Result<Vec<Employee>, ServiceError> {
    let select = of_kind(EmployeeKind::PartTime)
        .filter(employee::Column::ContractEndDate.lt(date))
        .order_by_asc(employee::Column::Id);
    fetch(db, select).await
}
