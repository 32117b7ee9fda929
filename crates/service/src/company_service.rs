use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{info, instrument};

use models::company::{self, CompanyInput};
use models::department::{self, DepartmentInput};

use crate::department_service;
use crate::errors::ServiceError;
use crate::repository::{company as repo, department as department_repo};

/// Create a company; the name must be unused.
#[instrument(skip(db, input), fields(name = %input.name))]
pub async fn create_company(db: &DatabaseConnection, input: CompanyInput) -> Result<company::Model, ServiceError> {
    input.validate()?;
    let txn = db.begin().await?;
    if repo::exists_by_name(&txn, &input.name).await? {
        return Err(ServiceError::Conflict(format!("company '{}' already exists", input.name)));
    }
    let created = repo::insert(&txn, &input).await?;
    txn.commit().await?;
    info!(id = created.id, "company created");
    Ok(created)
}

pub async fn list_companies(db: &DatabaseConnection) -> Result<Vec<company::Model>, ServiceError> {
    repo::find_all(db).await
}

pub async fn get_company(db: &DatabaseConnection, id: i32) -> Result<Option<company::Model>, ServiceError> {
    repo::find_by_id(db, id).await
}

pub async fn get_company_by_name(db: &DatabaseConnection, name: &str) -> Result<Option<company::Model>, ServiceError> {
    repo::find_by_name(db, name).await
}

/// Overwrite name, description, industry and address.
#[instrument(skip(db, input))]
pub async fn update_company(db: &DatabaseConnection, id: i32, input: CompanyInput) -> Result<company::Model, ServiceError> {
    input.validate()?;
    let txn = db.begin().await?;
    if repo::find_by_id(&txn, id).await?.is_none() {
        return Err(ServiceError::not_found("company", id));
    }
    if repo::exists_by_name_excluding(&txn, &input.name, id).await? {
        return Err(ServiceError::Conflict(format!("company '{}' already exists", input.name)));
    }
    let updated = repo::update(&txn, id, &input)
        .await?
        .ok_or_else(|| ServiceError::not_found("company", id))?;
    txn.commit().await?;
    info!(id, "company updated");
    Ok(updated)
}

/// Delete a company with all of its departments and their employees.
#[instrument(skip(db))]
pub async fn delete_company(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    if !repo::delete(&txn, id).await? {
        return Err(ServiceError::not_found("company", id));
    }
    txn.commit().await?;
    info!(id, "company deleted");
    Ok(())
}

/// Create a department under an existing company.
#[instrument(skip(db, input), fields(name = %input.name))]
pub async fn add_department(
    db: &DatabaseConnection,
    company_id: i32,
    input: DepartmentInput,
) -> Result<department::Model, ServiceError> {
    input.validate()?;
    let txn = db.begin().await?;
    let created = department_service::insert_checked(&txn, company_id, &input).await?;
    txn.commit().await?;
    info!(id = created.id, company_id, "department added to company");
    Ok(created)
}

/// Detach a department from its company, which deletes it and its employees.
#[instrument(skip(db))]
pub async fn remove_department(db: &DatabaseConnection, company_id: i32, department_id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    match department_repo::find_by_id(&txn, department_id).await? {
        Some(d) if d.company_id == company_id => {}
        _ => {
            return Err(ServiceError::NotFound(format!(
                "department {} not found in company {}",
                department_id, company_id
            )))
        }
    }
    department_repo::delete(&txn, department_id).await?;
    txn.commit().await?;
    info!(company_id, department_id, "department removed from company");
    Ok(())
}

pub async fn departments_of_company(db: &DatabaseConnection, company_id: i32) -> Result<Vec<department::Model>, ServiceError> {
    department_repo::find_by_company_id(db, company_id).await
}

pub async fn departments_of_company_named(db: &DatabaseConnection, name: &str) -> Result<Vec<department::Model>, ServiceError> {
    let company = repo::find_by_name(db, name)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("company '{}' not found", name)))?;
    department_repo::find_by_company_id(db, company.id).await
}

pub async fn companies_by_industry(db: &DatabaseConnection, industry: &str) -> Result<Vec<company::Model>, ServiceError> {
    repo::find_by_industry(db, industry).await
}

pub async fn search_companies_by_name(db: &DatabaseConnection, needle: &str) -> Result<Vec<company::Model>, ServiceError> {
    repo::search_by_name(db, needle).await
}

pub async fn companies_with_more_departments_than(db: &DatabaseConnection, min: i64) -> Result<Vec<company::Model>, ServiceError> {
    repo::with_more_departments_than(db, min).await
}

pub async fn companies_with_more_employees_than(db: &DatabaseConnection, min: i64) -> Result<Vec<company::Model>, ServiceError> {
    repo::with_more_employees_than(db, min).await
}

pub async fn company_exists(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    Ok(repo::find_by_id(db, id).await?.is_some())
}

pub async fn company_exists_by_name(db: &DatabaseConnection, name: &str) -> Result<bool, ServiceError> {
    repo::exists_by_name(db, name).await
}
