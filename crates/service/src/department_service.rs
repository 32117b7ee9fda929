use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use tracing::{info, instrument};

use models::department::{self, DepartmentInput, NewDepartment};
use models::employee::{Employee, EmployeeDraft};

use crate::employee_service;
use crate::errors::ServiceError;
use crate::repository::{company as company_repo, department as repo, employee as employee_repo};

/// Insert a department after checking that the company exists and the
/// name is free within it.
pub(crate) async fn insert_checked<C: ConnectionTrait>(
    conn: &C,
    company_id: i32,
    input: &DepartmentInput,
) -> Result<department::Model, ServiceError> {
    if company_repo::find_by_id(conn, company_id).await?.is_none() {
        return Err(ServiceError::not_found("company", company_id));
    }
    if repo::exists_by_name_and_company_id(conn, &input.name, company_id).await? {
        return Err(ServiceError::Conflict(format!(
            "department '{}' already exists in company {}",
            input.name, company_id
        )));
    }
    repo::insert(conn, company_id, input).await
}

#[instrument(skip(db, new), fields(company_id = new.company_id, name = %new.department.name))]
pub async fn create_department(db: &DatabaseConnection, new: NewDepartment) -> Result<department::Model, ServiceError> {
    new.validate()?;
    let txn = db.begin().await?;
    let created = insert_checked(&txn, new.company_id, &new.department).await?;
    txn.commit().await?;
    info!(id = created.id, "department created");
    Ok(created)
}

pub async fn list_departments(db: &DatabaseConnection) -> Result<Vec<department::Model>, ServiceError> {
    repo::find_all(db).await
}

pub async fn get_department(db: &DatabaseConnection, id: i32) -> Result<Option<department::Model>, ServiceError> {
    repo::find_by_id(db, id).await
}

/// Overwrite name, description and location. The owning company stays.
#[instrument(skip(db, input))]
pub async fn update_department(
    db: &DatabaseConnection,
    id: i32,
    input: DepartmentInput,
) -> Result<department::Model, ServiceError> {
    input.validate()?;
    let txn = db.begin().await?;
    let current = repo::find_by_id(&txn, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("department", id))?;
    if repo::exists_by_name_and_company_id_excluding(&txn, &input.name, current.company_id, id).await? {
        return Err(ServiceError::Conflict(format!(
            "department '{}' already exists in company {}",
            input.name, current.company_id
        )));
    }
    let updated = repo::update(&txn, id, &input)
        .await?
        .ok_or_else(|| ServiceError::not_found("department", id))?;
    txn.commit().await?;
    info!(id, "department updated");
    Ok(updated)
}

/// Delete a department and its employees.
#[instrument(skip(db))]
pub async fn delete_department(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    if !repo::delete(&txn, id).await? {
        return Err(ServiceError::not_found("department", id));
    }
    txn.commit().await?;
    info!(id, "department deleted");
    Ok(())
}

#[instrument(skip(db, draft), fields(email = %draft.profile.email))]
pub async fn add_employee(db: &DatabaseConnection, department_id: i32, draft: EmployeeDraft) -> Result<Employee, ServiceError> {
    draft.validate()?;
    let txn = db.begin().await?;
    let created = employee_service::insert_checked(&txn, department_id, &draft).await?;
    txn.commit().await?;
    info!(id = created.id, department_id, "employee added to department");
    Ok(created)
}

/// Detach an employee from its department, which deletes the employee.
#[instrument(skip(db))]
pub async fn remove_employee(db: &DatabaseConnection, department_id: i32, employee_id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    match employee_repo::find_by_id(&txn, employee_id).await? {
        Some(e) if e.department_id == department_id => {}
        _ => {
            return Err(ServiceError::NotFound(format!(
                "employee {} not found in department {}",
                employee_id, department_id
            )))
        }
    }
    employee_repo::delete(&txn, employee_id).await?;
    txn.commit().await?;
    info!(department_id, employee_id, "employee removed from department");
    Ok(())
}

pub async fn employees_of_department(db: &DatabaseConnection, department_id: i32) -> Result<Vec<Employee>, ServiceError> {
    employee_repo::find_by_department_id(db, department_id).await
}

/// Employees of the department called `name` inside company `company_id`.
pub async fn employees_of_department_named(
    db: &DatabaseConnection,
    company_id: i32,
    name: &str,
) -> Result<Vec<Employee>, ServiceError> {
    let dept = repo::find_by_name_and_company_id(db, name, company_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("department '{}' not found in company {}", name, company_id)))?;
    employee_repo::find_by_department_id(db, dept.id).await
}

pub async fn departments_by_location(db: &DatabaseConnection, location: &str) -> Result<Vec<department::Model>, ServiceError> {
    repo::find_by_location(db, location).await
}

pub async fn search_departments_by_name(db: &DatabaseConnection, needle: &str) -> Result<Vec<department::Model>, ServiceError> {
    repo::search_by_name(db, needle).await
}

pub async fn departments_with_more_employees_than(db: &DatabaseConnection, min: i64) -> Result<Vec<department::Model>, ServiceError> {
    repo::with_more_employees_than(db, min).await
}

pub async fn departments_ordered_by_employee_count(db: &DatabaseConnection) -> Result<Vec<department::Model>, ServiceError> {
    repo::ordered_by_employee_count(db).await
}

pub async fn departments_of_company(db: &DatabaseConnection, company_id: i32) -> Result<Vec<department::Model>, ServiceError> {
    repo::find_by_company_id(db, company_id).await
}

pub async fn department_exists(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    Ok(repo::find_by_id(db, id).await?.is_some())
}

pub async fn department_exists_by_name(db: &DatabaseConnection, name: &str, company_id: i32) -> Result<bool, ServiceError> {
    repo::exists_by_name_and_company_id(db, name, company_id).await
}

pub async fn employee_count(db: &DatabaseConnection, department_id: i32) -> Result<u64, ServiceError> {
    employee_repo::count_by_department_id(db, department_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::company_service;
    use crate::test_support::{company, department, full_time, get_db, part_time};

    async fn acme(db: &DatabaseConnection) -> Result<i32, anyhow::Error> {
        Ok(company_service::create_company(db, company("Acme", None)).await?.id)
    }

    fn new_dept(company_id: i32, name: &str, location: Option<&str>) -> NewDepartment {
        NewDepartment { company_id, department: department(name, location) }
    }

    #[tokio::test]
    async fn department_crud_service() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let cid = acme(&db).await?;

        let d = create_department(&db, new_dept(cid, "Engineering", Some("Berlin"))).await?;
        assert_eq!(d.company_id, cid);
        assert_eq!(get_department(&db, d.id).await?.unwrap().name, "Engineering");

        let updated = update_department(&db, d.id, department("Platform", Some("Remote"))).await?;
        assert_eq!(updated.name, "Platform");
        assert_eq!(updated.location.as_deref(), Some("Remote"));
        assert_eq!(updated.company_id, cid);

        delete_department(&db, d.id).await?;
        assert!(!department_exists(&db, d.id).await?);
        assert!(matches!(delete_department(&db, d.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(
            update_department(&db, d.id, department("Platform", None)).await,
            Err(ServiceError::NotFound(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn create_requires_existing_company() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let res = create_department(&db, new_dept(31337, "Engineering", None)).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        let invalid = create_department(&db, new_dept(0, "E", None)).await;
        match invalid {
            Err(ServiceError::Validation(v)) => {
                assert!(v.has_field("company_id"));
                assert!(v.has_field("name"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn same_name_in_two_companies() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = acme(&db).await?;
        let b = company_service::create_company(&db, company("Globex", None)).await?.id;
        let in_acme = create_department(&db, new_dept(a, "Engineering", None)).await?;
        let in_globex = create_department(&db, new_dept(b, "Engineering", None)).await?;
        assert_ne!(in_acme.id, in_globex.id);
        assert!(department_exists_by_name(&db, "Engineering", a).await?);
        assert!(!department_exists_by_name(&db, "Engineering", 999).await?);

        let dup = create_department(&db, new_dept(a, "Engineering", None)).await;
        assert!(matches!(dup, Err(ServiceError::Conflict(_))));

        let sales = create_department(&db, new_dept(a, "Sales", None)).await?;
        let clash = update_department(&db, sales.id, department("Engineering", None)).await;
        assert!(matches!(clash, Err(ServiceError::Conflict(_))));
        Ok(())
    }

    #[tokio::test]
    async fn employees_through_department() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let cid = acme(&db).await?;
        let eng = create_department(&db, new_dept(cid, "Engineering", None)).await?;

        let alice = add_employee(&db, eng.id, full_time("Alice", "Smith", "alice@acme.com", "90000", "5000")).await?;
        let bob = add_employee(&db, eng.id, part_time("Bob", "Jones", "bob@acme.com", "31200", 20)).await?;
        assert_eq!(alice.department_id, eng.id);
        assert_eq!(employee_count(&db, eng.id).await?, 2);

        let named = employees_of_department_named(&db, cid, "Engineering").await?;
        assert_eq!(named.iter().map(|e| e.id).collect::<Vec<_>>(), vec![alice.id, bob.id]);
        assert!(matches!(
            employees_of_department_named(&db, cid, "Sales").await,
            Err(ServiceError::NotFound(_))
        ));

        let missing = add_employee(&db, 999, part_time("Cid", "Moss", "cid@acme.com", "100", 5)).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));

        let other = create_department(&db, new_dept(cid, "Sales", None)).await?;
        assert!(matches!(remove_employee(&db, other.id, bob.id).await, Err(ServiceError::NotFound(_))));
        remove_employee(&db, eng.id, bob.id).await?;
        assert_eq!(employees_of_department(&db, eng.id).await?.len(), 1);
        assert_eq!(employee_count(&db, other.id).await?, 0);

        delete_department(&db, eng.id).await?;
        assert!(employee_service::get_employee(&db, alice.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn ordered_by_employee_count_puts_empty_last() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let cid = acme(&db).await?;
        let empty = create_department(&db, new_dept(cid, "Empty", None)).await?;
        let one = create_department(&db, new_dept(cid, "One", None)).await?;
        let two = create_department(&db, new_dept(cid, "Two", None)).await?;
        let also_one = create_department(&db, new_dept(cid, "AlsoOne", None)).await?;
        add_employee(&db, one.id, part_time("Ann", "Lee", "ann@acme.com", "1000", 10)).await?;
        add_employee(&db, two.id, part_time("Ben", "Lee", "ben@acme.com", "1000", 10)).await?;
        add_employee(&db, two.id, part_time("Cat", "Lee", "cat@acme.com", "1000", 10)).await?;
        add_employee(&db, also_one.id, part_time("Dan", "Lee", "dan@acme.com", "1000", 10)).await?;

        let order: Vec<i32> = departments_ordered_by_employee_count(&db).await?.iter().map(|d| d.id).collect();
        assert_eq!(order, vec![two.id, one.id, also_one.id, empty.id]);

        let busy: Vec<i32> = departments_with_more_employees_than(&db, 1).await?.iter().map(|d| d.id).collect();
        assert_eq!(busy, vec![two.id]);
        assert_eq!(departments_with_more_employees_than(&db, 0).await?.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn department_queries() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let cid = acme(&db).await?;
        let berlin = create_department(&db, new_dept(cid, "Engineering", Some("Berlin"))).await?;
        create_department(&db, new_dept(cid, "Sales", Some("Paris"))).await?;

        let at: Vec<i32> = departments_by_location(&db, "Berlin").await?.iter().map(|d| d.id).collect();
        assert_eq!(at, vec![berlin.id]);
        assert!(departments_by_location(&db, "berlin").await?.is_empty());

        assert_eq!(search_departments_by_name(&db, "NEER").await?.len(), 1);
        assert_eq!(search_departments_by_name(&db, "").await?.len(), 2);
        assert_eq!(departments_of_company(&db, cid).await?.len(), 2);
        assert_eq!(list_departments(&db).await?.len(), 2);
        Ok(())
    }
}
