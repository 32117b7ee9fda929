use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType, NotSet, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

use models::department::{self, DepartmentInput};
use models::employee;

use super::contains_ci;
use crate::errors::ServiceError;

pub async fn insert<C: ConnectionTrait>(db: &C, company_id: i32, input: &DepartmentInput) -> Result<department::Model, ServiceError> {
    let now = Utc::now();
    let am = department::ActiveModel {
        id: NotSet,
        name: Set(input.name.clone()),
        description: Set(input.description.clone()),
        location: Set(input.location.clone()),
        company_id: Set(company_id),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };
    Ok(am.insert(db).await?)
}

/// Overwrite name, description and location; `company_id` never changes.
pub async fn update<C: ConnectionTrait>(db: &C, id: i32, input: &DepartmentInput) -> Result<Option<department::Model>, ServiceError> {
    let Some(found) = find_by_id(db, id).await? else { return Ok(None) };
    let mut am: department::ActiveModel = found.into();
    am.name = Set(input.name.clone());
    am.description = Set(input.description.clone());
    am.location = Set(input.location.clone());
    am.updated_at = Set(Utc::now().into());
    Ok(Some(am.update(db).await?))
}

/// Delete a department and its employees.
pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ServiceError> {
    employee::Entity::delete_many()
        .filter(employee::Column::DepartmentId.eq(id))
        .exec(db)
        .await?;
    let res = department::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<department::Model>, ServiceError> {
    Ok(department::Entity::find_by_id(id).one(db).await?)
}

pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<department::Model>, ServiceError> {
    Ok(department::Entity::find().order_by_asc(department::Column::Id).all(db).await?)
}

pub async fn find_by_company_id<C: ConnectionTrait>(db: &C, company_id: i32) -> Result<Vec<department::Model>, ServiceError> {
    Ok(department::Entity::find()
        .filter(department::Column::CompanyId.eq(company_id))
        .order_by_asc(department::Column::Id)
        .all(db)
        .await?)
}

pub async fn find_by_name_and_company_id<C: ConnectionTrait>(
    db: &C,
    name: &str,
    company_id: i32,
) -> Result<Option<department::Model>, ServiceError> {
    Ok(department::Entity::find()
        .filter(department::Column::Name.eq(name))
        .filter(department::Column::CompanyId.eq(company_id))
        .one(db)
        .await?)
}

pub async fn find_by_location<C: ConnectionTrait>(db: &C, location: &str) -> Result<Vec<department::Model>, ServiceError> {
    Ok(department::Entity::find()
        .filter(department::Column::Location.eq(location))
        .order_by_asc(department::Column::Id)
        .all(db)
        .await?)
}

pub async fn search_by_name<C: ConnectionTrait>(db: &C, needle: &str) -> Result<Vec<department::Model>, ServiceError> {
    Ok(department::Entity::find()
        .filter(contains_ci(db.get_database_backend(), department::Column::Name, needle))
        .order_by_asc(department::Column::Id)
        .all(db)
        .await?)
}

pub async fn exists_by_name_and_company_id<C: ConnectionTrait>(db: &C, name: &str, company_id: i32) -> Result<bool, ServiceError> {
    let n = department::Entity::find()
        .filter(department::Column::Name.eq(name))
        .filter(department::Column::CompanyId.eq(company_id))
        .count(db)
        .await?;
    Ok(n > 0)
}

pub async fn exists_by_name_and_company_id_excluding<C: ConnectionTrait>(
    db: &C,
    name: &str,
    company_id: i32,
    id: i32,
) -> Result<bool, ServiceError> {
    let n = department::Entity::find()
        .filter(department::Column::Name.eq(name))
        .filter(department::Column::CompanyId.eq(company_id))
        .filter(department::Column::Id.ne(id))
        .count(db)
        .await?;
    Ok(n > 0)
}

/// Departments with strictly more than `min` employees.
pub async fn with_more_employees_than<C: ConnectionTrait>(db: &C, min: i64) -> Result<Vec<department::Model>, ServiceError> {
    Ok(department::Entity::find()
        .join(JoinType::LeftJoin, department::Relation::Employees.def())
        .group_by(department::Column::Id)
        .having(Expr::expr(Expr::col((employee::Entity, employee::Column::Id)).count()).gt(min))
        .order_by_asc(department::Column::Id)
        .all(db)
        .await?)
}

/// All departments, most employees first; ties by id. Empty departments
/// are included and sort last.
pub async fn ordered_by_employee_count<C: ConnectionTrait>(db: &C) -> Result<Vec<department::Model>, ServiceError> {
    Ok(department::Entity::find()
        .join(JoinType::LeftJoin, department::Relation::Employees.def())
        .group_by(department::Column::Id)
        .order_by_desc(Expr::col((employee::Entity, employee::Column::Id)).count())
        .order_by_asc(department::Column::Id)
        .all(db)
        .await?)
}
