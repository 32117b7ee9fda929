use chrono::Utc;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType, NotSet, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

use models::company::{self, CompanyInput};
use models::{department, employee};

use super::contains_ci;
use crate::errors::ServiceError;

pub async fn insert<C: ConnectionTrait>(db: &C, input: &CompanyInput) -> Result<company::Model, ServiceError> {
    let now = Utc::now();
    let am = company::ActiveModel {
        id: NotSet,
        name: Set(input.name.clone()),
        description: Set(input.description.clone()),
        industry: Set(input.industry.clone()),
        address: Set(input.address.clone()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };
    Ok(am.insert(db).await?)
}

/// Overwrite every writable column. `None` when the company does not exist.
pub async fn update<C: ConnectionTrait>(db: &C, id: i32, input: &CompanyInput) -> Result<Option<company::Model>, ServiceError> {
    let Some(found) = find_by_id(db, id).await? else { return Ok(None) };
    let mut am: company::ActiveModel = found.into();
    am.name = Set(input.name.clone());
    am.description = Set(input.description.clone());
    am.industry = Set(input.industry.clone());
    am.address = Set(input.address.clone());
    am.updated_at = Set(Utc::now().into());
    Ok(Some(am.update(db).await?))
}

/// Delete a company together with its departments and their employees.
pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ServiceError> {
    let departments = Query::select()
        .column(department::Column::Id)
        .from(department::Entity)
        .and_where(department::Column::CompanyId.eq(id))
        .to_owned();
    employee::Entity::delete_many()
        .filter(employee::Column::DepartmentId.in_subquery(departments))
        .exec(db)
        .await?;
    department::Entity::delete_many()
        .filter(department::Column::CompanyId.eq(id))
        .exec(db)
        .await?;
    let res = company::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<company::Model>, ServiceError> {
    Ok(company::Entity::find_by_id(id).one(db).await?)
}

pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<company::Model>, ServiceError> {
    Ok(company::Entity::find().order_by_asc(company::Column::Id).all(db).await?)
}

pub async fn find_by_name<C: ConnectionTrait>(db: &C, name: &str) -> Result<Option<company::Model>, ServiceError> {
    Ok(company::Entity::find().filter(company::Column::Name.eq(name)).one(db).await?)
}

pub async fn find_by_industry<C: ConnectionTrait>(db: &C, industry: &str) -> Result<Vec<company::Model>, ServiceError> {
    Ok(company::Entity::find()
        .filter(company::Column::Industry.eq(industry))
        .order_by_asc(company::Column::Id)
        .all(db)
        .await?)
}

pub async fn search_by_name<C: ConnectionTrait>(db: &C, needle: &str) -> Result<Vec<company::Model>, ServiceError> {
    Ok(company::Entity::find()
        .filter(contains_ci(db.get_database_backend(), company::Column::Name, needle))
        .order_by_asc(company::Column::Id)
        .all(db)
        .await?)
}

pub async fn exists_by_name<C: ConnectionTrait>(db: &C, name: &str) -> Result<bool, ServiceError> {
    let n = company::Entity::find().filter(company::Column::Name.eq(name)).count(db).await?;
    Ok(n > 0)
}

/// Name taken by any company other than `id`.
pub async fn exists_by_name_excluding<C: ConnectionTrait>(db: &C, name: &str, id: i32) -> Result<bool, ServiceError> {
    let n = company::Entity::find()
        .filter(company::Column::Name.eq(name))
        .filter(company::Column::Id.ne(id))
        .count(db)
        .await?;
    Ok(n > 0)
}

/// Companies owning strictly more than `min` departments.
pub async fn with_more_departments_than<C: ConnectionTrait>(db: &C, min: i64) -> Result<Vec<company::Model>, ServiceError> {
    Ok(company::Entity::find()
        .join(JoinType::LeftJoin, company::Relation::Departments.def())
        .group_by(company::Column::Id)
        .having(Expr::expr(Expr::col((department::Entity, department::Column::Id)).count()).gt(min))
        .order_by_asc(company::Column::Id)
        .all(db)
        .await?)
}

/// Companies employing strictly more than `min` people across all departments.
pub async fn with_more_employees_than<C: ConnectionTrait>(db: &C, min: i64) -> Result<Vec<company::Model>, ServiceError> {
    Ok(company::Entity::find()
        .join(JoinType::LeftJoin, company::Relation::Departments.def())
        .join(JoinType::LeftJoin, department::Relation::Employees.def())
        .group_by(company::Column::Id)
        .having(Expr::expr(Expr::col((employee::Entity, employee::Column::Id)).count()).gt(min))
        .order_by_asc(company::Column::Id)
        .all(db)
        .await?)
}
