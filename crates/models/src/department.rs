use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::validation::Violations;
use crate::{company, employee};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub company_id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Company,
    Employees,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Company => Entity::belongs_to(company::Entity)
                .from(Column::CompanyId)
                .to(company::Column::Id)
                .into(),
            Relation::Employees => Entity::has_many(employee::Entity).into(),
        }
    }
}

impl Related<company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employees.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Writable department fields. The owning company is fixed at creation
/// and is not part of the update payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl DepartmentInput {
    pub fn named(name: &str) -> Self {
        Self { name: name.to_string(), ..Default::default() }
    }

    pub fn violations(&self) -> Violations {
        let mut v = Violations::new();
        v.required_text("name", &self.name, 2, 100);
        v.optional_text("description", self.description.as_deref(), 500);
        v.optional_text("location", self.location.as_deref(), 50);
        v
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        self.violations().into_result()
    }
}

/// Department creation request that names its company.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDepartment {
    pub company_id: i32,
    #[serde(flatten)]
    pub department: DepartmentInput,
}

impl NewDepartment {
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut v = self.department.violations();
        if self.company_id <= 0 {
            v.push("company_id", "is required");
        }
        v.into_result()
    }
}
