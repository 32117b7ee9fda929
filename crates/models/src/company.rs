use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::department;
use crate::errors::ModelError;
use crate::validation::Violations;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Departments,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Departments => Entity::has_many(department::Entity).into() }
    }
}

impl Related<department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Departments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Writable company fields, used for both create and full update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl CompanyInput {
    pub fn named(name: &str) -> Self {
        Self { name: name.to_string(), ..Default::default() }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        let mut v = Violations::new();
        v.required_text("name", &self.name, 2, 100);
        v.optional_text("description", self.description.as_deref(), 500);
        v.optional_text("industry", self.industry.as_deref(), 100);
        v.optional_text("address", self.address.as_deref(), 200);
        v.into_result()
    }
}
