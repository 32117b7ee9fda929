//! Employees: one table, two kinds.
//!
//! Rows carry an `employee_type` discriminator (`FULL_TIME` or `PART_TIME`)
//! plus nullable columns for each kind. In Rust an employee is a common
//! [`EmployeeProfile`] and an [`Employment`] sum type holding the terms of
//! its kind.
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::department;
use crate::errors::ModelError;
use crate::money;
use crate::validation::Violations;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub employee_type: String,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: Option<String>,
    pub hire_date: Date,
    pub salary_cents: i64,
    pub job_title: Option<String>,
    pub department_id: i32,
    pub annual_bonus_cents: Option<i64>,
    pub stock_options: Option<i32>,
    pub health_insurance: Option<bool>,
    pub retirement_plan: Option<bool>,
    pub hours_per_week: Option<i32>,
    pub flexible_schedule: Option<bool>,
    pub remote_work: Option<bool>,
    pub contract_end_date: Option<Date>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Department,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Department => Entity::belongs_to(department::Entity)
                .from(Column::DepartmentId)
                .to(department::Column::Id)
                .into(),
        }
    }
}

impl Related<department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeKind {
    FullTime,
    PartTime,
}

impl EmployeeKind {
    pub const FULL_TIME: &'static str = "FULL_TIME";
    pub const PART_TIME: &'static str = "PART_TIME";

    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeKind::FullTime => Self::FULL_TIME,
            EmployeeKind::PartTime => Self::PART_TIME,
        }
    }
}

impl fmt::Display for EmployeeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::FULL_TIME => Ok(EmployeeKind::FullTime),
            Self::PART_TIME => Ok(EmployeeKind::PartTime),
            other => Err(ModelError::Db(format!("unknown employee_type {other:?}"))),
        }
    }
}

fn yes() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullTimeTerms {
    pub annual_bonus: Decimal,
    #[serde(default)]
    pub stock_options: Option<i32>,
    #[serde(default = "yes")]
    pub health_insurance: bool,
    #[serde(default = "yes")]
    pub retirement_plan: bool,
}

impl FullTimeTerms {
    pub fn with_bonus(annual_bonus: Decimal) -> Self {
        Self { annual_bonus, stock_options: None, health_insurance: true, retirement_plan: true }
    }

    pub fn total_compensation(&self, salary: Decimal) -> Decimal {
        salary + self.annual_bonus
    }

    fn collect(&self, v: &mut Violations) {
        v.positive_money("annual_bonus", &self.annual_bonus);
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartTimeTerms {
    pub hours_per_week: i32,
    #[serde(default)]
    pub flexible_schedule: bool,
    #[serde(default)]
    pub remote_work: bool,
    #[serde(default)]
    pub contract_end_date: Option<NaiveDate>,
}

impl PartTimeTerms {
    pub fn with_hours(hours_per_week: i32) -> Self {
        Self { hours_per_week, flexible_schedule: false, remote_work: false, contract_end_date: None }
    }

    /// `salary / (hours_per_week * 52)`, half-up to cents. Zero when no hours.
    pub fn hourly_rate(&self, salary: Decimal) -> Decimal {
        if self.hours_per_week <= 0 {
            return Decimal::new(0, 2);
        }
        let yearly_hours = Decimal::from(i64::from(self.hours_per_week) * 52);
        let mut rate = (salary / yearly_hours).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rate.rescale(2);
        rate
    }

    /// A contract ending on `today` is still running.
    pub fn is_contract_expired_on(&self, today: NaiveDate) -> bool {
        self.contract_end_date.map(|end| end < today).unwrap_or(false)
    }

    fn collect(&self, v: &mut Violations) {
        v.positive_int("hours_per_week", self.hours_per_week);
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "employee_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Employment {
    FullTime(FullTimeTerms),
    PartTime(PartTimeTerms),
}

impl Employment {
    pub fn kind(&self) -> EmployeeKind {
        match self {
            Employment::FullTime(_) => EmployeeKind::FullTime,
            Employment::PartTime(_) => EmployeeKind::PartTime,
        }
    }

    pub fn violations(&self) -> Violations {
        let mut v = Violations::new();
        match self {
            Employment::FullTime(t) => t.collect(&mut v),
            Employment::PartTime(t) => t.collect(&mut v),
        }
        v
    }
}

/// Fields shared by every employee kind. This is also the full update
/// payload: department and kind-specific terms never change on update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub hire_date: NaiveDate,
    pub salary: Decimal,
    #[serde(default)]
    pub job_title: Option<String>,
}

impl EmployeeProfile {
    pub fn violations(&self) -> Violations {
        let mut v = Violations::new();
        v.required_text("first_name", &self.first_name, 2, 50);
        v.required_text("last_name", &self.last_name, 2, 50);
        v.email("email", &self.email);
        v.optional_text("phone", self.phone.as_deref(), 20);
        v.money("salary", &self.salary);
        v.optional_text("job_title", self.job_title.as_deref(), 100);
        v
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        self.violations().into_result()
    }
}

/// An employee without its department, as posted to a department.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    #[serde(flatten)]
    pub profile: EmployeeProfile,
    #[serde(flatten)]
    pub employment: Employment,
}

impl EmployeeDraft {
    pub fn violations(&self) -> Violations {
        let mut v = self.profile.violations();
        v.extend(self.employment.violations());
        v
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        self.violations().into_result()
    }
}

fn department_violations(department_id: i32, mut v: Violations) -> Violations {
    if department_id <= 0 {
        v.push("department_id", "is required");
    }
    v
}

/// Employee creation request of either kind, selected by `employee_type`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub department_id: i32,
    #[serde(flatten)]
    pub draft: EmployeeDraft,
}

impl NewEmployee {
    pub fn validate(&self) -> Result<(), ModelError> {
        department_violations(self.department_id, self.draft.violations()).into_result()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFullTimeEmployee {
    pub department_id: i32,
    #[serde(flatten)]
    pub profile: EmployeeProfile,
    #[serde(flatten)]
    pub terms: FullTimeTerms,
}

impl NewFullTimeEmployee {
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut v = self.profile.violations();
        self.terms.collect(&mut v);
        department_violations(self.department_id, v).into_result()
    }
}

impl From<NewFullTimeEmployee> for NewEmployee {
    fn from(n: NewFullTimeEmployee) -> Self {
        NewEmployee {
            department_id: n.department_id,
            draft: EmployeeDraft { profile: n.profile, employment: Employment::FullTime(n.terms) },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPartTimeEmployee {
    pub department_id: i32,
    #[serde(flatten)]
    pub profile: EmployeeProfile,
    #[serde(flatten)]
    pub terms: PartTimeTerms,
}

impl NewPartTimeEmployee {
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut v = self.profile.violations();
        self.terms.collect(&mut v);
        department_violations(self.department_id, v).into_result()
    }
}

impl From<NewPartTimeEmployee> for NewEmployee {
    fn from(n: NewPartTimeEmployee) -> Self {
        NewEmployee {
            department_id: n.department_id,
            draft: EmployeeDraft { profile: n.profile, employment: Employment::PartTime(n.terms) },
        }
    }
}

/// A stored employee.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i32,
    pub department_id: i32,
    #[serde(flatten)]
    pub profile: EmployeeProfile,
    #[serde(flatten)]
    pub employment: Employment,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Employee {
    pub fn kind(&self) -> EmployeeKind {
        self.employment.kind()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.profile.first_name, self.profile.last_name)
    }

    pub fn full_time_terms(&self) -> Option<&FullTimeTerms> {
        match &self.employment {
            Employment::FullTime(t) => Some(t),
            Employment::PartTime(_) => None,
        }
    }

    pub fn part_time_terms(&self) -> Option<&PartTimeTerms> {
        match &self.employment {
            Employment::PartTime(t) => Some(t),
            Employment::FullTime(_) => None,
        }
    }

    /// Salary plus annual bonus; full-time only.
    pub fn total_compensation(&self) -> Option<Decimal> {
        self.full_time_terms().map(|t| t.total_compensation(self.profile.salary))
    }

    /// Part-time only.
    pub fn hourly_rate(&self) -> Option<Decimal> {
        self.part_time_terms().map(|t| t.hourly_rate(self.profile.salary))
    }

    /// Always false for full-time employees.
    pub fn is_contract_expired_on(&self, today: NaiveDate) -> bool {
        self.part_time_terms().map(|t| t.is_contract_expired_on(today)).unwrap_or(false)
    }
}

impl TryFrom<Model> for Employee {
    type Error = ModelError;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        let missing = |col: &str| ModelError::Db(format!("employee {} ({}) has no {col}", m.id, m.employee_type));
        let employment = match m.employee_type.parse::<EmployeeKind>()? {
            EmployeeKind::FullTime => Employment::FullTime(FullTimeTerms {
                annual_bonus: money::from_cents(m.annual_bonus_cents.ok_or_else(|| missing("annual_bonus"))?),
                stock_options: m.stock_options,
                health_insurance: m.health_insurance.unwrap_or(true),
                retirement_plan: m.retirement_plan.unwrap_or(true),
            }),
            EmployeeKind::PartTime => Employment::PartTime(PartTimeTerms {
                hours_per_week: m.hours_per_week.ok_or_else(|| missing("hours_per_week"))?,
                flexible_schedule: m.flexible_schedule.unwrap_or(false),
                remote_work: m.remote_work.unwrap_or(false),
                contract_end_date: m.contract_end_date,
            }),
        };
        Ok(Employee {
            id: m.id,
            department_id: m.department_id,
            profile: EmployeeProfile {
                first_name: m.first_name,
                last_name: m.last_name,
                email: m.email,
                phone: m.phone,
                hire_date: m.hire_date,
                salary: money::from_cents(m.salary_cents),
                job_title: m.job_title,
            },
            employment,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }
}

/// Convert a batch of rows, failing on the first malformed one.
pub fn from_models(rows: Vec<Model>) -> Result<Vec<Employee>, ModelError> {
    rows.into_iter().map(Employee::try_from).collect()
}

impl ActiveModel {
    /// Insert model for a validated draft; the id is left to the database.
    pub fn from_draft(
        department_id: i32,
        draft: &EmployeeDraft,
        now: DateTimeWithTimeZone,
    ) -> Result<Self, ModelError> {
        let mut am = ActiveModel {
            id: NotSet,
            employee_type: Set(draft.employment.kind().as_str().to_string()),
            first_name: NotSet,
            last_name: NotSet,
            email: NotSet,
            phone: NotSet,
            hire_date: NotSet,
            salary_cents: NotSet,
            job_title: NotSet,
            department_id: Set(department_id),
            annual_bonus_cents: Set(None),
            stock_options: Set(None),
            health_insurance: Set(None),
            retirement_plan: Set(None),
            hours_per_week: Set(None),
            flexible_schedule: Set(None),
            remote_work: Set(None),
            contract_end_date: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        am.apply_profile(&draft.profile)?;
        match &draft.employment {
            Employment::FullTime(t) => {
                am.annual_bonus_cents = Set(Some(money::to_cents(&t.annual_bonus)?));
                am.stock_options = Set(t.stock_options);
                am.health_insurance = Set(Some(t.health_insurance));
                am.retirement_plan = Set(Some(t.retirement_plan));
            }
            Employment::PartTime(t) => {
                am.hours_per_week = Set(Some(t.hours_per_week));
                am.flexible_schedule = Set(Some(t.flexible_schedule));
                am.remote_work = Set(Some(t.remote_work));
                am.contract_end_date = Set(t.contract_end_date);
            }
        }
        Ok(am)
    }

    /// Overwrite the common columns; department and kind columns are untouched.
    pub fn apply_profile(&mut self, p: &EmployeeProfile) -> Result<(), ModelError> {
        self.first_name = Set(p.first_name.clone());
        self.last_name = Set(p.last_name.clone());
        self.email = Set(p.email.clone());
        self.phone = Set(p.phone.clone());
        self.hire_date = Set(p.hire_date);
        self.salary_cents = Set(money::to_cents(&p.salary)?);
        self.job_title = Set(p.job_title.clone());
        Ok(())
    }
}
