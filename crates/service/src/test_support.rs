#![cfg(test)]
use chrono::NaiveDate;
use migration::MigratorTrait;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

use models::company::CompanyInput;
use models::db::connect_in_memory;
use models::department::DepartmentInput;
use models::employee::{EmployeeDraft, EmployeeProfile, Employment, FullTimeTerms, PartTimeTerms};

/// Fresh in-memory database with the schema applied.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub fn money(s: &str) -> Decimal {
    s.parse().expect("decimal literal")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn company(name: &str, industry: Option<&str>) -> CompanyInput {
    CompanyInput { industry: industry.map(str::to_string), ..CompanyInput::named(name) }
}

pub fn department(name: &str, location: Option<&str>) -> DepartmentInput {
    DepartmentInput { location: location.map(str::to_string), ..DepartmentInput::named(name) }
}

pub fn profile(first: &str, last: &str, email: &str, salary: &str) -> EmployeeProfile {
    EmployeeProfile {
        first_name: first.into(),
        last_name: last.into(),
        email: email.into(),
        phone: None,
        hire_date: date(2020, 1, 15),
        salary: money(salary),
        job_title: None,
    }
}

pub fn full_time(first: &str, last: &str, email: &str, salary: &str, bonus: &str) -> EmployeeDraft {
    EmployeeDraft {
        profile: profile(first, last, email, salary),
        employment: Employment::FullTime(FullTimeTerms::with_bonus(money(bonus))),
    }
}

pub fn part_time(first: &str, last: &str, email: &str, salary: &str, hours: i32) -> EmployeeDraft {
    EmployeeDraft {
        profile: profile(first, last, email, salary),
        employment: Employment::PartTime(PartTimeTerms::with_hours(hours)),
    }
}
