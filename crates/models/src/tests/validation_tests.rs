use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::company::CompanyInput;
use crate::department::{DepartmentInput, NewDepartment};
use crate::employee::{EmployeeProfile, FullTimeTerms, NewFullTimeEmployee, NewPartTimeEmployee, PartTimeTerms};
use crate::errors::ModelError;
use crate::validation::Violations;

fn profile() -> EmployeeProfile {
    EmployeeProfile {
        first_name: "Alice".into(),
        last_name: "Smith".into(),
        email: "alice@acme.com".into(),
        phone: None,
        hire_date: NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
        salary: Decimal::from_str("90000.00").unwrap(),
        job_title: Some("Engineer".into()),
    }
}

fn violations(err: ModelError) -> Violations {
    match err {
        ModelError::Validation(v) => v,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn company_name_rules() {
    assert!(CompanyInput::named("Acme").validate().is_ok());

    let v = violations(CompanyInput::named("   ").validate().unwrap_err());
    assert_eq!(v.len(), 1);
    assert_eq!(v.iter().next().unwrap().message, "is required");

    let v = violations(CompanyInput::named("A").validate().unwrap_err());
    assert_eq!(v.iter().next().unwrap().message, "must be between 2 and 100 characters");

    let long = CompanyInput { address: Some("x".repeat(201)), ..CompanyInput::named("Acme") };
    let v = violations(long.validate().unwrap_err());
    assert!(v.has_field("address"));
}

#[test]
fn collects_every_violation() {
    let input = CompanyInput {
        name: String::new(),
        description: Some("d".repeat(501)),
        industry: Some("i".repeat(101)),
        address: None,
    };
    let v = violations(input.validate().unwrap_err());
    assert_eq!(v.len(), 3);
    assert!(v.has_field("name") && v.has_field("description") && v.has_field("industry"));
}

#[test]
fn department_requires_company() {
    let nd = NewDepartment { company_id: 0, department: DepartmentInput::named("Engineering") };
    let v = violations(nd.validate().unwrap_err());
    assert!(v.has_field("company_id"));

    let loc = DepartmentInput { location: Some("l".repeat(51)), ..DepartmentInput::named("Sales") };
    assert!(loc.validate().is_err());
}

#[test]
fn email_format() {
    assert!(profile().validate().is_ok());
    for bad in ["", "alice", "alice@", "@acme.com", "alice@acme", "a b@acme.com"] {
        let p = EmployeeProfile { email: bad.into(), ..profile() };
        let v = violations(p.validate().unwrap_err());
        assert!(v.has_field("email"), "{bad:?} accepted");
    }
}

#[test]
fn money_precision_and_range() {
    let p = EmployeeProfile { salary: Decimal::from_str("1000.001").unwrap(), ..profile() };
    assert!(violations(p.validate().unwrap_err()).has_field("salary"));

    let p = EmployeeProfile { salary: Decimal::from_str("100000000").unwrap(), ..profile() };
    assert!(violations(p.validate().unwrap_err()).has_field("salary"));

    let p = EmployeeProfile { salary: Decimal::from_str("99999999.99").unwrap(), ..profile() };
    assert!(p.validate().is_ok());
}

#[test]
fn kind_specific_rules() {
    let ft = NewFullTimeEmployee { department_id: 1, profile: profile(), terms: FullTimeTerms::with_bonus(Decimal::ZERO) };
    assert!(violations(ft.validate().unwrap_err()).has_field("annual_bonus"));

    let pt = NewPartTimeEmployee { department_id: 1, profile: profile(), terms: PartTimeTerms::with_hours(0) };
    assert!(violations(pt.validate().unwrap_err()).has_field("hours_per_week"));

    let pt = NewPartTimeEmployee { department_id: 0, profile: profile(), terms: PartTimeTerms::with_hours(20) };
    assert!(violations(pt.validate().unwrap_err()).has_field("department_id"));
}
