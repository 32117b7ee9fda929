use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::json;

use crate::employee::{self, Employee, EmployeeKind, Employment, NewEmployee, PartTimeTerms};

fn d(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn row(kind: &str) -> employee::Model {
    let now = Utc::now().into();
    employee::Model {
        id: 7,
        employee_type: kind.to_string(),
        first_name: "Alice".into(),
        last_name: "Smith".into(),
        email: "alice@acme.com".into(),
        phone: None,
        hire_date: date(2020, 1, 15),
        salary_cents: 9_000_000,
        job_title: None,
        department_id: 3,
        annual_bonus_cents: Some(500_000),
        stock_options: Some(100),
        health_insurance: None,
        retirement_plan: Some(false),
        hours_per_week: None,
        flexible_schedule: None,
        remote_work: None,
        contract_end_date: None,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn hourly_rate_rounds_half_up() {
    let t = PartTimeTerms::with_hours(20);
    assert_eq!(t.hourly_rate(d("31200")), d("30.00"));
    assert_eq!(t.hourly_rate(d("31200")).to_string(), "30.00");

    // 1000.40 / 1040 = 0.961923...
    assert_eq!(t.hourly_rate(d("1000.40")), d("0.96"));
    // 1045.20 / 1040 = 1.005 exactly
    assert_eq!(t.hourly_rate(d("1045.20")), d("1.01"));

    assert_eq!(PartTimeTerms::with_hours(0).hourly_rate(d("31200")), Decimal::ZERO);
}

#[test]
fn contract_ending_today_is_not_expired() {
    let today = date(2024, 6, 1);
    let mut t = PartTimeTerms::with_hours(20);
    assert!(!t.is_contract_expired_on(today));
    t.contract_end_date = Some(today);
    assert!(!t.is_contract_expired_on(today));
    t.contract_end_date = Some(date(2024, 5, 31));
    assert!(t.is_contract_expired_on(today));
}

#[test]
fn full_time_row_converts() {
    let e = Employee::try_from(row(EmployeeKind::FULL_TIME)).unwrap();
    assert_eq!(e.kind(), EmployeeKind::FullTime);
    assert_eq!(e.full_name(), "Alice Smith");
    assert_eq!(e.profile.salary, d("90000.00"));
    assert_eq!(e.total_compensation(), Some(d("95000.00")));
    assert_eq!(e.hourly_rate(), None);
    let t = e.full_time_terms().unwrap();
    assert!(t.health_insurance);
    assert!(!t.retirement_plan);
    assert!(!e.is_contract_expired_on(date(2030, 1, 1)));
}

#[test]
fn malformed_rows_are_storage_errors() {
    assert!(Employee::try_from(row("CONTRACTOR")).is_err());
    // part-time row without hours
    assert!(Employee::try_from(row(EmployeeKind::PART_TIME)).is_err());

    let mut ft = row(EmployeeKind::FULL_TIME);
    ft.annual_bonus_cents = None;
    assert!(matches!(Employee::try_from(ft), Err(crate::errors::ModelError::Db(_))));
}

#[test]
fn new_employee_is_tagged_by_employee_type() {
    let body = json!({
        "department_id": 2,
        "employee_type": "PART_TIME",
        "first_name": "Bob",
        "last_name": "Jones",
        "email": "bob@acme.com",
        "hire_date": "2021-03-01",
        "salary": "31200.00",
        "hours_per_week": 20,
        "contract_end_date": "2025-12-31"
    });
    let n: NewEmployee = serde_json::from_value(body).unwrap();
    assert_eq!(n.department_id, 2);
    match &n.draft.employment {
        Employment::PartTime(t) => {
            assert_eq!(t.hours_per_week, 20);
            assert!(!t.flexible_schedule);
            assert_eq!(t.contract_end_date, Some(date(2025, 12, 31)));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(n.validate().is_ok());

    let full: NewEmployee = serde_json::from_value(json!({
        "department_id": 2,
        "employee_type": "FULL_TIME",
        "first_name": "Carol",
        "last_name": "White",
        "email": "carol@acme.com",
        "hire_date": "2019-07-01",
        "salary": 80000,
        "annual_bonus": 4000.5
    }))
    .unwrap();
    match &full.draft.employment {
        Employment::FullTime(t) => {
            assert_eq!(t.annual_bonus, d("4000.5"));
            assert!(t.health_insurance && t.retirement_plan);
            assert_eq!(t.stock_options, None);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn employee_serializes_flat_with_discriminator() {
    let e = Employee::try_from(row(EmployeeKind::FULL_TIME)).unwrap();
    let v = serde_json::to_value(&e).unwrap();
    assert_eq!(v["employee_type"], "FULL_TIME");
    assert_eq!(v["first_name"], "Alice");
    assert_eq!(v["department_id"], 3);
    assert_eq!(v["salary"], "90000.00");
    assert_eq!(v["annual_bonus"], "5000.00");
    assert_eq!(v["stock_options"], 100);
}
