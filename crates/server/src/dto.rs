//! Response shapes that add derived values to stored entities.
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use models::employee::Employee;

/// An employee plus `full_name` and the derived values of its kind:
/// `total_compensation` for full-time, `hourly_rate` and
/// `contract_expired` for part-time.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeResponse {
    #[serde(flatten)]
    pub employee: Employee,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_compensation: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_expired: Option<bool>,
}

impl EmployeeResponse {
    pub fn at(employee: Employee, today: NaiveDate) -> Self {
        let contract_expired = employee.part_time_terms().map(|t| t.is_contract_expired_on(today));
        Self {
            full_name: employee.full_name(),
            total_compensation: employee.total_compensation(),
            hourly_rate: employee.hourly_rate(),
            contract_expired,
            employee,
        }
    }
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self::at(employee, Local::now().date_naive())
    }
}

pub fn employee_list(list: Vec<Employee>) -> Vec<EmployeeResponse> {
    let today = Local::now().date_naive();
    list.into_iter().map(|e| EmployeeResponse::at(e, today)).collect()
}
