//! Service layer for the company directory.
//! - `repository` holds explicit named queries, generic over the connection.
//! - `*_service` modules enforce uniqueness and ownership rules, one
//!   transaction per write.

pub mod errors;
pub mod repository;
pub mod company_service;
pub mod department_service;
pub mod employee_service;
#[cfg(test)]
pub mod test_support;
