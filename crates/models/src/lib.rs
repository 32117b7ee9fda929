//! Entities, input types and validation for the company directory.
pub mod errors;
pub mod db;
pub mod validation;
pub mod money;
pub mod company;
pub mod department;
pub mod employee;

#[cfg(test)]
mod tests;
