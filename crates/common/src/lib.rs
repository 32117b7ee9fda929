//! Pieces shared by the binary and the HTTP layer: logging setup and small
//! wire types that do not belong to any domain crate.

pub mod types;
pub mod utils;
