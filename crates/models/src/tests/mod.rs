/// Input validation rules
pub mod validation_tests;

/// Employee kinds, derived values and row conversion
pub mod employee_tests;
