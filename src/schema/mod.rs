//! Field-level schema validation for boundary panel data.

pub mod validate;
