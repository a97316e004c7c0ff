//! Statement rendering and pre-write validation. Pure functions, no I/O.

pub mod builder;
pub mod validator;

pub use builder::{Statement, StatementBuilder, WhereJoiner};
pub use validator::{Rejection, validate, validate_conditions, validate_update};
