//! Error vocabulary shared by every WebGIS module.
//!
//! Modules keep their own `DomainError` enums, classify each variant with an
//! [`ErrorKind`], and turn it into a [`Problem`] in exactly one place.

pub mod kind;
pub mod problem;
pub mod rejection;

pub use kind::ErrorKind;
pub use problem::{APPLICATION_PROBLEM_JSON, Problem, ValidationViolation, bad_request, not_found};
pub use rejection::{ValidJson, ValidPath, ValidQuery};
