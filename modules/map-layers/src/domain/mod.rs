pub mod error;
pub mod import;
pub mod model;
pub mod repo;
pub mod service;
pub mod source;
