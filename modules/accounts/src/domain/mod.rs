pub mod error;
pub mod login;
pub mod model;
pub mod password;
pub mod repo;
pub mod service;
