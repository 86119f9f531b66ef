//! Accounts module: users with a one-to-one profile, password hashing and login.
//!
//! Password digests never leave the domain layer; every response type is built
//! from DTOs that have no password field.

pub mod api;
pub mod domain;
pub mod infra;

pub use api::rest::routes::router;
pub use domain::password::PasswordHasher;
pub use domain::service::Service;
pub use infra::storage::migrations::Migrator;
pub use infra::storage::sea_orm_repo::SeaOrmUsersRepository;
