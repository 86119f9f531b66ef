pub mod mapper;
pub mod migrations;
pub mod sql_repo;
