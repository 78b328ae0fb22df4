pub mod config;
pub mod database;
pub mod handlers;

pub use database::Database;
