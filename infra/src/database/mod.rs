//! Database module - MySQL implementations using SQLx

pub mod connection;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::MySqlOtpRepository;
