pub mod follows;
pub mod message;
pub mod user;
