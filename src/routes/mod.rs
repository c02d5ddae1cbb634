pub mod cors;
pub mod follow;
pub mod message;
pub mod pages;
pub mod user;
