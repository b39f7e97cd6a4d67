pub mod password;
pub mod repo;
pub mod service;

pub use repo::User;
