pub mod auth;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod shoes;
pub mod validation;

pub use error::AppError;
