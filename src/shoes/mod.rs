pub mod repo;
pub mod service;

pub use repo::{NewShoe, Shoe, ShoeFilter, ShoeUpdate};
