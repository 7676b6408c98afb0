pub mod manager;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use repository::{ProductRepository, UserRepository};
