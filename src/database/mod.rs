pub mod billboards;
pub mod categories;
pub mod colors;
pub mod manager;
pub mod models;
pub mod orders;
pub mod products;
pub mod sizes;
pub mod stores;
pub mod users;

pub use manager::{DatabaseError, DatabaseManager};
