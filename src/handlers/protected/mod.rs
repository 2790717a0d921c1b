pub mod auth;
pub mod billboards;
pub mod categories;
pub mod colors;
pub mod guard;
pub mod orders;
pub mod products;
pub mod sizes;
pub mod stores;
