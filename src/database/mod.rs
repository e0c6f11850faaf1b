pub mod categories;
pub mod connection;
pub mod models;
pub mod purchases;
pub mod receipts;
pub mod setup;

#[cfg(test)]
pub(crate) mod test_support;

pub use connection::{create_memory_pool, create_pool, get_connection, DbConn, DbPool};
pub use models::*;
