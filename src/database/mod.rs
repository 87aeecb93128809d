pub mod connection;
pub mod league;
pub mod matches;
pub mod setup;
pub mod teams;

pub use connection::{DbConn, DbPool, create_pool, get_connection};
