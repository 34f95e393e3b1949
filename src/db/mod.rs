pub mod connection;
pub mod events;
pub mod runs;

pub use connection::{init_db, Database, StoreError};
