//! Domain models shared by the store, services, and API layer.

pub mod api;
pub mod channel;
pub mod message;
pub mod recipient;
pub mod snowflake;
