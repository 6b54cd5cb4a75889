//! Business logic between the controllers and the Discord API.

pub mod delivery;
pub mod discord;
pub mod feed;
pub mod oauth;
