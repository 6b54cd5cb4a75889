//! HTTP request handlers.
//!
//! Controllers validate the request, resolve targets against the store, call
//! into the service layer, and convert outcomes to responses. Business logic
//! lives in `service/`.

pub mod auth;
pub mod channel;
pub mod message;
pub mod pages;
pub mod recipient;
pub mod status;
