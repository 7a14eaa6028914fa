//! Authenticated access to the Astralform REST API.

pub mod gateway;

pub use gateway::{Gateway, RequestOptions};
