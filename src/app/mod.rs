//! Application layer containing the client facade.

pub mod client;

pub use client::{API_KEY_HEADER, SlothApiClient};
