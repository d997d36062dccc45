//! Infrastructure layer implementations.

pub mod http;

pub use http::HttpSlothTransport;
