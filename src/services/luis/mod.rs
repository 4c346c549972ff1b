//! Thin I/O layer around the response model: configuration, the HTTP
//! request issuer and the client that ties them together.

pub mod client;
pub mod config;
pub mod handlers;
pub mod transport;

pub use client::LuisClient;
pub use config::ClientConfig;
pub use handlers::{Handlers, ResponseHandlers};
pub use transport::{HttpTransport, Transport};
