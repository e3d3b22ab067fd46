mod api;
pub use api::BoardApi;

mod client;
pub use client::BoardClient;

mod config;
pub use config::ClientConfig;

mod errors;
pub use errors::ClientError;
