pub mod app_config;
pub mod seats;

pub use app_config::Config;
pub use seats::{SeatsClient, UpstreamError};
