pub mod callback;
pub mod channel_gateway;
pub mod control_id;
pub mod events;
pub mod http;
pub mod render;

mod config;
pub use config::Config;

mod error;
pub use error::{Error, Result, WebhookError};

#[cfg(test)]
mod test_util;
