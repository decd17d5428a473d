mod shard;
pub use shard::{Shard, DEFAULT_GATEWAY_URL};

mod payloads;
pub use payloads::{Event, Ready};

mod error;
pub use error::{GatewayError, Result};

mod close_event;
pub use close_event::CloseEvent;

mod intents;
pub use intents::Intents;

mod guild_set;
pub use guild_set::GuildSet;

pub mod rest;
pub use rest::RestClient;
