use serde::{Deserialize, Serialize};

use crate::Snowflake;

/// Partial guild as sent in READY, GUILD_CREATE and GUILD_DELETE. Only the ID is needed to keep
/// track of which guilds the bot is in.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UnavailableGuild {
    pub id: Snowflake,
    pub unavailable: Option<bool>,
}

impl UnavailableGuild {
    /// GUILD_DELETE with `unavailable` set means an outage, not that the bot was removed.
    pub fn is_outage(&self) -> bool {
        self.unavailable.unwrap_or(false)
    }
}
