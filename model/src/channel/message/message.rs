use serde::{Deserialize, Serialize};

use super::embed::Embed;
use crate::guild::Member;
use crate::interaction::Component;
use crate::user::User;
use crate::Snowflake;
use chrono::{DateTime, Utc};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Message {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    pub author: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<Member>,
    /// Empty unless the bot holds the MESSAGE_CONTENT intent.
    #[serde(default)]
    pub content: Box<str>,
    pub timestamp: Option<DateTime<Utc>>,
    pub edited_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub embeds: Vec<Embed>,
    #[serde(default)]
    pub components: Vec<Component>,
    pub webhook_id: Option<Snowflake>,
    #[serde(default)]
    pub flags: u32,
}
