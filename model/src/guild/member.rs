use serde::{Deserialize, Serialize};

use crate::user::User;
use crate::Snowflake;

/// Guild member as embedded in messages and interactions. Only the fields the bridge reads are
/// modelled.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Member {
    /// Omitted in MESSAGE_CREATE, where the author is sent separately.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nick: Option<Box<str>>,
    #[serde(default)]
    pub roles: Vec<Snowflake>,
}
