use serde::Serialize;

use super::Embed;
use crate::interaction::Component;

/// Body of `POST /channels/{channel.id}/messages`.
#[derive(Serialize, Debug, Clone, Default)]
pub struct CreateMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Component>,
}

impl CreateMessage {
    pub fn text(content: impl Into<String>) -> CreateMessage {
        CreateMessage {
            content: Some(content.into()),
            ..Default::default()
        }
    }
}

/// Body of `PATCH /channels/{channel.id}/messages/{message.id}`.
///
/// Both lists are always sent; an empty list clears that part of the message.
#[derive(Serialize, Debug, Clone, Default)]
pub struct EditMessage {
    pub embeds: Vec<Embed>,
    pub components: Vec<Component>,
}
