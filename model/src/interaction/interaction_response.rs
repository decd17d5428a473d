use crate::interaction::InteractionCallbackData;
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Message flag restricting visibility to the invoking user.
pub const EPHEMERAL_FLAG: u32 = 1 << 6;

/// Body of `POST /interactions/{interaction.id}/{interaction.token}/callback`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct InteractionResponse {
    pub r#type: InteractionResponseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionCallbackData>,
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
#[non_exhaustive]
pub enum InteractionResponseType {
    Pong = 1,
    ChannelMessageWithSource = 4,
    DeferredChannelMessageWithSource = 5,
    DeferredMessageUpdate = 6,
    UpdateMessage = 7,
    ApplicationCommandAutoCompleteResult = 8,
    Modal = 9,
}

impl InteractionResponse {
    /// "Bot is thinking..." placeholder, only visible to the invoking user.
    pub fn new_ephemeral_deferred_message_with_source() -> InteractionResponse {
        InteractionResponse {
            r#type: InteractionResponseType::DeferredChannelMessageWithSource,
            data: Some(InteractionCallbackData {
                flags: EPHEMERAL_FLAG,
                ..Default::default()
            }),
        }
    }

    pub fn is_ephemeral(&self) -> bool {
        self.data
            .as_ref()
            .is_some_and(|data| data.flags & EPHEMERAL_FLAG == EPHEMERAL_FLAG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ephemeral_defer_wire_format() {
        let res = InteractionResponse::new_ephemeral_deferred_message_with_source();
        assert!(res.is_ephemeral());

        let json = serde_json::to_string(&res).unwrap();
        assert_eq!(json, r#"{"type":5,"data":{"flags":64}}"#);
    }
}
