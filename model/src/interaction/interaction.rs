use crate::channel::message::Message;
use crate::guild::Member;
use crate::interaction::ComponentType;
use crate::user::User;
use crate::Snowflake;
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};

#[derive(Serialize, Debug)]
#[serde(untagged)]
#[non_exhaustive]
pub enum Interaction {
    MessageComponent(Box<MessageComponentInteraction>),
    /// Pings, slash commands, autocomplete and modals are not handled; only the type is retained.
    Unsupported(UnsupportedInteraction),
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InteractionType {
    Ping = 1,
    ApplicationCommand = 2,
    MessageComponent = 3,
    ApplicationCommandAutoComplete = 4,
    ModalSubmit = 5,
}

impl TryFrom<u64> for InteractionType {
    type Error = Box<str>;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => Self::Ping,
            2 => Self::ApplicationCommand,
            3 => Self::MessageComponent,
            4 => Self::ApplicationCommandAutoComplete,
            5 => Self::ModalSubmit,
            _ => return Err(format!("invalid interaction type \"{}\"", value).into_boxed_str()),
        })
    }
}

impl Interaction {
    pub fn interaction_type(&self) -> InteractionType {
        match self {
            Interaction::MessageComponent(data) => data.r#type,
            Interaction::Unsupported(data) => data.r#type,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UnsupportedInteraction {
    pub id: Snowflake,
    pub r#type: InteractionType,
}

// ============================================================================
// Message Component Interaction
// ============================================================================

#[derive(Serialize, Deserialize, Debug)]
pub struct MessageComponentInteraction {
    pub id: Snowflake,
    pub application_id: Snowflake,
    pub r#type: InteractionType,
    pub message: Message,
    pub data: MessageComponentInteractionData,
    pub guild_id: Option<Snowflake>,
    pub channel_id: Snowflake,
    /// Present when invoked in a guild.
    pub member: Option<Member>,
    /// Present when invoked in a DM.
    pub user: Option<User>,
    pub token: Box<str>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MessageComponentInteractionData {
    pub custom_id: Box<str>,
    pub component_type: ComponentType,
}

impl MessageComponentInteraction {
    pub fn invoker(&self) -> Option<&User> {
        self.member
            .as_ref()
            .and_then(|member| member.user.as_ref())
            .or(self.user.as_ref())
    }
}

impl<'de> Deserialize<'de> for Interaction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;

        let interaction_type = value
            .get("type")
            .and_then(Value::as_u64)
            .ok_or_else(|| Box::from("interaction type was not an integer"))
            .and_then(InteractionType::try_from)
            .map_err(D::Error::custom)?;

        let interaction = match interaction_type {
            InteractionType::MessageComponent => {
                serde_json::from_value(value).map(Interaction::MessageComponent)
            }
            InteractionType::Ping
            | InteractionType::ApplicationCommand
            | InteractionType::ApplicationCommandAutoComplete
            | InteractionType::ModalSubmit => {
                serde_json::from_value(value).map(Interaction::Unsupported)
            }
        }
        .map_err(D::Error::custom)?;

        Ok(interaction)
    }
}
