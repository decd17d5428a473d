use crate::channel_gateway::ChannelGateway;
use async_trait::async_trait;
use gateway::{GatewayError, Result};
use model::channel::message::{CreateMessage, EditMessage, Message};
use model::channel::Channel;
use model::interaction::InteractionResponse;
use model::Snowflake;
use parking_lot::Mutex;
use serde_json::json;

pub const SENT_MESSAGE_ID: u64 = 999;

#[derive(Debug, Clone)]
pub enum Call {
    Send {
        channel_id: Snowflake,
        message: CreateMessage,
    },
    Edit {
        channel_id: Snowflake,
        message_id: Snowflake,
        message: EditMessage,
    },
    Respond {
        interaction_id: Snowflake,
        response: InteractionResponse,
    },
    EditOriginal {
        content: String,
    },
}

/// In-memory stand-in for Discord that records every call.
#[derive(Default)]
pub struct RecordingGateway {
    pub calls: Mutex<Vec<Call>>,
    pub channels: Vec<Channel>,
    pub guilds: usize,
    pub fail_sends: bool,
    pub fail_edits: bool,
    pub fail_responses: bool,
    pub fail_original_response: bool,
}

impl RecordingGateway {
    pub fn with_text_channel(id: u64, name: &str) -> RecordingGateway {
        let channel = serde_json::from_value(json!({
            "id": id.to_string(),
            "type": 0,
            "guild_id": "1",
            "name": name,
        }))
        .unwrap();

        RecordingGateway {
            channels: vec![channel],
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn sends(&self) -> Vec<(Snowflake, CreateMessage)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Send { channel_id, message } => Some((channel_id, message)),
                _ => None,
            })
            .collect()
    }

    pub fn original_responses(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::EditOriginal { content } => Some(content),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }

    fn message(id: u64, channel_id: Snowflake) -> Message {
        serde_json::from_value(json!({
            "id": id.to_string(),
            "channel_id": channel_id.to_string(),
            "author": {"id": "1", "username": "bridge", "bot": true, "avatar": null},
            "content": ""
        }))
        .unwrap()
    }
}

#[async_trait]
impl ChannelGateway for RecordingGateway {
    async fn fetch_channel(&self, channel_id: Snowflake) -> Result<Option<Channel>> {
        Ok(self.channels.iter().find(|c| c.id == channel_id).cloned())
    }

    async fn send_message(&self, channel_id: Snowflake, message: CreateMessage) -> Result<Message> {
        if self.fail_sends {
            return GatewayError::NotConnected.into();
        }

        self.record(Call::Send { channel_id, message });
        Ok(Self::message(SENT_MESSAGE_ID, channel_id))
    }

    async fn edit_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        message: EditMessage,
    ) -> Result<Message> {
        if self.fail_edits {
            return GatewayError::NotConnected.into();
        }

        self.record(Call::Edit {
            channel_id,
            message_id,
            message,
        });
        Ok(Self::message(message_id.0, channel_id))
    }

    async fn respond_to_interaction(
        &self,
        interaction_id: Snowflake,
        _token: &str,
        response: InteractionResponse,
    ) -> Result<()> {
        if self.fail_responses {
            return GatewayError::NotConnected.into();
        }

        self.record(Call::Respond {
            interaction_id,
            response,
        });
        Ok(())
    }

    async fn edit_original_response(
        &self,
        _application_id: Snowflake,
        _token: &str,
        content: &str,
    ) -> Result<()> {
        if self.fail_original_response {
            return GatewayError::NotConnected.into();
        }

        self.record(Call::EditOriginal {
            content: content.to_owned(),
        });
        Ok(())
    }

    fn guild_count(&self) -> usize {
        self.guilds
    }
}
