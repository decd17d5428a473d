use async_trait::async_trait;
use gateway::{GuildSet, RestClient, Result};
use model::channel::message::{CreateMessage, EditMessage, Message};
use model::channel::Channel;
use model::interaction::InteractionResponse;
use model::Snowflake;
use std::sync::Arc;

/// Everything the webhook route and the event handler need from Discord.
#[async_trait]
pub trait ChannelGateway: Send + Sync {
    /// `None` if the channel does not exist or is not visible to the bot.
    async fn fetch_channel(&self, channel_id: Snowflake) -> Result<Option<Channel>>;

    async fn send_message(&self, channel_id: Snowflake, message: CreateMessage) -> Result<Message>;

    async fn edit_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        message: EditMessage,
    ) -> Result<Message>;

    async fn respond_to_interaction(
        &self,
        interaction_id: Snowflake,
        token: &str,
        response: InteractionResponse,
    ) -> Result<()>;

    async fn edit_original_response(
        &self,
        application_id: Snowflake,
        token: &str,
        content: &str,
    ) -> Result<()>;

    fn guild_count(&self) -> usize;
}

pub struct DiscordGateway {
    rest: RestClient,
    guilds: Arc<GuildSet>,
}

impl DiscordGateway {
    pub fn new(rest: RestClient, guilds: Arc<GuildSet>) -> DiscordGateway {
        DiscordGateway { rest, guilds }
    }
}

#[async_trait]
impl ChannelGateway for DiscordGateway {
    async fn fetch_channel(&self, channel_id: Snowflake) -> Result<Option<Channel>> {
        self.rest.get_channel(channel_id).await
    }

    async fn send_message(&self, channel_id: Snowflake, message: CreateMessage) -> Result<Message> {
        self.rest.create_message(channel_id, &message).await
    }

    async fn edit_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        message: EditMessage,
    ) -> Result<Message> {
        self.rest.edit_message(channel_id, message_id, &message).await
    }

    async fn respond_to_interaction(
        &self,
        interaction_id: Snowflake,
        token: &str,
        response: InteractionResponse,
    ) -> Result<()> {
        self.rest
            .create_interaction_response(interaction_id, token, &response)
            .await
    }

    async fn edit_original_response(
        &self,
        application_id: Snowflake,
        token: &str,
        content: &str,
    ) -> Result<()> {
        self.rest
            .edit_original_interaction_response(application_id, token, content)
            .await
    }

    fn guild_count(&self) -> usize {
        self.guilds.len()
    }
}
