use crate::callback::{CallbackClient, CallbackPayload};
use crate::channel_gateway::ChannelGateway;
use crate::control_id::ControlId;
use crate::{Error, Result};
use chrono::{Local, SecondsFormat, Utc};
use gateway::Event;
use model::channel::message::{CreateMessage, EditMessage, Message};
use model::interaction::{ComponentType, Interaction, InteractionResponse, MessageComponentInteraction};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub const PING_COMMAND: &str = "!ping";
pub const TEST_WEBHOOK_COMMAND: &str = "!test-webhook";

pub const GENERIC_FAILURE_REPLY: &str = "❌ An error occurred while processing your response.";

pub struct EventHandler {
    gateway: Arc<dyn ChannelGateway>,
    callback: CallbackClient,
    webhook_url: String,
}

impl EventHandler {
    pub fn new(
        gateway: Arc<dyn ChannelGateway>,
        callback: CallbackClient,
        webhook_url: impl Into<String>,
    ) -> EventHandler {
        EventHandler {
            gateway,
            callback,
            webhook_url: webhook_url.into(),
        }
    }

    pub async fn handle(&self, event: Event) {
        match event {
            Event::Ready(ready) => info!(
                user = %ready.user.username,
                guilds = ready.guilds.len(),
                simulated = self.callback.is_simulated(),
                "Logged in"
            ),

            Event::MessageCreate(message) => {
                if let Err(e) = self.handle_message(&message).await {
                    error!(error = %e, channel_id = %message.channel_id, "Failed to reply to command");
                }
            }

            Event::InteractionCreate(interaction) => match *interaction {
                Interaction::MessageComponent(interaction)
                    if interaction.data.component_type == ComponentType::Button =>
                {
                    self.handle_button(&interaction).await
                }
                other => debug!(interaction_type = ?other.interaction_type(), "Ignoring interaction"),
            },

            Event::GuildCreate(_) | Event::GuildDelete(_) => {}
        }
    }

    async fn handle_message(&self, message: &Message) -> Result<()> {
        if message.author.bot {
            return Ok(());
        }

        let reply = match &*message.content {
            PING_COMMAND => "Pong! 🏓".to_owned(),
            TEST_WEBHOOK_COMMAND => format!(
                "Webhook URL: {}\nChannel ID: {}",
                self.webhook_url, message.channel_id
            ),
            _ => return Ok(()),
        };

        self.gateway
            .send_message(message.channel_id, CreateMessage::text(reply))
            .await?;

        Ok(())
    }

    /// Never fails: errors are reported to the user where possible and otherwise only logged.
    pub async fn handle_button(&self, interaction: &MessageComponentInteraction) {
        let user_name = match self.record_response(interaction).await {
            Ok(user_name) => user_name,
            Err(e) => {
                error!(error = %e, custom_id = %interaction.data.custom_id, "Failed to handle button");

                if let Err(e) = self
                    .gateway
                    .edit_original_response(interaction.application_id, &interaction.token, GENERIC_FAILURE_REPLY)
                    .await
                {
                    error!(error = %e, "Failed to send error reply");
                }

                return;
            }
        };

        if let Err(e) = self.annotate_footer(interaction, &user_name).await {
            warn!(error = %e, message_id = %interaction.message.id, "Failed to update message footer");
        }
    }

    /// Returns the display name of the user who clicked.
    async fn record_response(&self, interaction: &MessageComponentInteraction) -> Result<String> {
        self.gateway
            .respond_to_interaction(
                interaction.id,
                &interaction.token,
                InteractionResponse::new_ephemeral_deferred_message_with_source(),
            )
            .await?;

        let user = interaction
            .invoker()
            .ok_or(Error::MissingInvoker(interaction.id))?;

        let payload = CallbackPayload::new(
            ControlId::decode(&interaction.data.custom_id),
            user.id,
            user.display_name(),
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            interaction.guild_id,
            interaction.channel_id,
            interaction.message.id,
        );

        let outcome = self.callback.deliver(&payload).await;

        self.gateway
            .edit_original_response(interaction.application_id, &interaction.token, outcome.reply())
            .await?;

        Ok(payload.user_name)
    }

    async fn annotate_footer(&self, interaction: &MessageComponentInteraction, user_name: &str) -> Result<()> {
        let message = &interaction.message;

        let mut embeds = message.embeds.clone();
        let first = match embeds.first_mut() {
            Some(embed) => embed,
            None => return Ok(()),
        };

        *first = first.clone().footer(format!(
            "Last response: {} ({})",
            user_name,
            Local::now().format("%Y/%m/%d %H:%M:%S")
        ));

        let edit = EditMessage {
            embeds,
            components: message.components.clone(),
        };

        self.gateway
            .edit_message(message.channel_id, message.id, edit)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback::{REJECTED_REPLY, SIMULATED_REPLY};
    use crate::test_util::{Call, RecordingGateway};
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::Router;
    use model::interaction::InteractionResponseType;
    use model::Snowflake;
    use serde_json::json;
    use tokio::net::TcpListener;

    fn button_click(custom_id: &str) -> MessageComponentInteraction {
        serde_json::from_value(json!({
            "id": "500",
            "application_id": "600",
            "type": 3,
            "token": "tok",
            "guild_id": "1",
            "channel_id": "123",
            "member": {
                "user": {"id": "77", "username": "ada", "global_name": "Ada L", "avatar": null},
                "roles": [],
                "joined_at": "2024-01-01T00:00:00+00:00"
            },
            "data": {"custom_id": custom_id, "component_type": 2},
            "message": {
                "id": "999",
                "channel_id": "123",
                "author": {"id": "1", "username": "bridge", "bot": true, "avatar": null},
                "content": "",
                "embeds": [
                    {"type": "rich", "title": "📋 T", "color": 3447003},
                    {"type": "rich", "title": "second"}
                ],
                "components": [{"type": 1, "components": [
                    {"type": 2, "custom_id": "approve_42", "label": "✅ Approve", "style": 3},
                    {"type": 2, "custom_id": "reject_42", "label": "❌ Reject", "style": 4}
                ]}]
            }
        }))
        .unwrap()
    }

    fn text_message(content: &str, bot: bool) -> Message {
        serde_json::from_value(json!({
            "id": "10",
            "channel_id": "123",
            "author": {"id": "77", "username": "ada", "bot": bot, "avatar": null},
            "content": content
        }))
        .unwrap()
    }

    fn handler(gateway: &Arc<RecordingGateway>, callback_url: Option<&str>) -> EventHandler {
        EventHandler::new(
            gateway.clone(),
            CallbackClient::new(callback_url).unwrap(),
            "http://localhost:3000/webhook",
        )
    }

    #[tokio::test]
    async fn test_simulated_click() {
        let gateway = Arc::new(RecordingGateway::default());
        let handler = handler(&gateway, None);

        handler.handle_button(&button_click("reject_42")).await;

        let calls = gateway.calls();
        match &calls[0] {
            Call::Respond { interaction_id, response } => {
                assert_eq!(*interaction_id, Snowflake(500));
                assert_eq!(response.r#type, InteractionResponseType::DeferredChannelMessageWithSource);
                assert!(response.is_ephemeral());
            }
            other => panic!("expected deferred response first, got {:?}", other),
        }

        assert_eq!(gateway.original_responses(), vec![SIMULATED_REPLY.to_owned()]);

        match calls.last().unwrap() {
            Call::Edit { channel_id, message_id, message } => {
                assert_eq!(*channel_id, Snowflake(123));
                assert_eq!(*message_id, Snowflake(999));
                assert_eq!(message.embeds.len(), 2);

                let footer = message.embeds[0].footer.as_ref().unwrap();
                assert!(footer.text.starts_with("Last response: Ada L ("));
                assert!(message.embeds[1].footer.is_none());
                assert_eq!(message.components.len(), 1);
            }
            other => panic!("expected footer edit last, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rejected_callback() {
        let app = Router::new().route("/", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        let gateway = Arc::new(RecordingGateway::default());
        let handler = handler(&gateway, Some(url.as_str()));

        handler.handle_button(&button_click("approve_42")).await;

        assert_eq!(gateway.original_responses(), vec![REJECTED_REPLY.to_owned()]);
    }

    #[tokio::test]
    async fn test_failed_acknowledgement() {
        let gateway = Arc::new(RecordingGateway {
            fail_responses: true,
            ..Default::default()
        });
        let handler = handler(&gateway, None);

        handler.handle_button(&button_click("approve_42")).await;

        assert_eq!(gateway.original_responses(), vec![GENERIC_FAILURE_REPLY.to_owned()]);
        assert!(!gateway.calls().iter().any(|call| matches!(call, Call::Edit { .. })));
    }

    #[tokio::test]
    async fn test_failed_footer_edit_keeps_reply() {
        let gateway = Arc::new(RecordingGateway {
            fail_edits: true,
            ..Default::default()
        });
        let handler = handler(&gateway, None);

        handler.handle_button(&button_click("approve_42")).await;

        assert_eq!(gateway.original_responses(), vec![SIMULATED_REPLY.to_owned()]);
        assert!(!gateway.calls().iter().any(|call| matches!(call, Call::Edit { .. })));
    }

    #[tokio::test]
    async fn test_failed_error_reply() {
        let gateway = Arc::new(RecordingGateway {
            fail_responses: true,
            fail_original_response: true,
            ..Default::default()
        });
        let handler = handler(&gateway, None);

        handler.handle_button(&button_click("approve_42")).await;

        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_reply_skips_footer() {
        let gateway = Arc::new(RecordingGateway {
            fail_original_response: true,
            ..Default::default()
        });
        let handler = handler(&gateway, None);

        handler.handle_button(&button_click("approve_42")).await;

        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert!(matches!(calls[0], Call::Respond { .. }));
    }

    #[tokio::test]
    async fn test_non_button_interactions_ignored() {
        let gateway = Arc::new(RecordingGateway::default());
        let handler = handler(&gateway, None);

        let interaction: Interaction = serde_json::from_value(json!({"id": "1", "type": 2})).unwrap();
        handler
            .handle(Event::InteractionCreate(Box::new(interaction)))
            .await;

        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_text_commands() {
        let gateway = Arc::new(RecordingGateway::default());
        let handler = handler(&gateway, None);

        for (content, bot) in [("!ping", false), ("!test-webhook", false), ("!ping", true), ("hello", false)] {
            handler
                .handle(Event::MessageCreate(Box::new(text_message(content, bot))))
                .await;
        }

        let replies: Vec<String> = gateway
            .sends()
            .into_iter()
            .map(|(channel_id, message)| {
                assert_eq!(channel_id, Snowflake(123));
                message.content.unwrap()
            })
            .collect();

        assert_eq!(
            replies,
            vec![
                "Pong! 🏓".to_owned(),
                "Webhook URL: http://localhost:3000/webhook\nChannel ID: 123".to_owned(),
            ]
        );
    }
}
