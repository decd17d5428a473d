use crate::{GatewayError, Result};
use model::channel::message::{CreateMessage, EditMessage, Message};
use model::channel::Channel;
use model::interaction::InteractionResponse;
use model::Snowflake;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://discord.com/api/v10";

/// Thin wrapper over the handful of REST routes the bridge uses.
#[derive(Clone)]
pub struct RestClient {
    client: reqwest::Client,
    token: Box<str>,
    api_url: Box<str>,
}

#[derive(Serialize, Debug)]
struct EditWebhookMessage<'a> {
    content: &'a str,
}

impl RestClient {
    pub fn new(token: impl Into<Box<str>>) -> Result<RestClient> {
        Self::with_api_url(token, DEFAULT_API_URL)
    }

    pub fn with_api_url(token: impl Into<Box<str>>, api_url: impl Into<Box<str>>) -> Result<RestClient> {
        let client = reqwest::ClientBuilder::new()
            .use_rustls_tls()
            .connect_timeout(Duration::from_secs(3))
            .build()?;

        Ok(RestClient {
            client,
            token: token.into(),
            api_url: api_url.into(),
        })
    }

    /// Returns `None` if the channel does not exist or the bot cannot see it.
    pub async fn get_channel(&self, channel_id: Snowflake) -> Result<Option<Channel>> {
        let url = format!("{}/channels/{}", self.api_url, channel_id);
        let res = self.authorize(self.client.get(url)).send().await?;

        match res.status() {
            StatusCode::NOT_FOUND | StatusCode::FORBIDDEN => Ok(None),
            _ => Self::parse(res).await.map(Some),
        }
    }

    pub async fn create_message(&self, channel_id: Snowflake, data: &CreateMessage) -> Result<Message> {
        let url = format!("{}/channels/{}/messages", self.api_url, channel_id);
        let res = self.authorize(self.client.post(url)).json(data).send().await?;

        Self::parse(res).await
    }

    pub async fn edit_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        data: &EditMessage,
    ) -> Result<Message> {
        let url = format!(
            "{}/channels/{}/messages/{}",
            self.api_url, channel_id, message_id
        );
        let res = self.authorize(self.client.patch(url)).json(data).send().await?;

        Self::parse(res).await
    }

    /// Interaction endpoints are authenticated by the token in the path, not the bot token.
    pub async fn create_interaction_response(
        &self,
        interaction_id: Snowflake,
        interaction_token: &str,
        data: &InteractionResponse,
    ) -> Result<()> {
        let url = format!(
            "{}/interactions/{}/{}/callback",
            self.api_url, interaction_id, interaction_token
        );
        let res = self.client.post(url).json(data).send().await?;

        Self::check(res).await.map(|_| ())
    }

    pub async fn edit_original_interaction_response(
        &self,
        application_id: Snowflake,
        interaction_token: &str,
        content: &str,
    ) -> Result<()> {
        let url = format!(
            "{}/webhooks/{}/{}/messages/@original",
            self.api_url, application_id, interaction_token
        );
        let res = self
            .client
            .patch(url)
            .json(&EditWebhookMessage { content })
            .send()
            .await?;

        Self::check(res).await.map(|_| ())
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        req.header(reqwest::header::AUTHORIZATION, format!("Bot {}", self.token))
    }

    async fn check(res: Response) -> Result<Response> {
        if res.status().is_success() {
            Ok(res)
        } else {
            let status = res.status();
            let body = res.text().await?;
            GatewayError::UnexpectedStatus { status, body }.into()
        }
    }

    async fn parse<T: DeserializeOwned>(res: Response) -> Result<T> {
        let bytes = Self::check(res).await?.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
