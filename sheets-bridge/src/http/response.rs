use model::Snowflake;
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct StatusResponse {
    pub status: &'static str,
    pub uptime: u64,
    pub guilds: usize,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub success: bool,
    pub message_id: Snowflake,
    pub channel_name: String,
}

impl WebhookResponse {
    pub fn success(message_id: Snowflake, channel_name: impl Into<String>) -> WebhookResponse {
        WebhookResponse {
            success: true,
            message_id,
            channel_name: channel_name.into(),
        }
    }
}
