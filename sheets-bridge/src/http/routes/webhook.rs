use crate::http::response::WebhookResponse;
use crate::http::Server;
use crate::render::{self, MessageKind, MessageRequest};
use crate::WebhookError;
use axum::extract::rejection::JsonRejection;
use axum::{Extension, Json};
use chrono::Utc;
use model::Snowflake;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Fields stay untyped so that nothing but the JSON syntax is checked before the secret.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WebhookBody {
    #[serde(default)]
    pub secret: Option<Value>,
    #[serde(default)]
    pub channel_id: Option<Value>,
    #[serde(default, rename = "type")]
    pub kind: Option<Value>,
    #[serde(default)]
    pub data: Option<Value>,
}

pub async fn webhook_handler(
    Extension(server): Extension<Arc<Server>>,
    body: Result<Json<WebhookBody>, JsonRejection>,
) -> Result<Json<WebhookResponse>, WebhookError> {
    let Json(body) = body.map_err(|e| WebhookError::BadRequest(e.body_text()))?;

    let secret = body.secret.as_ref().and_then(Value::as_str).unwrap_or_default();
    if !server.verify_secret(secret) {
        warn!("Rejected webhook with invalid secret");
        return Err(WebhookError::Unauthorized);
    }

    let (channel_id, kind, data) = match (body.channel_id, body.kind, body.data) {
        (Some(channel_id), Some(kind), Some(data)) if !is_blank(&channel_id) && !is_blank(&kind) => {
            (channel_id, kind, data)
        }
        _ => return Err(WebhookError::BadRequest("Missing required parameters".to_owned())),
    };

    let kind: MessageKind = kind
        .as_str()
        .ok_or_else(|| WebhookError::BadRequest("Invalid type".to_owned()))?
        .parse()
        .map_err(|e: render::UnknownKind| WebhookError::BadRequest(e.to_string()))?;

    let channel_id: Snowflake = serde_json::from_value(channel_id)
        .map_err(|_| WebhookError::BadRequest("Invalid channelId".to_owned()))?;

    let request = MessageRequest::from_parts(kind, data)
        .map_err(|e| WebhookError::BadRequest(format!("Invalid data: {}", e)))?;

    let channel = server
        .gateway
        .fetch_channel(channel_id)
        .await?
        .filter(|channel| channel.channel_type.is_text_based())
        .ok_or(WebhookError::NotFound)?;

    let subject_id = request.subject_id().to_owned();
    let message = render::render(request, Utc::now()).into_create_message();
    let message = server.gateway.send_message(channel.id, message).await?;

    info!(
        channel_id = %channel.id,
        channel_name = channel.display_name(),
        message_id = %message.id,
        %subject_id,
        ?kind,
        "Sent message"
    );

    Ok(Json(WebhookResponse::success(message.id, channel.display_name())))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
