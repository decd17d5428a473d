use crate::control_id::{self, ControlId};
use crate::{Error, Result};
use model::Snowflake;
use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;
use tracing::{error, info, warn};

pub const RECORDED_REPLY: &str = "✅ Response recorded!";
pub const SIMULATED_REPLY: &str = "✅ Response recorded! (simulation mode)";
pub const REJECTED_REPLY: &str = "⚠️ Response received, but there was a problem recording it.";
pub const FAILED_REPLY: &str =
    "⚠️ Response received, but a network problem occurred while recording it.";

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approved,
    Rejected,
    Confirmed,
    SurveyResponse,
}

impl Decision {
    pub fn from_action(action: &str) -> Option<Decision> {
        match action {
            control_id::APPROVE => Some(Decision::Approved),
            control_id::REJECT => Some(Decision::Rejected),
            control_id::CONFIRM => Some(Decision::Confirmed),
            control_id::SURVEY => Some(Decision::SurveyResponse),
            _ => None,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CallbackPayload {
    pub action: String,
    pub subject_id: String,
    pub user_id: Snowflake,
    pub user_name: String,
    pub timestamp: String,
    pub guild_id: Option<Snowflake>,
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<Decision>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_index: Option<u32>,
}

/// Where the click ended up. Only `Recorded` and `Simulated` count as confirmed.
#[derive(Debug)]
pub enum CallbackOutcome {
    Recorded,
    Simulated,
    Rejected(StatusCode),
    Failed(Error),
}

impl CallbackOutcome {
    pub fn reply(&self) -> &'static str {
        match self {
            CallbackOutcome::Recorded => RECORDED_REPLY,
            CallbackOutcome::Simulated => SIMULATED_REPLY,
            CallbackOutcome::Rejected(_) => REJECTED_REPLY,
            CallbackOutcome::Failed(_) => FAILED_REPLY,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, CallbackOutcome::Recorded | CallbackOutcome::Simulated)
    }
}

impl CallbackPayload {
    /// `option_index` is only carried for survey answers with a numeric index.
    pub fn new(
        control: ControlId,
        user_id: Snowflake,
        user_name: impl Into<String>,
        timestamp: impl Into<String>,
        guild_id: Option<Snowflake>,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> CallbackPayload {
        let decision = Decision::from_action(&control.action);

        let option_index = match decision {
            Some(Decision::SurveyResponse) => control.option_index(),
            _ => None,
        };

        CallbackPayload {
            action: control.action,
            subject_id: control.subject_id,
            user_id,
            user_name: user_name.into(),
            timestamp: timestamp.into(),
            guild_id,
            channel_id,
            message_id,
            decision,
            option_index,
        }
    }
}

pub struct CallbackClient {
    http_client: reqwest::Client,
    url: Option<Box<str>>,
}

impl CallbackClient {
    pub fn new(url: Option<&str>) -> Result<CallbackClient> {
        let http_client = reqwest::ClientBuilder::new()
            .use_rustls_tls()
            .connect_timeout(Duration::from_secs(3))
            .build()?;

        Ok(CallbackClient {
            http_client,
            url: url.map(Box::from),
        })
    }

    pub fn is_simulated(&self) -> bool {
        self.url.is_none()
    }

    /// A single attempt; the outcome is reported, never retried.
    pub async fn deliver(&self, payload: &CallbackPayload) -> CallbackOutcome {
        let url = match &self.url {
            Some(url) => url,
            None => {
                info!(?payload, "No callback URL configured, simulating");
                return CallbackOutcome::Simulated;
            }
        };

        match self.http_client.post(&**url).json(payload).send().await {
            Ok(res) if res.status().is_success() => {
                info!(subject_id = %payload.subject_id, action = %payload.action, "Callback delivered");
                CallbackOutcome::Recorded
            }
            Ok(res) => {
                warn!(status = %res.status(), subject_id = %payload.subject_id, "Callback destination rejected payload");
                CallbackOutcome::Rejected(res.status())
            }
            Err(e) => {
                error!(error = %e, subject_id = %payload.subject_id, "Failed to send callback");
                CallbackOutcome::Failed(Error::Callback(e))
            }
        }
    }
}
