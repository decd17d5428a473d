use thiserror::Error;

use crate::close_event::CloseEvent;

pub type Result<T> = std::result::Result<T, GatewayError>;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("error while encoding or decoding json: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("error while operating on websocket: {0}")]
    WebsocketError(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("error while reading oneshot channel: {0}")]
    RecvError(#[from] tokio::sync::oneshot::error::RecvError),

    #[error("websocket writer has shut down")]
    WriterClosed,

    #[error("event receiver was dropped")]
    EventReceiverClosed,

    #[error("shard is not connected")]
    NotConnected,

    #[error("dispatch payload was missing its {0} field")]
    MissingEventData(&'static str),

    #[error("error while performing HTTP request: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("discord returned {status}: {body}")]
    UnexpectedStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("gateway closed the connection with fatal code {}: {}", .0.status_code, .0.error)]
    Fatal(CloseEvent),
}

impl<T> From<GatewayError> for Result<T> {
    fn from(e: GatewayError) -> Self {
        Err(e)
    }
}
