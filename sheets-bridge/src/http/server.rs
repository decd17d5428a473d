use super::routes;
use crate::channel_gateway::ChannelGateway;
use crate::Result;
use axum::routing::{get, post};
use axum::{Extension, Router};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

pub struct Server {
    pub webhook_secret: Box<str>,
    pub gateway: Arc<dyn ChannelGateway>,
    pub started_at: Instant,
}

impl Server {
    pub fn new(webhook_secret: impl Into<Box<str>>, gateway: Arc<dyn ChannelGateway>) -> Server {
        Server {
            webhook_secret: webhook_secret.into(),
            gateway,
            started_at: Instant::now(),
        }
    }

    pub fn router(self) -> Router {
        let server = Arc::new(self);

        Router::new()
            .route("/", get(routes::index_handler))
            .route("/webhook", post(routes::webhook_handler))
            .layer(Extension(server))
            .layer(TraceLayer::new_for_http())
    }

    pub async fn start(self, listener: TcpListener) -> Result<()> {
        info!(addr = ?listener.local_addr()?, "Webhook server listening");

        axum::serve(listener, self.router()).await?;
        Ok(())
    }

    /// Compares without short-circuiting on the first mismatched byte.
    pub fn verify_secret(&self, secret: &str) -> bool {
        let (expected, actual) = (self.webhook_secret.as_bytes(), secret.as_bytes());

        if expected.len() != actual.len() {
            return false;
        }

        expected
            .iter()
            .zip(actual)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}
