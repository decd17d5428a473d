use crate::http::response::StatusResponse;
use crate::http::Server;
use axum::{Extension, Json};
use std::sync::Arc;

pub async fn index_handler(Extension(server): Extension<Arc<Server>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "Discord Bot is running! 🤖",
        uptime: server.started_at.elapsed().as_secs(),
        guilds: server.gateway.guild_count(),
    })
}
