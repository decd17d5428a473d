use std::str::FromStr;
use std::sync::Arc;

use gateway::{GatewayError, GuildSet, Intents, RestClient, Shard, DEFAULT_GATEWAY_URL};
use sentry::types::Dsn;
use sentry_tracing::EventFilter;
use sheets_bridge::callback::CallbackClient;
use sheets_bridge::channel_gateway::{ChannelGateway, DiscordGateway};
use sheets_bridge::events::EventHandler;
use sheets_bridge::http::Server;
use sheets_bridge::{Config, Error, Result};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match Config::new() {
        Ok(config) => config,
        Err(e) => {
            // Observability is not configured yet
            tracing_subscriber::fmt().with_writer(std::io::stderr).init();
            error!(error = %e, "Failed to load config from environment");
            return Err(e.into());
        }
    };

    let _guard = configure_observability(&config)?;

    if config.bot_token.trim().is_empty() {
        error!("BOT_TOKEN is not set");
        return Err(Error::MissingToken);
    }

    info!(token_length = config.bot_token.len(), "Bot token configured");

    if config.uses_default_secret() {
        warn!("WEBHOOK_SECRET is not set, falling back to the insecure default");
    }

    if config.callback_url().is_none() {
        warn!("GOOGLE_SCRIPT_URL is not set, button clicks will only be logged");
    }

    let guilds = Arc::new(GuildSet::new());
    let rest = RestClient::new(config.bot_token.clone())?;
    let gateway: Arc<dyn ChannelGateway> = Arc::new(DiscordGateway::new(rest, Arc::clone(&guilds)));

    let handler = Arc::new(EventHandler::new(
        Arc::clone(&gateway),
        CallbackClient::new(config.callback_url())?,
        config.webhook_url(),
    ));

    let (event_tx, mut event_rx) = mpsc::channel(256);
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            let handler = Arc::clone(&handler);
            tokio::spawn(async move { handler.handle(event).await });
        }
    });

    let intents = Intents::build(&[
        Intents::Guilds,
        Intents::GuildMessages,
        Intents::MessageContent,
    ]);
    let shard = Shard::new(
        config.bot_token.clone(),
        intents,
        DEFAULT_GATEWAY_URL,
        guilds,
        event_tx,
    );

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    let server = Server::new(config.webhook_secret.as_str(), gateway);

    tokio::select! {
        res = shard.run() => match res {
            Err(GatewayError::Fatal(close)) => {
                error!(code = close.status_code, reason = %close.error, "Discord rejected the connection");
                Err(GatewayError::Fatal(close).into())
            }
            res => res.map_err(Error::from),
        },

        res = server.start(listener) => {
            if let Err(e) = &res {
                error!(error = %e, "Webhook server stopped");
            }
            res
        }
    }
}

fn configure_observability(config: &Config) -> Result<sentry::ClientInitGuard> {
    let dsn = config
        .sentry_dsn
        .as_deref()
        .filter(|dsn| !dsn.is_empty())
        .map(Dsn::from_str)
        .transpose()?;

    let guard = sentry::init(sentry::ClientOptions {
        dsn,
        debug: config.debug_mode,
        release: sentry::release_name!(),
        ..Default::default()
    });

    let sentry_layer = sentry_tracing::layer().event_filter(|meta| match meta.level() {
        &tracing::Level::ERROR | &tracing::Level::WARN => EventFilter::Exception,
        _ => EventFilter::Ignore,
    });

    let registry = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(sentry_layer);

    if config.json_log {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    Ok(guard)
}
