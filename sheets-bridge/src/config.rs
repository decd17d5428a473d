use serde::Deserialize;

pub const DEFAULT_WEBHOOK_SECRET: &str = "your-secret-key";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub bot_token: String,
    #[serde(default = "default_webhook_secret")]
    pub webhook_secret: String,
    /// Where button clicks are relayed. Without one, clicks are only logged.
    #[serde(rename = "google_script_url")]
    pub callback_url: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    pub public_url: Option<String>,
    pub sentry_dsn: Option<String>,
    #[serde(default)]
    pub json_log: bool,
    #[serde(default)]
    pub debug_mode: bool,
}

fn default_webhook_secret() -> String {
    DEFAULT_WEBHOOK_SECRET.to_owned()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    pub fn new() -> Result<Config, envy::Error> {
        envy::from_env()
    }

    pub fn uses_default_secret(&self) -> bool {
        self.webhook_secret == DEFAULT_WEBHOOK_SECRET
    }

    pub fn callback_url(&self) -> Option<&str> {
        self.callback_url.as_deref().filter(|url| !url.is_empty())
    }

    /// Address external callers should post webhooks to.
    pub fn webhook_url(&self) -> String {
        match self.public_url.as_deref().filter(|url| !url.is_empty()) {
            Some(base) => format!("{}/webhook", base.trim_end_matches('/')),
            None => format!("http://localhost:{}/webhook", self.port),
        }
    }
}
