mod index;
pub use index::index_handler;

mod webhook;
pub use webhook::{webhook_handler, WebhookBody};
