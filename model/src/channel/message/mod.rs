mod message;
pub use message::Message;

pub mod embed;
pub use embed::{Embed, EmbedField, EmbedFooter};

mod create_message;
pub use create_message::{CreateMessage, EditMessage};
