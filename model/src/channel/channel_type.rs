use serde_repr::{Deserialize_repr, Serialize_repr};
use ChannelType::*;

#[derive(Serialize_repr, Deserialize_repr, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ChannelType {
    GuildText = 0,
    DM = 1,
    GuildVoice = 2,
    GroupDM = 3,
    GuildCategory = 4,
    GuildNews = 5,
    GuildAnnouncementThread = 10,
    GuildPublicThread = 11,
    GuildPrivateThread = 12,
    GuildStageVoice = 13,
    GuildDirectory = 14,
    GuildForum = 15,
    GuildMedia = 16,
}

impl ChannelType {
    /// Whether messages can be posted to the channel directly.
    pub fn is_text_based(&self) -> bool {
        matches!(
            self,
            GuildText
                | DM
                | GuildVoice
                | GroupDM
                | GuildNews
                | GuildAnnouncementThread
                | GuildPublicThread
                | GuildPrivateThread
                | GuildStageVoice
        )
    }
}
