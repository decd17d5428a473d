#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u64)]
pub enum Intents {
    Guilds = 1 << 0,
    GuildMembers = 1 << 1,
    GuildModeration = 1 << 2,
    GuildMessages = 1 << 9,
    GuildMessageReactions = 1 << 10,
    DirectMessages = 1 << 12,
    DirectMessageReactions = 1 << 13,
    /// Privileged, must also be enabled in the developer portal.
    MessageContent = 1 << 15,
}

impl Intents {
    pub fn build(intents: &[Intents]) -> u64 {
        intents
            .iter()
            .fold(0, |acc, intent| acc | *intent as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build() {
        let intents = Intents::build(&[
            Intents::Guilds,
            Intents::GuildMessages,
            Intents::MessageContent,
        ]);

        assert_eq!(intents, 33281);
    }
}
