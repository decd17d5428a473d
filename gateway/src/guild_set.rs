use model::guild::UnavailableGuild;
use model::Snowflake;
use parking_lot::RwLock;
use std::collections::HashSet;

/// Guilds the bot is currently a member of, as seen on the gateway.
#[derive(Debug, Default)]
pub struct GuildSet {
    inner: RwLock<HashSet<Snowflake>>,
}

impl GuildSet {
    pub fn new() -> GuildSet {
        GuildSet::default()
    }

    pub fn reset(&self, guilds: &[UnavailableGuild]) {
        let mut inner = self.inner.write();
        inner.clear();
        inner.extend(guilds.iter().map(|guild| guild.id));
    }

    pub fn insert(&self, guild: &UnavailableGuild) {
        self.inner.write().insert(guild.id);
    }

    pub fn remove(&self, guild: &UnavailableGuild) {
        if !guild.is_outage() {
            self.inner.write().remove(&guild.id);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guild(id: u64, unavailable: Option<bool>) -> UnavailableGuild {
        UnavailableGuild {
            id: Snowflake(id),
            unavailable,
        }
    }

    #[test]
    fn test_outage_keeps_guild() {
        let set = GuildSet::new();
        set.reset(&[guild(1, Some(true)), guild(2, Some(true))]);
        set.insert(&guild(3, None));
        assert_eq!(set.len(), 3);

        set.remove(&guild(1, Some(true)));
        assert_eq!(set.len(), 3);

        set.remove(&guild(1, None));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_reset_replaces() {
        let set = GuildSet::new();
        set.insert(&guild(9, None));
        set.reset(&[]);
        assert!(set.is_empty());
    }
}
