mod unavailable_guild;
pub use unavailable_guild::UnavailableGuild;

mod member;
pub use member::Member;
