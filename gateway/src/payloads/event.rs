use serde::Deserialize;
use serde_json::value::RawValue;

use crate::{GatewayError, Result};
use model::channel::message::Message;
use model::guild::UnavailableGuild;
use model::interaction::Interaction;
use model::user::User;

/// The subset of dispatch events the bridge acts upon.
#[derive(Debug)]
pub enum Event {
    Ready(Ready),
    GuildCreate(UnavailableGuild),
    GuildDelete(UnavailableGuild),
    MessageCreate(Box<Message>),
    InteractionCreate(Box<Interaction>),
}

#[derive(Deserialize, Debug)]
pub struct Ready {
    pub session_id: String,
    pub user: User,
    pub guilds: Vec<UnavailableGuild>,
}

impl Event {
    /// Returns `Ok(None)` for event names that are not handled.
    pub fn parse(event_name: &str, data: Option<&RawValue>) -> Result<Option<Event>> {
        let parse_data = || data.map(RawValue::get).ok_or(GatewayError::MissingEventData("d"));

        let event = match event_name {
            "READY" => Event::Ready(serde_json::from_str(parse_data()?)?),
            "GUILD_CREATE" => Event::GuildCreate(serde_json::from_str(parse_data()?)?),
            "GUILD_DELETE" => Event::GuildDelete(serde_json::from_str(parse_data()?)?),
            "MESSAGE_CREATE" => Event::MessageCreate(serde_json::from_str(parse_data()?)?),
            "INTERACTION_CREATE" => Event::InteractionCreate(serde_json::from_str(parse_data()?)?),
            _ => return Ok(None),
        };

        Ok(Some(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payloads::{Opcode, Payload};

    #[test]
    fn test_parse_message_create() {
        let raw = r#"{"op":0,"s":4,"t":"MESSAGE_CREATE","d":{
            "id":"10","channel_id":"20","guild_id":"30",
            "author":{"id":"40","username":"nelly","avatar":null},
            "content":"!ping","timestamp":"2024-05-01T09:30:00.000000+00:00","edited_timestamp":null,
            "embeds":[],"components":[]
        }}"#;

        let payload: Payload = serde_json::from_str(raw).unwrap();
        assert_eq!(payload.opcode, Opcode::Dispatch);
        assert_eq!(payload.seq, Some(4));

        let event = Event::parse(
            payload.event_name.as_deref().unwrap(),
            payload.data.as_deref(),
        )
        .unwrap();

        match event {
            Some(Event::MessageCreate(message)) => assert_eq!(&*message.content, "!ping"),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_parse_ready() {
        let raw = r#"{"v":10,"session_id":"abc","user":{"id":"1","username":"bridge","bot":true,"avatar":null},
            "guilds":[{"id":"2","unavailable":true},{"id":"3","unavailable":true}],"application":{"id":"1"}}"#;
        let data = RawValue::from_string(raw.to_owned()).unwrap();

        match Event::parse("READY", Some(&data)).unwrap() {
            Some(Event::Ready(ready)) => {
                assert_eq!(ready.session_id, "abc");
                assert_eq!(ready.guilds.len(), 2);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_ignore_unhandled() {
        let data = RawValue::from_string("{}".to_owned()).unwrap();
        assert!(Event::parse("TYPING_START", Some(&data)).unwrap().is_none());
    }

    #[test]
    fn test_missing_data() {
        assert!(matches!(
            Event::parse("GUILD_CREATE", None),
            Err(GatewayError::MissingEventData("d"))
        ));
    }
}
