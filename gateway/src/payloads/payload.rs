use serde::Deserialize;
use serde_json::value::RawValue;
use serde_repr::{Deserialize_repr, Serialize_repr};

#[derive(Serialize_repr, Deserialize_repr, PartialEq, Eq, Debug, Clone, Copy)]
#[repr(u8)]
pub enum Opcode {
    Dispatch = 0,
    Heartbeat = 1,
    Identify = 2,
    PresenceUpdate = 3,
    VoiceStateUpdate = 4,
    Resume = 6,
    Reconnect = 7,
    RequestGuildMembers = 8,
    InvalidSession = 9,
    Hello = 10,
    HeartbeatAck = 11,
}

/// Envelope of every frame received from the gateway. `d` is left raw so it is only parsed once
/// the opcode and event name are known.
#[derive(Deserialize, Debug)]
pub struct Payload {
    #[serde(rename = "op")]
    pub opcode: Opcode,

    #[serde(rename = "s")]
    pub seq: Option<u64>,

    #[serde(rename = "t")]
    pub event_name: Option<String>,

    #[serde(rename = "d")]
    pub data: Option<Box<RawValue>>,
}

/// `d` of the first frame on every connection.
#[derive(Deserialize, Debug)]
pub struct Hello {
    pub heartbeat_interval: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello() {
        let payload: Payload =
            serde_json::from_str(r#"{"op": 10, "s": null, "t": null, "d": {"heartbeat_interval": 41250}}"#)
                .unwrap();

        assert_eq!(payload.opcode, Opcode::Hello);
        assert!(payload.event_name.is_none());

        let hello: Hello = serde_json::from_str(payload.data.unwrap().get()).unwrap();
        assert_eq!(hello.heartbeat_interval, 41250);
    }
}
