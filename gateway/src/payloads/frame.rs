use super::Opcode;
use serde::Serialize;

const LIBRARY_NAME: &str = "sheets-bridge";

/// A frame sent to the gateway.
#[derive(Serialize, Debug)]
pub struct Frame<T> {
    #[serde(rename = "op")]
    opcode: Opcode,

    #[serde(rename = "d")]
    data: T,
}

impl Frame<Option<u64>> {
    /// Carries the last sequence number received, or null before the first dispatch.
    pub fn heartbeat(seq: Option<u64>) -> Self {
        Frame {
            opcode: Opcode::Heartbeat,
            data: seq,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct IdentifyData {
    token: String,
    properties: ConnectionProperties,
    intents: u64,
}

#[derive(Serialize, Debug)]
struct ConnectionProperties {
    os: &'static str,
    browser: &'static str,
    device: &'static str,
}

impl Frame<IdentifyData> {
    pub fn identify(token: String, intents: u64) -> Self {
        Frame {
            opcode: Opcode::Identify,
            data: IdentifyData {
                token,
                properties: ConnectionProperties {
                    os: std::env::consts::OS,
                    browser: LIBRARY_NAME,
                    device: LIBRARY_NAME,
                },
                intents,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identify_wire_format() {
        let value = serde_json::to_value(Frame::identify("abc".to_owned(), 33281)).unwrap();

        assert_eq!(value["op"], 2);
        assert_eq!(value["d"]["token"], "abc");
        assert_eq!(value["d"]["intents"], 33281);
        assert_eq!(value["d"]["properties"]["browser"], LIBRARY_NAME);
    }

    #[test]
    fn test_heartbeat_wire_format() {
        assert_eq!(
            serde_json::to_string(&Frame::heartbeat(None)).unwrap(),
            r#"{"op":1,"d":null}"#
        );
        assert_eq!(
            serde_json::to_string(&Frame::heartbeat(Some(42))).unwrap(),
            r#"{"op":1,"d":42}"#
        );
    }
}
