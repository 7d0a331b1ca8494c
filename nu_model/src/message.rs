//! In-game messages.

use serde::*;

use crate::ExtraFields;

/// A message, either received (`messages`) or sent (`mymessages`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    pub id: i32,
    /// Message class, 0-21. 0 is an outbound player-to-player message.
    #[serde(default)]
    pub messagetype: i32,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub body: String,
    /// The id of whatever the message is about; the addressee seat for
    /// player-to-player messages.
    #[serde(default)]
    pub target: i32,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub ownerid: i32,
    #[serde(default)]
    pub turn: i32,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn extra_fields_round_trip() {
        let json = r#"{"id":3,"messagetype":1,"body":"hi","target":0,"unusual":"kept"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.id, 3);
        assert_eq!(msg.extra.get("unusual").and_then(|v| v.as_str()), Some("kept"));

        let back = serde_json::to_value(&msg).unwrap();
        assert_eq!(back.get("unusual").and_then(|v| v.as_str()), Some("kept"));
    }
}
