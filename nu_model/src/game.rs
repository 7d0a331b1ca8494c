//! Game, player and host-settings data.

use serde::*;

use crate::ExtraFields;

/// A player seat. The same shape is used for the local `player` object and
/// the entries of the `players` list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Player {
    pub id: i32,
    /// The v3 race slot (1-11) this seat plays.
    #[serde(default)]
    pub raceid: i32,
    #[serde(default)]
    pub username: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Game {
    pub id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub turn: i32,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Host settings. Mostly passed through into the configuration digests; only
/// `hoststart` is interpreted (it yields the v3 timestamp).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub turn: i32,
    #[serde(default)]
    pub hoststart: String,
    #[serde(default)]
    pub hostcompleted: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Per-player score line for one turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Score {
    #[serde(default)]
    pub ownerid: i32,
    #[serde(default)]
    pub capitalships: i32,
    #[serde(default)]
    pub freighters: i32,
    #[serde(default)]
    pub planets: i32,
    #[serde(default)]
    pub starbases: i32,
    #[serde(default)]
    pub militaryscore: i32,
    #[serde(default)]
    pub inventoryscore: i32,
    #[serde(default)]
    pub prioritypoints: i32,
    #[serde(flatten)]
    pub extra: ExtraFields,
}
