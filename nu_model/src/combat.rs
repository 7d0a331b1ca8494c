//! Combat recordings, minefields and ion storms.

use serde::*;

use crate::ExtraFields;

/// A combat recording. The client replays these; the converter only copies
/// the numbers into the v3 layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vcr {
    pub id: i32,
    #[serde(default)]
    pub seed: i32,
    #[serde(default)]
    pub battletype: i32,
    #[serde(default)]
    pub temperature: i32,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub left: VcrCombatant,
    #[serde(default)]
    pub right: VcrCombatant,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// One side of a combat recording. `objectid` names the ship or planet that
/// fought; planets only ever appear on the right side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VcrCombatant {
    #[serde(default)]
    pub objectid: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ownerid: i32,
    #[serde(default)]
    pub hullid: i32,
    #[serde(default)]
    pub image: i32,
    #[serde(default)]
    pub damage: i32,
    #[serde(default)]
    pub crew: i32,
    #[serde(default)]
    pub mass: i32,
    #[serde(default)]
    pub shield: i32,
    #[serde(default)]
    pub beamid: i32,
    #[serde(default)]
    pub beamcount: i32,
    #[serde(default)]
    pub baycount: i32,
    #[serde(default)]
    pub torpedoid: i32,
    /// Fighters when the side has bays, torpedoes otherwise.
    #[serde(default)]
    pub torpedos: i32,
    #[serde(default)]
    pub launchercount: i32,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Minefield {
    pub id: i32,
    #[serde(default)]
    pub ownerid: i32,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub radius: i32,
    #[serde(default)]
    pub units: i32,
    #[serde(default)]
    pub isweb: bool,
    #[serde(default)]
    pub friendlycode: String,
    #[serde(default)]
    pub infoturn: i32,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IonStorm {
    pub id: i32,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub radius: i32,
    #[serde(default)]
    pub voltage: i32,
    #[serde(default)]
    pub warp: i32,
    #[serde(default)]
    pub heading: i32,
    #[serde(default)]
    pub isgrowing: bool,
    #[serde(flatten)]
    pub extra: ExtraFields,
}
