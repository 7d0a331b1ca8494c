//! Ship data as served by Nu.

use serde::*;

use crate::{minus_one, ExtraFields};

/// A single ship. Foreign ships carry only the fields a sensor contact
/// reveals; the rest decode to their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ship {
    pub id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ownerid: i32,
    #[serde(default)]
    pub friendlycode: String,
    #[serde(default)]
    pub warp: i32,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub targetx: i32,
    #[serde(default)]
    pub targety: i32,
    #[serde(default)]
    pub engineid: i32,
    #[serde(default)]
    pub hullid: i32,
    #[serde(default)]
    pub beamid: i32,
    #[serde(default)]
    pub beams: i32,
    #[serde(default)]
    pub bays: i32,
    #[serde(default)]
    pub torpedoid: i32,
    /// Number of torpedo launchers.
    #[serde(default)]
    pub torps: i32,
    /// Fighters or torpedoes, depending on whether the hull has bays.
    #[serde(default)]
    pub ammo: i32,
    /// Mission number, 0-based.
    #[serde(default)]
    pub mission: i32,
    /// Intercept or tow target; which one depends on the mission.
    #[serde(default)]
    pub mission1target: i32,
    #[serde(default)]
    pub enemy: i32,
    #[serde(default)]
    pub damage: i32,
    #[serde(default)]
    pub crew: i32,
    #[serde(default)]
    pub clans: i32,
    #[serde(default)]
    pub neutronium: i32,
    #[serde(default)]
    pub tritanium: i32,
    #[serde(default)]
    pub duranium: i32,
    #[serde(default)]
    pub molybdenum: i32,
    #[serde(default)]
    pub supplies: i32,
    #[serde(default)]
    pub megacredits: i32,
    #[serde(default)]
    pub transferneutronium: i32,
    #[serde(default)]
    pub transfertritanium: i32,
    #[serde(default)]
    pub transferduranium: i32,
    #[serde(default)]
    pub transfermolybdenum: i32,
    #[serde(default)]
    pub transferclans: i32,
    #[serde(default)]
    pub transfersupplies: i32,
    #[serde(default)]
    pub transferammo: i32,
    #[serde(default)]
    pub transfermegacredits: i32,
    #[serde(default)]
    pub transfertargetid: i32,
    /// 0 = none, 1 = planet unload, 2 = ship transfer, 3 = jettison.
    #[serde(default)]
    pub transfertargettype: i32,
    #[serde(default = "minus_one")]
    pub heading: i32,
    #[serde(default)]
    pub mass: i32,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Ship {
    /// Whether the transfer block holds anything to move.
    pub fn has_transfer(&self) -> bool {
        self.transferneutronium != 0
            || self.transfertritanium != 0
            || self.transferduranium != 0
            || self.transfermolybdenum != 0
            || self.transferclans != 0
            || self.transfersupplies != 0
            || self.transferammo != 0
            || self.transfermegacredits != 0
    }
}
