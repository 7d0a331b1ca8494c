//! Static component and race specifications.

use serde::*;

use crate::ExtraFields;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hull {
    pub id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tritanium: i32,
    #[serde(default)]
    pub duranium: i32,
    #[serde(default)]
    pub molybdenum: i32,
    #[serde(default)]
    pub fueltank: i32,
    #[serde(default)]
    pub crew: i32,
    #[serde(default)]
    pub engines: i32,
    #[serde(default)]
    pub mass: i32,
    #[serde(default)]
    pub techlevel: i32,
    #[serde(default)]
    pub cargo: i32,
    #[serde(default)]
    pub fighterbays: i32,
    #[serde(default)]
    pub launchers: i32,
    #[serde(default)]
    pub beams: i32,
    #[serde(default)]
    pub cost: i32,
    #[serde(default)]
    pub cancloak: bool,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Beam {
    pub id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cost: i32,
    #[serde(default)]
    pub tritanium: i32,
    #[serde(default)]
    pub duranium: i32,
    #[serde(default)]
    pub molybdenum: i32,
    #[serde(default)]
    pub mass: i32,
    #[serde(default)]
    pub techlevel: i32,
    #[serde(default)]
    pub crewkill: i32,
    #[serde(default)]
    pub damage: i32,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Torpedo {
    pub id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub torpedocost: i32,
    #[serde(default)]
    pub launchercost: i32,
    #[serde(default)]
    pub tritanium: i32,
    #[serde(default)]
    pub duranium: i32,
    #[serde(default)]
    pub molybdenum: i32,
    #[serde(default)]
    pub mass: i32,
    #[serde(default)]
    pub techlevel: i32,
    #[serde(default)]
    pub crewkill: i32,
    #[serde(default)]
    pub damage: i32,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Engine {
    pub id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cost: i32,
    #[serde(default)]
    pub tritanium: i32,
    #[serde(default)]
    pub duranium: i32,
    #[serde(default)]
    pub molybdenum: i32,
    #[serde(default)]
    pub techlevel: i32,
    #[serde(default)]
    pub warp1: i32,
    #[serde(default)]
    pub warp2: i32,
    #[serde(default)]
    pub warp3: i32,
    #[serde(default)]
    pub warp4: i32,
    #[serde(default)]
    pub warp5: i32,
    #[serde(default)]
    pub warp6: i32,
    #[serde(default)]
    pub warp7: i32,
    #[serde(default)]
    pub warp8: i32,
    #[serde(default)]
    pub warp9: i32,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Engine {
    /// Fuel usage figures for warp 1 through 9, in file order.
    pub fn warp_factors(&self) -> [i32; 9] {
        [
            self.warp1, self.warp2, self.warp3, self.warp4, self.warp5, self.warp6, self.warp7,
            self.warp8, self.warp9,
        ]
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Race {
    pub id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub shortname: String,
    #[serde(default)]
    pub adjective: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}
