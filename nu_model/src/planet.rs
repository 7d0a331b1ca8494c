//! Planet, starbase and starbase stock data.

use serde::*;

use crate::{minus_one, ExtraFields};

/// A planet. Unknown planets decode to defaults with `temp == -1`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Planet {
    pub id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ownerid: i32,
    #[serde(default)]
    pub friendlycode: String,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub mines: i32,
    #[serde(default)]
    pub factories: i32,
    #[serde(default)]
    pub defense: i32,
    #[serde(default)]
    pub builtmines: i32,
    #[serde(default)]
    pub builtfactories: i32,
    #[serde(default)]
    pub builtdefense: i32,
    #[serde(default)]
    pub neutronium: i32,
    #[serde(default)]
    pub tritanium: i32,
    #[serde(default)]
    pub duranium: i32,
    #[serde(default)]
    pub molybdenum: i32,
    #[serde(default)]
    pub clans: i32,
    #[serde(default)]
    pub supplies: i32,
    #[serde(default)]
    pub megacredits: i32,
    #[serde(default)]
    pub suppliessold: i32,
    #[serde(default)]
    pub groundneutronium: i32,
    #[serde(default)]
    pub groundtritanium: i32,
    #[serde(default)]
    pub groundduranium: i32,
    #[serde(default)]
    pub groundmolybdenum: i32,
    #[serde(default)]
    pub densityneutronium: i32,
    #[serde(default)]
    pub densitytritanium: i32,
    #[serde(default)]
    pub densityduranium: i32,
    #[serde(default)]
    pub densitymolybdenum: i32,
    #[serde(default)]
    pub colonisttaxrate: i32,
    #[serde(default)]
    pub nativetaxrate: i32,
    #[serde(default)]
    pub colonisthappypoints: i32,
    #[serde(default)]
    pub nativehappypoints: i32,
    #[serde(default)]
    pub nativegovernment: i32,
    #[serde(default)]
    pub nativeclans: i32,
    /// Native race, -1 when there are none.
    #[serde(default = "minus_one")]
    pub nativetype: i32,
    /// Surface temperature, -1 when unknown.
    #[serde(default = "minus_one")]
    pub temp: i32,
    #[serde(default)]
    pub buildingstarbase: bool,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// A starbase. Only bases on planets of the local player are served.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Starbase {
    pub id: i32,
    #[serde(default)]
    pub planetid: i32,
    #[serde(default)]
    pub defense: i32,
    #[serde(default)]
    pub builtdefense: i32,
    #[serde(default)]
    pub damage: i32,
    #[serde(default)]
    pub enginetechlevel: i32,
    #[serde(default)]
    pub hulltechlevel: i32,
    #[serde(default)]
    pub beamtechlevel: i32,
    #[serde(default)]
    pub torptechlevel: i32,
    #[serde(default)]
    pub enginetechup: i32,
    #[serde(default)]
    pub hulltechup: i32,
    #[serde(default)]
    pub beamtechup: i32,
    #[serde(default)]
    pub torptechup: i32,
    #[serde(default)]
    pub fighters: i32,
    #[serde(default)]
    pub builtfighters: i32,
    #[serde(default)]
    pub mission: i32,
    #[serde(default)]
    pub shipmission: i32,
    #[serde(default)]
    pub targetshipid: i32,
    #[serde(default)]
    pub buildhullid: i32,
    #[serde(default)]
    pub buildengineid: i32,
    #[serde(default)]
    pub buildbeamid: i32,
    #[serde(default)]
    pub buildbeamcount: i32,
    #[serde(default)]
    pub buildtorpedoid: i32,
    #[serde(default)]
    pub buildtorpcount: i32,
    #[serde(default)]
    pub isbuilding: bool,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// One starbase inventory record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stock {
    pub id: i32,
    #[serde(default)]
    pub starbaseid: i32,
    /// 1 = hull, 2 = engine, 3 = beam, 4 = launcher, 5 = torpedo.
    #[serde(default)]
    pub stocktype: i32,
    #[serde(default)]
    pub stockid: i32,
    #[serde(default)]
    pub amount: i32,
    /// Net production this turn; negative means shipped out.
    #[serde(default)]
    pub builtamount: i32,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Stock type constants as used in [`Stock::stocktype`].
pub mod stock_type {
    pub const HULL: i32 = 1;
    pub const ENGINE: i32 = 2;
    pub const BEAM: i32 = 3;
    pub const LAUNCHER: i32 = 4;
    pub const TORPEDO: i32 = 5;
}
