//! Typed data model for the Planets Nu turn snapshot.
//!
//! Only the fields the converter interprets are typed out. Every entity also
//! keeps a pass-through map of the remaining JSON fields so that a turn
//! upload can echo back data the converter never looked at; the server
//! rejects turns with missing fields.

use std::error::Error;
use std::fmt::{Debug, Display};

use serde::*;
use serde_json::Value;

pub mod combat;
pub mod game;
pub mod message;
pub mod planet;
pub mod ship;
pub mod specs;

/// Extra JSON fields an entity carries beyond the typed ones.
pub type ExtraFields = serde_json::Map<String, Value>;

pub(crate) fn minus_one() -> i32 {
    -1
}

/// The decoded turn snapshot: one game, one player, one turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub player: game::Player,
    pub settings: game::Settings,
    pub game: game::Game,
    #[serde(default)]
    pub players: Vec<game::Player>,
    #[serde(default)]
    pub races: Vec<specs::Race>,
    #[serde(default)]
    pub hulls: Vec<specs::Hull>,
    #[serde(default)]
    pub beams: Vec<specs::Beam>,
    #[serde(default)]
    pub torpedos: Vec<specs::Torpedo>,
    #[serde(default)]
    pub engines: Vec<specs::Engine>,
    #[serde(default)]
    pub planets: Vec<planet::Planet>,
    #[serde(default)]
    pub ships: Vec<ship::Ship>,
    #[serde(default)]
    pub starbases: Vec<planet::Starbase>,
    #[serde(default)]
    pub stock: Vec<planet::Stock>,
    #[serde(default)]
    pub minefields: Vec<combat::Minefield>,
    #[serde(default)]
    pub ionstorms: Vec<combat::IonStorm>,
    #[serde(default)]
    pub vcrs: Vec<combat::Vcr>,
    #[serde(default)]
    pub messages: Vec<message::Message>,
    #[serde(default)]
    pub mymessages: Vec<message::Message>,
    #[serde(default)]
    pub scores: Vec<game::Score>,
    /// Hull ids the local player can build, in build-slot order.
    #[serde(default)]
    pub racehulls: Vec<i32>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Snapshot {
    /// Parses the raw server response, which wraps the snapshot in an `rst` object.
    pub fn from_response(text: &str) -> Result<Snapshot, ModelError> {
        let value: Value = serde_json::from_str(text).map_err(ModelError::Json)?;
        let rst = value
            .get("rst")
            .cloned()
            .ok_or(ModelError::MissingSection("rst"))?;
        serde_json::from_value(rst).map_err(ModelError::Json)
    }

    pub fn planet(&self, id: i32) -> Option<&planet::Planet> {
        self.planets.iter().find(|p| p.id == id)
    }

    pub fn ship(&self, id: i32) -> Option<&ship::Ship> {
        self.ships.iter().find(|s| s.id == id)
    }

    pub fn starbase_at(&self, planet_id: i32) -> Option<&planet::Starbase> {
        self.starbases.iter().find(|b| b.planetid == planet_id)
    }

    pub fn hull(&self, id: i32) -> Option<&specs::Hull> {
        self.hulls.iter().find(|h| h.id == id)
    }

    pub fn beam(&self, id: i32) -> Option<&specs::Beam> {
        self.beams.iter().find(|b| b.id == id)
    }

    pub fn torpedo(&self, id: i32) -> Option<&specs::Torpedo> {
        self.torpedos.iter().find(|t| t.id == id)
    }

    pub fn engine(&self, id: i32) -> Option<&specs::Engine> {
        self.engines.iter().find(|e| e.id == id)
    }

    pub fn player_by_id(&self, id: i32) -> Option<&game::Player> {
        self.players.iter().find(|p| p.id == id)
    }
}

/// An error when decoding the snapshot.
#[derive(Debug)]
pub enum ModelError {
    /// The response is missing a required sub-object.
    MissingSection(&'static str),
    /// The JSON itself did not decode.
    Json(serde_json::Error),
}

impl Error for ModelError {}
impl Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn response_without_rst_is_rejected() {
        let err = Snapshot::from_response(r#"{"success":true}"#).unwrap_err();
        assert!(matches!(err, ModelError::MissingSection("rst")));
    }

    #[test]
    fn minimal_response_decodes() {
        let text = r#"{
            "success": true,
            "rst": {
                "player": {"id": 3, "raceid": 7},
                "settings": {"hoststart": "7/20/2012 6:00:00 PM"},
                "game": {"id": 42, "turn": 9},
                "players": [{"id": 3, "raceid": 7}],
                "ships": [{"id": 1, "ownerid": 3, "x": 1500, "y": 1200, "heading": 90}]
            }
        }"#;
        let snapshot = Snapshot::from_response(text).unwrap();
        assert_eq!(snapshot.player.raceid, 7);
        assert_eq!(snapshot.game.turn, 9);
        assert_eq!(snapshot.ships[0].heading, 90);
        assert_eq!(snapshot.planets.len(), 0);
    }
}
