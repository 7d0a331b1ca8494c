//! Translation between Nu seat numbers and v3 race slots.

use std::collections::HashMap;

use nu_model::game::Player;

/// Bidirectional owner-id / race-slot lookup built from the `players` list.
///
/// Every player reference in the packed files goes through this one map so
/// that ships, planets, bases, scores and mines all agree.
#[derive(Debug, Clone)]
pub struct OwnerMap {
    to_race: HashMap<i32, i32>,
    to_owner: HashMap<i32, i32>,
}

impl OwnerMap {
    pub fn new(players: &[Player]) -> Self {
        let mut to_race = HashMap::new();
        let mut to_owner = HashMap::new();
        for player in players {
            to_race.insert(player.id, player.raceid);
            to_owner.insert(player.raceid, player.id);
        }
        Self { to_race, to_owner }
    }

    /// The race slot of a seat; 0 for neutral or unknown seats.
    pub fn race(&self, owner: i32) -> i32 {
        self.to_race.get(&owner).copied().unwrap_or(0)
    }

    /// The seat playing a race slot; 0 when the slot is empty.
    pub fn owner(&self, race: i32) -> i32 {
        self.to_owner.get(&race).copied().unwrap_or(0)
    }

    pub fn has_owner(&self, owner: i32) -> bool {
        self.to_race.contains_key(&owner)
    }
}
