//! Reading client-edited ships back into the Nu model.

use nu_model::ship::Ship;
use v3_format::records::{CargoTransfer, ShipRecord};
use v3_format::FixedStr;

use crate::owner::OwnerMap;

/// v3 mission numbers with a dedicated target slot.
const V3_TOW: u16 = 7;
const V3_INTERCEPT: u16 = 8;

/// Applies a client-edited record to a copy of the snapshot ship.
pub fn apply(record: &ShipRecord, original: &Ship, owners: &OwnerMap) -> Ship {
    let mut ship = original.clone();

    ship.friendlycode = record.fcode.to_text();
    ship.warp = i32::from(record.warp);
    ship.targetx = ship.x + i32::from(record.waypoint_dx);
    ship.targety = ship.y + i32::from(record.waypoint_dy);
    ship.mission = i32::from(record.mission).max(1) - 1;

    // The two dedicated v3 target slots fold back into one field; targets
    // of other missions cannot be edited in a v3 client, so they stay.
    match record.mission {
        V3_TOW => ship.mission1target = i32::from(record.tow_target),
        V3_INTERCEPT => ship.mission1target = i32::from(record.intercept_target),
        _ => {
            if original.mission == i32::from(V3_TOW) - 1
                || original.mission == i32::from(V3_INTERCEPT) - 1
            {
                ship.mission1target = 0;
            }
        }
    }

    ship.enemy = match record.enemy {
        0 => 0,
        race => {
            let seat = owners.owner(i32::from(race));
            if seat == 0 {
                log::warn!(
                    "ship {}: primary enemy race {race} has no seat in this game, clearing",
                    original.id
                );
            }
            seat
        }
    };

    if record.name != FixedStr::from_text(&original.name) {
        ship.name = record.name.to_text();
    }

    ship.neutronium = i32::from(record.neutronium);
    ship.tritanium = i32::from(record.tritanium);
    ship.duranium = i32::from(record.duranium);
    ship.molybdenum = i32::from(record.molybdenum);
    ship.supplies = i32::from(record.supplies);
    ship.clans = i32::from(record.clans);
    ship.ammo = i32::from(record.ammo);
    ship.megacredits = i32::from(record.megacredits);

    apply_transfer(record, &mut ship, original.id);

    ship
}

fn apply_transfer(record: &ShipRecord, ship: &mut Ship, id: i32) {
    let mut unload = record.unload;
    let transfer = record.transfer;

    if unload.has_cargo() && transfer.has_cargo() {
        // The Nu side has a single transfer slot; these two orders cannot
        // both survive.
        log::warn!("ship {id}: unload and ship transfer both set, dropping the transfer");
    }

    let (block, target_type) = if unload.has_cargo() {
        let target_type = if unload.target_id == 0 { 3 } else { 1 };
        (unload, target_type)
    } else if transfer.has_cargo() {
        (transfer, 2)
    } else {
        unload = CargoTransfer::default();
        (unload, 0)
    };

    ship.transferneutronium = i32::from(block.neutronium);
    ship.transfertritanium = i32::from(block.tritanium);
    ship.transferduranium = i32::from(block.duranium);
    ship.transfermolybdenum = i32::from(block.molybdenum);
    ship.transferclans = i32::from(block.clans);
    ship.transfersupplies = i32::from(block.supplies);
    ship.transfertargetid = i32::from(block.target_id);
    ship.transfertargettype = target_type;
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::pack;
    use nu_model::game::Player;

    fn owners() -> OwnerMap {
        OwnerMap::new(&[
            Player {
                id: 1,
                raceid: 1,
                ..Player::default()
            },
            Player {
                id: 2,
                raceid: 8,
                ..Player::default()
            },
        ])
    }

    fn ship() -> Ship {
        Ship {
            id: 5,
            ownerid: 1,
            name: "Titania".to_owned(),
            x: 1200,
            y: 1400,
            targetx: 1200,
            targety: 1400,
            mission: 6,
            mission1target: 42,
            enemy: 2,
            ..Ship::default()
        }
    }

    #[test]
    fn untouched_records_round_trip() {
        let owners = owners();
        let original = ship();
        let record = pack::ship::dat(&original, &owners);
        let applied = apply(&record, &original, &owners);
        assert!(crate::maketurn::commands::unchanged(&original, &applied));
    }

    #[test]
    fn mission_targets_fold_back() {
        let owners = owners();
        let original = ship();
        let mut record = pack::ship::dat(&original, &owners);

        record.mission = 8;
        record.tow_target = 0;
        record.intercept_target = 17;
        let applied = apply(&record, &original, &owners);
        assert_eq!(applied.mission, 7);
        assert_eq!(applied.mission1target, 17);
    }

    #[test]
    fn long_names_survive_when_unedited() {
        let owners = owners();
        let mut original = ship();
        original.name = "A name well over twenty characters".to_owned();
        let record = pack::ship::dat(&original, &owners);
        let applied = apply(&record, &original, &owners);
        assert_eq!(applied.name, original.name);

        let mut record = record;
        record.name = FixedStr::from_text("Renamed");
        let applied = apply(&record, &original, &owners);
        assert_eq!(applied.name, "Renamed");
    }

    #[test]
    fn conflicting_transfers_drop_the_ship_transfer() {
        let owners = owners();
        let original = ship();
        let mut record = pack::ship::dat(&original, &owners);
        record.unload.supplies = 10;
        record.unload.target_id = 33;
        record.transfer.clans = 4;
        record.transfer.target_id = 8;

        let applied = apply(&record, &original, &owners);
        assert_eq!(applied.transfertargettype, 1);
        assert_eq!(applied.transfersupplies, 10);
        assert_eq!(applied.transferclans, 0);
    }

    #[test]
    fn unknown_enemy_race_is_cleared() {
        let owners = owners();
        let original = ship();
        let mut record = pack::ship::dat(&original, &owners);
        record.enemy = 5;
        let applied = apply(&record, &original, &owners);
        assert_eq!(applied.enemy, 0);
    }
}
