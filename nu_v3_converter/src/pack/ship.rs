//! Packing of owned ships and foreign contacts.

use nu_model::ship::Ship;
use v3_format::records::{CargoTransfer, ShipRecord, TargetRecord};
use v3_format::FixedStr;

use crate::flow::{consume, take, FlowLedger};
use crate::num::{sword, word};
use crate::owner::OwnerMap;

/// Nu mission numbers whose target word routes into a dedicated v3 slot.
const MISSION_TOW: i32 = 6;
const MISSION_INTERCEPT: i32 = 7;

/// Transfer target types of the Nu model.
const TARGET_PLANET: i32 = 1;
const TARGET_SHIP: i32 = 2;
const TARGET_JETTISON: i32 = 3;

/// Builds the post-turn record of an owned ship.
pub fn dat(ship: &Ship, owners: &OwnerMap) -> ShipRecord {
    let mut record = ShipRecord {
        id: word(ship.id),
        owner: word(owners.race(ship.ownerid)),
        fcode: FixedStr::from_text(&ship.friendlycode),
        warp: word(ship.warp),
        waypoint_dx: sword(ship.targetx - ship.x),
        waypoint_dy: sword(ship.targety - ship.y),
        x: word(ship.x),
        y: word(ship.y),
        engine: word(ship.engineid),
        hull: word(ship.hullid),
        beam_type: word(ship.beamid),
        beam_count: word(ship.beams),
        bay_count: word(ship.bays),
        torp_type: word(ship.torpedoid),
        ammo: word(ship.ammo),
        launcher_count: word(ship.torps),
        // v3 missions are 1-based.
        mission: word(ship.mission + 1),
        enemy: word(owners.race(ship.enemy)),
        tow_target: 0,
        damage: word(ship.damage),
        crew: word(ship.crew),
        clans: word(ship.clans),
        name: FixedStr::from_text(&ship.name),
        neutronium: word(ship.neutronium),
        tritanium: word(ship.tritanium),
        duranium: word(ship.duranium),
        molybdenum: word(ship.molybdenum),
        supplies: word(ship.supplies),
        unload: CargoTransfer::default(),
        transfer: CargoTransfer::default(),
        intercept_target: 0,
        megacredits: word(ship.megacredits),
    };

    // Tow and intercept share one target field on the Nu side.
    match ship.mission {
        MISSION_TOW => record.tow_target = word(ship.mission1target),
        MISSION_INTERCEPT => record.intercept_target = word(ship.mission1target),
        _ => {}
    }

    match ship.transfertargettype {
        TARGET_PLANET | TARGET_JETTISON => {
            record.unload = transfer_block(ship);
            if ship.transfertargettype == TARGET_JETTISON {
                record.unload.target_id = 0;
            }
        }
        TARGET_SHIP => record.transfer = transfer_block(ship),
        _ => {}
    }

    record
}

fn transfer_block(ship: &Ship) -> CargoTransfer {
    CargoTransfer {
        neutronium: word(ship.transferneutronium),
        tritanium: word(ship.transfertritanium),
        duranium: word(ship.transferduranium),
        molybdenum: word(ship.transfermolybdenum),
        clans: word(ship.transferclans),
        supplies: word(ship.transfersupplies),
        target_id: word(ship.transfertargetid),
    }
}

/// Derives the beginning-of-turn copy from the packed record, reclaiming
/// this location's flow counters.
pub fn dis(dat: &ShipRecord, ship: &Ship, ledger: &mut FlowLedger) -> ShipRecord {
    let mut record = dat.clone();
    let flows = ledger.at(ship.x, ship.y);

    if dat.bay_count > 0 {
        record.ammo = word(consume(&mut flows.fighters_built, ship.ammo));
    } else if (1..=10).contains(&ship.torpedoid) && dat.launcher_count > 0 {
        let counter = &mut flows.torps_built[(ship.torpedoid - 1) as usize];
        record.ammo = word(consume(counter, ship.ammo));
    }

    record.neutronium = word(ship.neutronium + take(&mut flows.neutronium_used));
    record.tritanium = word(ship.tritanium + take(&mut flows.tritanium_used));
    record.duranium = word(ship.duranium + take(&mut flows.duranium_used));
    record.molybdenum = word(ship.molybdenum + take(&mut flows.molybdenum_used));
    record.supplies = word(ship.supplies + take(&mut flows.supplies_used));

    let cash = ship.megacredits + take(&mut flows.cash_used);
    record.megacredits = word(consume(&mut flows.cash_made, cash));

    record
}

/// Builds the contact record for a foreign ship.
pub fn target(ship: &Ship, owners: &OwnerMap) -> TargetRecord {
    TargetRecord {
        id: word(ship.id),
        owner: word(owners.race(ship.ownerid)),
        warp: sword(ship.warp),
        x: word(ship.x),
        y: word(ship.y),
        hull: word(ship.hullid),
        heading: sword(ship.heading),
        name: FixedStr::from_text(&ship.name),
    }
}
