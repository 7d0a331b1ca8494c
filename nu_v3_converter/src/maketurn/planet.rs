//! Reading client-edited planets back into the Nu model.

use nu_model::planet::Planet;
use v3_format::records::PlanetRecord;

/// Applies a client-edited record to a copy of the snapshot planet.
///
/// The record has no coordinates; the copy keeps the snapshot's, which is
/// also what the flow arithmetic below relies on.
pub fn apply(record: &PlanetRecord, original: &Planet) -> Planet {
    let mut planet = original.clone();

    planet.friendlycode = record.fcode.to_text();

    planet.mines = i32::from(record.mines);
    planet.factories = i32::from(record.factories);
    planet.defense = i32::from(record.defense);
    planet.builtmines = original.builtmines + (planet.mines - original.mines);
    planet.builtfactories = original.builtfactories + (planet.factories - original.factories);
    planet.builtdefense = original.builtdefense + (planet.defense - original.defense);

    planet.neutronium = to_i32(record.neutronium);
    planet.tritanium = to_i32(record.tritanium);
    planet.duranium = to_i32(record.duranium);
    planet.molybdenum = to_i32(record.molybdenum);
    planet.clans = to_i32(record.clans);
    planet.supplies = to_i32(record.supplies);
    planet.megacredits = to_i32(record.megacredits);

    planet.colonisttaxrate = i32::from(record.colonist_tax);
    planet.nativetaxrate = i32::from(record.native_tax);
    planet.buildingstarbase = record.build_base != 0;

    // Supplies that are neither on the planet nor in new structures were
    // sold for cash.
    let structure_supplies = (planet.mines - original.mines)
        + (planet.factories - original.factories)
        + (planet.defense - original.defense);
    planet.suppliessold = (original.supplies + original.suppliessold
        - planet.supplies
        - structure_supplies)
        .max(0);

    planet
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
