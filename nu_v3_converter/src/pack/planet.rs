//! Packing of planets.

use nu_model::planet::Planet;
use v3_format::records::PlanetRecord;
use v3_format::FixedStr;

use crate::flow::{take, FlowLedger};
use crate::num::{dword, sword, word};
use crate::owner::OwnerMap;

/// Cost of one structure, as (megacredits, supplies).
const MINE_COST: (i32, i32) = (4, 1);
const FACTORY_COST: (i32, i32) = (3, 1);
const DEFENSE_COST: (i32, i32) = (10, 1);

/// Starbase construction cost: megacredits, tritanium, duranium, molybdenum.
const STARBASE_COST: (i32, i32, i32, i32) = (900, 402, 120, 340);

/// Whether anything is known about the planet. Fully unknown planets stay
/// out of `pdata`; foreign contacts keep whatever single field was scanned.
pub fn is_known(planet: &Planet) -> bool {
    let code_known = !planet.friendlycode.is_empty() && planet.friendlycode != "???";
    code_known
        || planet.ownerid != 0
        || planet.mines != 0
        || planet.factories != 0
        || planet.defense != 0
        || planet.neutronium != 0
        || planet.tritanium != 0
        || planet.duranium != 0
        || planet.molybdenum != 0
        || planet.clans != 0
        || planet.supplies != 0
        || planet.megacredits != 0
        || planet.groundneutronium != 0
        || planet.groundtritanium != 0
        || planet.groundduranium != 0
        || planet.groundmolybdenum != 0
        || planet.densityneutronium != 0
        || planet.densitytritanium != 0
        || planet.densityduranium != 0
        || planet.densitymolybdenum != 0
        || planet.colonisttaxrate != 0
        || planet.nativetaxrate != 0
        || planet.nativegovernment != 0
        || planet.nativeclans != 0
        || planet.nativetype > 0
        || planet.temp >= 0
        || planet.buildingstarbase
}

/// Builds the post-turn record.
pub fn dat(planet: &Planet, owners: &OwnerMap) -> PlanetRecord {
    PlanetRecord {
        owner: word(owners.race(planet.ownerid)),
        id: word(planet.id),
        fcode: FixedStr::from_text(&planet.friendlycode),
        mines: word(planet.mines),
        factories: word(planet.factories),
        defense: word(planet.defense),
        neutronium: dword(planet.neutronium),
        tritanium: dword(planet.tritanium),
        duranium: dword(planet.duranium),
        molybdenum: dword(planet.molybdenum),
        clans: dword(planet.clans),
        supplies: dword(planet.supplies),
        megacredits: dword(planet.megacredits),
        ground_neutronium: dword(planet.groundneutronium),
        ground_tritanium: dword(planet.groundtritanium),
        ground_duranium: dword(planet.groundduranium),
        ground_molybdenum: dword(planet.groundmolybdenum),
        density_neutronium: word(planet.densityneutronium),
        density_tritanium: word(planet.densitytritanium),
        density_duranium: word(planet.densityduranium),
        density_molybdenum: word(planet.densitymolybdenum),
        colonist_tax: word(planet.colonisttaxrate),
        native_tax: word(planet.nativetaxrate),
        colonist_happiness: sword(planet.colonisthappypoints),
        native_happiness: sword(planet.nativehappypoints),
        native_government: word(planet.nativegovernment),
        native_clans: dword(planet.nativeclans),
        native_race: sword(planet.nativetype),
        temp_code: if planet.temp >= 0 {
            sword(100 - planet.temp)
        } else {
            -1
        },
        build_base: u16::from(planet.buildingstarbase),
    }
}

/// Charges this turn's structure builds to the location, then derives the
/// beginning-of-turn copy by reclaiming everything charged there.
pub fn dis(dat: &PlanetRecord, planet: &Planet, ledger: &mut FlowLedger) -> PlanetRecord {
    let flows = ledger.at(planet.x, planet.y);
    for (built, (cash, supplies)) in [
        (planet.builtmines, MINE_COST),
        (planet.builtfactories, FACTORY_COST),
        (planet.builtdefense, DEFENSE_COST),
    ] {
        if built > 0 {
            flows.cash_used += built * cash;
            flows.supplies_used += built * supplies;
        }
    }
    if planet.buildingstarbase {
        let (cash, tri, dur, mol) = STARBASE_COST;
        flows.cash_used += cash;
        flows.tritanium_used += tri;
        flows.duranium_used += dur;
        flows.molybdenum_used += mol;
    }

    let mut record = dat.clone();
    record.mines = word(planet.mines - planet.builtmines);
    record.factories = word(planet.factories - planet.builtfactories);
    record.defense = word(planet.defense - planet.builtdefense);
    record.build_base = 0;

    record.neutronium = dword(planet.neutronium + take(&mut flows.neutronium_used));
    record.tritanium = dword(planet.tritanium + take(&mut flows.tritanium_used));
    record.duranium = dword(planet.duranium + take(&mut flows.duranium_used));
    record.molybdenum = dword(planet.molybdenum + take(&mut flows.molybdenum_used));

    // Supply sales happened during this turn, so they are undone here; cash
    // the planet no longer holds went to a ship and is credited there.
    record.supplies =
        dword(planet.supplies + planet.suppliessold + take(&mut flows.supplies_used));
    let mut cash = planet.megacredits + take(&mut flows.cash_used) - planet.suppliessold;
    if cash < 0 {
        flows.cash_made += -cash;
        cash = 0;
    }
    record.megacredits = dword(cash);

    record
}

#[cfg(test)]
mod test {
    use super::*;
    use nu_model::game::Player;

    fn owners() -> OwnerMap {
        OwnerMap::new(&[Player {
            id: 1,
            raceid: 3,
            ..Player::default()
        }])
    }

    fn mining_planet() -> Planet {
        Planet {
            id: 10,
            ownerid: 1,
            friendlycode: "abc".to_owned(),
            x: 500,
            y: 500,
            mines: 20,
            builtmines: 10,
            supplies: 90,
            megacredits: 170,
            temp: 50,
            ..Planet::default()
        }
    }

    #[test]
    fn built_structures_are_undone_in_the_original() {
        let mut ledger = FlowLedger::new();
        let packed = dat(&mining_planet(), &owners());
        let original = dis(&packed, &mining_planet(), &mut ledger);

        assert_eq!(packed.mines, 20);
        assert_eq!(original.mines, 10);
        assert_eq!(original.supplies, 100);
        assert_eq!(original.megacredits, 210);
        assert!(ledger.is_clean());
    }

    #[test]
    fn sold_supplies_beyond_the_till_become_ship_cash() {
        let mut planet = mining_planet();
        planet.builtmines = 0;
        planet.mines = 0;
        planet.suppliessold = 200;
        planet.megacredits = 30;

        let mut ledger = FlowLedger::new();
        let packed = dat(&planet, &owners());
        let original = dis(&packed, &planet, &mut ledger);

        assert_eq!(original.supplies, 290);
        assert_eq!(original.megacredits, 0);
        assert_eq!(ledger.at(500, 500).cash_made, 170);
    }

    #[test]
    fn temperature_encoding() {
        let mut planet = mining_planet();
        planet.temp = 0;
        assert_eq!(dat(&planet, &owners()).temp_code, 100);
        planet.temp = 100;
        assert_eq!(dat(&planet, &owners()).temp_code, 0);
        planet.temp = -1;
        assert_eq!(dat(&planet, &owners()).temp_code, -1);
    }

    #[test]
    fn unknown_planets_are_filtered() {
        let planet = Planet {
            id: 4,
            friendlycode: "???".to_owned(),
            temp: -1,
            nativetype: -1,
            ..Planet::default()
        };
        assert!(!is_known(&planet));

        let mut seen = planet.clone();
        seen.mines = 1;
        assert!(is_known(&seen));
    }
}
