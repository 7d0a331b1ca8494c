//! Packing of starbases, including the build-cost bookkeeping that feeds
//! the flow ledger.

use nu_model::planet::{stock_type, Planet, Starbase, Stock};
use nu_model::Snapshot;
use v3_format::records::BaseRecord;

use crate::flow::{consume, FlowLedger, Flows};
use crate::num::word;
use crate::owner::OwnerMap;

/// Cost of one starbase defense post.
const DEFENSE_CASH: i32 = 10;
/// Cost of one fighter: megacredits, tritanium, molybdenum.
const FIGHTER_COST: (i32, i32, i32) = (100, 3, 2);

/// Total cash for reaching a tech level from level 1.
fn tech_cost(level: i32) -> i32 {
    100 * level * (level - 1) / 2
}

/// Builds the post-turn record.
pub fn dat(
    base: &Starbase,
    planet: &Planet,
    stocks: &[&Stock],
    racehulls: &[i32],
    owners: &OwnerMap,
) -> BaseRecord {
    let mut record = BaseRecord {
        planet_id: word(base.planetid),
        owner: word(owners.race(planet.ownerid)),
        defense: word(base.defense),
        damage: word(base.damage),
        engine_tech: word(base.enginetechlevel),
        hull_tech: word(base.hulltechlevel),
        beam_tech: word(base.beamtechlevel),
        torp_tech: word(base.torptechlevel),
        fighters: word(base.fighters),
        target_ship_id: word(base.targetshipid),
        ship_mission: word(base.shipmission),
        mission: word(base.mission),
        build_hull_slot: 0,
        build_engine: word(base.buildengineid),
        build_beam: word(base.buildbeamid),
        build_beam_count: word(base.buildbeamcount),
        build_torp: word(base.buildtorpedoid),
        build_torp_count: word(base.buildtorpcount),
        ..BaseRecord::default()
    };

    if base.buildhullid > 0 {
        match racehulls.iter().position(|&h| h == base.buildhullid) {
            Some(slot) => record.build_hull_slot = word(slot as i32 + 1),
            None => log::warn!(
                "base {}: build order for hull {} the player cannot build, dropping",
                base.planetid,
                base.buildhullid
            ),
        }
    }

    for stock in stocks {
        if let Some(slot) = stock_slot(&mut record, stock, racehulls) {
            *slot = word(stock.amount);
        }
    }

    record
}

/// Charges this turn's builds to the base's location and derives the
/// beginning-of-turn copy.
pub fn dis(
    dat: &BaseRecord,
    base: &Starbase,
    planet: &Planet,
    stocks: &[&Stock],
    snapshot: &Snapshot,
    ledger: &mut FlowLedger,
) -> BaseRecord {
    charge_builds(base, planet, stocks, snapshot, ledger);
    let flows = ledger.at(planet.x, planet.y);

    let mut record = dat.clone();
    record.defense = word(base.defense - base.builtdefense);
    record.engine_tech = word(base.enginetechlevel - base.enginetechup);
    record.hull_tech = word(base.hulltechlevel - base.hulltechup);
    record.beam_tech = word(base.beamtechlevel - base.beamtechup);
    record.torp_tech = word(base.torptechlevel - base.torptechup);
    record.fighters = word(consume(&mut flows.fighters_built, base.fighters));

    for stock in stocks {
        let original = match stock.stocktype {
            stock_type::TORPEDO if (1..=10).contains(&stock.stockid) => {
                let counter = &mut flows.torps_built[(stock.stockid - 1) as usize];
                consume(counter, stock.amount)
            }
            _ => stock.amount - stock.builtamount,
        };
        if let Some(slot) = stock_slot(&mut record, stock, snapshot.racehulls.as_slice()) {
            *slot = word(original);
        }
    }

    record
}

fn charge_builds(
    base: &Starbase,
    planet: &Planet,
    stocks: &[&Stock],
    snapshot: &Snapshot,
    ledger: &mut FlowLedger,
) {
    let flows = ledger.at(planet.x, planet.y);

    if base.builtdefense > 0 {
        flows.cash_used += base.builtdefense * DEFENSE_CASH;
    }
    if base.builtfighters > 0 {
        let (cash, tri, mol) = FIGHTER_COST;
        flows.cash_used += base.builtfighters * cash;
        flows.tritanium_used += base.builtfighters * tri;
        flows.molybdenum_used += base.builtfighters * mol;
        flows.fighters_built += base.builtfighters;
    }

    for (level, up) in [
        (base.enginetechlevel, base.enginetechup),
        (base.hulltechlevel, base.hulltechup),
        (base.beamtechlevel, base.beamtechup),
        (base.torptechlevel, base.torptechup),
    ] {
        if up > 0 {
            flows.cash_used += tech_cost(level) - tech_cost(level - up);
        }
    }

    for stock in stocks {
        if stock.builtamount > 0 {
            charge_stock(stock, snapshot, flows, base.planetid);
        }
    }
}

fn charge_stock(stock: &Stock, snapshot: &Snapshot, flows: &mut Flows, base_id: i32) {
    let built = stock.builtamount;
    let (cash, tri, dur, mol) = match stock.stocktype {
        stock_type::HULL => match snapshot.hull(stock.stockid) {
            Some(hull) => (hull.cost, hull.tritanium, hull.duranium, hull.molybdenum),
            None => return warn_unknown(stock, base_id),
        },
        stock_type::ENGINE => match snapshot.engine(stock.stockid) {
            Some(engine) => (
                engine.cost,
                engine.tritanium,
                engine.duranium,
                engine.molybdenum,
            ),
            None => return warn_unknown(stock, base_id),
        },
        stock_type::BEAM => match snapshot.beam(stock.stockid) {
            Some(beam) => (beam.cost, beam.tritanium, beam.duranium, beam.molybdenum),
            None => return warn_unknown(stock, base_id),
        },
        stock_type::LAUNCHER => match snapshot.torpedo(stock.stockid) {
            Some(torp) => (
                torp.launchercost,
                torp.tritanium,
                torp.duranium,
                torp.molybdenum,
            ),
            None => return warn_unknown(stock, base_id),
        },
        stock_type::TORPEDO => match snapshot.torpedo(stock.stockid) {
            Some(torp) => {
                if (1..=10).contains(&stock.stockid) {
                    flows.torps_built[(stock.stockid - 1) as usize] += built;
                }
                (torp.torpedocost, 1, 1, 1)
            }
            None => return warn_unknown(stock, base_id),
        },
        _ => return warn_unknown(stock, base_id),
    };

    flows.cash_used += built * cash;
    flows.tritanium_used += built * tri;
    flows.duranium_used += built * dur;
    flows.molybdenum_used += built * mol;
}

fn warn_unknown(stock: &Stock, base_id: i32) {
    log::warn!(
        "base {base_id}: stock {} references unknown component {} of type {}",
        stock.id,
        stock.stockid,
        stock.stocktype
    );
}

/// The record slot a stock maps to, if it maps to any.
fn stock_slot<'a>(
    record: &'a mut BaseRecord,
    stock: &Stock,
    racehulls: &[i32],
) -> Option<&'a mut u16> {
    let index = (stock.stockid - 1) as usize;
    match stock.stocktype {
        stock_type::HULL => racehulls
            .iter()
            .position(|&h| h == stock.stockid)
            .and_then(|slot| record.hull_stock.get_mut(slot)),
        stock_type::ENGINE => record.engine_stock.get_mut(index),
        stock_type::BEAM => record.beam_stock.get_mut(index),
        stock_type::LAUNCHER => record.launcher_stock.get_mut(index),
        stock_type::TORPEDO => record.torp_stock.get_mut(index),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use nu_model::game::Player;
    use nu_model::specs::Torpedo;

    fn snapshot() -> Snapshot {
        Snapshot {
            racehulls: vec![14, 15, 16],
            torpedos: vec![Torpedo {
                id: 2,
                torpedocost: 5,
                ..Torpedo::default()
            }],
            ..Snapshot::default()
        }
    }

    fn owners() -> OwnerMap {
        OwnerMap::new(&[Player {
            id: 1,
            raceid: 6,
            ..Player::default()
        }])
    }

    fn planet() -> Planet {
        Planet {
            id: 44,
            ownerid: 1,
            x: 2000,
            y: 2100,
            ..Planet::default()
        }
    }

    fn base() -> Starbase {
        Starbase {
            id: 9,
            planetid: 44,
            fighters: 10,
            builtfighters: 4,
            hulltechlevel: 5,
            hulltechup: 2,
            ..Starbase::default()
        }
    }

    #[test]
    fn build_slot_uses_the_truehull_position() {
        let mut b = base();
        b.buildhullid = 16;
        let record = dat(&b, &planet(), &[], &snapshot().racehulls, &owners());
        assert_eq!(record.build_hull_slot, 3);

        b.buildhullid = 99;
        let record = dat(&b, &planet(), &[], &snapshot().racehulls, &owners());
        assert_eq!(record.build_hull_slot, 0);
    }

    #[test]
    fn fighter_and_tech_builds_charge_the_location() {
        let snapshot = snapshot();
        let mut ledger = FlowLedger::new();
        let b = base();
        let p = planet();
        let record = dat(&b, &p, &[], &snapshot.racehulls, &owners());
        let original = dis(&record, &b, &p, &[], &snapshot, &mut ledger);

        assert_eq!(original.fighters, 6);
        assert_eq!(original.hull_tech, 3);
        // 4 fighters at 100 MC plus tech 3->5 (300 + 400).
        assert_eq!(ledger.at(2000, 2100).cash_used, 400 + 700);
        assert_eq!(ledger.at(2000, 2100).tritanium_used, 12);
        assert_eq!(ledger.at(2000, 2100).molybdenum_used, 8);
        assert_eq!(ledger.at(2000, 2100).fighters_built, 0);
    }

    #[test]
    fn torpedo_stock_flows_through_the_built_counter() {
        let snapshot = snapshot();
        let stock = Stock {
            id: 1,
            starbaseid: 9,
            stocktype: stock_type::TORPEDO,
            stockid: 2,
            amount: 3,
            builtamount: 8,
            ..Stock::default()
        };
        let stocks = vec![&stock];

        let mut ledger = FlowLedger::new();
        let b = base();
        let p = planet();
        let record = dat(&b, &p, &stocks, &snapshot.racehulls, &owners());
        assert_eq!(record.torp_stock[1], 3);

        let original = dis(&record, &b, &p, &stocks, &snapshot, &mut ledger);
        // Eight built, three still here: the other five sit on a ship.
        assert_eq!(original.torp_stock[1], 0);
        assert_eq!(ledger.at(2000, 2100).torps_built[1], 5);
        assert_eq!(ledger.at(2000, 2100).cash_used, 400 + 700 + 40);
    }
}
