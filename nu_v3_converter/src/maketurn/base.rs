//! Reading client-edited starbases back, including stock reconciliation.

use nu_model::planet::{stock_type, Starbase, Stock};
use nu_model::Snapshot;
use v3_format::records::BaseRecord;
use v3_format::specs::HULLS_PER_RACE;

/// Ammo the ships orbiting one base gained this session, re-attributed to
/// the base's production counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmmoDelta {
    pub fighters: i32,
    pub torps: [i32; 10],
}

/// Result of diffing one base.
#[derive(Debug)]
pub struct BaseOutcome {
    pub base: Starbase,
    /// Stock records that changed, including freshly allocated ones.
    pub stocks: Vec<Stock>,
    pub created_stock: bool,
}

/// Applies a client-edited record to a copy of the snapshot base and
/// reconciles the stock records.
pub fn apply(
    record: &BaseRecord,
    original: &Starbase,
    snapshot: &Snapshot,
    ammo: AmmoDelta,
    next_stock_id: &mut i32,
) -> BaseOutcome {
    let mut base = original.clone();

    base.defense = i32::from(record.defense);
    base.builtdefense = original.builtdefense + (base.defense - original.defense);

    base.enginetechlevel = i32::from(record.engine_tech);
    base.hulltechlevel = i32::from(record.hull_tech);
    base.beamtechlevel = i32::from(record.beam_tech);
    base.torptechlevel = i32::from(record.torp_tech);
    base.enginetechup = original.enginetechup + (base.enginetechlevel - original.enginetechlevel);
    base.hulltechup = original.hulltechup + (base.hulltechlevel - original.hulltechlevel);
    base.beamtechup = original.beamtechup + (base.beamtechlevel - original.beamtechlevel);
    base.torptechup = original.torptechup + (base.torptechlevel - original.torptechlevel);

    base.fighters = i32::from(record.fighters);
    base.builtfighters =
        original.builtfighters + (base.fighters - original.fighters) + ammo.fighters;

    base.mission = i32::from(record.mission);
    base.shipmission = i32::from(record.ship_mission);
    base.targetshipid = i32::from(record.target_ship_id);

    base.buildengineid = i32::from(record.build_engine);
    base.buildbeamid = i32::from(record.build_beam);
    base.buildbeamcount = i32::from(record.build_beam_count);
    base.buildtorpedoid = i32::from(record.build_torp);
    base.buildtorpcount = i32::from(record.build_torp_count);
    base.buildhullid = match record.build_hull_slot {
        0 => 0,
        slot => snapshot
            .racehulls
            .get(usize::from(slot) - 1)
            .copied()
            .unwrap_or_else(|| {
                log::warn!(
                    "base {}: build slot {slot} is outside the truehull row, dropping",
                    original.planetid
                );
                0
            }),
    };
    base.isbuilding = base.buildhullid != 0;

    // Torpedo production is re-derived from the stock delta plus whatever
    // orbiting ships loaded.
    let mut torps_built = [0i32; 10];
    for (index, counter) in torps_built.iter_mut().enumerate() {
        let old = find_stock(snapshot, original.id, stock_type::TORPEDO, index as i32 + 1);
        let old_amount = old.map_or(0, |s| s.amount);
        let old_built = old.map_or(0, |s| s.builtamount);
        *counter = i32::from(record.torp_stock[index]) - old_amount + old_built + ammo.torps[index];
    }

    let (stocks, created_stock) = reconcile_stocks(record, original, snapshot, &torps_built, next_stock_id);

    BaseOutcome {
        base,
        stocks,
        created_stock,
    }
}

fn find_stock(snapshot: &Snapshot, base_id: i32, kind: i32, stock_id: i32) -> Option<&Stock> {
    snapshot
        .stock
        .iter()
        .find(|s| s.starbaseid == base_id && s.stocktype == kind && s.stockid == stock_id)
}

fn reconcile_stocks(
    record: &BaseRecord,
    original: &Starbase,
    snapshot: &Snapshot,
    torps_built: &[i32; 10],
    next_stock_id: &mut i32,
) -> (Vec<Stock>, bool) {
    let mut changed = Vec::new();
    let mut created = false;

    let mut reconcile = |kind: i32, stock_id: i32, amount: i32, built: Option<i32>| {
        match find_stock(snapshot, original.id, kind, stock_id) {
            Some(existing) => {
                let mut updated = existing.clone();
                updated.amount = amount;
                updated.builtamount = match built {
                    Some(value) => value,
                    None => existing.builtamount + (amount - existing.amount),
                };
                if updated.amount != existing.amount || updated.builtamount != existing.builtamount
                {
                    changed.push(updated);
                }
            }
            None => {
                if amount != 0 || built.is_some_and(|b| b != 0) {
                    let id = *next_stock_id;
                    *next_stock_id += 1;
                    created = true;
                    changed.push(Stock {
                        id,
                        starbaseid: original.id,
                        stocktype: kind,
                        stockid: stock_id,
                        amount,
                        builtamount: built.unwrap_or(amount),
                        extra: Default::default(),
                    });
                }
            }
        }
    };

    for slot in 0..HULLS_PER_RACE {
        let Some(&hull_id) = snapshot.racehulls.get(slot) else {
            break;
        };
        reconcile(
            stock_type::HULL,
            hull_id,
            i32::from(record.hull_stock[slot]),
            None,
        );
    }
    for (index, &amount) in record.engine_stock.iter().enumerate() {
        reconcile(stock_type::ENGINE, index as i32 + 1, i32::from(amount), None);
    }
    for (index, &amount) in record.beam_stock.iter().enumerate() {
        reconcile(stock_type::BEAM, index as i32 + 1, i32::from(amount), None);
    }
    for (index, &amount) in record.launcher_stock.iter().enumerate() {
        reconcile(
            stock_type::LAUNCHER,
            index as i32 + 1,
            i32::from(amount),
            None,
        );
    }
    for (index, &amount) in record.torp_stock.iter().enumerate() {
        reconcile(
            stock_type::TORPEDO,
            index as i32 + 1,
            i32::from(amount),
            Some(torps_built[index]),
        );
    }

    (changed, created)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::owner::OwnerMap;
    use crate::pack;
    use nu_model::game::Player;
    use nu_model::planet::Planet;

    fn snapshot() -> Snapshot {
        Snapshot {
            racehulls: vec![14, 15, 16],
            planets: vec![Planet {
                id: 44,
                ownerid: 1,
                x: 2000,
                y: 2100,
                ..Planet::default()
            }],
            starbases: vec![Starbase {
                id: 9,
                planetid: 44,
                fighters: 20,
                hulltechlevel: 3,
                ..Starbase::default()
            }],
            stock: vec![Stock {
                id: 70,
                starbaseid: 9,
                stocktype: stock_type::TORPEDO,
                stockid: 1,
                amount: 12,
                builtamount: 0,
                ..Stock::default()
            }],
            ..Snapshot::default()
        }
    }

    fn owners() -> OwnerMap {
        OwnerMap::new(&[Player {
            id: 1,
            raceid: 1,
            ..Player::default()
        }])
    }

    fn packed(snapshot: &Snapshot) -> BaseRecord {
        let base = &snapshot.starbases[0];
        let planet = &snapshot.planets[0];
        let stocks: Vec<_> = snapshot.stock.iter().collect();
        pack::base::dat(base, planet, &stocks, &snapshot.racehulls, &owners())
    }

    #[test]
    fn untouched_records_round_trip() {
        let snapshot = snapshot();
        let record = packed(&snapshot);
        let mut next_id = 71;
        let outcome = apply(&record, &snapshot.starbases[0], &snapshot, AmmoDelta::default(), &mut next_id);

        assert!(crate::maketurn::commands::unchanged(
            &snapshot.starbases[0],
            &outcome.base
        ));
        assert!(outcome.stocks.is_empty());
        assert!(!outcome.created_stock);
        assert_eq!(next_id, 71);
    }

    #[test]
    fn new_stock_gets_a_fresh_surrogate_id() {
        let snapshot = snapshot();
        let mut record = packed(&snapshot);
        record.hull_stock[1] = 2;

        let mut next_id = 71;
        let outcome = apply(&record, &snapshot.starbases[0], &snapshot, AmmoDelta::default(), &mut next_id);

        assert!(outcome.created_stock);
        assert_eq!(outcome.stocks.len(), 1);
        let stock = &outcome.stocks[0];
        assert_eq!(stock.id, 71);
        assert_eq!(stock.stocktype, stock_type::HULL);
        assert_eq!(stock.stockid, 15);
        assert_eq!(stock.amount, 2);
        assert_eq!(stock.builtamount, 2);
        assert_eq!(next_id, 72);
    }

    #[test]
    fn torpedo_stock_uses_the_rederived_counter() {
        let snapshot = snapshot();
        let mut record = packed(&snapshot);
        // Client built 5 torpedoes and loaded 3 onto an orbiting ship.
        record.torp_stock[0] = 14;
        let ammo = AmmoDelta {
            torps: [3, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            ..AmmoDelta::default()
        };

        let mut next_id = 71;
        let outcome = apply(&record, &snapshot.starbases[0], &snapshot, ammo, &mut next_id);

        assert_eq!(outcome.stocks.len(), 1);
        assert_eq!(outcome.stocks[0].amount, 14);
        assert_eq!(outcome.stocks[0].builtamount, 5);
        assert!(!outcome.created_stock);
    }

    #[test]
    fn fighter_production_counts_loaded_fighters() {
        let snapshot = snapshot();
        let mut record = packed(&snapshot);
        record.fighters = 24;
        let ammo = AmmoDelta {
            fighters: 6,
            ..AmmoDelta::default()
        };

        let mut next_id = 71;
        let outcome = apply(&record, &snapshot.starbases[0], &snapshot, ammo, &mut next_id);
        assert_eq!(outcome.base.builtfighters, 10);
    }
}
