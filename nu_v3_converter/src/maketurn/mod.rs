//! The maketurn pipeline: diff the client-edited v3 tree against the
//! snapshot and produce the command upload.

use std::collections::HashMap;

use anyhow::Context;
use nu_model::Snapshot;
use v3_format::records::{read_counted, BaseRecord, PlanetRecord, ShipRecord};

use crate::files::Workdir;
use crate::num::word;
use crate::owner::OwnerMap;
use crate::pack::local_race;

pub mod base;
pub mod commands;
pub mod planet;
pub mod ship;

pub use commands::TurnDocument;

/// Builds the command document from the v3 tree the client left behind.
pub fn run(snapshot: &Snapshot, files: &Workdir) -> anyhow::Result<TurnDocument> {
    let race = local_race(snapshot)?;
    let owners = OwnerMap::new(&snapshot.players);

    let ship_name = format!("ship{race}.dat");
    let ship_records: Vec<ShipRecord> =
        read_counted(&files.read(&ship_name)?, ShipRecord::SIZE, &ship_name)?;
    let planet_name = format!("pdata{race}.dat");
    let planet_records: Vec<PlanetRecord> =
        read_counted(&files.read(&planet_name)?, PlanetRecord::SIZE, &planet_name)?;
    let base_name = format!("bdata{race}.dat");
    let base_records: Vec<BaseRecord> =
        read_counted(&files.read(&base_name)?, BaseRecord::SIZE, &base_name)?;

    let mine = word(race);
    let ship_pairs: Vec<_> = ship_records
        .iter()
        .filter(|r| r.owner == mine)
        .filter_map(|record| match snapshot.ship(i32::from(record.id)) {
            Some(original) => Some((record, original)),
            None => {
                log::warn!("ship {} is not in the snapshot, ignoring", record.id);
                None
            }
        })
        .collect();

    // Ammo that appeared on ships is production of the base they orbit.
    let mut ammo_deltas: HashMap<(i32, i32), base::AmmoDelta> = HashMap::new();
    for (record, original) in &ship_pairs {
        let delta = i32::from(record.ammo) - original.ammo;
        if delta == 0 {
            continue;
        }
        let at = ammo_deltas
            .entry((original.x, original.y))
            .or_default();
        if original.bays > 0 {
            at.fighters += delta;
        } else if (1..=10).contains(&original.torpedoid) && original.torps > 0 {
            at.torps[(original.torpedoid - 1) as usize] += delta;
        }
    }

    let mut document = TurnDocument::default();

    // Planets before the flow consumers, matching the pack direction.
    for record in planet_records.iter().filter(|r| r.owner == mine) {
        let id = i32::from(record.id);
        let Some(original) = snapshot.planet(id) else {
            log::warn!("planet {id} is not in the snapshot, ignoring");
            continue;
        };
        let updated = planet::apply(record, original);
        if !commands::unchanged(original, &updated) {
            document
                .commands
                .push(commands::command("Planet", id, &updated)?);
        }
    }

    for (record, original) in &ship_pairs {
        let updated = ship::apply(record, original, &owners);
        if !commands::unchanged(*original, &updated) {
            document
                .commands
                .push(commands::command("Ship", original.id, &updated)?);
        }
    }

    let mut next_stock_id = snapshot.stock.iter().map(|s| s.id).max().unwrap_or(0) + 1;
    let mut created_any = false;

    for record in base_records.iter().filter(|r| r.owner == mine) {
        let planet_id = i32::from(record.planet_id);
        let Some(original) = snapshot
            .starbases
            .iter()
            .find(|b| b.planetid == planet_id)
        else {
            log::warn!("base at planet {planet_id} is not in the snapshot, ignoring");
            continue;
        };
        let ammo = snapshot
            .planet(planet_id)
            .and_then(|p| ammo_deltas.get(&(p.x, p.y)))
            .copied()
            .unwrap_or_default();

        let outcome = base::apply(record, original, snapshot, ammo, &mut next_stock_id);
        if !commands::unchanged(original, &outcome.base) {
            document
                .commands
                .push(commands::command("Starbase", original.id, &outcome.base)?);
        }
        for stock in &outcome.stocks {
            document
                .commands
                .push(commands::command("Stock", stock.id, stock)?);
        }
        created_any |= outcome.created_stock;
    }

    if created_any {
        log::warn!(
            "new stock records were allocated locally; re-download the turn before editing again"
        );
    }

    Ok(document)
}

/// Serializes the document and writes it next to the v3 tree.
pub fn write_document(document: &TurnDocument, files: &Workdir, name: &str) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(document).context("serializing the turn document")?;
    files.write(name, json.as_bytes())
}
