//! The pack pipeline: one snapshot in, a v3 file tree out.

use anyhow::{bail, Context};
use nu_model::Snapshot;
use v3_format::checksum::{self, byte_sum, ControlVector};
use v3_format::messages::write_message_file;
use v3_format::records::{
    write_counted, BaseRecord, GenRecord, GenRstRecord, PlanetRecord, ShipRecord, ShipXyRecord,
    TargetRecord, VcrRecord, VcrSide, MAX_SHIP_ID,
};
use v3_format::specs::NUM_RACES;
use v3_format::text;
use v3_format::{to_bytes, FixedStr};

use crate::files::Workdir;
use crate::flow::FlowLedger;
use crate::num::word;
use crate::owner::OwnerMap;
use crate::{context, time};

pub mod base;
pub mod messages;
pub mod planet;
pub mod ship;
pub mod specs;
pub mod util;

/// Password block of the gen record; Nu has no v3 password.
const NO_PASSWORD: &str = "NOPASSWORD";

/// Stale client files removed before an unpacked tree is staged.
const DEAD_FILES: &[&str] = &["control.dat"];

/// Builds the full v3 tree for one snapshot.
///
/// In unpacked mode this stages the `.dat`/`.dis` pairs and their sidecar
/// files; in result mode it assembles `player<N>.rst` instead.
pub fn run(snapshot: &Snapshot, files: &Workdir, rst: bool) -> anyhow::Result<()> {
    let race = local_race(snapshot)?;
    let owners = OwnerMap::new(&snapshot.players);
    let timestamp = time::host_timestamp(&snapshot.settings.hoststart);

    specs::write_spec_files(snapshot, files, race)
        .context("synthesizing specification files")?;

    if rst {
        run_rst(snapshot, files, &owners, race, &timestamp)
    } else {
        run_unpacked(snapshot, files, &owners, race, &timestamp)
    }
}

/// Minimal mode: specification files and the combat recordings only.
pub fn run_vcr(snapshot: &Snapshot, files: &Workdir) -> anyhow::Result<()> {
    let race = local_race(snapshot)?;
    let owners = OwnerMap::new(&snapshot.players);

    specs::write_spec_files(snapshot, files, race)
        .context("synthesizing specification files")?;
    let vcrs = vcr_records(snapshot, &owners);
    files.write(&format!("vcr{race}.dat"), &write_counted(&vcrs)?)
}

pub(crate) fn local_race(snapshot: &Snapshot) -> anyhow::Result<i32> {
    let race = snapshot.player.raceid;
    if !(1..=NUM_RACES as i32).contains(&race) {
        bail!(
            "snapshot has no usable player.raceid (found {race}); cannot name the v3 files"
        );
    }
    Ok(race)
}

fn run_unpacked(
    snapshot: &Snapshot,
    files: &Workdir,
    owners: &OwnerMap,
    race: i32,
    timestamp: &[u8; 18],
) -> anyhow::Result<()> {
    let mut ledger = FlowLedger::new();
    let mut control = ControlVector::new();

    // Bases charge the ledger first, planets absorb the costs, ships then
    // reclaim whatever was produced for them.
    let (bases_dat, bases_dis) = pack_bases(snapshot, owners, Some(&mut ledger))?;
    let (planets_dat, planets_dis) = pack_planets(snapshot, owners, Some(&mut ledger));
    let (ships_dat, ships_dis, targets) = pack_ships(snapshot, owners, Some(&mut ledger));

    for record in &ships_dat {
        if let Some(slot) = checksum::ship_slot(usize::from(record.id)) {
            control.set(slot, byte_sum(&to_bytes(record)?));
        }
    }
    for record in &planets_dat {
        if let Some(slot) = checksum::planet_slot(usize::from(record.id)) {
            control.set(slot, byte_sum(&to_bytes(record)?));
        }
    }
    for record in &bases_dat {
        if let Some(slot) = checksum::base_slot(usize::from(record.planet_id)) {
            control.set(slot, byte_sum(&to_bytes(record)?));
        }
    }

    let ship_section = write_counted(&ships_dat)?;
    let planet_section = write_counted(&planets_dat)?;
    let base_section = write_counted(&bases_dat)?;

    files.write(&format!("ship{race}.dat"), &ship_section)?;
    files.write(&format!("ship{race}.dis"), &write_counted(&ships_dis)?)?;
    files.write(&format!("pdata{race}.dat"), &planet_section)?;
    files.write(&format!("pdata{race}.dis"), &write_counted(&planets_dis)?)?;
    files.write(&format!("bdata{race}.dat"), &base_section)?;
    files.write(&format!("bdata{race}.dis"), &write_counted(&bases_dis)?)?;
    files.write(&format!("target{race}.dat"), &write_counted(&targets)?)?;

    let inbox = cipher_all(messages::render_inbox(snapshot, owners));
    files.write(&format!("mdata{race}.dat"), &write_message_file(&inbox))?;
    let outbox = cipher_all(messages::render_outbox(snapshot));
    files.write(&format!("mess{race}.dat"), &write_message_file(&outbox))?;

    files.write(&format!("shipxy{race}.dat"), &shipxy_bytes(snapshot, owners)?)?;

    let gen = gen_record(
        snapshot,
        owners,
        race,
        timestamp,
        // Unpacked checksums cover the records without the count prefix.
        byte_sum(&ship_section[2..]),
        byte_sum(&planet_section[2..]),
        byte_sum(&base_section[2..]),
    );
    files.write(&format!("gen{race}.dat"), &to_bytes(&gen)?)?;

    let vcrs = vcr_records(snapshot, owners);
    files.write(&format!("vcr{race}.dat"), &write_counted(&vcrs)?)?;

    files.write(&format!("contrl{race}.dat"), &control.to_bytes())?;

    remove_dead_files(files, race);
    write_init_tmp(files, race)?;

    let util = util::build_util_stream(snapshot, owners, timestamp, race);
    files.write(&format!("util{race}.dat"), &util)?;

    if let Some(report) = ledger.residual_report() {
        log::warn!("resource flows left residuals; undo information is incomplete");
        files.write("c2flow.txt", report.as_bytes())?;
    } else {
        files.remove("c2flow.txt");
    }

    Ok(())
}

fn run_rst(
    snapshot: &Snapshot,
    files: &Workdir,
    owners: &OwnerMap,
    race: i32,
    timestamp: &[u8; 18],
) -> anyhow::Result<()> {
    let (ships_dat, _, targets) = pack_ships(snapshot, owners, None);
    let (planets_dat, _) = pack_planets(snapshot, owners, None);
    let (bases_dat, _) = pack_bases(snapshot, owners, None)?;

    let ship_section = write_counted(&ships_dat)?;
    let target_section = write_counted(&targets)?;
    let planet_section = write_counted(&planets_dat)?;
    let base_section = write_counted(&bases_dat)?;
    let message_section =
        write_message_file(&cipher_all(messages::render_inbox(snapshot, owners)));
    let shipxy_section = shipxy_bytes(snapshot, owners)?;

    let gen = gen_record(
        snapshot,
        owners,
        race,
        timestamp,
        // Result-file checksums include the count prefixes.
        byte_sum(&ship_section),
        byte_sum(&planet_section),
        byte_sum(&base_section),
    );
    let gen_section = to_bytes(&GenRstRecord::from_gen(&gen))?;
    let vcr_section = write_counted(&vcr_records(snapshot, owners))?;

    let sections = [
        ship_section,
        target_section,
        planet_section,
        base_section,
        message_section,
        shipxy_section,
        gen_section,
        vcr_section,
    ];

    let mut offsets = Vec::with_capacity(32);
    let mut position = 32usize + 1;
    for section in &sections {
        offsets.extend_from_slice(&(position as u32).to_le_bytes());
        position += section.len();
    }

    let mut out = offsets;
    for section in &sections {
        out.extend_from_slice(section);
    }
    files.write(&format!("player{race}.rst"), &out)?;

    let util = util::build_util_stream(snapshot, owners, timestamp, race);
    files.write(&format!("util{race}.dat"), &util)?;

    Ok(())
}

fn pack_ships(
    snapshot: &Snapshot,
    owners: &OwnerMap,
    ledger: Option<&mut FlowLedger>,
) -> (Vec<ShipRecord>, Vec<ShipRecord>, Vec<TargetRecord>) {
    let me = snapshot.player.id;
    let mut ships: Vec<_> = snapshot.ships.iter().collect();
    ships.sort_by_key(|s| s.id);

    let mut dat = Vec::new();
    let mut dis = Vec::new();
    let mut targets = Vec::new();
    let mut ledger = ledger;

    for nu_ship in ships {
        if nu_ship.ownerid == me {
            let record = ship::dat(nu_ship, owners);
            if let Some(ledger) = ledger.as_deref_mut() {
                dis.push(ship::dis(&record, nu_ship, ledger));
            }
            dat.push(record);
        } else {
            targets.push(ship::target(nu_ship, owners));
        }
    }

    (dat, dis, targets)
}

fn pack_planets(
    snapshot: &Snapshot,
    owners: &OwnerMap,
    ledger: Option<&mut FlowLedger>,
) -> (Vec<PlanetRecord>, Vec<PlanetRecord>) {
    let me = snapshot.player.id;
    let mut planets: Vec<_> = snapshot
        .planets
        .iter()
        .filter(|p| planet::is_known(p))
        .collect();
    planets.sort_by_key(|p| p.id);

    let mut dat = Vec::new();
    let mut dis = Vec::new();
    let mut ledger = ledger;

    for nu_planet in planets {
        let record = planet::dat(nu_planet, owners);
        if let Some(ledger) = ledger.as_deref_mut() {
            if nu_planet.ownerid == me {
                dis.push(planet::dis(&record, nu_planet, ledger));
            } else {
                dis.push(record.clone());
            }
        }
        dat.push(record);
    }

    (dat, dis)
}

fn pack_bases(
    snapshot: &Snapshot,
    owners: &OwnerMap,
    ledger: Option<&mut FlowLedger>,
) -> anyhow::Result<(Vec<BaseRecord>, Vec<BaseRecord>)> {
    let me = snapshot.player.id;
    let mut bases: Vec<_> = snapshot.starbases.iter().collect();
    bases.sort_by_key(|b| b.planetid);

    let mut dat = Vec::new();
    let mut dis = Vec::new();
    let mut ledger = ledger;

    for nu_base in bases {
        let Some(planet) = snapshot.planet(nu_base.planetid) else {
            log::warn!(
                "base {} references missing planet {}, skipping",
                nu_base.id,
                nu_base.planetid
            );
            continue;
        };
        if planet.ownerid != me {
            continue;
        }

        let stocks: Vec<_> = snapshot
            .stock
            .iter()
            .filter(|s| s.starbaseid == nu_base.id)
            .collect();

        let record = base::dat(nu_base, planet, &stocks, &snapshot.racehulls, owners);
        if let Some(ledger) = ledger.as_deref_mut() {
            dis.push(base::dis(&record, nu_base, planet, &stocks, snapshot, ledger));
        }
        dat.push(record);
    }

    Ok((dat, dis))
}

fn shipxy_bytes(snapshot: &Snapshot, owners: &OwnerMap) -> anyhow::Result<Vec<u8>> {
    let mut slots = vec![ShipXyRecord::default(); MAX_SHIP_ID];
    for nu_ship in &snapshot.ships {
        let id = nu_ship.id;
        if (1..=MAX_SHIP_ID as i32).contains(&id) {
            slots[(id - 1) as usize] = ShipXyRecord {
                x: word(nu_ship.x),
                y: word(nu_ship.y),
                owner: word(owners.race(nu_ship.ownerid)),
                mass: word(nu_ship.mass),
            };
        }
    }

    let mut out = Vec::with_capacity(MAX_SHIP_ID * ShipXyRecord::SIZE);
    for slot in &slots {
        out.extend(to_bytes(slot)?);
    }
    Ok(out)
}

fn gen_record(
    snapshot: &Snapshot,
    owners: &OwnerMap,
    race: i32,
    timestamp: &[u8; 18],
    ship_checksum: u32,
    planet_checksum: u32,
    base_checksum: u32,
) -> GenRecord {
    let mut scores = [0u16; 44];
    for slot in 1..=NUM_RACES as i32 {
        let owner = owners.owner(slot);
        if owner == 0 {
            continue;
        }
        if let Some(score) = snapshot.scores.iter().find(|s| s.ownerid == owner) {
            let base = ((slot - 1) * 4) as usize;
            scores[base] = word(score.planets);
            scores[base + 1] = word(score.capitalships);
            scores[base + 2] = word(score.freighters);
            scores[base + 3] = word(score.starbases);
        }
    }

    GenRecord {
        timestamp: FixedStr::from_raw(*timestamp),
        scores,
        player: word(race),
        password: FixedStr::from_text(NO_PASSWORD),
        ship_checksum,
        planet_checksum,
        base_checksum,
        turn: word(snapshot.game.turn),
        timestamp_checksum: checksum::timestamp_checksum(timestamp),
    }
}

fn vcr_records(snapshot: &Snapshot, owners: &OwnerMap) -> Vec<VcrRecord> {
    snapshot
        .vcrs
        .iter()
        .map(|vcr| VcrRecord {
            seed: word(vcr.seed),
            signature: VcrRecord::SIGNATURE,
            temperature: word(vcr.temperature),
            battle_type: word(vcr.battletype),
            left_mass: word(vcr.left.mass),
            right_mass: word(vcr.right.mass),
            left: vcr_side(&vcr.left, owners),
            right: vcr_side(&vcr.right, owners),
            left_shield: word(vcr.left.shield),
            right_shield: word(vcr.right.shield),
        })
        .collect()
}

fn vcr_side(side: &nu_model::combat::VcrCombatant, owners: &OwnerMap) -> VcrSide {
    VcrSide {
        name: FixedStr::from_text(&side.name),
        damage: word(side.damage),
        crew: word(side.crew),
        object_id: word(side.objectid),
        owner: word(owners.race(side.ownerid)),
        image: word(side.image + 1 + 256 * side.hullid),
        beam_type: word(side.beamid),
        beam_count: word(side.beamcount),
        bay_count: word(side.baycount),
        torp_type: word(side.torpedoid),
        ammo: word(side.torpedos),
        launcher_count: word(side.launchercount),
    }
}

fn cipher_all(texts: Vec<String>) -> Vec<Vec<u8>> {
    texts.iter().map(|t| text::encrypt(t)).collect()
}

fn remove_dead_files(files: &Workdir, race: i32) {
    for name in DEAD_FILES {
        files.remove(name);
    }
    files.remove(&format!("kore{race}.dat"));
    files.remove(&format!("skore{race}.dat"));
    files.remove(&format!("mess35{race}.dat"));
    files.remove(&format!("player{race}.trn"));
}

/// Marks the race slot active in `init.tmp`, preserving the other slots.
fn write_init_tmp(files: &Workdir, race: i32) -> anyhow::Result<()> {
    let mut flags = match files.read("init.tmp") {
        Ok(bytes) if bytes.len() == NUM_RACES * 2 => bytes,
        _ => vec![0; NUM_RACES * 2],
    };
    let index = ((race - 1) * 2) as usize;
    flags[index] = 1;
    flags[index + 1] = 0;
    context!(files.write("init.tmp", &flags); "updating init.tmp")
}
