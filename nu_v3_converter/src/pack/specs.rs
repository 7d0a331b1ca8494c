//! Synthesis of the static specification files, overlaying template files
//! where they exist on disk.

use nu_model::Snapshot;
use once_cell::sync::Lazy;
use v3_format::specs::{
    BeamRecord, EngineRecord, HullRecord, PlanetXyRecord, RaceNameEntry, TorpRecord, Truehull,
    HULLS_PER_RACE, NUM_PLANETS, NUM_RACES,
};
use v3_format::{to_bytes, FixedStr};

use crate::files::Workdir;
use crate::num::{dword, word};

/// Race names used when no `race.nm` template is around.
static DEFAULT_RACE_NAMES: Lazy<Vec<RaceNameEntry>> = Lazy::new(|| {
    [
        ("The Solar Federation", "The Feds", "Fed"),
        ("The Lizard Alliance", "The Lizards", "Lizard"),
        ("The Empire of the Birds", "The Bird Men", "Bird Man"),
        ("The Fascist Empire", "The Fascists", "Fascist"),
        ("The Privateer Bands", "The Privateers", "Privateer"),
        ("The Cyborg", "The Cyborg", "Cyborg"),
        ("The Crystal Confederation", "The Crystal People", "Crystalline"),
        ("The Evil Empire", "The Evil Empire", "Imperial"),
        ("The Robotic Imperium", "The Robots", "Robotic"),
        ("The Rebel Confederation", "The Rebels", "Rebel"),
        ("The Missing Colonies of Man", "The Colonies", "Colonial"),
    ]
    .iter()
    .map(|(name, short, adjective)| RaceNameEntry {
        name: FixedStr::from_text(name),
        short_name: FixedStr::from_text(short),
        adjective: FixedStr::from_text(adjective),
    })
    .collect()
});

/// Writes the full specification file set.
pub fn write_spec_files(snapshot: &Snapshot, files: &Workdir, race: i32) -> anyhow::Result<()> {
    write_beamspec(snapshot, files)?;
    write_torpspec(snapshot, files)?;
    write_engspec(snapshot, files)?;
    write_hullspec(snapshot, files)?;
    write_xyplan(snapshot, files)?;
    write_planet_names(snapshot, files)?;
    write_race_names(snapshot, files)?;
    write_truehull(snapshot, files, race)?;
    write_hullfunc(snapshot, files)?;
    Ok(())
}

/// Loads a template as records, or synthesizes `count` default ones.
fn template_records<T>(files: &Workdir, name: &str, count: usize, default: impl Fn(usize) -> T) -> Vec<T>
where
    for<'a> T: v3_format::binrw::BinRead<Args<'a> = ()>,
{
    if let Some(bytes) = files.template(name) {
        match v3_format::from_bytes_n(&bytes, count) {
            Ok(records) => return records,
            Err(_) => log::warn!("template {name} is truncated, synthesizing defaults"),
        }
    } else {
        log::warn!("no template for {name}, synthesizing defaults");
    }

    (1..=count).map(default).collect()
}

fn write_records<T>(files: &Workdir, name: &str, records: &[T]) -> anyhow::Result<()>
where
    for<'a> T: v3_format::binrw::BinWrite<Args<'a> = ()>,
{
    let mut out = Vec::new();
    for record in records {
        out.extend(to_bytes(record)?);
    }
    files.write(name, &out)
}

fn write_beamspec(snapshot: &Snapshot, files: &Workdir) -> anyhow::Result<()> {
    let mut records = template_records(files, "beamspec.dat", BeamRecord::COUNT, |k| BeamRecord {
        name: FixedStr::from_text(&format!("#{k}")),
        ..BeamRecord::default()
    });
    for (index, record) in records.iter_mut().enumerate() {
        if let Some(beam) = snapshot.beam(index as i32 + 1) {
            *record = BeamRecord {
                name: FixedStr::from_text(&beam.name),
                cost: word(beam.cost),
                tritanium: word(beam.tritanium),
                duranium: word(beam.duranium),
                molybdenum: word(beam.molybdenum),
                mass: word(beam.mass),
                tech: word(beam.techlevel),
                crew_kill: word(beam.crewkill),
                damage: word(beam.damage),
            };
        }
    }
    write_records(files, "beamspec.dat", &records)
}

fn write_torpspec(snapshot: &Snapshot, files: &Workdir) -> anyhow::Result<()> {
    let mut records = template_records(files, "torpspec.dat", TorpRecord::COUNT, |k| TorpRecord {
        name: FixedStr::from_text(&format!("#{k}")),
        ..TorpRecord::default()
    });
    for (index, record) in records.iter_mut().enumerate() {
        if let Some(torp) = snapshot.torpedo(index as i32 + 1) {
            *record = TorpRecord {
                name: FixedStr::from_text(&torp.name),
                torpedo_cost: word(torp.torpedocost),
                launcher_cost: word(torp.launchercost),
                tritanium: word(torp.tritanium),
                duranium: word(torp.duranium),
                molybdenum: word(torp.molybdenum),
                mass: word(torp.mass),
                tech: word(torp.techlevel),
                crew_kill: word(torp.crewkill),
                damage: word(torp.damage),
            };
        }
    }
    write_records(files, "torpspec.dat", &records)
}

fn write_engspec(snapshot: &Snapshot, files: &Workdir) -> anyhow::Result<()> {
    let mut records =
        template_records(files, "engspec.dat", EngineRecord::COUNT, |k| EngineRecord {
            name: FixedStr::from_text(&format!("#{k}")),
            ..EngineRecord::default()
        });
    for (index, record) in records.iter_mut().enumerate() {
        if let Some(engine) = snapshot.engine(index as i32 + 1) {
            let mut fuel = [0u32; 9];
            for (slot, factor) in fuel.iter_mut().zip(engine.warp_factors()) {
                *slot = dword(factor);
            }
            *record = EngineRecord {
                name: FixedStr::from_text(&engine.name),
                cost: word(engine.cost),
                tritanium: word(engine.tritanium),
                duranium: word(engine.duranium),
                molybdenum: word(engine.molybdenum),
                tech: word(engine.techlevel),
                fuel,
            };
        }
    }
    write_records(files, "engspec.dat", &records)
}

fn write_hullspec(snapshot: &Snapshot, files: &Workdir) -> anyhow::Result<()> {
    let mut records = template_records(files, "hullspec.dat", HullRecord::COUNT, |k| HullRecord {
        name: FixedStr::from_text(&format!("#{k}")),
        ..HullRecord::default()
    });
    for (index, record) in records.iter_mut().enumerate() {
        if let Some(hull) = snapshot.hull(index as i32 + 1) {
            // The picture stays whatever the template had; Nu does not
            // serve one.
            record.name = FixedStr::from_text(&hull.name);
            record.tritanium = word(hull.tritanium);
            record.duranium = word(hull.duranium);
            record.molybdenum = word(hull.molybdenum);
            record.fuel_tank = word(hull.fueltank);
            record.crew = word(hull.crew);
            record.engines = word(hull.engines);
            record.mass = word(hull.mass);
            record.tech = word(hull.techlevel);
            record.cargo = word(hull.cargo);
            record.bays = word(hull.fighterbays);
            record.launchers = word(hull.launchers);
            record.beams = word(hull.beams);
            record.cost = word(hull.cost);
        }
    }
    write_records(files, "hullspec.dat", &records)
}

fn write_xyplan(snapshot: &Snapshot, files: &Workdir) -> anyhow::Result<()> {
    let mut records = template_records(files, "xyplan.dat", PlanetXyRecord::COUNT, |_| {
        PlanetXyRecord::default()
    });
    for (index, record) in records.iter_mut().enumerate() {
        if let Some(planet) = snapshot.planet(index as i32 + 1) {
            record.x = word(planet.x);
            record.y = word(planet.y);
        }
    }
    write_records(files, "xyplan.dat", &records)
}

fn write_planet_names(snapshot: &Snapshot, files: &Workdir) -> anyhow::Result<()> {
    let mut records = template_records(files, "planet.nm", NUM_PLANETS, |k| {
        FixedStr::<20>::from_text(&format!("#{k}"))
    });
    for (index, record) in records.iter_mut().enumerate() {
        if let Some(planet) = snapshot.planet(index as i32 + 1) {
            if !planet.name.is_empty() {
                *record = FixedStr::from_text(&planet.name);
            }
        }
    }
    write_records(files, "planet.nm", &records)
}

fn write_race_names(snapshot: &Snapshot, files: &Workdir) -> anyhow::Result<()> {
    let mut records = template_records(files, "race.nm", NUM_RACES, |k| {
        DEFAULT_RACE_NAMES[k - 1].clone()
    });
    for (index, record) in records.iter_mut().enumerate() {
        if let Some(race) = snapshot.races.iter().find(|r| r.id == index as i32 + 1) {
            *record = RaceNameEntry {
                name: FixedStr::from_text(&race.name),
                short_name: FixedStr::from_text(&race.shortname),
                adjective: FixedStr::from_text(&race.adjective),
            };
        }
    }
    write_records(files, "race.nm", &records)
}

fn write_truehull(snapshot: &Snapshot, files: &Workdir, race: i32) -> anyhow::Result<()> {
    let mut table = match files.template("truehull.dat") {
        Some(bytes) => match v3_format::from_bytes::<Truehull>(&bytes) {
            Ok(table) => table,
            Err(_) => {
                log::warn!("template truehull.dat is malformed, synthesizing");
                Truehull::default()
            }
        },
        None => {
            log::warn!("no template for truehull.dat, synthesizing");
            Truehull::default()
        }
    };

    if (1..=NUM_RACES as i32).contains(&race) {
        let row = table.row_mut(race as usize);
        row.fill(0);
        for (slot, hull) in row.iter_mut().zip(&snapshot.racehulls) {
            *slot = word(*hull);
        }
        if snapshot.racehulls.len() > HULLS_PER_RACE {
            log::warn!(
                "player can build {} hulls, truehull row only holds {HULLS_PER_RACE}",
                snapshot.racehulls.len()
            );
        }
    }

    files.write("truehull.dat", &to_bytes(&table)?)
}

fn write_hullfunc(snapshot: &Snapshot, files: &Workdir) -> anyhow::Result<()> {
    let mut out = String::from(
        "; Hull function definitions\n\
         ;\n\
         ; All hulls keep their standard device sets; cloaking is granted\n\
         ; explicitly below.\n\
         \n\
         %hullfunc\n\
         \n\
         Init = Default\n",
    );

    for hull in &snapshot.hulls {
        if hull.cancloak && (1..=HullRecord::COUNT as i32).contains(&hull.id) {
            out.push_str(&format!(
                "\nHull = {}\nFunction = Cloak\nRacesAllowed = +\n",
                hull.id
            ));
        }
    }

    files.write("hullfunc.txt", out.as_bytes())
}

#[cfg(test)]
mod test {
    use super::*;
    use nu_model::specs::Beam;

    fn workdir() -> Workdir {
        let dir = std::env::temp_dir().join(format!("specs-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        Workdir::new(dir, None)
    }

    #[test]
    fn beamspec_has_ten_records_with_defaults() {
        let snapshot = Snapshot {
            beams: vec![Beam {
                id: 1,
                name: "Laser".to_owned(),
                cost: 1,
                mass: 1,
                techlevel: 1,
                ..Beam::default()
            }],
            ..Snapshot::default()
        };

        let files = workdir();
        write_beamspec(&snapshot, &files).unwrap();
        let bytes = files.read("beamspec.dat").unwrap();
        assert_eq!(bytes.len(), 360);
        assert_eq!(&bytes[..5], b"Laser");
        // Beam 2 was not served; its record carries the placeholder name.
        assert_eq!(&bytes[36..38], b"#2");
    }

    #[test]
    fn truehull_places_racehulls_in_the_players_row() {
        let snapshot = Snapshot {
            racehulls: vec![10, 11, 12],
            ..Snapshot::default()
        };
        let files = workdir();
        write_truehull(&snapshot, &files, 2).unwrap();

        let bytes = files.read("truehull.dat").unwrap();
        assert_eq!(bytes.len(), 440);
        let table: Truehull = v3_format::from_bytes(&bytes).unwrap();
        assert_eq!(&table.row(2)[..4], &[10, 11, 12, 0]);
        assert_eq!(table.row(1), &[0u16; HULLS_PER_RACE]);
    }
}
