//! Content of the utility stream.

use nu_model::Snapshot;
use v3_format::specs::NUM_RACES;
use v3_format::util::{record_type, UtilWriter};
use v3_format::FixedStr;

use crate::num::{dword, word};
use crate::owner::OwnerMap;

/// Score tables emitted as utility records, with their utility ids.
const SCORE_TABLES: &[(&str, u16)] = &[
    ("Military Score", 1),
    ("Inventory Score", 2),
    ("Priority Points", 3),
];

/// Assembles `util<N>.dat`: turn metadata first, then storms, minefield
/// hints, allied-base hints and the score tables.
pub fn build_util_stream(
    snapshot: &Snapshot,
    owners: &OwnerMap,
    timestamp: &[u8; 18],
    race: i32,
) -> Vec<u8> {
    let mut writer = UtilWriter::new();

    let mut turn_info = timestamp.to_vec();
    turn_info.extend_from_slice(&word(snapshot.game.turn).to_le_bytes());
    turn_info.extend_from_slice(&word(race).to_le_bytes());
    writer.record(record_type::TURN_INFO, &turn_info);

    for storm in &snapshot.ionstorms {
        let mut payload = Vec::with_capacity(16);
        for value in [
            storm.id,
            storm.x,
            storm.y,
            storm.radius,
            storm.voltage,
            storm.warp,
            storm.heading,
            i32::from(storm.isgrowing),
        ] {
            payload.extend_from_slice(&word(value).to_le_bytes());
        }
        writer.record(record_type::ION_STORM, &payload);
    }

    for mine in &snapshot.minefields {
        let mut payload = Vec::with_capacity(14);
        for value in [mine.id, mine.x, mine.y, owners.race(mine.ownerid)] {
            payload.extend_from_slice(&word(value).to_le_bytes());
        }
        payload.extend_from_slice(&dword(mine.units).to_le_bytes());
        payload.extend_from_slice(&word(i32::from(mine.isweb)).to_le_bytes());
        writer.record(record_type::MINEFIELD, &payload);
    }

    for base in &snapshot.starbases {
        let Some(planet) = snapshot.planet(base.planetid) else {
            continue;
        };
        if planet.ownerid != snapshot.player.id && planet.ownerid != 0 {
            let mut payload = word(base.planetid).to_le_bytes().to_vec();
            payload.extend_from_slice(&word(owners.race(planet.ownerid)).to_le_bytes());
            writer.record(record_type::ALLIED_BASE, &payload);
        }
    }

    for (name, utility_id) in SCORE_TABLES {
        writer.record(
            record_type::SCORE,
            &score_table(snapshot, owners, name, *utility_id),
        );
    }

    writer.into_bytes()
}

/// One score table: 50-byte name, utility id, two reserved words, then one
/// 32-bit score per race slot (-1 for races not in the game).
fn score_table(snapshot: &Snapshot, owners: &OwnerMap, name: &str, utility_id: u16) -> Vec<u8> {
    let mut payload = FixedStr::<50>::from_text(name).as_bytes().to_vec();
    payload.extend_from_slice(&utility_id.to_le_bytes());
    payload.extend_from_slice(&[0; 4]);

    for race in 1..=NUM_RACES as i32 {
        let owner = owners.owner(race);
        let score = snapshot
            .scores
            .iter()
            .find(|s| owner != 0 && s.ownerid == owner)
            .map_or(-1, |s| match utility_id {
                1 => s.militaryscore,
                2 => s.inventoryscore,
                _ => s.prioritypoints,
            });
        payload.extend_from_slice(&score.to_le_bytes());
    }

    payload
}

#[cfg(test)]
mod test {
    use super::*;
    use nu_model::combat::IonStorm;
    use nu_model::game::{Player, Score};

    #[test]
    fn stream_starts_with_turn_metadata() {
        let snapshot = Snapshot {
            ionstorms: vec![IonStorm {
                id: 1,
                voltage: 80,
                ..IonStorm::default()
            }],
            ..Snapshot::default()
        };
        let owners = OwnerMap::new(&[]);
        let stamp = *b"01-02-201504:05:06";

        let bytes = build_util_stream(&snapshot, &owners, &stamp, 5);
        // type 13, length 22, then the timestamp.
        assert_eq!(&bytes[..4], &[13, 0, 22, 0]);
        assert_eq!(&bytes[4..22], &stamp);
        // race slot at the tail of the first record
        assert_eq!(&bytes[24..26], &[5, 0]);
        // next record is the ion storm
        assert_eq!(&bytes[26..30], &[17, 0, 16, 0]);
    }

    #[test]
    fn score_tables_mark_missing_races() {
        let snapshot = Snapshot {
            players: vec![Player {
                id: 3,
                raceid: 2,
                ..Player::default()
            }],
            scores: vec![Score {
                ownerid: 3,
                militaryscore: 777,
                ..Score::default()
            }],
            ..Snapshot::default()
        };
        let owners = OwnerMap::new(&snapshot.players);

        let table = score_table(&snapshot, &owners, "Military Score", 1);
        assert_eq!(table.len(), 100);
        // Race 1 is absent, race 2 scores 777.
        assert_eq!(&table[56..60], &(-1i32).to_le_bytes());
        assert_eq!(&table[60..64], &777i32.to_le_bytes());
    }
}
