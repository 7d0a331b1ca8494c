//! The per-entity record layouts of the turn files.
//!
//! Every struct here is a byte-exact image of one v3 record; the `.dat` and
//! `.dis` files use the same layouts. All integers are little-endian.

use anyhow::Context;
use binrw::io::Cursor;
use binrw::{binrw, BinRead, BinReaderExt};

use crate::fixed_str::FixedStr;
use crate::V3Error;

/// Highest ship id the map can hold.
pub const MAX_SHIP_ID: usize = 999;
/// Highest planet id the map can hold.
pub const MAX_PLANET_ID: usize = 500;

/// One owned ship, as stored in `ship<N>.dat` / `.dis`.
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShipRecord {
    pub id: u16,
    pub owner: u16,
    pub fcode: FixedStr<3>,
    pub warp: u16,
    pub waypoint_dx: i16,
    pub waypoint_dy: i16,
    pub x: u16,
    pub y: u16,
    pub engine: u16,
    pub hull: u16,
    pub beam_type: u16,
    pub beam_count: u16,
    pub bay_count: u16,
    pub torp_type: u16,
    /// Torpedoes or fighters on board.
    pub ammo: u16,
    pub launcher_count: u16,
    /// Mission number, 1-based.
    pub mission: u16,
    pub enemy: u16,
    pub tow_target: u16,
    pub damage: u16,
    pub crew: u16,
    pub clans: u16,
    pub name: FixedStr<20>,
    pub neutronium: u16,
    pub tritanium: u16,
    pub duranium: u16,
    pub molybdenum: u16,
    pub supplies: u16,
    pub unload: CargoTransfer,
    pub transfer: CargoTransfer,
    pub intercept_target: u16,
    pub megacredits: u16,
}

impl ShipRecord {
    pub const SIZE: usize = 107;
}

/// The unload / transfer block of a [`ShipRecord`].
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CargoTransfer {
    pub neutronium: u16,
    pub tritanium: u16,
    pub duranium: u16,
    pub molybdenum: u16,
    pub clans: u16,
    pub supplies: u16,
    pub target_id: u16,
}

impl CargoTransfer {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether the block moves anything, ignoring the target field.
    pub fn has_cargo(&self) -> bool {
        self.neutronium != 0
            || self.tritanium != 0
            || self.duranium != 0
            || self.molybdenum != 0
            || self.clans != 0
            || self.supplies != 0
    }
}

/// A foreign ship contact, as stored in `target<N>.dat`.
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetRecord {
    pub id: u16,
    pub owner: u16,
    pub warp: i16,
    pub x: u16,
    pub y: u16,
    pub hull: u16,
    pub heading: i16,
    pub name: FixedStr<20>,
}

impl TargetRecord {
    pub const SIZE: usize = 34;
}

/// One planet, as stored in `pdata<N>.dat` / `.dis`.
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanetRecord {
    pub owner: u16,
    pub id: u16,
    pub fcode: FixedStr<3>,
    pub mines: u16,
    pub factories: u16,
    pub defense: u16,
    pub neutronium: u32,
    pub tritanium: u32,
    pub duranium: u32,
    pub molybdenum: u32,
    pub clans: u32,
    pub supplies: u32,
    pub megacredits: u32,
    pub ground_neutronium: u32,
    pub ground_tritanium: u32,
    pub ground_duranium: u32,
    pub ground_molybdenum: u32,
    pub density_neutronium: u16,
    pub density_tritanium: u16,
    pub density_duranium: u16,
    pub density_molybdenum: u16,
    pub colonist_tax: u16,
    pub native_tax: u16,
    pub colonist_happiness: i16,
    pub native_happiness: i16,
    pub native_government: u16,
    pub native_clans: u32,
    pub native_race: i16,
    /// `100 - temperature`; -1 when the temperature is unknown.
    pub temp_code: i16,
    pub build_base: u16,
}

impl PlanetRecord {
    pub const SIZE: usize = 85;
}

/// One starbase, as stored in `bdata<N>.dat` / `.dis`.
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseRecord {
    pub planet_id: u16,
    pub owner: u16,
    pub defense: u16,
    pub damage: u16,
    pub engine_tech: u16,
    pub hull_tech: u16,
    pub beam_tech: u16,
    pub torp_tech: u16,
    pub engine_stock: [u16; 9],
    pub hull_stock: [u16; 20],
    pub beam_stock: [u16; 10],
    pub launcher_stock: [u16; 10],
    pub torp_stock: [u16; 10],
    pub fighters: u16,
    pub target_ship_id: u16,
    pub ship_mission: u16,
    pub mission: u16,
    /// 1-based index into the owner's truehull row, 0 when not building.
    pub build_hull_slot: u16,
    pub build_engine: u16,
    pub build_beam: u16,
    pub build_beam_count: u16,
    pub build_torp: u16,
    pub build_torp_count: u16,
    pub zero: u16,
}

impl BaseRecord {
    pub const SIZE: usize = 156;
}

/// The general-state block of `gen<N>.dat`.
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenRecord {
    pub timestamp: FixedStr<18>,
    /// Planets, capital ships, freighters, bases for each of the 11 races.
    pub scores: [u16; 44],
    pub player: u16,
    pub password: FixedStr<20>,
    pub ship_checksum: u32,
    pub planet_checksum: u32,
    pub base_checksum: u32,
    pub turn: u16,
    pub timestamp_checksum: u16,
}

impl Default for GenRecord {
    fn default() -> Self {
        GenRecord {
            timestamp: Default::default(),
            scores: [0; 44],
            player: 0,
            password: Default::default(),
            ship_checksum: 0,
            planet_checksum: 0,
            base_checksum: 0,
            turn: 0,
            timestamp_checksum: 0,
        }
    }
}

impl GenRecord {
    pub const SIZE: usize = 144;
}

/// The general-state block as embedded in `player<N>.rst`. Same data as
/// [`GenRecord`] plus a literal `?` byte and a 12-byte filler.
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenRstRecord {
    pub timestamp: FixedStr<18>,
    pub scores: [u16; 44],
    pub player: u16,
    pub password: FixedStr<20>,
    pub marker: u8,
    pub ship_checksum: u32,
    pub planet_checksum: u32,
    pub base_checksum: u32,
    pub filler: [u8; 12],
    pub turn: u16,
    pub timestamp_checksum: u16,
}

impl GenRstRecord {
    pub const SIZE: usize = 157;

    pub fn from_gen(gen: &GenRecord) -> Self {
        Self {
            timestamp: gen.timestamp,
            scores: gen.scores,
            player: gen.player,
            password: gen.password,
            marker: b'?',
            ship_checksum: gen.ship_checksum,
            planet_checksum: gen.planet_checksum,
            base_checksum: gen.base_checksum,
            filler: *b"\0\0          ",
            turn: gen.turn,
            timestamp_checksum: gen.timestamp_checksum,
        }
    }
}

/// One combat recording, as stored in `vcr<N>.dat`.
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VcrRecord {
    pub seed: u16,
    /// Always 0x554E.
    pub signature: u16,
    pub temperature: u16,
    pub battle_type: u16,
    pub left_mass: u16,
    pub right_mass: u16,
    pub left: VcrSide,
    pub right: VcrSide,
    pub left_shield: u16,
    pub right_shield: u16,
}

impl VcrRecord {
    pub const SIZE: usize = 100;
    pub const SIGNATURE: u16 = 0x554E;
}

/// One combatant of a [`VcrRecord`].
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VcrSide {
    pub name: FixedStr<20>,
    pub damage: u16,
    pub crew: u16,
    pub object_id: u16,
    pub owner: u16,
    /// `picture + 1 + 256 * hull`; 0 hull marks a planet.
    pub image: u16,
    pub beam_type: u16,
    pub beam_count: u16,
    pub bay_count: u16,
    pub torp_type: u16,
    pub ammo: u16,
    pub launcher_count: u16,
}

/// One slot of `shipxy<N>.dat`; the file holds 999 of these by ship id.
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShipXyRecord {
    pub x: u16,
    pub y: u16,
    pub owner: u16,
    pub mass: u16,
}

impl ShipXyRecord {
    pub const SIZE: usize = 8;
}

/// Serializes a count-prefixed record file (`v count` followed by the
/// records).
pub fn write_counted<T>(records: &[T]) -> anyhow::Result<Vec<u8>>
where
    for<'a> T: binrw::BinWrite<Args<'a> = ()>,
{
    let mut out = (records.len() as u16).to_le_bytes().to_vec();
    for record in records {
        out.extend(crate::to_bytes(record)?);
    }
    Ok(out)
}

/// Reads a count-prefixed record file (`v count` followed by the records),
/// verifying the file size matches exactly.
pub fn read_counted<T>(bytes: &[u8], record_size: usize, file: &str) -> anyhow::Result<Vec<T>>
where
    for<'a> T: BinRead<Args<'a> = ()>,
{
    if bytes.len() < 2 {
        return Err(V3Error::ShortRecord {
            expected: 2,
            actual: bytes.len(),
        }
        .into());
    }

    let count = usize::from(u16::from_le_bytes([bytes[0], bytes[1]]));
    let expected = 2 + count * record_size;
    if bytes.len() != expected {
        return Err(V3Error::SizeMismatch {
            file: file.to_owned(),
            expected,
            actual: bytes.len(),
        }
        .into());
    }

    let mut cursor = Cursor::new(&bytes[2..]);
    let mut records = Vec::with_capacity(count);
    for index in 0..count {
        let record = cursor
            .read_le::<T>()
            .with_context(|| format!("record {index} of {file}"))?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::to_bytes;

    #[test]
    fn record_sizes_match_the_v3_layouts() {
        assert_eq!(to_bytes(&ShipRecord::default()).unwrap().len(), ShipRecord::SIZE);
        assert_eq!(to_bytes(&TargetRecord::default()).unwrap().len(), TargetRecord::SIZE);
        assert_eq!(to_bytes(&PlanetRecord::default()).unwrap().len(), PlanetRecord::SIZE);
        assert_eq!(to_bytes(&BaseRecord::default()).unwrap().len(), BaseRecord::SIZE);
        assert_eq!(to_bytes(&GenRecord::default()).unwrap().len(), GenRecord::SIZE);
        assert_eq!(
            to_bytes(&GenRstRecord::from_gen(&GenRecord::default())).unwrap().len(),
            GenRstRecord::SIZE
        );
        assert_eq!(to_bytes(&VcrRecord::default()).unwrap().len(), VcrRecord::SIZE);
        assert_eq!(to_bytes(&ShipXyRecord::default()).unwrap().len(), ShipXyRecord::SIZE);
    }

    #[test]
    fn negative_sentinels_round_trip() {
        let planet = PlanetRecord {
            temp_code: -1,
            native_race: -1,
            ..PlanetRecord::default()
        };
        let bytes = to_bytes(&planet).unwrap();
        // temp_code sits two words from the end.
        assert_eq!(&bytes[PlanetRecord::SIZE - 4..PlanetRecord::SIZE - 2], &[0xFF, 0xFF]);

        let back: PlanetRecord = crate::from_bytes(&bytes).unwrap();
        assert_eq!(back.temp_code, -1);
        assert_eq!(back.native_race, -1);
    }

    #[test]
    fn counted_files_round_trip_and_validate() {
        let records = vec![ShipXyRecord::default(); 3];
        let mut bytes = 3u16.to_le_bytes().to_vec();
        for r in &records {
            bytes.extend(to_bytes(r).unwrap());
        }

        let back: Vec<ShipXyRecord> =
            read_counted(&bytes, ShipXyRecord::SIZE, "shipxy7.dat").unwrap();
        assert_eq!(back, records);

        bytes.pop();
        let err = read_counted::<ShipXyRecord>(&bytes, ShipXyRecord::SIZE, "shipxy7.dat");
        assert!(err.is_err());
    }
}
