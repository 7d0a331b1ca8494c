//! Record layouts of the static specification files.

use binrw::binrw;

use crate::fixed_str::FixedStr;

/// Number of races in a v3 universe.
pub const NUM_RACES: usize = 11;
/// Number of planets on the map.
pub const NUM_PLANETS: usize = 500;
/// Hull slots per race in `truehull.dat`.
pub const HULLS_PER_RACE: usize = 20;

/// One record of `beamspec.dat` (10 records).
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeamRecord {
    pub name: FixedStr<20>,
    pub cost: u16,
    pub tritanium: u16,
    pub duranium: u16,
    pub molybdenum: u16,
    pub mass: u16,
    pub tech: u16,
    pub crew_kill: u16,
    pub damage: u16,
}

impl BeamRecord {
    pub const SIZE: usize = 36;
    pub const COUNT: usize = 10;
}

/// One record of `torpspec.dat` (10 records).
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TorpRecord {
    pub name: FixedStr<20>,
    pub torpedo_cost: u16,
    pub launcher_cost: u16,
    pub tritanium: u16,
    pub duranium: u16,
    pub molybdenum: u16,
    pub mass: u16,
    pub tech: u16,
    pub crew_kill: u16,
    pub damage: u16,
}

impl TorpRecord {
    pub const SIZE: usize = 38;
    pub const COUNT: usize = 10;
}

/// One record of `engspec.dat` (9 records).
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineRecord {
    pub name: FixedStr<20>,
    pub cost: u16,
    pub tritanium: u16,
    pub duranium: u16,
    pub molybdenum: u16,
    pub tech: u16,
    /// Fuel usage per warp factor 1-9.
    pub fuel: [u32; 9],
}

impl EngineRecord {
    pub const SIZE: usize = 66;
    pub const COUNT: usize = 9;
}

/// One record of `hullspec.dat` (105 records).
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HullRecord {
    pub name: FixedStr<30>,
    pub picture: u16,
    pub reserved: u16,
    pub tritanium: u16,
    pub duranium: u16,
    pub molybdenum: u16,
    pub fuel_tank: u16,
    pub crew: u16,
    pub engines: u16,
    pub mass: u16,
    pub tech: u16,
    pub cargo: u16,
    pub bays: u16,
    pub launchers: u16,
    pub beams: u16,
    pub cost: u16,
}

impl HullRecord {
    pub const SIZE: usize = 60;
    pub const COUNT: usize = 105;
}

/// One record of `xyplan.dat` (500 records).
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanetXyRecord {
    pub x: u16,
    pub y: u16,
    pub owner: u16,
}

impl PlanetXyRecord {
    pub const SIZE: usize = 6;
    pub const COUNT: usize = 500;
}

/// One race's entry in `race.nm` (11 back-to-back entries).
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RaceNameEntry {
    pub name: FixedStr<30>,
    pub short_name: FixedStr<20>,
    pub adjective: FixedStr<12>,
}

impl RaceNameEntry {
    pub const SIZE: usize = 62;
}

/// The 11x20 hull assignment matrix of `truehull.dat`.
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truehull {
    pub hulls: [u16; NUM_RACES * HULLS_PER_RACE],
}

impl Truehull {
    pub const SIZE: usize = 440;

    /// The hull ids of one race's row; `race` is 1-based.
    pub fn row(&self, race: usize) -> &[u16] {
        let start = (race - 1) * HULLS_PER_RACE;
        &self.hulls[start..start + HULLS_PER_RACE]
    }

    pub fn row_mut(&mut self, race: usize) -> &mut [u16] {
        let start = (race - 1) * HULLS_PER_RACE;
        &mut self.hulls[start..start + HULLS_PER_RACE]
    }
}

impl Default for Truehull {
    fn default() -> Self {
        Self {
            hulls: [0; NUM_RACES * HULLS_PER_RACE],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::to_bytes;

    #[test]
    fn spec_file_sizes() {
        assert_eq!(to_bytes(&BeamRecord::default()).unwrap().len(), BeamRecord::SIZE);
        assert_eq!(to_bytes(&TorpRecord::default()).unwrap().len(), TorpRecord::SIZE);
        assert_eq!(to_bytes(&EngineRecord::default()).unwrap().len(), EngineRecord::SIZE);
        assert_eq!(to_bytes(&HullRecord::default()).unwrap().len(), HullRecord::SIZE);
        assert_eq!(to_bytes(&PlanetXyRecord::default()).unwrap().len(), PlanetXyRecord::SIZE);
        assert_eq!(to_bytes(&RaceNameEntry::default()).unwrap().len(), RaceNameEntry::SIZE);
        assert_eq!(to_bytes(&Truehull::default()).unwrap().len(), Truehull::SIZE);

        assert_eq!(BeamRecord::SIZE * BeamRecord::COUNT, 360);
        assert_eq!(TorpRecord::SIZE * TorpRecord::COUNT, 380);
        assert_eq!(EngineRecord::SIZE * EngineRecord::COUNT, 594);
        assert_eq!(HullRecord::SIZE * HullRecord::COUNT, 6300);
        assert_eq!(PlanetXyRecord::SIZE * PlanetXyRecord::COUNT, 3000);
        assert_eq!(RaceNameEntry::SIZE * NUM_RACES, 682);
    }

    #[test]
    fn truehull_rows_are_independent() {
        let mut table = Truehull::default();
        table.row_mut(3).copy_from_slice(&[7; HULLS_PER_RACE]);
        assert_eq!(table.row(3), &[7; HULLS_PER_RACE]);
        assert_eq!(table.row(2), &[0; HULLS_PER_RACE]);
        assert_eq!(table.row(4), &[0; HULLS_PER_RACE]);
    }
}
