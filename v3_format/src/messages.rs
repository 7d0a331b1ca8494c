//! Message classes, headers and the `mdata<N>.dat` framing.

use crate::define_data_enum;

define_data_enum! {
    /// The message classes Nu serves, in their wire order 0-21.
    pub enum MessageKind for MessageKindData {
        /// The class letter encoded into the header.
        pub letter: char,
        /// The header title.
        pub title: &'static str;

        Outbound('r', "Outbound"),
        System('h', "System"),
        Terraforming('s', "Terraforming"),
        Minelaying('l', "Minelaying"),
        Minesweeping('m', "Minesweeping"),
        Colony('p', "Colony"),
        Combat('f', "Combat"),
        Fleet('f', "Fleet"),
        Ship('s', "Ship"),
        EnemyDistress('n', "Enemy Distress"),
        Explosion('x', "Explosion"),
        Starbase('d', "Starbase"),
        WebMines('w', "Web Mines"),
        Meteors('y', "Meteors"),
        SensorSweep('z', "Sensor Sweep"),
        BioScan('z', "Bio Scan"),
        DistressCall('e', "Distress Call"),
        Player('r', "Player"),
        Diplomacy('h', "Diplomacy"),
        MineScan('m', "Mine Scan"),
        DarkSense('9', "Dark Sense"),
        Hiss('9', "Hiss")
    }
}

impl MessageKind {
    /// Builds the v3 header line for a message of this class.
    ///
    /// Player-to-player messages encode the other seat as one hex digit
    /// followed by `000`; everything else carries the four-digit target id.
    pub fn header(self, target: i32) -> String {
        let data = self.data();
        let code = if matches!(self, MessageKind::Outbound | MessageKind::Player) {
            format!("{:X}000", target.clamp(0, 15))
        } else {
            format!("{:04}", target.clamp(0, 9999))
        };
        format!("(-{}{})<<< {} >>>", data.letter, code, data.title)
    }
}

/// Assembles a `mdata<N>.dat` image (also the message section of a result
/// file) from already-ciphered message bodies.
///
/// Layout: record count, then per message a 1-based file position and a
/// length, then the bodies back to back.
pub fn write_message_file(messages: &[Vec<u8>]) -> Vec<u8> {
    let count = messages.len();
    let header_len = 2 + 6 * count;
    let total: usize = header_len + messages.iter().map(Vec::len).sum::<usize>();

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&(count as u16).to_le_bytes());

    let mut position = header_len + 1;
    for body in messages {
        out.extend_from_slice(&(position as u32).to_le_bytes());
        out.extend_from_slice(&(body.len() as u16).to_le_bytes());
        position += body.len();
    }
    for body in messages {
        out.extend_from_slice(body);
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn kinds_map_from_wire_numbers() {
        assert_eq!(MessageKind::try_from(0).unwrap(), MessageKind::Outbound);
        assert_eq!(MessageKind::try_from(10).unwrap(), MessageKind::Explosion);
        assert_eq!(MessageKind::try_from(21).unwrap(), MessageKind::Hiss);
        assert!(MessageKind::try_from(22).is_err());
    }

    #[test]
    fn header_formats() {
        assert_eq!(MessageKind::Ship.header(77), "(-s0077)<<< Ship >>>");
        assert_eq!(MessageKind::Outbound.header(11), "(-rB000)<<< Outbound >>>");
        assert_eq!(MessageKind::Player.header(4), "(-r4000)<<< Player >>>");
        assert_eq!(MessageKind::DarkSense.header(333), "(-90333)<<< Dark Sense >>>");
    }

    #[test]
    fn message_file_framing() {
        let file = write_message_file(&[vec![1, 2, 3], vec![4, 5]]);
        assert_eq!(&file[0..2], &[2, 0]);
        // First directory entry: position 15 (1-based), length 3.
        assert_eq!(&file[2..8], &[15, 0, 0, 0, 3, 0]);
        assert_eq!(&file[8..14], &[18, 0, 0, 0, 2, 0]);
        assert_eq!(&file[14..], &[1, 2, 3, 4, 5]);
    }
}
