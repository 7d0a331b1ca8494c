//! Host timestamp handling.

use chrono::NaiveDateTime;

/// The zero stamp used when the host start time cannot be parsed.
const FALLBACK: &[u8; 18] = b"00-00-000000:00:00";

/// Turns `settings.hoststart` into the 18-byte v3 timestamp
/// (`MM-DD-YYYYHH:MM:SS`).
///
/// Nu serves the time in US notation, usually with an AM/PM suffix.
pub fn host_timestamp(hoststart: &str) -> [u8; 18] {
    const FORMATS: &[&str] = &[
        "%m/%d/%Y %I:%M:%S %p",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %I:%M %p",
    ];

    let trimmed = hoststart.trim();
    let parsed = FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(trimmed, f).ok());

    let Some(time) = parsed else {
        if !trimmed.is_empty() {
            log::warn!("unparseable host start time {trimmed:?}, using zero timestamp");
        }
        return *FALLBACK;
    };

    let text = time.format("%m-%d-%Y%H:%M:%S").to_string();
    let mut stamp = *FALLBACK;
    if text.len() == stamp.len() {
        stamp.copy_from_slice(text.as_bytes());
    } else {
        log::warn!("host start time {trimmed:?} formats to {} bytes", text.len());
    }
    stamp
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn formats_to_eighteen_bytes() {
        let stamp = host_timestamp("7/20/2012 6:05:09 PM");
        assert_eq!(&stamp, b"07-20-201218:05:09");
    }

    #[test]
    fn accepts_24h_times() {
        let stamp = host_timestamp("12/1/2011 05:04:45");
        assert_eq!(&stamp, b"12-01-201105:04:45");
    }

    #[test]
    fn falls_back_on_garbage() {
        assert_eq!(&host_timestamp("soon"), b"00-00-000000:00:00");
        assert_eq!(&host_timestamp(""), b"00-00-000000:00:00");
    }
}
