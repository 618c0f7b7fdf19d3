//! Booking identifier format
//!
//! `FX` + 4-digit year + zero-padded property id + zero-padded sequence.
//! Both numeric fields are at least two digits wide and widen as the
//! value grows past 99, so `property 7, sequence 1, 2024` is `FX20240701`
//! and `property 123, sequence 100, 2024` is `FX2024123100`.

use thiserror::Error;

pub const BOOKING_ID_PREFIX: &str = "FX";

const YEAR_WIDTH: usize = 4;
const MIN_FIELD_WIDTH: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingIdError {
    #[error("Booking identifier '{0}' does not match the FXYYYY<property><sequence> format")]
    Malformed(String),

    #[error("Booking sequence for property {0} is exhausted")]
    SequenceOverflow(u32),
}

fn digit_count(mut n: u64) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

/// Width of a padded numeric field: `max(2, digit_count(value))`
pub fn field_width(value: u32) -> usize {
    digit_count(u64::from(value)).max(MIN_FIELD_WIDTH)
}

/// Format an identifier from its parts.
pub fn format_booking_id(year: i32, property_id: u32, sequence: u32) -> String {
    format!(
        "{prefix}{year:0yw$}{property_id:0pw$}{sequence:0sw$}",
        prefix = BOOKING_ID_PREFIX,
        yw = YEAR_WIDTH,
        pw = field_width(property_id),
        sw = field_width(sequence),
    )
}

/// Extract the sequence number of an identifier issued for `property_id`.
///
/// The sequence starts after the prefix, the year and the padded property
/// field. Returns `None` when the identifier does not have that shape.
pub fn parse_sequence(identifier: &str, property_id: u32) -> Option<u32> {
    if !identifier.starts_with(BOOKING_ID_PREFIX) {
        return None;
    }
    let offset = BOOKING_ID_PREFIX.len() + YEAR_WIDTH + field_width(property_id);
    let digits = identifier.get(offset..)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Next identifier for `property_id` given the latest one issued for it.
///
/// No previous identifier starts the sequence at 1. A malformed previous
/// identifier is an error instead of a silently corrupted output.
pub fn next_booking_id(
    year: i32,
    property_id: u32,
    last_issued: Option<&str>,
) -> Result<String, BookingIdError> {
    let last = match last_issued {
        Some(id) => parse_sequence(id, property_id)
            .ok_or_else(|| BookingIdError::Malformed(id.to_string()))?,
        None => 0,
    };
    let next = last
        .checked_add(1)
        .ok_or(BookingIdError::SequenceOverflow(property_id))?;
    Ok(format_booking_id(year, property_id, next))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_booking_for_small_property() {
        assert_eq!(next_booking_id(2024, 7, None).unwrap(), "FX20240701");
    }

    #[test]
    fn property_field_is_two_digits_below_100() {
        for pid in [1u32, 9, 10, 42, 99] {
            let id = format_booking_id(2024, pid, 1);
            assert_eq!(&id[6..8], format!("{:02}", pid));
            assert_eq!(id.len(), 10);
        }
    }

    #[test]
    fn property_field_widens_from_100() {
        assert_eq!(format_booking_id(2024, 100, 1), "FX202410001");
        assert_eq!(format_booking_id(2024, 12345, 1), "FX20241234501");
    }

    #[test]
    fn sequence_field_widens_from_100() {
        assert_eq!(format_booking_id(2024, 7, 99), "FX20240799");
        assert_eq!(format_booking_id(2024, 7, 100), "FX202407100");
        assert_eq!(format_booking_id(2024, 7, 1000), "FX2024071000");
    }

    #[test]
    fn identifiers_start_with_prefix_and_year() {
        let id = format_booking_id(2031, 3, 5);
        assert!(id.starts_with("FX2031"));
    }

    #[test]
    fn next_increments_previous_sequence() {
        assert_eq!(next_booking_id(2024, 7, Some("FX20240741")).unwrap(), "FX20240742");
        assert_eq!(next_booking_id(2024, 7, Some("FX20240799")).unwrap(), "FX202407100");
        assert_eq!(
            next_booking_id(2024, 250, Some("FX2024250123")).unwrap(),
            "FX2024250124"
        );
    }

    #[test]
    fn parse_uses_property_width() {
        assert_eq!(parse_sequence("FX20240712", 7), Some(12));
        assert_eq!(parse_sequence("FX2024123100", 123), Some(100));
    }

    #[test]
    fn malformed_identifiers_do_not_parse() {
        assert_eq!(parse_sequence("FX202407", 7), None);
        assert_eq!(parse_sequence("FX202407ab", 7), None);
        assert_eq!(parse_sequence("BK20240701", 7), None);
        assert_eq!(parse_sequence("FX2024", 7), None);
    }

    #[test]
    fn malformed_previous_identifier_is_an_error() {
        let err = next_booking_id(2024, 7, Some("garbage")).unwrap_err();
        assert_eq!(err, BookingIdError::Malformed("garbage".into()));
    }

    #[test]
    fn exhausted_sequence_is_an_error() {
        let last = format_booking_id(2024, 7, u32::MAX);
        let err = next_booking_id(2024, 7, Some(&last)).unwrap_err();
        assert_eq!(err, BookingIdError::SequenceOverflow(7));
    }

    #[test]
    fn identifiers_increase_within_a_property_and_year() {
        let mut previous: Option<String> = None;
        for _ in 0..150 {
            let next = next_booking_id(2024, 7, previous.as_deref()).unwrap();
            if let Some(prev) = &previous {
                let prev_seq = parse_sequence(prev, 7).unwrap();
                let next_seq = parse_sequence(&next, 7).unwrap();
                assert_eq!(next_seq, prev_seq + 1);
            }
            previous = Some(next);
        }
        assert_eq!(previous.as_deref(), Some("FX202407150"));
    }
}
