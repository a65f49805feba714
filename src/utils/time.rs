use crate::bot::error::Error;

/// Parse a "HH:MM" send time into an (hour, minute) tuple. The tuple form
/// is what gets stored and compared at due-time; the string never is.
pub fn parse_hhmm(input: &str) -> Result<(u32, u32), Error> {
    let invalid = || Error::InvalidTime(format!("'{}' is not a valid HH:MM time", input));

    let (hour_str, minute_str) = input.trim().split_once(':').ok_or_else(invalid)?;

    if hour_str.is_empty() || hour_str.len() > 2 || minute_str.len() != 2 {
        return Err(invalid());
    }

    let hour: u32 = hour_str.parse().map_err(|_| invalid())?;
    let minute: u32 = minute_str.parse().map_err(|_| invalid())?;

    if hour > 23 || minute > 59 {
        return Err(invalid());
    }

    Ok((hour, minute))
}

/// Monday-based weekday name (0 = Monday .. 6 = Sunday)
pub fn weekday_name(day: u32) -> &'static str {
    match day {
        0 => "Monday",
        1 => "Tuesday",
        2 => "Wednesday",
        3 => "Thursday",
        4 => "Friday",
        5 => "Saturday",
        6 => "Sunday",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_times() {
        assert_eq!(parse_hhmm("09:00").unwrap(), (9, 0));
        assert_eq!(parse_hhmm("9:05").unwrap(), (9, 5));
        assert_eq!(parse_hhmm("00:00").unwrap(), (0, 0));
        assert_eq!(parse_hhmm("23:59").unwrap(), (23, 59));
        assert_eq!(parse_hhmm(" 12:30 ").unwrap(), (12, 30));
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["24:00", "12:60", "12", "12:3", "12:345", ":30", "ab:cd", "12-30", ""] {
            assert!(parse_hhmm(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn weekday_names_are_monday_based() {
        assert_eq!(weekday_name(0), "Monday");
        assert_eq!(weekday_name(6), "Sunday");
    }
}
