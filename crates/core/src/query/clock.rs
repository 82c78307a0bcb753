//! 12-hour clock parsing for agenda times.

/// Converts a `H:MM AM|PM` clock time to minutes since midnight (0..=1439).
///
/// The hour must be 1-12 and the minute 0-59; the marker is matched case-insensitively and
/// surrounding whitespace is ignored. `12:xx AM` is the midnight hour and `12:xx PM` the noon
/// hour. Anything else yields `None`.
pub fn parse_clock_time(raw: &str) -> Option<u16> {
    let (clock, marker) = raw.trim().split_once(char::is_whitespace)?;
    let is_pm = match marker.trim() {
        m if m.eq_ignore_ascii_case("AM") => false,
        m if m.eq_ignore_ascii_case("PM") => true,
        _ => return None,
    };

    let (hours, minutes) = clock.split_once(':')?;
    if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
        return None;
    }
    if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut hours: u16 = hours.parse().ok()?;
    let minutes: u16 = minutes.parse().ok()?;
    if !(1..=12).contains(&hours) || minutes > 59 {
        return None;
    }

    if is_pm && hours < 12 {
        hours += 12;
    }
    if !is_pm && hours == 12 {
        hours = 0;
    }
    Some(hours * 60 + minutes)
}
