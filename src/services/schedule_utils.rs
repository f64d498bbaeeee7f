/// Trims `HH:mm:ss` down to `HH:mm`. This truncates, it does not parse.
pub fn format_time(time: &str) -> String {
    if time.is_empty() {
        return String::new();
    }
    time.chars().take(5).collect()
}

/// Expands `HH:mm` to `HH:mm:ss`; any other length is returned unchanged.
pub fn to_full_time(time: &str) -> String {
    if time.is_empty() {
        return String::new();
    }
    if time.chars().count() == 5 {
        format!("{time}:00")
    } else {
        time.to_string()
    }
}

/// Reads the leading integer of a slot time: optional sign, then digits.
/// Anything after the digits is ignored, so `"7h"` is 7 and `"-1:00"` is -1.
pub fn slot_hour(time: &str) -> Option<i64> {
    let trimmed = time.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: Vec<i64> = rest
        .chars()
        .map_while(|c| c.to_digit(10))
        .map(i64::from)
        .collect();
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits
        .into_iter()
        .fold(0i64, |acc, digit| acc.saturating_mul(10).saturating_add(digit));
    Some(if negative { -magnitude } else { magnitude })
}
