//! Elapsed-time strings as reported by the backend.

/// Parse an `HH:MM:SS` elapsed-time string into total seconds.
///
/// Malformed input (wrong field count, a non-numeric field, an empty
/// string) yields `0`. Callers treat zero as "no measurable duration", so
/// a bad value can never raise an alert on its own.
///
/// Hours are not bounded to a day; `"25:00:00"` is 90000 seconds.
///
/// ```rust
/// use agentwatch_types::parse_hms;
///
/// assert_eq!(parse_hms("00:00:00"), 0);
/// assert_eq!(parse_hms("01:02:03"), 3723);
/// assert_eq!(parse_hms(""), 0);
/// ```
pub fn parse_hms(s: &str) -> u64 {
    try_parse_hms(s).unwrap_or(0)
}

fn try_parse_hms(s: &str) -> Option<u64> {
    let mut fields = s.split(':').map(|field| field.trim().parse::<u64>().ok());

    let hours = fields.next()??;
    let minutes = fields.next()??;
    let seconds = fields.next()??;
    if fields.next().is_some() {
        return None;
    }

    hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)
}
