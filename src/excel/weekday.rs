//! Weekday tokens in Kazakh, Russian and English.

use chrono::Weekday;

/// Exact tokens (lower case) per school day, full names then abbreviations.
const WEEKDAY_TOKENS: [(Weekday, &[&str]); 6] = [
    (Weekday::Mon, &["дүйсенбі", "понедельник", "monday", "дс", "пн", "mon", "mo"]),
    (Weekday::Tue, &["сейсенбі", "вторник", "tuesday", "сс", "вт", "tue", "tu"]),
    (Weekday::Wed, &["сәрсенбі", "среда", "wednesday", "ср", "wed", "we"]),
    (Weekday::Thu, &["бейсенбі", "четверг", "thursday", "бс", "чт", "thu", "th"]),
    (Weekday::Fri, &["жұма", "пятница", "friday", "жм", "пт", "fri", "fr"]),
    (Weekday::Sat, &["сенбі", "суббота", "saturday", "сб", "sat", "sa"]),
];

/// Parses a weekday token. Exact (case-insensitive) equality only, so that
/// subject names containing a day name are never taken for a day.
pub fn parse_weekday(text: &str) -> Option<Weekday> {
    let lower = text.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }
    WEEKDAY_TOKENS
        .iter()
        .find(|(_, tokens)| tokens.contains(&lower.as_str()))
        .map(|(day, _)| *day)
}

pub fn is_week_day(text: &str) -> bool {
    parse_weekday(text).is_some()
}

/// Canonical Kazakh name stored in lesson records.
pub fn kazakh_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Дүйсенбі",
        Weekday::Tue => "Сейсенбі",
        Weekday::Wed => "Сәрсенбі",
        Weekday::Thu => "Бейсенбі",
        Weekday::Fri => "Жұма",
        Weekday::Sat => "Сенбі",
        Weekday::Sun => "Жексенбі",
    }
}

/// Canonical name for any recognised token.
pub fn canonical_day(text: &str) -> Option<&'static str> {
    parse_weekday(text).map(kazakh_name)
}

/// Sort key: Monday first, unrecognised names after Saturday.
pub fn day_order(text: &str) -> u32 {
    match parse_weekday(text) {
        Some(d) => d.num_days_from_monday(),
        None => 7,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_names_in_three_languages() {
        assert_eq!(parse_weekday("Дүйсенбі"), Some(Weekday::Mon));
        assert_eq!(parse_weekday("ПОНЕДЕЛЬНИК"), Some(Weekday::Mon));
        assert_eq!(parse_weekday(" Friday "), Some(Weekday::Fri));
        assert_eq!(parse_weekday("сәрсенбі"), Some(Weekday::Wed));
    }

    #[test]
    fn abbreviations() {
        assert_eq!(parse_weekday("Дс"), Some(Weekday::Mon));
        assert_eq!(parse_weekday("чт"), Some(Weekday::Thu));
        assert_eq!(parse_weekday("Sat"), Some(Weekday::Sat));
        assert_eq!(parse_weekday("ср"), Some(Weekday::Wed));
    }

    #[test]
    fn no_partial_matches() {
        assert!(!is_week_day("Дүйсенбі күні"));
        assert!(!is_week_day("Математика"));
        assert!(!is_week_day(""));
        assert!(!is_week_day("8:00"));
    }

    #[test]
    fn canonical_names_and_order() {
        assert_eq!(canonical_day("пятница"), Some("Жұма"));
        assert_eq!(canonical_day("Tue"), Some("Сейсенбі"));
        assert!(day_order("Дүйсенбі") < day_order("Сенбі"));
        assert_eq!(day_order("Белгісіз"), 7);
    }
}
