//! Normalisation of lesson time tokens into `HH:MM-HH:MM`.

use regex::Regex;
use std::sync::LazyLock;

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-–—\s]+").expect("separator pattern must compile"));
static CLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}):?(\d{2})$").expect("clock pattern must compile"));
static BARE_HOUR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})$").expect("hour pattern must compile"));
static NORMALIZED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{2}:\d{2}-\d{2}:\d{2}$").expect("range pattern must compile")
});

pub const DEFAULT_LESSON_MINUTES: u32 = 45;
pub const DEFAULT_BARE_HOUR_MINUTES: u32 = 60;

/// Durations used to synthesise the end of a range from a lone start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOptions {
    /// Added to a single `H:MM` / `HH:MM` token.
    pub lesson_minutes: u32,
    /// Added to a bare hour token such as `8`.
    pub bare_hour_minutes: u32,
}

impl Default for TimeOptions {
    fn default() -> Self {
        TimeOptions {
            lesson_minutes: DEFAULT_LESSON_MINUTES,
            bare_hour_minutes: DEFAULT_BARE_HOUR_MINUTES,
        }
    }
}

/// Parsed endpoint: minutes since midnight and whether only the hour was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Endpoint {
    minutes: u32,
    bare_hour: bool,
}

fn parse_endpoint(part: &str) -> Option<Endpoint> {
    let part = part.trim().replace(['.', ','], ":");
    if let Some(caps) = CLOCK.captures(&part) {
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps[2].parse().ok()?;
        if hour > 24 || minute > 59 {
            return None;
        }
        return Some(Endpoint { minutes: hour * 60 + minute, bare_hour: false });
    }
    if let Some(caps) = BARE_HOUR.captures(&part) {
        let hour: u32 = caps[1].parse().ok()?;
        if hour > 24 {
            return None;
        }
        return Some(Endpoint { minutes: hour * 60, bare_hour: true });
    }
    None
}

/// Formats minutes since midnight as `HH:MM`, wrapping past midnight.
pub fn format_clock(minutes: u32) -> String {
    let m = minutes % (24 * 60);
    format!("{:02}:{:02}", m / 60, m % 60)
}

/// Minutes since midnight of a `HH:MM` string.
pub fn parse_clock(text: &str) -> Option<u32> {
    let (h, m) = text.trim().split_once(':')?;
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    if m > 59 {
        return None;
    }
    Some(h * 60 + m)
}

/// Start of a normalised range, in minutes since midnight.
pub fn start_minutes(time: &str) -> Option<u32> {
    let start = time.split('-').next()?;
    parse_clock(start)
}

/// True for the canonical `HH:MM-HH:MM` form.
pub fn is_normalized(time: &str) -> bool {
    NORMALIZED.is_match(time)
}

/// Converts a raw time token into `HH:MM-HH:MM`.
///
/// Accepts `8:00-8:45`, `8.00 – 8.45`, `800-845`, a single `8:00` (end is
/// start + `lesson_minutes`) and a bare hour `8` (end is start +
/// `bare_hour_minutes`). Anything else comes back trimmed but unchanged.
pub fn normalize_time(raw: &str, opts: &TimeOptions) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let parts: Vec<&str> = SEPARATORS.split(trimmed).filter(|p| !p.is_empty()).collect();
    match parts.as_slice() {
        [start, end] => {
            if let (Some(s), Some(e)) = (parse_endpoint(start), parse_endpoint(end)) {
                return format!("{}-{}", format_clock(s.minutes), format_clock(e.minutes));
            }
        }
        [single] => {
            if let Some(s) = parse_endpoint(single) {
                let duration = if s.bare_hour { opts.bare_hour_minutes } else { opts.lesson_minutes };
                let end = s.minutes.saturating_add(duration);
                return format!("{}-{}", format_clock(s.minutes), format_clock(end));
            }
        }
        _ => {}
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(s: &str) -> String {
        normalize_time(s, &TimeOptions::default())
    }

    #[test]
    fn ranges_with_various_separators() {
        assert_eq!(norm("8:00-8:45"), "08:00-08:45");
        assert_eq!(norm("8.00 – 8.45"), "08:00-08:45");
        assert_eq!(norm("14,00—14,45"), "14:00-14:45");
        assert_eq!(norm("08:50 09:35"), "08:50-09:35");
        assert_eq!(norm("800-845"), "08:00-08:45");
        assert_eq!(norm("9-10"), "09:00-10:00");
    }

    #[test]
    fn single_start_gets_default_lesson_length() {
        assert_eq!(norm("8:00"), "08:00-08:45");
        assert_eq!(norm("13:30"), "13:30-14:15");
        assert_eq!(norm("9.20"), "09:20-10:05");
    }

    #[test]
    fn bare_hour_gets_full_hour() {
        assert_eq!(norm("8"), "08:00-09:00");
        let opts = TimeOptions { lesson_minutes: 40, bare_hour_minutes: 45 };
        assert_eq!(normalize_time("8", &opts), "08:00-08:45");
        assert_eq!(normalize_time("8:10", &opts), "08:10-08:50");
    }

    #[test]
    fn huge_durations_do_not_overflow() {
        let opts = TimeOptions { lesson_minutes: u32::MAX, bare_hour_minutes: u32::MAX };
        assert!(is_normalized(&normalize_time("8:00", &opts)));
        assert!(is_normalized(&normalize_time("8", &opts)));
    }

    #[test]
    fn unparseable_input_passes_through_trimmed() {
        assert_eq!(norm("  бірінші сабақ "), "бірінші сабақ");
        assert_eq!(norm("8:00-8:45-9:30"), "8:00-8:45-9:30");
        assert_eq!(norm("8:75"), "8:75");
        assert_eq!(norm(""), "");
    }

    #[test]
    fn normalisation_is_idempotent_on_samples() {
        for raw in ["8:00-8:45", "8", "8.30", "garbage", "14:00 - 14:45", "23:30"] {
            let once = norm(raw);
            assert_eq!(norm(&once), once, "not idempotent for {}", raw);
        }
    }

    #[test]
    fn clock_helpers() {
        assert_eq!(start_minutes("08:50-09:35"), Some(530));
        assert_eq!(start_minutes("бірінші"), None);
        assert!(is_normalized("08:00-08:45"));
        assert!(!is_normalized("8:00-8:45"));
        assert_eq!(format_clock(23 * 60 + 30 + 45), "00:15");
    }
}
