//! Bell schedules and lesson ordinal resolution.

use crate::excel::time::{parse_clock, start_minutes};
use crate::models::Shift;

/// One period of a bell schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: &'static str,
    pub end: &'static str,
    pub number: u32,
}

const fn period(start: &'static str, end: &'static str, number: u32) -> Period {
    Period { start, end, number }
}

pub const SHIFT_I_BELLS: [Period; 8] = [
    period("08:00", "08:45", 1),
    period("08:50", "09:35", 2),
    period("09:45", "10:30", 3),
    period("10:40", "11:25", 4),
    period("11:30", "12:15", 5),
    period("12:20", "13:05", 6),
    period("13:10", "13:55", 7),
    period("14:00", "14:45", 8),
];

pub const SHIFT_II_BELLS: [Period; 7] = [
    period("14:00", "14:45", 1),
    period("14:50", "15:35", 2),
    period("15:45", "16:30", 3),
    period("16:40", "17:25", 4),
    period("17:30", "18:15", 5),
    period("18:20", "19:05", 6),
    period("19:10", "19:55", 7),
];

pub fn bell_schedule(shift: Shift) -> &'static [Period] {
    match shift {
        Shift::I => &SHIFT_I_BELLS,
        Shift::II => &SHIFT_II_BELLS,
    }
}

/// How an ordinal was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Exact(u32),
    Contained(u32),
    /// Hour-based guess for starts that fall between or around periods.
    Estimated(u32),
    Unresolved,
}

impl Resolution {
    pub fn number(&self) -> u32 {
        match self {
            Resolution::Exact(n) | Resolution::Contained(n) | Resolution::Estimated(n) => *n,
            Resolution::Unresolved => 0,
        }
    }
}

fn minutes(clock: &str) -> u32 {
    parse_clock(clock).unwrap_or(0)
}

/// Resolves the period of a normalised `time` within `shift`.
///
/// Order: exact start match, start inside `[period.start, period.end]`,
/// then a coarse guess: starts before the first period map to 1, later
/// starts map to the last period that began at or before them, as long as
/// the start hour is no later than the last period's hour.
pub fn resolve_lesson_number(time: &str, shift: Shift) -> Resolution {
    let start = match start_minutes(time) {
        Some(s) => s,
        None => return Resolution::Unresolved,
    };
    let bells = bell_schedule(shift);

    if let Some(p) = bells.iter().find(|p| minutes(p.start) == start) {
        return Resolution::Exact(p.number);
    }

    if let Some(p) = bells
        .iter()
        .find(|p| minutes(p.start) <= start && start <= minutes(p.end))
    {
        return Resolution::Contained(p.number);
    }

    let (first, last) = match (bells.first(), bells.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return Resolution::Unresolved,
    };
    if start < minutes(first.start) {
        return Resolution::Estimated(first.number);
    }
    if start / 60 > minutes(last.start) / 60 {
        return Resolution::Unresolved;
    }
    bells
        .iter()
        .filter(|p| minutes(p.start) <= start)
        .last()
        .map(|p| Resolution::Estimated(p.number))
        .unwrap_or(Resolution::Unresolved)
}

/// Lesson ordinal, 0 when it cannot be resolved.
pub fn get_lesson_number(time: &str, shift: Shift) -> u32 {
    resolve_lesson_number(time, shift).number()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_start_matches() {
        assert_eq!(get_lesson_number("08:00-08:45", Shift::I), 1);
        assert_eq!(get_lesson_number("14:00-14:45", Shift::II), 1);
        assert_eq!(get_lesson_number("14:00-14:45", Shift::I), 8);
        assert_eq!(get_lesson_number("19:10-19:55", Shift::II), 7);
        assert_eq!(resolve_lesson_number("09:45-10:30", Shift::I), Resolution::Exact(3));
    }

    #[test]
    fn start_inside_a_period() {
        assert_eq!(resolve_lesson_number("08:05-08:50", Shift::I), Resolution::Contained(1));
        assert_eq!(resolve_lesson_number("15:00-15:45", Shift::II), Resolution::Contained(2));
    }

    #[test]
    fn coarse_guess_between_periods() {
        // 09:40 falls in the break after period 2
        assert_eq!(resolve_lesson_number("09:40-10:25", Shift::I), Resolution::Estimated(2));
        assert_eq!(resolve_lesson_number("07:30-08:15", Shift::I), Resolution::Estimated(1));
        assert_eq!(resolve_lesson_number("13:00-13:45", Shift::II), Resolution::Estimated(1));
        assert_eq!(resolve_lesson_number("14:50-15:35", Shift::I), Resolution::Estimated(8));
    }

    #[test]
    fn guesses_never_decrease() {
        let mut previous = 0;
        for minute in (7 * 60..=14 * 60 + 59).step_by(5) {
            let time = format!("{:02}:{:02}-23:59", minute / 60, minute % 60);
            let n = get_lesson_number(&time, Shift::I);
            assert!(n >= previous, "ordinal went down at {}", time);
            previous = n;
        }
    }

    #[test]
    fn unresolved_cases() {
        assert_eq!(get_lesson_number("бірінші", Shift::I), 0);
        assert_eq!(get_lesson_number("16:00-16:45", Shift::I), 0);
        assert_eq!(get_lesson_number("20:30-21:15", Shift::II), 0);
    }
}
