// Runtime configuration: `.env` first, then process environment.

use log::warn;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::excel::time::{DEFAULT_BARE_HOUR_MINUTES, DEFAULT_LESSON_MINUTES};
use crate::excel::{ParserOptions, ShiftStrategy, TimeOptions};

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_DB_PATH: &str = "data/schoolhub.db";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8080";
const MAX_LESSON_MINUTES: u32 = 24 * 60;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind: String,
    pub db_path: PathBuf,
    pub max_upload_bytes: usize,
    pub allowed_origin: String,
    pub parser: ParserOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            bind: DEFAULT_BIND.to_string(),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            parser: ParserOptions::default(),
        }
    }
}

fn load_dotenv() {
    let _ = dotenv::dotenv();
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Parses `value`, falling back to `default` (with a warning) when it is
/// present but invalid.
fn parsed_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> T {
    match non_empty(value) {
        Some(raw) => match raw.parse() {
            Ok(v) => v,
            Err(_) => {
                warn!("{}: invalid value '{}', using the default", key, raw);
                default
            }
        },
        None => default,
    }
}

/// Lesson lengths longer than a day are rejected like unparseable ones.
fn minutes_or(key: &str, value: Option<String>, default: u32) -> u32 {
    let minutes = parsed_or(key, value, default);
    if minutes > MAX_LESSON_MINUTES {
        warn!("{}: {} minutes is longer than a day, using the default", key, minutes);
        return default;
    }
    minutes
}

fn parse_flag(key: &str, value: Option<String>) -> bool {
    match non_empty(value).map(|v| v.to_lowercase()) {
        None => false,
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => {
                warn!("{}: invalid flag '{}', using false", key, v);
                false
            }
        },
    }
}

impl AppConfig {
    /// Reads `SCHOOLHUB_*` variables (after loading `.env`, if present).
    pub fn from_env() -> Self {
        load_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let shift_strategy = match non_empty(lookup("SCHOOLHUB_SHIFT_STRATEGY")) {
            Some(raw) => ShiftStrategy::parse(&raw).unwrap_or_else(|| {
                warn!("SCHOOLHUB_SHIFT_STRATEGY: unknown strategy '{}', using sheet-name", raw);
                ShiftStrategy::SheetName
            }),
            None => ShiftStrategy::SheetName,
        };

        let parser = ParserOptions {
            time: TimeOptions {
                lesson_minutes: minutes_or(
                    "SCHOOLHUB_LESSON_MINUTES",
                    lookup("SCHOOLHUB_LESSON_MINUTES"),
                    DEFAULT_LESSON_MINUTES,
                ),
                bare_hour_minutes: minutes_or(
                    "SCHOOLHUB_BARE_HOUR_MINUTES",
                    lookup("SCHOOLHUB_BARE_HOUR_MINUTES"),
                    DEFAULT_BARE_HOUR_MINUTES,
                ),
            },
            shift_strategy,
            lessons_on_weekday_row: parse_flag(
                "SCHOOLHUB_LESSONS_ON_WEEKDAY_ROW",
                lookup("SCHOOLHUB_LESSONS_ON_WEEKDAY_ROW"),
            ),
            only_sheet: None,
        };

        AppConfig {
            bind: non_empty(lookup("SCHOOLHUB_BIND")).unwrap_or(defaults.bind),
            db_path: non_empty(lookup("SCHOOLHUB_DB_PATH"))
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            max_upload_bytes: parsed_or(
                "SCHOOLHUB_MAX_UPLOAD_BYTES",
                lookup("SCHOOLHUB_MAX_UPLOAD_BYTES"),
                defaults.max_upload_bytes,
            ),
            allowed_origin: non_empty(lookup("SCHOOLHUB_ALLOWED_ORIGIN"))
                .unwrap_or(defaults.allowed_origin),
            parser,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_without_variables() {
        assert_eq!(config(&[]), AppConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let cfg = config(&[
            ("SCHOOLHUB_BIND", "0.0.0.0:9000"),
            ("SCHOOLHUB_DB_PATH", ":memory:"),
            ("SCHOOLHUB_MAX_UPLOAD_BYTES", "1024"),
            ("SCHOOLHUB_ALLOWED_ORIGIN", "https://mektep.kz"),
            ("SCHOOLHUB_LESSON_MINUTES", "40"),
            ("SCHOOLHUB_BARE_HOUR_MINUTES", "45"),
            ("SCHOOLHUB_SHIFT_STRATEGY", "sheet-name-then-time"),
            ("SCHOOLHUB_LESSONS_ON_WEEKDAY_ROW", "true"),
        ]);
        assert_eq!(cfg.bind, "0.0.0.0:9000");
        assert_eq!(cfg.db_path, PathBuf::from(":memory:"));
        assert_eq!(cfg.max_upload_bytes, 1024);
        assert_eq!(cfg.allowed_origin, "https://mektep.kz");
        assert_eq!(cfg.parser.time, TimeOptions { lesson_minutes: 40, bare_hour_minutes: 45 });
        assert_eq!(cfg.parser.shift_strategy, ShiftStrategy::SheetNameThenTime);
        assert!(cfg.parser.lessons_on_weekday_row);
    }

    #[test]
    fn invalid_values_fall_back() {
        let cfg = config(&[
            ("SCHOOLHUB_MAX_UPLOAD_BYTES", "ten megs"),
            ("SCHOOLHUB_LESSON_MINUTES", "-5"),
            ("SCHOOLHUB_SHIFT_STRATEGY", "moon-phase"),
            ("SCHOOLHUB_LESSONS_ON_WEEKDAY_ROW", "maybe"),
        ]);
        assert_eq!(cfg.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(cfg.parser.time.lesson_minutes, DEFAULT_LESSON_MINUTES);
        assert_eq!(cfg.parser.shift_strategy, ShiftStrategy::SheetName);
        assert!(!cfg.parser.lessons_on_weekday_row);
    }

    #[test]
    fn lesson_lengths_are_bounded() {
        let cfg = config(&[
            ("SCHOOLHUB_LESSON_MINUTES", "4294967295"),
            ("SCHOOLHUB_BARE_HOUR_MINUTES", "1440"),
        ]);
        assert_eq!(cfg.parser.time.lesson_minutes, DEFAULT_LESSON_MINUTES);
        assert_eq!(cfg.parser.time.bare_hour_minutes, 1440);
    }
}
