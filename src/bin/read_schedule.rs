// Dumps the lessons parsed from a timetable workbook as JSON.
//
// Usage: read_schedule <path> [sheet]

use log::{error, info};
use std::env;
use std::process::ExitCode;

use schoolhub::excel::read_workbook_from_path;
use schoolhub::{ParserOptions, ScheduleParser};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let path = match args.next() {
        Some(p) => p,
        None => {
            eprintln!("usage: read_schedule <path> [sheet]");
            return ExitCode::from(2);
        }
    };
    let only_sheet = args.next();

    let workbook = match read_workbook_from_path(&path) {
        Ok(w) => w,
        Err(e) => {
            error!("{}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };
    info!("sheets in {}: {:?}", path, workbook.sheet_names());

    let parser = ScheduleParser::new(ParserOptions { only_sheet, ..ParserOptions::default() });
    let report = match parser.parse_workbook(&workbook) {
        Ok(r) => r,
        Err(e) => {
            error!("{}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&report) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("failed to serialise report: {}", e);
            ExitCode::FAILURE
        }
    }
}
