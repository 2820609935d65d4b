use chrono::{Datelike, Local};
use std::path::PathBuf;

/// Generate default chart filename with format: wind-rose-{YYMMDD}.png
pub fn generate_default_chart_filename() -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    let month = now.month();
    let day = now.day();

    let filename = format!("wind-rose-{:02}{:02}{:02}.png", year, month, day);
    PathBuf::from("output").join(filename)
}
