use chrono::{Local, NaiveDateTime};

/// The formats offered by the Date and Time dialog, in display order.
const FORMATS: [&str; 10] = [
    "%-m/%-d/%Y",
    "%A, %B %-d, %Y",
    "%B %-d, %Y",
    "%b %-d, %Y",
    "%m/%d/%Y",
    "%-I:%M:%S %p",
    "%I:%M %p",
    "%H:%M:%S",
    "%-m/%-d/%Y, %-I:%M:%S %p",
    "%A, %B %-d, %Y at %I:%M %p",
];

pub fn date_time_formats(at: &NaiveDateTime) -> Vec<String> {
    FORMATS
        .iter()
        .map(|format| at.format(format).to_string())
        .collect()
}

pub fn date_time_formats_now() -> Vec<String> {
    date_time_formats(&Local::now().naive_local())
}
