//! Pure formatting and normalization helpers shared by the renderer.
//!
//! Date strings from the providers arrive in two field orders ("YYYY-MM-DD"
//! and "DD-MM-YYYY"); both are normalized to `NaiveDate` on ingest so nothing
//! downstream branches on string shape.

use chrono::{NaiveDate, NaiveDateTime};

use crate::model::{Temperature, Units};

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - 273.15
}

/// Two-decimal display for Kelvin-derived temperatures, e.g. "27.00".
pub fn format_celsius(celsius: f64) -> String {
    format!("{celsius:.2}")
}

/// Rounded integer display with unit suffix, e.g. "21°c" / "69°f".
pub fn format_temperature(temp: &Temperature, units: Units) -> String {
    format!("{}{}", temp.in_units(units).round() as i64, units.suffix())
}

/// Accepts the provider's "YYYY-MM-DD HH:MM" hourly stamps as well as
/// ISO-8601 "YYYY-MM-DDTHH:MM:SS".
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()
}

/// Accepts both "YYYY-MM-DD" and "DD-MM-YYYY". The year-first form is tried
/// first; a leading 2-digit segment cannot be a year there, so the orderings
/// never collide.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d-%m-%Y"))
        .ok()
}

/// 12-hour clock with AM/PM suffix, e.g. "2:30 PM".
pub fn format_hour(time: NaiveDateTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Lower-cased abbreviated weekday and month, e.g. "mon, jan".
pub fn format_day_label(date: NaiveDate) -> String {
    date.format("%a, %b").to_string().to_lowercase()
}

/// 16-point compass label for a wind degree.
pub fn degrees_to_compass(degrees: u16) -> &'static str {
    let idx = ((f64::from(degrees % 360) / 22.5).round() as usize) % COMPASS_POINTS.len();
    COMPASS_POINTS[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kelvin_conversion_displays_two_decimals() {
        assert_eq!(format_celsius(kelvin_to_celsius(300.15)), "27.00");
    }

    #[test]
    fn temperature_rounds_to_integer() {
        let t = Temperature::from_pair(20.6, 69.08);
        assert_eq!(format_temperature(&t, Units::Celsius), "21°c");
        assert_eq!(format_temperature(&t, Units::Fahrenheit), "69°f");
    }

    #[test]
    fn hour_formats_as_twelve_hour_clock() {
        let t = parse_datetime("2024-01-01T14:30:00").unwrap();
        assert_eq!(format_hour(t), "2:30 PM");

        let morning = parse_datetime("2024-01-01 09:05").unwrap();
        assert_eq!(format_hour(morning), "9:05 AM");
    }

    #[test]
    fn midnight_and_noon_edges() {
        assert_eq!(format_hour(parse_datetime("2024-01-01 00:00").unwrap()), "12:00 AM");
        assert_eq!(format_hour(parse_datetime("2024-01-01 12:00").unwrap()), "12:00 PM");
    }

    #[test]
    fn day_label_is_lowercased_abbreviations() {
        let date = parse_date("2024-01-01").unwrap();
        assert_eq!(format_day_label(date), "mon, jan");
    }

    #[test]
    fn both_date_orderings_normalize_to_the_same_day() {
        let year_first = parse_date("2024-03-05").unwrap();
        let day_first = parse_date("05-03-2024").unwrap();
        assert_eq!(year_first, day_first);
    }

    #[test]
    fn garbage_dates_are_rejected() {
        assert!(parse_date("yesterday").is_none());
        assert!(parse_datetime("soon").is_none());
    }

    #[test]
    fn compass_covers_the_full_circle() {
        assert_eq!(degrees_to_compass(0), "N");
        assert_eq!(degrees_to_compass(90), "E");
        assert_eq!(degrees_to_compass(180), "S");
        assert_eq!(degrees_to_compass(270), "W");
        assert_eq!(degrees_to_compass(247), "WSW");
        assert_eq!(degrees_to_compass(359), "N");
        assert_eq!(degrees_to_compass(360), "N");
    }
}
