//! Text rendering of the dashboard.
//!
//! Layout: a current-conditions panel, an hourly strip centered on the
//! current hour, the windowed daily forecast list, and four summary cards
//! (sun times, max/min, rain/snow chance, wind).

use chrono::NaiveDateTime;
use skycast_core::format::{format_celsius, format_day_label, format_hour, format_temperature};
use skycast_core::state::current_hour_index;
use skycast_core::{Dashboard, ForecastDay, HourEntry, Units, WeatherSnapshot};

/// Rows shown in the hourly strip; the current hour sits in the middle.
const HOURLY_STRIP_ROWS: usize = 7;

pub fn render(dashboard: &Dashboard, now: NaiveDateTime) -> String {
    let state = dashboard.state();
    let mut out = String::new();

    out.push_str(&now.format("%a %b %-d %Y").to_string());
    out.push('\n');

    if state.loading {
        out.push_str("Loading...\n");
        return out;
    }

    let Some(bundle) = dashboard.live_bundle() else {
        out.push_str("No weather data. Search for a city to get started.\n");
        return out;
    };

    out.push('\n');
    out.push_str(&current_panel(&bundle.current, state.units));

    let theme = dashboard.current_theme();
    out.push_str(&format!("cue: {} · {} · {}\n", theme.icon, theme.audio, theme.background));

    if let Some(today) = bundle.days.first() {
        out.push('\n');
        out.push_str(&hourly_strip(&today.hours, now, state.units));
    } else {
        out.push_str(&current_only_line(&bundle.current));
    }

    let visible = dashboard.visible_forecast(now.date());
    if !visible.is_empty() {
        out.push('\n');
        out.push_str(&format!("forecasts ({} days)\n", visible.len()));
        for day in &visible {
            out.push_str(&daily_row(day, state.units));
        }
    }

    if let Some(today) = bundle.days.first() {
        out.push('\n');
        out.push_str(&summary_cards(today, &bundle.current, state.units));
    }

    out
}

fn current_panel(current: &WeatherSnapshot, units: Units) -> String {
    let mut out = String::new();

    out.push_str(&current.location_name);
    if !current.region.is_empty() || !current.country.is_empty() {
        let tail: Vec<&str> = [current.region.as_str(), current.country.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        out.push_str(&format!(" ({})", tail.join(", ")));
    }
    out.push('\n');

    out.push_str(&format!(
        "{}  {}  feels like {}\n",
        current.condition,
        format_temperature(&current.temperature, units),
        format_temperature(&current.feels_like, units),
    ));
    out.push_str(&format!(
        "humidity {}% · wind {:.0} km/h {}\n",
        current.humidity_pct, current.wind_kph, current.wind_dir,
    ));

    out
}

/// Current-only provider: no hourly or daily data; show the Kelvin-derived
/// temperatures at full precision instead.
fn current_only_line(current: &WeatherSnapshot) -> String {
    format!(
        "temp {} °C · feels like {} °C\n",
        format_celsius(current.temperature.celsius),
        format_celsius(current.feels_like.celsius),
    )
}

/// A window of `HOURLY_STRIP_ROWS` entries that keeps the current hour
/// centered in view.
fn hourly_strip(hours: &[HourEntry], now: NaiveDateTime, units: Units) -> String {
    if hours.is_empty() {
        return String::new();
    }

    let center = current_hour_index(hours, now);
    let (start, end) = strip_bounds(hours.len(), center, HOURLY_STRIP_ROWS);

    let mut out = String::from("hourly\n");
    for (idx, hour) in hours.iter().enumerate().take(end).skip(start) {
        let marker = if Some(idx) == center { '▶' } else { ' ' };
        out.push_str(&format!(
            "{marker} {:>8}  {:>5}  {}\n",
            format_hour(hour.time),
            format_temperature(&hour.temperature, units),
            hour.condition,
        ));
    }
    out
}

/// Clamp a `width`-row window around `center` into `0..len`.
fn strip_bounds(len: usize, center: Option<usize>, width: usize) -> (usize, usize) {
    let center = center.unwrap_or(0);
    let start = center.saturating_sub(width / 2);
    let end = (start + width).min(len);
    (end.saturating_sub(width).min(start), end)
}

fn daily_row(day: &ForecastDay, units: Units) -> String {
    format!(
        "  {:>2} {}  {:>5} / {:>5}  {}\n",
        day.date.format("%d"),
        format_day_label(day.date),
        format_temperature(&day.max_temp, units),
        format_temperature(&day.min_temp, units),
        day.condition,
    )
}

fn summary_cards(today: &ForecastDay, current: &WeatherSnapshot, units: Units) -> String {
    let mut out = String::new();
    out.push_str(&format!("sunrise & sunset  {} / {}\n", today.sunrise, today.sunset));
    out.push_str(&format!(
        "max & min         {} / {}\n",
        format_temperature(&today.max_temp, units),
        format_temperature(&today.min_temp, units),
    ));
    out.push_str(&format!(
        "rain & snow       {}% / {}% chance\n",
        today.rain_chance_pct, today.snow_chance_pct,
    ));
    out.push_str(&format!(
        "wind              {}° {}\n",
        current.wind_degree, current.wind_dir,
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycast_core::Temperature;
    use skycast_core::format::{parse_date, parse_datetime};

    fn hour(h: u32, temp_c: f64) -> HourEntry {
        HourEntry {
            time: parse_datetime(&format!("2024-01-01 {h:02}:00")).unwrap(),
            temperature: Temperature::from_celsius(temp_c),
            condition: "Clear".to_string(),
        }
    }

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            condition: "Haze".to_string(),
            temperature: Temperature::from_pair(30.2, 86.4),
            feels_like: Temperature::from_pair(35.0, 95.0),
            humidity_pct: 74,
            wind_kph: 22.0,
            wind_degree: 247,
            wind_dir: "WSW".to_string(),
            location_name: "Mumbai".to_string(),
            region: "Maharashtra".to_string(),
            country: "India".to_string(),
        }
    }

    fn forecast_day() -> ForecastDay {
        ForecastDay {
            date: parse_date("2024-01-01").unwrap(),
            min_temp: Temperature::from_pair(24.3, 75.7),
            max_temp: Temperature::from_pair(32.1, 89.8),
            condition: "Rain".to_string(),
            rain_chance_pct: 80,
            snow_chance_pct: 0,
            sunrise: "07:12 AM".to_string(),
            sunset: "06:05 PM".to_string(),
            hours: (0..24).map(|h| hour(h, 25.0)).collect(),
        }
    }

    #[test]
    fn strip_is_centered_on_the_current_hour() {
        let day = forecast_day();
        let now = parse_datetime("2024-01-01 14:30").unwrap();

        let strip = hourly_strip(&day.hours, now, Units::Celsius);
        let lines: Vec<&str> = strip.lines().collect();

        // header + seven rows, the middle one marked
        assert_eq!(lines.len(), 1 + HOURLY_STRIP_ROWS);
        assert!(lines[4].starts_with('▶'));
        assert!(lines[4].contains("2:00 PM"));
    }

    #[test]
    fn strip_clamps_at_the_edges() {
        let day = forecast_day();

        let early = parse_datetime("2024-01-01 00:10").unwrap();
        let strip = hourly_strip(&day.hours, early, Units::Celsius);
        assert!(strip.lines().nth(1).unwrap().starts_with('▶'));

        let late = parse_datetime("2024-01-01 23:59").unwrap();
        let strip = hourly_strip(&day.hours, late, Units::Celsius);
        assert!(strip.lines().last().unwrap().starts_with('▶'));
    }

    #[test]
    fn strip_bounds_stay_in_range() {
        assert_eq!(strip_bounds(24, Some(0), 7), (0, 7));
        assert_eq!(strip_bounds(24, Some(23), 7), (17, 24));
        assert_eq!(strip_bounds(3, Some(1), 7), (0, 3));
        assert_eq!(strip_bounds(24, None, 7), (0, 7));
    }

    #[test]
    fn current_panel_shows_both_unit_choices() {
        let snap = snapshot();

        let celsius = current_panel(&snap, Units::Celsius);
        assert!(celsius.contains("30°c"));
        assert!(celsius.contains("Mumbai (Maharashtra, India)"));

        let fahrenheit = current_panel(&snap, Units::Fahrenheit);
        assert!(fahrenheit.contains("86°f"));
    }

    #[test]
    fn daily_row_has_day_number_and_label() {
        let row = daily_row(&forecast_day(), Units::Celsius);
        assert!(row.contains("01 mon, jan"));
        assert!(row.contains("32°c"));
        assert!(row.contains("24°c"));
        assert!(row.contains("Rain"));
    }

    #[test]
    fn current_only_line_keeps_two_decimals() {
        let mut snap = snapshot();
        snap.temperature = Temperature::from_kelvin(300.15);
        snap.feels_like = Temperature::from_kelvin(302.65);

        let line = current_only_line(&snap);
        assert!(line.contains("temp 27.00 °C"));
        assert!(line.contains("feels like 29.50 °C"));
    }

    #[test]
    fn summary_cards_cover_all_four() {
        let cards = summary_cards(&forecast_day(), &snapshot(), Units::Celsius);
        assert!(cards.contains("07:12 AM / 06:05 PM"));
        assert!(cards.contains("32°c / 24°c"));
        assert!(cards.contains("80% / 0% chance"));
        assert!(cards.contains("247° WSW"));
    }
}
