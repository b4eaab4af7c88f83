//! Rendering a weather report as chat text
//!
//! Pure formatting, no I/O. The upstream API already returns values in
//! the requested unit system, so only the labels depend on it.

use domain::{UnitSystem, WeatherReport};

/// Render a report as the fixed four-line reply template
///
/// The emphasis tags are HTML; the chat layer is expected to render
/// with an HTML parse mode. Numbers are shown with one decimal place,
/// the stored values keep full precision.
#[must_use]
pub fn format_report(report: &WeatherReport, units: UnitSystem) -> String {
    format!(
        "<b>{city}</b>\n{description}\nTemperature: <b>{temp:.1} {t_unit}</b>\nWind: {wind:.1} {w_unit}",
        city = report.city,
        description = capitalize(&report.description),
        temp = report.temperature,
        t_unit = units.temperature_label(),
        wind = report.wind_speed,
        w_unit = units.wind_label(),
    )
}

/// Uppercase the first character, leave the rest unchanged
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> WeatherReport {
        WeatherReport::new("Moscow", "clear sky", 10.0, 5.0)
    }

    #[test]
    fn metric_report_uses_metric_labels() {
        let text = format_report(&sample_report(), UnitSystem::Metric);
        assert!(text.contains("Moscow"));
        assert!(text.contains("Clear sky"));
        assert!(text.contains("10.0 °C"));
        assert!(text.contains("5.0 m/s"));
    }

    #[test]
    fn imperial_report_uses_imperial_labels() {
        let text = format_report(&sample_report(), UnitSystem::Imperial);
        assert!(text.contains("°F"));
        assert!(text.contains("mph"));
        assert!(!text.contains("°C"));
    }

    #[test]
    fn template_is_stable() {
        let text = format_report(&sample_report(), UnitSystem::Metric);
        assert_eq!(
            text,
            "<b>Moscow</b>\nClear sky\nTemperature: <b>10.0 °C</b>\nWind: 5.0 m/s"
        );
    }

    #[test]
    fn values_round_to_one_decimal() {
        let report = WeatherReport::new("Berlin", "light rain", 14.25, 3.04);
        let text = format_report(&report, UnitSystem::Metric);
        assert!(text.contains("14.2") || text.contains("14.3")); // banker's vs half-up
        assert!(text.contains("3.0 m/s"));
    }

    #[test]
    fn empty_description_stays_empty() {
        let report = WeatherReport::new("Nowhere", "", 1.0, 0.0);
        let text = format_report(&report, UnitSystem::Metric);
        assert!(text.contains("<b>Nowhere</b>\n\nTemperature"));
    }

    #[test]
    fn capitalize_handles_non_ascii() {
        assert_eq!(capitalize("ясно"), "Ясно");
        assert_eq!(capitalize("clear sky"), "Clear sky");
    }
}
