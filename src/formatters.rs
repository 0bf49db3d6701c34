use serde_json::Value;

use crate::constants::{
    ALERTS_UNAVAILABLE, BLOCK_SEPARATOR, FORECAST_PERIOD_LIMIT, NO_ACTIVE_ALERTS,
};
use crate::models::{AlertFeature, AlertProperties, ForecastPeriod};

const UNKNOWN: &str = "Unknown";

/// Formats an alerts payload into a human-readable string
pub fn format_alerts(payload: Option<&Value>) -> String {
    let Some(features) = payload.and_then(|data| data.get("features")) else {
        return ALERTS_UNAVAILABLE.to_string();
    };

    match features {
        // A present but null list reads as "nothing active", like an empty one.
        Value::Null => NO_ACTIVE_ALERTS.to_string(),
        Value::Array(entries) if entries.is_empty() => NO_ACTIVE_ALERTS.to_string(),
        Value::Array(entries) => entries
            .iter()
            .map(AlertFeature::from_entry)
            .map(|feature| format_alert(&feature))
            .collect::<Vec<_>>()
            .join(BLOCK_SEPARATOR),
        _ => ALERTS_UNAVAILABLE.to_string(),
    }
}

/// Formats a single alert feature, defaulting every missing field
pub fn format_alert(feature: &AlertFeature) -> String {
    let defaults = AlertProperties::default();
    let props = feature.properties.as_ref().unwrap_or(&defaults);
    format!(
        "Event: {}\nArea: {}\nSeverity: {}\nDescription: {}\nInstructions: {}",
        props.event.as_deref().unwrap_or(UNKNOWN),
        props.area_desc.as_deref().unwrap_or(UNKNOWN),
        props.severity.as_deref().unwrap_or(UNKNOWN),
        props
            .description
            .as_deref()
            .unwrap_or("No description available"),
        props
            .instruction
            .as_deref()
            .unwrap_or("No specific instructions provided"),
    )
}

/// Extracts `properties.forecast` from a points payload
pub fn forecast_url(points: &Value) -> Option<String> {
    points
        .get("properties")?
        .get("forecast")?
        .as_str()
        .map(str::to_string)
}

/// Formats the first few periods of a forecast payload.
///
/// Returns `None` when the payload carries no `properties.periods` list.
pub fn format_forecast(forecast: &Value) -> Option<String> {
    let periods = forecast.get("properties")?.get("periods")?.as_array()?;

    Some(
        periods
            .iter()
            .take(FORECAST_PERIOD_LIMIT)
            .map(ForecastPeriod::from_entry)
            .map(|period| format_period(&period))
            .collect::<Vec<_>>()
            .join(BLOCK_SEPARATOR),
    )
}

/// Formats one forecast period, defaulting every missing field
pub fn format_period(period: &ForecastPeriod) -> String {
    format!(
        "{}:\nTemperature: {}\nWind: {}\nForecast: {}",
        period.name.as_deref().unwrap_or(UNKNOWN),
        temperature_text(period),
        wind_text(period),
        period
            .detailed_forecast
            .as_deref()
            .unwrap_or("No detailed forecast available"),
    )
}

fn temperature_text(period: &ForecastPeriod) -> String {
    let Some(temperature) = period.temperature.as_ref().and_then(scalar_text) else {
        return UNKNOWN.to_string();
    };
    match period.temperature_unit.as_deref() {
        Some(unit) => format!("{}\u{00b0}{}", temperature, unit),
        None => temperature,
    }
}

fn wind_text(period: &ForecastPeriod) -> String {
    let parts: Vec<String> = [
        period.wind_speed.as_ref().and_then(scalar_text),
        period.wind_direction.clone(),
    ]
    .into_iter()
    .flatten()
    .collect();
    if parts.is_empty() {
        UNKNOWN.to_string()
    } else {
        parts.join(" ")
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        // {"unitCode": "wmoUnit:degF", "value": 72}
        Value::Object(map) => map.get("value").and_then(scalar_text),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn period(name: &str) -> Value {
        json!({
            "name": name,
            "temperature": 72,
            "temperatureUnit": "F",
            "windSpeed": "10 mph",
            "windDirection": "SW",
            "detailedForecast": "Sunny, with a high near 72."
        })
    }

    fn forecast_with(count: usize) -> Value {
        let periods: Vec<Value> = (0..count).map(|i| period(&format!("Period {i}"))).collect();
        json!({ "properties": { "periods": periods } })
    }

    #[test]
    fn alerts_unavailable_without_payload_or_features() {
        assert_eq!(format_alerts(None), ALERTS_UNAVAILABLE);
        assert_eq!(format_alerts(Some(&json!({}))), ALERTS_UNAVAILABLE);
        assert_eq!(format_alerts(Some(&json!({"type": "FeatureCollection"}))), ALERTS_UNAVAILABLE);
    }

    #[test]
    fn empty_feature_list_means_no_active_alerts() {
        assert_eq!(format_alerts(Some(&json!({"features": []}))), NO_ACTIVE_ALERTS);
    }

    #[test]
    fn alerts_render_in_order_with_separator() {
        let payload = json!({
            "features": [
                {"properties": {
                    "event": "Flood Warning",
                    "areaDesc": "Sacramento",
                    "severity": "Severe",
                    "description": "River flooding.",
                    "instruction": "Move to higher ground."
                }},
                {"properties": {"event": "Heat Advisory"}}
            ]
        });

        let text = format_alerts(Some(&payload));
        let blocks: Vec<&str> = text.split("\n---\n").collect();
        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[0],
            "Event: Flood Warning\nArea: Sacramento\nSeverity: Severe\n\
             Description: River flooding.\nInstructions: Move to higher ground."
        );
        assert_eq!(
            blocks[1],
            "Event: Heat Advisory\nArea: Unknown\nSeverity: Unknown\n\
             Description: No description available\nInstructions: No specific instructions provided"
        );
    }

    #[test]
    fn alert_without_properties_is_fully_defaulted() {
        let text = format_alerts(Some(&json!({"features": [{}]})));
        assert!(text.starts_with("Event: Unknown\nArea: Unknown\nSeverity: Unknown"));
    }

    #[test]
    fn forecast_url_reads_nested_path() {
        let points = json!({"properties": {"forecast": "https://api.weather.gov/gridpoints/TOP/31,80/forecast"}});
        assert_eq!(
            forecast_url(&points).as_deref(),
            Some("https://api.weather.gov/gridpoints/TOP/31,80/forecast")
        );
        assert_eq!(forecast_url(&json!({"properties": {}})), None);
        assert_eq!(forecast_url(&json!({})), None);
    }

    #[test]
    fn forecast_is_truncated_to_five_periods() {
        let text = format_forecast(&forecast_with(14)).unwrap();
        assert_eq!(text.split("\n---\n").count(), 5);
        assert!(text.contains("Period 4:"));
        assert!(!text.contains("Period 5:"));
    }

    #[test]
    fn short_forecast_renders_every_period() {
        let text = format_forecast(&forecast_with(3)).unwrap();
        assert_eq!(text.split("\n---\n").count(), 3);
        assert_eq!(format_forecast(&forecast_with(0)).as_deref(), Some(""));
    }

    #[test]
    fn forecast_without_periods_is_none() {
        assert_eq!(format_forecast(&json!({"properties": {}})), None);
        assert_eq!(format_forecast(&json!({})), None);
    }

    #[test]
    fn period_block_layout() {
        let p = ForecastPeriod::from_entry(&period("Tonight"));
        assert_eq!(
            format_period(&p),
            "Tonight:\nTemperature: 72\u{00b0}F\nWind: 10 mph SW\nForecast: Sunny, with a high near 72."
        );
    }

    #[test]
    fn period_fields_are_defaulted() {
        let text = format_period(&ForecastPeriod::default());
        assert_eq!(
            text,
            "Unknown:\nTemperature: Unknown\nWind: Unknown\nForecast: No detailed forecast available"
        );
    }

    #[test]
    fn quantitative_temperature_is_unwrapped() {
        let p = ForecastPeriod::from_entry(&json!({
            "name": "Today",
            "temperature": {"unitCode": "wmoUnit:degC", "value": 21.5},
            "temperatureUnit": "C"
        }));
        assert!(format_period(&p).contains("Temperature: 21.5\u{00b0}C"));
    }

    #[test]
    fn quantitative_wind_speed_keeps_the_forecast() {
        let mut first = period("Today");
        first["windSpeed"] = json!({"unitCode": "wmoUnit:km_h-1", "value": 16});
        let forecast = json!({"properties": {"periods": [first, period("Tonight")]}});

        let text = format_forecast(&forecast).unwrap();
        let blocks: Vec<&str> = text.split("\n---\n").collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].contains("Wind: 16 SW"));
        assert!(blocks[1].starts_with("Tonight:"));
    }

    #[test]
    fn mistyped_period_fields_are_defaulted() {
        let forecast = json!({"properties": {"periods": [
            {"name": 7, "temperature": null, "detailedForecast": ["a", "b"]},
            "not a period",
            period("Tonight")
        ]}});

        let text = format_forecast(&forecast).unwrap();
        let blocks: Vec<&str> = text.split("\n---\n").collect();
        assert_eq!(blocks.len(), 3);
        assert_eq!(
            blocks[0],
            "Unknown:\nTemperature: Unknown\nWind: Unknown\nForecast: No detailed forecast available"
        );
        assert!(blocks[1].starts_with("Unknown:"));
        assert!(blocks[2].starts_with("Tonight:"));
    }

    #[test]
    fn malformed_alert_entries_do_not_hide_the_others() {
        let payload = json!({
            "features": [
                {"properties": {"event": "Flood Warning"}},
                {"properties": null},
                {"properties": {"event": "Wind Advisory", "description": ["multi", "part"]}}
            ]
        });

        let text = format_alerts(Some(&payload));
        let blocks: Vec<&str> = text.split("\n---\n").collect();
        assert_eq!(blocks.len(), 3);
        assert!(blocks[0].starts_with("Event: Flood Warning"));
        assert!(blocks[1].starts_with("Event: Unknown"));
        assert!(blocks[2].starts_with("Event: Wind Advisory"));
        assert!(blocks[2].contains("Description: No description available"));
    }

    #[test]
    fn null_feature_list_means_no_active_alerts() {
        assert_eq!(format_alerts(Some(&json!({"features": null}))), NO_ACTIVE_ALERTS);
        assert_eq!(format_alerts(Some(&json!({"features": "oops"}))), ALERTS_UNAVAILABLE);
    }
}
