use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ============================================================================
// National Weather Service API Models
// ============================================================================
//
// Upstream payloads are read defensively: every field is optional, and a
// field of the wrong type decodes as absent instead of failing its entry.

#[derive(Debug, Default, Deserialize)]
pub struct AlertFeature {
    #[serde(default, deserialize_with = "lenient")]
    pub properties: Option<AlertProperties>,
}

impl AlertFeature {
    /// Decodes one entry of `features`; a non-object entry yields defaults.
    pub fn from_entry(entry: &Value) -> Self {
        Self::deserialize(entry).unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertProperties {
    #[serde(default, deserialize_with = "lenient")]
    pub event: Option<String>,
    #[serde(rename = "areaDesc", default, deserialize_with = "lenient")]
    pub area_desc: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub severity: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub instruction: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastPeriod {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    /// Usually an integer; newer NWS payloads may send a quantitative value
    /// object instead.
    #[serde(default)]
    pub temperature: Option<Value>,
    #[serde(rename = "temperatureUnit", default, deserialize_with = "lenient")]
    pub temperature_unit: Option<String>,
    /// A string such as "10 mph", or a quantitative value object.
    #[serde(rename = "windSpeed", default)]
    pub wind_speed: Option<Value>,
    #[serde(rename = "windDirection", default, deserialize_with = "lenient")]
    pub wind_direction: Option<String>,
    #[serde(rename = "detailedForecast", default, deserialize_with = "lenient")]
    pub detailed_forecast: Option<String>,
}

impl ForecastPeriod {
    /// Decodes one entry of `periods`; a non-object entry yields defaults.
    pub fn from_entry(entry: &Value) -> Self {
        Self::deserialize(entry).unwrap_or_default()
    }
}

/// Decodes a field as `T`, treating null or a mistyped value as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetAlertsRequest {
    /// Two-letter US state code (e.g. CA, NY)
    pub state: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetForecastRequest {
    /// Latitude of the location
    pub latitude: f64,
    /// Longitude of the location
    pub longitude: f64,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct AddNumbersRequest {
    pub a: i64,
    pub b: i64,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GreetRequest {
    /// The name of the person to greet
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GreetPromptArgs {
    /// The name of the user to greet
    pub name: String,
}
