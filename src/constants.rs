use std::time::Duration;

/// User agent string for HTTP requests
pub const USER_AGENT: &str = "weather-app/1.0";

/// Media type requested from the NWS API
pub const ACCEPT_GEO_JSON: &str = "application/geo+json";

/// National Weather Service API base URL
pub const NWS_API_BASE: &str = "https://api.weather.gov";

/// Upper bound for a single outbound request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Number of forecast periods rendered by `get_forecast`
pub const FORECAST_PERIOD_LIMIT: usize = 5;

/// Separator placed between rendered alert or forecast blocks
pub const BLOCK_SEPARATOR: &str = "\n---\n";

pub const ALERTS_UNAVAILABLE: &str = "Unable to fetch alerts or no alerts found.";
pub const NO_ACTIVE_ALERTS: &str = "No active alerts for this state.";
pub const POINTS_UNAVAILABLE: &str = "Unable to fetch forecast data for this location.";
pub const FORECAST_UNAVAILABLE: &str = "Unable to fetch detailed forecast.";
pub const TERM_NOT_FOUND: &str = "Term not found in glossary";

/// URI of the whole-glossary resource
pub const GLOSSARY_URI: &str = "resource://weather_glossary/";

/// Prefix of the per-term glossary resource; the encoded term follows it
pub const GLOSSARY_TERM_URI_PREFIX: &str = "resource://weather_glossary_term/";

/// RFC 6570 template advertised for the per-term resource
pub const GLOSSARY_TERM_URI_TEMPLATE: &str = "resource://weather_glossary_term/{word}";
