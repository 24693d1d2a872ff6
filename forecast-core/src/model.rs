use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ForecastError;
use crate::icon;

/// Which forecast endpoint a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Horizon {
    Daily5,
    Hourly12,
}

impl Horizon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Horizon::Daily5 => "daily",
            Horizon::Hourly12 => "hourly",
        }
    }

    /// Path segment under `/forecasts/v1/`.
    pub fn path_segment(&self) -> &'static str {
        match self {
            Horizon::Daily5 => "daily/5day",
            Horizon::Hourly12 => "hourly/12hour",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            Horizon::Daily5 => "Failed to fetch weather data",
            Horizon::Hourly12 => "Failed to fetch hourly data",
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Location key and API key, both guaranteed non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    location_key: String,
    api_key: String,
}

impl Credentials {
    pub fn new(
        location_key: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ForecastError> {
        let location_key = location_key.into();
        let api_key = api_key.into();

        if location_key.trim().is_empty() {
            return Err(ForecastError::MissingCredential("location key"));
        }
        if api_key.trim().is_empty() {
            return Err(ForecastError::MissingCredential("API key"));
        }

        Ok(Self { location_key, api_key })
    }

    pub fn location_key(&self) -> &str {
        &self.location_key
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

// The API key stays out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("location_key", &self.location_key)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[derive(Clone)]
pub struct ForecastRequest {
    pub location_key: String,
    pub api_key: String,
    pub horizon: Horizon,
}

impl fmt::Debug for ForecastRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForecastRequest")
            .field("location_key", &self.location_key)
            .field("api_key", &"<redacted>")
            .field("horizon", &self.horizon)
            .finish()
    }
}

impl ForecastRequest {
    pub fn new(credentials: &Credentials, horizon: Horizon) -> Self {
        Self {
            location_key: credentials.location_key().to_owned(),
            api_key: credentials.api_key().to_owned(),
            horizon,
        }
    }

    /// Endpoint URL without the query string.
    pub fn endpoint(&self, base_url: &str) -> String {
        format!(
            "{}/forecasts/v1/{}/{}",
            base_url.trim_end_matches('/'),
            self.horizon.path_segment(),
            self.location_key
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub value: f64,
    pub unit: String,
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°{}", self.value, self.unit)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    pub text: String,
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastDay {
    pub date: DateTime<FixedOffset>,
    pub min_temp: Temperature,
    pub max_temp: Temperature,
    pub icon_code: u32,
    pub icon_phrase: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub headline: Option<Headline>,
    pub days: Vec<DailyForecastDay>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrecipIntensity {
    Light,
    Moderate,
    Heavy,
    Other(String),
}

impl PrecipIntensity {
    /// Case-insensitive parse. Empty input means no intensity was reported.
    pub fn parse(raw: &str) -> Option<Self> {
        let lower = raw.to_lowercase();

        match lower.as_str() {
            "" => None,
            "light" => Some(PrecipIntensity::Light),
            "moderate" => Some(PrecipIntensity::Moderate),
            "heavy" => Some(PrecipIntensity::Heavy),
            _ => Some(PrecipIntensity::Other(lower)),
        }
    }

    /// Short display code, e.g. `hvy`.
    pub fn label(&self) -> &str {
        match self {
            PrecipIntensity::Light => "lite",
            PrecipIntensity::Moderate => "mod",
            PrecipIntensity::Heavy => "hvy",
            PrecipIntensity::Other(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecastSlot {
    pub date_time: DateTime<FixedOffset>,
    pub temp: Temperature,
    pub icon_code: Option<u32>,
    pub icon_phrase: String,
    pub has_precipitation: bool,
    pub precip_probability: f64,
    pub precip_intensity: Option<PrecipIntensity>,
}

impl HourlyForecastSlot {
    pub fn icon_url(&self) -> Option<String> {
        self.icon_code.map(icon::icon_url)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub slots: Vec<HourlyForecastSlot>,
}
