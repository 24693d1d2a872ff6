use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use std::fmt::Debug;
use tracing::{debug, instrument, warn};

use crate::{
    Config,
    error::ForecastError,
    model::{
        Credentials, DailyForecast, DailyForecastDay, ForecastRequest, Headline, Horizon,
        HourlyForecast, HourlyForecastSlot, PrecipIntensity, Temperature,
    },
};

/// Source of the two forecast horizons rendered on the page.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn daily(&self) -> Result<DailyForecast, ForecastError>;

    async fn hourly(&self) -> Result<HourlyForecast, ForecastError>;
}

#[derive(Debug, Clone)]
pub struct AccuWeatherClient {
    credentials: Credentials,
    base_url: String,
    metric: bool,
    http: Client,
}

impl AccuWeatherClient {
    pub fn new(credentials: Credentials, base_url: impl Into<String>) -> Self {
        Self {
            credentials,
            base_url: base_url.into(),
            metric: false,
            http: Client::new(),
        }
    }

    /// Build a client from config; fails fast when a credential is missing.
    pub fn from_config(config: &Config) -> Result<Self, ForecastError> {
        let credentials = config.credentials()?;
        Ok(Self::new(credentials, config.base_url()).with_metric(config.metric))
    }

    pub fn with_metric(mut self, metric: bool) -> Self {
        self.metric = metric;
        self
    }

    #[instrument(skip(self), fields(location = %self.credentials.location_key()))]
    async fn fetch<T: DeserializeOwned>(&self, horizon: Horizon) -> Result<T, ForecastError> {
        let request = ForecastRequest::new(&self.credentials, horizon);
        let url = request.endpoint(&self.base_url);
        let metric = if self.metric { "true" } else { "false" };

        debug!(%url, metric, "requesting forecast");

        let res = self
            .http
            .get(&url)
            .query(&[("apikey", request.api_key.as_str()), ("metric", metric)])
            .send()
            .await
            .map_err(|e| ForecastError::Transport { horizon, source: e.without_url() })?;

        let status = res.status();
        if !status.is_success() {
            warn!(%status, "forecast request rejected");
            return Err(ForecastError::Fetch { horizon, status });
        }

        let body = res
            .text()
            .await
            .map_err(|e| ForecastError::Transport { horizon, source: e.without_url() })?;

        debug!(bytes = body.len(), "forecast response received");
        decode(horizon, &body)
    }
}

#[async_trait]
impl ForecastSource for AccuWeatherClient {
    async fn daily(&self) -> Result<DailyForecast, ForecastError> {
        let parsed: AwDailyResponse = self.fetch(Horizon::Daily5).await?;
        Ok(parsed.into())
    }

    async fn hourly(&self) -> Result<HourlyForecast, ForecastError> {
        let parsed: Vec<AwHour> = self.fetch(Horizon::Hourly12).await?;
        Ok(HourlyForecast {
            slots: parsed.into_iter().map(HourlyForecastSlot::from).collect(),
        })
    }
}

/// Syntax errors and shape mismatches are reported separately.
fn decode<T: DeserializeOwned>(horizon: Horizon, body: &str) -> Result<T, ForecastError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|source| ForecastError::Parse { horizon, source })?;

    serde_json::from_value(value).map_err(|source| ForecastError::Schema { horizon, source })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AwTemperature {
    value: f64,
    unit: String,
}

impl From<AwTemperature> for Temperature {
    fn from(t: AwTemperature) -> Self {
        Temperature { value: t.value, unit: t.unit }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AwHeadline {
    text: String,
    link: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AwMinMax {
    minimum: AwTemperature,
    maximum: AwTemperature,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AwDayPart {
    icon: u32,
    icon_phrase: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AwDay {
    date: DateTime<FixedOffset>,
    temperature: AwMinMax,
    day: AwDayPart,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AwDailyResponse {
    headline: Option<AwHeadline>,
    daily_forecasts: Vec<AwDay>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AwHour {
    date_time: DateTime<FixedOffset>,
    temperature: AwTemperature,
    icon_phrase: String,
    weather_icon: Option<u32>,
    has_precipitation: bool,
    precipitation_probability: f64,
    precipitation_intensity: Option<String>,
}

impl From<AwDailyResponse> for DailyForecast {
    fn from(res: AwDailyResponse) -> Self {
        DailyForecast {
            headline: res.headline.map(|h| Headline { text: h.text, link: h.link }),
            days: res
                .daily_forecasts
                .into_iter()
                .map(|d| DailyForecastDay {
                    date: d.date,
                    min_temp: d.temperature.minimum.into(),
                    max_temp: d.temperature.maximum.into(),
                    icon_code: d.day.icon,
                    icon_phrase: d.day.icon_phrase,
                })
                .collect(),
        }
    }
}

impl From<AwHour> for HourlyForecastSlot {
    fn from(h: AwHour) -> Self {
        HourlyForecastSlot {
            date_time: h.date_time,
            temp: h.temperature.into(),
            icon_code: h.weather_icon,
            icon_phrase: h.icon_phrase,
            has_precipitation: h.has_precipitation,
            precip_probability: h.precipitation_probability,
            precip_intensity: h.precipitation_intensity.as_deref().and_then(PrecipIntensity::parse),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAILY: &str = r#"{
        "Headline": { "Text": "Mild through the weekend", "Link": "http://www.accuweather.com/en/us/x" },
        "DailyForecasts": [
            {
                "Date": "2024-01-17T07:00:00-05:00",
                "Temperature": {
                    "Minimum": { "Value": 28.0, "Unit": "F", "UnitType": 18 },
                    "Maximum": { "Value": 41.0, "Unit": "F", "UnitType": 18 }
                },
                "Day": { "Icon": 3, "IconPhrase": "Partly sunny", "HasPrecipitation": false }
            }
        ]
    }"#;

    const HOURLY: &str = r#"[
        {
            "DateTime": "2024-01-17T14:00:00-05:00",
            "WeatherIcon": 12,
            "IconPhrase": "Showers",
            "HasPrecipitation": true,
            "PrecipitationType": "Rain",
            "PrecipitationIntensity": "Moderate",
            "PrecipitationProbability": 62,
            "Temperature": { "Value": 39.0, "Unit": "F", "UnitType": 18 }
        },
        {
            "DateTime": "2024-01-17T15:00:00-05:00",
            "IconPhrase": "Cloudy",
            "HasPrecipitation": false,
            "PrecipitationProbability": 20,
            "Temperature": { "Value": 38.0, "Unit": "F", "UnitType": 18 }
        }
    ]"#;

    #[test]
    fn decodes_daily_response() {
        let parsed: AwDailyResponse = decode(Horizon::Daily5, DAILY).expect("valid daily");
        let forecast = DailyForecast::from(parsed);

        assert_eq!(forecast.days.len(), 1);
        let day = &forecast.days[0];
        assert_eq!(day.icon_code, 3);
        assert_eq!(day.icon_phrase, "Partly sunny");
        assert_eq!(day.min_temp.to_string(), "28°F");
        assert_eq!(day.max_temp.value, 41.0);
        assert_eq!(
            forecast.headline.and_then(|h| h.link).as_deref(),
            Some("http://www.accuweather.com/en/us/x")
        );
    }

    #[test]
    fn decodes_hourly_with_optional_fields_absent() {
        let parsed: Vec<AwHour> = decode(Horizon::Hourly12, HOURLY).expect("valid hourly");
        let slots: Vec<HourlyForecastSlot> = parsed.into_iter().map(Into::into).collect();

        assert_eq!(slots[0].icon_code, Some(12));
        assert_eq!(slots[0].precip_intensity, Some(PrecipIntensity::Moderate));
        assert_eq!(slots[0].precip_probability, 62.0);

        assert_eq!(slots[1].icon_code, None);
        assert_eq!(slots[1].icon_url(), None);
        assert_eq!(slots[1].precip_intensity, None);
    }

    #[test]
    fn non_json_body_is_parse_error() {
        let err = decode::<AwDailyResponse>(Horizon::Daily5, "<html>oops</html>").unwrap_err();
        assert!(matches!(err, ForecastError::Parse { horizon: Horizon::Daily5, .. }));
    }

    #[test]
    fn wrong_shape_is_schema_error() {
        let err = decode::<AwDailyResponse>(Horizon::Daily5, r#"{"Code":"Unauthorized"}"#)
            .unwrap_err();
        assert!(matches!(err, ForecastError::Schema { horizon: Horizon::Daily5, .. }));

        let err = decode::<Vec<AwHour>>(Horizon::Hourly12, DAILY).unwrap_err();
        assert!(matches!(err, ForecastError::Schema { horizon: Horizon::Hourly12, .. }));
    }

    #[test]
    fn from_config_rejects_missing_credentials() {
        let err = AccuWeatherClient::from_config(&Config::default()).unwrap_err();
        assert!(matches!(err, ForecastError::MissingCredential(_)));
    }

    #[test]
    fn from_config_works_when_configured() {
        let mut cfg = Config::default();
        cfg.set_credentials("349727".into(), "KEY".into());
        cfg.metric = true;

        let client = AccuWeatherClient::from_config(&cfg).expect("configured");
        assert!(client.metric);
        assert_eq!(client.base_url, crate::config::DEFAULT_BASE_URL);
    }
}
