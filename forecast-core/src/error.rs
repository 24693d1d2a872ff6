use reqwest::StatusCode;
use thiserror::Error;

use crate::model::Horizon;

/// Errors produced while building a client or fetching a forecast.
///
/// `Display` carries the detailed message meant for logs. The text shown on
/// the page comes from [`ForecastError::user_message`].
#[derive(Debug, Error)]
pub enum ForecastError {
    /// A credential was absent or empty when the client was constructed.
    #[error("Missing {0}.\nHint: run `forecast configure` or set the matching ACCUWEATHER_* variable.")]
    MissingCredential(&'static str),

    /// The provider answered with a non-success status.
    #[error("AccuWeather {horizon} request failed with status {status}")]
    Fetch { horizon: Horizon, status: StatusCode },

    /// The request never produced a response body.
    #[error("Failed to reach AccuWeather ({horizon}): {source}")]
    Transport {
        horizon: Horizon,
        #[source]
        source: reqwest::Error,
    },

    /// The body was not valid JSON.
    #[error("Failed to parse AccuWeather {horizon} response as JSON: {source}")]
    Parse {
        horizon: Horizon,
        #[source]
        source: serde_json::Error,
    },

    /// The body was JSON but not in the expected shape.
    #[error("Unexpected AccuWeather {horizon} response shape: {source}")]
    Schema {
        horizon: Horizon,
        #[source]
        source: serde_json::Error,
    },
}

impl ForecastError {
    /// Fixed, non-descriptive message displayed in place of the forecast.
    pub fn user_message(&self) -> String {
        match self {
            ForecastError::MissingCredential(what) => format!("Missing {what}"),
            ForecastError::Fetch { horizon, .. } | ForecastError::Transport { horizon, .. } => {
                horizon.failure_message().to_string()
            }
            ForecastError::Parse { horizon, .. } => {
                format!("Failed to read {horizon} forecast data")
            }
            ForecastError::Schema { horizon, .. } => {
                format!("Unrecognized {horizon} forecast data")
            }
        }
    }

    /// Horizon the error belongs to, if it came from a fetch.
    pub fn horizon(&self) -> Option<Horizon> {
        match self {
            ForecastError::MissingCredential(_) => None,
            ForecastError::Fetch { horizon, .. }
            | ForecastError::Transport { horizon, .. }
            | ForecastError::Parse { horizon, .. }
            | ForecastError::Schema { horizon, .. } => Some(*horizon),
        }
    }
}
