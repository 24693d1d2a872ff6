//! Per-horizon load state and the mount step that drives it.

use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
    client::ForecastSource,
    error::ForecastError,
    model::{DailyForecast, HourlyForecast},
};

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Loading
    }
}

impl<T> LoadState<T> {
    pub fn is_settled(&self) -> bool {
        !matches!(self, LoadState::Loading)
    }

    /// Apply the first result; `Loaded` and `Failed` are terminal.
    ///
    /// Returns `false` when the state was already settled and the result was dropped.
    pub fn settle(&mut self, result: Result<T, ForecastError>) -> bool {
        if self.is_settled() {
            debug!("ignoring result for an already settled forecast");
            return false;
        }

        *self = match result {
            Ok(payload) => LoadState::Loaded(payload),
            Err(err) => {
                warn!(error = %err, "forecast failed");
                LoadState::Failed(err.user_message())
            }
        };
        true
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Display state of the forecast page: one independent state per horizon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastView {
    pub daily: LoadState<DailyForecast>,
    pub hourly: LoadState<HourlyForecast>,
}

impl ForecastView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch both horizons once, concurrently, and settle each from its own result.
    ///
    /// Cancelling `cancel` aborts whatever is still in flight; those horizons stay `Loading`.
    pub async fn mount<S>(source: &S, cancel: &CancellationToken) -> Self
    where
        S: ForecastSource + ?Sized,
    {
        let mut view = Self::new();

        let (daily, hourly) = tokio::join!(
            until_cancelled(cancel, source.daily()),
            until_cancelled(cancel, source.hourly()),
        );

        match daily {
            Some(result) => {
                view.daily.settle(result);
            }
            None => info!("daily forecast cancelled"),
        }
        match hourly {
            Some(result) => {
                view.hourly.settle(result);
            }
            None => info!("hourly forecast cancelled"),
        }

        view
    }

    pub fn is_settled(&self) -> bool {
        self.daily.is_settled() && self.hourly.is_settled()
    }
}

async fn until_cancelled<F: Future>(cancel: &CancellationToken, fut: F) -> Option<F::Output> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        out = fut => Some(out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Horizon, Temperature};
    use async_trait::async_trait;
    use reqwest::StatusCode;

    #[derive(Debug)]
    struct StubSource {
        daily_ok: bool,
        hourly_ok: bool,
    }

    fn failure(horizon: Horizon) -> ForecastError {
        ForecastError::Fetch { horizon, status: StatusCode::INTERNAL_SERVER_ERROR }
    }

    #[async_trait]
    impl ForecastSource for StubSource {
        async fn daily(&self) -> Result<DailyForecast, ForecastError> {
            if self.daily_ok {
                Ok(DailyForecast { headline: None, days: Vec::new() })
            } else {
                Err(failure(Horizon::Daily5))
            }
        }

        async fn hourly(&self) -> Result<HourlyForecast, ForecastError> {
            if self.hourly_ok {
                Ok(HourlyForecast { slots: Vec::new() })
            } else {
                Err(failure(Horizon::Hourly12))
            }
        }
    }

    #[test]
    fn settle_is_terminal() {
        let mut state: LoadState<Temperature> = LoadState::default();
        assert!(!state.is_settled());

        assert!(state.settle(Err(failure(Horizon::Daily5))));
        assert_eq!(state.error(), Some("Failed to fetch weather data"));

        let late = Ok(Temperature { value: 1.0, unit: "F".into() });
        assert!(!state.settle(late));
        assert_eq!(state, LoadState::Failed("Failed to fetch weather data".into()));
    }

    #[test]
    fn loaded_state_exposes_payload() {
        let mut state = LoadState::Loading;
        state.settle(Ok(Temperature { value: 50.0, unit: "F".into() }));

        assert_eq!(state.loaded().map(|t| t.value), Some(50.0));
        assert_eq!(state.error(), None);
    }

    #[tokio::test]
    async fn one_failure_does_not_affect_other_horizon() {
        let source = StubSource { daily_ok: false, hourly_ok: true };
        let view = ForecastView::mount(&source, &CancellationToken::new()).await;

        assert_eq!(view.daily, LoadState::Failed("Failed to fetch weather data".into()));
        assert!(view.hourly.loaded().is_some());
        assert!(view.is_settled());
    }

    #[tokio::test]
    async fn cancelled_before_mount_stays_loading() {
        let source = StubSource { daily_ok: true, hourly_ok: true };
        let cancel = CancellationToken::new();
        cancel.cancel();

        let view = ForecastView::mount(&source, &cancel).await;

        assert_eq!(view.daily, LoadState::Loading);
        assert_eq!(view.hourly, LoadState::Loading);
        assert!(!view.is_settled());
    }
}
