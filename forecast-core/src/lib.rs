//! Core library for the `forecast` page renderer.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The AccuWeather client behind the [`ForecastSource`] trait
//! - Pure formatters (day labels, clock times, icons, precipitation)
//! - Per-horizon load state and HTML rendering
//!
//! It is used by `forecast-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod icon;
pub mod model;
pub mod render;
pub mod state;

pub use client::{AccuWeatherClient, ForecastSource};
pub use config::Config;
pub use error::ForecastError;
pub use model::{
    Credentials, DailyForecast, DailyForecastDay, ForecastRequest, Horizon, HourlyForecast,
    HourlyForecastSlot, PrecipIntensity, Temperature,
};
pub use render::Page;
pub use state::{ForecastView, LoadState};
