use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use forecast_core::{AccuWeatherClient, Config, ForecastView, render};
use inquire::{Password, PasswordDisplayMode, Text, required};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "AccuWeather forecast page renderer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the AccuWeather location key and API key.
    Configure,

    /// Fetch the 5-day and 12-hour forecasts and render the forecast page.
    Show {
        /// Write HTML here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render one of the static pages.
    Page {
        page: StaticPage,

        /// Write HTML here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StaticPage {
    About,
    Contact,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { output } => show(output).await,
            Command::Page { page, output } => {
                let config = Config::load()?;
                let html = match page {
                    StaticPage::About => render::about(),
                    StaticPage::Contact => render::contact(config.contact.as_deref()),
                };
                write_html(&html.into_string(), output)
            }
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let mut location = Text::new("AccuWeather location key:").with_validator(required!());
    if let Some(current) = config.location_key.as_deref() {
        location = location.with_default(current);
    }
    let location_key = location.prompt().context("Failed to read location key")?;

    let api_key = Password::new("AccuWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_validator(required!())
        .prompt()
        .context("Failed to read API key")?;

    config.set_credentials(location_key.trim().to_string(), api_key.trim().to_string());
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(output: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?.with_env_overrides();
    let client = AccuWeatherClient::from_config(&config)?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, aborting forecast requests");
            on_interrupt.cancel();
        }
    });

    let view = ForecastView::mount(&client, &cancel).await;
    interrupt.abort();

    if cancel.is_cancelled() {
        anyhow::bail!("Interrupted before the forecast finished loading");
    }

    info!(
        daily_ok = view.daily.loaded().is_some(),
        hourly_ok = view.hourly.loaded().is_some(),
        "forecast settled"
    );

    write_html(&render::home(&view).into_string(), output)
}

fn write_html(html: &str, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(&path, html)
                .with_context(|| format!("Failed to write page: {}", path.display()))?;
            info!(path = %path.display(), "page written");
        }
        None => println!("{html}"),
    }
    Ok(())
}
