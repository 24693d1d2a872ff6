//! HTML pages: forecast home plus the static about and contact pages.

use maud::{DOCTYPE, Markup, html};
use std::num::NonZeroUsize;

use crate::{
    format::{chunk, format_clock_time, format_day_label},
    icon::icon_url,
    model::{DailyForecast, DailyForecastDay, HourlyForecast, HourlyForecastSlot},
    state::{ForecastView, LoadState},
};

const PROVIDER_URL: &str = "https://www.accuweather.com";

const HOURLY_ROW_LEN: NonZeroUsize = match NonZeroUsize::new(4) {
    Some(n) => n,
    None => panic!("row length must be non-zero"),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    About,
    Contact,
}

impl Page {
    pub fn file_name(&self) -> &'static str {
        match self {
            Page::Home => "index.html",
            Page::About => "about.html",
            Page::Contact => "contact.html",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Forecast",
            Page::About => "About",
            Page::Contact => "Contact",
        }
    }

    pub const fn all() -> &'static [Page] {
        &[Page::Home, Page::About, Page::Contact]
    }
}

fn layout(current: Page, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (current.title()) " · Weather" }
            }
            body {
                nav {
                    @for page in Page::all() {
                        @if *page == current {
                            span class="current" { (page.title()) }
                        } @else {
                            a href=(page.file_name()) { (page.title()) }
                        }
                        " "
                    }
                }
                main { (content) }
            }
        }
    }
}

/// Forecast page for the current load state of both horizons.
pub fn home(view: &ForecastView) -> Markup {
    layout(
        Page::Home,
        html! {
            h1 { "5-Day Weather Forecast" }
            (daily_section(&view.daily))
            h1 { "12-Hour Forecast" }
            (hourly_section(&view.hourly))
            (attribution(view.daily.loaded()))
        },
    )
}

pub fn about() -> Markup {
    layout(
        Page::About,
        html! {
            h1 { "About" }
            p {
                "A small forecast page showing the next five days and the next twelve hours "
                "for a single location, using data from AccuWeather."
            }
            p { "Temperatures are shown in the units requested from the provider." }
        },
    )
}

pub fn contact(contact: Option<&str>) -> Markup {
    layout(
        Page::Contact,
        html! {
            h1 { "Contact" }
            @match contact {
                Some(line) => p { (line) },
                None => p { "Questions or feedback about this page are welcome." },
            }
        },
    )
}

fn daily_section(state: &LoadState<DailyForecast>) -> Markup {
    html! {
        section class="daily" {
            @match state {
                LoadState::Failed(message) => p class="error" { "Error: " (message) },
                LoadState::Loaded(forecast) => {
                    ul {
                        @for day in &forecast.days {
                            (daily_item(day))
                        }
                    }
                },
                LoadState::Loading => p class="loading" { "Loading weather data..." },
            }
        }
    }
}

fn daily_item(day: &DailyForecastDay) -> Markup {
    let label = format_day_label(&day.date);

    html! {
        li class="forecast-day" {
            h2 {
                span class="weekday" { (label.weekday) }
                " "
                span class="day" { (label.day_of_month) }
            }
            img src=(icon_url(day.icon_code)) alt=(day.icon_phrase);
            p { "Min: " (day.min_temp.to_string()) }
            p { "Max: " (day.max_temp.to_string()) }
            p class="phrase" { (day.icon_phrase) }
        }
    }
}

fn hourly_section(state: &LoadState<HourlyForecast>) -> Markup {
    html! {
        section class="hourly" {
            @match state {
                LoadState::Failed(message) => p class="error" { "Error: " (message) },
                LoadState::Loaded(forecast) => {
                    @for row in chunk(&forecast.slots, HOURLY_ROW_LEN) {
                        ul class="hourly-row" {
                            @for slot in row {
                                (hourly_item(slot))
                            }
                        }
                    }
                },
                LoadState::Loading => p class="loading" { "Loading hourly data..." },
            }
        }
    }
}

fn hourly_item(slot: &HourlyForecastSlot) -> Markup {
    html! {
        li class="forecast-hour" {
            h3 { (format_clock_time(&slot.date_time)) }
            @if let Some(url) = slot.icon_url() {
                img src=(url) alt=(slot.icon_phrase);
            }
            p { (slot.temp.to_string()) }
            p class="phrase" { (slot.icon_phrase) }
            @if slot.has_precipitation {
                p class="precip" {
                    (format!("{}%", slot.precip_probability))
                    @if let Some(intensity) = &slot.precip_intensity {
                        " " (intensity.label())
                    }
                }
            }
        }
    }
}

fn attribution(daily: Option<&DailyForecast>) -> Markup {
    let headline = daily.and_then(|d| d.headline.as_ref());
    let link = headline
        .and_then(|h| h.link.as_deref())
        .unwrap_or(PROVIDER_URL);

    html! {
        footer class="attribution" {
            @if let Some(headline) = headline {
                p class="headline" { (headline.text) }
            }
            p { "Forecast data provided by " a href=(link) { "AccuWeather" } }
        }
    }
}
