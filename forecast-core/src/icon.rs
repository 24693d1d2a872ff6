//! Provider icon codes and precipitation labels.

use crate::model::PrecipIntensity;

const ICON_URL_PREFIX: &str = "https://developer.accuweather.com/sites/default/files/";

/// Image URL for an AccuWeather icon code. The code is not range checked.
pub fn icon_url(code: u32) -> String {
    format!("{ICON_URL_PREFIX}{code:02}-s.png")
}

/// Short display code for a raw `PrecipitationIntensity` value.
pub fn precip_intensity_label(raw: &str) -> String {
    PrecipIntensity::parse(raw)
        .map(|intensity| intensity.label().to_owned())
        .unwrap_or_default()
}
