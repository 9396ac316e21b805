//! Best-effort postal-code → city enrichment.
//!
//! Asks a public zip-code service for the locality of a 5-digit Spanish
//! postal code. Every failure is swallowed: the city stays whatever the
//! user typed.

use serde::Deserialize;

const ZIP_SERVICE: &str = "https://api.zippopotam.us/es";

#[derive(Debug, Deserialize)]
struct ZipResponse {
    places: Vec<Place>,
}

#[derive(Debug, Deserialize)]
struct Place {
    #[serde(rename = "place name")]
    name: String,
}

/// Resolves a city name for a postal code, or `None`.
pub async fn city_for_postal_code(http: &reqwest::Client, postal_code: &str) -> Option<String> {
    if postal_code.len() != 5 || !postal_code.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let url = format!("{ZIP_SERVICE}/{postal_code}");
    let response = match http.get(&url).send().await {
        Ok(response) => response,
        Err(err) => {
            tracing::debug!(%err, postal_code, "postal-code lookup failed");
            return None;
        }
    };

    let parsed = match response.error_for_status() {
        Ok(response) => response.json::<ZipResponse>().await,
        Err(err) => {
            tracing::debug!(%err, postal_code, "postal-code lookup rejected");
            return None;
        }
    };

    match parsed {
        Ok(zip) => zip.places.into_iter().next().map(|place| place.name),
        Err(err) => {
            tracing::debug!(%err, postal_code, "postal-code payload unreadable");
            None
        }
    }
}
