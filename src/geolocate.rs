use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::extract::WifiAccessPoint;

pub const DEFAULT_URL: &str = "https://www.googleapis.com/geolocation/v1/geolocate";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LocationRequest<'a> {
    wifi_access_points: &'a [WifiAccessPoint],
}

#[derive(Debug, Deserialize)]
pub struct LocationResponse {
    pub location: Location,
    pub accuracy: f64,
}

#[derive(Debug, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// Resolves a set of observed access points to a coordinate.
///
/// An error reply carries the service's own diagnostic (invalid key, quota
/// exceeded), so the raw body is surfaced instead of just the status code.
pub async fn geolocate(
    url: &str,
    api_key: &str,
    access_points: &[WifiAccessPoint],
    timeout: Duration,
) -> Result<LocationResponse> {
    let http = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("failed to build the http client")?;

    let response = http
        .post(url)
        .query(&[("key", api_key)])
        .json(&LocationRequest {
            wifi_access_points: access_points,
        })
        .send()
        .await
        .context("failed to reach the geolocation service")?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!("the geolocation service replied with {status}: {body}");
    }

    response
        .json()
        .await
        .context("the geolocation service returned malformed JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_wire_shape() {
        let access_points = vec![WifiAccessPoint {
            mac_address: "aa:bb:cc:dd:ee:ff".to_string(),
            signal_strength: -50,
        }];
        let value = serde_json::to_value(LocationRequest {
            wifi_access_points: &access_points,
        })
        .unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "wifiAccessPoints": [
                    { "macAddress": "aa:bb:cc:dd:ee:ff", "signalStrength": -50 }
                ]
            })
        );
    }

    #[test]
    fn response_wire_shape() {
        let data = r#"{"location": {"lat": 37.42, "lng": -122.08}, "accuracy": 20.0}"#;
        let response: LocationResponse = serde_json::from_str(data).unwrap();
        assert_eq!(response.location.lat, 37.42);
        assert_eq!(response.location.lng, -122.08);
        assert_eq!(response.accuracy, 20.0);
    }
}
