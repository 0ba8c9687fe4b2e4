use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;

use crate::poll::ScanSource;

/// One detected network as reported by `/setup/scan_results`.
#[derive(Debug, Clone, Deserialize)]
pub struct Network {
    pub ssid: String,
    #[serde(default)]
    pub ap_list: Vec<AccessPoint>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccessPoint {
    pub bssid: String,
    pub signal_level: i32,
}

/// Client for the device's local setup interface.
pub struct DeviceClient {
    http: reqwest::Client,
    base: String,
}

impl DeviceClient {
    pub fn new(host: &str, port: u16, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build the http client")?;
        Ok(Self {
            http,
            base: format!("http://{host}:{port}"),
        })
    }

    /// Restarts the device. The response body is not interpreted.
    pub async fn reboot(&self) -> Result<()> {
        self.http
            .post(format!("{}/setup/reboot", self.base))
            .json(&json!({ "params": "now" }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Starts a Wi-Fi scan without restarting the device.
    pub async fn start_scan(&self) -> Result<()> {
        self.http
            .post(format!("{}/setup/scan_wifi", self.base))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Fetches the most recent Wi-Fi scan results.
    pub async fn scan_results(&self) -> Result<Vec<Network>> {
        let scan = self
            .http
            .get(format!("{}/setup/scan_results", self.base))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("the device returned malformed scan results")?;
        Ok(scan)
    }
}

impl ScanSource for DeviceClient {
    async fn fetch(&self) -> Result<Vec<Network>> {
        self.scan_results().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_results_decode() {
        let data = r#"[
            {"ssid": "Home", "ap_list": [{"bssid": "aa:bb:cc:dd:ee:ff", "signal_level": -50}]},
            {"ssid": "Hidden"}
        ]"#;
        let scan: Vec<Network> = serde_json::from_str(data).unwrap();
        assert_eq!(scan.len(), 2);
        assert_eq!(scan[0].ap_list[0].bssid, "aa:bb:cc:dd:ee:ff");
        assert_eq!(scan[0].ap_list[0].signal_level, -50);
        assert!(scan[1].ap_list.is_empty());
    }
}
