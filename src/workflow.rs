use anyhow::{ensure, Context, Result};
use tokio::time;
use tracing::info;

use crate::{
    config::Config,
    device::DeviceClient,
    extract,
    geolocate::{self, LocationResponse},
    poll,
};

/// Runs the whole sequence: trigger, await scan, extract, geolocate.
pub async fn run(config: &Config) -> Result<LocationResponse> {
    let device = DeviceClient::new(&config.host, config.device_port, config.request_timeout)?;

    let scan = if config.scan_only {
        info!("triggering a wi-fi scan");
        device
            .start_scan()
            .await
            .context("failed to trigger a wi-fi scan")?;
        time::sleep(config.scan_interval).await;
        device
            .scan_results()
            .await
            .context("failed to fetch scan results")?
    } else {
        info!("rebooting target");
        device
            .reboot()
            .await
            .context("failed to reboot the device")?;
        poll::wait_for_networks(&device, config.scan_interval, config.max_attempts).await?
    };

    for network in &scan {
        println!();
        println!("| {}", network.ssid);
        for ap in &network.ap_list {
            println!("| {} ({})", ap.bssid, ap.signal_level);
        }
    }
    println!();

    let access_points = extract::flatten(&scan);
    ensure!(
        !access_points.is_empty(),
        "the scan did not report any access points"
    );

    geolocate::geolocate(
        &config.geolocate_url,
        &config.api_key,
        &access_points,
        config.request_timeout,
    )
    .await
}

/// Renders the resolved fix as the final report. Debug formatting keeps a
/// decimal on whole numbers, matching the service's own rendering.
pub fn report(fix: &LocationResponse) -> String {
    let lat = fix.location.lat;
    let lng = fix.location.lng;
    format!(
        "Lat: {lat:?}\nLng: {lng:?}\nAccuracy: {:?} meters\nMaps URL: https://www.google.com/maps/?q={lat:?},{lng:?}",
        fix.accuracy
    )
}
