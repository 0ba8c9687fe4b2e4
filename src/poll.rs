use std::time::Duration;

use anyhow::{bail, Result};
use tokio::time;
use tracing::{info, warn};

use crate::device::Network;

/// Anything that can produce a fresh set of scan results.
pub trait ScanSource {
    async fn fetch(&self) -> Result<Vec<Network>>;
}

/// Polls the device until a scan reports more than one network.
///
/// Transport errors are expected while the device restarts and are logged
/// rather than propagated. Without an attempt limit the loop runs until the
/// device answers.
pub async fn wait_for_networks<S: ScanSource>(
    source: &S,
    interval: Duration,
    max_attempts: Option<u32>,
) -> Result<Vec<Network>> {
    let mut attempts = 0;
    loop {
        time::sleep(interval).await;
        info!("requesting wi-fi scan results");
        match source.fetch().await {
            Ok(scan) if scan.len() > 1 => return Ok(scan),
            Ok(scan) => info!("networks found: {}, retrying", scan.len()),
            Err(e) => warn!("scan fetch failed: {e:#}"),
        }
        attempts += 1;
        if let Some(max) = max_attempts {
            if attempts >= max {
                bail!("no usable scan results after {max} attempts");
            }
        }
    }
}
