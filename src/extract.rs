use serde::Serialize;

use crate::device::Network;

/// An observed access point in the geolocation API's schema.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WifiAccessPoint {
    pub mac_address: String,
    pub signal_strength: i32,
}

/// Flattens per-network scan results into a single access point list.
///
/// Output order follows the nested input order and duplicates are kept;
/// the geolocation service weighs repeated sightings itself.
pub fn flatten(scan: &[Network]) -> Vec<WifiAccessPoint> {
    scan.iter()
        .flat_map(|network| network.ap_list.iter())
        .map(|ap| WifiAccessPoint {
            mac_address: ap.bssid.clone(),
            signal_strength: ap.signal_level,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::AccessPoint;

    fn ap(bssid: &str, signal_level: i32) -> AccessPoint {
        AccessPoint {
            bssid: bssid.to_string(),
            signal_level,
        }
    }

    #[test]
    fn preserves_order_and_duplicates() {
        let scan = vec![
            Network {
                ssid: "Home".to_string(),
                ap_list: vec![ap("aa:aa:aa:aa:aa:aa", -40), ap("bb:bb:bb:bb:bb:bb", -60)],
            },
            Network {
                ssid: "Cafe".to_string(),
                ap_list: vec![ap("aa:aa:aa:aa:aa:aa", -70)],
            },
            Network {
                ssid: "Hidden".to_string(),
                ap_list: vec![],
            },
        ];

        let flat = flatten(&scan);
        assert_eq!(flat.len(), 3);
        assert_eq!(flat[0].mac_address, "aa:aa:aa:aa:aa:aa");
        assert_eq!(flat[0].signal_strength, -40);
        assert_eq!(flat[1].mac_address, "bb:bb:bb:bb:bb:bb");
        assert_eq!(flat[2].mac_address, "aa:aa:aa:aa:aa:aa");
        assert_eq!(flat[2].signal_strength, -70);
    }

    #[test]
    fn renames_into_the_wire_schema() {
        let scan = vec![Network {
            ssid: "Home".to_string(),
            ap_list: vec![ap("aa:bb:cc:dd:ee:ff", -50)],
        }];

        let value = serde_json::to_value(flatten(&scan)).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                { "macAddress": "aa:bb:cc:dd:ee:ff", "signalStrength": -50 }
            ])
        );
    }

    #[test]
    fn empty_scan_yields_an_empty_list() {
        assert!(flatten(&[]).is_empty());
    }
}
