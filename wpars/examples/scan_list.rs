use std::time::Duration;
use wpars::{ScanType, Supplicant, TimeoutConfig};

#[tokio::main]
async fn main() -> wpars::Result<()> {
    let config = TimeoutConfig::new().with_scan_timeout(Duration::from_secs(15));
    let supplicant = Supplicant::with_config(config).await?;

    let ifname = std::env::args().nth(1).unwrap_or_else(|| "wlan0".into());
    let iface = supplicant.acquire_interface(&ifname).await?;

    println!("Scanning on {ifname}...");
    let networks = supplicant.scan_and_list(&iface, ScanType::Active).await?;

    for (i, ssid) in networks.iter().enumerate() {
        println!("{:>3}  {ssid}", i + 1);
    }

    Ok(())
}
