use wpars::Supplicant;

#[tokio::main]
async fn main() -> wpars::Result<()> {
    let supplicant = Supplicant::new().await?;

    let ifname = std::env::args().nth(1).unwrap_or_else(|| "wlan0".into());
    let iface = supplicant.acquire_interface(&ifname).await?;

    for net in supplicant.list_saved_networks(&iface).await? {
        let mark = if net.enabled { "*" } else { " " };
        println!("{mark} {:30} {}", net.ssid, net.path.as_str());
    }

    Ok(())
}
