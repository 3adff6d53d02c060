pub mod prompt;

use std::time::Duration;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use wpars::{
    ConnectOutcome, DEFAULT_IFNAME, Interface, Prompter, ScanOutcome, ScanType, Supplicant,
    SupplicantBus, TimeoutConfig,
};

use crate::prompt::ConsolePrompter;

#[derive(Parser, Debug)]
#[command(name = "wpars")]
#[command(version, about = "Scan for Wi-Fi networks and connect through wpa_supplicant")]
struct Args {
    /// Wireless interface to manage
    #[arg(short, long, value_name = "IFNAME", default_value = DEFAULT_IFNAME)]
    interface: String,

    /// Scan type sent with the scan request
    #[arg(long, value_name = "TYPE", default_value_t = ScanType::Active)]
    scan_type: ScanType,

    /// Deadline for each bus call, in milliseconds
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// How long to wait for a scan to complete, in seconds
    #[arg(long, value_name = "SECS")]
    scan_timeout: Option<u64>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    /// Scan, pick a network and connect to it
    #[default]
    Connect,
    /// Scan and print the visible networks
    List,
    /// Print the network configurations known to the daemon
    Saved,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Warn;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn timeouts(&self) -> TimeoutConfig {
        let mut config = TimeoutConfig::new();
        if let Some(ms) = self.timeout_ms {
            config = config.with_method_timeout(Duration::from_millis(ms));
        }
        if let Some(secs) = self.scan_timeout {
            config = config.with_scan_timeout(Duration::from_secs(secs));
        }
        config
    }
}

/// `RUST_LOG` takes precedence over the command-line level.
fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Exit status when the interface can be neither found nor created.
const EXIT_INTERFACE_UNAVAILABLE: i32 = 1;

pub async fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(args.log_level());

    let supplicant = Supplicant::with_config(args.timeouts())
        .await
        .context("Failed to connect to the system bus")?;

    let mut prompter = ConsolePrompter::stdio();
    let status = execute(&supplicant, &args, &mut prompter).await;
    if status != 0 {
        std::process::exit(status);
    }

    Ok(())
}

/// Runs the selected command and returns the process exit status.
///
/// Only a failed interface acquisition is nonzero; every later failure is
/// reported on the console and the run still counts as finished.
async fn execute<B, P>(supplicant: &Supplicant<B>, args: &Args, prompter: &mut P) -> i32
where
    B: SupplicantBus,
    P: Prompter + ?Sized,
{
    println!("Using network interface: {}", args.interface);
    let iface = match supplicant.acquire_interface(&args.interface).await {
        Ok(iface) => iface,
        Err(e) => {
            eprintln!("Failed to create the interface: {e}");
            return EXIT_INTERFACE_UNAVAILABLE;
        }
    };

    match args.command.unwrap_or_default() {
        Command::Connect => connect(supplicant, &iface, args.scan_type, prompter).await,
        Command::List => list(supplicant, &iface, args.scan_type).await,
        Command::Saved => saved(supplicant, &iface).await,
    }

    0
}

async fn connect<B, P>(
    supplicant: &Supplicant<B>,
    iface: &Interface,
    scan_type: ScanType,
    prompter: &mut P,
) where
    B: SupplicantBus,
    P: Prompter + ?Sized,
{
    println!("Starting scan");
    match supplicant.scan_and_connect(iface, scan_type, prompter).await {
        Ok(outcome) => report(&outcome),
        Err(e) => eprintln!("No connection attempted: {e}"),
    }
}

fn report(outcome: &ScanOutcome) {
    let ssid = &outcome.selected;
    match &outcome.connect {
        ConnectOutcome::Associated { disconnect_error } => {
            if let Some(e) = disconnect_error {
                println!("Note: disconnect before selecting failed: {e}");
            }
            println!("Reassociating to network: {ssid}");
        }
        ConnectOutcome::NoConfiguration => {
            eprintln!("Unable to find/create a valid network config for SSID: {ssid}");
        }
        ConnectOutcome::Failed { step, error, .. } => {
            eprintln!("{step} failed for network {ssid}: {error}");
        }
    }
}

async fn list<B: SupplicantBus>(supplicant: &Supplicant<B>, iface: &Interface, scan_type: ScanType) {
    println!("Starting scan");
    match supplicant.scan_and_list(iface, scan_type).await {
        Ok(networks) if networks.is_empty() => println!("No networks detected"),
        Ok(networks) => {
            println!("List of SSIDs detected:");
            for (i, ssid) in networks.iter().enumerate() {
                println!("{}: {ssid}", i + 1);
            }
        }
        Err(e) => eprintln!("Scan failed: {e}"),
    }
}

async fn saved<B: SupplicantBus>(supplicant: &Supplicant<B>, iface: &Interface) {
    match supplicant.list_saved_networks(iface).await {
        Ok(networks) if networks.is_empty() => println!("No saved networks"),
        Ok(networks) => {
            for net in networks {
                let state = if net.enabled { "enabled" } else { "disabled" };
                println!("{:30} {:9} {}", net.ssid, state, net.path.as_str());
            }
        }
        Err(e) => eprintln!("Failed to list saved networks: {e}"),
    }
}
