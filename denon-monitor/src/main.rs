use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

use denon_api::ZoneRole;
use denon_client::logging::{self, LoggingMode};
use denon_client::{ClientConfig, DenonClient, DeviceEvent};

/// Denon/Marantz receiver monitor
///
/// Connects to a receiver, follows one zone and prints every state change
/// until interrupted. With `--send`, issues a single command and exits.
#[derive(Parser, Debug)]
#[command(name = "denon-monitor")]
#[command(about = "Follow the live state of a Denon/Marantz receiver zone")]
#[command(version)]
pub struct Args {
    /// Receiver host name or IP address
    #[arg(long)]
    pub host: String,

    /// Control port
    #[arg(short, long, default_value = "80")]
    pub port: u16,

    /// Zone: 0 main, 1 zone 2, 2 zone 3, 3 sound mode
    #[arg(short, long, default_value = "0")]
    pub zone: u8,

    /// Where the main zone writes the device info document
    #[arg(long, default_value = "device_info.json")]
    pub device_info_file: PathBuf,

    /// Send one command path (e.g. "/goform/formiPhoneAppDirect.xml?MVUP") and exit
    #[arg(long, value_name = "PATH")]
    pub send: Option<String>,

    /// Skip the UPnP description fetch after identifying
    #[arg(long)]
    pub no_upnp: bool,

    /// Print raw payloads carried by debug events
    #[arg(long)]
    pub show_raw_data: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Validate command line arguments
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(anyhow::anyhow!("Host must not be empty"));
        }

        if self.port == 0 {
            return Err(anyhow::anyhow!("Port must be greater than 0"));
        }

        ZoneRole::try_from(self.zone).context("Invalid --zone")?;

        if let Some(path) = &self.send {
            if !path.starts_with('/') {
                return Err(anyhow::anyhow!(
                    "Command path '{}' must start with '/'",
                    path
                ));
            }
        }

        match self.log_level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "Invalid log level '{}'. Valid levels: error, warn, info, debug, trace",
                    self.log_level
                ));
            }
        }

        Ok(())
    }

    /// Client configuration for these arguments
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.host.trim())
            .with_port(self.port)
            .with_zone(self.zone)
            .with_device_info_path(self.device_info_file.clone())
            .with_upnp_description(!self.no_upnp)
    }
}

/// Install the subscriber; DENON_LOG_LEVEL / RUST_LOG win over --log-level
fn init_tracing(log_level: &str) -> Result<()> {
    let from_env =
        std::env::var("DENON_LOG_LEVEL").is_ok() || std::env::var("RUST_LOG").is_ok();

    if from_env {
        logging::init_logging(LoggingMode::Development)?;
    } else {
        logging::init_logging_with_level(LoggingMode::Development, &log_level.to_lowercase())?;
    }

    Ok(())
}

/// One line per event on stdout
fn print_event(event: &DeviceEvent, show_raw_data: bool) {
    match event {
        DeviceEvent::DeviceState {
            power,
            reference,
            volume,
            mute,
        } => {
            println!(
                "state    power={} input={} volume={} mute={}",
                if *power { "on" } else { "off" },
                if reference.is_empty() { "-" } else { reference },
                volume,
                if *mute { "on" } else { "off" }
            );
        }
        DeviceEvent::Connect(message) | DeviceEvent::Disconnect(message) => {
            println!("{:<8} {}", event.kind(), message);
        }
        DeviceEvent::Message(message) => println!("message  {}", message),
        DeviceEvent::Error(message) => println!("error    {}", message),
        DeviceEvent::DeviceInfo(info) => {
            println!(
                "device   {} ({} zones, MAC {})",
                info.model_name().unwrap_or("unknown model"),
                info.zone_count().map_or_else(|| "?".to_string(), |n| n.to_string()),
                info.mac_address().unwrap_or("?")
            );
            if show_raw_data {
                match serde_json::to_string_pretty(info) {
                    Ok(json) => println!("{}", json),
                    Err(e) => warn!("Failed to encode device info: {}", e),
                }
            }
        }
        DeviceEvent::DeviceInfoUpnp(description) => {
            println!(
                "upnp     {} ({} {})",
                description.device.friendly_name,
                description.device.manufacturer,
                description.device.model_name
            );
        }
        DeviceEvent::Debug(text) => {
            if show_raw_data {
                println!("debug    {}", text);
            }
        }
    }
}

/// Issue a single command and report the outcome
async fn run_send(args: &Args, path: &str) -> Result<()> {
    let (client, _events) = DenonClient::new(args.client_config())
        .context("Failed to create client")?;

    client
        .send(path)
        .await
        .with_context(|| format!("Failed to send command {}", path))?;

    println!("sent     {}", path);
    client.shutdown().await?;
    Ok(())
}

/// Follow the zone until Ctrl+C
async fn run_monitor(args: &Args) -> Result<()> {
    let (client, mut events) = DenonClient::new(args.client_config())
        .context("Failed to create client")?;

    info!(
        "Monitoring {} ({})",
        client.endpoints().base_url(),
        client.endpoints().zone()
    );
    client.connect()?;

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => print_event(&event, args.show_raw_data),
                None => {
                    warn!("Event stream closed");
                    break;
                }
            },
            result = tokio::signal::ctrl_c() => {
                result.context("Failed to listen for Ctrl+C")?;
                info!("Interrupted, shutting down");
                break;
            }
        }
    }

    client.shutdown().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    args.validate()?;
    init_tracing(&args.log_level)?;

    match args.send.clone() {
        Some(path) => run_send(&args, &path).await,
        None => run_monitor(&args).await,
    }
}
