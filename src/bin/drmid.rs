use anyhow::Context;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use tracing::error;

use drmid::{
    api::{ApiLevel, KeySystemId, PropertyName},
    channel::{IdentityChannel, MethodCall, CHANNEL_NAME, METHOD_GET_SECURE_HARDWARE_ID},
    IdentityConfig, SimulatedKeySystem,
};

#[derive(Parser, Debug)]
#[command(name = "drmid")]
#[command(about = "Hardware identifier derivation from DRM key systems", version)]
pub struct Cli {
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Derive the encoded identifier for a known raw device unique id
    Derive {
        /// Raw device unique id in hex
        raw_id: String,

        /// API level of the simulated device (selects teardown and base64 codepath)
        #[arg(long, default_value_t = SimulatedKeySystem::DEFAULT_API_LEVEL.get())]
        api_level: u32,
    },

    /// Dispatch a channel call against a simulated device and print the JSON response
    Call {
        /// Method name
        method: String,

        /// Raw device unique id in hex. The property reads as null if omitted
        #[arg(long)]
        raw_id: Option<String>,

        /// Make opening the key system fail with this message
        #[arg(long)]
        fail_open: Option<String>,

        /// API level of the simulated device
        #[arg(long, default_value_t = SimulatedKeySystem::DEFAULT_API_LEVEL.get())]
        api_level: u32,
    },

    /// Print key system and channel constants
    Info,
}

fn parse_raw_id(raw_hex: &str) -> anyhow::Result<Vec<u8>> {
    hex::decode(raw_hex.trim()).map_err(|e| anyhow::anyhow!("Invalid raw id hex: {}", e))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(cli.verbosity.tracing_level_filter())
        .init();

    match cli.command {
        Commands::Derive { raw_id, api_level } => {
            let key_system = SimulatedKeySystem::new(parse_raw_id(&raw_id)?)
                .with_api_level(ApiLevel::new(api_level));

            match drmid::get_secure_hardware_id_from(&key_system) {
                Ok(id) => println!("{}", id),
                Err(e) => {
                    error!("Failed to derive identifier: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Call {
            method,
            raw_id,
            fail_open,
            api_level,
        } => {
            let mut key_system = match raw_id {
                Some(raw_hex) => SimulatedKeySystem::new(parse_raw_id(&raw_hex)?),
                None => SimulatedKeySystem::without_unique_id(),
            }
            .with_api_level(ApiLevel::new(api_level));

            if let Some(reason) = fail_open {
                key_system = key_system.failing_open(reason);
            }

            let channel = IdentityChannel::with_config(key_system, IdentityConfig::default());
            let response = channel.handle(&MethodCall::new(method));
            let json = response
                .to_json()
                .context("failed to serialize channel response")?;
            println!("{}", json);
        }

        Commands::Info => {
            println!("key_system: {}", KeySystemId::WIDEVINE);
            println!("property: {}", PropertyName::DEVICE_UNIQUE_ID);
            println!("channel: {}", CHANNEL_NAME);
            println!("method: {}", METHOD_GET_SECURE_HARDWARE_ID);
        }
    }

    Ok(())
}
