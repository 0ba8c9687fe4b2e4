use std::{io, path::PathBuf, process};

use anyhow::Result;
use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use castlocate::{
    config::{self, Config},
    workflow,
};

#[derive(Debug, Parser)]
#[command(
    name = "castlocate",
    about = "Locates a casting device by geolocating the Wi-Fi networks it can see"
)]
struct Cli {
    /// Hostname or IP address of the target device
    host: String,

    /// Trigger a scan without rebooting and fetch the results once
    #[arg(long)]
    scan_only: bool,

    /// File holding the geolocation API key on its first line
    #[arg(long, default_value = "google-apis-key.txt")]
    key_file: PathBuf,

    /// Give up after this many scan fetch attempts instead of retrying forever
    #[arg(long)]
    max_attempts: Option<u32>,

    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // Bad arguments show the usage text and are not treated as a failure.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            process::exit(0);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        println!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let file = match cli.config.as_deref() {
        Some(path) => config::load(path)?,
        None => config::FileConfig::default(),
    };
    let api_key = config::read_api_key(&cli.key_file)?;
    let config = Config::resolve(cli.host, cli.scan_only, api_key, file, cli.max_attempts);

    let fix = tokio::select! {
        fix = workflow::run(&config) => fix?,
        // ^C is a user-initiated stop, not a failure
        _ = signal::ctrl_c() => process::exit(0),
    };

    println!("{}", workflow::report(&fix));
    println!();
    Ok(())
}
