//! Mapdraw replay entry point

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mapdraw_host::{ConfigManager, Draw, HeadlessMap, HostError, Script};

/// Replay a scripted drawing session and print the resulting GeoJSON
#[derive(Parser, Debug)]
#[command(name = "mapdraw", version)]
struct Args {
    /// RON script of input steps
    script: PathBuf,

    /// Configuration file (defaults to the user configuration directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print display records instead of stored features
    #[arg(long)]
    render: bool,
}

fn main() -> ExitCode {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mapdraw_core=info,mapdraw_modes=info,mapdraw_host=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), HostError> {
    let manager = match args.config {
        Some(path) => ConfigManager::open(path)?,
        None => ConfigManager::new(),
    };
    let script = Script::load(&args.script)?;
    tracing::info!("Replaying {} steps from {:?}", script.steps.len(), args.script);

    let mut draw = Draw::new(Box::new(HeadlessMap::new()), manager.config());
    script.run(&mut draw);

    let output = if args.render {
        serde_json::to_string_pretty(&draw.render())?
    } else {
        serde_json::to_string_pretty(&draw.get_all())?
    };
    println!("{}", output);
    Ok(())
}
