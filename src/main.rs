use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use overscribe::Config;
use overscribe::replay::{self, Script};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "overscribe")]
#[command(version)]
#[command(about = "Headless host for the overscribe annotation engine")]
struct Cli {
    /// Replay a JSON gesture script and print the resulting frame
    #[arg(long, short = 'r', value_name = "FILE")]
    replay: Option<PathBuf>,

    /// Render time in seconds (defaults to the last step of the script)
    #[arg(long, value_name = "SECONDS", requires = "replay")]
    at: Option<f64>,

    /// Use this configuration file instead of the default location
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the default configuration file path and exit
    #[arg(long, action = ArgAction::SetTrue)]
    print_config_path: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.print_config_path {
        println!("{}", Config::get_config_path()?.display());
        return Ok(());
    }

    if let Some(script_path) = cli.replay {
        let config = match &cli.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        let script = Script::load(&script_path)
            .with_context(|| format!("Failed to load replay script {}", script_path.display()))?;
        log::info!(
            "Replaying {} steps from {}",
            script.steps.len(),
            script_path.display()
        );

        let report = replay::run(&script, &config, cli.at);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        // No flags: show usage
        println!("overscribe: Screen annotation scene engine");
        println!();
        println!("Usage:");
        println!("  overscribe --replay <FILE> [--at <SECONDS>]   Replay a gesture script");
        println!("  overscribe --print-config-path                Show the config file location");
        println!("  overscribe --help                             Show help");
        println!();
        println!("Configuration:");
        println!("  Settings are read from ~/.config/overscribe/config.toml");
        println!("  Run dump_config_schema for the JSON schema of that file.");
    }

    Ok(())
}
