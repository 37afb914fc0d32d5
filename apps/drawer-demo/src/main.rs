mod scenarios;

use anyhow::Context;
use clap::Parser;
use panelkit_drawer::DrawerConfig;
use scenarios::Scenario;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "drawer-demo")]
#[command(about = "Replay scripted drawer and tray scenarios on a simulated frame clock", long_about = None)]
struct Args {
    /// Drawer config as JSON (defaults apply to missing fields)
    #[arg(long, value_name = "JSON_FILE")]
    config: Option<PathBuf>,

    /// Scenarios to run, in order (default: all)
    #[arg(value_enum, value_name = "SCENARIO")]
    scenarios: Vec<Scenario>,
}

impl Args {
    fn selected(&self) -> Vec<Scenario> {
        if self.scenarios.is_empty() {
            Scenario::ALL.to_vec()
        } else {
            self.scenarios.clone()
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<DrawerConfig> {
    let Some(path) = path else {
        return Ok(DrawerConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading drawer config {}", path.display()))?;
    DrawerConfig::from_json_str(&json)
        .with_context(|| format!("parsing drawer config {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    println!("=== panelkit drawer demo ===");
    println!("pin: {:?}", config.pin);
    println!();

    for scenario in args.selected() {
        let report = scenario
            .run(&config)
            .with_context(|| format!("scenario {}", scenario.name()))?;
        println!("{:<16} {}", scenario.name(), report);
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/args_tests.rs"]
mod tests;
