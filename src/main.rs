#[cfg(feature = "viewer")]
mod viewer;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use config::{ConfigError, Environment};
use tracing::info;
use tracing_subscriber::EnvFilter;

use finch_sim::config::{DEFAULT_CONFIG_PATH, ENV_PREFIX};
use finch_sim::{Finch, FinchDevice, SimConfig, parse_script};

/// Run a Finch drawing script and save the traced path
#[derive(Parser, Debug)]
#[command(name = "finch-sim")]
#[command(about = "Run a Finch drawing script and save the traced path", long_about = None)]
struct Cli {
    /// Script to run, one command per line; reads stdin when omitted
    script: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// PNG output path; the SVG is written beside it
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Show the drawing in a window after the script has run (`viewer` feature)
    #[arg(long)]
    view: bool,
}

impl Cli {
    /// Configuration file, then `env`, then `--output`.
    fn settings(&self, env: Environment) -> Result<SimConfig, ConfigError> {
        Ok(SimConfig::load_with(Some(self.config.as_path()), env)?
            .with_output_override(self.output.clone()))
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = cli
        .settings(Environment::with_prefix(ENV_PREFIX))
        .context("failed to load configuration")?;

    let source = match &cli.script {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read script from stdin")?;
            buf
        }
    };
    let commands = parse_script(&source)?;
    info!(commands = commands.len(), output = %config.output.display(), "Running Finch script");

    let mut finch = Finch::from_config(&config);
    for command in &commands {
        finch.run(command);
    }
    info!(pose = %finch.pose(), points = finch.path().len(), "Script finished");

    if cli.view {
        present(&mut finch);
    }
    finch.close();
    Ok(())
}

#[cfg(feature = "viewer")]
fn present(finch: &mut Finch) {
    let mut window = viewer::WindowSurface::default();
    finch.show(&mut window);
    finch.close();
    window.run();
}

#[cfg(not(feature = "viewer"))]
fn present(_finch: &mut Finch) {
    tracing::warn!("Built without the `viewer` feature, ignoring --view");
}
