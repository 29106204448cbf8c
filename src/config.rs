//! Simulator configuration: defaults, an optional TOML file, then the environment.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use finch_render::OutputPaths;
use serde::Deserialize;
use tracing::{debug, info};

/// Raster output used when nothing overrides it.
pub const DEFAULT_OUTPUT: &str = "finch_sim_output.png";

/// Environment prefix; `FINCH_SIM_OUTPUT` sets `output`.
pub const ENV_PREFIX: &str = "FINCH_SIM";

/// Configuration file the command-line driver looks for.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Simulator settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimConfig {
    /// Raster output path. The SVG lands beside it with an `.svg` extension.
    pub output: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl SimConfig {
    /// Defaults overridden by the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Defaults, then the optional TOML `file`, then the environment.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(file, Environment::with_prefix(ENV_PREFIX))
    }

    /// Like [`SimConfig::load`], reading the environment layer from `env`.
    pub fn load_with(file: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().set_default("output", DEFAULT_OUTPUT)?;
        if let Some(path) = file {
            debug!("Adding configuration source {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        let settings: SimConfig = builder.add_source(env).build()?.try_deserialize()?;
        info!(output = %settings.output.display(), "Loaded simulator configuration");
        Ok(settings)
    }

    /// Replaces `output` when an explicit destination is given. Applied last, so
    /// it wins over the file and the environment.
    pub fn with_output_override(mut self, output: Option<PathBuf>) -> Self {
        if let Some(output) = output {
            debug!(output = %output.display(), "Output overridden");
            self.output = output;
        }
        self
    }

    /// Output destinations derived from [`SimConfig::output`].
    pub fn outputs(&self) -> OutputPaths {
        OutputPaths::from_raster(&self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let cfg = SimConfig::load_with(None, env(&[])).unwrap();
        assert_eq!(cfg, SimConfig::default());
        let outputs = cfg.outputs();
        assert_eq!(outputs.png, PathBuf::from("finch_sim_output.png"));
        assert_eq!(outputs.svg, PathBuf::from("finch_sim_output.svg"));
    }

    #[test]
    fn test_environment_override() {
        let cfg = SimConfig::load_with(None, env(&[("FINCH_SIM_OUTPUT", "/tmp/drawing.png")])).unwrap();
        assert_eq!(cfg.output, PathBuf::from("/tmp/drawing.png"));
        assert_eq!(cfg.outputs().svg, PathBuf::from("/tmp/drawing.svg"));
    }

    #[test]
    fn test_file_then_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("finch.toml");
        fs::write(&path, "output = \"from_file.png\"\n").unwrap();

        let cfg = SimConfig::load_with(Some(&path), env(&[])).unwrap();
        assert_eq!(cfg.output, PathBuf::from("from_file.png"));

        let cfg = SimConfig::load_with(Some(&path), env(&[("FINCH_SIM_OUTPUT", "env.png")])).unwrap();
        assert_eq!(cfg.output, PathBuf::from("env.png"));
    }

    #[test]
    fn test_output_override_wins_over_file_and_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("finch.toml");
        fs::write(&path, "output = \"from_file.png\"\n").unwrap();

        let cfg = SimConfig::load_with(Some(&path), env(&[("FINCH_SIM_OUTPUT", "env.png")]))
            .unwrap()
            .with_output_override(Some(PathBuf::from("flag.png")));
        assert_eq!(cfg.output, PathBuf::from("flag.png"));
        assert_eq!(cfg.outputs().svg, PathBuf::from("flag.svg"));

        let cfg = SimConfig::load_with(None, env(&[("FINCH_SIM_OUTPUT", "env.png")]))
            .unwrap()
            .with_output_override(None);
        assert_eq!(cfg.output, PathBuf::from("env.png"));
    }

    #[test]
    fn test_missing_file_is_optional() {
        let cfg = SimConfig::load_with(Some(Path::new("does/not/exist.toml")), env(&[])).unwrap();
        assert_eq!(cfg, SimConfig::default());
    }
}
