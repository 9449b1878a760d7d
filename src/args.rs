mod proc_errors;

use clap::{
    ArgAction,
    Args,
    Parser,
    Subcommand,
    ValueEnum,
};
use strum::{Display, EnumIter};

// Re-export errors
pub use proc_errors::{
    ArgError,
    ProcResult,
    err_str,
};

/// Field nulling coil winding tool for optically pumped magnetometer rooms.
#[derive(Debug, Parser)]
#[command(version)]
pub struct OpmCoilCli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}
impl OpmCoilCli {
    /// Default log filter directive for the verbosity level.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Subcommands of the opmcoil binary.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one stage, or a range of stages in order
    Run(RunArgs),

    /// Print an example config file for a stage
    Config(ExampleArgs),
}

/// Stages of the process, in run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum RunStage {
    /// Generate the field evaluation points and store them
    Targets,
    /// Flatten and label the stored loops into a flat layout file
    Flatten,
    /// Compute wire length and trace resistance of the stored loops
    Metrics,
}
impl RunStage {
    /// Position of the stage in the run order.
    pub fn stage_num(&self) -> u8 {
        match self {
            RunStage::Targets => 0,
            RunStage::Flatten => 1,
            RunStage::Metrics => 2,
        }
    }
}

/// Config file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Format {
    Yaml,
    Json,
    Toml,
}

/// Arguments shared by all stages.
#[derive(Debug, Clone, Args)]
pub struct SharedArgs {
    /// Directory of the loop store
    #[arg(short, long = "store", default_value = ".")]
    pub store_dir: String,

    /// Store key of the coil (usually the axis label X, Y or Z)
    #[arg(short, long, default_value = crate::store::DEFAULT_KEY)]
    pub key: String,
}

/// Arguments for the run command.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// First stage to run
    #[arg(value_enum)]
    pub start_stage: RunStage,

    /// Last stage to run (defaults to the first)
    #[arg(value_enum)]
    pub end_stage: Option<RunStage>,

    #[command(flatten)]
    pub shared_args: SharedArgs,

    /// Config file for the targets stage (yaml, json or toml)
    #[arg(long = "targets-cfg")]
    pub targets_cfg: Option<String>,

    /// Config file for the flatten stage (yaml, json or toml)
    #[arg(long = "flatten-cfg")]
    pub flatten_cfg: Option<String>,

    /// Config file for the metrics stage (yaml, json or toml)
    #[arg(long = "metrics-cfg")]
    pub metrics_cfg: Option<String>,
}
impl RunArgs {
    /// Config file given for a stage, if any.
    pub fn cfg_for(&self, stage: RunStage) -> Option<&str> {
        match stage {
            RunStage::Targets => self.targets_cfg.as_deref(),
            RunStage::Flatten => self.flatten_cfg.as_deref(),
            RunStage::Metrics => self.metrics_cfg.as_deref(),
        }
    }
}

/// Arguments for the config command.
#[derive(Debug, Args)]
pub struct ExampleArgs {
    /// Stage to print the config for
    #[arg(value_enum)]
    pub stage: RunStage,

    /// Method to fill in (stages with methods only; lists them if missing)
    #[arg(short, long)]
    pub method: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Yaml)]
    pub format: Format,
}

/// Parse the command line arguments.
pub fn parse_cli_args() -> OpmCoilCli {
    OpmCoilCli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn stages_in_order() {
        let nums: Vec<u8> = RunStage::iter().map(|s| s.stage_num()).collect();
        assert_eq!(nums, vec![0, 1, 2]);
        assert_eq!(RunStage::Flatten.to_string(), "flatten");
    }

    #[test]
    fn parses_run() {
        let cli = OpmCoilCli::try_parse_from([
            "opmcoil", "-vv", "run", "flatten", "metrics", "--store", "out", "--key", "Z",
            "--flatten-cfg", "flatten.yaml",
        ]).unwrap();
        assert_eq!(cli.log_directive(), "debug");
        match cli.command {
            Command::Run(run) => {
                assert_eq!(run.start_stage, RunStage::Flatten);
                assert_eq!(run.end_stage, Some(RunStage::Metrics));
                assert_eq!(run.shared_args.store_dir, "out");
                assert_eq!(run.shared_args.key, "Z");
                assert_eq!(run.cfg_for(RunStage::Flatten), Some("flatten.yaml"));
                assert_eq!(run.cfg_for(RunStage::Metrics), None);
            },
            Command::Config(_) => panic!("Expected run command"),
        }
    }

    #[test]
    fn parses_config_defaults() {
        let cli = OpmCoilCli::try_parse_from(["opmcoil", "config", "targets"]).unwrap();
        assert_eq!(cli.log_directive(), "warn");
        match cli.command {
            Command::Config(example) => {
                assert_eq!(example.stage, RunStage::Targets);
                assert_eq!(example.format, Format::Yaml);
                assert!(example.method.is_none());
            },
            Command::Run(_) => panic!("Expected config command"),
        }
        assert!(OpmCoilCli::try_parse_from(["opmcoil", "run", "mesh"]).is_err());
    }
}
