//! CLI argument parsing for bytescan

use crate::config::Config;
use crate::error::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// bytescan - scalar vs. SIMD byte-stream scanning kernels
#[derive(Parser, Debug)]
#[command(name = "bytescan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a data file
    #[command(subcommand)]
    Generate(GenerateCommand),

    /// Search a data file for a pattern
    Search(SearchArgs),

    /// Check a data file for balanced brackets
    Check(CheckArgs),

    /// Generate fixtures and time every kernel over a size sweep
    Bench(BenchArgs),

    /// Show configuration
    Config(ConfigArgs),
}

#[derive(Subcommand, Debug)]
pub enum GenerateCommand {
    /// Random [a-z] data with a planted pattern (pattern written to <PATH>.pattern.txt)
    Substring(SubstringArgs),

    /// Random bracket data from ()[]{}
    Brackets(BracketArgs),
}

/// Arguments for `generate substring`
#[derive(Parser, Debug)]
pub struct SubstringArgs {
    /// Output data file
    pub path: PathBuf,

    /// Data size (e.g. 1024, 10K, 1M)
    #[arg(short, long, value_parser = parse_size)]
    pub size: u64,

    /// Pattern length in bytes
    #[arg(short, long, default_value = "8")]
    pub pattern_size: usize,

    /// RNG seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for `generate brackets`
#[derive(Parser, Debug)]
pub struct BracketArgs {
    /// Output data file
    pub path: PathBuf,

    /// Data size (e.g. 1024, 10K, 1M)
    #[arg(short, long, value_parser = parse_size)]
    pub size: u64,

    /// RNG seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Which kernel(s) to run
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    Naive,
    Simd,
    /// Run both and fail if they disagree
    #[default]
    Both,
}

/// Arguments for the search command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Data file to search
    pub path: PathBuf,

    /// Pattern text (default: read <PATH>.pattern.txt)
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Kernel to run
    #[arg(short, long, value_enum, default_value_t = Mode::Both)]
    pub mode: Mode,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Data file to check
    pub path: PathBuf,

    /// Kernel to run
    #[arg(short, long, value_enum, default_value_t = Mode::Both)]
    pub mode: Mode,
}

/// Arguments for the bench command
#[derive(Parser, Debug)]
pub struct BenchArgs {
    /// Comma-separated sizes (e.g. 1K,10K,1M)
    #[arg(long, value_delimiter = ',', value_parser = parse_size)]
    pub sizes: Vec<u64>,

    /// Timed calls per kernel per size
    #[arg(short = 'n', long)]
    pub iterations: Option<u32>,

    /// Planted pattern length
    #[arg(short, long)]
    pub pattern_size: Option<usize>,

    /// Directory for generated fixtures
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// RNG seed for fixture generation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip the naive/SIMD agreement check
    #[arg(long)]
    pub no_verify: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Configuration file path
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,
}

impl BenchArgs {
    /// Convert CLI args to Config, merging with file config.
    ///
    /// A file given with `-c` must load; only an absent default file falls
    /// back to [`Config::default`].
    pub fn to_config(&self) -> Result<Config> {
        let mut config = match self.config {
            Some(ref path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        // CLI args override config file
        if !self.sizes.is_empty() {
            config.sizes = self.sizes.clone();
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(pattern_size) = self.pattern_size {
            config.pattern_size = pattern_size;
        }
        if let Some(ref data_dir) = self.data_dir {
            config.data_dir = data_dir.clone();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.no_verify {
            config.verify = false;
        }
        if self.no_progress {
            config.progress = false;
        }

        Ok(config)
    }
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Show the configuration file path
    #[arg(long)]
    pub path: bool,

    /// Create default configuration file
    #[arg(long)]
    pub init: bool,
}

fn parse_size(s: &str) -> std::result::Result<u64, String> {
    Config::parse_size(s).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate_substring() {
        let cli = Cli::parse_from([
            "bytescan", "generate", "substring", "out.txt", "--size", "1K", "-p", "16", "--seed", "3",
        ]);
        match cli.command {
            Commands::Generate(GenerateCommand::Substring(args)) => {
                assert_eq!(args.path, PathBuf::from("out.txt"));
                assert_eq!(args.size, 1024);
                assert_eq!(args.pattern_size, 16);
                assert_eq!(args.seed, Some(3));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_check_defaults_to_both() {
        let cli = Cli::parse_from(["bytescan", "-vv", "check", "b.txt"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Check(args) => assert_eq!(args.mode, Mode::Both),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    fn bench_args(args: &[&str]) -> BenchArgs {
        let cli = Cli::parse_from(["bytescan", "bench"].iter().chain(args).copied());
        match cli.command {
            Commands::Bench(args) => args,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_bench_args_override_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bytescan.toml");
        std::fs::write(&path, "sizes = [64]\niterations = 7\npattern_size = 4\n").unwrap();
        let path_arg = path.to_string_lossy().into_owned();

        let config = bench_args(&["-c", &path_arg]).to_config().unwrap();
        assert_eq!(config.sizes, vec![64]);
        assert_eq!(config.iterations, 7);
        assert_eq!(config.pattern_size, 4);
        assert!(config.verify);

        let config = bench_args(&[
            "--sizes", "1K,2K", "-n", "3", "--no-verify", "--no-progress", "-c", &path_arg,
        ])
        .to_config()
        .unwrap();
        assert_eq!(config.sizes, vec![1024, 2048]);
        assert_eq!(config.iterations, 3);
        assert_eq!(config.pattern_size, 4);
        assert!(!config.verify);
        assert!(!config.progress);
    }

    #[test]
    fn test_bench_args_malformed_config_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "iterations = \"many\"\nsizes = [64]\n").unwrap();
        let path_arg = path.to_string_lossy().into_owned();

        let err = bench_args(&["-c", &path_arg]).to_config().unwrap_err();
        assert!(matches!(err, Error::Config { .. }), "{}", err);
    }

    #[test]
    fn test_bench_args_missing_config_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        let path_arg = path.to_string_lossy().into_owned();

        let err = bench_args(&["-n", "3", "-c", &path_arg]).to_config().unwrap_err();
        assert!(matches!(err, Error::Io { .. }), "{}", err);
    }
}
