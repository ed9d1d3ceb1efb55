//! bytescan - scalar vs. SIMD byte-stream scanning kernels

use anyhow::{bail, Context};
use bytescan::bench::Harness;
use bytescan::buffer::read_pattern;
use bytescan::cli::{CheckArgs, Cli, Commands, ConfigArgs, GenerateCommand, Mode, SearchArgs};
use bytescan::config::Config;
use bytescan::simd::Backend;
use bytescan::{brackets, generate, substring};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose, cli.json);

    match cli.command {
        Commands::Generate(GenerateCommand::Substring(args)) => {
            let mut rng = make_rng(args.seed);
            let size = to_usize(args.size)?;
            generate::generate_substring_data(&mut rng, &args.path, size, args.pattern_size)?;
        }

        Commands::Generate(GenerateCommand::Brackets(args)) => {
            let mut rng = make_rng(args.seed);
            let size = to_usize(args.size)?;
            generate::generate_bracket_data(&mut rng, &args.path, size)?;
        }

        Commands::Search(args) => handle_search(args)?,

        Commands::Check(args) => handle_check(args)?,

        Commands::Bench(args) => {
            let config = args.to_config()?;
            tracing::info!(
                sizes = config.sizes.len(),
                iterations = config.iterations,
                data_dir = %config.data_dir.display(),
                backend = Backend::detect().name(),
                "Starting benchmark"
            );
            let mut rng = make_rng(config.seed);
            let report = Harness::new(config).run(&mut rng)?;
            report.print();
        }

        Commands::Config(args) => {
            handle_config_command(args)?;
        }
    }

    Ok(())
}

/// Logs go to stderr so `search`/`check` results stay alone on stdout.
/// `RUST_LOG` wins over `-v` when set.
fn init_tracing(verbose: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_directive(verbose)));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

fn log_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "bytescan=info",
        1 => "bytescan=debug",
        2 => "bytescan=trace",
        _ => "trace",
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn to_usize(size: u64) -> anyhow::Result<usize> {
    usize::try_from(size).with_context(|| format!("size {} does not fit in memory", size))
}

/// Run the selected kernel(s); `both` must agree.
fn run_mode(
    mode: Mode,
    path: &Path,
    naive: impl Fn() -> bytescan::Result<bool>,
    simd: impl Fn() -> bytescan::Result<bool>,
) -> anyhow::Result<bool> {
    match mode {
        Mode::Naive => Ok(naive()?),
        Mode::Simd => Ok(simd()?),
        Mode::Both => {
            let (n, s) = (naive()?, simd()?);
            if n != s {
                bail!(bytescan::Error::Divergence {
                    path: path.to_path_buf(),
                    naive: n,
                    simd: s,
                });
            }
            Ok(n)
        }
    }
}

fn handle_search(args: SearchArgs) -> anyhow::Result<()> {
    let pattern = match args.pattern {
        Some(text) => text.into_bytes(),
        None => read_pattern(&args.path)?,
    };

    let found = run_mode(
        args.mode,
        &args.path,
        || substring::naive_substring_search(&args.path, &pattern),
        || substring::simd_substring_search(&args.path, &pattern),
    )?;
    println!("{}", if found { "found" } else { "not found" });
    Ok(())
}

fn handle_check(args: CheckArgs) -> anyhow::Result<()> {
    let balanced = run_mode(
        args.mode,
        &args.path,
        || brackets::naive_bracket_check(&args.path),
        || brackets::simd_bracket_check(&args.path),
    )?;
    println!("{}", if balanced { "balanced" } else { "unbalanced" });
    Ok(())
}

/// `config --path` prints where the file lives, `--init` writes the defaults
/// there (never over an existing file), and no flag prints the effective
/// configuration.
fn handle_config_command(args: ConfigArgs) -> anyhow::Result<()> {
    let path = Config::default_config_path()?;

    if args.path {
        println!("{}", path.display());
        return Ok(());
    }

    if args.init {
        if path.exists() {
            bail!("configuration already exists at {}", path.display());
        }
        Config::default().save_to(&path)?;
        tracing::info!(path = %path.display(), "Wrote default configuration");
        return Ok(());
    }

    let config = Config::load().with_context(|| format!("loading {}", path.display()))?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
