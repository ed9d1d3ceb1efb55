//! Size-sweep benchmark harness
//!
//! For each configured size the harness generates one substring fixture
//! (data file plus pattern sibling) and one bracket fixture, then times the
//! four kernels against those files. Every timed call goes through the
//! file-level entry points, so the measured cost includes the buffer load,
//! as the kernels are used in practice.

use crate::brackets::{naive_bracket_check, simd_bracket_check};
use crate::buffer::read_pattern;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::BenchReport;
use crate::generate::{generate_bracket_data, generate_substring_data};
use crate::progress::BenchProgress;
use crate::simd::Backend;
use crate::substring::{naive_substring_search, simd_substring_search};
use rand::Rng;
use std::hint::black_box;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// One of the four timed kernels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kernel {
    NaiveSubstring,
    SimdSubstring,
    NaiveBracket,
    SimdBracket,
}

impl Kernel {
    pub const ALL: [Kernel; 4] = [
        Self::NaiveSubstring,
        Self::SimdSubstring,
        Self::NaiveBracket,
        Self::SimdBracket,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::NaiveSubstring => "NaiveSubstring",
            Self::SimdSubstring => "SIMDSubstring",
            Self::NaiveBracket => "NaiveBracket",
            Self::SimdBracket => "SIMDBracket",
        }
    }

    /// One call against a fixture
    pub fn run(self, fixture: &Fixture) -> Result<bool> {
        match self {
            Self::NaiveSubstring => naive_substring_search(&fixture.substring_path, &fixture.pattern),
            Self::SimdSubstring => simd_substring_search(&fixture.substring_path, &fixture.pattern),
            Self::NaiveBracket => naive_bracket_check(&fixture.bracket_path),
            Self::SimdBracket => simd_bracket_check(&fixture.bracket_path),
        }
    }

    /// Data file this kernel reads
    pub fn input<'a>(self, fixture: &'a Fixture) -> &'a Path {
        match self {
            Self::NaiveSubstring | Self::SimdSubstring => &fixture.substring_path,
            Self::NaiveBracket | Self::SimdBracket => &fixture.bracket_path,
        }
    }
}

/// Generated input files for one size
#[derive(Debug, Clone)]
pub struct Fixture {
    pub size: u64,
    pub substring_path: PathBuf,
    /// Read back from the pattern sibling file
    pub pattern: Vec<u8>,
    pub bracket_path: PathBuf,
}

/// Timing of `iterations` calls of one kernel on one fixture
#[derive(Debug, Clone)]
pub struct Measurement {
    pub kernel: Kernel,
    pub size: u64,
    pub iterations: u32,
    pub elapsed: Duration,
    /// Result of the last call
    pub result: bool,
}

impl Measurement {
    /// Mean time per call
    pub fn per_call(&self) -> Duration {
        self.elapsed / self.iterations.max(1)
    }

    /// Bytes processed per second
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        (self.size as f64 * self.iterations as f64) / secs
    }
}

/// Benchmark driver
pub struct Harness {
    config: Config,
}

impl Harness {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Create the data directory and generate one fixture per size.
    pub fn prepare<R: Rng>(&self, rng: &mut R) -> Result<Vec<Fixture>> {
        let dir = &self.config.data_dir;
        std::fs::create_dir_all(dir)
            .map_err(|e| Error::io(format!("creating {}", dir.display()), e))?;

        let mut fixtures = Vec::with_capacity(self.config.sizes.len());
        for &size in &self.config.sizes {
            let data_size = usize::try_from(size)
                .map_err(|_| Error::invalid_argument(format!("size {} too large", size)))?;
            let tag = Config::size_tag(size);

            let substring_path = dir.join(format!("data_substring_{}.txt", tag));
            generate_substring_data(rng, &substring_path, data_size, self.config.pattern_size)?;
            let pattern = read_pattern(&substring_path)?;

            let bracket_path = dir.join(format!("data_brackets_{}.txt", tag));
            generate_bracket_data(rng, &bracket_path, data_size)?;

            fixtures.push(Fixture {
                size,
                substring_path,
                pattern,
                bracket_path,
            });
        }

        tracing::info!(dir = %dir.display(), count = fixtures.len(), "Prepared fixtures");
        Ok(fixtures)
    }

    /// Time one kernel on one fixture.
    pub fn measure(&self, kernel: Kernel, fixture: &Fixture) -> Result<Measurement> {
        let iterations = self.config.iterations.max(1);

        let mut result = false;
        let start = Instant::now();
        for _ in 0..iterations {
            result = black_box(kernel.run(black_box(fixture))?);
        }
        let elapsed = start.elapsed();

        tracing::debug!(
            kernel = kernel.name(),
            size = fixture.size,
            iterations,
            elapsed_us = elapsed.as_micros() as u64,
            result,
            "Measured kernel"
        );

        Ok(Measurement {
            kernel,
            size: fixture.size,
            iterations,
            elapsed,
            result,
        })
    }

    /// Prepare fixtures and time every kernel on every size.
    ///
    /// With `verify` set, fails on the first fixture where a naive kernel
    /// and its SIMD twin return different results.
    pub fn run<R: Rng>(&self, rng: &mut R) -> Result<BenchReport> {
        let fixtures = self.prepare(rng)?;
        let backend = Backend::detect();

        let total = (fixtures.len() * Kernel::ALL.len()) as u64;
        let progress = BenchProgress::new(total, self.config.progress);

        let mut measurements = Vec::with_capacity(total as usize);
        for fixture in &fixtures {
            let tag = Config::size_tag(fixture.size);
            for kernel in Kernel::ALL {
                progress.start(kernel.name(), &tag);
                measurements.push(self.measure(kernel, fixture)?);
                progress.finish_run();
            }

            if self.config.verify {
                // Measurements for this fixture are the last four pushed
                let recent = &measurements[measurements.len() - Kernel::ALL.len()..];
                for pair in recent.chunks_exact(2) {
                    check_agreement(&pair[0], &pair[1], fixture)?;
                }
            }
        }
        progress.finish();

        tracing::info!(
            backend = backend.name(),
            runs = measurements.len(),
            "Benchmark sweep complete"
        );
        Ok(BenchReport {
            backend: backend.name(),
            measurements,
        })
    }
}

fn check_agreement(naive: &Measurement, simd: &Measurement, fixture: &Fixture) -> Result<()> {
    if naive.result == simd.result {
        return Ok(());
    }
    let path = naive.kernel.input(fixture).to_path_buf();
    tracing::warn!(
        path = %path.display(),
        naive = naive.result,
        simd = simd.result,
        "Naive and SIMD kernels disagree"
    );
    Err(Error::Divergence {
        path,
        naive: naive.result,
        simd: simd.result,
    })
}
