//! bytescan - Scalar and SIMD byte-stream scanning kernels
//!
//! Two engines, each a scalar baseline plus a vectorized variant that must
//! return the same answer on every input:
//! - fixed-pattern substring search ([`substring`])
//! - balanced-bracket validation ([`brackets`])
//!
//! Reproducible synthetic inputs come from [`generate`], and [`bench`] drives
//! a size sweep over generated files.

pub mod bench;
pub mod brackets;
pub mod buffer;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod generate;
pub mod progress;
pub mod simd;
pub mod substring;

pub use brackets::{naive_bracket_check, simd_bracket_check};
pub use config::Config;
pub use error::{Error, Result};
pub use generate::{generate_bracket_data, generate_substring_data};
pub use substring::{naive_substring_search, simd_substring_search};
