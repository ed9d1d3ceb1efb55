//! Synthetic input generators
//!
//! Both generators take the random source as a parameter, so a seeded
//! [`rand::rngs::StdRng`] reproduces the same files byte for byte.

use crate::buffer::{pattern_path, write_bytes};
use crate::error::{Error, Result};
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use std::path::Path;

/// Alphabet bytes for bracket data, drawn uniformly.
pub const BRACKETS: [u8; 6] = *b"(){}[]";

/// A substring-search input with its planted pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstringData {
    /// `data_size` bytes from `[a-z]`
    pub data: Vec<u8>,
    /// `pattern_size` bytes from `[a-z]`, drawn independently of `data`
    pub pattern: Vec<u8>,
    /// Where the pattern was written into `data`
    pub offset: usize,
}

impl SubstringData {
    /// The bytes at the planted offset.
    pub fn planted(&self) -> &[u8] {
        &self.data[self.offset..self.offset + self.pattern.len()]
    }
}

fn validate_sizes(data_size: usize, pattern_size: usize) -> Result<()> {
    if data_size == 0 {
        return Err(Error::invalid_argument("data size must be non-zero"));
    }
    if pattern_size == 0 {
        return Err(Error::invalid_argument("pattern size must be non-zero"));
    }
    if pattern_size > data_size {
        return Err(Error::invalid_argument(format!(
            "pattern size {} exceeds data size {}",
            pattern_size, data_size
        )));
    }
    Ok(())
}

/// Build a lowercase buffer with a random lowercase pattern planted at a
/// uniformly chosen offset in `[0, data_size - pattern_size]`.
///
/// # Errors
///
/// [`Error::InvalidArgument`] if either size is zero or the pattern is
/// longer than the data.
pub fn substring_data<R: Rng>(
    rng: &mut R,
    data_size: usize,
    pattern_size: usize,
) -> Result<SubstringData> {
    validate_sizes(data_size, pattern_size)?;

    let letters = Uniform::new_inclusive(b'a', b'z');
    let mut data: Vec<u8> = (&letters).sample_iter(&mut *rng).take(data_size).collect();
    let pattern: Vec<u8> = (&letters).sample_iter(&mut *rng).take(pattern_size).collect();

    let offset = rng.gen_range(0..=data_size - pattern_size);
    data[offset..offset + pattern_size].copy_from_slice(&pattern);

    Ok(SubstringData {
        data,
        pattern,
        offset,
    })
}

/// Generate substring data into `path` and its pattern into the sibling
/// pattern file. Sizes are validated before any file is touched.
pub fn generate_substring_data<R: Rng>(
    rng: &mut R,
    path: &Path,
    data_size: usize,
    pattern_size: usize,
) -> Result<()> {
    let generated = substring_data(rng, data_size, pattern_size)?;

    write_bytes(path, &generated.data)?;
    write_bytes(&pattern_path(path), &generated.pattern)?;

    tracing::info!(
        path = %path.display(),
        data_size,
        pattern_size,
        offset = generated.offset,
        "Generated substring data"
    );
    Ok(())
}

/// Draw `data_size` bytes uniformly from the six bracket characters.
///
/// No balance is enforced; the result may or may not be balanced.
pub fn bracket_data<R: Rng>(rng: &mut R, data_size: usize) -> Vec<u8> {
    let index = Uniform::new(0, BRACKETS.len());
    index
        .sample_iter(rng)
        .take(data_size)
        .map(|i| BRACKETS[i])
        .collect()
}

/// Generate bracket data into `path`.
pub fn generate_bracket_data<R: Rng>(
    rng: &mut R,
    path: &Path,
    data_size: usize,
) -> Result<()> {
    let data = bracket_data(rng, data_size);
    write_bytes(path, &data)?;

    tracing::info!(path = %path.display(), data_size, "Generated bracket data");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::substring::{naive_contains, simd_contains};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_substring_data_plants_pattern() {
        let mut rng = StdRng::seed_from_u64(7);
        for (data_size, pattern_size) in [(1, 1), (8, 8), (100, 3), (1024, 8), (4097, 64)] {
            let generated = substring_data(&mut rng, data_size, pattern_size).unwrap();
            assert_eq!(generated.data.len(), data_size);
            assert_eq!(generated.pattern.len(), pattern_size);
            assert!(generated.offset <= data_size - pattern_size);
            assert_eq!(generated.planted(), &generated.pattern[..]);
            assert!(naive_contains(&generated.data, &generated.pattern));
            assert!(simd_contains(&generated.data, &generated.pattern));
        }
    }

    #[test]
    fn test_substring_data_alphabet() {
        let mut rng = StdRng::seed_from_u64(1);
        let generated = substring_data(&mut rng, 2048, 16).unwrap();
        assert!(generated.data.iter().all(u8::is_ascii_lowercase));
        assert!(generated.pattern.iter().all(u8::is_ascii_lowercase));
    }

    #[test]
    fn test_substring_data_rejects_bad_sizes() {
        let mut rng = StdRng::seed_from_u64(0);
        for (data_size, pattern_size) in [(0, 0), (0, 1), (10, 0), (10, 11)] {
            let err = substring_data(&mut rng, data_size, pattern_size).unwrap_err();
            assert!(
                matches!(err, Error::InvalidArgument { .. }),
                "({}, {}) gave {:?}",
                data_size,
                pattern_size,
                err
            );
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = substring_data(&mut StdRng::seed_from_u64(42), 512, 8).unwrap();
        let b = substring_data(&mut StdRng::seed_from_u64(42), 512, 8).unwrap();
        assert_eq!(a, b);

        let x = bracket_data(&mut StdRng::seed_from_u64(42), 512);
        let y = bracket_data(&mut StdRng::seed_from_u64(42), 512);
        assert_eq!(x, y);
    }

    #[test]
    fn test_bracket_data_alphabet() {
        let data = bracket_data(&mut StdRng::seed_from_u64(3), 10_000);
        assert_eq!(data.len(), 10_000);
        assert!(data.iter().all(|b| BRACKETS.contains(b)));
        // Uniform draw over 10k bytes hits every symbol
        for symbol in BRACKETS {
            assert!(data.contains(&symbol), "missing {}", symbol as char);
        }
    }

    #[test]
    fn test_bracket_data_empty() {
        assert!(bracket_data(&mut StdRng::seed_from_u64(3), 0).is_empty());
    }
}
