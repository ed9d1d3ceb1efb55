//! Input buffers and raw-byte data files
//!
//! A [`Buffer`] is the full contents of one data file, memory-mapped read-only
//! under a shared file lock. It lives for exactly one check call and is
//! released (map and lock) when dropped, on every exit path.
//!
//! Data and pattern files are raw bytes with no header. The pattern for a
//! substring data file lives next to it at [`pattern_path`].

use crate::error::{Error, Result};
use fs2::FileExt;
use memmap2::Mmap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::ops::Deref;
use std::path::{Path, PathBuf};

/// Suffix appended to a substring data file to name its pattern file.
pub const PATTERN_SUFFIX: &str = ".pattern.txt";

/// A read-only memory-mapped data file with an associated shared (read) lock.
///
/// The lock is held for the lifetime of this struct. [`write_bytes`] takes
/// the exclusive lock before truncating, so it cannot shrink a file that is
/// still mapped here.
pub struct Buffer {
    mmap: Mmap,
    /// Kept open to hold the lock; released on drop
    #[allow(dead_code)]
    file: File,
}

impl Buffer {
    /// Open and map a data file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened, locked or mapped.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| Error::io(format!("opening {}", path.display()), e))?;

        // Blocks while another process holds an exclusive lock
        FileExt::lock_shared(&file)
            .map_err(|e| Error::io(format!("locking {}", path.display()), e))?;

        // Safety: writers going through `write_bytes` (in this or another
        // process) block on the shared lock until the map is dropped.
        let mmap = unsafe { Mmap::map(&file) }
            .map_err(|e| Error::io(format!("mapping {}", path.display()), e))?;

        tracing::debug!(path = %path.display(), size = mmap.len(), "Loaded buffer");
        Ok(Self { mmap, file })
    }

    /// Length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.mmap.is_empty()
    }
}

impl Deref for Buffer {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.mmap
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        &self.mmap
    }
}

/// Path of the pattern file that accompanies a substring data file.
pub fn pattern_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(PATTERN_SUFFIX);
    PathBuf::from(name)
}

/// Read the persisted pattern for a substring data file.
pub fn read_pattern(path: &Path) -> Result<Vec<u8>> {
    let pattern_file = pattern_path(path);
    std::fs::read(&pattern_file)
        .map_err(|e| Error::io(format!("reading pattern {}", pattern_file.display()), e))
}

/// Create or truncate `path` and write `data` verbatim.
///
/// Truncation happens only after an exclusive lock is held, so it waits for
/// every live [`Buffer`] on the same file to drop. A failed write may leave a
/// truncated file behind.
pub fn write_bytes(path: &Path, data: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .map_err(|e| Error::io(format!("creating {}", path.display()), e))?;

    FileExt::lock_exclusive(&file)
        .map_err(|e| Error::io(format!("locking {}", path.display()), e))?;
    file.set_len(0)
        .map_err(|e| Error::io(format!("truncating {}", path.display()), e))?;
    file.write_all(data)
        .map_err(|e| Error::io(format!("writing {}", path.display()), e))?;
    file.flush()
        .map_err(|e| Error::io(format!("flushing {}", path.display()), e))?;

    tracing::debug!(path = %path.display(), size = data.len(), "Wrote data file");
    Ok(())
}
