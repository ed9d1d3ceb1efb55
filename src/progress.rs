//! Progress display for benchmark sweeps

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar over (size, kernel) runs.
///
/// Redraws happen only on [`start`](Self::start) and
/// [`finish_run`](Self::finish_run), never on a background ticker, so nothing
/// competes with a timed loop.
pub struct BenchProgress {
    bar: ProgressBar,
}

impl BenchProgress {
    /// Create a bar for `total` runs; hidden when `enabled` is false
    pub fn new(total: u64, enabled: bool) -> Self {
        let bar = if enabled {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=>-"),
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        Self { bar }
    }

    /// Show which run is in flight
    pub fn start(&self, kernel: &str, size_tag: &str) {
        self.bar.set_message(format!("{} {}", kernel, size_tag));
    }

    /// Mark one run done
    pub fn finish_run(&self) {
        self.bar.inc(1);
    }

    /// Clear the bar
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_progress_counts_runs() {
        let progress = BenchProgress::new(4, false);
        progress.start("NaiveSubstring", "1KB");
        progress.finish_run();
        progress.finish_run();
        assert_eq!(progress.bar.position(), 2);
        progress.finish();
    }

    #[test]
    fn test_enabled_progress_tracks_runs() {
        let progress = BenchProgress::new(2, true);
        progress.start("SIMDBracket", "1KB");
        progress.finish_run();
        assert_eq!(progress.bar.position(), 1);
        assert!(!progress.bar.is_finished());
        progress.finish();
        assert!(progress.bar.is_finished());
    }
}
