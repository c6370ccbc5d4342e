//! Multi-file progress tracking with automatic batching for large sets

use crate::algorithm::scheduler::ProgressSink;
use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, PROGRESS_RESOLUTION};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

/// Coordinates progress display for batch operations
///
/// Small batches get one bar per file; larger batches additionally get a
/// single bar counting finished files, and only the most recent files keep a
/// visible per-file bar.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    /// Stores (`filename`, `fraction`) for the rolling window display
    file_states: Vec<(String, f64)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static FILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg:>5} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
            file_states: Vec::new(),
        }
    }

    /// Initialize progress bars based on file count
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let pb = ProgressBar::new(PROGRESS_RESOLUTION);
            pb.set_style(FILE_STYLE.clone());
            self.file_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Register a file that is about to be processed
    pub fn start_file(&mut self, index: usize, path: &Path) {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.file_states.len() {
            self.file_states.resize(index + 1, (String::new(), 0.0));
        }
        if let Some(state) = self.file_states.get_mut(index) {
            *state = (display_name, 0.0);
        }
        self.update_bars();
    }

    /// Report the completion fraction of a file
    pub fn update_fraction(&mut self, index: usize, fraction: f64) {
        if let Some(state) = self.file_states.get_mut(index) {
            state.1 = fraction.clamp(0.0, 1.0);
        }
        self.update_bars();
    }

    /// Mark file as completed and update batch progress
    pub fn complete_file(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.file_states.get_mut(index) {
            state.0 = format!("✓ {}", state.0);
            state.1 = 1.0;
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All files processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Progress sink feeding one file's bar
    pub fn sink(&mut self, index: usize) -> FileProgress<'_> {
        FileProgress {
            manager: self,
            index,
        }
    }

    fn update_bars(&self) {
        let active: Vec<&(String, f64)> = self
            .file_states
            .iter()
            .filter(|(name, _)| !name.is_empty())
            .collect();

        let start_idx = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start_idx..).unwrap_or(&[]);

        for (bar_idx, (name, fraction)) in visible.iter().enumerate() {
            if let Some(bar) = self.file_bars.get(bar_idx) {
                bar.set_position((fraction * PROGRESS_RESOLUTION as f64).round() as u64);
                bar.set_message(format!("{:.0}%", fraction * 100.0));
                bar.set_prefix(name.clone());
            }
        }

        for bar in self.file_bars.iter().skip(visible.len()) {
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}

/// Forwards engine progress events to one file's bar
pub struct FileProgress<'a> {
    manager: &'a mut ProgressManager,
    index: usize,
}

impl ProgressSink for FileProgress<'_> {
    fn report(&mut self, fraction: f64) {
        self.manager.update_fraction(self.index, fraction);
    }
}
