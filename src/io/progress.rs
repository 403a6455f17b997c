//! Multi-level progress tracking with automatic batching for large sets

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

/// Coordinates progress display while replaying a batch of levels
///
/// Shows one bar per level for small batches and adds a single batch bar
/// once the level count exceeds the individual bar limit. Individual bars
/// always show the most recent levels.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    level_bars: Vec<ProgressBar>,
    /// Stores (`name`, `events_done`, `events_total`) for rolling window display
    level_states: Vec<(String, usize, usize)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static EVENT_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Levels: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            level_bars: Vec::new(),
            level_states: Vec::new(),
        }
    }

    /// Create a manager whose bars are never drawn
    pub fn hidden() -> Self {
        Self {
            multi_progress: MultiProgress::with_draw_target(
                indicatif::ProgressDrawTarget::hidden(),
            ),
            ..Self::new()
        }
    }

    /// Initialize progress bars based on level count
    pub fn initialize(&mut self, level_count: usize) {
        if level_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(level_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..level_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(0);
            bar.set_style(EVENT_STYLE.clone());
            self.level_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Number of individual level bars in use
    pub fn level_bar_count(&self) -> usize {
        self.level_bars.len()
    }

    /// Whether the batch bar is in use
    pub const fn is_batched(&self) -> bool {
        self.batch_bar.is_some()
    }

    /// Configure progress for a new level
    pub fn start_level(&mut self, index: usize, path: &Path, event_count: usize) {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.level_states.len() {
            self.level_states.resize(index + 1, (String::new(), 0, 0));
        }
        if let Some(state) = self.level_states.get_mut(index) {
            *state = (display_name, 0, event_count);
        }
        self.update_bars();
    }

    /// Report how many events of a level have been replayed
    pub fn update_events(&mut self, index: usize, events_done: usize) {
        if let Some(state) = self.level_states.get_mut(index) {
            state.1 = events_done;
        }
        self.update_bars();
    }

    /// Mark a level as completed with its connectivity verdict
    pub fn complete_level(&mut self, index: usize, connected: bool) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.level_states.get_mut(index) {
            let mark = if connected { "✓" } else { "✗" };
            state.0 = format!("{mark} {}", state.0);
            state.1 = state.2;
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All levels processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Snapshot of (`name`, `events_done`, `events_total`) for a level
    pub fn level_state(&self, index: usize) -> Option<(&str, usize, usize)> {
        self.level_states
            .get(index)
            .map(|(name, done, total)| (name.as_str(), *done, *total))
    }

    /// Show the last N active levels on the individual bars
    fn update_bars(&self) {
        let active: Vec<&(String, usize, usize)> = self
            .level_states
            .iter()
            .filter(|(name, _, _)| !name.is_empty())
            .collect();

        let start_idx = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start_idx..).unwrap_or(&[]);

        for (bar, (name, done, total)) in self.level_bars.iter().zip(visible) {
            bar.set_length(*total as u64);
            bar.set_position(*done as u64);
            let width = total.to_string().len();
            bar.set_message(format!("{done:>width$}/{total}"));
            bar.set_prefix(name.clone());
        }

        for bar in self.level_bars.iter().skip(visible.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}
