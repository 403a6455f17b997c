//! Command-line interface for batch replaying level files

use crate::algorithm::scatter::scatter_tiles;
use crate::io::configuration::{DEFAULT_SEED, LEVEL_EXTENSION, OUTPUT_SUFFIX};
use crate::io::error::{BoardError, Result, file_system_error, invalid_parameter};
use crate::io::level::{LevelFile, LevelOutcome};
use crate::io::progress::ProgressManager;
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "canalbuilder")]
#[command(
    author,
    version,
    about = "Replay canal level files and report start-to-goal connectivity"
)]
/// Command-line arguments for the level replay tool
pub struct Cli {
    /// Level JSON file or directory of level files
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for scatter placement
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of random tiles to scatter before replaying events
    #[arg(long, default_value_t = 0)]
    pub scatter: usize,

    /// Suppress progress output and informational logs
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logs for board operations
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Process levels even if a result file exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Orchestrates batch replay of level files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: ProgressManager,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = if cli.should_show_progress() {
            ProgressManager::new()
        } else {
            ProgressManager::hidden()
        };

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process levels according to CLI arguments
    ///
    /// Returns the outcome of every processed level in processing order.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is invalid, a level cannot be loaded,
    /// or a result file cannot be written
    pub fn process(&mut self) -> Result<Vec<(PathBuf, LevelOutcome)>> {
        let files = self.collect_files()?;
        let mut outcomes = Vec::with_capacity(files.len());

        if files.is_empty() {
            info!("no levels to process");
            return Ok(outcomes);
        }

        self.progress_manager.initialize(files.len());

        for (index, file) in files.iter().enumerate() {
            let outcome = self.process_file(file, index)?;
            outcomes.push((file.clone(), outcome));
        }

        self.progress_manager.finish();

        Ok(outcomes)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;

        if target.is_file() {
            if is_level_file(target) {
                Ok(if self.should_process_file(target) {
                    vec![target.clone()]
                } else {
                    vec![]
                })
            } else {
                Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"target file must be a .json level",
                ))
            }
        } else if target.is_dir() {
            let entries = std::fs::read_dir(target)
                .map_err(|source| file_system_error(target, "read directory", source))?;

            let mut files = Vec::new();
            for entry in entries {
                let path = entry
                    .map_err(|source| file_system_error(target, "read directory", source))?
                    .path();
                if is_level_file(&path) && !is_result_file(&path) && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"target must be a level file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            info!(level = %input_path.display(), "skipping, result exists");
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<LevelOutcome> {
        let start_time = Instant::now();
        let level = LevelFile::from_path(input_path)?;

        self.progress_manager
            .start_level(index, input_path, level.events.len());

        let mut controller = level.build_controller()?;

        if self.cli.scatter > 0 {
            let mut rng = StdRng::seed_from_u64(self.cli.seed);
            let placed = scatter_tiles(controller.board_mut(), self.cli.scatter, &mut rng)?;
            if placed.len() < self.cli.scatter {
                warn!(
                    requested = self.cli.scatter,
                    placed = placed.len(),
                    "board ran out of room while scattering"
                );
            }
        }

        let progress = &mut self.progress_manager;
        let outcome = level.replay_into(&mut controller, |done| {
            progress.update_events(index, done);
        });

        let output_path = Self::get_output_path(input_path);
        let json = serde_json::to_string_pretty(&outcome).map_err(|source| {
            BoardError::Serialization {
                path: output_path.clone(),
                source,
            }
        })?;
        std::fs::write(&output_path, json)
            .map_err(|source| file_system_error(&output_path, "write result", source))?;

        self.progress_manager
            .complete_level(index, outcome.report.connected);

        info!(
            level = %input_path.display(),
            connected = outcome.report.connected,
            path_len = outcome.report.path.len(),
            rejected = outcome.rejected.len(),
            elapsed_secs = start_time.elapsed().as_secs_f64(),
            "level processed"
        );

        Ok(outcome)
    }

    /// Result path written next to a level
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            LEVEL_EXTENSION
        );

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}

fn is_level_file(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(LEVEL_EXTENSION)
}

fn is_result_file(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}
