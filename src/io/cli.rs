//! Command-line interface for rearranging one image or a directory of images

use crate::algorithm::executor::{EngineConfig, Mode, ReassignmentEngine, RunContext, RunRequest};
use crate::algorithm::munkres::KuhnMunkresSolver;
use crate::algorithm::scheduler::{NoProgress, ThreadYield};
use crate::algorithm::window::Quality;
use crate::color::distance::mean_euclidean_error;
use crate::io::configuration::{
    DEFAULT_CHUNK_SIZE, DEFAULT_EXACT_CEILING, DEFAULT_GRID_SIZE, DEFAULT_QUALITY, MAX_QUALITY,
    MIN_CANDIDATE_WINDOW, OUTPUT_SUFFIX, SUPPORTED_EXTENSIONS,
};
use crate::io::error::{ReassignError, Result, path_error};
use crate::io::image::{PixelGrid, export_grid_as_png, validate_grid_size};
use crate::io::progress::ProgressManager;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "pixel-reassign")]
#[command(
    author,
    version,
    about = "Rearrange the pixels of an image so they reproduce a target image"
)]
/// Command-line arguments for the pixel reassignment tool
pub struct Cli {
    /// Source image or directory of images whose pixels are rearranged
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Image the rearranged pixels should reproduce
    #[arg(short, long, value_name = "IMAGE")]
    pub target: PathBuf,

    /// Side length of the square working grid in pixels
    #[arg(short, long, default_value_t = DEFAULT_GRID_SIZE)]
    pub grid: u32,

    /// Quality/speed trade-off from 0 (fastest) to 100 (best)
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_QUALITY,
        value_parser = clap::value_parser!(u8).range(0..=i64::from(MAX_QUALITY))
    )]
    pub quality: u8,

    /// Use the exact (optimal) matching solver instead of the greedy search
    #[arg(short = 'x', long)]
    pub exact: bool,

    /// Fall back to the greedy search when exact mode cannot run
    #[arg(short, long)]
    pub fallback: bool,

    /// Largest pixel count accepted in exact mode
    #[arg(long, default_value_t = DEFAULT_EXACT_CEILING)]
    pub exact_ceiling: usize,

    /// Output file (single source only; defaults to <source>_result.png)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Suppress progress output
    #[arg(long)]
    pub quiet: bool,
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

    /// Assignment mode selected by the flags
    pub const fn mode(&self) -> Mode {
        if self.exact { Mode::Exact } else { Mode::Heuristic }
    }

    /// Engine configuration selected by the flags
    pub const fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            chunk_size: DEFAULT_CHUNK_SIZE,
            min_window: MIN_CANDIDATE_WINDOW,
            exact_ceiling: self.exact_ceiling,
            fallback_to_heuristic: self.fallback,
        }
    }
}

/// Orchestrates processing of source files with progress tracking
///
/// Every file gets its own independent run on the same engine, one after
/// the other.
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The grid size, quality or paths are invalid
    /// - An image cannot be loaded or written
    /// - The engine rejects a run
    pub fn process(&mut self) -> Result<()> {
        validate_grid_size(self.cli.grid)?;
        let quality = Quality::new(self.cli.quality)?;

        let files = self.collect_files()?;
        if files.is_empty() {
            return Ok(());
        }
        if self.cli.output.is_some() && files.len() > 1 {
            return Err(path_error(
                "--output can only be used with a single source file",
            ));
        }

        let target = PixelGrid::load(&self.cli.target, self.cli.grid)?;
        let mut engine = ReassignmentEngine::new(self.cli.engine_config())?;
        if self.cli.exact {
            engine = engine.with_solver(Box::new(KuhnMunkresSolver));
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(&engine, &target, quality, file, index)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let source = &self.cli.source;
        if source.is_file() {
            if !is_supported_image(source) {
                return Err(path_error("Source file must be a PNG or JPEG image"));
            }
            if self.should_process_file(source) {
                Ok(vec![source.clone()])
            } else {
                Ok(vec![])
            }
        } else if source.is_dir() {
            let entries = std::fs::read_dir(source).map_err(|e| ReassignError::FileSystem {
                path: source.clone(),
                operation: "read directory",
                source: e,
            })?;
            let mut files = Vec::new();
            for entry in entries {
                let path = entry?.path();
                if is_supported_image(&path)
                    && !is_generated_output(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(path_error("Source must be an image file or directory"))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = self.output_path_for(input_path);
        if output_path.exists() {
            tracing::info!(
                source = %input_path.display(),
                "skipping, output already exists"
            );
            false
        } else {
            true
        }
    }

    fn process_file(
        &mut self,
        engine: &ReassignmentEngine,
        target: &PixelGrid,
        quality: Quality,
        input_path: &Path,
        index: usize,
    ) -> Result<()> {
        let start_time = Instant::now();
        let output_path = self.output_path_for(input_path);

        let source = PixelGrid::load(input_path, self.cli.grid)?;
        let request = RunRequest::new(source.colors(), target.colors())
            .with_quality(quality)
            .with_mode(self.cli.mode());

        let mut yielder = ThreadYield;
        let output = match self.progress_manager {
            Some(ref mut pm) => {
                pm.start_file(index, input_path);
                let mut sink = pm.sink(index);
                engine.run(&request, &mut RunContext::new(&mut sink, &mut yielder))?
            }
            None => engine.run(&request, &mut RunContext::new(&mut NoProgress, &mut yielder))?,
        };

        let mean_error = mean_euclidean_error(&output.pixels, target.colors());
        let rearranged = PixelGrid::new(source.side(), output.pixels)?;
        export_grid_as_png(&rearranged, &output_path)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index);
        }

        tracing::info!(
            source = %input_path.display(),
            output = %output_path.display(),
            mode = %output.mode,
            total_cost = output.total_cost,
            mean_error,
            elapsed_ms = start_time.elapsed().as_millis(),
            "rearranged image written"
        );
        Ok(())
    }

    /// Output location for a source file
    pub fn output_path_for(&self, input_path: &Path) -> PathBuf {
        self.cli
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(input_path))
    }
}

/// `<stem>_result.png` next to the source file
pub fn default_output_path(input_path: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let output_name = format!("{}{OUTPUT_SUFFIX}.png", stem.to_string_lossy());

    match input_path.parent() {
        Some(parent) => parent.join(output_name),
        None => PathBuf::from(output_name),
    }
}

fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

// Keeps a directory rerun from treating earlier results as new sources
fn is_generated_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}
