use crate::{
    algorithm::assignment::Assignment,
    algorithm::exact::{CostMatrix, ExactSolver, solve_checked},
    algorithm::greedy::GreedyAssigner,
    algorithm::scheduler::{ChunkScheduler, ProgressSink, Yielder},
    algorithm::window::{Quality, candidate_window},
    color::Color,
    io::configuration::{DEFAULT_CHUNK_SIZE, DEFAULT_EXACT_CEILING, MIN_CANDIDATE_WINDOW},
    io::error::{ReassignError, Result, invalid_parameter},
};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Which assignment strategy a run should use
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Bounded-window greedy search
    #[default]
    Heuristic,
    /// Globally optimal matching through the injected solver
    Exact,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heuristic => write!(f, "heuristic"),
            Self::Exact => write!(f, "exact"),
        }
    }
}

/// Tunables fixed for the lifetime of an engine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Target slots processed between progress reports
    pub chunk_size: usize,
    /// Smallest candidate window regardless of quality
    pub min_window: usize,
    /// Largest pixel count accepted in exact mode
    pub exact_ceiling: usize,
    /// Run the heuristic instead of failing when exact mode is unavailable or too large
    pub fallback_to_heuristic: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            min_window: MIN_CANDIDATE_WINDOW,
            exact_ceiling: DEFAULT_EXACT_CEILING,
            fallback_to_heuristic: false,
        }
    }
}

impl EngineConfig {
    /// Check that every tunable is usable
    ///
    /// # Errors
    ///
    /// Returns an error if the chunk size is zero
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(invalid_parameter(
                "chunk_size",
                &self.chunk_size,
                &"must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Inputs for one run
#[derive(Clone, Copy, Debug)]
pub struct RunRequest<'a> {
    /// Pool of pixels to draw from
    pub source: &'a [Color],
    /// Colors each output position should approximate
    pub target: &'a [Color],
    /// Quality/speed trade-off for the heuristic
    pub quality: Quality,
    /// Strategy requested by the caller
    pub mode: Mode,
}

impl<'a> RunRequest<'a> {
    /// Heuristic request with default quality
    pub fn new(source: &'a [Color], target: &'a [Color]) -> Self {
        Self {
            source,
            target,
            quality: Quality::default(),
            mode: Mode::Heuristic,
        }
    }

    /// Set the quality
    #[must_use]
    pub const fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    /// Set the mode
    #[must_use]
    pub const fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }
}

/// Caller-owned collaborators for one run
pub struct RunContext<'a> {
    /// Receives completion fractions
    pub progress: &'a mut dyn ProgressSink,
    /// Suspends between chunks
    pub yielder: &'a mut dyn Yielder,
}

impl<'a> RunContext<'a> {
    /// Bundle a progress sink and a yielder
    pub fn new(progress: &'a mut dyn ProgressSink, yielder: &'a mut dyn Yielder) -> Self {
        Self { progress, yielder }
    }
}

/// Result of a successful run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOutput {
    /// Rearranged pixels in target scan order
    pub pixels: Vec<Color>,
    /// Source index chosen for each target slot
    pub assignment: Assignment,
    /// Sum of squared distances between output and target
    pub total_cost: u64,
    /// Strategy that actually produced the result
    pub mode: Mode,
}

/// Computes pixel reassignments, one run at a time
///
/// The engine keeps no state between runs apart from its configuration and
/// the optional exact solver. Starting a run while another is active on the
/// same engine fails with `AlreadyRunning`.
pub struct ReassignmentEngine {
    config: EngineConfig,
    solver: Option<Box<dyn ExactSolver>>,
    active: AtomicBool,
}

impl fmt::Debug for ReassignmentEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReassignmentEngine")
            .field("config", &self.config)
            .field("solver", &self.solver.as_ref().map(|s| s.name()))
            .field("active", &self.active.load(Ordering::Relaxed))
            .finish()
    }
}

// Clears the active flag when the run ends, successfully or not
struct ActiveRun<'a>(&'a AtomicBool);

impl Drop for ActiveRun<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ReassignmentEngine {
    /// Create an engine without an exact solver
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            solver: None,
            active: AtomicBool::new(false),
        })
    }

    /// Install the exact solver capability
    #[must_use]
    pub fn with_solver(mut self, solver: Box<dyn ExactSolver>) -> Self {
        self.solver = Some(solver);
        self
    }

    /// Engine configuration
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Test whether an exact solver is installed
    pub const fn has_solver(&self) -> bool {
        self.solver.is_some()
    }

    /// Test whether a run is currently active
    pub fn is_running(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Compute an assignment and the output buffer it produces
    ///
    /// An empty request succeeds immediately with an empty output and a
    /// single `1.0` progress event, whatever the mode.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Another run is active on this engine
    /// - Source and target lengths differ
    /// - Exact mode is requested without a solver, or above the ceiling,
    ///   and fallback is disabled
    /// - The exact solver fails or returns something other than a permutation
    pub fn run(&self, request: &RunRequest<'_>, context: &mut RunContext<'_>) -> Result<RunOutput> {
        if self
            .active
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            tracing::warn!("rejected run request while another run is active");
            return Err(ReassignError::AlreadyRunning);
        }
        let _active = ActiveRun(&self.active);

        let (source, target) = (request.source, request.target);
        if source.len() != target.len() {
            return Err(ReassignError::SizeMismatch {
                source_len: source.len(),
                target_len: target.len(),
            });
        }

        let mut scheduler = ChunkScheduler::new(self.config.chunk_size, context)?;

        if target.is_empty() {
            scheduler.finish();
            return Ok(RunOutput {
                pixels: Vec::new(),
                assignment: Assignment::default(),
                total_cost: 0,
                mode: request.mode,
            });
        }

        let mode = self.resolve_mode(request.mode, target.len())?;
        tracing::debug!(
            pixels = target.len(),
            quality = %request.quality,
            requested = %request.mode,
            %mode,
            "starting reassignment run"
        );

        let assignment = match (mode, self.solver.as_deref()) {
            (Mode::Exact, Some(solver)) => {
                Self::run_exact(solver, source, target, &mut scheduler)?
            }
            _ => self.run_heuristic(request.quality, source, target, &mut scheduler)?,
        };
        scheduler.finish();

        let pixels = assignment.render(source, target);
        let total_cost = assignment.total_cost(source, target);
        tracing::debug!(total_cost, %mode, "reassignment run finished");

        Ok(RunOutput {
            pixels,
            assignment,
            total_cost,
            mode,
        })
    }

    fn resolve_mode(&self, requested: Mode, pixels: usize) -> Result<Mode> {
        if requested == Mode::Heuristic {
            return Ok(Mode::Heuristic);
        }

        let refusal = if self.solver.is_none() {
            ReassignError::ExactModeUnavailable
        } else if pixels > self.config.exact_ceiling {
            ReassignError::ExactModeTooLarge {
                pixels,
                ceiling: self.config.exact_ceiling,
            }
        } else {
            return Ok(Mode::Exact);
        };

        if self.config.fallback_to_heuristic {
            tracing::warn!(reason = %refusal, "falling back to heuristic mode");
            Ok(Mode::Heuristic)
        } else {
            Err(refusal)
        }
    }

    fn run_heuristic(
        &self,
        quality: Quality,
        source: &[Color],
        target: &[Color],
        scheduler: &mut ChunkScheduler<'_, '_>,
    ) -> Result<Assignment> {
        let window = candidate_window(quality, target.len(), self.config.min_window);
        let mut greedy = GreedyAssigner::new(source, target, window);

        scheduler.run_chunked(target.len(), 0.0..1.0, |_slot| {
            greedy.assign_next();
            Ok(())
        })?;

        let stats = greedy.stats();
        tracing::debug!(
            window,
            windowed = stats.windowed,
            target_color_fills = stats.target_color_fills,
            yields = scheduler.yields(),
            "greedy assignment complete"
        );
        Ok(greedy.into_assignment())
    }

    fn run_exact(
        solver: &dyn ExactSolver,
        source: &[Color],
        target: &[Color],
        scheduler: &mut ChunkScheduler<'_, '_>,
    ) -> Result<Assignment> {
        let n = target.len();
        let mut costs = CostMatrix::zeros(n);
        scheduler.run_chunked(n, 0.0..0.5, |row| {
            if let Some(&wanted) = target.get(row) {
                costs.fill_row(row, wanted, source);
            }
            Ok(())
        })?;

        tracing::debug!(solver = solver.name(), n, "invoking exact solver");
        let permutation = solve_checked(solver, &costs)?;
        drop(costs);

        let mut sources = Vec::with_capacity(n);
        scheduler.run_chunked(n, 0.5..1.0, |slot| {
            sources.push(permutation.get(slot).copied());
            Ok(())
        })?;
        Ok(Assignment::new(sources))
    }
}
