//! Engine constants and runtime configuration defaults

// Candidate window policy
/// Smallest number of candidates scanned per slot, regardless of quality
pub const MIN_CANDIDATE_WINDOW: usize = 100;
/// Highest accepted quality setting
pub const MAX_QUALITY: u8 = 100;
/// Quality used when none is given
pub const DEFAULT_QUALITY: u8 = 50;

// Scheduling
/// Target slots processed between progress reports and yields
pub const DEFAULT_CHUNK_SIZE: usize = 256;

// Exact mode is O(N³) time and O(N²) memory
/// Largest pixel count accepted in exact mode (a 64x64 grid)
pub const DEFAULT_EXACT_CEILING: usize = 64 * 64;

// Image handling
/// Default side length of the square working grid
pub const DEFAULT_GRID_SIZE: u32 = 64;
/// Largest accepted grid side length
pub const MAX_GRID_SIZE: u32 = 1024;
/// File extensions accepted as source images
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Number of steps a progress bar is divided into
pub const PROGRESS_RESOLUTION: u64 = 1000;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
