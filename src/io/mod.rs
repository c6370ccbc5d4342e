/// Command-line argument parsing and batch file processing
pub mod cli;
/// Engine constants and runtime defaults
pub mod configuration;
/// Error types shared by the engine and the file handling
pub mod error;
/// Image loading, resampling and PNG export
pub mod image;
/// Terminal progress bars fed by engine progress events
pub mod progress;
