//! Pixel reassignment engine: rearranges the pixels of a source image so that,
//! viewed at a distance, they reproduce a target image
//!
//! Every output pixel is taken from the source pool. The mapping from target
//! positions to source pixels is computed either by a bounded greedy search or
//! by delegating to an exact bipartite matching solver.

#![forbid(unsafe_code)]

/// Assignment strategies, scheduling and the run executor
pub mod algorithm;
/// Color values, distance metric and flat RGBA buffer conversion
pub mod color;
/// Input/output operations, configuration and error handling
pub mod io;

pub use algorithm::executor::{Mode, ReassignmentEngine, RunContext, RunOutput, RunRequest};
pub use io::error::{ReassignError, Result};
