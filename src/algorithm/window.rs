use crate::io::configuration::{DEFAULT_QUALITY, MAX_QUALITY};
use crate::io::error::{Result, invalid_parameter};
use std::fmt;

/// Quality/speed trade-off in `0..=100`
///
/// Low values scan few candidates per slot and run fast; high values scan
/// more and approach an exhaustive nearest-available search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u8);

impl Quality {
    /// Fastest setting
    pub const MIN: Self = Self(0);
    /// Highest-fidelity setting
    pub const MAX: Self = Self(MAX_QUALITY);

    /// Validate a raw quality value
    ///
    /// # Errors
    ///
    /// Returns an error if the value is above 100
    pub fn new(value: u8) -> Result<Self> {
        if value > MAX_QUALITY {
            return Err(invalid_parameter(
                "quality",
                &value,
                &format!("must be between 0 and {MAX_QUALITY}"),
            ));
        }
        Ok(Self(value))
    }

    /// Raw value in `0..=100`
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(DEFAULT_QUALITY)
    }
}

impl TryFrom<u8> for Quality {
    type Error = crate::io::error::ReassignError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of unused source candidates examined per target slot
///
/// Computes `floor(pixels * quality / 100)`, raised to at least `min_window`
/// and capped at the pool size. The result is never zero, and it never
/// decreases as quality grows.
pub fn candidate_window(quality: Quality, pixels: usize, min_window: usize) -> usize {
    let scaled = (pixels as u128 * u128::from(quality.get()) / u128::from(MAX_QUALITY)) as usize;
    scaled.max(min_window).min(pixels).max(1)
}
