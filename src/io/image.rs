//! Image file loading, grid resampling and PNG export

use crate::color::Color;
use crate::color::buffer::{colors_from_rgba, colors_to_rgba};
use crate::io::configuration::MAX_GRID_SIZE;
use crate::io::error::{ReassignError, Result, invalid_parameter};
use image::RgbaImage;
use image::imageops::{self, FilterType};
use std::path::Path;

/// Square pixel grid in row-major scan order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    side: u32,
    colors: Vec<Color>,
}

impl PixelGrid {
    /// Wrap row-major colors of a `side` by `side` grid
    ///
    /// # Errors
    ///
    /// Returns an error if the number of colors is not `side * side`
    pub fn new(side: u32, colors: Vec<Color>) -> Result<Self> {
        let expected = side as usize * side as usize;
        if colors.len() != expected {
            return Err(invalid_parameter(
                "colors",
                &colors.len(),
                &format!("a {side}x{side} grid needs {expected} pixels"),
            ));
        }
        Ok(Self { side, colors })
    }

    /// Load an image and resample it onto a `side` by `side` grid
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The side length is zero or larger than the supported maximum
    /// - The file cannot be opened or decoded
    pub fn load<P: AsRef<Path>>(path: P, side: u32) -> Result<Self> {
        validate_grid_size(side)?;
        let path = path.as_ref();
        let img = image::open(path).map_err(|e| ReassignError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_image(&img.to_rgba8(), side)
    }

    /// Resample an in-memory image onto a `side` by `side` grid
    ///
    /// # Errors
    ///
    /// Returns an error if the decoded buffer is not whole RGBA pixels
    pub fn from_image(img: &RgbaImage, side: u32) -> Result<Self> {
        let colors = if img.dimensions() == (side, side) {
            colors_from_rgba(img.as_raw())?
        } else {
            let resized = imageops::resize(img, side, side, FilterType::Triangle);
            colors_from_rgba(resized.as_raw())?
        };
        Self::new(side, colors)
    }

    /// Side length in pixels
    pub const fn side(&self) -> u32 {
        self.side
    }

    /// Colors in scan order
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Number of pixels
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Test whether the grid holds no pixels
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Convert back into an RGBA image
    ///
    /// # Errors
    ///
    /// Returns an error if the colors do not fill the grid
    pub fn to_image(&self) -> Result<RgbaImage> {
        RgbaImage::from_raw(self.side, self.side, colors_to_rgba(&self.colors)).ok_or_else(|| {
            invalid_parameter(
                "colors",
                &self.colors.len(),
                &format!("does not fill a {0}x{0} grid", self.side),
            )
        })
    }
}

/// Check a grid side length against the supported range
///
/// # Errors
///
/// Returns an error if the side is zero or above the maximum
pub fn validate_grid_size(side: u32) -> Result<()> {
    if side == 0 || side > MAX_GRID_SIZE {
        return Err(invalid_parameter(
            "grid",
            &side,
            &format!("must be between 1 and {MAX_GRID_SIZE}"),
        ));
    }
    Ok(())
}

/// Write a rearranged grid as a PNG file, creating parent directories
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(grid: &PixelGrid, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ReassignError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    grid.to_image()?
        .save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|e| ReassignError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
