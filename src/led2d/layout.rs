//! Panel geometry and serpentine wiring: LED index to `(row, col)` and back.
//!
//! See [`LedLayout`] for the wiring diagram.

use alloc::vec;
use alloc::vec::Vec;

use crate::{Error, Result};

/// A `(row, col)` position on the panel. `(0, 0)` is the top-left LED.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GridCoord {
    /// Row, counted downward from the top.
    pub row: usize,
    /// Column, counted rightward from the left.
    pub col: usize,
}

impl GridCoord {
    /// Create a coordinate from a row and a column.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for GridCoord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl From<GridCoord> for (usize, usize) {
    fn from(coord: GridCoord) -> Self {
        (coord.row, coord.col)
    }
}

/// Serpentine column-major wiring for a `width`×`height` panel.
///
/// A single strip snakes down even columns and back up odd columns, so consecutive
/// LEDs stay physically adjacent at column boundaries:
///
/// ```text
/// 3×2 panel (LED index at each cell):
///   LED0  LED3  LED4
///   LED1  LED2  LED5
/// ```
///
/// The mapping is a bijection between `0..width*height` and the grid.
///
/// ```rust
/// use elevator_panel::led2d::layout::{GridCoord, LedLayout};
///
/// let layout = LedLayout::serpentine_column_major(12, 25)?;
/// assert_eq!(layout.index_to_coord(25)?, GridCoord::new(24, 1));
/// assert_eq!(layout.coord_to_index(GridCoord::new(0, 1))?, 49);
/// # Ok::<(), elevator_panel::Error>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedLayout {
    width: usize,
    height: usize,
}

impl LedLayout {
    /// Serpentine column-major layout: even columns top-to-bottom, odd columns bottom-to-top.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either side is zero or the LED count does not
    /// fit in a `u16` index.
    pub const fn serpentine_column_major(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        match width.checked_mul(height) {
            Some(len) if len <= u16::MAX as usize => Ok(Self { width, height }),
            _ => Err(Error::InvalidDimension { width, height }),
        }
    }

    /// Number of columns in the layout.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows in the layout.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of LEDs in the layout.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    /// Always `false`; layouts are validated non-empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Map an LED's wiring index to its grid position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= width * height`.
    pub const fn index_to_coord(&self, index: usize) -> Result<GridCoord> {
        if index >= self.len() {
            return Err(Error::IndexOutOfRange {
                axis: "index",
                value: index,
                bound: self.len(),
            });
        }
        Ok(self.coord_unchecked(index))
    }

    /// Map a grid position to the LED's wiring index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if the row or the column lies outside the panel.
    pub const fn coord_to_index(&self, coord: GridCoord) -> Result<usize> {
        if coord.row >= self.height {
            return Err(Error::IndexOutOfRange {
                axis: "row",
                value: coord.row,
                bound: self.height,
            });
        }
        if coord.col >= self.width {
            return Err(Error::IndexOutOfRange {
                axis: "col",
                value: coord.col,
                bound: self.width,
            });
        }
        let offset = if coord.col % 2 == 0 {
            // Even column: top-to-bottom
            coord.row
        } else {
            // Odd column: bottom-to-top
            self.height - 1 - coord.row
        };
        Ok(coord.col * self.height + offset)
    }

    /// Grid positions in wiring order: item `i` is where LED `i` sits.
    pub fn coords(&self) -> impl ExactSizeIterator<Item = GridCoord> + '_ {
        (0..self.len()).map(|index| self.coord_unchecked(index))
    }

    /// Inverse table: entry `row * width + col` holds the LED index wired to that cell.
    #[must_use]
    pub fn index_by_coord(&self) -> Vec<u16> {
        let mut mapping = vec![0_u16; self.len()];
        for (led_index, coord) in self.coords().enumerate() {
            let slot = &mut mapping[coord.row * self.width + coord.col];
            // len fits in u16 (checked at construction)
            *slot = led_index as u16;
        }
        mapping
    }

    const fn coord_unchecked(&self, index: usize) -> GridCoord {
        let col = index / self.height;
        let offset = index % self.height;
        let row = if col % 2 == 0 {
            offset
        } else {
            self.height - 1 - offset
        };
        GridCoord { row, col }
    }
}

/// Map a wiring index to `(row, col)` on a serpentine `width`×`height` panel.
///
/// # Errors
///
/// Returns [`Error::InvalidDimension`] for an invalid panel and
/// [`Error::IndexOutOfRange`] if `index` is not on the panel.
pub fn index_to_coord(index: usize, width: usize, height: usize) -> Result<(usize, usize)> {
    let layout = LedLayout::serpentine_column_major(width, height)?;
    layout.index_to_coord(index).map(Into::into)
}

/// Map `(row, col)` to the wiring index on a serpentine `width`×`height` panel.
///
/// # Errors
///
/// Returns [`Error::InvalidDimension`] for an invalid panel and
/// [`Error::IndexOutOfRange`] if `row` or `col` is not on the panel.
pub fn coord_to_index(row: usize, col: usize, width: usize, height: usize) -> Result<usize> {
    let layout = LedLayout::serpentine_column_major(width, height)?;
    layout.coord_to_index(GridCoord::new(row, col))
}
