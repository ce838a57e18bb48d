//! Rectangular LED panel frames.
//!
//! A [`Frame2d`] is one rendered instant: a `height`×`width` grid of colors in
//! row-major order with `(0, 0)` at the top-left. Frames are plain in-memory buffers;
//! use [`Frame2d::to_strip_order`] with a [`LedLayout`] to get the order the LEDs are
//! wired in.
//!
//! Frames are also [`embedded-graphics`](https://docs.rs/embedded-graphics) draw targets.
//!
//! ```rust
//! use elevator_panel::led2d::Frame2d;
//! use elevator_panel::led_strip::{Rgb888, colors};
//! use embedded_graphics::{prelude::*, primitives::{PrimitiveStyle, Rectangle}};
//!
//! let mut frame = Frame2d::new(12, 25);
//! Rectangle::new(Point::new(0, 22), Size::new(12, 2))
//!     .into_styled(PrimitiveStyle::with_fill(Rgb888::WHITE))
//!     .draw(&mut frame)
//!     .expect("drawing into frame cannot fail");
//!
//! assert_eq!(frame.lit_rows(colors::WHITE), [22, 23]);
//! ```

pub use embedded_graphics::geometry::{Point, Size};

pub mod layout;

pub use layout::{GridCoord, LedLayout};

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use core::ops::{Index, IndexMut};
use embedded_graphics::{draw_target::DrawTarget, pixelcolor::Rgb888, prelude::*};
use itertools::iproduct;

use crate::led_strip::{Frame1d, HexColor, OFF, RGB8, ToRgb8};
use crate::{Error, Result};

/// A 2D grid of RGB pixels representing a single display frame.
///
/// Pixels are indexed by `frame[(x, y)]`, column first, matching screen coordinates.
/// [`Frame2d::row`] gives a whole row as a slice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame2d {
    width: usize,
    height: usize,
    pixels: Vec<RGB8>,
}

impl Frame2d {
    /// Create a new blank (all black) frame.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, OFF)
    }

    /// Create a frame filled with a single color.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero.
    #[must_use]
    pub fn filled(width: usize, height: usize, color: RGB8) -> Self {
        assert!(width > 0 && height > 0, "width and height must be positive");
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    /// Frame width in pixels (columns).
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Frame height in pixels (rows).
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Pixel at `coord`, or `None` off the frame.
    #[must_use]
    pub fn get(&self, coord: GridCoord) -> Option<&RGB8> {
        if coord.col >= self.width {
            return None;
        }
        self.pixels.get(coord.row * self.width + coord.col)
    }

    /// One row of pixels, left to right.
    ///
    /// # Panics
    ///
    /// Panics if `row >= height`.
    #[must_use]
    pub fn row(&self, row: usize) -> &[RGB8] {
        assert!(row < self.height, "row must be within height");
        &self.pixels[row * self.width..(row + 1) * self.width]
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[RGB8]> {
        self.pixels.chunks_exact(self.width)
    }

    /// Every `(row, col)` on the frame, row-major.
    pub fn coords(&self) -> impl Iterator<Item = GridCoord> {
        iproduct!(0..self.height, 0..self.width).map(GridCoord::from)
    }

    /// Indices of rows whose every pixel is `color`.
    #[must_use]
    pub fn lit_rows(&self, color: RGB8) -> Vec<usize> {
        self.rows()
            .enumerate()
            .filter(|(_, row)| row.iter().all(|pixel| *pixel == color))
            .map(|(row_index, _)| row_index)
            .collect()
    }

    /// The frame as rows of `#RRGGBB` strings.
    #[must_use]
    pub fn to_hex_rows(&self) -> Vec<Vec<String>> {
        self.rows()
            .map(|row| row.iter().map(|pixel| String::from(pixel.to_hex().as_str())).collect())
            .collect()
    }

    /// Reorder pixels into the physical wiring order described by `led_layout`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameSizeMismatch`] if the frame and layout differ in shape.
    pub fn to_strip_order(&self, led_layout: &LedLayout) -> Result<Frame1d> {
        if led_layout.width() != self.width || led_layout.height() != self.height {
            return Err(Error::FrameSizeMismatch {
                width: led_layout.width(),
                height: led_layout.height(),
                actual_width: self.width,
                actual_height: self.height,
            });
        }
        Ok(led_layout
            .coords()
            .map(|coord| self[(coord.col, coord.row)])
            .collect::<Vec<_>>()
            .into())
    }
}

impl Index<(usize, usize)> for Frame2d {
    type Output = RGB8;

    fn index(&self, (x_index, y_index): (usize, usize)) -> &Self::Output {
        assert!(x_index < self.width, "x_index must be within width");
        assert!(y_index < self.height, "y_index must be within height");
        &self.pixels[y_index * self.width + x_index]
    }
}

impl IndexMut<(usize, usize)> for Frame2d {
    fn index_mut(&mut self, (x_index, y_index): (usize, usize)) -> &mut Self::Output {
        assert!(x_index < self.width, "x_index must be within width");
        assert!(y_index < self.height, "y_index must be within height");
        &mut self.pixels[y_index * self.width + x_index]
    }
}

impl OriginDimensions for Frame2d {
    fn size(&self) -> Size {
        // Layout dimensions fit in u16 (checked by LedLayout); frames built by hand are clamped.
        Size::new(
            u32::try_from(self.width).unwrap_or(u32::MAX),
            u32::try_from(self.height).unwrap_or(u32::MAX),
        )
    }
}

impl DrawTarget for Frame2d {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            let (Ok(x_index), Ok(y_index)) = (usize::try_from(coord.x), usize::try_from(coord.y))
            else {
                continue;
            };
            if x_index < self.width && y_index < self.height {
                self[(x_index, y_index)] = color.to_rgb8();
            }
        }
        Ok(())
    }
}
