//! Scrolling-band animation: which rows are lit at each timestamp.
//!
//! A band of `trail_length` rows climbs the panel one row per timestamp and wraps
//! every `frames_per_cycle` timestamps. Rendering is a pure function of
//! `(timestamp % frames_per_cycle, parameters)`, so frames can be rendered in any order,
//! repeatedly, or in parallel.
//!
//! # Example
//!
//! ```rust
//! use elevator_panel::animation::{AnimationParameters, render_frame};
//! use elevator_panel::led_strip::colors;
//!
//! let params = AnimationParameters::new(12, 25, 25)?.with_trail_length(2);
//!
//! // At timestamp 0 the leading edge is row 24 (exclusive), so rows 22 and 23 are lit.
//! let frame = render_frame(0, &params);
//! assert_eq!(frame.lit_rows(colors::WHITE), [22, 23]);
//!
//! // The pattern repeats every cycle.
//! assert_eq!(render_frame(25, &params), frame);
//! # Ok::<(), elevator_panel::Error>(())
//! ```

use alloc::vec::Vec;
use core::ops::Range;
use serde::{Deserialize, Serialize};

use crate::led2d::{Frame2d, LedLayout};
use crate::led_strip::{HexColor, OFF, ON, RGB8};
use crate::{Error, Result};

/// Panel width of the elevator cab wall, in LEDs.
pub const ELEVATOR_WIDTH: usize = 12;
/// Panel height of the elevator cab wall, in LEDs (8.1 ft at 25 LEDs per strip run).
pub const ELEVATOR_HEIGHT: usize = 25;
/// One full sweep of the wall.
pub const ELEVATOR_FRAMES_PER_CYCLE: u32 = 25;
/// Rows lit behind the leading edge on the elevator wall.
pub const ELEVATOR_TRAIL_LENGTH: u32 = 2;

const _: () = assert!(ELEVATOR_WIDTH > 0 && ELEVATOR_HEIGHT > 0);
const _: () = assert!(ELEVATOR_WIDTH * ELEVATOR_HEIGHT <= u16::MAX as usize);
const _: () = assert!(ELEVATOR_FRAMES_PER_CYCLE > 0);

/// Validated inputs for [`render_frame`].
///
/// Build with [`AnimationParameters::new`] and adjust with the `with_*` methods. Negative
/// row offsets, trails longer than the panel, and any timestamp are all valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationParameters {
    led_layout: LedLayout,
    frames_per_cycle: u32,
    trail_length: u32,
    row_offset: i32,
    on_color: RGB8,
    off_color: RGB8,
}

impl AnimationParameters {
    /// The single elevator wall panel: 12×25, a 25-frame cycle, and a two-row trail.
    pub const ELEVATOR_WALL: Self = Self {
        led_layout: match LedLayout::serpentine_column_major(ELEVATOR_WIDTH, ELEVATOR_HEIGHT) {
            Ok(led_layout) => led_layout,
            Err(_) => panic!("elevator wall dimensions must be valid"),
        },
        frames_per_cycle: ELEVATOR_FRAMES_PER_CYCLE,
        trail_length: ELEVATOR_TRAIL_LENGTH,
        row_offset: 0,
        on_color: ON,
        off_color: OFF,
    };

    /// Parameters for a serpentine `width`×`height` panel with a one-row trail, no
    /// offset, white on black.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero or oversized panel and
    /// [`Error::InvalidPeriod`] if `frames_per_cycle` is zero.
    pub fn new(width: usize, height: usize, frames_per_cycle: u32) -> Result<Self> {
        let led_layout = LedLayout::serpentine_column_major(width, height)?;
        if frames_per_cycle == 0 {
            return Err(Error::InvalidPeriod);
        }
        Ok(Self {
            led_layout,
            frames_per_cycle,
            trail_length: 1,
            row_offset: 0,
            on_color: ON,
            off_color: OFF,
        })
    }

    /// Number of rows that stay lit behind the leading edge. Zero lights nothing.
    #[must_use]
    pub const fn with_trail_length(mut self, trail_length: u32) -> Self {
        self.trail_length = trail_length;
        self
    }

    /// Vertical shift added to each row before the band test.
    #[must_use]
    pub const fn with_row_offset(mut self, row_offset: i32) -> Self {
        self.row_offset = row_offset;
        self
    }

    /// Colors for lit and unlit LEDs.
    #[must_use]
    pub const fn with_colors(mut self, on_color: RGB8, off_color: RGB8) -> Self {
        self.on_color = on_color;
        self.off_color = off_color;
        self
    }

    /// Wiring layout of the panel.
    #[must_use]
    pub const fn led_layout(&self) -> &LedLayout {
        &self.led_layout
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.led_layout.width()
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.led_layout.height()
    }

    /// Period of the animation in timestamps.
    #[must_use]
    pub const fn frames_per_cycle(&self) -> u32 {
        self.frames_per_cycle
    }

    /// Rows lit behind the leading edge.
    #[must_use]
    pub const fn trail_length(&self) -> u32 {
        self.trail_length
    }

    /// Vertical shift applied before the band test.
    #[must_use]
    pub const fn row_offset(&self) -> i32 {
        self.row_offset
    }

    /// Color of lit LEDs.
    #[must_use]
    pub const fn on_color(&self) -> RGB8 {
        self.on_color
    }

    /// Color of unlit LEDs.
    #[must_use]
    pub const fn off_color(&self) -> RGB8 {
        self.off_color
    }

    /// The lit band at `timestamp`.
    #[must_use]
    pub fn band_at(&self, timestamp: u64) -> RowBand {
        let phase = i64::from(self.phase(timestamp));
        // height fits in u16 (checked by LedLayout)
        let leading_edge = self.height() as i64 - 1 - phase;
        RowBand {
            leading_edge,
            trailing_edge: leading_edge - i64::from(self.trail_length),
            row_offset: self.row_offset,
        }
    }

    /// Position of `timestamp` within the cycle.
    #[must_use]
    pub const fn phase(&self, timestamp: u64) -> u32 {
        // The remainder is below frames_per_cycle, a u32.
        (timestamp % self.frames_per_cycle as u64) as u32
    }
}

impl Default for AnimationParameters {
    fn default() -> Self {
        Self::ELEVATOR_WALL
    }
}

/// Half-open band of lit rows, `trailing_edge..leading_edge`, tested after adding the
/// row offset.
///
/// Edges may lie outside the panel; rows outside the band simply stay dark.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowBand {
    /// Row newly lit at this timestamp (exclusive bound).
    pub leading_edge: i64,
    /// Inclusive lower bound: `leading_edge - trail_length`.
    pub trailing_edge: i64,
    /// Shift added to a row before testing it.
    pub row_offset: i32,
}

impl RowBand {
    /// The band as a range in shifted-row space.
    #[must_use]
    pub const fn range(&self) -> Range<i64> {
        self.trailing_edge..self.leading_edge
    }

    /// Whether grid row `row` is lit.
    #[must_use]
    pub fn contains(&self, row: usize) -> bool {
        // Rows fit in u16 (checked by LedLayout)
        let shifted = row as i64 + i64::from(self.row_offset);
        self.range().contains(&shifted)
    }
}

/// Render the frame shown at `timestamp`.
///
/// Every LED on the strip is mapped to its grid position through the serpentine layout
/// and lit when its row falls inside the band.
#[must_use]
pub fn render_frame(timestamp: u64, params: &AnimationParameters) -> Frame2d {
    let band = params.band_at(timestamp);
    let mut frame = Frame2d::filled(params.width(), params.height(), params.off_color);
    for coord in params.led_layout.coords() {
        if band.contains(coord.row) {
            frame[(coord.col, coord.row)] = params.on_color;
        }
    }
    frame
}

/// Render one full cycle, timestamps `0..frames_per_cycle`.
#[must_use]
pub fn render_cycle(params: &AnimationParameters) -> Vec<Frame2d> {
    (0..u64::from(params.frames_per_cycle))
        .map(|timestamp| render_frame(timestamp, params))
        .collect()
}

/// Render the elevator wall frame at `timestamp` using [`AnimationParameters::ELEVATOR_WALL`].
#[must_use]
pub fn render_elevator_frame(timestamp: u64) -> Frame2d {
    render_frame(timestamp, &AnimationParameters::ELEVATOR_WALL)
}

/// Serialized form of [`AnimationParameters`], for flash storage or sending to a panel
/// controller. Colors travel as `#RRGGBB` text.
///
/// ```rust
/// use elevator_panel::animation::{AnimationConfig, AnimationParameters};
///
/// let mut buffer = [0u8; AnimationConfig::MAX_ENCODED_LEN];
/// let bytes = AnimationConfig::from(&AnimationParameters::ELEVATOR_WALL).encode(&mut buffer)?;
/// let decoded = AnimationParameters::try_from(AnimationConfig::decode(bytes)?)?;
/// assert_eq!(decoded, AnimationParameters::ELEVATOR_WALL);
/// # Ok::<(), elevator_panel::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Panel columns.
    pub width: u16,
    /// Panel rows.
    pub height: u16,
    /// Period of the animation in timestamps.
    pub frames_per_cycle: u32,
    /// Rows lit behind the leading edge.
    pub trail_length: u32,
    /// Vertical shift applied before the band test.
    pub row_offset: i32,
    /// Lit color, `#RRGGBB`.
    pub on_color: heapless::String<7>,
    /// Unlit color, `#RRGGBB`.
    pub off_color: heapless::String<7>,
}

impl AnimationConfig {
    /// Upper bound on the postcard encoding size.
    pub const MAX_ENCODED_LEN: usize = 48;

    /// Encode into `buffer` with postcard, returning the used prefix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigFormat`] if `buffer` is too small.
    pub fn encode<'a>(&self, buffer: &'a mut [u8]) -> Result<&'a mut [u8]> {
        postcard::to_slice(self, buffer).map_err(|_| Error::ConfigFormat)
    }

    /// Decode postcard bytes. The result is not validated until converted with
    /// [`AnimationParameters::try_from`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigFormat`] if the bytes are not a config.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        postcard::from_bytes(bytes).map_err(|_| Error::ConfigFormat)
    }
}

impl From<&AnimationParameters> for AnimationConfig {
    fn from(params: &AnimationParameters) -> Self {
        // Dimensions fit in u16 (checked by LedLayout)
        Self {
            width: params.width() as u16,
            height: params.height() as u16,
            frames_per_cycle: params.frames_per_cycle,
            trail_length: params.trail_length,
            row_offset: params.row_offset,
            on_color: params.on_color.to_hex(),
            off_color: params.off_color.to_hex(),
        }
    }
}

impl TryFrom<AnimationConfig> for AnimationParameters {
    type Error = Error;

    fn try_from(config: AnimationConfig) -> Result<Self> {
        Ok(Self::new(
            usize::from(config.width),
            usize::from(config.height),
            config.frames_per_cycle,
        )?
        .with_trail_length(config.trail_length)
        .with_row_offset(config.row_offset)
        .with_colors(
            RGB8::from_hex(&config.on_color)?,
            RGB8::from_hex(&config.off_color)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::{AnimationParameters, RowBand};

    #[test]
    fn band_edges_follow_phase() {
        let params = AnimationParameters::new(12, 25, 25)
            .expect("valid params")
            .with_trail_length(2);
        assert_eq!(
            params.band_at(0),
            RowBand {
                leading_edge: 24,
                trailing_edge: 22,
                row_offset: 0
            }
        );
        assert_eq!(params.band_at(24).leading_edge, 0);
        assert_eq!(params.band_at(24).trailing_edge, -2);
        assert_eq!(params.band_at(25), params.band_at(0));
    }

    #[test]
    fn band_is_half_open() {
        let band = RowBand {
            leading_edge: 24,
            trailing_edge: 22,
            row_offset: 0,
        };
        assert!(!band.contains(21));
        assert!(band.contains(22));
        assert!(band.contains(23));
        assert!(!band.contains(24));
    }

    #[test]
    fn negative_offset_shifts_band_down() {
        let band = RowBand {
            leading_edge: 24,
            trailing_edge: 23,
            row_offset: -1,
        };
        assert!(band.contains(24));
        assert!(!band.contains(23));
    }

    #[test]
    fn empty_band_when_trail_is_zero() {
        let band = RowBand {
            leading_edge: 5,
            trailing_edge: 5,
            row_offset: 0,
        };
        assert!((0..25).all(|row| !band.contains(row)));
    }

    #[test]
    fn phase_wraps_large_timestamps() {
        let params = AnimationParameters::new(3, 4, 7).expect("valid params");
        assert_eq!(params.phase(u64::MAX), (u64::MAX % 7) as u32);
    }
}
