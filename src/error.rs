use derive_more::{Display, Error};

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised by panel layouts, frame rendering, and display sinks.
///
/// Layout and animation inputs are validated once, when parameters are built.
/// Rendering a frame from valid parameters never fails.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Width or height is zero, or the panel has more LEDs than a `u16` index can address.
    #[display("invalid panel dimensions {width}x{height}")]
    InvalidDimension {
        /// Requested number of columns.
        width: usize,
        /// Requested number of rows.
        height: usize,
    },
    /// An LED index, row, or column lies outside the panel.
    #[display("{axis} {value} out of range 0..{bound}")]
    IndexOutOfRange {
        /// Which quantity was out of range: `"index"`, `"row"`, or `"col"`.
        axis: &'static str,
        /// The rejected value.
        value: usize,
        /// Exclusive upper bound for the value.
        bound: usize,
    },
    /// `frames_per_cycle` is zero.
    #[display("frames per cycle must be positive")]
    InvalidPeriod,
    /// Text is not a `#RRGGBB` color.
    #[display("color must be written as #RRGGBB")]
    InvalidColor,
    /// A frame's shape does not match the panel it was sent to.
    #[display("frame is {actual_width}x{actual_height}, panel is {width}x{height}")]
    FrameSizeMismatch {
        /// Panel columns.
        width: usize,
        /// Panel rows.
        height: usize,
        /// Frame columns.
        actual_width: usize,
        /// Frame rows.
        actual_height: usize,
    },
    /// The display collaborator rejected a frame.
    #[display("display write failed")]
    DisplayWrite,
    /// Encoded animation config could not be decoded or encoded.
    #[display("animation config bytes are malformed")]
    ConfigFormat,
}
