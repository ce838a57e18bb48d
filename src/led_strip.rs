//! LED colors and strip-order frames.
//!
//! Colors are [`RGB8`] values from `smart_leds`. At the boundary with display widgets
//! and LED drivers they are exchanged as `#RRGGBB` text, see [`HexColor`].

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Write as _;
use core::ops::{Deref, DerefMut};
use embedded_graphics::prelude::RgbColor;

use crate::{Error, Result};

/// Predefined RGB color constants from the `smart_leds` crate.
#[doc(inline)]
pub use smart_leds::colors;

/// 8-bit-per-channel RGB color from `embedded_graphics`.
#[doc(inline)]
pub use embedded_graphics::pixelcolor::Rgb888;

/// RGB color type used by panel frames.
pub use smart_leds::RGB8;

/// Color of an unlit LED.
pub const OFF: RGB8 = colors::BLACK;

/// Color of a lit LED in the default animation.
pub const ON: RGB8 = colors::WHITE;

/// Convert colors to [`RGB8`] for LED strip rendering.
///
/// # Example
///
/// ```rust
/// use elevator_panel::led_strip::{Rgb888, ToRgb8, RGB8};
///
/// let rgb8 = RGB8::new(16, 32, 48).to_rgb8();
/// let converted = Rgb888::new(16, 32, 48).to_rgb8();
///
/// assert_eq!(rgb8, converted);
/// ```
pub trait ToRgb8 {
    /// Convert this color to [`RGB8`].
    #[must_use]
    fn to_rgb8(self) -> RGB8;
}

impl ToRgb8 for RGB8 {
    #[inline]
    fn to_rgb8(self) -> RGB8 {
        self
    }
}

impl ToRgb8 for Rgb888 {
    #[inline]
    fn to_rgb8(self) -> RGB8 {
        RGB8::new(self.r(), self.g(), self.b())
    }
}

/// Convert colors to [`Rgb888`] for embedded-graphics rendering.
pub trait ToRgb888 {
    /// Convert this color to [`Rgb888`].
    #[must_use]
    fn to_rgb888(self) -> Rgb888;
}

impl ToRgb888 for RGB8 {
    #[inline]
    fn to_rgb888(self) -> Rgb888 {
        Rgb888::new(self.r, self.g, self.b)
    }
}

impl ToRgb888 for Rgb888 {
    #[inline]
    fn to_rgb888(self) -> Rgb888 {
        self
    }
}

/// `#RRGGBB` text form of a color, as used by LED drivers and display widgets.
///
/// ```rust
/// use elevator_panel::led_strip::{HexColor, RGB8, colors};
///
/// assert_eq!(colors::WHITE.to_hex().as_str(), "#FFFFFF");
/// assert_eq!(RGB8::from_hex("#ff8000")?, RGB8::new(255, 128, 0));
/// # Ok::<(), elevator_panel::Error>(())
/// ```
pub trait HexColor: Sized {
    /// Format as `#` followed by six upper-case hex digits.
    #[must_use]
    fn to_hex(self) -> heapless::String<7>;

    /// Parse `#RRGGBB` (either case).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] if the text is not exactly `#` plus six hex digits.
    fn from_hex(text: &str) -> Result<Self>;
}

impl HexColor for RGB8 {
    fn to_hex(self) -> heapless::String<7> {
        let mut text = heapless::String::new();
        write!(text, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
            .expect("#RRGGBB always fits in 7 bytes");
        text
    }

    fn from_hex(text: &str) -> Result<Self> {
        let digits = text.strip_prefix('#').ok_or(Error::InvalidColor)?;
        if digits.len() != 6 || !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor);
        }
        let channel = |start: usize| {
            digits
                .get(start..start + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or(Error::InvalidColor)
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Frame in physical strip order: entry `i` is the color of the `i`th LED on the wire.
///
/// Produced from a [`Frame2d`](crate::led2d::Frame2d) by
/// [`Frame2d::to_strip_order`](crate::led2d::Frame2d::to_strip_order).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame1d(Vec<RGB8>);

impl Frame1d {
    /// Create a blank (all black) frame with `len` LEDs.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self::filled(len, OFF)
    }

    /// Create a frame of `len` LEDs filled with a single color.
    #[must_use]
    pub fn filled(len: usize, color: RGB8) -> Self {
        Self(vec![color; len])
    }
}

impl Deref for Frame1d {
    type Target = [RGB8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Frame1d {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<RGB8>> for Frame1d {
    fn from(pixels: Vec<RGB8>) -> Self {
        Self(pixels)
    }
}

impl From<Frame1d> for Vec<RGB8> {
    fn from(frame: Frame1d) -> Self {
        frame.0
    }
}
