//! Serpentine LED panel wiring and scrolling-band animation for elevator cab walls.
//!
//! A wall panel is one long LED strip folded into columns. [`led2d::layout`] maps the
//! strip's wiring order to `(row, col)` grid positions and back, and [`animation`]
//! renders the frame for any timestamp as a [`led2d::Frame2d`]. Pacing and display are
//! kept outside the pure core: [`panel_player`] ticks timestamps into any
//! [`panel_player::FrameSink`], such as a `smart_leds` strip driver or the PNG preview.
//!
//! # Glossary
//!
//! - **Serpentine wiring:** the strip runs down column 0, up column 1, down column 2, and so on.
//! - **Leading edge:** the row newly lit at the current timestamp. It climbs as time advances.
//! - **Trail length:** how many rows stay lit behind the leading edge.
//! - **Cycle:** the number of timestamps after which the animation repeats exactly.
#![cfg_attr(not(feature = "host"), no_std)]
#![allow(async_fn_in_trait, reason = "single-threaded display loop")]

extern crate alloc;

pub mod animation;
mod error;
pub mod led2d;
pub mod led_strip;
pub mod panel_player;
#[cfg(feature = "host")]
pub mod to_png;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
