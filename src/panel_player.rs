//! Drive a panel over time: tick timestamps, render frames, hand them to a display.
//!
//! The animation core has no clock. [`play`] owns the pacing: it renders timestamp
//! `0, 1, 2, ...`, passes each frame to a [`FrameSink`], and waits one
//! `frame_duration` between frames using an [`embassy_time::Ticker`]. Signal the
//! [`StopSignal`] to end playback early.
//!
//! On a panel controller, run playback as an Embassy task. With the `host` feature the
//! time driver keeps a generic timer queue, so any executor works, including
//! `embassy_futures::block_on` as below.
//!
//! # Example
//!
//! ```rust
//! use elevator_panel::Result;
//! use elevator_panel::animation::AnimationParameters;
//! use elevator_panel::led2d::Frame2d;
//! use elevator_panel::panel_player::{FrameSink, Repeat, StopSignal, play};
//! use embassy_time::Duration;
//!
//! struct CountLitCells(usize);
//!
//! impl FrameSink for CountLitCells {
//!     async fn show(&mut self, _timestamp: u64, frame: &Frame2d) -> Result<()> {
//!         self.0 += frame.lit_rows(elevator_panel::led_strip::ON).len() * frame.width();
//!         Ok(())
//!     }
//! }
//!
//! let stop_signal = StopSignal::new();
//! let mut sink = CountLitCells(0);
//! let params = AnimationParameters::new(4, 3, 3)?;
//! let shown = embassy_futures::block_on(play(
//!     &params,
//!     Duration::from_millis(1),
//!     Repeat::Frames(3),
//!     &mut sink,
//!     &stop_signal,
//! ))?;
//! assert_eq!(shown, 3);
//! # Ok::<(), elevator_panel::Error>(())
//! ```

use core::borrow::Borrow;
use embassy_futures::select::{Either, select};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use embassy_time::{Duration, Ticker};
use smart_leds::SmartLedsWrite;

use crate::animation::{AnimationParameters, render_frame};
use crate::led2d::{Frame2d, LedLayout};
use crate::led_strip::RGB8;
use crate::{Error, Result};

/// Signal that ends a running [`play`] or [`play_sequence`].
pub type StopSignal = Signal<CriticalSectionRawMutex, ()>;

/// A display collaborator: anything that can show one frame.
///
/// Implemented by [`SmartLedsSink`] for real strips and by the PNG recorder on host.
pub trait FrameSink {
    /// Show `frame`, the panel's appearance at `timestamp`.
    ///
    /// # Errors
    ///
    /// Returns an error if the display rejects the frame; playback stops with it.
    async fn show(&mut self, timestamp: u64, frame: &Frame2d) -> Result<()>;
}

impl<S: FrameSink + ?Sized> FrameSink for &mut S {
    async fn show(&mut self, timestamp: u64, frame: &Frame2d) -> Result<()> {
        (**self).show(timestamp, frame).await
    }
}

/// How long playback runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Repeat {
    /// Until the stop signal fires.
    Forever,
    /// This many frames, then return.
    Frames(u64),
}

/// Render and show the animation, one frame per `frame_duration`.
///
/// Returns the number of frames shown. Each frame stays up for a full `frame_duration`
/// before the next one (or before returning).
///
/// # Errors
///
/// Returns the first error from `sink`.
///
/// # Panics
///
/// Panics if `frame_duration` is zero.
pub async fn play<S: FrameSink>(
    params: &AnimationParameters,
    frame_duration: Duration,
    repeat: Repeat,
    sink: &mut S,
    stop_signal: &StopSignal,
) -> Result<u64> {
    log::debug!(
        "play: {}x{} panel, {} frames per cycle",
        params.width(),
        params.height(),
        params.frames_per_cycle()
    );
    run_ticker(
        |timestamp| render_frame(timestamp, params),
        frame_duration,
        repeat,
        sink,
        stop_signal,
    )
    .await
}

/// Show pre-rendered frames in order, looping back to the first.
///
/// # Errors
///
/// Returns the first error from `sink`.
///
/// # Panics
///
/// Panics if `frames` is empty or `frame_duration` is zero.
pub async fn play_sequence<S: FrameSink>(
    frames: &[Frame2d],
    frame_duration: Duration,
    repeat: Repeat,
    sink: &mut S,
    stop_signal: &StopSignal,
) -> Result<u64> {
    assert!(!frames.is_empty(), "animation requires at least one frame");
    let len = frames.len() as u64;
    log::debug!("play_sequence: {} frames", len);
    run_ticker(
        |timestamp| &frames[(timestamp % len) as usize],
        frame_duration,
        repeat,
        sink,
        stop_signal,
    )
    .await
}

async fn run_ticker<S, F, B>(
    mut frame_at: F,
    frame_duration: Duration,
    repeat: Repeat,
    sink: &mut S,
    stop_signal: &StopSignal,
) -> Result<u64>
where
    S: FrameSink,
    F: FnMut(u64) -> B,
    B: Borrow<Frame2d>,
{
    assert!(
        frame_duration.as_micros() > 0,
        "animation frame duration must be positive"
    );
    let mut ticker = Ticker::every(frame_duration);
    let mut timestamp = 0_u64;
    loop {
        if matches!(repeat, Repeat::Frames(count) if timestamp >= count) {
            log::debug!("run_ticker: showed {} frames", timestamp);
            return Ok(timestamp);
        }

        log::trace!("run_ticker: showing timestamp {}", timestamp);
        sink.show(timestamp, frame_at(timestamp).borrow()).await?;
        timestamp += 1;

        match select(stop_signal.wait(), ticker.next()).await {
            Either::First(()) => {
                stop_signal.reset();
                log::info!("run_ticker: stopped after {} frames", timestamp);
                return Ok(timestamp);
            }
            Either::Second(()) => {}
        }
    }
}

/// Sends frames to any `smart_leds` strip driver, reordered into wiring order.
///
/// The driver owns the hardware protocol; this adapter only maps grid positions to strip
/// positions through the panel's [`LedLayout`].
pub struct SmartLedsSink<W> {
    writer: W,
    led_layout: LedLayout,
}

impl<W> SmartLedsSink<W> {
    /// Wrap a strip driver wired as `led_layout`.
    #[must_use]
    pub const fn new(writer: W, led_layout: LedLayout) -> Self {
        Self { writer, led_layout }
    }

    /// Return the wrapped driver.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> SmartLedsSink<W>
where
    W: SmartLedsWrite,
    W::Color: From<RGB8>,
{
    /// Write one frame to the strip.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameSizeMismatch`] if the frame does not match the layout and
    /// [`Error::DisplayWrite`] if the driver fails.
    pub fn write_frame(&mut self, frame: &Frame2d) -> Result<()> {
        let strip_frame = frame.to_strip_order(&self.led_layout)?;
        self.writer
            .write(strip_frame.iter().copied())
            .map_err(|_| Error::DisplayWrite)
    }
}

impl<W> FrameSink for SmartLedsSink<W>
where
    W: SmartLedsWrite,
    W::Color: From<RGB8>,
{
    async fn show(&mut self, _timestamp: u64, frame: &Frame2d) -> Result<()> {
        self.write_frame(frame)
    }
}
