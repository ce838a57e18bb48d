//! Preview frames as PNG images: one still per frame, or a looping APNG for a sequence.
//!
//! Each LED is drawn as a soft-edged dot on black, so previews look like the panel
//! rather than a pixel grid.

use crate::Result;
use crate::led2d::Frame2d;
use crate::panel_player::FrameSink;
use png::{BitDepth, ColorType, Encoder, ScaledFloat};
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const PREVIEW_INVERSE_GAMMA: f32 = 2.2;

/// Render a `Frame2d` into a PNG file sized to the requested maximum dimension.
///
/// # Errors
///
/// Returns an error if the file cannot be created or encoded.
pub fn write_frame_png(
    frame: &Frame2d,
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
) -> Result<(), Box<dyn Error>> {
    write_frame_png_with_gamma(frame, output_path, target_max_dimension, PREVIEW_INVERSE_GAMMA)
}

/// Render a `Frame2d` into a PNG file with a custom preview inverse gamma.
///
/// # Errors
///
/// Returns an error if the file cannot be created or encoded.
pub fn write_frame_png_with_gamma(
    frame: &Frame2d,
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
    preview_inverse_gamma: f32,
) -> Result<(), Box<dyn Error>> {
    assert!(preview_inverse_gamma > 0.0, "preview_inverse_gamma must be positive");
    let output_path = output_path.as_ref();
    let cell_size = select_cell_size(frame, target_max_dimension)?;
    let (width, height, pixels) = panel_pixels(frame, cell_size, preview_inverse_gamma)?;
    create_parent_dir(output_path)?;

    let file = File::create(output_path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Sixteen);
    encoder.set_source_gamma(ScaledFloat::new(1.0));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&pixels)?;
    writer.finish()?;
    log::info!("wrote PNG to {}", output_path.display());
    Ok(())
}

/// Render multiple `Frame2d` values into a looping APNG file.
///
/// # Errors
///
/// Returns an error if the frames differ in size, or the file cannot be created or encoded.
pub fn write_frames_apng(
    frames: &[Frame2d],
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
    frame_delay_ms: u32,
) -> Result<(), Box<dyn Error>> {
    write_frames_apng_with_gamma(
        frames,
        output_path,
        target_max_dimension,
        frame_delay_ms,
        PREVIEW_INVERSE_GAMMA,
    )
}

/// Render multiple `Frame2d` values into a looping APNG file with a custom preview inverse gamma.
///
/// # Errors
///
/// Returns an error if the frames differ in size, or the file cannot be created or encoded.
pub fn write_frames_apng_with_gamma(
    frames: &[Frame2d],
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
    frame_delay_ms: u32,
    preview_inverse_gamma: f32,
) -> Result<(), Box<dyn Error>> {
    let Some(first_frame) = frames.first() else {
        return Err("frames must not be empty".into());
    };
    assert!(frame_delay_ms > 0, "frame_delay_ms must be positive");
    assert!(preview_inverse_gamma > 0.0, "preview_inverse_gamma must be positive");
    let output_path = output_path.as_ref();
    let cell_size = select_cell_size(first_frame, target_max_dimension)?;
    let frame_count = u32::try_from(frames.len())?;
    let delay_num = u16::try_from(frame_delay_ms)?;
    let delay_den = 1000u16;

    let mut pixels = Vec::with_capacity(frames.len());
    for frame in frames {
        if frame.width() != first_frame.width() || frame.height() != first_frame.height() {
            return Err(crate::Error::FrameSizeMismatch {
                width: first_frame.width(),
                height: first_frame.height(),
                actual_width: frame.width(),
                actual_height: frame.height(),
            }
            .into());
        }
        pixels.push(panel_pixels(frame, cell_size, preview_inverse_gamma)?);
    }
    let (width, height) = (pixels[0].0, pixels[0].1);
    create_parent_dir(output_path)?;

    let file = File::create(output_path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Sixteen);
    encoder.set_source_gamma(ScaledFloat::new(1.0));
    // 0 plays: loop forever, like the panel itself.
    encoder.set_animated(frame_count, 0)?;
    let mut writer = encoder.write_header()?;
    for (_, _, frame_pixels) in pixels {
        writer.set_frame_delay(delay_num, delay_den)?;
        writer.write_image_data(&frame_pixels)?;
    }
    writer.finish()?;
    log::info!("wrote APNG to {}", output_path.display());
    Ok(())
}

/// A [`FrameSink`] that records every frame it is shown, then writes them as an APNG.
///
/// ```rust,no_run
/// use elevator_panel::animation::AnimationParameters;
/// use elevator_panel::panel_player::{Repeat, StopSignal, play};
/// use elevator_panel::to_png::ApngRecorder;
/// use embassy_time::Duration;
///
/// let params = AnimationParameters::ELEVATOR_WALL;
/// let mut recorder = ApngRecorder::new(params.width(), params.height());
/// embassy_futures::block_on(play(
///     &params,
///     Duration::from_millis(500),
///     Repeat::Frames(u64::from(params.frames_per_cycle())),
///     &mut recorder,
///     &StopSignal::new(),
/// ))?;
/// recorder.finish("elevator.png", 300, 500)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct ApngRecorder {
    width: usize,
    height: usize,
    frames: Vec<Frame2d>,
}

impl ApngRecorder {
    /// Start an empty recording for a `width`×`height` panel.
    #[must_use]
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            frames: Vec::new(),
        }
    }

    /// Frames recorded so far, in the order shown.
    #[must_use]
    pub fn frames(&self) -> &[Frame2d] {
        &self.frames
    }

    /// Write the recording as a looping APNG.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing was recorded or the file cannot be written.
    pub fn finish(
        self,
        output_path: impl AsRef<Path>,
        target_max_dimension: u32,
        frame_delay_ms: u32,
    ) -> Result<(), Box<dyn Error>> {
        write_frames_apng(&self.frames, output_path, target_max_dimension, frame_delay_ms)
    }
}

impl FrameSink for ApngRecorder {
    async fn show(&mut self, _timestamp: u64, frame: &Frame2d) -> Result<()> {
        if frame.width() != self.width || frame.height() != self.height {
            return Err(crate::Error::FrameSizeMismatch {
                width: self.width,
                height: self.height,
                actual_width: frame.width(),
                actual_height: frame.height(),
            });
        }
        self.frames.push(frame.clone());
        Ok(())
    }
}

fn create_parent_dir(output_path: &Path) -> std::io::Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn select_cell_size(frame: &Frame2d, target_max_dimension: u32) -> Result<u32, Box<dyn Error>> {
    assert!(target_max_dimension > 0, "target_max_dimension must be positive");
    let panel_max = u64::try_from(frame.width().max(frame.height()))?;
    // The dot border adds at least 3/4 of a cell (less 3px), so no larger cell can fit.
    let upper_bound = 4 * (u64::from(target_max_dimension) + 3) / (4 * panel_max + 3);
    let mut cell_size = u32::try_from(upper_bound)?.min(target_max_dimension);
    while cell_size > 1 {
        if preview_size(frame, cell_size)
            .is_some_and(|(width, height, _)| width.max(height) <= target_max_dimension)
        {
            break;
        }
        cell_size -= 1;
    }
    // A dot needs room for a margin and a fade ring.
    if cell_size < 8 {
        return Err(format!(
            "{target_max_dimension}px is too small to preview a {}x{} panel",
            frame.width(),
            frame.height()
        )
        .into());
    }
    Ok(cell_size)
}

/// Image width, height, and LED dot radius for `cell_size`, or `None` if the image
/// would not fit `u32` dimensions.
fn preview_size(frame: &Frame2d, cell_size: u32) -> Option<(u32, u32, u32)> {
    let led_margin = (cell_size / 8).max(1);
    let led_radius = cell_size.saturating_sub(led_margin * 2) / 2;
    let border = led_radius.checked_mul(2)?;
    let width = u32::try_from(frame.width())
        .ok()?
        .checked_mul(cell_size)?
        .checked_add(border)?;
    let height = u32::try_from(frame.height())
        .ok()?
        .checked_mul(cell_size)?
        .checked_add(border)?;
    Some((width, height, led_radius))
}

fn panel_pixels(
    frame: &Frame2d,
    cell_size: u32,
    preview_inverse_gamma: f32,
) -> Result<(u32, u32, Vec<u8>), Box<dyn Error>> {
    let (width, height, led_radius) =
        preview_size(frame, cell_size).ok_or("preview image dimensions overflow u32")?;
    let fade_width = (led_radius / 3).max(1);
    let border = led_radius;
    let byte_len = usize::try_from(width)?
        .checked_mul(usize::try_from(height)?)
        .and_then(|pixel_count| pixel_count.checked_mul(3 * 2))
        .ok_or("preview image is too large to allocate")?;

    let mut bytes = vec![0u8; byte_len];
    let row_stride = width as usize;
    let center = (cell_size - 1) as i32 / 2;
    let led_radius_f = led_radius as f32;
    let inner_radius_f = (led_radius - fade_width) as f32;
    let radius_sq = (led_radius as i32) * (led_radius as i32);

    for coord in frame.coords() {
        let pixel = frame[(coord.col, coord.row)];
        let cell_origin_x = coord.col * cell_size as usize;
        let cell_origin_y = coord.row * cell_size as usize;
        let channels = [pixel.r, pixel.g, pixel.b]
            .map(|channel| inverse_gamma_to_linear(channel, preview_inverse_gamma));

        for local_y in 0..cell_size {
            let delta_y = local_y as i32 - center;
            for local_x in 0..cell_size {
                let delta_x = local_x as i32 - center;
                let distance_sq = delta_x * delta_x + delta_y * delta_y;
                if distance_sq > radius_sq {
                    continue;
                }
                let distance = (distance_sq as f32).sqrt();
                let intensity = if distance <= inner_radius_f {
                    1.0
                } else {
                    let fade_span = led_radius_f - inner_radius_f;
                    (1.0 - (distance - inner_radius_f) / fade_span).max(0.0)
                };
                let x = border as usize + cell_origin_x + local_x as usize;
                let y = border as usize + cell_origin_y + local_y as usize;
                let pixel_index = (y * row_stride + x) * 3 * 2;
                for (channel_index, linear) in channels.iter().enumerate() {
                    let value = linear_to_u16(linear * intensity).to_be_bytes();
                    let byte_index = pixel_index + channel_index * 2;
                    bytes[byte_index..byte_index + 2].copy_from_slice(&value);
                }
            }
        }
    }

    Ok((width, height, bytes))
}

fn inverse_gamma_to_linear(channel: u8, preview_inverse_gamma: f32) -> f32 {
    let normalized = f32::from(channel) / 255.0;
    normalized.powf(preview_inverse_gamma)
}

fn linear_to_u16(value: f32) -> u16 {
    let clamped = value.clamp(0.0, 1.0);
    (clamped * 65535.0).round() as u16
}
