#![allow(missing_docs)]
//! Play one cycle of the elevator wall animation at panel speed, printing each frame as
//! text, then save the cycle as a looping APNG.
//!
//! Usage: `cargo run --bin demo_elevator_preview -- [output.png]`

use std::error::Error;

use elevator_panel::{
    Result,
    animation::AnimationParameters,
    led2d::Frame2d,
    panel_player::{FrameSink, Repeat, StopSignal, play},
    to_png::ApngRecorder,
};
use embassy_executor::Spawner;
use embassy_time::Duration;

const FRAME_DURATION: Duration = Duration::from_millis(500);
const PREVIEW_MAX_DIMENSION: u32 = 400;
const DEFAULT_OUTPUT_PATH: &str = "elevator_preview.png";

/// Logs frames as `#`/`.` art and records them for the APNG.
struct ConsolePreview {
    recorder: ApngRecorder,
    params: AnimationParameters,
}

impl FrameSink for ConsolePreview {
    async fn show(&mut self, timestamp: u64, frame: &Frame2d) -> Result<()> {
        log::info!("timestamp {timestamp}:");
        for row in frame.rows() {
            let line: String = row
                .iter()
                .map(|pixel| if *pixel == self.params.on_color() { '#' } else { '.' })
                .collect();
            log::info!("  {line}");
        }
        self.recorder.show(timestamp, frame).await
    }
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = inner_main().await {
        log::error!("{err}");
        std::process::exit(1);
    }
}

async fn inner_main() -> Result<(), Box<dyn Error>> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_owned());
    let params = AnimationParameters::ELEVATOR_WALL;

    let mut preview = ConsolePreview {
        recorder: ApngRecorder::new(params.width(), params.height()),
        params,
    };
    let stop_signal = StopSignal::new();
    let shown = play(
        &params,
        FRAME_DURATION,
        Repeat::Frames(u64::from(params.frames_per_cycle())),
        &mut preview,
        &stop_signal,
    )
    .await?;
    log::info!("played {shown} frames");

    let frame_delay_ms = u32::try_from(FRAME_DURATION.as_millis())?;
    preview
        .recorder
        .finish(&output_path, PREVIEW_MAX_DIMENSION, frame_delay_ms)?;
    Ok(())
}
