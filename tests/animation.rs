#![cfg(feature = "host")]
#![allow(missing_docs)]
//! Host-level tests for the scrolling-band animation.

use elevator_panel::Error;
use elevator_panel::animation::{
    AnimationConfig, AnimationParameters, render_cycle, render_elevator_frame, render_frame,
};
use elevator_panel::led2d::layout::coord_to_index;
use elevator_panel::led_strip::{HexColor, OFF, ON, RGB8, colors};

fn elevator_params() -> AnimationParameters {
    AnimationParameters::new(12, 25, 25)
        .expect("valid params")
        .with_trail_length(2)
}

#[test]
fn first_frame_lights_two_rows_below_top_of_band() {
    let frame = render_frame(0, &elevator_params());
    assert_eq!(frame.width(), 12);
    assert_eq!(frame.height(), 25);
    assert_eq!(frame.lit_rows(ON), [22, 23]);
    for (row_index, row) in frame.rows().enumerate() {
        let expected = if row_index == 22 || row_index == 23 { ON } else { OFF };
        assert!(row.iter().all(|pixel| *pixel == expected), "row {row_index}");
    }
}

#[test]
fn band_climbs_one_row_per_timestamp() {
    let params = elevator_params();
    assert_eq!(render_frame(1, &params).lit_rows(ON), [21, 22]);
    assert_eq!(render_frame(22, &params).lit_rows(ON), [0, 1]);
    assert_eq!(render_frame(23, &params).lit_rows(ON), [0]);
    assert!(render_frame(24, &params).lit_rows(ON).is_empty());
}

#[test]
fn frames_repeat_every_cycle() {
    let params = elevator_params();
    for timestamp in 0..25 {
        let frame = render_frame(timestamp, &params);
        assert_eq!(render_frame(timestamp + 25, &params), frame);
        assert_eq!(render_frame(timestamp + 25 * 1000, &params), frame);
    }
    assert_eq!(render_frame(u64::MAX, &params), render_frame(u64::MAX % 25, &params));
}

#[test]
fn one_row_band_sweeps_every_row_but_the_bottom() {
    let params = AnimationParameters::new(12, 25, 25).expect("valid params");
    let lit: Vec<Vec<usize>> = render_cycle(&params)
        .iter()
        .map(|frame| frame.lit_rows(ON))
        .collect();
    assert_eq!(lit[0], [23]);
    assert_eq!(lit[23], [0]);
    assert!(lit[24].is_empty());
    // The leading edge is exclusive, so row 24 needs a negative offset to light.
    let mut visited: Vec<usize> = lit.into_iter().flatten().collect();
    visited.sort_unstable();
    assert_eq!(visited, (0..24).collect::<Vec<_>>());
}

#[test]
fn single_row_band_matches_classic_panel() {
    // One lit row at (height - 1) - phase: a one-row trail shifted down by one.
    let params = AnimationParameters::new(12, 25, 25)
        .expect("valid params")
        .with_row_offset(-1);
    for timestamp in 0..50 {
        let expected_row = 24 - (timestamp as usize % 25);
        assert_eq!(
            render_frame(timestamp, &params).lit_rows(ON),
            [expected_row],
            "timestamp {timestamp}"
        );
    }
}

#[test]
fn zero_trail_lights_nothing() {
    let params = elevator_params().with_trail_length(0);
    for frame in render_cycle(&params) {
        assert!(frame.lit_rows(ON).is_empty());
        assert_eq!(frame.lit_rows(OFF).len(), 25);
    }
}

#[test]
fn trail_longer_than_panel_is_clipped() {
    let params = elevator_params().with_trail_length(100);
    assert_eq!(render_frame(0, &params).lit_rows(ON), (0..24).collect::<Vec<_>>());
    assert!(render_frame(24, &params).lit_rows(ON).is_empty());
}

#[test]
fn positive_offset_shifts_band_up() {
    let params = elevator_params().with_row_offset(3);
    assert_eq!(render_frame(0, &params).lit_rows(ON), [19, 20]);
}

#[test]
fn short_cycle_wraps_before_reaching_top() {
    let params = AnimationParameters::new(4, 10, 3)
        .expect("valid params")
        .with_trail_length(2);
    assert_eq!(render_frame(0, &params).lit_rows(ON), [7, 8]);
    assert_eq!(render_frame(2, &params).lit_rows(ON), [5, 6]);
    assert_eq!(render_frame(3, &params).lit_rows(ON), [7, 8]);
}

#[test]
fn long_cycle_leaves_panel_dark_between_sweeps() {
    let params = AnimationParameters::new(2, 4, 10).expect("valid params");
    let dark_frames = render_cycle(&params)
        .iter()
        .filter(|frame| frame.lit_rows(ON).is_empty())
        .count();
    // Phases 3..10 put the band above the panel.
    assert_eq!(dark_frames, 7);
}

#[test]
fn render_cycle_has_one_frame_per_phase() {
    let params = elevator_params();
    let cycle = render_cycle(&params);
    assert_eq!(cycle.len(), 25);
    for (timestamp, frame) in cycle.iter().enumerate() {
        assert_eq!(*frame, render_frame(timestamp as u64, &params));
    }
}

#[test]
fn elevator_wall_defaults() {
    let params = AnimationParameters::ELEVATOR_WALL;
    assert_eq!(params, AnimationParameters::default());
    assert_eq!(params, elevator_params());
    assert_eq!(render_elevator_frame(7), render_frame(7, &params));
}

#[test]
fn custom_colors_are_used() {
    let params = elevator_params().with_colors(colors::RED, colors::NAVY);
    let frame = render_frame(0, &params);
    assert_eq!(frame.lit_rows(colors::RED), [22, 23]);
    assert_eq!(frame.lit_rows(colors::NAVY).len(), 23);
    assert_eq!(frame.to_hex_rows()[22][0], "#FF0000");
    assert_eq!(frame.to_hex_rows()[0][11], "#000080");
}

#[test]
fn strip_order_follows_serpentine_wiring() {
    let params = elevator_params();
    let frame = render_frame(0, &params);
    let strip = frame
        .to_strip_order(params.led_layout())
        .expect("frame matches layout");
    assert_eq!(strip.len(), 300);
    for (row, col) in [(22, 0), (23, 0), (22, 1), (23, 11)] {
        let index = coord_to_index(row, col, 12, 25).expect("on panel");
        assert_eq!(strip[index], ON, "({row}, {col})");
    }
    assert_eq!(strip.iter().filter(|pixel| **pixel == ON).count(), 24);
    // Column 0 runs downward, column 1 upward.
    assert_eq!(strip[22], ON);
    assert_eq!(strip[24], OFF);
    assert_eq!(strip[25], OFF);
    assert_eq!(strip[26], ON);
}

#[test]
fn strip_order_rejects_other_layouts() {
    let frame = render_frame(0, &elevator_params());
    let other = AnimationParameters::new(25, 12, 25).expect("valid params");
    assert_eq!(
        frame.to_strip_order(other.led_layout()),
        Err(Error::FrameSizeMismatch {
            width: 25,
            height: 12,
            actual_width: 12,
            actual_height: 25
        })
    );
}

#[test]
fn invalid_parameters_are_rejected() {
    assert_eq!(
        AnimationParameters::new(0, 25, 25),
        Err(Error::InvalidDimension {
            width: 0,
            height: 25
        })
    );
    assert_eq!(AnimationParameters::new(12, 25, 0), Err(Error::InvalidPeriod));
    // Dimensions are checked before the period.
    assert_eq!(
        AnimationParameters::new(12, 0, 0),
        Err(Error::InvalidDimension {
            width: 12,
            height: 0
        })
    );
}

#[test]
fn config_round_trips_custom_parameters() {
    let params = AnimationParameters::new(8, 32, 40)
        .expect("valid params")
        .with_trail_length(5)
        .with_row_offset(-3)
        .with_colors(RGB8::new(0xff, 0x80, 0x00), RGB8::new(0x01, 0x02, 0x03));
    let config = AnimationConfig::from(&params);
    assert_eq!(config.on_color.as_str(), "#FF8000");
    assert_eq!(config.off_color.as_str(), "#010203");

    let mut buffer = [0u8; AnimationConfig::MAX_ENCODED_LEN];
    let bytes = config.encode(&mut buffer).expect("fits in buffer");
    let decoded = AnimationConfig::decode(bytes).expect("valid bytes");
    assert_eq!(decoded, config);
    assert_eq!(AnimationParameters::try_from(decoded), Ok(params));
}

#[test]
fn worst_case_config_fits_encoding_buffer() {
    let config = AnimationConfig {
        width: u16::MAX,
        height: u16::MAX,
        frames_per_cycle: u32::MAX,
        trail_length: u32::MAX,
        row_offset: i32::MIN,
        on_color: RGB8::new(0xff, 0xff, 0xff).to_hex(),
        off_color: RGB8::new(0xff, 0xff, 0xff).to_hex(),
    };
    let mut buffer = [0u8; AnimationConfig::MAX_ENCODED_LEN];
    assert!(config.encode(&mut buffer).is_ok());
}

#[test]
fn config_with_bad_values_is_rejected() {
    let good = AnimationConfig::from(&AnimationParameters::ELEVATOR_WALL);

    let zero_period = AnimationConfig {
        frames_per_cycle: 0,
        ..good.clone()
    };
    assert_eq!(
        AnimationParameters::try_from(zero_period),
        Err(Error::InvalidPeriod)
    );

    let mut bad_color = good.clone();
    bad_color.on_color.clear();
    bad_color.on_color.push_str("white").expect("fits");
    assert_eq!(
        AnimationParameters::try_from(bad_color),
        Err(Error::InvalidColor)
    );

    let zero_width = AnimationConfig { width: 0, ..good };
    assert_eq!(
        AnimationParameters::try_from(zero_width),
        Err(Error::InvalidDimension {
            width: 0,
            height: 25
        })
    );

    assert_eq!(AnimationConfig::decode(&[0xff]), Err(Error::ConfigFormat));
}
