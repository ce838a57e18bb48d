#![cfg(feature = "host")]
#![allow(missing_docs)]
//! Host-level tests for the serpentine wiring map.

use std::collections::HashSet;

use elevator_panel::Error;
use elevator_panel::led2d::layout::{GridCoord, LedLayout, coord_to_index, index_to_coord};
use itertools::iproduct;

#[test]
fn serpentine_3x2_matches_diagram() {
    let layout = LedLayout::serpentine_column_major(3, 2).expect("valid layout");
    assert_eq!(
        layout.coords().collect::<Vec<_>>(),
        [
            GridCoord::new(0, 0),
            GridCoord::new(1, 0),
            GridCoord::new(1, 1),
            GridCoord::new(0, 1),
            GridCoord::new(0, 2),
            GridCoord::new(1, 2),
        ]
    );
    assert_eq!(layout.index_by_coord(), [0, 3, 4, 1, 2, 5]);
}

#[test]
fn elevator_wall_column_boundaries() {
    for (index, expected) in [(0, (0, 0)), (24, (24, 0)), (25, (24, 1)), (49, (0, 1)), (50, (0, 2))]
    {
        assert_eq!(index_to_coord(index, 12, 25), Ok(expected), "index {index}");
        assert_eq!(coord_to_index(expected.0, expected.1, 12, 25), Ok(index));
    }
    assert_eq!(index_to_coord(299, 12, 25), Ok((0, 11)));
}

#[test]
fn mapping_is_a_bijection() {
    for (width, height) in [(1, 1), (1, 7), (7, 1), (2, 2), (3, 2), (5, 4), (12, 25)] {
        let layout = LedLayout::serpentine_column_major(width, height).expect("valid layout");
        let mut seen = HashSet::new();
        for index in 0..width * height {
            let coord = layout.index_to_coord(index).expect("index on panel");
            assert!(coord.row < height && coord.col < width);
            assert!(seen.insert(coord), "{coord:?} mapped twice on {width}x{height}");
            assert_eq!(layout.coord_to_index(coord), Ok(index));
        }
        let every_cell: HashSet<_> = iproduct!(0..height, 0..width).map(GridCoord::from).collect();
        assert_eq!(seen, every_cell);
    }
}

#[test]
fn single_row_panel_walks_left_to_right() {
    let layout = LedLayout::serpentine_column_major(4, 1).expect("valid layout");
    assert_eq!(
        layout.coords().map(<(usize, usize)>::from).collect::<Vec<_>>(),
        [(0, 0), (0, 1), (0, 2), (0, 3)]
    );
}

#[test]
fn consecutive_leds_are_adjacent() {
    let layout = LedLayout::serpentine_column_major(6, 5).expect("valid layout");
    let coords: Vec<_> = layout.coords().collect();
    for pair in coords.windows(2) {
        let distance = pair[0].row.abs_diff(pair[1].row) + pair[0].col.abs_diff(pair[1].col);
        assert_eq!(distance, 1, "{:?} -> {:?}", pair[0], pair[1]);
    }
}

#[test]
fn index_out_of_range_is_rejected() {
    assert_eq!(
        index_to_coord(300, 12, 25),
        Err(Error::IndexOutOfRange {
            axis: "index",
            value: 300,
            bound: 300
        })
    );
    assert_eq!(
        coord_to_index(25, 0, 12, 25),
        Err(Error::IndexOutOfRange {
            axis: "row",
            value: 25,
            bound: 25
        })
    );
    assert_eq!(
        coord_to_index(0, 12, 12, 25),
        Err(Error::IndexOutOfRange {
            axis: "col",
            value: 12,
            bound: 12
        })
    );
}

#[test]
fn invalid_dimensions_are_rejected() {
    for (width, height) in [(0, 25), (12, 0), (0, 0), (256, 256), (usize::MAX, 2)] {
        assert_eq!(
            LedLayout::serpentine_column_major(width, height),
            Err(Error::InvalidDimension { width, height })
        );
        assert_eq!(
            index_to_coord(0, width, height),
            Err(Error::InvalidDimension { width, height })
        );
    }
}

#[test]
fn error_messages_name_the_axis() {
    let err = coord_to_index(0, 12, 12, 25).expect_err("column is off the panel");
    assert_eq!(err.to_string(), "col 12 out of range 0..12");
}
