// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hoshi (star point) computation

use crate::Coord;
use std::collections::BTreeSet;

/// Distance from the edge to the corner star points, counted from 1.
///
/// `None` for boards too small to carry corner points.
fn margin(size: u8) -> Option<u8> {
    match size {
        s if s > 11 => Some(4),
        s if s > 6 => Some(3),
        s if s > 4 => Some(2),
        _ => None,
    }
}

/// Compute the star points for a board of the given size.
///
/// Odd boards get a center point. Boards with a margin get four corner
/// points, and odd boards larger than 9 also get four edge midpoints.
pub fn compute(size: u8) -> BTreeSet<Coord> {
    let mut points = BTreeSet::new();
    let odd = size % 2 == 1;
    let half = size / 2;

    if odd {
        points.insert(Coord::new(half, half));
    }

    let Some(margin) = margin(size) else {
        return points;
    };

    let near = margin - 1;
    let far = size - margin;

    for x in [near, far] {
        for y in [near, far] {
            points.insert(Coord::new(x, y));
        }
    }

    if odd && size > 9 {
        points.insert(Coord::new(half, near));
        points.insert(Coord::new(half, far));
        points.insert(Coord::new(near, half));
        points.insert(Coord::new(far, half));
    }

    points
}
