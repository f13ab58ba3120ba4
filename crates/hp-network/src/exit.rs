//! Nearest-exit lookup.
//!
//! Exits are few (three by default), so a linear scan beats any index.  The
//! first exit at the minimum distance wins, which keeps results stable when
//! two exits are equidistant.

use hp_core::{ExitId, Point};

/// Result of a nearest-exit query.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ExitHit {
    pub exit:     ExitId,
    pub distance: f64,
}

/// The exit closest to `point`, or `None` if `exits` is empty.
pub fn nearest_exit(point: Point, exits: &[Point]) -> Option<ExitHit> {
    let mut best: Option<ExitHit> = None;
    for (i, &e) in exits.iter().enumerate() {
        let d = point.distance(e);
        if best.is_none_or(|b| d < b.distance) {
            best = Some(ExitHit { exit: ExitId(i as u32), distance: d });
        }
    }
    best
}

/// Distance from `point` to the closest exit; `f64::INFINITY` if there is none.
#[inline]
pub fn distance_to_nearest_exit(point: Point, exits: &[Point]) -> f64 {
    nearest_exit(point, exits).map_or(f64::INFINITY, |hit| hit.distance)
}
