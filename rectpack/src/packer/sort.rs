use std::cmp::Reverse;

use itertools::Itertools;
use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

use crate::packer::PendingRect;

/// Order in which an offline packer places its buffered rectangles.
/// All orders are descending and stable: rectangles with equal keys keep their submission order.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SortPolicy {
    #[default]
    Area,
    /// Width plus height
    Perimeter,
    /// Absolute difference between width and height
    SideDiff,
    /// Shorter side, ties broken by the longer side
    ShortSide,
    /// Longer side, ties broken by the shorter side
    LongSide,
    /// Width divided by height
    Ratio,
    /// Submission order
    Unsorted,
}

impl SortPolicy {
    fn key(&self, w: f32, h: f32) -> (f32, f32) {
        match self {
            SortPolicy::Area => (w * h, 0.0),
            SortPolicy::Perimeter => (w + h, 0.0),
            SortPolicy::SideDiff => ((w - h).abs(), 0.0),
            SortPolicy::ShortSide => (f32::min(w, h), f32::max(w, h)),
            SortPolicy::LongSide => (f32::max(w, h), f32::min(w, h)),
            SortPolicy::Ratio => (w / h, 0.0),
            SortPolicy::Unsorted => (0.0, 0.0),
        }
    }

    /// Returns a sorted copy of `rects`
    pub fn apply(&self, rects: &[PendingRect]) -> Vec<PendingRect> {
        match self {
            SortPolicy::Unsorted => rects.to_vec(),
            _ => rects
                .iter()
                .copied()
                .sorted_by_key(|&(w, h, _)| {
                    let (k1, k2) = self.key(w, h);
                    Reverse((
                        NotNan::new(k1).expect("sort key is NaN"),
                        NotNan::new(k2).expect("sort key is NaN"),
                    ))
                })
                .collect(),
        }
    }
}
