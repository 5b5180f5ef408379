use anyhow::Result;
use itertools::Itertools;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::algorithms::{BinSurface, Fitness, MaxRectsConfig, PackingAlgorithm, ensure_positive};
use crate::geometry::geo_traits::CollidesWith;
use crate::geometry::primitives::Rect;
use crate::util::assertions;

/// Rule used to score a placement in a maximal free rectangle.
/// The rectangle is always placed in the lower-left corner of the maximal rectangle.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum RectFitness {
    /// Free rectangle area minus rectangle area
    BestAreaFit,
    /// Smallest of the two leftover sides
    #[default]
    BestShortSideFit,
    /// Largest of the two leftover sides
    BestLongSideFit,
    /// Lowest top edge of the placed rectangle, ties broken by leftmost position
    BottomLeft,
}

impl RectFitness {
    /// `None` if the rectangle does not fit inside `max_rect`
    pub fn score(&self, max_rect: &Rect, width: f32, height: f32) -> Option<Fitness> {
        if width > max_rect.width() || height > max_rect.height() {
            return None;
        }
        let leftover_w = max_rect.width() - width;
        let leftover_h = max_rect.height() - height;
        let fitness = match self {
            RectFitness::BestAreaFit => {
                Fitness::new(leftover_w * max_rect.height() + width * leftover_h)
            }
            RectFitness::BestShortSideFit => Fitness::new(f32::min(leftover_w, leftover_h)),
            RectFitness::BestLongSideFit => Fitness::new(f32::max(leftover_w, leftover_h)),
            RectFitness::BottomLeft => Fitness::with_tiebreak(max_rect.y() + height, max_rect.x()),
        };
        Some(fitness)
    }
}

/// Maximal rectangles packing.
///
/// The free space is represented by every maximal free rectangle, which generally overlap.
/// After a placement, each maximal rectangle overlapping it is replaced by up to four
/// remainders, and rectangles contained in others are pruned.
#[derive(Clone, Debug)]
pub struct MaxRects {
    surface: BinSurface,
    config: MaxRectsConfig,
    max_rects: Vec<Rect>,
}

impl MaxRects {
    pub fn new(width: f32, height: f32, rot: bool, config: MaxRectsConfig) -> Result<Self> {
        let surface = BinSurface::new(width, height, rot)?;
        let max_rects = vec![surface.bbox()];
        Ok(MaxRects {
            surface,
            config,
            max_rects,
        })
    }

    pub fn with_bid(mut self, bid: Option<usize>) -> Self {
        self.surface.set_bid(bid);
        self
    }

    /// Current maximal free rectangles
    pub fn max_rects(&self) -> &[Rect] {
        &self.max_rects
    }

    /// Returns the fitness, index of the maximal rectangle and rotation of the best placement.
    /// Unrotated candidates are considered before rotated ones, the first best one is kept.
    fn select_position(&self, width: f32, height: f32) -> Option<(Fitness, usize, bool)> {
        let fitness = self.config.fitness;
        let candidates = |w: f32, h: f32, rotated: bool| {
            let max_rects: &[Rect] = &self.max_rects;
            max_rects
                .iter()
                .enumerate()
                .filter_map(move |(i, m)| fitness.score(m, w, h).map(|f| (f, i, rotated)))
                .collect_vec()
        };
        let mut all = candidates(width, height, false);
        if self.surface.rotation() {
            all.extend(candidates(height, width, true));
        }

        all.into_iter().min_by_key(|(f, _, _)| *f)
    }

    /// Remainders of `m` not covered by `rect`: left, right, top and bottom, in that order
    fn generate_splits(m: &Rect, rect: &Rect) -> Vec<Rect> {
        let mut splits = Vec::with_capacity(4);
        if rect.left() > m.left() {
            splits.push(Rect::new(m.left(), m.bottom(), rect.left() - m.left(), m.height()));
        }
        if rect.right() < m.right() {
            splits.push(Rect::new(rect.right(), m.bottom(), m.right() - rect.right(), m.height()));
        }
        if rect.top() < m.top() {
            splits.push(Rect::new(m.left(), rect.top(), m.width(), m.top() - rect.top()));
        }
        if rect.bottom() > m.bottom() {
            splits.push(Rect::new(m.left(), m.bottom(), m.width(), rect.bottom() - m.bottom()));
        }
        splits
    }

    /// Replaces every maximal rectangle overlapping `rect` by its remainders
    fn split(&mut self, rect: &Rect) {
        self.max_rects = self
            .max_rects
            .iter()
            .flat_map(|m| match m.collides_with(rect) {
                true => Self::generate_splits(m, rect),
                false => vec![*m],
            })
            .collect();
    }

    /// Removes maximal rectangles contained in another one. Of two equal rectangles, the first is kept.
    fn remove_duplicates(&mut self) {
        let mut contained = vec![false; self.max_rects.len()];
        for ((i, m1), (j, m2)) in self.max_rects.iter().enumerate().tuple_combinations() {
            if m1.contains(m2) {
                contained[j] = true;
            } else if m2.contains(m1) {
                contained[i] = true;
            }
        }
        let mut contained = contained.into_iter();
        self.max_rects.retain(|_| !contained.next().unwrap_or(false));
    }
}

impl PackingAlgorithm for MaxRects {
    fn surface(&self) -> &BinSurface {
        &self.surface
    }

    fn add_rect(&mut self, width: f32, height: f32, rid: Option<usize>) -> Result<Option<Rect>> {
        ensure_positive(width, height)?;

        let Some((_, index, rotated)) = self.select_position(width, height) else {
            return Ok(None);
        };
        let (width, height) = match rotated {
            true => (height, width),
            false => (width, height),
        };

        let m = self.max_rects[index];
        let rect = Rect::new(m.x(), m.y(), width, height).with_rid(rid);

        self.split(&rect);
        self.remove_duplicates();
        self.surface.push(rect);

        trace!(
            "[MAXRECTS] placed {rect} in {m}, {} maximal rectangles",
            self.max_rects.len()
        );
        debug_assert!(assertions::max_rects_are_maximal(&self.max_rects));
        debug_assert!(assertions::free_space_is_free(
            &self.max_rects,
            self.surface.rectangles()
        ));

        Ok(Some(rect))
    }

    fn fitness(&self, width: f32, height: f32) -> Result<Option<Fitness>> {
        ensure_positive(width, height)?;
        Ok(self.select_position(width, height).map(|(fitness, _, _)| fitness))
    }

    fn reset(&mut self) {
        self.surface.clear();
        self.max_rects = vec![self.surface.bbox()];
    }
}
