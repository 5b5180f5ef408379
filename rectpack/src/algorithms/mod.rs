mod config;
mod fitness;
mod guillotine;
mod maxrects;
mod surface;

#[doc(inline)]
pub use config::GuillotineConfig;
#[doc(inline)]
pub use config::MaxRectsConfig;
#[doc(inline)]
pub use config::PackAlgo;
#[doc(inline)]
pub use fitness::Fitness;
#[doc(inline)]
pub use guillotine::{Guillotine, SectionFitness, SplitDirection, SplitRule};
#[doc(inline)]
pub use maxrects::{MaxRects, RectFitness};
#[doc(inline)]
pub use surface::BinSurface;

pub(crate) use surface::ensure_positive;

use std::fmt::Debug;

use anyhow::Result;

use crate::geometry::primitives::Rect;

/// Per-bin placement as returned by [`PackingAlgorithm::rect_list`]: `(x, y, width, height, rid)`
pub type PlacedRectTuple = (f32, f32, f32, f32, Option<usize>);

/// Contract shared by every single-bin packing heuristic.
///
/// A bin starts empty, accumulates placed rectangles through [`add_rect`](PackingAlgorithm::add_rect)
/// and can be brought back to the empty state with [`reset`](PackingAlgorithm::reset).
/// When rotation is enabled, every candidate position is also evaluated with width and height swapped.
/// On equal scores the unrotated orientation wins.
pub trait PackingAlgorithm: Debug {
    /// State common to all algorithms: dimensions, rotation flag, id and placed rectangles
    fn surface(&self) -> &BinSurface;

    /// Places a `width` x `height` rectangle, returns the placement or `None` if it does not fit anywhere.
    /// Fails if either dimension is not strictly positive.
    fn add_rect(&mut self, width: f32, height: f32, rid: Option<usize>) -> Result<Option<Rect>>;

    /// Score (lower is better) of the placement [`add_rect`](PackingAlgorithm::add_rect) would make,
    /// without modifying the bin. `None` if the rectangle cannot be placed.
    fn fitness(&self, width: f32, height: f32) -> Result<Option<Fitness>>;

    /// Removes all placed rectangles and restores the free space to the full surface
    fn reset(&mut self);

    fn width(&self) -> f32 {
        self.surface().width()
    }

    fn height(&self) -> f32 {
        self.surface().height()
    }

    fn rotation(&self) -> bool {
        self.surface().rotation()
    }

    fn bid(&self) -> Option<usize> {
        self.surface().bid()
    }

    /// All placed rectangles, in placement order
    fn rectangles(&self) -> &[Rect] {
        self.surface().rectangles()
    }

    fn len(&self) -> usize {
        self.rectangles().len()
    }

    fn is_empty(&self) -> bool {
        self.rectangles().is_empty()
    }

    fn get(&self, index: usize) -> Option<&Rect> {
        self.rectangles().get(index)
    }

    /// Total area covered by placed rectangles
    fn used_area(&self) -> f32 {
        self.surface().used_area()
    }

    fn rect_list(&self) -> Vec<PlacedRectTuple> {
        self.rectangles()
            .iter()
            .map(|r| (r.x(), r.y(), r.width(), r.height(), r.rid()))
            .collect()
    }

    /// True if a `width` x `height` rectangle fits the empty surface, considering rotation if enabled
    fn fits_surface(&self, width: f32, height: f32) -> Result<bool> {
        self.surface().fits(width, height)
    }

    /// Fails if a placed rectangle leaves the surface or overlaps another one
    fn validate_packing(&self) -> Result<()> {
        self.surface().validate()
    }
}
