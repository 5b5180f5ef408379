use anyhow::{Context, Result, bail, ensure};
use itertools::Itertools;

use crate::geometry::geo_traits::{CollidesWith, Shape};
use crate::geometry::primitives::Rect;

/// State every bin carries regardless of the heuristic that fills it.
#[derive(Clone, Debug)]
pub struct BinSurface {
    width: f32,
    height: f32,
    rot: bool,
    bid: Option<usize>,
    rectangles: Vec<Rect>,
}

impl BinSurface {
    pub fn new(width: f32, height: f32, rot: bool) -> Result<Self> {
        ensure_positive(width, height).context("invalid bin dimensions")?;
        Ok(BinSurface {
            width,
            height,
            rot,
            bid: None,
            rectangles: vec![],
        })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn rotation(&self) -> bool {
        self.rot
    }

    pub fn bid(&self) -> Option<usize> {
        self.bid
    }

    pub fn set_bid(&mut self, bid: Option<usize>) {
        self.bid = bid;
    }

    pub fn rectangles(&self) -> &[Rect] {
        &self.rectangles
    }

    /// The full surface as a rectangle anchored at the origin
    pub fn bbox(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn used_area(&self) -> f32 {
        self.rectangles.iter().map(|r| r.area()).sum()
    }

    /// True if a `width` x `height` rectangle fits the empty surface, considering rotation if enabled
    pub fn fits(&self, width: f32, height: f32) -> Result<bool> {
        ensure_positive(width, height)?;
        let fits = |w: f32, h: f32| w <= self.width && h <= self.height;
        Ok(fits(width, height) || (self.rot && fits(height, width)))
    }

    pub(crate) fn push(&mut self, rect: Rect) {
        self.rectangles.push(rect);
    }

    pub(crate) fn clear(&mut self) {
        self.rectangles.clear();
    }

    /// Checks that all placed rectangles are inside the surface and pairwise free of overlap.
    /// Rectangles sharing an edge are allowed.
    pub fn validate(&self) -> Result<()> {
        let bbox = self.bbox();
        if let Some(r) = self.rectangles.iter().find(|r| !bbox.contains(r)) {
            bail!(
                "rectangle {r} placed outside surface {}x{} of bin {:?}",
                self.width,
                self.height,
                self.bid
            );
        }
        if let Some((r1, r2)) = self
            .rectangles
            .iter()
            .tuple_combinations()
            .find(|(r1, r2)| r1.collides_with(*r2))
        {
            bail!("rectangle collision detected in bin {:?}: {r1} and {r2}", self.bid);
        }
        Ok(())
    }
}

/// Fails unless both dimensions are finite and strictly positive
pub(crate) fn ensure_positive(width: f32, height: f32) -> Result<()> {
    ensure!(
        width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0,
        "width and height must be positive, got {width}x{height}"
    );
    Ok(())
}
