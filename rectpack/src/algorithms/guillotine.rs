use anyhow::Result;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::algorithms::{
    BinSurface, Fitness, GuillotineConfig, PackingAlgorithm, ensure_positive,
};
use crate::geometry::primitives::Rect;
use crate::util::assertions;

/// Rule used to score a free section for a rectangle of a given size.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SectionFitness {
    /// Section area minus rectangle area
    BestAreaFit,
    /// Largest of the two leftover sides
    BestLongSideFit,
    /// Smallest of the two leftover sides
    #[default]
    BestShortSideFit,
}

impl SectionFitness {
    /// `None` if the rectangle does not fit inside `section`
    pub fn score(&self, section: &Rect, width: f32, height: f32) -> Option<Fitness> {
        if width > section.width() || height > section.height() {
            return None;
        }
        let leftover_w = section.width() - width;
        let leftover_h = section.height() - height;
        let score = match self {
            SectionFitness::BestAreaFit => leftover_w * section.height() + width * leftover_h,
            SectionFitness::BestLongSideFit => f32::max(leftover_w, leftover_h),
            SectionFitness::BestShortSideFit => f32::min(leftover_w, leftover_h),
        };
        Some(Fitness::new(score))
    }
}

/// Orientation of the cut separating the two residual sections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitDirection {
    /// Residual above keeps the full section width, residual to the right is as tall as the rectangle
    Horizontal,
    /// Residual above is as wide as the rectangle, residual to the right keeps the full section height
    Vertical,
}

/// Rule choosing between a [horizontal](SplitDirection::Horizontal) and a [vertical](SplitDirection::Vertical) split.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SplitRule {
    /// Split along the shorter axis of the section
    #[default]
    ShorterAxis,
    /// Split along the longer axis of the section
    LongerAxis,
    /// Split along the shorter leftover axis
    ShorterLeftoverAxis,
    /// Split along the longer leftover axis
    LongerLeftoverAxis,
    /// Maximize the difference in area between the two residual sections
    MaxArea,
    /// Keep the two residual sections as even in area as possible
    MinArea,
}

impl SplitRule {
    pub fn direction(&self, section: &Rect, width: f32, height: f32) -> SplitDirection {
        let (s_w, s_h) = (section.width(), section.height());
        let horizontal = match self {
            SplitRule::ShorterAxis => s_w < s_h,
            SplitRule::LongerAxis => s_w >= s_h,
            SplitRule::ShorterLeftoverAxis => s_w - width < s_h - height,
            SplitRule::LongerLeftoverAxis => s_w - width >= s_h - height,
            SplitRule::MaxArea => width * (s_h - height) <= height * (s_w - width),
            SplitRule::MinArea => width * (s_h - height) >= height * (s_w - width),
        };
        match horizontal {
            true => SplitDirection::Horizontal,
            false => SplitDirection::Vertical,
        }
    }
}

/// Guillotine packing: the free space is kept as a set of disjoint sections.
///
/// Every placement consumes one section and cuts its remainder in (at most) two new ones.
/// With merging enabled, new sections are joined with neighbours sharing a full edge.
/// See Jukka Jylänki, *A Thousand Ways to Pack the Bin* (2010).
#[derive(Clone, Debug)]
pub struct Guillotine {
    surface: BinSurface,
    config: GuillotineConfig,
    sections: Vec<Rect>,
}

impl Guillotine {
    pub fn new(width: f32, height: f32, rot: bool, config: GuillotineConfig) -> Result<Self> {
        let surface = BinSurface::new(width, height, rot)?;
        let mut guillotine = Guillotine {
            surface,
            config,
            sections: vec![],
        };
        guillotine.add_section(guillotine.surface.bbox());
        Ok(guillotine)
    }

    pub fn with_bid(mut self, bid: Option<usize>) -> Self {
        self.surface.set_bid(bid);
        self
    }

    /// The free sections, in insertion order
    pub fn sections(&self) -> &[Rect] {
        &self.sections
    }

    /// Adds a free section, joining it with existing ones (until nothing changes) if merging is enabled.
    fn add_section(&mut self, section: Rect) {
        let mut section = section.with_rid(None);
        if self.config.merge {
            let mut prev_len = usize::MAX;
            while prev_len != self.sections.len() {
                prev_len = self.sections.len();
                self.sections.retain(|s| !section.join(s));
            }
        }
        self.sections.push(section);
    }

    fn split_horizontal(&mut self, section: &Rect, width: f32, height: f32) {
        if height < section.height() {
            self.add_section(Rect::new(
                section.x(),
                section.y() + height,
                section.width(),
                section.height() - height,
            ));
        }
        if width < section.width() {
            self.add_section(Rect::new(
                section.x() + width,
                section.y(),
                section.width() - width,
                height,
            ));
        }
    }

    fn split_vertical(&mut self, section: &Rect, width: f32, height: f32) {
        if height < section.height() {
            self.add_section(Rect::new(
                section.x(),
                section.y() + height,
                width,
                section.height() - height,
            ));
        }
        if width < section.width() {
            self.add_section(Rect::new(
                section.x() + width,
                section.y(),
                section.width() - width,
                section.height(),
            ));
        }
    }

    fn split(&mut self, section: &Rect, width: f32, height: f32) {
        match self.config.split.direction(section, width, height) {
            SplitDirection::Horizontal => self.split_horizontal(section, width, height),
            SplitDirection::Vertical => self.split_vertical(section, width, height),
        }
    }

    fn candidates(
        &self,
        width: f32,
        height: f32,
        rotated: bool,
    ) -> impl Iterator<Item = (Fitness, usize, bool)> + '_ {
        self.sections.iter().enumerate().filter_map(move |(i, s)| {
            self.config
                .fitness
                .score(s, width, height)
                .map(|f| (f, i, rotated))
        })
    }

    /// Returns the fitness, index and rotation of the best section for a rectangle.
    /// All unrotated candidates are considered before rotated ones, the first best one is kept.
    fn select_fittest_section(&self, width: f32, height: f32) -> Option<(Fitness, usize, bool)> {
        let normal = self.candidates(width, height, false);
        let rotated = self
            .surface
            .rotation()
            .then(|| self.candidates(height, width, true))
            .into_iter()
            .flatten();

        normal.chain(rotated).min_by_key(|(f, _, _)| *f)
    }
}

impl PackingAlgorithm for Guillotine {
    fn surface(&self) -> &BinSurface {
        &self.surface
    }

    fn add_rect(&mut self, width: f32, height: f32, rid: Option<usize>) -> Result<Option<Rect>> {
        ensure_positive(width, height)?;

        let Some((_, index, rotated)) = self.select_fittest_section(width, height) else {
            return Ok(None);
        };
        let (width, height) = match rotated {
            true => (height, width),
            false => (width, height),
        };

        let section = self.sections.remove(index);
        self.split(&section, width, height);

        let rect = Rect::new(section.x(), section.y(), width, height).with_rid(rid);
        self.surface.push(rect);

        trace!(
            "[GUILLOTINE] placed {rect} in section {section}, {} free sections",
            self.sections.len()
        );
        debug_assert!(assertions::sections_are_disjoint(&self.sections));
        debug_assert!(assertions::free_space_is_free(
            &self.sections,
            self.surface.rectangles()
        ));

        Ok(Some(rect))
    }

    fn fitness(&self, width: f32, height: f32) -> Result<Option<Fitness>> {
        ensure_positive(width, height)?;
        Ok(self
            .select_fittest_section(width, height)
            .map(|(fitness, _, _)| fitness))
    }

    fn reset(&mut self) {
        self.surface.clear();
        self.sections.clear();
        self.add_section(self.surface.bbox());
    }
}
