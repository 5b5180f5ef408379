use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::algorithms::{Guillotine, MaxRects, PackingAlgorithm, RectFitness, SectionFitness, SplitRule};

/// Configuration of the [`Guillotine`] algorithm
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct GuillotineConfig {
    /// How free sections are scored for a rectangle
    pub fitness: SectionFitness,
    /// How the leftover of a section is cut after a placement
    pub split: SplitRule,
    /// Join free sections sharing a full edge
    pub merge: bool,
}

impl Default for GuillotineConfig {
    fn default() -> Self {
        GuillotineConfig {
            fitness: SectionFitness::BestShortSideFit,
            split: SplitRule::ShorterAxis,
            merge: true,
        }
    }
}

/// Configuration of the [`MaxRects`] algorithm
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(default)]
pub struct MaxRectsConfig {
    pub fitness: RectFitness,
}

/// Packing algorithm (and its configuration) used to fill every bin
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PackAlgo {
    Guillotine(GuillotineConfig),
    MaxRects(MaxRectsConfig),
}

impl Default for PackAlgo {
    fn default() -> Self {
        PackAlgo::Guillotine(GuillotineConfig::default())
    }
}

impl PackAlgo {
    /// Creates an empty bin filled by this algorithm
    pub fn build(
        &self,
        width: f32,
        height: f32,
        rot: bool,
        bid: Option<usize>,
    ) -> Result<Box<dyn PackingAlgorithm>> {
        let bin: Box<dyn PackingAlgorithm> = match self {
            PackAlgo::Guillotine(config) => {
                Box::new(Guillotine::new(width, height, rot, *config)?.with_bid(bid))
            }
            PackAlgo::MaxRects(config) => {
                Box::new(MaxRects::new(width, height, rot, *config)?.with_bid(bid))
            }
        };
        Ok(bin)
    }
}
