use std::cell::OnceCell;
use std::fmt::{Display, Formatter};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::algorithms::{Fitness, PackAlgo, PackingAlgorithm, ensure_positive};

/// Number of identical bins a [`BinFactory`] can still produce
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinCount {
    Finite(usize),
    Infinite,
}

impl BinCount {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, BinCount::Finite(0))
    }

    fn decrement(&mut self) {
        if let BinCount::Finite(n) = self {
            *n = n.saturating_sub(1);
        }
    }
}

impl From<usize> for BinCount {
    fn from(n: usize) -> Self {
        BinCount::Finite(n)
    }
}

impl Display for BinCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BinCount::Finite(n) => write!(f, "{n}"),
            BinCount::Infinite => write!(f, "inf"),
        }
    }
}

/// Produces up to `count` identical empty bins of a given size and algorithm.
///
/// Bins can be probed through a reference bin that is never placed into, so a packer can
/// check whether a rectangle would fit before committing to open a new bin.
#[derive(Debug)]
pub struct BinFactory {
    width: f32,
    height: f32,
    count: BinCount,
    algo: PackAlgo,
    rotation: bool,
    bid: Option<usize>,
    reference: OnceCell<Box<dyn PackingAlgorithm>>,
}

impl BinFactory {
    pub fn new(
        width: f32,
        height: f32,
        count: BinCount,
        algo: PackAlgo,
        rotation: bool,
        bid: Option<usize>,
    ) -> Result<Self> {
        ensure_positive(width, height).context("invalid bin dimensions")?;
        Ok(BinFactory {
            width,
            height,
            count,
            algo,
            rotation,
            bid,
            reference: OnceCell::new(),
        })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn count(&self) -> BinCount {
        self.count
    }

    pub fn bid(&self) -> Option<usize> {
        self.bid
    }

    /// Empty bin used for probing, built on first use
    fn reference(&self) -> Result<&dyn PackingAlgorithm> {
        if let Some(bin) = self.reference.get() {
            return Ok(bin.as_ref());
        }
        let bin = self.algo.build(self.width, self.height, self.rotation, self.bid)?;
        Ok(self.reference.get_or_init(|| bin).as_ref())
    }

    /// Fitness of a rectangle in an empty bin of this factory
    pub fn fitness(&self, width: f32, height: f32) -> Result<Option<Fitness>> {
        self.reference()?.fitness(width, height)
    }

    /// True if a rectangle fits in an empty bin of this factory
    pub fn fits_inside(&self, width: f32, height: f32) -> Result<bool> {
        self.reference()?.fits_surface(width, height)
    }

    /// Creates a new empty bin, or `None` if the factory is exhausted
    pub fn new_bin(&mut self) -> Result<Option<Box<dyn PackingAlgorithm>>> {
        if self.is_empty() {
            return Ok(None);
        }
        self.count.decrement();
        let bin = self.algo.build(self.width, self.height, self.rotation, self.bid)?;
        Ok(Some(bin))
    }

    pub fn is_empty(&self) -> bool {
        self.count.is_exhausted()
    }
}

impl Display for BinFactory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BinFactory({}x{}, count: {}, bid: {:?})",
            self.width, self.height, self.count, self.bid
        )
    }
}
