mod bin_factory;
mod config;
mod offline;
mod online;
mod pool;
mod sort;

#[doc(inline)]
pub use bin_factory::{BinCount, BinFactory};
#[doc(inline)]
pub use config::{BinSelection, PackerConfig, PackingMode};
#[doc(inline)]
pub use offline::OfflinePacker;
#[doc(inline)]
pub use online::OnlinePacker;
#[doc(inline)]
pub use pool::BinPool;
#[doc(inline)]
pub use sort::SortPolicy;

use anyhow::{Context, Result, bail};
use log::debug;

use crate::algorithms::PackingAlgorithm;
use crate::geometry::primitives::Rect;

/// Rectangle waiting to be placed: `(width, height, rid)`
pub type PendingRect = (f32, f32, Option<usize>);

/// Placement as returned by [`RectPacker::rect_list`]: `(bin index, x, y, width, height, rid)`
pub type PackedRectTuple = (usize, f32, f32, f32, f32, Option<usize>);

/// Common interface of the online and offline packers.
///
/// Bin indices used in the results refer to the iteration order of [`bins`](RectPacker::bins):
/// closed bins first, in the order they were closed, then open bins, in the order they were opened.
pub trait RectPacker {
    fn pool(&self) -> &BinPool;

    /// Registers `count` bins of `width` x `height`
    fn add_bin(&mut self, width: f32, height: f32, count: BinCount) -> Result<()>;

    /// Submits a rectangle. Fails if a dimension is not strictly positive.
    fn add_rect(&mut self, width: f32, height: f32, rid: Option<usize>) -> Result<Option<Rect>>;

    /// Places all buffered rectangles (offline packers only)
    fn pack(&mut self) -> Result<()>;

    fn reset(&mut self);

    fn bins(&self) -> impl Iterator<Item = &dyn PackingAlgorithm> {
        self.pool().bins()
    }

    /// Number of used bins
    fn len(&self) -> usize {
        self.pool().len()
    }

    fn is_empty(&self) -> bool {
        self.pool().is_empty()
    }

    fn rotation(&self) -> bool {
        self.pool().rotation()
    }

    /// All placements, grouped by bin, in placement order within a bin
    fn rect_list(&self) -> Vec<PackedRectTuple> {
        self.bins()
            .enumerate()
            .flat_map(|(i, bin)| {
                bin.rect_list()
                    .into_iter()
                    .map(move |(x, y, w, h, rid)| (i, x, y, w, h, rid))
            })
            .collect()
    }

    /// `(width, height)` of every used bin
    fn bin_list(&self) -> Vec<(f32, f32)> {
        self.bins().map(|bin| (bin.width(), bin.height())).collect()
    }

    /// Fails if any bin contains overlapping or out of bounds rectangles
    fn validate_packing(&self) -> Result<()> {
        for (i, bin) in self.bins().enumerate() {
            bin.validate_packing()
                .with_context(|| format!("invalid packing in bin {i}"))?;
        }
        Ok(())
    }

    /// Area covered by rectangles divided by the total area of the used bins
    fn density(&self) -> f32 {
        let (used, total) = self.bins().fold((0.0, 0.0), |(used, total), bin| {
            (used + bin.used_area(), total + bin.surface().area())
        });
        match total > 0.0 {
            true => used / total,
            false => 0.0,
        }
    }
}

/// Packer built from a [`PackerConfig`]
#[derive(Debug)]
pub enum Packer {
    Online(OnlinePacker),
    Offline(OfflinePacker),
}

impl RectPacker for Packer {
    fn pool(&self) -> &BinPool {
        match self {
            Packer::Online(p) => p.pool(),
            Packer::Offline(p) => p.pool(),
        }
    }

    fn add_bin(&mut self, width: f32, height: f32, count: BinCount) -> Result<()> {
        match self {
            Packer::Online(p) => p.add_bin(width, height, count),
            Packer::Offline(p) => p.add_bin(width, height, count),
        }
    }

    fn add_rect(&mut self, width: f32, height: f32, rid: Option<usize>) -> Result<Option<Rect>> {
        match self {
            Packer::Online(p) => p.add_rect(width, height, rid),
            Packer::Offline(p) => p.add_rect(width, height, rid),
        }
    }

    fn pack(&mut self) -> Result<()> {
        match self {
            Packer::Online(p) => p.pack(),
            Packer::Offline(p) => p.pack(),
        }
    }

    fn reset(&mut self) {
        match self {
            Packer::Online(p) => p.reset(),
            Packer::Offline(p) => p.reset(),
        }
    }
}

/// Builds the packer described by `config`.
///
/// Online packers never sort. Global bin selection is only valid offline and disables sorting.
pub fn new_packer(config: PackerConfig) -> Result<Packer> {
    let PackerConfig {
        mode,
        bin_selection,
        pack_algo,
        sort,
        rotation,
    } = config;

    let packer = match (mode, bin_selection) {
        (PackingMode::Online, BinSelection::Global) => {
            bail!("unsupported packer configuration: global bin selection in online mode")
        }
        (PackingMode::Online, selection) => {
            Packer::Online(OnlinePacker::new(selection, pack_algo, rotation)?)
        }
        (PackingMode::Offline, selection) => {
            Packer::Offline(OfflinePacker::new(selection, pack_algo, sort, rotation))
        }
    };
    debug!("[PACKER] created {mode:?} {} packer with {pack_algo:?}", bin_selection.tag());
    Ok(packer)
}
