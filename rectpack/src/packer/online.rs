use anyhow::{Result, bail, ensure};

use crate::algorithms::PackAlgo;
use crate::geometry::primitives::Rect;
use crate::packer::{BinCount, BinPool, BinSelection, RectPacker};

/// Places every rectangle as soon as it is added, in submission order.
///
/// Bins have to be registered before the rectangles that should go in them.
/// Bins registered later are still used for subsequent rectangles.
#[derive(Debug)]
pub struct OnlinePacker {
    pool: BinPool,
    selection: BinSelection,
}

impl OnlinePacker {
    pub fn new(selection: BinSelection, algo: PackAlgo, rotation: bool) -> Result<Self> {
        ensure!(
            selection != BinSelection::Global,
            "global bin selection is only available in offline mode"
        );
        Ok(OnlinePacker {
            pool: BinPool::new(algo, rotation),
            selection,
        })
    }

    pub fn selection(&self) -> BinSelection {
        self.selection
    }
}

impl RectPacker for OnlinePacker {
    fn pool(&self) -> &BinPool {
        &self.pool
    }

    fn add_bin(&mut self, width: f32, height: f32, count: BinCount) -> Result<()> {
        self.pool.add_bin(width, height, count)
    }

    /// Places the rectangle right away, `None` if no open or openable bin can hold it
    fn add_rect(&mut self, width: f32, height: f32, rid: Option<usize>) -> Result<Option<Rect>> {
        self.pool.place(self.selection, width, height, rid)
    }

    fn pack(&mut self) -> Result<()> {
        bail!("an online packer places rectangles as they are added, there is nothing to pack")
    }

    fn reset(&mut self) {
        self.pool.reset();
    }
}
