use std::time::Instant;

use anyhow::{Result, ensure};
use log::{debug, info, warn};

use crate::algorithms::{Fitness, PackAlgo, ensure_positive};
use crate::geometry::primitives::Rect;
use crate::packer::{BinCount, BinPool, BinSelection, PendingRect, RectPacker, SortPolicy};

/// Buffers bins and rectangles, then places all of them at once with [`pack`](RectPacker::pack).
///
/// Every call to `pack` starts over from the buffered input, so it can be called repeatedly.
#[derive(Debug)]
pub struct OfflinePacker {
    pool: BinPool,
    selection: BinSelection,
    sort: SortPolicy,
    bin_specs: Vec<(f32, f32, BinCount)>,
    rects: Vec<PendingRect>,
}

impl OfflinePacker {
    /// With [`BinSelection::Global`] the sort policy is ignored: rectangles are picked by fitness instead.
    pub fn new(selection: BinSelection, algo: PackAlgo, sort: SortPolicy, rotation: bool) -> Self {
        let sort = match selection {
            BinSelection::Global => SortPolicy::Unsorted,
            _ => sort,
        };
        OfflinePacker {
            pool: BinPool::new(algo, rotation),
            selection,
            sort,
            bin_specs: vec![],
            rects: vec![],
        }
    }

    pub fn selection(&self) -> BinSelection {
        self.selection
    }

    pub fn sort(&self) -> SortPolicy {
        self.sort
    }

    /// Rectangles waiting to be packed, in submission order
    pub fn pending_rects(&self) -> &[PendingRect] {
        &self.rects
    }

    /// Fills one bin at a time: open a bin that can hold at least one remaining rectangle,
    /// then keep adding the remaining rectangle with the best fitness until none fits.
    fn pack_global(&mut self) -> Result<()> {
        let mut remaining = self.rects.clone();
        while !remaining.is_empty() && self.pool.open_bin_for_any(&remaining)? {
            let Some(bin) = self.pool.last_open_mut() else {
                break;
            };
            loop {
                let mut best: Option<(Fitness, usize)> = None;
                for (i, &(w, h, _)) in remaining.iter().enumerate() {
                    if let Some(fitness) = bin.fitness(w, h)? {
                        if best.is_none_or(|(best_fitness, _)| fitness < best_fitness) {
                            best = Some((fitness, i));
                        }
                    }
                }
                let Some((_, i)) = best else {
                    break;
                };
                let (w, h, rid) = remaining.remove(i);
                let placed = bin.add_rect(w, h, rid)?;
                ensure!(
                    placed.is_some(),
                    "[GLOBAL] {w}x{h} has a fitness in bin {:?} but could not be placed",
                    bin.bid()
                );
            }
            let last = self.pool.open_bins().len() - 1;
            self.pool.close_bin(last);
        }
        if !remaining.is_empty() {
            debug!("[GLOBAL] {} rectangles left unplaced", remaining.len());
        }
        Ok(())
    }
}

impl RectPacker for OfflinePacker {
    fn pool(&self) -> &BinPool {
        &self.pool
    }

    /// Buffers the bin specification until the next [`pack`](RectPacker::pack)
    fn add_bin(&mut self, width: f32, height: f32, count: BinCount) -> Result<()> {
        ensure_positive(width, height)?;
        self.bin_specs.push((width, height, count));
        Ok(())
    }

    /// Buffers the rectangle, always returns `None`: placements are known after [`pack`](RectPacker::pack)
    fn add_rect(&mut self, width: f32, height: f32, rid: Option<usize>) -> Result<Option<Rect>> {
        ensure_positive(width, height)?;
        self.rects.push((width, height, rid));
        Ok(None)
    }

    fn pack(&mut self) -> Result<()> {
        self.pool.reset();
        if self.bin_specs.is_empty() || self.rects.is_empty() {
            warn!(
                "[PACK] nothing to pack ({} bins, {} rectangles buffered)",
                self.bin_specs.len(),
                self.rects.len()
            );
            return Ok(());
        }
        let start = Instant::now();

        for &(width, height, count) in &self.bin_specs {
            self.pool.add_bin(width, height, count)?;
        }

        match self.selection {
            BinSelection::Global => self.pack_global()?,
            selection => {
                for (w, h, rid) in self.sort.apply(&self.rects) {
                    self.pool.place(selection, w, h, rid)?;
                }
            }
        }

        let n_placed: usize = self.bins().map(|bin| bin.len()).sum();
        info!(
            "[PACK] placed {}/{} rectangles in {} bins ({}, sort: {:?}) in {}ms, density: {:.3}%",
            n_placed,
            self.rects.len(),
            self.len(),
            self.selection.tag(),
            self.sort,
            start.elapsed().as_millis(),
            self.density() * 100.0
        );
        Ok(())
    }

    /// Drops all bins, the buffered input is kept
    fn reset(&mut self) {
        self.pool.reset();
    }
}
