use anyhow::{Result, bail};
use log::debug;

use crate::algorithms::{Fitness, PackAlgo, PackingAlgorithm, ensure_positive};
use crate::geometry::primitives::Rect;
use crate::packer::{BinCount, BinFactory, BinSelection, PendingRect};

/// Bins of a packer: closed ones, open ones and the factories that can still produce new ones.
///
/// Closed bins are never considered again. Bins are iterated closed first (in closing order),
/// then open (in opening order).
#[derive(Debug)]
pub struct BinPool {
    algo: PackAlgo,
    rotation: bool,
    factories: Vec<BinFactory>,
    open: Vec<Box<dyn PackingAlgorithm>>,
    closed: Vec<Box<dyn PackingAlgorithm>>,
    n_registered: usize,
}

impl BinPool {
    pub fn new(algo: PackAlgo, rotation: bool) -> Self {
        BinPool {
            algo,
            rotation,
            factories: vec![],
            open: vec![],
            closed: vec![],
            n_registered: 0,
        }
    }

    pub fn algo(&self) -> PackAlgo {
        self.algo
    }

    pub fn rotation(&self) -> bool {
        self.rotation
    }

    /// Registers `count` bins of `width` x `height`, their bid is the registration index
    pub fn add_bin(&mut self, width: f32, height: f32, count: BinCount) -> Result<()> {
        let bid = Some(self.n_registered);
        let factory = BinFactory::new(width, height, count, self.algo, self.rotation, bid)?;
        self.n_registered += 1;
        match factory.is_empty() {
            true => debug!("[BINS] ignoring {factory}, no bins to produce"),
            false => self.factories.push(factory),
        }
        Ok(())
    }

    pub fn bins(&self) -> impl Iterator<Item = &dyn PackingAlgorithm> {
        self.closed
            .iter()
            .chain(self.open.iter())
            .map(|bin| -> &dyn PackingAlgorithm { bin.as_ref() })
    }

    pub fn open_bins(&self) -> &[Box<dyn PackingAlgorithm>] {
        &self.open
    }

    pub fn closed_bins(&self) -> &[Box<dyn PackingAlgorithm>] {
        &self.closed
    }

    pub fn factories(&self) -> &[BinFactory] {
        &self.factories
    }

    pub fn len(&self) -> usize {
        self.closed.len() + self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops all bins and factories
    pub fn reset(&mut self) {
        self.factories.clear();
        self.open.clear();
        self.closed.clear();
        self.n_registered = 0;
    }

    /// Opens a bin from the first factory whose bins can hold a `width` x `height` rectangle.
    /// Factories that are too small are skipped but kept. Returns `false` if no bin could be opened.
    fn open_bin_for(&mut self, width: f32, height: f32) -> Result<bool> {
        for i in 0..self.factories.len() {
            let factory = &mut self.factories[i];
            if !factory.fits_inside(width, height)? {
                continue;
            }
            let Some(bin) = factory.new_bin()? else {
                continue;
            };
            debug!("[BINS] opened bin {:?} ({}x{})", bin.bid(), bin.width(), bin.height());
            let exhausted = factory.is_empty();
            self.open.push(bin);
            if exhausted {
                self.factories.remove(i);
            }
            return Ok(true);
        }
        Ok(false)
    }

    /// Opens a bin from the first factory whose bins can hold at least one of `rects`.
    /// Factories unable to hold any of them are discarded.
    pub(super) fn open_bin_for_any(&mut self, rects: &[PendingRect]) -> Result<bool> {
        let mut i = 0;
        while i < self.factories.len() {
            let factory = &mut self.factories[i];
            let mut any_fits = false;
            for &(w, h, _) in rects {
                if factory.fits_inside(w, h)? {
                    any_fits = true;
                    break;
                }
            }
            if !any_fits {
                debug!("[BINS] discarding {factory}, no remaining rectangle fits");
                self.factories.remove(i);
                continue;
            }
            let Some(bin) = factory.new_bin()? else {
                i += 1;
                continue;
            };
            debug!("[BINS] opened bin {:?} ({}x{})", bin.bid(), bin.width(), bin.height());
            let exhausted = factory.is_empty();
            self.open.push(bin);
            if exhausted {
                self.factories.remove(i);
            }
            return Ok(true);
        }
        Ok(false)
    }

    /// Moves the open bin at `index` to the closed bins
    pub(super) fn close_bin(&mut self, index: usize) {
        let bin = self.open.remove(index);
        debug!("[BINS] closed bin {:?} holding {} rectangles", bin.bid(), bin.len());
        self.closed.push(bin);
    }

    pub(super) fn last_open_mut(&mut self) -> Option<&mut Box<dyn PackingAlgorithm>> {
        self.open.last_mut()
    }

    /// Places a rectangle according to `selection`, opening new bins as needed
    pub fn place(
        &mut self,
        selection: BinSelection,
        width: f32,
        height: f32,
        rid: Option<usize>,
    ) -> Result<Option<Rect>> {
        ensure_positive(width, height)?;
        let placement = match selection {
            BinSelection::NextFit => self.place_next_fit(width, height, rid)?,
            BinSelection::FirstFit => self.place_first_fit(width, height, rid)?,
            BinSelection::BestFit => self.place_best_fit(width, height, rid)?,
            BinSelection::Global => {
                bail!("global bin selection places all rectangles at once, not one by one")
            }
        };
        if placement.is_none() {
            debug!("[{}] no bin can hold {width}x{height} (rid: {rid:?})", selection.tag());
        }
        Ok(placement)
    }

    fn place_next_fit(&mut self, width: f32, height: f32, rid: Option<usize>) -> Result<Option<Rect>> {
        loop {
            if self.open.is_empty() && !self.open_bin_for(width, height)? {
                return Ok(None);
            }
            if let Some(rect) = self.open[0].add_rect(width, height, rid)? {
                return Ok(Some(rect));
            }
            self.close_bin(0);
        }
    }

    fn place_first_fit(&mut self, width: f32, height: f32, rid: Option<usize>) -> Result<Option<Rect>> {
        for bin in self.open.iter_mut() {
            if let Some(rect) = bin.add_rect(width, height, rid)? {
                return Ok(Some(rect));
            }
        }
        self.place_in_new_bin(width, height, rid)
    }

    fn place_best_fit(&mut self, width: f32, height: f32, rid: Option<usize>) -> Result<Option<Rect>> {
        let mut best: Option<(Fitness, usize)> = None;
        for (i, bin) in self.open.iter().enumerate() {
            if let Some(fitness) = bin.fitness(width, height)? {
                if best.is_none_or(|(best_fitness, _)| fitness < best_fitness) {
                    best = Some((fitness, i));
                }
            }
        }
        if let Some((fitness, i)) = best {
            debug!("[BBF] best open bin {:?} with fitness {fitness}", self.open[i].bid());
            return self.open[i].add_rect(width, height, rid);
        }
        self.place_in_new_bin(width, height, rid)
    }

    /// Keeps opening bins until one accepts the rectangle
    fn place_in_new_bin(&mut self, width: f32, height: f32, rid: Option<usize>) -> Result<Option<Rect>> {
        while self.open_bin_for(width, height)? {
            if let Some(bin) = self.open.last_mut() {
                if let Some(rect) = bin.add_rect(width, height, rid)? {
                    return Ok(Some(rect));
                }
            }
        }
        Ok(None)
    }
}
