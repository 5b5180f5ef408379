use serde::{Deserialize, Serialize};

use crate::algorithms::PackAlgo;
use crate::packer::SortPolicy;

/// When rectangles are committed to bins
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PackingMode {
    /// Every rectangle is placed as soon as it is added
    Online,
    /// Rectangles are buffered, sorted and placed in one go by `pack()`
    #[default]
    Offline,
}

/// Policy deciding which bin receives the next rectangle
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum BinSelection {
    /// Only the most recently opened bin is tried, bins that reject a rectangle are closed for good
    NextFit,
    /// First open bin accepting the rectangle
    FirstFit,
    /// Open bin with the best fitness for the rectangle
    #[default]
    BestFit,
    /// Bins are filled one at a time with the best fitting remaining rectangle (offline only)
    Global,
}

impl BinSelection {
    /// Short tag used in log messages
    pub fn tag(&self) -> &'static str {
        match self {
            BinSelection::NextFit => "BNF",
            BinSelection::FirstFit => "BFF",
            BinSelection::BestFit => "BBF",
            BinSelection::Global => "GLOBAL",
        }
    }
}

/// Configuration of a packer, see [`new_packer`](crate::packer::new_packer)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct PackerConfig {
    pub mode: PackingMode,
    pub bin_selection: BinSelection,
    /// Algorithm filling every individual bin
    pub pack_algo: PackAlgo,
    /// Order in which buffered rectangles are placed, ignored in online mode
    pub sort: SortPolicy,
    /// Allow rectangles to be placed with width and height swapped
    pub rotation: bool,
}

impl Default for PackerConfig {
    fn default() -> Self {
        PackerConfig {
            mode: PackingMode::Offline,
            bin_selection: BinSelection::BestFit,
            pack_algo: PackAlgo::default(),
            sort: SortPolicy::Area,
            rotation: true,
        }
    }
}
