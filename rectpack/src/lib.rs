//! Packing of axis-aligned rectangles into one or more fixed-size bins.
//!
//! Two families of free-space heuristics are available, [`Guillotine`](algorithms::Guillotine)
//! and [`MaxRects`](algorithms::MaxRects), each parametrised by small strategy enums.
//! The [`packer`] module decides which bin receives each rectangle, either immediately ([`PackingMode::Online`](packer::PackingMode))
//! or after buffering and sorting all of them ([`PackingMode::Offline`](packer::PackingMode)).

/// Geometric primitives and the relations between them
pub mod geometry;

/// Single-bin packing heuristics and the contract they share
pub mod algorithms;

/// Bin selection, sorting and the packer front-ends
pub mod packer;

/// Helper functions and internal consistency checks
pub mod util;
