use std::fmt::{Display, Formatter};

use ordered_float::NotNan;

/// Score of a candidate placement, lower is better.
///
/// Compared lexicographically: `secondary` only breaks ties on `primary`.
/// Most rules leave `secondary` at zero.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug)]
pub struct Fitness {
    pub primary: NotNan<f32>,
    pub secondary: NotNan<f32>,
}

impl Fitness {
    pub fn new(primary: f32) -> Self {
        Fitness::with_tiebreak(primary, 0.0)
    }

    pub fn with_tiebreak(primary: f32, secondary: f32) -> Self {
        Fitness {
            primary: NotNan::new(primary).expect("fitness is NaN"),
            secondary: NotNan::new(secondary).expect("fitness tiebreak is NaN"),
        }
    }
}

impl Display for Fitness {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.primary, self.secondary)
    }
}
