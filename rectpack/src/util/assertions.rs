use itertools::Itertools;
use log::error;

use crate::geometry::geo_traits::CollidesWith;
use crate::geometry::primitives::Rect;
//Various checks to verify correctness of the free space of a bin
//Used in debug_assert!() blocks

/// Guillotine sections never overlap each other
pub fn sections_are_disjoint(sections: &[Rect]) -> bool {
    match sections
        .iter()
        .tuple_combinations()
        .find(|(s1, s2)| s1.collides_with(*s2))
    {
        Some((s1, s2)) => {
            error!("overlapping free sections: {s1} and {s2}");
            false
        }
        None => true,
    }
}

/// No free rectangle overlaps a placed one
pub fn free_space_is_free(free: &[Rect], placed: &[Rect]) -> bool {
    match free
        .iter()
        .cartesian_product(placed.iter())
        .find(|(f, p)| f.collides_with(*p))
    {
        Some((f, p)) => {
            error!("free rectangle {f} overlaps placed rectangle {p}");
            false
        }
        None => true,
    }
}

/// No maximal rectangle is contained in another one
pub fn max_rects_are_maximal(max_rects: &[Rect]) -> bool {
    match max_rects
        .iter()
        .tuple_combinations()
        .find(|(m1, m2)| m1.contains(m2) || m2.contains(m1))
    {
        Some((m1, m2)) => {
            error!("maximal rectangles {m1} and {m2} are nested");
            false
        }
        None => true,
    }
}
