/// Relation of rectangle A to rectangle B, as returned by `A.relation_to(B)`.
/// Bounds are closed: a rectangle equal to B surrounds it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeoRelation {
    /// Interiors overlap, neither contains the other
    Intersecting,
    /// A lies within B
    Enclosed,
    /// B lies within A
    Surrounding,
    /// Interiors are disjoint but the boundaries share an edge or a corner
    Touching,
    /// No point in common
    Disjoint,
}
