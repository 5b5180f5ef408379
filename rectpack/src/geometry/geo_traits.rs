/// Trait for types that can detect collisions between `Self` and `T`.
///
/// Two entities collide only if their interiors overlap.
/// Entities that merely touch along an edge or in a corner do not collide.
pub trait CollidesWith<T> {
    fn collides_with(&self, other: &T) -> bool;
}

/// Trait for types that can detect contact between `Self` and `T`.
///
/// Unlike [`CollidesWith`], sharing an edge or a corner counts as contact.
pub trait Touches<T> {
    fn touches(&self, other: &T) -> bool;
}

/// Trait for shared properties of geometric primitives.
pub trait Shape {
    /// Area of the interior of the shape
    fn area(&self) -> f32;

    /// Sum of the lengths of all sides of the shape
    fn perimeter(&self) -> f32;
}
