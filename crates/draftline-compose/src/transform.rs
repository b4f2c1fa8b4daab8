/// Trait for types that can be (geometrically) transformed.
///
/// The drag session manager moves shapes exclusively through this trait.
pub trait Transformable {
    /// Translate (as in moves) by the given offset.
    fn translate(&mut self, offset: na::Vector2<f64>);
}
