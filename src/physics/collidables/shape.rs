use glam::Quat;

use crate::utilities::bounding_box::BoundingBox;

use super::compound::CompoundChild;
use super::shapes::{ShapePools, Shapes};

/// Defines a type usable as a shape by collidables.
///
/// Each shape type is stored in its own batch inside [`Shapes`], registered under
/// [`Shape::TYPE_ID`]. The default methods describe a simple shape with no children and no
/// resources beyond its own slot.
pub trait Shape: Default + 'static {
    /// Unique type id for this shape type. Must be below 128.
    const TYPE_ID: usize;

    /// Whether instances reference child shapes that live in other batches.
    const COMPOUND: bool = false;

    /// Computes the bounding box of the shape under an orientation, relative to its origin.
    /// `shapes` resolves child shapes for compound types.
    fn compute_bounds(&self, orientation: Quat, shapes: &Shapes) -> BoundingBox;

    /// Returns any resources owned by the shape instance to the given pools.
    fn dispose(&mut self, _pools: &mut ShapePools) {}

    /// Child shapes referenced by this instance. Empty unless [`Shape::COMPOUND`] is set.
    fn children(&self) -> &[CompoundChild] {
        &[]
    }
}
