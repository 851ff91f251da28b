use glam::{Quat, Vec3};

use crate::physics::rigid_pose::RigidPose;
use crate::utilities::bounding_box::BoundingBox;

use super::shape::Shape;
use super::shape_batch::ShapeBatch;
use super::shapes::{ShapePools, Shapes};
use super::typed_index::TypedIndex;

/// Shape and pose of a child within a compound shape.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompoundChild {
    /// Local orientation of the child in the compound.
    pub local_orientation: Quat,
    /// Local position of the child in the compound.
    pub local_position: Vec3,
    /// Index of the shape within whatever shape collection holds the compound's child shape data.
    pub shape_index: TypedIndex,
}

impl CompoundChild {
    /// Creates a compound child.
    pub fn new(pose: &RigidPose, shape_index: TypedIndex) -> Self {
        Self {
            local_orientation: pose.orientation,
            local_position: pose.position,
            shape_index,
        }
    }

    /// Gets the child's pose relative to the compound.
    #[inline(always)]
    pub fn local_pose(&self) -> RigidPose {
        RigidPose::new(self.local_position, self.local_orientation)
    }
}

/// Minimalist compound shape containing a list of child shapes.
/// Does not make use of any internal acceleration structure;
/// should be used only with small groups of shapes.
///
/// Children must be non-compound shapes registered in the same [`Shapes`] as the compound.
/// The compound does not own them; they are only torn down through
/// [`Shapes::recursively_remove_and_dispose`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compound {
    /// Children within this compound.
    pub children: Vec<CompoundChild>,
}

impl Compound {
    /// Type id of list based compound shapes.
    pub const ID: usize = 6;

    /// Creates a compound shape with no acceleration structure.
    pub fn new(children: Vec<CompoundChild>) -> Self {
        debug_assert!(
            !children.is_empty(),
            "Compounds must have a nonzero number of children."
        );
        Self { children }
    }

    /// Computes the world pose of a child given its local pose and the compound's transform.
    #[inline(always)]
    pub fn get_world_pose(local_pose: &RigidPose, transform: &RigidPose) -> RigidPose {
        RigidPose::multiply_without_overlap(local_pose, transform)
    }

    /// Validates that a child index points to a live non-compound shape.
    /// Slots that were never claimed or have since been released are rejected.
    pub fn validate_child_index(shape_index: TypedIndex, shapes: &Shapes) -> bool {
        if !shape_index.exists() {
            return false;
        }
        match shapes.try_get(shape_index.type_id()) {
            Ok(batch) => {
                shape_index.index() < batch.capacity()
                    && !batch.compound()
                    && batch.id_pool().is_claimed(shape_index.index())
            }
            Err(_) => false,
        }
    }
}

impl Shape for Compound {
    const TYPE_ID: usize = Self::ID;
    const COMPOUND: bool = true;

    fn compute_bounds(&self, orientation: Quat, shapes: &Shapes) -> BoundingBox {
        if self.children.is_empty() {
            return BoundingBox::default();
        }
        let rotation = RigidPose::new(Vec3::ZERO, orientation);
        let mut bounds = BoundingBox::EMPTY;
        for child in &self.children {
            let pose = Self::get_world_pose(&child.local_pose(), &rotation);
            let child_bounds = shapes.get(child.shape_index.type_id()).compute_bounds(
                child.shape_index.index(),
                pose.orientation,
                shapes,
            );
            bounds = BoundingBox::create_merged_boxes(
                bounds,
                BoundingBox::new(child_bounds.min + pose.position, child_bounds.max + pose.position),
            );
        }
        bounds
    }

    fn dispose(&mut self, pools: &mut ShapePools) {
        let mut children = std::mem::take(&mut self.children);
        children.clear();
        pools.children.release(children);
    }

    fn children(&self) -> &[CompoundChild] {
        &self.children
    }
}

/// Accumulates children for a [`Compound`] in a buffer taken from the registry's pools.
pub struct CompoundBuilder {
    children: Vec<CompoundChild>,
}

impl CompoundBuilder {
    /// Creates a builder backed by a recycled child buffer.
    pub fn new(pools: &mut ShapePools) -> Self {
        let mut children = pools.children.take();
        children.clear();
        Self { children }
    }

    /// Adds a child at the given local pose.
    pub fn add(&mut self, shape_index: TypedIndex, local_pose: RigidPose) -> &mut Self {
        self.children.push(CompoundChild::new(&local_pose, shape_index));
        self
    }

    /// Gets the number of children added so far.
    pub fn count(&self) -> usize {
        self.children.len()
    }

    /// Finishes the compound, handing the buffer over to it.
    pub fn build(self) -> Compound {
        Compound::new(self.children)
    }

    /// Abandons the build and returns the buffer to the pools.
    pub fn discard(mut self, pools: &mut ShapePools) {
        self.children.clear();
        pools.children.release(self.children);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::collidables::sphere::Sphere;

    #[test]
    fn bounds_cover_every_child() {
        let mut shapes = Shapes::new(4);
        let small = shapes.add(Sphere::new(0.5));
        let large = shapes.add(Sphere::new(1.0));
        let mut builder = CompoundBuilder::new(shapes.pools_mut());
        builder
            .add(small, RigidPose::from_position(Vec3::new(-2.0, 0.0, 0.0)))
            .add(large, RigidPose::from_position(Vec3::new(3.0, 0.0, 0.0)));
        let compound = builder.build();
        let bounds = compound.compute_bounds(Quat::IDENTITY, &shapes);
        assert!(bounds.min.abs_diff_eq(Vec3::new(-2.5, -1.0, -1.0), 1e-6));
        assert!(bounds.max.abs_diff_eq(Vec3::new(4.0, 1.0, 1.0), 1e-6));
    }

    #[test]
    fn dispose_returns_child_buffer_to_pool() {
        let mut shapes = Shapes::new(4);
        let sphere = shapes.add(Sphere::new(1.0));
        let mut compound = Compound::new(vec![CompoundChild::new(&RigidPose::IDENTITY, sphere)]);
        let before = shapes.pools().children.available_count();
        compound.dispose(shapes.pools_mut());
        assert!(compound.children.is_empty());
        assert_eq!(shapes.pools().children.available_count(), before + 1);
    }

    #[test]
    fn discarded_builder_returns_buffer() {
        let mut shapes = Shapes::new(4);
        let sphere = shapes.add(Sphere::new(1.0));
        let mut builder = CompoundBuilder::new(shapes.pools_mut());
        builder.add(sphere, RigidPose::IDENTITY);
        assert_eq!(builder.count(), 1);
        builder.discard(shapes.pools_mut());
        let recycled = shapes.pools_mut().children.take();
        assert!(recycled.is_empty());
        assert!(recycled.capacity() >= 1);
    }

    #[test]
    fn children_must_be_live_non_compound_shapes() {
        let mut shapes = Shapes::new(4);
        let sphere = shapes.add(Sphere::new(1.0));
        assert!(Compound::validate_child_index(sphere, &shapes));
        assert!(!Compound::validate_child_index(TypedIndex::default(), &shapes));
        assert!(!Compound::validate_child_index(TypedIndex::new(Sphere::ID, 1000), &shapes));
        assert!(!Compound::validate_child_index(TypedIndex::new(40, 0), &shapes));
        assert!(!Compound::validate_child_index(TypedIndex::new(Sphere::ID, 1), &shapes));
        let compound = shapes.add(Compound::new(vec![CompoundChild::new(
            &RigidPose::IDENTITY,
            sphere,
        )]));
        assert!(!Compound::validate_child_index(compound, &shapes));
    }
}
