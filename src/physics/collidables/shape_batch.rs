use glam::Quat;
use tracing::trace;

use crate::utilities::bounding_box::BoundingBox;
use crate::utilities::memory::IdPool;

use super::shape::Shape;
use super::shapes::{ShapePools, Shapes};

/// Storage for every shape of one type. Each shape type gets its own batch.
///
/// A batch hands out slot indices through its own [`IdPool`]; the slot index together with
/// the batch's type id forms the shape's [`TypedIndex`](super::typed_index::TypedIndex).
pub trait ShapeBatch {
    /// Gets the number of shapes this batch can currently hold without resizing.
    fn capacity(&self) -> usize;

    /// Gets the type id of the shape type in this batch.
    fn type_id(&self) -> usize;

    /// Gets whether this batch's shape type potentially contains children requiring other batches.
    fn compound(&self) -> bool;

    /// Gets the size of one shape instance in bytes.
    fn shape_data_size(&self) -> usize;

    /// Gets the allocator tracking which slots are claimed.
    fn id_pool(&self) -> &IdPool;

    /// Frees the slot for reuse. The slot's contents are left as they are.
    fn remove(&mut self, index: usize);

    /// Returns any resources held by the shape in the slot to the pools.
    fn dispose_contents(&mut self, index: usize, pools: &mut ShapePools);

    /// Removes a shape and disposes its internal resources. The slot only becomes available
    /// for reuse once disposal has finished.
    fn remove_and_dispose(&mut self, index: usize, pools: &mut ShapePools) {
        self.dispose_contents(index, pools);
        self.remove(index);
    }

    /// Recursively removes and disposes every child of the shape in the slot.
    /// Does nothing for non-compound shape types.
    fn remove_and_dispose_children(&mut self, index: usize, shapes: &mut Shapes);

    /// Removes and disposes the shape's children, then the shape itself.
    ///
    /// Called by [`Shapes::recursively_remove_and_dispose`], which detaches this batch from the
    /// registry for the duration of the call.
    fn recursively_remove_and_dispose(&mut self, index: usize, shapes: &mut Shapes) {
        self.remove_and_dispose_children(index, shapes);
        self.remove_and_dispose(index, shapes.pools_mut());
    }

    /// Computes the bounds of the shape in the slot under an orientation.
    fn compute_bounds(&self, index: usize, orientation: Quat, shapes: &Shapes) -> BoundingBox;

    /// Frees all shape slots without releasing storage.
    fn clear(&mut self);

    /// Ensures the batch can hold at least `shape_capacity` shapes.
    fn ensure_capacity(&mut self, shape_capacity: usize);

    /// Resizes the batch toward `shape_capacity`, never dropping below the highest claimed slot.
    fn resize(&mut self, shape_capacity: usize);

    /// Gets the batch as `Any` for access to its concrete type.
    fn as_any(&self) -> &dyn std::any::Any;

    /// Gets the batch as mutable `Any` for access to its concrete type.
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

/// Contiguous storage for shapes of type `T`.
pub struct TypedShapeBatch<T: Shape> {
    shapes: Vec<T>,
    id_pool: IdPool,
}

impl<T: Shape> TypedShapeBatch<T> {
    /// Creates a batch with room for `initial_capacity` shapes.
    pub fn new(initial_capacity: usize) -> Self {
        let mut shapes = Vec::with_capacity(initial_capacity);
        shapes.resize_with(initial_capacity, T::default);
        Self {
            shapes,
            id_pool: IdPool::new(initial_capacity),
        }
    }

    /// Adds a shape and returns the slot index assigned to it.
    pub fn add(&mut self, shape: T) -> usize {
        let index = self.id_pool.take();
        if index >= self.shapes.len() {
            let new_capacity = (self.shapes.len() * 2).max(index + 1);
            trace!(
                type_id = T::TYPE_ID,
                old_capacity = self.shapes.len(),
                new_capacity,
                "growing shape batch"
            );
            self.shapes.resize_with(new_capacity, T::default);
        }
        self.shapes[index] = shape;
        index
    }

    /// Gets a reference to the shape at the given index.
    #[inline(always)]
    pub fn get(&self, index: usize) -> &T {
        &self.shapes[index]
    }

    /// Gets a mutable reference to the shape at the given index.
    #[inline(always)]
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        &mut self.shapes[index]
    }

    fn internal_resize(&mut self, target: usize) {
        self.shapes.resize_with(target, T::default);
        self.shapes.shrink_to_fit();
    }
}

impl<T: Shape> ShapeBatch for TypedShapeBatch<T> {
    fn capacity(&self) -> usize {
        self.shapes.len()
    }

    fn type_id(&self) -> usize {
        T::TYPE_ID
    }

    fn compound(&self) -> bool {
        T::COMPOUND
    }

    fn shape_data_size(&self) -> usize {
        std::mem::size_of::<T>()
    }

    fn id_pool(&self) -> &IdPool {
        &self.id_pool
    }

    fn remove(&mut self, index: usize) {
        debug_assert!(index < self.shapes.len(), "Slot {index} is outside the batch.");
        self.id_pool.release(index);
    }

    fn dispose_contents(&mut self, index: usize, pools: &mut ShapePools) {
        self.shapes[index].dispose(pools);
    }

    fn remove_and_dispose_children(&mut self, index: usize, shapes: &mut Shapes) {
        if !T::COMPOUND {
            return;
        }
        for child in self.shapes[index].children() {
            shapes.recursively_remove_and_dispose(child.shape_index);
        }
    }

    fn compute_bounds(&self, index: usize, orientation: Quat, shapes: &Shapes) -> BoundingBox {
        self.shapes[index].compute_bounds(orientation, shapes)
    }

    fn clear(&mut self) {
        self.id_pool.clear();
    }

    fn ensure_capacity(&mut self, shape_capacity: usize) {
        if self.shapes.len() < shape_capacity {
            self.internal_resize(shape_capacity);
        }
    }

    fn resize(&mut self, shape_capacity: usize) {
        let claimed = self
            .id_pool
            .highest_possibly_claimed_id()
            .map_or(0, |highest| highest + 1);
        let target = shape_capacity.max(claimed);
        if target != self.shapes.len() {
            self.internal_resize(target);
        }
        self.id_pool.resize(shape_capacity);
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::collidables::sphere::Sphere;

    #[test]
    fn add_reuses_removed_slots() {
        let mut batch = TypedShapeBatch::<Sphere>::new(4);
        let a = batch.add(Sphere::new(1.0));
        let b = batch.add(Sphere::new(2.0));
        assert_eq!((a, b), (0, 1));
        batch.remove(a);
        let c = batch.add(Sphere::new(3.0));
        assert_eq!(c, a);
        assert_eq!(batch.get(c).radius, 3.0);
        assert_eq!(batch.get(b).radius, 2.0);
    }

    #[test]
    fn storage_grows_past_initial_capacity() {
        let mut batch = TypedShapeBatch::<Sphere>::new(2);
        for i in 0..5 {
            assert_eq!(batch.add(Sphere::new(i as f32)), i);
        }
        assert!(batch.capacity() >= 5);
        assert_eq!(batch.get(4).radius, 4.0);
    }

    #[test]
    fn zero_capacity_batch_grows_on_add() {
        let mut batch = TypedShapeBatch::<Sphere>::new(0);
        assert_eq!(batch.capacity(), 0);
        assert_eq!(batch.add(Sphere::new(1.0)), 0);
        assert_eq!(batch.capacity(), 1);
    }

    #[test]
    fn describes_its_shape_type() {
        let batch = TypedShapeBatch::<Sphere>::new(8);
        assert_eq!(batch.type_id(), Sphere::TYPE_ID);
        assert!(!batch.compound());
        assert_eq!(batch.shape_data_size(), std::mem::size_of::<Sphere>());
        assert_eq!(batch.capacity(), 8);
    }

    #[test]
    fn resize_keeps_claimed_slots() {
        let mut batch = TypedShapeBatch::<Sphere>::new(16);
        for _ in 0..6 {
            batch.add(Sphere::new(0.5));
        }
        batch.resize(2);
        assert_eq!(batch.capacity(), 6);
        batch.resize(32);
        assert_eq!(batch.capacity(), 32);
        batch.ensure_capacity(8);
        assert_eq!(batch.capacity(), 32);
    }

    #[test]
    fn clear_frees_every_slot() {
        let mut batch = TypedShapeBatch::<Sphere>::new(4);
        batch.add(Sphere::new(1.0));
        batch.add(Sphere::new(1.0));
        batch.clear();
        assert_eq!(batch.id_pool().highest_possibly_claimed_id(), None);
        assert_eq!(batch.add(Sphere::new(5.0)), 0);
    }
}
