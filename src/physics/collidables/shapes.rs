use tracing::{debug, trace};

use crate::config::ShapesConfig;
use crate::error::ShapeError;
use crate::physics::rigid_pose::RigidPose;
use crate::utilities::bounding_box::BoundingBox;
use crate::utilities::memory::ManagedPool;

use super::compound::{Compound, CompoundChild};
use super::shape::Shape;
use super::shape_batch::{ShapeBatch, TypedShapeBatch};
use super::triangle::Triangle;
use super::typed_index::{TypedIndex, MAX_TYPE_ID};

/// Recycled buffers for shape resources that live outside batch slots.
///
/// Owned by [`Shapes`] and handed to disposal hooks, so buffers released by one shape are
/// picked up by the next shape built from the same registry.
#[derive(Debug)]
pub struct ShapePools {
    /// Child lists for compound shapes.
    pub children: ManagedPool<Vec<CompoundChild>>,
    /// Triangle buffers for meshes.
    pub triangles: ManagedPool<Vec<Triangle>>,
}

impl ShapePools {
    /// Creates pools able to hold the given numbers of returned buffers before growing.
    pub fn new(child_buffer_capacity: usize, triangle_buffer_capacity: usize) -> Self {
        Self {
            children: ManagedPool::new(child_buffer_capacity),
            triangles: ManagedPool::new(triangle_buffer_capacity),
        }
    }
}

/// The central shape storage. Manages batches of shapes indexed by type id.
pub struct Shapes {
    // Not every index is guaranteed to be filled. If only a mesh (type id 8) has been added,
    // batches.len() and registered_type_span are both 9 but indices 0 through 7 are None.
    batches: Vec<Option<Box<dyn ShapeBatch>>>,
    registered_type_span: usize,
    initial_capacity_per_type_batch: usize,
    pools: ShapePools,
}

impl Shapes {
    /// Creates a new Shapes collection.
    pub fn new(initial_capacity_per_type_batch: usize) -> Self {
        Self::with_config(&ShapesConfig {
            initial_capacity_per_type_batch,
            ..ShapesConfig::default()
        })
    }

    /// Creates a new Shapes collection sized by `config`.
    pub fn with_config(config: &ShapesConfig) -> Self {
        Self {
            batches: Vec::with_capacity(config.initial_type_capacity),
            registered_type_span: 0,
            initial_capacity_per_type_batch: config.initial_capacity_per_type_batch,
            pools: ShapePools::new(
                config.child_buffer_pool_capacity,
                config.triangle_buffer_pool_capacity,
            ),
        }
    }

    /// Gets one past the highest type id ever registered.
    /// Not a count of registered types; the table may contain gaps.
    pub fn registered_type_span(&self) -> usize {
        self.registered_type_span
    }

    /// Gets the capacity given to newly created batches.
    pub fn initial_capacity_per_type_batch(&self) -> usize {
        self.initial_capacity_per_type_batch
    }

    /// Sets the capacity given to batches created from now on.
    pub fn set_initial_capacity_per_type_batch(&mut self, capacity: usize) {
        self.initial_capacity_per_type_batch = capacity;
    }

    /// Gets the pools used for shape resources.
    pub fn pools(&self) -> &ShapePools {
        &self.pools
    }

    /// Gets the pools used for shape resources.
    pub fn pools_mut(&mut self) -> &mut ShapePools {
        &mut self.pools
    }

    /// Gets the batch registered for a type id.
    ///
    /// # Panics
    /// If no batch is registered for `type_index`.
    pub fn get(&self, type_index: usize) -> &dyn ShapeBatch {
        match self.try_get(type_index) {
            Ok(batch) => batch,
            Err(error) => panic!("{error}"),
        }
    }

    /// Gets the batch registered for a type id.
    ///
    /// # Panics
    /// If no batch is registered for `type_index`.
    pub fn get_mut(&mut self, type_index: usize) -> &mut dyn ShapeBatch {
        match self.try_get_mut(type_index) {
            Ok(batch) => batch,
            Err(error) => panic!("{error}"),
        }
    }

    /// Gets the batch registered for a type id, if there is one.
    pub fn try_get(&self, type_index: usize) -> Result<&dyn ShapeBatch, ShapeError> {
        match self.batches.get(type_index) {
            Some(Some(batch)) => Ok(&**batch),
            _ => Err(ShapeError::UnregisteredType {
                type_id: type_index,
            }),
        }
    }

    /// Gets the batch registered for a type id, if there is one.
    pub fn try_get_mut(&mut self, type_index: usize) -> Result<&mut dyn ShapeBatch, ShapeError> {
        match self.batches.get_mut(type_index) {
            Some(Some(batch)) => Ok(&mut **batch),
            _ => Err(ShapeError::UnregisteredType {
                type_id: type_index,
            }),
        }
    }

    /// Creates the batch for shape type `T` if it does not exist yet and returns its type id.
    ///
    /// # Panics
    /// If `T::TYPE_ID` is above 127 or already registered to a different shape type.
    pub fn register<T: Shape>(&mut self) -> usize {
        let type_id = T::TYPE_ID;
        assert!(
            type_id <= MAX_TYPE_ID,
            "Shape type {} has type id {type_id}, which does not fit in a typed index.",
            std::any::type_name::<T>()
        );
        if self.batches.len() <= type_id {
            self.batches.resize_with(type_id + 1, || None);
        }
        if self.registered_type_span <= type_id {
            self.registered_type_span = type_id + 1;
        }
        match &self.batches[type_id] {
            Some(batch) => assert!(
                batch.as_any().is::<TypedShapeBatch<T>>(),
                "Type id {type_id} is already registered to a different shape type than {}.",
                std::any::type_name::<T>()
            ),
            None => {
                debug!(
                    type_id,
                    shape = std::any::type_name::<T>(),
                    capacity = self.initial_capacity_per_type_batch,
                    "registering shape batch"
                );
                self.batches[type_id] = Some(Box::new(TypedShapeBatch::<T>::new(
                    self.initial_capacity_per_type_batch,
                )));
            }
        }
        type_id
    }

    /// Gets the typed batch for shape type `T`.
    pub fn typed_batch<T: Shape>(&self) -> Result<&TypedShapeBatch<T>, ShapeError> {
        self.try_get(T::TYPE_ID)?
            .as_any()
            .downcast_ref::<TypedShapeBatch<T>>()
            .ok_or(ShapeError::BatchTypeMismatch { type_id: T::TYPE_ID })
    }

    /// Gets the typed batch for shape type `T`.
    pub fn typed_batch_mut<T: Shape>(&mut self) -> Result<&mut TypedShapeBatch<T>, ShapeError> {
        self.try_get_mut(T::TYPE_ID)?
            .as_any_mut()
            .downcast_mut::<TypedShapeBatch<T>>()
            .ok_or(ShapeError::BatchTypeMismatch { type_id: T::TYPE_ID })
    }

    /// Adds a shape to the shapes collection, registering its type if needed.
    ///
    /// # Panics
    /// If `shape` is compound and any child is not a live non-compound shape in this collection,
    /// or if the same child appears more than once.
    pub fn add<T: Shape>(&mut self, shape: T) -> TypedIndex {
        let children = shape.children();
        for (i, child) in children.iter().enumerate() {
            assert!(
                self.validate_child_index(child.shape_index),
                "Compound child {} must refer to an existing non-compound shape.",
                child.shape_index
            );
            assert!(
                children[..i]
                    .iter()
                    .all(|earlier| earlier.shape_index != child.shape_index),
                "Compound child {} is listed more than once.",
                child.shape_index
            );
        }
        let type_id = self.register::<T>();
        let Ok(batch) = self.typed_batch_mut::<T>() else {
            unreachable!("registration guarantees a batch of the right type");
        };
        let index = batch.add(shape);
        TypedIndex::new(type_id, index)
    }

    /// Gets a reference to a shape by its typed index.
    ///
    /// # Panics
    /// If the index does not refer to a stored shape of type `T`.
    pub fn get_shape<T: Shape>(&self, shape_index: TypedIndex) -> &T {
        match self.try_get_shape(shape_index) {
            Ok(shape) => shape,
            Err(error) => panic!("{error}"),
        }
    }

    /// Gets a mutable reference to a shape by its typed index.
    ///
    /// # Panics
    /// If the index does not refer to a stored shape of type `T`.
    pub fn get_shape_mut<T: Shape>(&mut self, shape_index: TypedIndex) -> &mut T {
        if let Err(error) = self.check_shape_index::<T>(shape_index) {
            panic!("{error}");
        }
        match self.typed_batch_mut::<T>() {
            Ok(batch) => batch.get_mut(shape_index.index()),
            Err(_) => unreachable!("checked above"),
        }
    }

    /// Gets a reference to a shape by its typed index, reporting mismatches as errors.
    pub fn try_get_shape<T: Shape>(&self, shape_index: TypedIndex) -> Result<&T, ShapeError> {
        self.check_shape_index::<T>(shape_index)?;
        Ok(self.typed_batch::<T>()?.get(shape_index.index()))
    }

    fn check_shape_index<T: Shape>(&self, shape_index: TypedIndex) -> Result<(), ShapeError> {
        if !shape_index.exists() {
            return Err(ShapeError::NullHandle);
        }
        if shape_index.type_id() != T::TYPE_ID {
            return Err(ShapeError::ShapeTypeMismatch {
                expected: T::TYPE_ID,
                actual: shape_index.type_id(),
            });
        }
        let batch = self.try_get(shape_index.type_id())?;
        if !batch.as_any().is::<TypedShapeBatch<T>>() {
            return Err(ShapeError::BatchTypeMismatch {
                type_id: shape_index.type_id(),
            });
        }
        if shape_index.index() >= batch.capacity() {
            return Err(ShapeError::SlotOutOfRange {
                type_id: shape_index.type_id(),
                index: shape_index.index(),
                capacity: batch.capacity(),
            });
        }
        Ok(())
    }

    /// Checks whether a typed index can be used as a compound child.
    pub fn validate_child_index(&self, shape_index: TypedIndex) -> bool {
        Compound::validate_child_index(shape_index, self)
    }

    /// Computes a bounding box for a single shape at a pose.
    pub fn update_bounds(&self, pose: &RigidPose, shape_index: TypedIndex) -> BoundingBox {
        let bounds = self
            .get(shape_index.type_id())
            .compute_bounds(shape_index.index(), pose.orientation, self);
        BoundingBox::new(bounds.min + pose.position, bounds.max + pose.position)
    }

    /// Recursively removes a shape and any existing children from the shapes collection.
    /// Children are disposed before their parent's slot is freed.
    ///
    /// The shape's batch is detached from the table while its children are torn down, so a
    /// child can never live in the same batch as its parent. Children of compounds are required
    /// to be non-compound, which also rules out cycles. The batch is put back even if a
    /// disposal hook panics.
    pub fn recursively_remove_and_dispose(&mut self, shape_index: TypedIndex) {
        if !shape_index.exists() {
            return;
        }
        let type_id = shape_index.type_id();
        let Some(batch) = self.batches.get_mut(type_id).and_then(Option::take) else {
            panic!(
                "No shape batch is available for {shape_index}; its type is unregistered or it \
                 refers back into a batch that is already being torn down."
            );
        };
        trace!(%shape_index, "recursively removing shape");
        let mut detached = DetachedBatch {
            shapes: self,
            type_id,
            batch: Some(batch),
        };
        if let Some(batch) = detached.batch.as_mut() {
            batch.recursively_remove_and_dispose(shape_index.index(), detached.shapes);
        }
    }

    /// Removes a shape and returns its resources to the pools. Does not remove or dispose children.
    pub fn remove_and_dispose(&mut self, shape_index: TypedIndex) {
        if shape_index.exists() {
            let type_id = shape_index.type_id();
            match self.batches.get_mut(type_id) {
                Some(Some(batch)) => batch.remove_and_dispose(shape_index.index(), &mut self.pools),
                _ => panic!("{}", ShapeError::UnregisteredType { type_id }),
            }
        }
    }

    /// Removes a shape without removing children or disposing resources.
    pub fn remove(&mut self, shape_index: TypedIndex) {
        if shape_index.exists() {
            self.get_mut(shape_index.type_id()).remove(shape_index.index());
        }
    }

    /// Clears all shapes from existing batches without releasing storage.
    pub fn clear(&mut self) {
        for batch in self.batches.iter_mut().flatten() {
            batch.clear();
        }
    }

    /// Ensures a minimum capacity for all existing shape batches.
    pub fn ensure_batch_capacities(&mut self, shape_capacity: usize) {
        for batch in self.batches.iter_mut().flatten() {
            batch.ensure_capacity(shape_capacity);
        }
    }

    /// Resizes all existing batches for a target capacity. Batches never shrink below
    /// their highest claimed slot.
    pub fn resize_batches(&mut self, shape_capacity: usize) {
        for batch in self.batches.iter_mut().flatten() {
            batch.resize(shape_capacity);
        }
    }
}

/// A batch taken out of the table during recursive teardown. Dropping it puts the batch back.
struct DetachedBatch<'a> {
    shapes: &'a mut Shapes,
    type_id: usize,
    batch: Option<Box<dyn ShapeBatch>>,
}

impl Drop for DetachedBatch<'_> {
    fn drop(&mut self) {
        if let Some(batch) = self.batch.take() {
            self.shapes.batches[self.type_id] = Some(batch);
        }
    }
}

impl Default for Shapes {
    fn default() -> Self {
        Self::with_config(&ShapesConfig::default())
    }
}
