pub mod typed_index;
pub mod shape;

// Convex shape primitives
pub mod sphere;
pub mod box_shape;
pub mod capsule;
pub mod triangle;

// Compound shapes
pub mod compound;

// Mesh
pub mod mesh;

// Shape batch management
pub mod shape_batch;
pub mod shapes;

pub use box_shape::BoxShape;
pub use capsule::Capsule;
pub use compound::{Compound, CompoundBuilder, CompoundChild};
pub use mesh::Mesh;
pub use shape::Shape;
pub use shape_batch::{ShapeBatch, TypedShapeBatch};
pub use shapes::{ShapePools, Shapes};
pub use sphere::Sphere;
pub use triangle::Triangle;
pub use typed_index::TypedIndex;
