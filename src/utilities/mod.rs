pub mod bounding_box;
pub mod bounding_sphere;
pub mod containment_type;
pub mod memory;

pub use bounding_box::BoundingBox;
pub use bounding_sphere::BoundingSphere;
pub use containment_type::ContainmentType;
