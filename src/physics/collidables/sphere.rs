use glam::{Quat, Vec3};

use crate::utilities::bounding_box::BoundingBox;

use super::shape::Shape;
use super::shapes::Shapes;

/// Collision shape representing a sphere.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sphere {
    /// Radius of the sphere.
    pub radius: f32,
}

impl Sphere {
    /// Creates a sphere shape.
    #[inline(always)]
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// Type id of sphere shapes.
    pub const ID: usize = 0;
}

impl Shape for Sphere {
    const TYPE_ID: usize = Self::ID;

    #[inline(always)]
    fn compute_bounds(&self, _orientation: Quat, _shapes: &Shapes) -> BoundingBox {
        let radius = Vec3::splat(self.radius);
        BoundingBox::new(-radius, radius)
    }
}
