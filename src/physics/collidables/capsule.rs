use glam::{Quat, Vec3};

use crate::utilities::bounding_box::BoundingBox;

use super::shape::Shape;
use super::shapes::Shapes;

/// Collision shape representing a sphere-expanded line segment.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Capsule {
    /// Spherical expansion applied to the internal line segment.
    pub radius: f32,
    /// Half of the length of the internal line segment. Oriented along the local Y axis.
    pub half_length: f32,
}

impl Capsule {
    /// Creates a capsule shape.
    #[inline(always)]
    pub fn new(radius: f32, length: f32) -> Self {
        Self {
            radius,
            half_length: length * 0.5,
        }
    }

    /// Gets the length of the capsule's internal line segment along the local Y axis.
    pub fn length(&self) -> f32 {
        self.half_length * 2.0
    }

    pub fn set_length(&mut self, value: f32) {
        self.half_length = value * 0.5;
    }

    /// Type id of capsule shapes.
    pub const ID: usize = 1;
}

impl Shape for Capsule {
    const TYPE_ID: usize = Self::ID;

    #[inline(always)]
    fn compute_bounds(&self, orientation: Quat, _shapes: &Shapes) -> BoundingBox {
        let segment_offset = orientation * Vec3::Y;
        let max = (self.half_length * segment_offset).abs() + Vec3::splat(self.radius);
        BoundingBox::new(-max, max)
    }
}
