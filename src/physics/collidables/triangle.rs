use glam::{Quat, Vec3};

use crate::utilities::bounding_box::BoundingBox;

use super::shape::Shape;
use super::shapes::Shapes;

/// Collision shape representing an individual triangle.
/// Triangle collisions and ray tests are one-sided; only tests which see the triangle as wound
/// clockwise in right handed coordinates or counterclockwise in left handed coordinates
/// will generate contacts.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Triangle {
    /// First vertex of the triangle in local space.
    pub a: Vec3,
    /// Second vertex of the triangle in local space.
    pub b: Vec3,
    /// Third vertex of the triangle in local space.
    pub c: Vec3,
}

impl Triangle {
    /// Creates a triangle shape.
    #[inline(always)]
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    /// Type id of triangle shapes.
    pub const ID: usize = 3;

    /// Computes the bounds of the triangle after scaling and then rotating its vertices.
    #[inline(always)]
    pub fn compute_scaled_bounds(&self, scale: Vec3, orientation: Quat) -> BoundingBox {
        let a = orientation * (self.a * scale);
        let b = orientation * (self.b * scale);
        let c = orientation * (self.c * scale);
        BoundingBox::new(a.min(b).min(c), a.max(b).max(c))
    }
}

impl Shape for Triangle {
    const TYPE_ID: usize = Self::ID;

    #[inline(always)]
    fn compute_bounds(&self, orientation: Quat, _shapes: &Shapes) -> BoundingBox {
        self.compute_scaled_bounds(Vec3::ONE, orientation)
    }
}
