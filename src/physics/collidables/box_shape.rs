use glam::{Mat3, Quat};

use crate::utilities::bounding_box::BoundingBox;

use super::shape::Shape;
use super::shapes::Shapes;

/// Collision shape representing a solid cuboid.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoxShape {
    /// Half of the box's width along its local X axis.
    pub half_width: f32,
    /// Half of the box's height along its local Y axis.
    pub half_height: f32,
    /// Half of the box's length along its local Z axis.
    pub half_length: f32,
}

impl BoxShape {
    /// Creates a box shape.
    #[inline(always)]
    pub fn new(width: f32, height: f32, length: f32) -> Self {
        Self {
            half_width: width * 0.5,
            half_height: height * 0.5,
            half_length: length * 0.5,
        }
    }

    pub fn width(&self) -> f32 {
        self.half_width * 2.0
    }
    pub fn height(&self) -> f32 {
        self.half_height * 2.0
    }
    pub fn length(&self) -> f32 {
        self.half_length * 2.0
    }

    /// Type id of box shapes.
    pub const ID: usize = 2;
}

impl Shape for BoxShape {
    const TYPE_ID: usize = Self::ID;

    #[inline(always)]
    fn compute_bounds(&self, orientation: Quat, _shapes: &Shapes) -> BoundingBox {
        let basis = Mat3::from_quat(orientation);
        let x = self.half_width * basis.x_axis;
        let y = self.half_height * basis.y_axis;
        let z = self.half_length * basis.z_axis;
        let max = x.abs() + y.abs() + z.abs();
        BoundingBox::new(-max, max)
    }
}
