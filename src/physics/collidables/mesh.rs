use glam::{Quat, Vec3};

use crate::utilities::bounding_box::BoundingBox;

use super::shape::Shape;
use super::shapes::{ShapePools, Shapes};
use super::triangle::Triangle;

/// Shape designed to contain a whole bunch of triangles.
///
/// The triangle buffer is the mesh's one external resource: disposing the mesh hands the
/// buffer back to the registry's triangle pool so the next mesh can reuse the allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Buffer of triangles composing the mesh.
    pub triangles: Vec<Triangle>,

    /// Scale applied to all vertices at runtime.
    scale: Vec3,
}

impl Mesh {
    /// Type id of mesh shapes.
    pub const ID: usize = 8;

    /// Creates a mesh shape.
    pub fn new(triangles: Vec<Triangle>, scale: Vec3) -> Self {
        Self { triangles, scale }
    }

    /// Creates a mesh shape, copying the triangles into a buffer recycled from `pools`.
    pub fn from_pooled(triangles: &[Triangle], scale: Vec3, pools: &mut ShapePools) -> Self {
        let mut buffer = pools.triangles.take();
        buffer.clear();
        buffer.extend_from_slice(triangles);
        Self::new(buffer, scale)
    }

    /// Gets the scale applied to all vertices at runtime.
    #[inline(always)]
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Sets the scale applied to all vertices at runtime.
    #[inline(always)]
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new(Vec::new(), Vec3::ONE)
    }
}

impl Shape for Mesh {
    const TYPE_ID: usize = Self::ID;

    fn compute_bounds(&self, orientation: Quat, _shapes: &Shapes) -> BoundingBox {
        self.triangles
            .iter()
            .map(|triangle| triangle.compute_scaled_bounds(self.scale, orientation))
            .reduce(BoundingBox::create_merged_boxes)
            .unwrap_or_default()
    }

    fn dispose(&mut self, pools: &mut ShapePools) {
        let mut triangles = std::mem::take(&mut self.triangles);
        triangles.clear();
        pools.triangles.release(triangles);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> [Triangle; 2] {
        [
            Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Z),
            Triangle::new(Vec3::X, Vec3::new(1.0, 0.0, 1.0), Vec3::Z),
        ]
    }

    #[test]
    fn bounds_apply_scale_before_rotation() {
        let shapes = Shapes::new(1);
        let mesh = Mesh::new(quad().to_vec(), Vec3::new(2.0, 1.0, 3.0));
        let bounds = mesh.compute_bounds(Quat::IDENTITY, &shapes);
        assert_eq!(bounds.min, Vec3::ZERO);
        assert_eq!(bounds.max, Vec3::new(2.0, 0.0, 3.0));
    }

    #[test]
    fn empty_mesh_has_degenerate_bounds() {
        let shapes = Shapes::new(1);
        let bounds = Mesh::default().compute_bounds(Quat::IDENTITY, &shapes);
        assert_eq!(bounds, BoundingBox::default());
    }

    #[test]
    fn triangle_buffers_cycle_through_pool() {
        let mut shapes = Shapes::new(1);
        let mut mesh = Mesh::from_pooled(&quad(), Vec3::ONE, shapes.pools_mut());
        let address = mesh.triangles.as_ptr();
        mesh.dispose(shapes.pools_mut());
        assert!(mesh.triangles.is_empty());
        let reused = Mesh::from_pooled(&quad()[..1], Vec3::ONE, shapes.pools_mut());
        assert_eq!(reused.triangles.as_ptr(), address);
        assert_eq!(reused.triangles.len(), 1);
    }
}
