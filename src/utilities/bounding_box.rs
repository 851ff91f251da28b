use glam::Vec3;

use super::bounding_sphere::BoundingSphere;
use super::containment_type::ContainmentType;

/// Provides simple axis-aligned bounding box functionality.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// Location with the lowest X, Y, and Z coordinates in the axis-aligned bounding box.
    pub min: Vec3,
    /// Location with the highest X, Y, and Z coordinates in the axis-aligned bounding box.
    pub max: Vec3,
}

impl BoundingBox {
    /// Constructs a bounding box from the specified minimum and maximum.
    #[inline]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// An inverted box that any merge replaces; the identity for [`BoundingBox::create_merged_boxes`].
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::MAX),
        max: Vec3::splat(f32::MIN),
    };

    /// Determines if a bounding box intersects another bounding box.
    #[inline]
    pub fn intersects(a: Self, b: Self) -> bool {
        Self::intersects_bounds(a.min, a.max, b.min, b.max)
    }

    /// Determines if a bounding box intersects another bounding box.
    #[inline]
    pub fn intersects_bounds(min_a: Vec3, max_a: Vec3, min_b: Vec3, max_b: Vec3) -> bool {
        let separated = max_a.cmplt(min_b) | max_b.cmplt(min_a);
        !separated.any()
    }

    /// Computes the volume of the bounding box.
    #[inline]
    pub fn compute_volume(&self) -> f32 {
        let diagonal = self.max - self.min;
        diagonal.x * diagonal.y * diagonal.z
    }

    /// Computes a bounding box which contains two other bounding boxes.
    #[inline]
    pub fn create_merged(min_a: Vec3, max_a: Vec3, min_b: Vec3, max_b: Vec3) -> (Vec3, Vec3) {
        (min_a.min(min_b), max_a.max(max_b))
    }

    /// Computes a bounding box which contains two other bounding boxes.
    #[inline]
    pub fn create_merged_boxes(a: Self, b: Self) -> Self {
        let (min, max) = Self::create_merged(a.min, a.max, b.min, b.max);
        Self { min, max }
    }

    /// Determines if a bounding box intersects a bounding sphere.
    #[inline]
    pub fn intersects_sphere(&self, sphere: &BoundingSphere) -> bool {
        let offset = sphere.center - sphere.center.clamp(self.min, self.max);
        offset.dot(offset) <= sphere.radius * sphere.radius
    }

    /// Determines how this box relates to another.
    #[inline]
    pub fn contains(&self, other: &BoundingBox) -> ContainmentType {
        if !Self::intersects(*self, *other) {
            ContainmentType::Disjoint
        } else if self.min.cmple(other.min).all() && self.max.cmpge(other.max).all() {
            ContainmentType::Contains
        } else {
            ContainmentType::Intersects
        }
    }

    /// Creates the smallest possible bounding box that contains a list of points.
    /// `None` if the list is empty.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Self::new(*first, *first);
        for point in rest {
            bounds.min = bounds.min.min(*point);
            bounds.max = bounds.max.max(*point);
        }
        Some(bounds)
    }

    /// Creates a bounding box from a bounding sphere.
    #[inline]
    pub fn from_sphere(sphere: &BoundingSphere) -> Self {
        let radius = Vec3::splat(sphere.radius);
        Self {
            min: sphere.center - radius,
            max: sphere.center + radius,
        }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_at(center: Vec3) -> BoundingBox {
        BoundingBox::new(center - Vec3::splat(0.5), center + Vec3::splat(0.5))
    }

    #[test]
    fn touching_boxes_intersect() {
        assert!(BoundingBox::intersects(unit_at(Vec3::ZERO), unit_at(Vec3::X)));
        assert!(!BoundingBox::intersects(unit_at(Vec3::ZERO), unit_at(Vec3::X * 1.5)));
    }

    #[test]
    fn containment() {
        let outer = BoundingBox::new(Vec3::splat(-2.0), Vec3::splat(2.0));
        assert_eq!(outer.contains(&unit_at(Vec3::ZERO)), ContainmentType::Contains);
        assert_eq!(outer.contains(&unit_at(Vec3::X * 2.0)), ContainmentType::Intersects);
        assert_eq!(outer.contains(&unit_at(Vec3::Y * 4.0)), ContainmentType::Disjoint);
    }

    #[test]
    fn merging_with_empty_is_identity() {
        let a = unit_at(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(BoundingBox::create_merged_boxes(BoundingBox::EMPTY, a), a);
    }

    #[test]
    fn sphere_overlap_and_conversion() {
        let sphere = BoundingSphere::new(Vec3::new(1.25, 0.0, 0.0), 1.0);
        assert!(unit_at(Vec3::ZERO).intersects_sphere(&sphere));
        let bounds = BoundingBox::from_sphere(&sphere);
        assert_eq!(bounds.min, Vec3::new(0.25, -1.0, -1.0));
        assert!(BoundingBox::from_points(&[]).is_none());
    }
}
