//! Obstacle shapes and sphere sweeps against them

use crate::foundation::math::Vec3;
use super::primitives::{Aabb, BoundingSphere, Ray, RayHit};

/// Static obstacle geometry in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObstacleShape {
    /// A sphere
    Sphere(BoundingSphere),
    /// An axis-aligned box
    Box(Aabb),
}

impl ObstacleShape {
    /// Creates a spherical obstacle
    pub fn sphere(center: Vec3, radius: f32) -> Self {
        Self::Sphere(BoundingSphere::new(center, radius))
    }

    /// Creates a box obstacle from its center and half extents
    pub fn cuboid(center: Vec3, half_extents: Vec3) -> Self {
        Self::Box(Aabb::from_center_extents(center, half_extents))
    }

    /// Get center position
    pub fn center(&self) -> Vec3 {
        match self {
            Self::Sphere(sphere) => sphere.center,
            Self::Box(aabb) => aabb.center(),
        }
    }

    /// Check if a sphere touches or overlaps this shape
    pub fn overlaps_sphere(&self, sphere: &BoundingSphere) -> bool {
        match self {
            Self::Sphere(other) => other.intersects(sphere),
            Self::Box(aabb) => aabb.intersects_sphere(sphere),
        }
    }

    /// Sweep a sphere of `radius` along `ray` and report the first contact
    ///
    /// The returned distance is how far the sphere center travels before
    /// touching; `point` is the contact on this shape's surface.
    pub fn sweep_sphere(&self, ray: &Ray, radius: f32) -> Option<RayHit> {
        let hit = match self {
            Self::Sphere(sphere) => sphere.inflated(radius).intersect_ray(ray),
            Self::Box(aabb) => aabb.inflated(radius).intersect_ray(ray),
        }?;

        Some(RayHit {
            point: hit.point - hit.normal * radius,
            ..hit
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere_sweep_against_wall() {
        let wall = ObstacleShape::cuboid(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.05, 1.0, 1.0));
        let ray = Ray::new(Vec3::zeros(), Vec3::x());

        let hit = wall.sweep_sphere(&ray, 0.1).unwrap();
        assert_relative_eq!(hit.distance, 0.85, epsilon = 1e-5);
        assert_relative_eq!(hit.point, Vec3::new(0.95, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(hit.normal, -Vec3::x(), epsilon = 1e-5);
    }

    #[test]
    fn test_sphere_sweep_grazing_miss() {
        let ball = ObstacleShape::sphere(Vec3::new(2.0, 0.5, 0.0), 0.2);
        let ray = Ray::new(Vec3::zeros(), Vec3::x());

        assert!(ball.sweep_sphere(&ray, 0.25).is_none());
        assert!(ball.sweep_sphere(&ray, 0.35).is_some());
    }

    #[test]
    fn test_overlap() {
        let ball = ObstacleShape::sphere(Vec3::zeros(), 1.0);

        assert!(ball.overlaps_sphere(&BoundingSphere::new(Vec3::new(1.4, 0.0, 0.0), 0.5)));
        assert!(!ball.overlaps_sphere(&BoundingSphere::new(Vec3::new(1.6, 0.0, 0.0), 0.5)));
    }
}
