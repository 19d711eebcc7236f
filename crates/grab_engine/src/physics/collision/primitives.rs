//! Primitive collision shapes and intersection algorithms
//!
//! Rays, spheres and axis-aligned boxes, with the ray casts used to
//! implement sphere sweeps (a sphere swept against a shape is a ray cast
//! against the shape inflated by the sphere radius).

use crate::foundation::math::Vec3;

/// A ray for ray casting and sweeps
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Entry of a ray into a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin to the entry point
    pub distance: f32,
    /// The point of intersection in world space
    pub point: Vec3,
    /// Outward surface normal at the entry point
    pub normal: Vec3,
}

/// A bounding sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Grow the radius by `amount`
    pub fn inflated(&self, amount: f32) -> Self {
        Self::new(self.center, self.radius + amount)
    }

    /// Check if this sphere intersects with another (touching counts)
    pub fn intersects(&self, other: &BoundingSphere) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared <= radius_sum * radius_sum
    }

    /// Check if a point lies inside or on the sphere
    pub fn contains_point(&self, point: Vec3) -> bool {
        (point - self.center).magnitude_squared() <= self.radius * self.radius
    }

    /// Cast a ray against the sphere surface
    ///
    /// A ray starting inside the sphere reports a hit at distance 0 only when
    /// it heads further in; a ray leaving the sphere is not a hit.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<RayHit> {
        let oc = ray.origin - self.center;
        let c = oc.dot(&oc) - self.radius * self.radius;

        if c <= 0.0 {
            let outward = oc.try_normalize(f32::EPSILON).unwrap_or(-ray.direction);
            return (ray.direction.dot(&outward) < 0.0).then_some(RayHit {
                distance: 0.0,
                point: ray.origin,
                normal: outward,
            });
        }

        // Solve |origin + t*direction - center|^2 = radius^2 for a unit direction
        let b = oc.dot(&ray.direction);
        let discriminant = b * b - c;
        if b > 0.0 || discriminant < 0.0 {
            return None; // Pointing away, or missing entirely
        }

        let t = -b - discriminant.sqrt();
        let point = ray.point_at(t);
        Some(RayHit {
            distance: t,
            point,
            normal: (point - self.center) / self.radius,
        })
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given half extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Grow every face outward by `amount`
    ///
    /// Used as the Minkowski sum with a sphere; conservative at edges and
    /// corners, where the true sum is rounded.
    pub fn inflated(&self, amount: f32) -> Self {
        let grow = Vec3::repeat(amount);
        Self::new(self.min - grow, self.max + grow)
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Closest point of the box to `point`
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
            point.z.clamp(self.min.z, self.max.z),
        )
    }

    /// Check if a sphere touches or overlaps the box
    pub fn intersects_sphere(&self, sphere: &BoundingSphere) -> bool {
        sphere.contains_point(self.closest_point(sphere.center))
    }

    /// Outward normal of the face nearest to an interior point
    fn nearest_face_normal(&self, point: Vec3) -> Vec3 {
        let candidates = [
            (point.x - self.min.x, -Vec3::x()),
            (self.max.x - point.x, Vec3::x()),
            (point.y - self.min.y, -Vec3::y()),
            (self.max.y - point.y, Vec3::y()),
            (point.z - self.min.z, -Vec3::z()),
            (self.max.z - point.z, Vec3::z()),
        ];
        candidates
            .into_iter()
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map_or_else(Vec3::y, |(_, normal)| normal)
    }

    /// Cast a ray against the box using the slab method
    ///
    /// Based on "An Efficient and Robust Ray–Box Intersection Algorithm".
    /// Same inside-origin rule as [`BoundingSphere::intersect_ray`].
    pub fn intersect_ray(&self, ray: &Ray) -> Option<RayHit> {
        if self.contains_point(ray.origin) {
            let outward = self.nearest_face_normal(ray.origin);
            return (ray.direction.dot(&outward) < 0.0).then_some(RayHit {
                distance: 0.0,
                point: ray.origin,
                normal: outward,
            });
        }

        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut entry_normal = Vec3::zeros();

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let direction = ray.direction[axis];
            let (min, max) = (self.min[axis], self.max[axis]);

            if direction.abs() < f32::EPSILON {
                if origin < min || origin > max {
                    return None; // Parallel and outside this slab
                }
                continue;
            }

            let inv = 1.0 / direction;
            let (mut t0, mut t1) = ((min - origin) * inv, (max - origin) * inv);
            let mut normal = Vec3::zeros();
            normal[axis] = -direction.signum();
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            if t0 > t_enter {
                t_enter = t0;
                entry_normal = normal;
            }
            t_exit = t_exit.min(t1);
        }

        if t_enter > t_exit || t_exit < 0.0 || t_enter < 0.0 {
            return None;
        }

        Some(RayHit {
            distance: t_enter,
            point: ray.point_at(t_enter),
            normal: entry_normal,
        })
    }
}
