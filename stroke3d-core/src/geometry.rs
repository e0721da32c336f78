/// Geometric primitives used to lift strokes into 3D
use nalgebra::{Point3, Unit, Vector3};

/// Rays closer than this to parallel with a plane are treated as misses.
pub const DEFAULT_PARALLEL_EPSILON: f32 = 1e-6;

/// A ray in world space with a unit direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Unit<Vector3<f32>>,
}

impl Ray {
    /// Create a ray; the direction is normalized.
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: Unit::new_normalize(direction),
        }
    }

    /// Point at parameter `t` along the ray
    pub fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction.into_inner() * t
    }

    /// Nearest intersection with a sphere in front of the ray origin.
    ///
    /// When the origin is inside the sphere this is the exit point, which is
    /// what a camera sitting inside the sky sphere needs.
    pub fn intersect_sphere(&self, sphere: &Sphere) -> Option<Point3<f32>> {
        let oc = self.origin - sphere.center;
        let d = self.direction.as_ref();

        // |oc + t*d|^2 = r^2 with |d| = 1
        let b = oc.dot(d);
        let c = oc.norm_squared() - sphere.radius * sphere.radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_disc = discriminant.sqrt();
        let t_near = -b - sqrt_disc;
        let t_far = -b + sqrt_disc;

        let t = if t_near >= 0.0 {
            t_near
        } else if t_far >= 0.0 {
            t_far
        } else {
            return None;
        };

        finite_point(self.at(t))
    }

    /// Intersection with a plane using [`DEFAULT_PARALLEL_EPSILON`].
    pub fn intersect_plane(&self, plane: &Plane) -> Option<Point3<f32>> {
        self.intersect_plane_with_epsilon(plane, DEFAULT_PARALLEL_EPSILON)
    }

    /// Intersection with a plane.
    ///
    /// Returns `None` when the ray is parallel to the plane (within `epsilon`),
    /// the plane lies behind the ray origin, or the ray is not finite.
    pub fn intersect_plane_with_epsilon(
        &self,
        plane: &Plane,
        epsilon: f32,
    ) -> Option<Point3<f32>> {
        let normal = plane.normal.as_ref();
        let denom = self.direction.dot(normal);
        if denom.is_nan() || denom.abs() < epsilon {
            return None;
        }

        let t = (plane.point - self.origin).dot(normal) / denom;
        if !t.is_finite() || t < 0.0 {
            return None;
        }

        finite_point(self.at(t))
    }

    /// Whether origin and direction are free of NaN and infinity
    pub fn is_finite(&self) -> bool {
        let finite = |c: &f32| c.is_finite();
        self.origin.iter().all(finite) && self.direction.iter().all(finite)
    }
}

// NaN compares false everywhere, so a NaN ray must be filtered at the end too.
fn finite_point(p: Point3<f32>) -> Option<Point3<f32>> {
    p.iter().all(|c| c.is_finite()).then_some(p)
}

/// A sphere, used as the sky surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Point3<f32>,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Point3<f32>, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Sky sphere centered at the world origin
    pub fn sky(radius: f32) -> Self {
        Self::new(Point3::origin(), radius)
    }
}

/// An infinite plane through `point` with a unit normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub point: Point3<f32>,
    pub normal: Unit<Vector3<f32>>,
}

impl Plane {
    /// Create a plane; the normal is normalized.
    pub fn new(point: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self {
            point,
            normal: Unit::new_normalize(normal),
        }
    }

    /// Signed distance from the plane, positive on the normal side
    pub fn signed_distance(&self, p: &Point3<f32>) -> f32 {
        (p - self.point).dot(self.normal.as_ref())
    }
}
