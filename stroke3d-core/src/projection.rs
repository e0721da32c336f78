/// Camera, pick rays and projection utilities
use nalgebra::{Isometry3, Matrix4, Point2, Point3, Vector3};

use crate::geometry::Ray;
use crate::transform::Transform;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// What the projectors need from a camera.
///
/// Any camera type can drive stroke projection as long as it can turn an NDC
/// point into a world-space ray and report where it sits in the world.
pub trait PickCamera {
    /// World-space ray through a point in normalized device coordinates
    fn pick_ray(&self, ndc: &Point2<f32>) -> Ray;

    /// Camera-local to world transform
    fn local_to_world(&self) -> Matrix4<f32>;

    /// Camera position in world space
    fn world_position(&self) -> Point3<f32> {
        Transform::origin_of(&self.local_to_world())
    }
}

/// Camera configuration for 3D rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 5.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect: width as f32 / height as f32,
            near: 0.1,
            far: 100.0,
            mode: ProjectionMode::Perspective,
        }
    }

    /// Move the camera to `position`, looking at `target`
    pub fn look_at(mut self, position: Point3<f32>, target: Point3<f32>) -> Self {
        self.position = position;
        self.target = target;
        self
    }

    pub fn with_mode(mut self, mode: ProjectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let (half_width, half_height) = self.ortho_half_extents();
                Matrix4::new_orthographic(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    self.near,
                    self.far,
                )
            }
        }
    }

    // Orthographic view volume is sized by the distance to the target.
    fn ortho_half_extents(&self) -> (f32, f32) {
        let height = (self.position - self.target).norm();
        let width = height * self.aspect;
        (width / 2.0, height / 2.0)
    }

    /// Project a world-space point to normalized device coordinates.
    ///
    /// Returns `None` for points behind the camera or outside the view volume.
    pub fn project_to_ndc(&self, point: &Point3<f32>) -> Option<Point2<f32>> {
        let view = self.view_matrix();
        let eye = view.transform_point(point);

        // Camera looks down -Z
        if eye.z >= -1e-6 {
            return None;
        }

        let ndc = self.projection_matrix().transform_point(&eye);
        if ndc.x < -1.0 || ndc.x > 1.0 || ndc.y < -1.0 || ndc.y > 1.0 {
            return None;
        }

        Some(Point2::new(ndc.x, ndc.y))
    }
}

impl PickCamera for Camera {
    fn pick_ray(&self, ndc: &Point2<f32>) -> Ray {
        let local_to_world = self.local_to_world();

        match self.mode {
            ProjectionMode::Perspective => {
                let tan_half = (self.fov / 2.0).tan();
                let local_dir =
                    Vector3::new(ndc.x * tan_half * self.aspect, ndc.y * tan_half, -1.0);
                Ray::new(
                    Transform::origin_of(&local_to_world),
                    local_to_world.transform_vector(&local_dir),
                )
            }
            ProjectionMode::Orthographic => {
                let (half_width, half_height) = self.ortho_half_extents();
                let local_origin =
                    Point3::new(ndc.x * half_width, ndc.y * half_height, -self.near);
                Ray::new(
                    local_to_world.transform_point(&local_origin),
                    local_to_world.transform_vector(&-Vector3::z()),
                )
            }
        }
    }

    fn local_to_world(&self) -> Matrix4<f32> {
        Isometry3::look_at_rh(&self.position, &self.target, &self.up)
            .inverse()
            .to_homogeneous()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_roundtrip(camera: &Camera, ndc: Point2<f32>) {
        let ray = camera.pick_ray(&ndc);
        let back = camera.project_to_ndc(&ray.at(10.0)).unwrap();
        assert!(
            (back - ndc).norm() < 1e-4,
            "expected {:?}, got {:?}",
            ndc,
            back
        );
    }

    #[test]
    fn test_aspect_widens_horizontal_rays() {
        let narrow = Camera::new(600, 600);
        let wide = Camera::new(1200, 600);
        let ndc = Point2::new(1.0, 1.0);
        let a = narrow.pick_ray(&ndc).direction;
        let b = wide.pick_ray(&ndc).direction;

        // Same vertical slope, twice the horizontal slope
        assert!((a.y / -a.z - b.y / -b.z).abs() < 1e-5);
        assert!((b.x / -b.z - 2.0 * a.x / -a.z).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_look_at_is_not_finite() {
        let eye = Point3::new(2.0, 1.0, 3.0);
        let camera = Camera::default().look_at(eye, eye);
        assert!(!camera.pick_ray(&Point2::origin()).is_finite());

        // Looking straight down the default up vector
        let camera = Camera::default().look_at(Point3::new(0.0, 5.0, 0.0), Point3::origin());
        assert!(!camera.pick_ray(&Point2::origin()).is_finite());
    }

    #[test]
    fn test_world_position_from_local_to_world() {
        let camera = Camera::default().look_at(Point3::new(3.0, 2.0, -7.0), Point3::origin());
        let p = camera.world_position();
        assert!((p - camera.position).norm() < 1e-5);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = Camera::default().look_at(Point3::new(4.0, 3.0, 0.0), Point3::origin());
        let ray = camera.pick_ray(&Point2::origin());
        let expected = (camera.target - camera.position).normalize();
        assert!((ray.direction.into_inner() - expected).norm() < 1e-5);
        assert!((ray.origin - camera.position).norm() < 1e-5);
    }

    #[test]
    fn test_perspective_pick_ray_roundtrip() {
        let eye = Point3::new(1.0, 2.0, 6.0);
        let camera = Camera::new(800, 600).look_at(eye, Point3::origin());
        for ndc in [
            Point2::new(0.0, 0.0),
            Point2::new(0.5, -0.25),
            Point2::new(-0.9, 0.9),
        ] {
            assert_roundtrip(&camera, ndc);
        }
    }

    #[test]
    fn test_orthographic_pick_ray_roundtrip() {
        let camera = Camera::new(800, 600)
            .look_at(Point3::new(0.0, 1.0, 6.0), Point3::origin())
            .with_mode(ProjectionMode::Orthographic);
        let a = camera.pick_ray(&Point2::new(-0.5, 0.5));
        let b = camera.pick_ray(&Point2::new(0.5, 0.5));
        // Orthographic rays are parallel
        assert!((a.direction.into_inner() - b.direction.into_inner()).norm() < 1e-6);
        assert_roundtrip(&camera, Point2::new(0.25, -0.75));
    }

    #[test]
    fn test_project_behind_camera() {
        let camera = Camera::default();
        assert!(camera.project_to_ndc(&Point3::new(0.0, 0.0, 10.0)).is_none());
    }
}
