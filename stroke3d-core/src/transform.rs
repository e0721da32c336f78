/// Transformation helpers shared by the camera and billboard code
use nalgebra::{Matrix4, Point3, Unit, Vector3};

/// Horizontal lengths below this are treated as a degenerate bearing
pub const DEGENERATE_BEARING_EPSILON: f32 = 1e-6;

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Rotation about the world +Y axis (yaw), in radians
    pub fn yaw_matrix(angle: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(0.0, angle, 0.0))
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Yaw rotation about the vertical axis through `pivot`
    pub fn yaw_about(pivot: &Point3<f32>, angle: f32) -> Matrix4<f32> {
        Self::translation_matrix(pivot.x, pivot.y, pivot.z)
            * Self::yaw_matrix(angle)
            * Self::translation_matrix(-pivot.x, -pivot.y, -pivot.z)
    }

    /// World position of a local-to-world transform (image of the local origin)
    pub fn origin_of(local_to_world: &Matrix4<f32>) -> Point3<f32> {
        local_to_world.transform_point(&Point3::origin())
    }

    /// Drop the vertical component and normalize.
    ///
    /// Returns `None` when the horizontal part is (near) zero length.
    pub fn horizontal_direction(v: &Vector3<f32>) -> Option<Unit<Vector3<f32>>> {
        Unit::try_new(Vector3::new(v.x, 0.0, v.z), DEGENERATE_BEARING_EPSILON)
    }

    /// Angle about +Y that turns the +Z axis onto `direction`'s bearing
    pub fn yaw_of(direction: &Vector3<f32>) -> f32 {
        direction.x.atan2(direction.z)
    }
}
