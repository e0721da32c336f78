/// Projection of strokes onto the sky sphere
use crate::error::{ProjectionError, Result};
use crate::geometry::Sphere;
use crate::mesh::Mesh3;
use crate::projection::PickCamera;
use crate::projector::{checked_camera_position, Projector};
use crate::stroke::Stroke2D;

impl Projector {
    /// Project a stroke onto a sphere of radius `sky_radius` centered at the
    /// world origin.
    ///
    /// Each stroke vertex is cast through `camera` and lands where its pick ray
    /// meets the sphere. Vertices whose ray misses are handled by the configured
    /// [`MissPolicy`](crate::MissPolicy).
    pub fn project_to_sky<C>(
        &self,
        stroke: &Stroke2D,
        camera: &C,
        sky_radius: f32,
    ) -> Result<Mesh3>
    where
        C: PickCamera + ?Sized,
    {
        // The intersection works with the squared radius
        if sky_radius.is_nan() || sky_radius <= 0.0 || !(sky_radius * sky_radius).is_finite() {
            return Err(ProjectionError::InvalidSkyRadius(sky_radius));
        }
        checked_camera_position(camera)?;

        let sphere = Sphere::sky(sky_radius);
        self.lift(stroke, camera, |ray| ray.intersect_sphere(&sphere))
    }
}

/// Project a stroke onto the sky sphere with default settings
pub fn project_to_sky<C>(stroke: &Stroke2D, camera: &C, sky_radius: f32) -> Result<Mesh3>
where
    C: PickCamera + ?Sized,
{
    Projector::default().project_to_sky(stroke, camera, sky_radius)
}
