/// Upright, camera-facing billboards anchored to the ground
use nalgebra::{Point3, Unit, Vector3};
use tracing::warn;

use crate::error::{ProjectionError, Result};
use crate::geometry::Plane;
use crate::mesh::Mesh3;
use crate::projection::PickCamera;
use crate::projector::{checked_camera_position, Projector};
use crate::stroke::Stroke2D;
use crate::transform::Transform;

/// A projected stroke standing on a ground point, turned toward the camera
#[derive(Debug, Clone, PartialEq)]
pub struct Billboard {
    pub anchor: Point3<f32>,
    /// Horizontal unit normal; the y component is always zero
    pub normal: Unit<Vector3<f32>>,
    pub mesh: Mesh3,
}

impl Billboard {
    pub fn new(anchor: Point3<f32>, normal: Unit<Vector3<f32>>, mesh: Mesh3) -> Self {
        Self {
            anchor,
            normal,
            mesh,
        }
    }

    /// Plane the billboard's mesh lies in
    pub fn plane(&self) -> Plane {
        Plane {
            point: self.anchor,
            normal: self.normal,
        }
    }

    /// Facing angle about +Y, zero when facing +Z
    pub fn yaw(&self) -> f32 {
        Transform::yaw_of(&self.normal)
    }

    /// Spin the billboard about its vertical axis so it faces `camera_position`.
    ///
    /// Returns `false` and leaves the billboard unchanged when the camera is
    /// directly above or below the anchor.
    pub fn turn_to_face(&mut self, camera_position: &Point3<f32>) -> bool {
        let Some(facing) = Transform::horizontal_direction(&(camera_position - self.anchor)) else {
            return false;
        };

        let angle = Transform::yaw_of(&facing) - self.yaw();
        self.mesh.transform(&Transform::yaw_about(&self.anchor, angle));
        self.normal = facing;
        true
    }
}

/// Horizontal normal pointing from `anchor` toward the camera's bearing.
///
/// When the camera is straight above or below the anchor the bearing is
/// undefined and `fallback` (flattened) is used instead, or +Z if `fallback`
/// has no horizontal part either.
pub fn billboard_normal(
    camera_position: &Point3<f32>,
    anchor: &Point3<f32>,
    fallback: &Vector3<f32>,
) -> Unit<Vector3<f32>> {
    Transform::horizontal_direction(&(camera_position - anchor)).unwrap_or_else(|| {
        warn!(
            "Camera is vertically aligned with billboard anchor ({}, {}, {}); \
             using fallback normal",
            anchor.x, anchor.y, anchor.z
        );
        Transform::horizontal_direction(fallback).unwrap_or_else(Vector3::z_axis)
    })
}

impl Projector {
    /// Project a stroke onto an upright plane through `anchor` that faces the
    /// camera's horizontal bearing, and wrap the result in a [`Billboard`].
    pub fn project_to_billboard<C>(
        &self,
        stroke: &Stroke2D,
        camera: &C,
        anchor: Point3<f32>,
    ) -> Result<Billboard>
    where
        C: PickCamera + ?Sized,
    {
        if !(anchor.x.is_finite() && anchor.y.is_finite() && anchor.z.is_finite()) {
            return Err(ProjectionError::InvalidAnchor(anchor.x, anchor.y, anchor.z));
        }

        let camera_position = checked_camera_position(camera)?;
        let settings = self.settings();
        let normal = billboard_normal(&camera_position, &anchor, &settings.fallback_normal);
        let plane = Plane {
            point: anchor,
            normal,
        };

        let epsilon = settings.parallel_epsilon;
        let mesh = self.lift(stroke, camera, |ray| {
            ray.intersect_plane_with_epsilon(&plane, epsilon)
        })?;

        Ok(Billboard::new(anchor, normal, mesh))
    }
}

/// Project a stroke onto a ground-anchored billboard with default settings
pub fn project_to_billboard<C>(
    stroke: &Stroke2D,
    camera: &C,
    anchor: Point3<f32>,
) -> Result<Billboard>
where
    C: PickCamera + ?Sized,
{
    Projector::default().project_to_billboard(stroke, camera, anchor)
}
