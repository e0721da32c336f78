/// Shared driver for lifting strokes onto a surface
use nalgebra::{Point2, Point3};
use tracing::debug;

use crate::error::{ProjectionError, Result};
use crate::geometry::Ray;
use crate::mesh::Mesh3;
use crate::projection::PickCamera;
use crate::settings::ProjectionSettings;
use crate::stroke::Stroke2D;

/// Projects strokes with a fixed set of [`ProjectionSettings`].
///
/// A projector holds no state between calls; the same value can be shared
/// across threads. See `sky.rs` and `billboard.rs` for the two entry points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Projector {
    settings: ProjectionSettings,
}

impl Projector {
    pub fn new(settings: ProjectionSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ProjectionSettings {
        &self.settings
    }

    /// Cast a pick ray through every stroke vertex and build a mesh from the hits
    pub(crate) fn lift<C, F>(&self, stroke: &Stroke2D, camera: &C, intersect: F) -> Result<Mesh3>
    where
        C: PickCamera + ?Sized,
        F: Fn(&Ray) -> Option<Point3<f32>>,
    {
        let hits = collect_hits(stroke, camera, intersect);

        let mesh = Mesh3::from_hits(
            &hits,
            &stroke.indices,
            stroke.color,
            self.settings.miss_policy,
        )?;

        debug!(
            "Projected {} of {} stroke vertices into {} triangles",
            mesh.vertices.len(),
            stroke.len(),
            mesh.triangle_count()
        );

        Ok(mesh)
    }
}

/// World position of `camera`, failing if the camera cannot produce finite rays.
///
/// Checked once per call against the view center, so a NaN stroke vertex is
/// still a per-vertex miss rather than a camera error.
pub(crate) fn checked_camera_position<C>(camera: &C) -> Result<Point3<f32>>
where
    C: PickCamera + ?Sized,
{
    let position = camera.world_position();
    if !position.iter().all(|c| c.is_finite()) {
        return Err(ProjectionError::InvalidCamera("world position is not finite"));
    }

    if !camera.pick_ray(&Point2::origin()).is_finite() {
        return Err(ProjectionError::InvalidCamera("pick ray is not finite"));
    }

    Ok(position)
}

/// One entry per stroke vertex, in stroke order; `None` marks a miss.
fn collect_hits<C, F>(stroke: &Stroke2D, camera: &C, intersect: F) -> Vec<Option<Point3<f32>>>
where
    C: PickCamera + ?Sized,
    F: Fn(&Ray) -> Option<Point3<f32>>,
{
    stroke
        .vertices
        .iter()
        .enumerate()
        .map(|(i, ndc)| {
            let ray = camera.pick_ray(ndc);
            let hit = if ray.is_finite() { intersect(&ray) } else { None };
            if hit.is_none() {
                debug!("Stroke vertex {} ({}, {}) missed the target surface", i, ndc.x, ndc.y);
            }
            hit
        })
        .collect()
}
