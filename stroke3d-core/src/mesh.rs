/// Output meshes produced by the projectors
use nalgebra::{Matrix4, Point3, Vector3};
use tracing::warn;

use crate::error::{ProjectionError, Result};
use crate::settings::MissPolicy;
use crate::stroke::Color;

/// Which faces of a triangle are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Front,
    Back,
    Double,
}

/// A flat single-color material that ignores lighting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnlitMaterial {
    pub color: Color,
    pub side: Side,
}

impl UnlitMaterial {
    /// Material for projected strokes, which are visible from both sides
    pub fn double_sided(color: Color) -> Self {
        Self {
            color,
            side: Side::Double,
        }
    }
}

/// An indexed triangle mesh with a single material
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh3 {
    pub vertices: Vec<Point3<f32>>,
    pub indices: Vec<[u32; 3]>,
    pub material: UnlitMaterial,
}

impl Mesh3 {
    pub fn new(material: UnlitMaterial) -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            material,
        }
    }

    /// Assemble a mesh from per-vertex projection results.
    ///
    /// `hits[i]` is the projection of stroke vertex `i`. Hits are kept in stroke
    /// order and `indices` is remapped onto the compacted vertex list; a triangle
    /// survives only if all three of its corners were hit.
    pub fn from_hits(
        hits: &[Option<Point3<f32>>],
        indices: &[[u32; 3]],
        color: Color,
        policy: MissPolicy,
    ) -> Result<Self> {
        let total = hits.len();
        let missed = hits.iter().filter(|hit| hit.is_none()).count();
        if missed > 0 && policy == MissPolicy::Reject {
            return Err(ProjectionError::Unprojectable { missed, total });
        }

        let mut vertices = Vec::with_capacity(total - missed);
        let remap: Vec<Option<u32>> = hits
            .iter()
            .map(|hit| {
                hit.map(|p| {
                    vertices.push(p);
                    (vertices.len() - 1) as u32
                })
            })
            .collect();

        let lookup = |i: u32| remap.get(i as usize).copied().flatten();
        let triangles: Vec<[u32; 3]> = indices
            .iter()
            .filter_map(|&[a, b, c]| Some([lookup(a)?, lookup(b)?, lookup(c)?]))
            .collect();

        let dropped = indices.len() - triangles.len();
        if dropped > 0 {
            warn!(
                "Dropped {} of {} triangles referencing unprojected vertices",
                dropped,
                indices.len()
            );
        }

        Ok(Self {
            vertices,
            indices: triangles,
            material: UnlitMaterial::double_sided(color),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Corner positions of each triangle.
    ///
    /// Triangles with an index past the end of `vertices` are skipped.
    pub fn triangles(&self) -> impl Iterator<Item = [Point3<f32>; 3]> + '_ {
        self.indices.iter().filter_map(move |tri| self.corners(tri))
    }

    fn corners(&self, &[a, b, c]: &[u32; 3]) -> Option<[Point3<f32>; 3]> {
        let corner = |i: u32| self.vertices.get(i as usize).copied();
        Some([corner(a)?, corner(b)?, corner(c)?])
    }

    /// Unit face normal of triangle `index`, `None` if out of range or degenerate
    pub fn face_normal(&self, index: usize) -> Option<Vector3<f32>> {
        let [v0, v1, v2] = self.corners(self.indices.get(index)?)?;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).try_normalize(1e-12)
    }

    /// Apply a world transform to every vertex in place
    pub fn transform(&mut self, matrix: &Matrix4<f32>) {
        for vertex in &mut self.vertices {
            *vertex = matrix.transform_point(vertex);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(x: f32, y: f32, z: f32) -> Option<Point3<f32>> {
        Some(Point3::new(x, y, z))
    }

    #[test]
    fn test_all_hits_keep_indices() {
        let hits = [
            hit(0.0, 0.0, 0.0),
            hit(1.0, 0.0, 0.0),
            hit(0.0, 1.0, 0.0),
            hit(1.0, 1.0, 0.0),
        ];
        let indices = [[0, 1, 2], [2, 1, 3]];
        let red = Color::rgb(1.0, 0.0, 0.0);
        let mesh = Mesh3::from_hits(&hits, &indices, red, MissPolicy::default()).unwrap();

        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices, indices.to_vec());
        assert_eq!(mesh.material.side, Side::Double);
        assert_eq!(mesh.material.color, Color::rgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_miss_drops_touching_triangles_and_remaps() {
        let hits = [
            hit(0.0, 0.0, 0.0),
            None,
            hit(0.0, 1.0, 0.0),
            hit(1.0, 1.0, 0.0),
            hit(2.0, 2.0, 0.0),
        ];
        let indices = [[0, 1, 2], [0, 2, 3], [2, 3, 4]];
        let policy = MissPolicy::DropTriangles;
        let mesh = Mesh3::from_hits(&hits, &indices, Color::default(), policy).unwrap();

        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.vertices[1], Point3::new(0.0, 1.0, 0.0));
        assert_eq!(mesh.indices, vec![[0, 1, 2], [1, 2, 3]]);
        assert!(mesh
            .indices
            .iter()
            .flatten()
            .all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn test_out_of_range_index_is_dropped() {
        let hits = [hit(0.0, 0.0, 0.0), hit(1.0, 0.0, 0.0), hit(0.0, 1.0, 0.0)];
        let indices = [[0, 1, 2], [0, 1, 9]];
        let mesh = Mesh3::from_hits(&hits, &indices, Color::default(), MissPolicy::default())
            .unwrap();
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_hand_built_mesh_with_bad_index() {
        let mut mesh = Mesh3::new(UnlitMaterial::double_sided(Color::default()));
        mesh.vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        mesh.indices = vec![[0, 1, 7], [0, 1, 2]];

        let triangles: Vec<_> = mesh.triangles().collect();
        assert_eq!(triangles.len(), 1);
        assert_eq!(triangles[0][2], Point3::new(0.0, 1.0, 0.0));

        assert!(mesh.face_normal(0).is_none());
        assert!((mesh.face_normal(1).unwrap() - Vector3::z()).norm() < 1e-6);
    }

    #[test]
    fn test_reject_policy() {
        let hits = [hit(0.0, 0.0, 0.0), None, None];
        let err = Mesh3::from_hits(&hits, &[[0, 1, 2]], Color::default(), MissPolicy::Reject)
            .unwrap_err();
        assert_eq!(err, ProjectionError::Unprojectable { missed: 2, total: 3 });
    }

    #[test]
    fn test_face_normal() {
        let hits = [hit(0.0, 0.0, 0.0), hit(1.0, 0.0, 0.0), hit(0.0, 1.0, 0.0)];
        let mesh = Mesh3::from_hits(&hits, &[[0, 1, 2]], Color::default(), MissPolicy::default())
            .unwrap();
        let normal = mesh.face_normal(0).unwrap();
        assert!((normal - Vector3::z()).norm() < 1e-6);
        assert!(mesh.face_normal(1).is_none());
    }

    #[test]
    fn test_empty() {
        let mesh = Mesh3::from_hits(&[], &[], Color::default(), MissPolicy::Reject).unwrap();
        assert!(mesh.is_empty());
        assert_eq!(mesh.triangle_count(), 0);
    }
}
