/// Stroke3D Core Library - Lifting 2D sketch strokes into 3D
///
/// This library provides the stateless geometry that turns a stroke drawn in
/// normalized screen space into a 3D mesh, either on a sky sphere around the
/// world origin or on an upright billboard standing on a ground point.

pub mod billboard;
pub mod error;
pub mod geometry;
pub mod mesh;
pub mod projection;
pub mod projector;
pub mod settings;
pub mod sky;
pub mod stroke;
pub mod transform;

// Re-export commonly used types
pub use billboard::{billboard_normal, project_to_billboard, Billboard};
pub use error::{ProjectionError, Result};
pub use geometry::{Plane, Ray, Sphere};
pub use mesh::{Mesh3, Side, UnlitMaterial};
pub use projection::{Camera, PickCamera, ProjectionMode};
pub use projector::Projector;
pub use settings::{MissPolicy, ProjectionSettings};
pub use sky::project_to_sky;
pub use stroke::{Color, Stroke2D};
pub use transform::Transform;
