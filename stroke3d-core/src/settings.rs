/// Projection configuration
use nalgebra::Vector3;

use crate::geometry::DEFAULT_PARALLEL_EPSILON;

/// What to do when some stroke vertices miss the target surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissPolicy {
    /// Keep the hits in stroke order and drop every triangle that touches a miss
    #[default]
    DropTriangles,
    /// Fail the whole projection if any vertex misses
    Reject,
}

/// Tunables for [`Projector`](crate::Projector)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionSettings {
    pub miss_policy: MissPolicy,
    /// Billboard normal used when the camera is straight above or below the anchor
    pub fallback_normal: Vector3<f32>,
    /// Rays closer than this to parallel with the billboard plane are misses
    pub parallel_epsilon: f32,
}

impl ProjectionSettings {
    pub fn new() -> Self {
        Self {
            miss_policy: MissPolicy::DropTriangles,
            fallback_normal: Vector3::z(),
            parallel_epsilon: DEFAULT_PARALLEL_EPSILON,
        }
    }

    pub fn with_miss_policy(mut self, miss_policy: MissPolicy) -> Self {
        self.miss_policy = miss_policy;
        self
    }

    pub fn with_fallback_normal(mut self, fallback_normal: Vector3<f32>) -> Self {
        self.fallback_normal = fallback_normal;
        self
    }

    pub fn with_parallel_epsilon(mut self, parallel_epsilon: f32) -> Self {
        self.parallel_epsilon = parallel_epsilon;
        self
    }
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self::new()
    }
}
