//! Scene content: viewer camera, lighting, reticle and the measuring box.

/// Semi-transparent measuring box with wireframe edges.
///
/// Spawned once, hidden until placed, then repositioned and rescaled in place.
pub mod measure_box;

/// Flat ring marking the detected surface under the view ray.
pub mod reticle;

/// Viewer camera and lighting, plus viewer pose tracking.
pub mod stage;
