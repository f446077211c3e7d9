/// Reticle ring inner radius in metres
pub const RETICLE_INNER_RADIUS: f32 = 0.15;

/// Reticle ring outer radius in metres
pub const RETICLE_OUTER_RADIUS: f32 = 0.2;

pub const RETICLE_COLOUR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Box fill colour (#00aaff), alpha is the fill opacity
pub const BOX_COLOUR: [f32; 4] = [0.0, 0.667, 1.0, 0.5];

pub const BOX_EDGE_COLOUR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Vertical field of view of the viewer camera in degrees
pub const CAMERA_FOV_DEGREES: f32 = 70.0;
pub const CAMERA_NEAR: f32 = 0.01;
pub const CAMERA_FAR: f32 = 20.0;

/// Eye height of the native preview camera in metres
pub const PREVIEW_EYE_HEIGHT: f32 = 1.6;

/// Distance of the native preview camera from the origin in metres
pub const PREVIEW_EYE_DISTANCE: f32 = 2.0;

pub const SKY_LIGHT_COLOUR: [f32; 4] = [0.733, 0.733, 1.0, 1.0];
pub const SKY_LIGHT_BRIGHTNESS: f32 = 600.0;
