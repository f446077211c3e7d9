/// Session features the host must request before a session can start
pub const REQUIRED_FEATURES: &[&str] = &["hit-test"];

/// Session features the host may request when available
pub const OPTIONAL_FEATURES: &[&str] = &["dom-overlay"];

/// CSS selector of the element composited as the DOM overlay
pub const DOM_OVERLAY_ROOT: &str = "body";

/// Default box size in centimetres (width, height, depth)
pub const DEFAULT_BOX_SIZE_CM: [f32; 3] = [30.0, 30.0, 30.0];

/// Dimension inputs are centimetres, the scene is metres
pub const CENTIMETRES_TO_METRES: f32 = 0.01;

/// Native preview keyboard step in centimetres
pub const DIMENSION_STEP_CM: f32 = 5.0;

/// Smallest dimension the native preview will step down to
pub const MIN_DIMENSION_CM: f32 = 1.0;

/// Settings file relative to the asset root
pub const SETTINGS_PATH: &str = "ar_settings.json";
