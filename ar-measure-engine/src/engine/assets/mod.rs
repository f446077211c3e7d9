//! Asset types loaded at start-up.

/// Session configuration file: WebXR features, overlay root and default box size.
pub mod session_settings;
