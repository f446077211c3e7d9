//! Core application setup.
//!
//! Builds the Bevy app with plugins for the AR session, host messaging and
//! platform-specific window and input configuration.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the AR session plugin, settings loading,
/// and platform-specific configurations.
pub mod app_setup;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures a transparent canvas for web targets and vsync settings.
pub mod window_config;
