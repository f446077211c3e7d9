//! Runtime systems for diagnostics and the native overlay.

/// FPS notifications sent to the host page via RPC.
pub mod fps_tracking;

/// Native overlay showing the box size while placed (native only).
#[cfg(not(target_arch = "wasm32"))]
pub mod overlay_ui;
