//! JSON-RPC 2.0 communication layer between the engine and its host page.
//!
//! The host page owns the WebXR session, the hit-test source and the DOM
//! overlay (sliders and size label). The engine owns placement state and
//! rendering. Messages travel via `postMessage` in both directions.
//!
//! ## Message Flow
//!
//! ```text
//! Host page (WebXR + DOM)            Bevy engine
//!        │                                │
//!        ├─ session_started ─────────────>│
//!        ├─ xr_frame {hit, viewer} ──────>│  every XR animation frame
//!        │<──── hit_test_source_requested ┤  once per session
//!        ├─ hit_test_source_ready ───────>│
//!        ├─ select ──────────────────────>│  XR controller select
//!        │<──────────── placement_changed ┤
//!        │<─────── overlay_visibility_changed
//!        ├─ set_dimensions ──────────────>│  slider input
//!        │<──────── dimensions_label_changed
//!        ├─ session_ended ───────────────>│
//! ```
//!
//! ## Methods
//!
//! Requests (with `id`) receive a response; notifications (no `id`) do not.
//!
//! ### Session
//! - `get_session_config`: required/optional features and overlay root
//! - `session_started`, `session_ended`: lifecycle signals
//! - `hit_test_source_ready`, `hit_test_source_failed`: `{session, reason?}`
//! - `xr_frame`: `{hit, viewer}` as column-major 4x4 matrices or `null`
//! - `select`: user tap
//!
//! ### Box
//! - `set_dimensions`: `{width, height, depth}` in centimetres, each > 0
//! - `get_placement_state`: controller snapshot
//!
//! ### Diagnostics
//! - `get_fps`: smoothed frame rate
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params

/// Forwards session notices to the host page as notifications.
pub mod session_bridge;

/// JSON-RPC 2.0 bidirectional communication system for host page integration.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
