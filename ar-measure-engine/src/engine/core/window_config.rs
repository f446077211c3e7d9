use bevy::prelude::*;
use bevy::window::{CompositeAlphaMode, PresentMode};

/// Canvas element the engine renders into on the host page.
#[cfg(target_arch = "wasm32")]
const CANVAS_SELECTOR: &str = "#ar-canvas";

pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            canvas: Some(CANVAS_SELECTOR.into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            present_mode: PresentMode::AutoVsync,
            transparent: true,
            composite_alpha_mode: CompositeAlphaMode::PreMultiplied,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "AR Measuring Box (preview)".into(),
            present_mode: PresentMode::AutoVsync,
            composite_alpha_mode: CompositeAlphaMode::Auto,
            ..default()
        }
    }
}
