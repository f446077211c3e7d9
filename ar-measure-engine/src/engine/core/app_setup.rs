use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::log::{Level, LogPlugin};
use bevy::pbr::wireframe::{WireframeConfig, WireframePlugin};
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::assets::session_settings::SessionSettings;
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::settings_loader::{
    SettingsLoader, apply_loaded_settings, start_settings_loading,
};
use crate::engine::scene::stage::{follow_viewer_pose, spawn_lighting, spawn_viewer_camera};
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::session::{ArSessionPlugin, ArSessionSet};

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::overlay_ui::{spawn_overlay_ui, update_overlay_ui};
#[cfg(not(target_arch = "wasm32"))]
use crate::session::native_preview::NativePreviewPlugin;

const LOG_FILTER: &str = "wgpu=error,naga=warn,ar_measure_engine=debug";

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers SessionSettings as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<SessionSettings>::new(&["json"]))
        .add_plugins(WireframePlugin::default())
        .insert_resource(WireframeConfig {
            global: false,
            default_color: Color::WHITE,
        })
        // Passthrough camera feed shows behind the canvas.
        .insert_resource(ClearColor(Color::NONE))
        .add_plugins(ArSessionPlugin)
        .add_plugins(WebRpcPlugin);

    // Desktop stand-ins for the WebXR host.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_plugins(NativePreviewPlugin)
            .add_systems(Startup, spawn_overlay_ui)
            .add_systems(Update, update_overlay_ui.after(ArSessionSet));
    }

    app.init_resource::<SettingsLoader>()
        .add_systems(Startup, (setup, start_settings_loading))
        .add_systems(
            Update,
            (
                apply_loaded_settings.before(ArSessionSet),
                follow_viewer_pose.after(ArSessionSet),
                fps_notification_system,
            ),
        );

    app
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    info!("=== AR MEASURING BOX ===");
    spawn_lighting(&mut commands);
    spawn_viewer_camera(&mut commands);
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        level: Level::INFO,
        filter: LOG_FILTER.to_string(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
