use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::session::SETTINGS_PATH;

use crate::engine::assets::session_settings::SessionSettings;
use crate::session::ArInput;

#[derive(Resource, Default)]
pub struct SettingsLoader {
    handle: Option<Handle<SessionSettings>>,
    settled: bool,
}

// Start loading the settings file
pub fn start_settings_loading(mut loader: ResMut<SettingsLoader>, asset_server: Res<AssetServer>) {
    info!("Loading session settings from: {}", SETTINGS_PATH);
    loader.handle = Some(asset_server.load(SETTINGS_PATH));
}

/// Publish loaded settings, or keep the built-in defaults if the file cannot be read.
pub fn apply_loaded_settings(
    mut loader: ResMut<SettingsLoader>,
    asset_server: Res<AssetServer>,
    settings_assets: Res<Assets<SessionSettings>>,
    mut inputs: EventWriter<ArInput>,
    mut commands: Commands,
) {
    if loader.settled {
        return;
    }
    let Some(handle) = loader.handle.clone() else {
        return;
    };

    if let Some(settings) = settings_assets.get(&handle) {
        let settings = settings.clone().sanitized();
        info!(
            "Session settings loaded: required {:?}, optional {:?}, default box {}",
            settings.required_features,
            settings.optional_features,
            settings.default_dimensions_cm.label()
        );

        // The controller drops this if the user already picked a size.
        inputs.write(ArInput::DefaultDimensions(settings.default_dimensions_cm));
        commands.insert_resource(settings);
        loader.settled = true;
        return;
    }

    if let LoadState::Failed(error) = asset_server.load_state(&handle) {
        warn!("Session settings unavailable ({error}), using built-in defaults");
        loader.settled = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::measure_box::MeasureBox;
    use crate::session::dimensions::BoxDimensions;
    use crate::session::{ArSessionController, ArSessionPlugin, ArSessionSet, SessionNotice};
    use bevy_common_assets::json::JsonAssetPlugin;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .add_plugins(JsonAssetPlugin::<SessionSettings>::new(&["json"]))
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<SessionSettings>()
            .init_resource::<SettingsLoader>()
            .add_plugins(ArSessionPlugin)
            .add_systems(Update, apply_loaded_settings.before(ArSessionSet));
        app.update();
        app
    }

    /// Make `settings` the loaded asset, as if the file had just arrived.
    fn finish_loading(app: &mut App, settings: SessionSettings) {
        let handle = app
            .world_mut()
            .resource_mut::<Assets<SessionSettings>>()
            .add(settings);
        app.world_mut().resource_mut::<SettingsLoader>().handle = Some(handle);
    }

    fn settings_with_size(dimensions: BoxDimensions) -> SessionSettings {
        SessionSettings {
            default_dimensions_cm: dimensions,
            ..default()
        }
    }

    fn box_scale(app: &mut App) -> Vec3 {
        let mut query = app
            .world_mut()
            .query_filtered::<&Transform, With<MeasureBox>>();
        query.single(app.world()).unwrap().scale
    }

    fn dimensions(app: &App) -> BoxDimensions {
        app.world().resource::<ArSessionController>().dimensions()
    }

    #[test]
    fn loaded_settings_seed_box_size_and_resource() {
        let mut app = test_app();
        let configured = BoxDimensions::new(40.0, 20.0, 10.0);
        finish_loading(&mut app, settings_with_size(configured));
        app.update();

        assert_eq!(dimensions(&app), configured);
        assert!((box_scale(&mut app) - Vec3::new(0.4, 0.2, 0.1)).abs().max_element() < 1e-6);
        assert_eq!(
            app.world().resource::<SessionSettings>().default_dimensions_cm,
            configured
        );

        let notices: Vec<_> = app
            .world_mut()
            .resource_mut::<Events<SessionNotice>>()
            .drain()
            .collect();
        assert!(notices.contains(&SessionNotice::DimensionsLabel {
            label: "40 x 20 x 10 cm".to_string(),
        }));
        assert!(app.world().resource::<SettingsLoader>().settled);
    }

    #[test]
    fn size_chosen_before_settings_arrive_is_kept() {
        let mut app = test_app();
        let chosen = BoxDimensions::new(25.0, 30.0, 15.0);
        app.world_mut().send_event(ArInput::Dimensions(chosen));
        app.update();

        finish_loading(&mut app, SessionSettings::default());
        app.update();
        app.update();

        assert_eq!(dimensions(&app), chosen);
        assert!((box_scale(&mut app) - Vec3::new(0.25, 0.30, 0.15)).abs().max_element() < 1e-6);
        assert!(app.world().resource::<SettingsLoader>().settled);
    }

    #[test]
    fn invalid_configured_size_keeps_built_in_default() {
        let mut app = test_app();
        finish_loading(
            &mut app,
            settings_with_size(BoxDimensions::new(-10.0, 0.0, 30.0)),
        );
        app.update();

        assert_eq!(dimensions(&app), BoxDimensions::default());
        assert!((box_scale(&mut app) - Vec3::splat(0.3)).abs().max_element() < 1e-6);
        assert_eq!(
            app.world().resource::<SessionSettings>().default_dimensions_cm,
            BoxDimensions::default()
        );
    }

    #[test]
    fn missing_settings_file_falls_back_to_defaults() {
        let mut app = test_app();
        let handle = app
            .world()
            .resource::<AssetServer>()
            .load::<SessionSettings>("does_not_exist.json");
        app.world_mut().resource_mut::<SettingsLoader>().handle = Some(handle);

        // The failure is reported by the IO task pool, so give it a few frames.
        for _ in 0..500 {
            app.update();
            if app.world().resource::<SettingsLoader>().settled {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(2));
        }

        assert!(app.world().resource::<SettingsLoader>().settled);
        assert_eq!(dimensions(&app), BoxDimensions::default());
        assert_eq!(
            *app.world().resource::<SessionSettings>(),
            SessionSettings::default()
        );
    }
}
