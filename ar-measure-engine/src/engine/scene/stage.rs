use bevy::prelude::*;
use bevy::render::camera::ClearColorConfig;
use constants::render_settings::{
    CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, PREVIEW_EYE_DISTANCE, PREVIEW_EYE_HEIGHT,
    SKY_LIGHT_BRIGHTNESS, SKY_LIGHT_COLOUR,
};

use crate::session::events::ArInput;

#[derive(Component)]
pub struct ViewerCamera;

/// Camera rendering over the passthrough view, so the clear colour is fully transparent.
pub fn spawn_viewer_camera(commands: &mut Commands) {
    commands.spawn((
        Camera3d::default(),
        Camera {
            clear_color: ClearColorConfig::Custom(Color::NONE),
            ..default()
        },
        Projection::from(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Transform::from_xyz(0.0, PREVIEW_EYE_HEIGHT, PREVIEW_EYE_DISTANCE)
            .looking_at(Vec3::ZERO, Vec3::Y),
        ViewerCamera,
    ));
}

/// Sky-tinted ambient light plus a key light, approximating a hemisphere light.
pub fn spawn_lighting(commands: &mut Commands) {
    let [r, g, b, a] = SKY_LIGHT_COLOUR;
    commands.insert_resource(AmbientLight {
        color: Color::srgba(r, g, b, a),
        brightness: SKY_LIGHT_BRIGHTNESS,
        ..default()
    });

    commands.spawn((
        DirectionalLight {
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(0.5, 1.0, 0.25).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Move the camera to the latest viewer pose reported by the host.
pub fn follow_viewer_pose(
    mut inputs: EventReader<ArInput>,
    mut cameras: Query<&mut Transform, With<ViewerCamera>>,
) {
    let latest = inputs
        .read()
        .filter_map(|input| match input {
            ArInput::Frame {
                viewer: Some(pose), ..
            } => Some(*pose),
            _ => None,
        })
        .last();

    let Some(pose) = latest else {
        return;
    };
    let Ok(mut transform) = cameras.single_mut() else {
        return;
    };
    *transform = pose.to_transform();
}
