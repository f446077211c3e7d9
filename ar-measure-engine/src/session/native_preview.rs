//! Desktop preview of the AR session.
//!
//! Stands in for the browser host so placement can be tried without a
//! headset: the mouse ray against the floor plane acts as the hit-test
//! result, the keyboard drives the session lifecycle and box size, and
//! hit-test source requests are granted one frame later.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::session::{DIMENSION_STEP_CM, MIN_DIMENSION_CM};

use super::controller::ArSessionController;
use super::dimensions::BoxDimensions;
use super::events::{ArInput, SessionNotice};
use super::hit_test::HitTestOutcome;
use super::pose::Pose;
use super::ArSessionSet;

/// Floor height of the simulated surface.
const FLOOR_HEIGHT: f32 = 0.0;

pub struct NativePreviewPlugin;

impl Plugin for NativePreviewPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                grant_hit_test_requests,
                session_keyboard_shortcuts,
                dimension_keyboard_shortcuts,
                floor_pose_source,
                select_on_click,
            )
                .chain()
                .before(ArSessionSet),
        );
    }
}

/// Answer hit-test source requests from the previous frame.
fn grant_hit_test_requests(
    mut notices: EventReader<SessionNotice>,
    mut inputs: EventWriter<ArInput>,
) {
    for notice in notices.read() {
        if let SessionNotice::HitTestSourceRequested { session } = notice {
            inputs.write(ArInput::HitTestSource {
                session: *session,
                outcome: HitTestOutcome::Ready,
            });
        }
    }
}

/// Enter toggles the session, Space taps.
fn session_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    controller: Res<ArSessionController>,
    mut inputs: EventWriter<ArInput>,
) {
    if keyboard.just_pressed(KeyCode::Enter) {
        if controller.is_session_active() {
            inputs.write(ArInput::SessionEnded);
        } else {
            inputs.write(ArInput::SessionStarted);
        }
    }

    if keyboard.just_pressed(KeyCode::Space) {
        inputs.write(ArInput::Select);
    }
}

/// Q/A, W/S and E/D step width, height and depth.
fn dimension_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    controller: Res<ArSessionController>,
    mut inputs: EventWriter<ArInput>,
) {
    let step = |up: KeyCode, down: KeyCode| -> f32 {
        let mut delta = 0.0;
        if keyboard.just_pressed(up) {
            delta += DIMENSION_STEP_CM;
        }
        if keyboard.just_pressed(down) {
            delta -= DIMENSION_STEP_CM;
        }
        delta
    };

    let delta = Vec3::new(
        step(KeyCode::KeyQ, KeyCode::KeyA),
        step(KeyCode::KeyW, KeyCode::KeyS),
        step(KeyCode::KeyE, KeyCode::KeyD),
    );
    if delta == Vec3::ZERO {
        return;
    }

    let current = controller.dimensions();
    inputs.write(ArInput::Dimensions(stepped_dimensions(current, delta)));
}

fn stepped_dimensions(current: BoxDimensions, delta: Vec3) -> BoxDimensions {
    BoxDimensions::new(
        (current.width + delta.x).max(MIN_DIMENSION_CM),
        (current.height + delta.y).max(MIN_DIMENSION_CM),
        (current.depth + delta.z).max(MIN_DIMENSION_CM),
    )
}

/// Cast the cursor into the scene and report where it meets the floor.
fn floor_pose_source(
    controller: Res<ArSessionController>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Camera), With<Camera3d>>,
    mut inputs: EventWriter<ArInput>,
) {
    if !controller.is_session_active() {
        return;
    }

    let hit = (|| {
        let window = windows.single().ok()?;
        let cursor = window.cursor_position()?;
        let (camera_transform, camera) = cameras.single().ok()?;
        let ray = camera.viewport_to_world(camera_transform, cursor).ok()?;
        floor_intersection(ray.origin, *ray.direction)
    })();

    inputs.write(ArInput::Frame {
        hit: hit.map(Pose::from_translation),
        viewer: None,
    });
}

fn floor_intersection(origin: Vec3, direction: Vec3) -> Option<Vec3> {
    if direction.y.abs() < 0.001 {
        return None;
    }
    let t = (FLOOR_HEIGHT - origin.y) / direction.y;
    (t > 0.0).then(|| origin + direction * t)
}

fn select_on_click(buttons: Res<ButtonInput<MouseButton>>, mut inputs: EventWriter<ArInput>) {
    if buttons.just_pressed(MouseButton::Left) {
        inputs.write(ArInput::Select);
    }
}
