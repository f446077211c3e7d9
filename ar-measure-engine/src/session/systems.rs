use bevy::prelude::*;

use super::controller::{ArSessionController, PlacementState};
use super::events::{ArInput, SessionNotice};
use super::pose::Pose;
use crate::engine::scene::measure_box::MeasureBox;
use crate::engine::scene::reticle::Reticle;

/// Observable controller fields compared before and after each input.
#[derive(PartialEq)]
struct Observed {
    state: PlacementState,
    object: Option<Pose>,
    overlay_visible: bool,
}

impl Observed {
    fn of(controller: &ArSessionController) -> Self {
        Self {
            state: controller.state(),
            object: controller.object_pose(),
            overlay_visible: controller.overlay_visible(),
        }
    }
}

/// Apply session inputs to the controller in arrival order and report what changed.
pub fn drive_session(
    mut inputs: EventReader<ArInput>,
    mut controller: ResMut<ArSessionController>,
    mut notices: EventWriter<SessionNotice>,
) {
    for input in inputs.read() {
        let before = Observed::of(&controller);

        match input {
            ArInput::SessionStarted => controller.session_started(),
            ArInput::SessionEnded => {
                controller.session_ended();
            }
            ArInput::HitTestSource { session, outcome } => {
                controller.hit_test_source_resolved(*session, outcome);
            }
            ArInput::Frame { hit, .. } => {
                let outcome = controller.frame_tick(*hit);
                if let Some(session) = outcome.request_hit_test_source {
                    notices.write(SessionNotice::HitTestSourceRequested { session });
                }
            }
            ArInput::Select => {
                controller.select();
            }
            ArInput::Dimensions(dimensions) => {
                controller.set_dimensions(*dimensions);
                notices.write(SessionNotice::DimensionsLabel {
                    label: dimensions.label(),
                });
            }
            ArInput::DefaultDimensions(dimensions) => {
                if controller.seed_dimensions(*dimensions) {
                    notices.write(SessionNotice::DimensionsLabel {
                        label: dimensions.label(),
                    });
                }
            }
        }

        let after = Observed::of(&controller);
        if after.state != before.state || after.object != before.object {
            notices.write(SessionNotice::PlacementChanged {
                state: after.state,
                object: after.object,
            });
        }
        if after.overlay_visible != before.overlay_visible {
            notices.write(SessionNotice::OverlayVisibility {
                visible: after.overlay_visible,
            });
        }
    }
}

/// Mirror controller state onto the reticle and box entities.
pub fn apply_placement_visuals(
    controller: Res<ArSessionController>,
    mut reticles: Query<(&mut Transform, &mut Visibility), (With<Reticle>, Without<MeasureBox>)>,
    mut boxes: Query<(&mut Transform, &mut Visibility), (With<MeasureBox>, Without<Reticle>)>,
) {
    if !controller.is_changed() {
        return;
    }

    if let Ok((mut transform, mut visibility)) = reticles.single_mut() {
        match controller.reticle_pose() {
            Some(pose) if controller.reticle_visible() => {
                *transform = pose.to_transform();
                *visibility = Visibility::Visible;
            }
            _ => *visibility = Visibility::Hidden,
        }
    }

    if let Ok((mut transform, mut visibility)) = boxes.single_mut() {
        // Scale follows the dimensions whether or not the box is placed.
        transform.scale = controller.dimensions().scale();
        match controller.object_pose() {
            Some(pose) => {
                transform.translation = pose.translation;
                transform.rotation = pose.rotation;
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}
