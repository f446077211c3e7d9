//! AR placement session: surface tracking, box placement and overlay state.
//!
//! ## Architecture
//!
//! ```text
//! host / native preview ──ArInput──> drive_session ──> ArSessionController
//!                                         │                   │
//!                                  SessionNotice     apply_placement_visuals
//!                                         │                   │
//!                             rpc bridge / overlay UI   Reticle + MeasureBox
//! ```
//!
//! ### Placement states
//! - `Idle`: no session. Reticle and box hidden.
//! - `Searching`: session active. The reticle follows the detected surface;
//!   a tap places the box at the reticle and shows the overlay.
//! - `Placed`: the box stays put until the next tap on a detected surface
//!   moves it. Surface tracking continues with the reticle hidden.
//!
//! Ending the session returns to `Idle` from any state and hides the box,
//! which is kept alive and reused by the next session.
//!
//! ### Hit-test subscription
//! The first frame of every session emits
//! `SessionNotice::HitTestSourceRequested`. The provider answers with
//! `ArInput::HitTestSource` carrying the same session id. Until then, and
//! forever after a failure, frames are treated as having no surface.

/// Placement state machine owning all session state.
pub mod controller;

/// Box size in centimetres and its conversion to scene scale.
pub mod dimensions;

/// Errors for malformed pose matrices and dimension values.
pub mod error;

/// Input and notice events crossing the session boundary.
pub mod events;

/// Hit-test source subscription lifecycle.
pub mod hit_test;

/// Desktop stand-ins for the AR session, pose source and dimension inputs (native only).
#[cfg(not(target_arch = "wasm32"))]
pub mod native_preview;

/// Rigid transforms decoded from host matrices.
pub mod pose;

/// Systems applying inputs to the controller and mirroring it onto the scene.
pub mod systems;

use bevy::prelude::*;

pub use controller::{ArSessionController, PlacementState};
pub use events::{ArInput, SessionNotice};

use crate::engine::scene::measure_box::spawn_measure_box;
use crate::engine::scene::reticle::spawn_reticle;
use systems::{apply_placement_visuals, drive_session};

/// Systems that consume `ArInput`. Producers run before, notice consumers after.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArSessionSet;

/// Registers the session controller, its events, and the reticle and box entities.
pub struct ArSessionPlugin;

impl Plugin for ArSessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ArSessionController>()
            .add_event::<ArInput>()
            .add_event::<SessionNotice>()
            .add_systems(Startup, spawn_placement_visuals)
            .add_systems(
                Update,
                (drive_session, apply_placement_visuals)
                    .chain()
                    .in_set(ArSessionSet),
            );
    }
}

fn spawn_placement_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    controller: Res<ArSessionController>,
) {
    spawn_reticle(&mut commands, &mut meshes, &mut materials);
    spawn_measure_box(
        &mut commands,
        &mut meshes,
        &mut materials,
        controller.dimensions(),
    );
}
