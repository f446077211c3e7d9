use bevy::prelude::*;

use super::controller::PlacementState;
use super::dimensions::BoxDimensions;
use super::hit_test::{HitTestOutcome, SessionId};
use super::pose::Pose;

/// Ordered stream of everything the outside world tells the AR session.
///
/// Taps, frames and lifecycle signals share one event type so a single
/// system applies them in arrival order.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum ArInput {
    SessionStarted,
    SessionEnded,
    HitTestSource {
        session: SessionId,
        outcome: HitTestOutcome,
    },
    /// One rendered frame: surface under the view ray, and the viewer pose if known.
    Frame {
        hit: Option<Pose>,
        viewer: Option<Pose>,
    },
    Select,
    /// Size chosen by the user.
    Dimensions(BoxDimensions),
    /// Size from the settings file. Dropped once the user has chosen one.
    DefaultDimensions(BoxDimensions),
}

/// Changes the AR session reports back to the host and UI layers.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum SessionNotice {
    HitTestSourceRequested {
        session: SessionId,
    },
    PlacementChanged {
        state: PlacementState,
        object: Option<Pose>,
    },
    OverlayVisibility {
        visible: bool,
    },
    DimensionsLabel {
        label: String,
    },
}
