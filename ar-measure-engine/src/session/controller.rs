use bevy::prelude::*;
use serde::Serialize;

use super::dimensions::BoxDimensions;
use super::hit_test::{HitTestOutcome, HitTestSubscription, SessionId};
use super::pose::Pose;

/// Placement progress within the AR session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementState {
    /// No session, nothing placed.
    #[default]
    Idle,
    /// Session active, scanning for a surface.
    Searching,
    /// Box sits at a fixed pose.
    Placed,
}

impl PlacementState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Searching => "searching",
            Self::Placed => "placed",
        }
    }
}

/// What a tap did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectOutcome {
    /// No surface under the reticle, or no session.
    Ignored,
    /// First placement of the session.
    Placed(Pose),
    /// Box moved to a new surface pose.
    Moved(Pose),
}

/// Side effects the caller must perform after a frame tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameOutcome {
    /// Ask the pose-source provider for a hit-test source for this session.
    pub request_hit_test_source: Option<SessionId>,
}

/// Owns every piece of placement state for the AR session.
///
/// All session inputs funnel through the methods here; the ECS systems only
/// translate events in and mirror the result onto the reticle and box
/// entities.
#[derive(Resource, Debug, Clone)]
pub struct ArSessionController {
    state: PlacementState,
    session: SessionId,
    hit_test: HitTestSubscription,
    reticle_pose: Option<Pose>,
    object_pose: Option<Pose>,
    dimensions: BoxDimensions,
    /// Set by the first explicit size change; startup defaults never override it.
    dimensions_chosen: bool,
    overlay_visible: bool,
}

impl Default for ArSessionController {
    fn default() -> Self {
        Self {
            state: PlacementState::Idle,
            session: 0,
            hit_test: HitTestSubscription::Unrequested,
            reticle_pose: None,
            object_pose: None,
            dimensions: BoxDimensions::default(),
            dimensions_chosen: false,
            overlay_visible: false,
        }
    }
}

impl ArSessionController {
    /// Begin a new session. A start while one is already active resets it first.
    pub fn session_started(&mut self) {
        if self.is_session_active() {
            warn!(
                "Session {} still active on start, resetting before session {}",
                self.session,
                self.session.wrapping_add(1)
            );
            self.reset();
        }

        self.session = self.session.wrapping_add(1);
        self.state = PlacementState::Searching;
        self.reticle_pose = None;
        self.overlay_visible = false;
        self.hit_test = HitTestSubscription::Unrequested;
        info!("AR session {} started", self.session);
    }

    /// End the session from any state. Returns whether a session was active.
    pub fn session_ended(&mut self) -> bool {
        let was_active = self.is_session_active();
        self.reset();
        if was_active {
            info!("AR session {} ended", self.session);
        }
        was_active
    }

    /// Apply the pose sampled for one rendered frame.
    pub fn frame_tick(&mut self, pose: Option<Pose>) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();
        if !self.is_session_active() {
            return outcome;
        }

        if !self.hit_test.is_requested() {
            self.hit_test = HitTestSubscription::Pending;
            outcome.request_hit_test_source = Some(self.session);
            debug!("Requesting hit-test source for session {}", self.session);
        }

        // Poses arriving before the subscription resolves are not trusted.
        self.reticle_pose = if self.hit_test.is_ready() { pose } else { None };
        outcome
    }

    /// Record the asynchronous result of a hit-test source request.
    ///
    /// Returns `false` when the result is stale (another session) or
    /// duplicate and was ignored.
    pub fn hit_test_source_resolved(
        &mut self,
        session: SessionId,
        outcome: &HitTestOutcome,
    ) -> bool {
        if !self.is_session_active() || session != self.session {
            debug!(
                "Ignoring hit-test result for session {} (current {}, {})",
                session,
                self.session,
                self.state.as_str()
            );
            return false;
        }
        if self.hit_test != HitTestSubscription::Pending {
            debug!(
                "Ignoring hit-test result while subscription is {}",
                self.hit_test.as_str()
            );
            return false;
        }

        match outcome {
            HitTestOutcome::Ready => {
                self.hit_test = HitTestSubscription::Ready;
                info!("Hit-test source ready for session {}", session);
            }
            HitTestOutcome::Failed(reason) => {
                self.hit_test = HitTestSubscription::Failed;
                warn!(
                    "Hit-test source failed for session {}: {}. No surfaces will be detected until the next session",
                    session, reason
                );
            }
        }
        true
    }

    /// Handle a user tap.
    pub fn select(&mut self) -> SelectOutcome {
        let Some(pose) = self.reticle_pose else {
            return SelectOutcome::Ignored;
        };

        match self.state {
            PlacementState::Searching => {
                self.object_pose = Some(pose);
                self.state = PlacementState::Placed;
                self.overlay_visible = true;
                info!("Box placed at {:?}", pose.translation);
                SelectOutcome::Placed(pose)
            }
            PlacementState::Placed => {
                self.object_pose = Some(pose);
                debug!("Box moved to {:?}", pose.translation);
                SelectOutcome::Moved(pose)
            }
            PlacementState::Idle => SelectOutcome::Ignored,
        }
    }

    /// Replace the box size. Never affects placement.
    pub fn set_dimensions(&mut self, dimensions: BoxDimensions) {
        self.dimensions = dimensions;
        self.dimensions_chosen = true;
    }

    /// Replace the built-in size with a configured default.
    ///
    /// Returns `false` and keeps the current size once a size has been chosen
    /// or while a session is running.
    pub fn seed_dimensions(&mut self, dimensions: BoxDimensions) -> bool {
        if self.dimensions_chosen || self.is_session_active() {
            debug!(
                "Keeping box size {} over configured default {}",
                self.dimensions.label(),
                dimensions.label()
            );
            return false;
        }
        self.dimensions = dimensions;
        true
    }

    fn reset(&mut self) {
        self.state = PlacementState::Idle;
        self.hit_test = HitTestSubscription::Unrequested;
        self.reticle_pose = None;
        self.object_pose = None;
        self.overlay_visible = false;
    }

    pub fn state(&self) -> PlacementState {
        self.state
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn is_session_active(&self) -> bool {
        self.state != PlacementState::Idle
    }

    pub fn hit_test(&self) -> HitTestSubscription {
        self.hit_test
    }

    /// Latest tracked surface pose, kept up to date even while placed.
    pub fn reticle_pose(&self) -> Option<Pose> {
        self.reticle_pose
    }

    pub fn reticle_visible(&self) -> bool {
        self.state == PlacementState::Searching && self.reticle_pose.is_some()
    }

    pub fn object_pose(&self) -> Option<Pose> {
        match self.state {
            PlacementState::Placed => self.object_pose,
            _ => None,
        }
    }

    pub fn object_in_scene(&self) -> bool {
        self.state == PlacementState::Placed
    }

    /// Full box transform (pose plus metre scale) while placed.
    pub fn object_transform(&self) -> Option<Transform> {
        self.object_pose()
            .map(|pose| pose.to_transform().with_scale(self.dimensions.scale()))
    }

    pub fn dimensions(&self) -> BoxDimensions {
        self.dimensions
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }
}
