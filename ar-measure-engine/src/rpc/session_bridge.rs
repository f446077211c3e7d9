use bevy::prelude::*;
use serde_json::json;

use super::web_rpc::WebRpcInterface;
use crate::session::SessionNotice;

/// Relay session notices to the host page.
///
/// The host owns the DOM overlay, the dimension label and the WebXR
/// hit-test source; these notifications are everything it needs to keep
/// them in step with the engine.
pub fn forward_session_notices(
    mut notices: EventReader<SessionNotice>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for notice in notices.read() {
        let (method, params) = notice_to_notification(notice);
        rpc_interface.send_notification(method, params);
    }
}

fn notice_to_notification(notice: &SessionNotice) -> (&'static str, serde_json::Value) {
    match notice {
        SessionNotice::HitTestSourceRequested { session } => (
            "hit_test_source_requested",
            json!({ "session": session, "space": "viewer" }),
        ),
        SessionNotice::PlacementChanged { state, object } => (
            "placement_changed",
            json!({
                "state": state,
                "object": object.map(|pose| pose.to_json()),
            }),
        ),
        SessionNotice::OverlayVisibility { visible } => {
            ("overlay_visibility_changed", json!({ "visible": visible }))
        }
        SessionNotice::DimensionsLabel { label } => {
            ("dimensions_label_changed", json!({ "label": label }))
        }
    }
}
