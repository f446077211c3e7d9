use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::assets::session_settings::SessionSettings;
use crate::session::dimensions::BoxDimensions;
use crate::session::hit_test::{HitTestOutcome, SessionId};
use crate::session::pose::Pose;
use crate::session::{ArInput, ArSessionController, ArSessionSet};

use super::session_bridge::forward_session_notices;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure. Requests without an `id` are notifications.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication between the host page and Bevy.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the host page.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }

    /// Notifications queued but not yet transmitted.
    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }
}

/// Plugin establishing the WebRPC communication layer between the host page and the engine.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .init_resource::<SessionSettings>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (process_incoming_messages, handle_rpc_messages)
                    .chain()
                    .before(ArSessionSet),
            )
            .add_systems(
                Update,
                (forward_session_notices, send_outgoing_messages)
                    .chain()
                    .after(ArSessionSet),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Filter messages to ensure they contain string data.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        error!("Window object not available, host messages will be ignored");
        return;
    };
    if let Err(e) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from the host page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Read-only engine state handlers may report back.
pub struct RpcContext<'a> {
    pub controller: &'a ArSessionController,
    pub settings: &'a SessionSettings,
    pub fps: f32,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    controller: Res<ArSessionController>,
    settings: Res<SessionSettings>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut session_inputs: EventWriter<ArInput>,
) {
    let context = RpcContext {
        controller: &controller,
        settings: &settings,
        fps: current_fps(&diagnostics),
    };

    for event in events.read() {
        let mut inputs = Vec::new();
        let response = handle_rpc_message(&event.content, &context, &mut inputs);
        session_inputs.write_batch(inputs);
        if let Some(response) = response {
            rpc_interface.queue_response(response);
        }
    }
}

/// Parse and dispatch one raw message. Returns a response when the message carried an `id`.
pub fn handle_rpc_message(
    content: &str,
    context: &RpcContext,
    inputs: &mut Vec<ArInput>,
) -> Option<RpcResponse> {
    let request = match serde_json::from_str::<RpcRequest>(content) {
        Ok(request) => request,
        Err(parse_error) => {
            warn!("Discarding malformed RPC message: {}", parse_error);
            return None;
        }
    };

    if request.jsonrpc != "2.0" {
        warn!("Unsupported JSON-RPC version: {}", request.jsonrpc);
        return request.id.map(|id| {
            create_error_response(id, -32600, "Invalid request", Some(serde_json::json!({
                "jsonrpc": request.jsonrpc
            })))
        });
    }

    handle_rpc_request(&request, context, inputs)
}

/// Handle individual RPC request and generate response based on method.
fn handle_rpc_request(
    request: &RpcRequest,
    context: &RpcContext,
    inputs: &mut Vec<ArInput>,
) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "get_session_config" => handle_get_session_config(context.settings),
        "session_started" => push_input(inputs, ArInput::SessionStarted),
        "session_ended" => push_input(inputs, ArInput::SessionEnded),
        "hit_test_source_ready" => handle_hit_test_source(&request.params, true, inputs),
        "hit_test_source_failed" => handle_hit_test_source(&request.params, false, inputs),
        "xr_frame" => handle_xr_frame(&request.params, inputs),
        "select" => push_input(inputs, ArInput::Select),
        "set_dimensions" => handle_set_dimensions(&request.params, inputs),
        "get_placement_state" => handle_get_placement_state(context.controller),
        "get_fps" => Ok(serde_json::json!({ "fps": context.fps })),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return request.id.clone().map(|id| {
                create_error_response(
                    id,
                    -32601,
                    "Method not found",
                    Some(serde_json::json!({"method": request.method})),
                )
            });
        }
    };

    if let Err(error) = &result {
        warn!("RPC {} rejected: {}", request.method, error.message);
    }

    // Notifications get no response, success or not.
    let id = request.id.clone()?;

    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

fn push_input(inputs: &mut Vec<ArInput>, input: ArInput) -> Result<serde_json::Value, RpcError> {
    inputs.push(input);
    Ok(serde_json::json!({ "success": true }))
}

/// Session init options the host passes to `navigator.xr.requestSession`.
fn handle_get_session_config(settings: &SessionSettings) -> Result<serde_json::Value, RpcError> {
    Ok(serde_json::json!({
        "mode": "immersive-ar",
        "session_init": settings.session_init(),
        "default_dimensions_cm": settings.default_dimensions_cm,
    }))
}

/// Resolve the pending hit-test source request for a session.
fn handle_hit_test_source(
    params: &serde_json::Value,
    ready: bool,
    inputs: &mut Vec<ArInput>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct HitTestSourceParams {
        session: SessionId,
        #[serde(default)]
        reason: Option<String>,
    }

    let parsed = serde_json::from_value::<HitTestSourceParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'session' parameter"))?;

    let outcome = if ready {
        HitTestOutcome::Ready
    } else {
        HitTestOutcome::Failed(
            parsed
                .reason
                .unwrap_or_else(|| "hit-test source request failed".to_string()),
        )
    };

    inputs.push(ArInput::HitTestSource {
        session: parsed.session,
        outcome,
    });
    Ok(serde_json::json!({ "success": true }))
}

/// One XR animation frame: hit-test pose (or null) and optional viewer pose,
/// both as column-major 4x4 matrices.
fn handle_xr_frame(
    params: &serde_json::Value,
    inputs: &mut Vec<ArInput>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct XrFrameParams {
        #[serde(default)]
        hit: Option<Vec<f32>>,
        #[serde(default)]
        viewer: Option<Vec<f32>>,
    }

    let parsed = serde_json::from_value::<XrFrameParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'hit' and 'viewer' as 16-element arrays or null"))?;

    let decode = |matrix: Option<Vec<f32>>, name: &str| -> Result<Option<Pose>, RpcError> {
        matrix
            .map(|m| Pose::from_column_major(&m))
            .transpose()
            .map_err(|e| RpcError::invalid_params(&format!("Invalid '{}' matrix: {}", name, e)))
    };

    let hit = decode(parsed.hit, "hit")?;
    let viewer = decode(parsed.viewer, "viewer")?;

    inputs.push(ArInput::Frame { hit, viewer });
    Ok(serde_json::json!({ "success": true }))
}

/// Apply slider values in centimetres.
fn handle_set_dimensions(
    params: &serde_json::Value,
    inputs: &mut Vec<ArInput>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct DimensionParams {
        width: f32,
        height: f32,
        depth: f32,
    }

    let parsed = serde_json::from_value::<DimensionParams>(params.clone()).map_err(|_| {
        RpcError::invalid_params("Expected numeric 'width', 'height' and 'depth' parameters")
    })?;

    let dimensions = BoxDimensions::try_new(parsed.width, parsed.height, parsed.depth)
        .map_err(|e| RpcError::invalid_params(&e.to_string()))?;

    inputs.push(ArInput::Dimensions(dimensions));
    Ok(serde_json::json!({
        "success": true,
        "label": dimensions.label()
    }))
}

/// Snapshot of the placement controller.
fn handle_get_placement_state(
    controller: &ArSessionController,
) -> Result<serde_json::Value, RpcError> {
    Ok(serde_json::json!({
        "state": controller.state(),
        "session": controller.session(),
        "hit_test_source": controller.hit_test().as_str(),
        "reticle_visible": controller.reticle_visible(),
        "overlay_visible": controller.overlay_visible(),
        "object": controller.object_pose().map(|pose| pose.to_json()),
        "dimensions_cm": controller.dimensions(),
        "label": controller.dimensions().label(),
    }))
}

fn current_fps(diagnostics: &DiagnosticsStore) -> f32 {
    diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps_diagnostic| fps_diagnostic.smoothed())
        .unwrap_or(0.0) as f32
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Send notifications first.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Send responses second to maintain order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window (the host page).
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No-op for non-WASM targets.
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::PlacementState;
    use serde_json::json;

    fn dispatch(message: serde_json::Value) -> (Option<RpcResponse>, Vec<ArInput>) {
        let controller = ArSessionController::default();
        let settings = SessionSettings::default();
        let context = RpcContext {
            controller: &controller,
            settings: &settings,
            fps: 60.0,
        };
        let mut inputs = Vec::new();
        let response = handle_rpc_message(&message.to_string(), &context, &mut inputs);
        (response, inputs)
    }

    fn identity_matrix_with_translation(x: f32, y: f32, z: f32) -> Vec<f32> {
        let mut matrix = Mat4::IDENTITY.to_cols_array().to_vec();
        matrix[12] = x;
        matrix[13] = y;
        matrix[14] = z;
        matrix
    }

    #[test]
    fn notifications_dispatch_without_response() {
        let (response, inputs) = dispatch(json!({
            "jsonrpc": "2.0",
            "method": "session_started"
        }));
        assert!(response.is_none());
        assert_eq!(inputs, vec![ArInput::SessionStarted]);

        let (_, inputs) = dispatch(json!({"jsonrpc": "2.0", "method": "select"}));
        assert_eq!(inputs, vec![ArInput::Select]);
    }

    #[test]
    fn set_dimensions_produces_input_and_label() {
        let (response, inputs) = dispatch(json!({
            "jsonrpc": "2.0",
            "method": "set_dimensions",
            "params": {"width": 25, "height": 30, "depth": 15},
            "id": 7
        }));

        assert_eq!(
            inputs,
            vec![ArInput::Dimensions(BoxDimensions::new(25.0, 30.0, 15.0))]
        );
        let response = response.unwrap();
        assert_eq!(response.id, Some(json!(7)));
        assert_eq!(response.result.unwrap()["label"], json!("25 x 30 x 15 cm"));
    }

    #[test]
    fn set_dimensions_rejects_non_positive_values() {
        let (response, inputs) = dispatch(json!({
            "jsonrpc": "2.0",
            "method": "set_dimensions",
            "params": {"width": 0, "height": 30, "depth": 15},
            "id": 1
        }));
        assert!(inputs.is_empty());
        assert_eq!(response.unwrap().error.unwrap().code, -32602);
    }

    #[test]
    fn set_dimensions_rejects_missing_fields() {
        let (response, inputs) = dispatch(json!({
            "jsonrpc": "2.0",
            "method": "set_dimensions",
            "params": {"width": 10},
            "id": 1
        }));
        assert!(inputs.is_empty());
        assert_eq!(response.unwrap().error.unwrap().code, -32602);
    }

    #[test]
    fn xr_frame_with_null_hit_is_no_surface() {
        let (_, inputs) = dispatch(json!({
            "jsonrpc": "2.0",
            "method": "xr_frame",
            "params": {"hit": null}
        }));
        assert_eq!(
            inputs,
            vec![ArInput::Frame {
                hit: None,
                viewer: None
            }]
        );
    }

    #[test]
    fn xr_frame_decodes_hit_and_viewer() {
        let (_, inputs) = dispatch(json!({
            "jsonrpc": "2.0",
            "method": "xr_frame",
            "params": {
                "hit": identity_matrix_with_translation(0.1, -1.4, -0.9),
                "viewer": identity_matrix_with_translation(0.0, 0.0, 0.0)
            }
        }));

        let [ArInput::Frame {
            hit: Some(hit),
            viewer: Some(viewer),
        }] = inputs.as_slice()
        else {
            panic!("expected a frame with both poses, got {:?}", inputs);
        };
        assert!((hit.translation - Vec3::new(0.1, -1.4, -0.9)).length() < 1e-6);
        assert_eq!(viewer.translation, Vec3::ZERO);
    }

    #[test]
    fn xr_frame_with_bad_matrix_is_rejected() {
        let (response, inputs) = dispatch(json!({
            "jsonrpc": "2.0",
            "method": "xr_frame",
            "params": {"hit": [1.0, 0.0, 0.0]},
            "id": "f1"
        }));
        assert!(inputs.is_empty());
        let error = response.unwrap().error.unwrap();
        assert_eq!(error.code, -32602);
        assert!(error.message.contains("16 elements"));
    }

    #[test]
    fn hit_test_results_carry_session_id() {
        let (_, inputs) = dispatch(json!({
            "jsonrpc": "2.0",
            "method": "hit_test_source_ready",
            "params": {"session": 3}
        }));
        assert_eq!(
            inputs,
            vec![ArInput::HitTestSource {
                session: 3,
                outcome: HitTestOutcome::Ready
            }]
        );

        let (_, inputs) = dispatch(json!({
            "jsonrpc": "2.0",
            "method": "hit_test_source_failed",
            "params": {"session": 3, "reason": "NotSupportedError"}
        }));
        assert_eq!(
            inputs,
            vec![ArInput::HitTestSource {
                session: 3,
                outcome: HitTestOutcome::Failed("NotSupportedError".to_string())
            }]
        );
    }

    #[test]
    fn session_config_lists_features() {
        let (response, _) = dispatch(json!({
            "jsonrpc": "2.0",
            "method": "get_session_config",
            "id": 1
        }));
        let result = response.unwrap().result.unwrap();
        assert_eq!(result["mode"], json!("immersive-ar"));
        assert_eq!(result["session_init"]["requiredFeatures"], json!(["hit-test"]));
        assert_eq!(result["session_init"]["optionalFeatures"], json!(["dom-overlay"]));
        assert_eq!(result["session_init"]["domOverlay"]["root"], json!("body"));
    }

    #[test]
    fn placement_state_snapshot() {
        let (response, _) = dispatch(json!({
            "jsonrpc": "2.0",
            "method": "get_placement_state",
            "id": 2
        }));
        let result = response.unwrap().result.unwrap();
        assert_eq!(result["state"], json!(PlacementState::Idle));
        assert_eq!(result["overlay_visible"], json!(false));
        assert_eq!(result["object"], json!(null));
        assert_eq!(result["label"], json!("30 x 30 x 30 cm"));
    }

    #[test]
    fn unknown_method_reports_not_found() {
        let (response, inputs) = dispatch(json!({
            "jsonrpc": "2.0",
            "method": "explode",
            "id": 9
        }));
        assert!(inputs.is_empty());
        assert_eq!(response.unwrap().error.unwrap().code, -32601);

        let (response, _) = dispatch(json!({"jsonrpc": "2.0", "method": "explode"}));
        assert!(response.is_none());
    }

    #[test]
    fn malformed_and_wrong_version_messages() {
        let controller = ArSessionController::default();
        let settings = SessionSettings::default();
        let context = RpcContext {
            controller: &controller,
            settings: &settings,
            fps: 0.0,
        };
        let mut inputs = Vec::new();
        assert!(handle_rpc_message("{not json", &context, &mut inputs).is_none());

        let (response, inputs) = dispatch(json!({
            "jsonrpc": "1.0",
            "method": "select",
            "id": 5
        }));
        assert!(inputs.is_empty());
        assert_eq!(response.unwrap().error.unwrap().code, -32600);
    }
}
