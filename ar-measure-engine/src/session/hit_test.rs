/// Generation counter identifying one AR session.
pub type SessionId = u32;

/// Lifecycle of the per-session hit-test source subscription.
///
/// The host resolves the subscription asynchronously; until it is `Ready`
/// every frame is treated as having no surface under the reticle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HitTestSubscription {
    #[default]
    Unrequested,
    Pending,
    Ready,
    Failed,
}

impl HitTestSubscription {
    /// Whether a request has already gone out for the current session.
    pub fn is_requested(&self) -> bool {
        !matches!(self, Self::Unrequested)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unrequested => "unrequested",
            Self::Pending => "pending",
            Self::Ready => "ready",
            Self::Failed => "failed",
        }
    }
}

/// Result reported by the pose-source provider for a subscription request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTestOutcome {
    Ready,
    Failed(String),
}
