//! Per-session tracking state.

use super::capture::CaptureState;
use super::crop::ContainmentTracker;
use super::state::FaceTrackingState;
use faceframe_models::{Containment, Rect};
use uuid::Uuid;

/// Mutable state for one camera session.
///
/// Created when tracking starts, reset on camera stop or switch, and
/// mutated once per observation tick.
#[derive(Debug, Clone)]
pub struct TrackingSession {
    /// Identifier used to correlate log events
    pub id: Uuid,
    /// Face presence state
    pub state: FaceTrackingState,
    /// Most recent raw face observation in normalized space
    pub last_face_rect: Option<Rect>,
    /// Most recent stabilized crop rectangle in layer space
    pub last_crop_rect: Option<Rect>,
    /// Containment edge detector
    pub containment: ContainmentTracker,
    /// Photo capture progress
    pub capture: CaptureState,
}

impl Default for TrackingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackingSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: FaceTrackingState::default(),
            last_face_rect: None,
            last_crop_rect: None,
            containment: ContainmentTracker::new(),
            capture: CaptureState::Idle,
        }
    }

    /// When the face went missing, while a loss is pending.
    pub fn face_lost_since(&self) -> Option<f64> {
        self.state.face_lost_since()
    }

    /// Return to defaults under a fresh id.
    ///
    /// Returns the containment change caused by the reset, if any.
    pub fn reset(&mut self) -> Option<Containment> {
        let change = self.containment.reset();
        let containment = self.containment;
        *self = Self::new();
        self.containment = containment;
        change
    }
}
