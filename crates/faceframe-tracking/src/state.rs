//! Face presence state machine with loss debounce.
//!
//! Single-frame detector dropouts should not make the overlay jump, so a
//! missing face first enters [`FaceTrackingState::FaceLostPending`], which
//! freezes the stabilized rectangle. Only after the face has been missing
//! for the configured timeout is it confirmed lost and the stabilizer reset.
//!
//! ```text
//!            present                      absent
//! NoFace ─────────────▶ FaceTracked ─────────────▶ FaceLostPending
//!                        ▲      ▲                   │         │
//!                present │      └─────── present ───┘         │ elapsed >= timeout
//!                        │                                    ▼
//!                        └──────────────────────── FaceConfirmedLost
//! ```

use serde::{Deserialize, Serialize};

/// Tracking state for the primary face.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FaceTrackingState {
    /// No face has been seen since the session started
    #[default]
    NoFace,
    /// A face was present on the latest tick
    FaceTracked,
    /// The face went missing at `since`; stabilized output is frozen
    FaceLostPending { since: f64 },
    /// The face stayed missing past the timeout; stabilized output is cleared
    FaceConfirmedLost,
}

/// What the stabilizer should do on this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StabilizerAction {
    /// Feed the observed rectangle
    Update,
    /// Leave the stabilizer untouched
    Hold,
    /// Clear the stabilizer
    Reset,
}

/// Result of applying one tick to the state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub state: FaceTrackingState,
    pub action: StabilizerAction,
}

impl FaceTrackingState {
    /// Apply one observation tick.
    ///
    /// # Arguments
    /// * `face_present` - Whether the detector reported a face this tick
    /// * `now` - Tick timestamp in seconds
    /// * `timeout` - Seconds a face may be missing before it is confirmed lost
    pub fn next(self, face_present: bool, now: f64, timeout: f64) -> Transition {
        use FaceTrackingState::*;

        if face_present {
            return Transition {
                state: FaceTracked,
                action: StabilizerAction::Update,
            };
        }

        match self {
            NoFace | FaceConfirmedLost => Transition {
                state: self,
                action: StabilizerAction::Hold,
            },
            FaceTracked => Self::pending(now, now, timeout),
            FaceLostPending { since } => Self::pending(since, now, timeout),
        }
    }

    fn pending(since: f64, now: f64, timeout: f64) -> Transition {
        if now - since >= timeout {
            Transition {
                state: FaceTrackingState::FaceConfirmedLost,
                action: StabilizerAction::Reset,
            }
        } else {
            Transition {
                state: FaceTrackingState::FaceLostPending { since },
                action: StabilizerAction::Hold,
            }
        }
    }

    /// When the face went missing, while a loss is pending.
    pub fn face_lost_since(&self) -> Option<f64> {
        match self {
            FaceTrackingState::FaceLostPending { since } => Some(*since),
            _ => None,
        }
    }

    /// Whether stabilized output may exist in this state.
    pub fn has_face(&self) -> bool {
        matches!(
            self,
            FaceTrackingState::FaceTracked | FaceTrackingState::FaceLostPending { .. }
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FaceTrackingState::NoFace => "no_face",
            FaceTrackingState::FaceTracked => "face_tracked",
            FaceTrackingState::FaceLostPending { .. } => "face_lost_pending",
            FaceTrackingState::FaceConfirmedLost => "face_confirmed_lost",
        }
    }
}
