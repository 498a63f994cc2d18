//! Raw detector output as delivered by the capture pipeline.

use crate::rect::{Rect, Size};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single detected face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FaceObservation {
    /// Face bounds in capture pixels, origin bottom-left (Y-up)
    pub bounds: Rect,
    /// Detector reports a smile
    #[serde(default)]
    pub has_smile: bool,
    /// Detector-assigned tracking identifier, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_id: Option<u32>,
}

impl FaceObservation {
    /// Create an observation without smile or tracking information.
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            has_smile: false,
            tracking_id: None,
        }
    }

    /// Mark the observation as smiling.
    pub fn with_smile(mut self, has_smile: bool) -> Self {
        self.has_smile = has_smile;
        self
    }

    /// Bounds divided by the capture size, or `None` for an empty capture size.
    pub fn normalized_bounds(&self, capture_size: Size) -> Option<Rect> {
        if capture_size.is_empty() {
            return None;
        }
        Some(self.bounds / capture_size)
    }
}

/// Everything the detector produced for one frame or metadata callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ObservationTick {
    /// Monotonic timestamp in seconds
    pub timestamp: f64,
    /// Pixel extent of the frame the detector ran on
    pub capture_size: Size,
    /// All faces found in the frame; empty when none
    #[serde(default)]
    pub faces: Vec<FaceObservation>,
}

impl ObservationTick {
    pub fn new(timestamp: f64, capture_size: Size, faces: Vec<FaceObservation>) -> Self {
        Self {
            timestamp,
            capture_size,
            faces,
        }
    }

    /// A tick with no detected faces.
    pub fn empty(timestamp: f64, capture_size: Size) -> Self {
        Self::new(timestamp, capture_size, Vec::new())
    }
}
