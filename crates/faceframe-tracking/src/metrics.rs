//! Metrics emitted by the tracking core.
//!
//! Recording is a no-op until the host installs a `metrics` recorder.

use faceframe_models::Containment;
use metrics::{counter, histogram};

/// Metric names as constants for consistency.
pub mod names {
    pub const TICKS_TOTAL: &str = "faceframe_ticks_total";
    pub const TICK_DURATION_SECONDS: &str = "faceframe_tick_duration_seconds";
    pub const FACES_CONFIRMED_LOST_TOTAL: &str = "faceframe_faces_confirmed_lost_total";
    pub const CONTAINMENT_CHANGES_TOTAL: &str = "faceframe_containment_changes_total";
    pub const CAPTURES_REQUESTED_TOTAL: &str = "faceframe_captures_requested_total";
    pub const CAPTURES_COMPLETED_TOTAL: &str = "faceframe_captures_completed_total";
}

/// Record a processed observation tick.
pub fn record_tick(face_present: bool, duration_secs: f64) {
    let labels = [("face", if face_present { "present" } else { "absent" })];
    counter!(names::TICKS_TOTAL, &labels).increment(1);
    histogram!(names::TICK_DURATION_SECONDS).record(duration_secs);
}

/// Record a face confirmed lost after the debounce timeout.
pub fn record_face_lost() {
    counter!(names::FACES_CONFIRMED_LOST_TOTAL).increment(1);
}

/// Record a containment change.
pub fn record_containment_change(containment: Containment) {
    let labels = [("to", containment.as_str())];
    counter!(names::CONTAINMENT_CHANGES_TOTAL, &labels).increment(1);
}

/// Record a photo capture request.
pub fn record_capture_requested(trigger: &'static str) {
    let labels = [("trigger", trigger)];
    counter!(names::CAPTURES_REQUESTED_TOTAL, &labels).increment(1);
}

/// Record a completed photo crop.
pub fn record_capture_completed(used_face_crop: bool) {
    let labels = [("crop", if used_face_crop { "face" } else { "viewport" })];
    counter!(names::CAPTURES_COMPLETED_TOTAL, &labels).increment(1);
}
