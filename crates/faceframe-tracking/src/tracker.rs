//! Per-tick coordinator tying the state machine, stabilizer, mapper and
//! crop derivation together.
//!
//! # Pipeline
//! ```text
//! face (normalized) ─▶ state machine ─▶ stabilizer ─▶ mapper ─▶ crop ─▶ containment
//! ```
//!
//! Stabilization runs in normalized space so that viewport or capture size
//! changes never disturb the filter state. The crop is derived from the
//! stabilized face in layer space, where the viewport aspect ratio applies.

use std::time::Instant;

use super::capture::{final_image_crop, CaptureCrop, CaptureState};
use super::crop::{classify_containment, derive_crop_rect, select_primary_face};
use super::error::{TrackingError, TrackingResult};
use super::mapping::{CoordinateMapper, LayerMapping};
use super::metrics;
use super::session::TrackingSession;
use super::stabilizer::RectLowpassStabilizer;
use super::state::{FaceTrackingState, StabilizerAction};
use faceframe_models::{Containment, ObservationTick, Rect, ScalePolicy, Size, TrackingConfig};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

/// Receives containment changes as they happen.
#[cfg_attr(test, mockall::automock)]
pub trait ContainmentObserver: Send {
    /// Called once per actual change, never for a repeated classification.
    fn containment_did_change(&mut self, containment: Containment);
}

/// Outputs of one observation tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickOutput {
    /// Timestamp of the tick in seconds
    pub timestamp: f64,
    /// Face presence state after the tick
    #[serde(flatten)]
    pub state: FaceTrackingState,
    /// Stabilized face in normalized space (Y-up)
    pub normalized_face_rect: Option<Rect>,
    /// Stabilized face in layer space (Y-down)
    pub face_rect: Option<Rect>,
    /// Crop rectangle in layer space
    pub crop_rect: Option<Rect>,
    /// Crop classification against the viewport
    pub containment: Containment,
    /// Set only on the tick where containment changed
    pub containment_changed: Option<Containment>,
    /// A photo capture was requested on this tick
    pub capture_requested: bool,
}

impl TickOutput {
    fn inactive(timestamp: f64, state: FaceTrackingState) -> Self {
        Self {
            timestamp,
            state,
            normalized_face_rect: None,
            face_rect: None,
            crop_rect: None,
            containment: Containment::None,
            containment_changed: None,
            capture_requested: false,
        }
    }
}

/// Face tracking coordinator.
///
/// Meant to be driven from a single observation callback; every call is a
/// bounded synchronous computation.
pub struct FaceTracker {
    config: TrackingConfig,
    stabilizer: RectLowpassStabilizer,
    mapper: CoordinateMapper,
    session: TrackingSession,
    observers: Vec<Box<dyn ContainmentObserver>>,
    running: bool,
    mirrored: bool,
}

impl std::fmt::Debug for FaceTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaceTracker")
            .field("config", &self.config)
            .field("session", &self.session)
            .field("observers", &self.observers.len())
            .field("running", &self.running)
            .field("mirrored", &self.mirrored)
            .finish()
    }
}

impl FaceTracker {
    /// Create a running tracker from a validated configuration.
    pub fn new(config: TrackingConfig) -> TrackingResult<Self> {
        config.validate()?;

        let stabilizer = RectLowpassStabilizer::new(config.rc, config.modulo);
        let mapper = CoordinateMapper::new(config.scale_policy, config.viewport);
        let session = TrackingSession::new();

        info!(
            session_id = %session.id,
            rc = config.rc,
            policy = %config.scale_policy,
            "Face tracker created"
        );

        Ok(Self {
            config,
            stabilizer,
            mapper,
            session,
            observers: Vec::new(),
            running: true,
            mirrored: false,
        })
    }

    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    pub fn session(&self) -> &TrackingSession {
        &self.session
    }

    pub fn session_id(&self) -> Uuid {
        self.session.id
    }

    pub fn state(&self) -> FaceTrackingState {
        self.session.state
    }

    pub fn containment(&self) -> Containment {
        self.session.containment.current()
    }

    pub fn capture_state(&self) -> CaptureState {
        self.session.capture
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    /// Current stabilized face in normalized space.
    pub fn stabilized_face(&self) -> Option<Rect> {
        self.stabilizer.value()
    }

    /// Register an observer for containment changes.
    pub fn add_observer(&mut self, observer: Box<dyn ContainmentObserver>) {
        self.observers.push(observer);
    }

    /// Update the viewport after a layout change.
    ///
    /// An empty viewport is accepted; layer outputs stay `None` until a
    /// non-empty one arrives.
    pub fn set_viewport(&mut self, viewport: Size) {
        debug!(width = viewport.width, height = viewport.height, "Viewport changed");
        self.config.viewport = viewport;
        self.mapper.set_viewport_size(viewport);
    }

    pub fn set_scale_policy(&mut self, policy: ScalePolicy) {
        self.config.scale_policy = policy;
        self.mapper.set_policy(policy);
    }

    /// Change the smoothing constant and wraparound on all four axes.
    ///
    /// Rejected values leave the current smoothing untouched.
    pub fn set_smoothing(&mut self, rc: f64, modulo: Option<f64>) -> TrackingResult<()> {
        let candidate = TrackingConfig {
            rc,
            modulo,
            ..self.config.clone()
        };
        candidate.validate()?;

        self.config = candidate;
        self.stabilizer.set_rc(rc);
        self.stabilizer.set_modulo(modulo);
        Ok(())
    }

    /// Start a fresh session.
    pub fn start(&mut self) -> Option<Containment> {
        let change = self.reset_session();
        self.running = true;
        info!(session_id = %self.session.id, "Tracking session started");
        change
    }

    /// Stop tracking. Returns the containment change caused by stopping.
    pub fn stop(&mut self) -> Option<Containment> {
        let stopped = self.session.id;
        let change = self.reset_session();
        self.running = false;
        info!(session_id = %stopped, "Tracking session stopped");
        change
    }

    /// Switch to another camera whose preview is `mirrored` or not.
    pub fn switch_camera(&mut self, mirrored: bool) -> Option<Containment> {
        let change = self.reset_session();
        self.mirrored = mirrored;
        info!(session_id = %self.session.id, mirrored, "Camera switched");
        change
    }

    fn reset_session(&mut self) -> Option<Containment> {
        self.stabilizer.reset();
        let change = self.session.reset();
        if let Some(containment) = change {
            self.notify_containment(containment);
        }
        change
    }

    /// Process the primary face of a detector callback.
    ///
    /// The largest face is tracked. When smile capture is enabled and that
    /// face smiles, a capture is requested.
    pub fn process_tick(&mut self, tick: &ObservationTick) -> TickOutput {
        let primary = select_primary_face(&tick.faces);
        let face = primary.and_then(|f| f.normalized_bounds(tick.capture_size));
        if primary.is_some() && face.is_none() {
            warn!(
                width = tick.capture_size.width,
                height = tick.capture_size.height,
                "Dropping face observed on an empty capture frame"
            );
        }

        let mut output = self.observation_tick(face, tick.capture_size, tick.timestamp);

        let smiling = face.is_some() && primary.is_some_and(|f| f.has_smile);
        if self.config.capture_when_smiling && smiling {
            output.capture_requested = self.begin_capture("smile");
        }

        output
    }

    /// Process one observation of the primary face in normalized space.
    pub fn observation_tick(&mut self, face: Option<Rect>, capture_size: Size, timestamp: f64) -> TickOutput {
        if !self.running {
            return TickOutput::inactive(timestamp, self.session.state);
        }

        if !timestamp.is_finite() {
            warn!(session_id = %self.session.id, timestamp, "Ignoring tick with non-finite timestamp");
            return self.held_output(capture_size, timestamp);
        }

        let started = Instant::now();
        let face = face.filter(Rect::is_finite);

        let previous = self.session.state;
        let transition = previous.next(face.is_some(), timestamp, self.config.face_lost_timeout_secs);
        if transition.state != previous {
            debug!(
                session_id = %self.session.id,
                from = previous.as_str(),
                to = transition.state.as_str(),
                timestamp,
                "Face tracking state changed"
            );
        }

        match transition.action {
            StabilizerAction::Update => {
                self.stabilizer.update(face, timestamp);
                self.session.last_face_rect = face;
            }
            StabilizerAction::Hold => {}
            StabilizerAction::Reset => {
                self.stabilizer.reset();
                self.session.last_face_rect = None;
                metrics::record_face_lost();
            }
        }
        self.session.state = transition.state;

        let normalized_face_rect = self.stabilizer.value();
        let (face_rect, crop_rect) = self.layer_rects(normalized_face_rect, capture_size);
        self.session.last_crop_rect = crop_rect;

        let containment = classify_containment(crop_rect.as_ref(), self.mapper.viewport_size());
        let containment_changed = self.session.containment.update(containment);
        if let Some(changed) = containment_changed {
            self.notify_containment(changed);
        }

        metrics::record_tick(face.is_some(), started.elapsed().as_secs_f64());

        TickOutput {
            timestamp,
            state: transition.state,
            normalized_face_rect,
            face_rect,
            crop_rect,
            containment,
            containment_changed,
            capture_requested: false,
        }
    }

    /// Current outputs without advancing any state.
    fn held_output(&self, capture_size: Size, timestamp: f64) -> TickOutput {
        let normalized_face_rect = self.stabilizer.value();
        let (face_rect, crop_rect) = self.layer_rects(normalized_face_rect, capture_size);
        TickOutput {
            timestamp,
            state: self.session.state,
            normalized_face_rect,
            face_rect,
            crop_rect,
            containment: self.session.containment.current(),
            containment_changed: None,
            capture_requested: false,
        }
    }

    /// Stabilized face and crop in layer space.
    fn layer_rects(&self, normalized_face_rect: Option<Rect>, capture_size: Size) -> (Option<Rect>, Option<Rect>) {
        let mapping = self.layer_mapping(capture_size);
        let face_rect = normalized_face_rect
            .zip(mapping)
            .map(|(rect, m)| m.to_layer_rect(&rect));
        let crop_rect = face_rect.and_then(|rect| {
            derive_crop_rect(&rect, self.config.width_extension_factor, self.mapper.viewport_size())
        });
        (face_rect, crop_rect)
    }

    fn layer_mapping(&self, capture_size: Size) -> Option<LayerMapping> {
        if capture_size.is_empty() {
            warn!(
                width = capture_size.width,
                height = capture_size.height,
                "Degenerate capture size, skipping layer mapping"
            );
            return None;
        }
        self.mapper.mapping(capture_size)
    }

    fn notify_containment(&mut self, containment: Containment) {
        debug!(session_id = %self.session.id, containment = %containment, "Containment changed");
        metrics::record_containment_change(containment);
        for observer in &mut self.observers {
            observer.containment_did_change(containment);
        }
    }

    /// Request a photo capture.
    ///
    /// Returns false while stopped or when a capture is already in progress.
    pub fn request_capture(&mut self) -> bool {
        self.begin_capture("manual")
    }

    fn begin_capture(&mut self, trigger: &'static str) -> bool {
        if !self.running || self.session.capture == CaptureState::Capturing {
            return false;
        }

        self.session.capture = CaptureState::Capturing;
        metrics::record_capture_requested(trigger);
        info!(session_id = %self.session.id, trigger, "Photo capture requested");
        true
    }

    /// Abandon a pending capture. Returns whether one was pending.
    pub fn cancel_capture(&mut self) -> bool {
        let pending = self.session.capture == CaptureState::Capturing;
        self.session.capture = CaptureState::Idle;
        pending
    }

    /// Compute the crop for the captured photo and end the session.
    ///
    /// # Errors
    /// - [`TrackingError::NoCaptureInProgress`] without a pending capture
    /// - [`TrackingError::InvalidSize`] for an empty image or viewport;
    ///   the capture stays pending
    pub fn finish_capture(&mut self, image_size: Size) -> TrackingResult<CaptureCrop> {
        if self.session.capture != CaptureState::Capturing {
            return Err(TrackingError::NoCaptureInProgress);
        }
        if image_size.is_empty() {
            warn!(width = image_size.width, height = image_size.height, "Degenerate photo size");
            return Err(TrackingError::invalid_size("image", image_size));
        }
        let viewport = self.mapper.viewport_size();
        let mapping = self
            .mapper
            .mapping(image_size)
            .ok_or_else(|| TrackingError::invalid_size("viewport", viewport))?;

        let crop = final_image_crop(self.session.last_crop_rect.as_ref(), &mapping, self.mirrored);

        info!(
            session_id = %self.session.id,
            used_face_crop = crop.used_face_crop,
            mirrored = crop.mirrored,
            width = crop.pixels.width,
            height = crop.pixels.height,
            "Photo crop computed"
        );
        metrics::record_capture_completed(crop.used_face_crop);

        self.session.capture = CaptureState::Idle;
        self.stop();
        Ok(crop)
    }
}
