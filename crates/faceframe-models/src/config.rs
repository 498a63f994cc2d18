//! Tracking configuration.

use crate::policy::ScalePolicy;
use crate::rect::Size;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationError};

/// Default smoothing time constant in seconds.
pub const DEFAULT_RC: f64 = 0.10;

/// Default ratio of crop width to face width.
pub const DEFAULT_WIDTH_EXTENSION_FACTOR: f64 = 2.5;

/// Default time a face may be missing before it is treated as lost.
pub const DEFAULT_FACE_LOST_TIMEOUT_SECS: f64 = 0.5;

/// Configuration for face tracking, stabilization and crop derivation.
///
/// Range rules are checked per field; NaN and infinities are rejected
/// separately since they slip through range comparisons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_finite"))]
#[serde(default)]
pub struct TrackingConfig {
    // === Smoothing ===
    /// RC time constant in seconds; higher is smoother but slower (default: 0.10)
    #[validate(range(min = 0.0))]
    pub rc: f64,

    /// Wraparound period for circular quantities (default: none)
    #[validate(range(exclusive_min = 0.0))]
    pub modulo: Option<f64>,

    // === Crop ===
    /// How much wider than the face the crop is (default: 2.5)
    #[validate(range(exclusive_min = 0.0))]
    pub width_extension_factor: f64,

    // === Loss debounce ===
    /// Seconds a face may be missing before it is confirmed lost (default: 0.5)
    #[validate(range(min = 0.0))]
    pub face_lost_timeout_secs: f64,

    // === Viewport ===
    /// How capture frames are scaled into the viewport
    pub scale_policy: ScalePolicy,

    /// Viewport size in layer points; zero until layout supplies it
    pub viewport: Size,

    // === Capture ===
    /// Request a photo automatically when the tracked face smiles
    pub capture_when_smiling: bool,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            rc: DEFAULT_RC,
            modulo: None,
            width_extension_factor: DEFAULT_WIDTH_EXTENSION_FACTOR,
            face_lost_timeout_secs: DEFAULT_FACE_LOST_TIMEOUT_SECS,
            scale_policy: ScalePolicy::AspectFill,
            viewport: Size::zero(),
            capture_when_smiling: false,
        }
    }
}

impl TrackingConfig {
    /// Create config from environment variables.
    ///
    /// Absent or unparsable variables fall back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            rc: env_f64("FACEFRAME_RC").unwrap_or(defaults.rc),
            modulo: env_f64("FACEFRAME_MODULO"),
            width_extension_factor: env_f64("FACEFRAME_WIDTH_EXTENSION")
                .unwrap_or(defaults.width_extension_factor),
            face_lost_timeout_secs: env_f64("FACEFRAME_FACE_LOST_TIMEOUT")
                .unwrap_or(defaults.face_lost_timeout_secs),
            scale_policy: env_parse("FACEFRAME_SCALE_POLICY").unwrap_or(defaults.scale_policy),
            viewport: std::env::var("FACEFRAME_VIEWPORT")
                .ok()
                .and_then(|s| parse_size(&s).ok())
                .unwrap_or(defaults.viewport),
            capture_when_smiling: std::env::var("FACEFRAME_CAPTURE_WHEN_SMILING")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.capture_when_smiling),
        }
    }

    /// Builder-style viewport override.
    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    /// Builder-style scale policy override.
    pub fn with_scale_policy(mut self, scale_policy: ScalePolicy) -> Self {
        self.scale_policy = scale_policy;
        self
    }
}

fn validate_finite(config: &TrackingConfig) -> Result<(), ValidationError> {
    let fields = [
        ("rc_not_finite", Some(config.rc)),
        ("modulo_not_finite", config.modulo),
        ("width_extension_factor_not_finite", Some(config.width_extension_factor)),
        ("face_lost_timeout_secs_not_finite", Some(config.face_lost_timeout_secs)),
    ];
    for (code, value) in fields {
        if value.is_some_and(|v| !v.is_finite()) {
            return Err(ValidationError::new(code));
        }
    }
    Ok(())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

/// `nan` and `inf` parse as floats but are treated as unparsable.
fn env_f64(key: &str) -> Option<f64> {
    env_parse::<f64>(key).filter(|v| v.is_finite())
}

#[derive(Debug, Error, PartialEq)]
#[error("Invalid size '{0}', expected WIDTHxHEIGHT")]
pub struct SizeParseError(String);

/// Parse a `WIDTHxHEIGHT` string such as `400x600`.
pub fn parse_size(s: &str) -> Result<Size, SizeParseError> {
    let err = || SizeParseError(s.to_string());
    let (w, h) = s.trim().split_once(|c: char| c == 'x' || c == 'X').ok_or_else(err)?;
    let width: f64 = w.trim().parse().map_err(|_| err())?;
    let height: f64 = h.trim().parse().map_err(|_| err())?;
    Ok(Size::new(width, height))
}
