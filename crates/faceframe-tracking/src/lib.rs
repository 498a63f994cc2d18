//! Face tracking core for live camera previews.
//!
//! This crate provides:
//! - RC low-pass smoothing of scalars and rectangles
//! - Mapping between detector (normalized) space and preview layer space
//! - Face-loss debounce and crop containment tracking
//! - Final photo crop derivation
//!
//! # Example
//! ```rust
//! use faceframe_models::{Rect, Size, TrackingConfig};
//! use faceframe_tracking::FaceTracker;
//!
//! let config = TrackingConfig::default().with_viewport(Size::new(400.0, 600.0));
//! let mut tracker = FaceTracker::new(config).unwrap();
//!
//! let out = tracker.observation_tick(
//!     Some(Rect::new(0.4, 0.4, 0.2, 0.2)),
//!     Size::new(1920.0, 1080.0),
//!     0.0,
//! );
//! assert!(out.crop_rect.is_some());
//! ```

pub mod capture;
pub mod crop;
pub mod error;
pub mod lowpass;
pub mod mapping;
pub mod metrics;
pub mod session;
pub mod stabilizer;
pub mod state;
pub mod tracker;


pub use capture::{final_image_crop, CaptureCrop, CaptureState};
pub use crop::{classify_containment, derive_crop_rect, select_primary_face, ContainmentTracker};
pub use error::{TrackingError, TrackingResult};
pub use lowpass::ScalarLowpassFilter;
pub use mapping::{scale_factor, CoordinateMapper, LayerMapping};
pub use session::TrackingSession;
pub use stabilizer::RectLowpassStabilizer;
pub use state::{FaceTrackingState, StabilizerAction, Transition};
pub use tracker::{ContainmentObserver, FaceTracker, TickOutput};
