//! Shared data models for FaceFrame.
//!
//! This crate provides Serde-serializable types for:
//! - Rectangles and sizes in any of the tracking coordinate spaces
//! - Scale policy and containment classification
//! - Raw detector observations
//! - Tracking configuration

pub mod config;
pub mod observation;
pub mod policy;
pub mod rect;

// Re-export common types
pub use config::{parse_size, SizeParseError, TrackingConfig};
pub use observation::{FaceObservation, ObservationTick};
pub use policy::{Containment, ScalePolicy, ScalePolicyParseError};
pub use rect::{Rect, Size};
