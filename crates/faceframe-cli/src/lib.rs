//! Offline replay of recorded detector output.
//!
//! Feeds `ObservationTick` JSON lines through a [`faceframe_tracking::FaceTracker`]
//! so tuning changes can be checked without a camera.

pub mod logging;
pub mod overrides;
pub mod replay;

pub use overrides::ConfigOverrides;
pub use replay::{run, ReplayOptions, ReplaySummary};
