//! Scale policy and containment classification.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How the capture frame is scaled into the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScalePolicy {
    /// Content fills the viewport; overflow is cropped.
    #[default]
    AspectFill,
    /// Content fits inside the viewport; the remainder is letterboxed.
    AspectFit,
}

impl ScalePolicy {
    pub const ALL: &'static [ScalePolicy] = &[ScalePolicy::AspectFill, ScalePolicy::AspectFit];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScalePolicy::AspectFill => "aspect_fill",
            ScalePolicy::AspectFit => "aspect_fit",
        }
    }
}

impl fmt::Display for ScalePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ScalePolicy {
    type Err = ScalePolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aspect_fill" | "aspectfill" | "fill" => Ok(ScalePolicy::AspectFill),
            "aspect_fit" | "aspectfit" | "fit" => Ok(ScalePolicy::AspectFit),
            _ => Err(ScalePolicyParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown scale policy: {0}")]
pub struct ScalePolicyParseError(String);

/// Whether the crop rectangle around the face lies inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum Containment {
    /// No stabilized crop rectangle exists.
    #[default]
    None,
    /// Crop rectangle is fully inside the viewport.
    Inside,
    /// Crop rectangle extends past at least one viewport edge.
    Outside,
}

impl Containment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Containment::None => "none",
            Containment::Inside => "inside",
            Containment::Outside => "outside",
        }
    }
}

impl fmt::Display for Containment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
