//! Coordinate mapping between detector space and the preview layer.
//!
//! Two spaces are involved:
//! - **Normalized space**: unit square relative to the capture frame,
//!   origin bottom-left (Y-up), as produced by the detector
//! - **Layer space**: points inside the viewport, origin top-left (Y-down)
//!
//! The capture frame is scaled uniformly into the viewport and centered.
//! With [`ScalePolicy::AspectFill`] the frame overflows the viewport on one
//! axis; with [`ScalePolicy::AspectFit`] it is letterboxed.
//!
//! # Key Formulas
//! ```text
//! scale    = capture / viewport   (min per axis for fill, max for fit)
//! display  = capture / scale
//! offset   = (viewport - display) / 2
//! layer    = flip_y(norm) * display + offset
//! norm     = flip_y((layer - offset) / display)
//! ```
//!
//! # Usage
//! ```rust
//! use faceframe_models::{Rect, ScalePolicy, Size};
//! use faceframe_tracking::mapping::LayerMapping;
//!
//! let mapping = LayerMapping::compute(
//!     Size::new(1920.0, 1080.0),
//!     Size::new(400.0, 600.0),
//!     ScalePolicy::AspectFill,
//! )
//! .unwrap();
//!
//! let layer = mapping.to_layer_rect(&Rect::new(0.4, 0.4, 0.2, 0.2));
//! let back = mapping.to_norm_rect(&layer);
//! assert!((back.x - 0.4).abs() < 1e-9);
//! ```

use faceframe_models::{Rect, ScalePolicy, Size};

/// Capture pixels per viewport point under the given policy.
///
/// Fill zooms in, so the smaller ratio wins; fit zooms out, so the larger
/// ratio wins.
pub fn scale_factor(capture_size: Size, viewport_size: Size, policy: ScalePolicy) -> f64 {
    let sx = capture_size.width / viewport_size.width;
    let sy = capture_size.height / viewport_size.height;
    match policy {
        ScalePolicy::AspectFill => sx.min(sy),
        ScalePolicy::AspectFit => sx.max(sy),
    }
}

/// Precomputed mapping for one capture size, viewport and policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerMapping {
    /// Capture frame size in pixels
    capture_size: Size,
    /// Viewport size in layer points
    viewport_size: Size,
    /// Scale policy used to compute the mapping
    policy: ScalePolicy,
    /// Capture pixels per layer point
    scale: f64,
    /// Capture frame size once scaled into the layer
    display_size: Size,
    /// Horizontal centering offset in layer points
    offset_x: f64,
    /// Vertical centering offset in layer points
    offset_y: f64,
}

impl LayerMapping {
    /// Compute the mapping, or `None` when either size is empty.
    pub fn compute(capture_size: Size, viewport_size: Size, policy: ScalePolicy) -> Option<Self> {
        if capture_size.is_empty() || viewport_size.is_empty() {
            return None;
        }

        let scale = scale_factor(capture_size, viewport_size, policy);
        let display_size = Size::new(capture_size.width / scale, capture_size.height / scale);

        // Centered for both fill and fit; negative when zoomed in.
        let offset_x = (viewport_size.width - display_size.width) / 2.0;
        let offset_y = (viewport_size.height - display_size.height) / 2.0;

        Some(Self {
            capture_size,
            viewport_size,
            policy,
            scale,
            display_size,
            offset_x,
            offset_y,
        })
    }

    pub fn capture_size(&self) -> Size {
        self.capture_size
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    pub fn policy(&self) -> ScalePolicy {
        self.policy
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn display_size(&self) -> Size {
        self.display_size
    }

    /// Centering offset `(x, y)` in layer points.
    pub fn offset(&self) -> (f64, f64) {
        (self.offset_x, self.offset_y)
    }

    /// Map a normalized (Y-up) rectangle into layer space (Y-down).
    pub fn to_layer_rect(&self, norm_rect: &Rect) -> Rect {
        (norm_rect.flipped_y() * self.display_size).offset(self.offset_x, self.offset_y)
    }

    /// Map a layer rectangle back into normalized space. Exact inverse of
    /// [`to_layer_rect`](Self::to_layer_rect).
    pub fn to_norm_rect(&self, layer_rect: &Rect) -> Rect {
        (layer_rect.offset(-self.offset_x, -self.offset_y) / self.display_size).flipped_y()
    }

    /// The viewport rectangle `(0, 0, w, h)`.
    pub fn viewport_rect(&self) -> Rect {
        Rect::from_size(self.viewport_size)
    }

    /// The visible part of the viewport expressed in normalized space.
    ///
    /// With fill this lies inside the unit square; with fit it extends past
    /// it by the letterbox margins.
    pub fn viewport_norm_rect(&self) -> Rect {
        self.to_norm_rect(&self.viewport_rect())
    }
}

/// Stateless mapper holding the viewport configuration.
///
/// The capture size may change per tick, so mappings are computed on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    policy: ScalePolicy,
    viewport_size: Size,
}

impl CoordinateMapper {
    pub fn new(policy: ScalePolicy, viewport_size: Size) -> Self {
        Self {
            policy,
            viewport_size,
        }
    }

    pub fn policy(&self) -> ScalePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: ScalePolicy) {
        self.policy = policy;
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    pub fn set_viewport_size(&mut self, viewport_size: Size) {
        self.viewport_size = viewport_size;
    }

    /// Mapping for a given capture size, or `None` if either size is empty.
    pub fn mapping(&self, capture_size: Size) -> Option<LayerMapping> {
        LayerMapping::compute(capture_size, self.viewport_size, self.policy)
    }

    pub fn scale_factor(&self, capture_size: Size) -> f64 {
        scale_factor(capture_size, self.viewport_size, self.policy)
    }

    pub fn to_layer_rect(&self, norm_rect: &Rect, capture_size: Size) -> Option<Rect> {
        self.mapping(capture_size).map(|m| m.to_layer_rect(norm_rect))
    }

    pub fn to_norm_rect(&self, layer_rect: &Rect, capture_size: Size) -> Option<Rect> {
        self.mapping(capture_size).map(|m| m.to_norm_rect(layer_rect))
    }
}
