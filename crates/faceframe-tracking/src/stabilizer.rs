//! Rectangle stabilization built from four independent scalar filters.

use super::lowpass::ScalarLowpassFilter;
use faceframe_models::config::DEFAULT_RC;
use faceframe_models::Rect;

/// Low-pass filtered rectangle.
///
/// Origin and size are smoothed per axis with one shared RC constant and
/// modulo; no correlation between axes is modelled.
#[derive(Debug, Clone, PartialEq)]
pub struct RectLowpassStabilizer {
    x: ScalarLowpassFilter,
    y: ScalarLowpassFilter,
    width: ScalarLowpassFilter,
    height: ScalarLowpassFilter,
}

impl Default for RectLowpassStabilizer {
    fn default() -> Self {
        Self::new(DEFAULT_RC, None)
    }
}

impl RectLowpassStabilizer {
    /// Create a new stabilizer.
    pub fn new(rc: f64, modulo: Option<f64>) -> Self {
        Self {
            x: ScalarLowpassFilter::new(rc, modulo),
            y: ScalarLowpassFilter::new(rc, modulo),
            width: ScalarLowpassFilter::new(rc, modulo),
            height: ScalarLowpassFilter::new(rc, modulo),
        }
    }

    pub fn rc(&self) -> f64 {
        self.x.rc()
    }

    /// Set the RC constant on all four axes.
    pub fn set_rc(&mut self, rc: f64) {
        for axis in self.axes_mut() {
            axis.set_rc(rc);
        }
    }

    pub fn modulo(&self) -> Option<f64> {
        self.x.modulo()
    }

    /// Set the wraparound period on all four axes.
    pub fn set_modulo(&mut self, modulo: Option<f64>) {
        for axis in self.axes_mut() {
            axis.set_modulo(modulo);
        }
    }

    /// Stabilized rectangle, or `None` unless every axis holds a value.
    pub fn value(&self) -> Option<Rect> {
        Some(Rect::new(
            self.x.value()?,
            self.y.value()?,
            self.width.value()?,
            self.height.value()?,
        ))
    }

    /// Overwrite the stabilized rectangle; `None` clears every axis.
    pub fn set_value(&mut self, rect: Option<Rect>, now: f64) {
        self.x.set_value(rect.map(|r| r.x), now);
        self.y.set_value(rect.map(|r| r.y), now);
        self.width.set_value(rect.map(|r| r.width), now);
        self.height.set_value(rect.map(|r| r.height), now);
    }

    /// Clear every axis so the next rectangle is taken unsmoothed.
    pub fn reset(&mut self) {
        for axis in self.axes_mut() {
            axis.reset();
        }
    }

    /// Filter a new rectangle observed at `now`.
    ///
    /// `None` clears all four axes and returns `None`.
    pub fn update(&mut self, rect: Option<Rect>, now: f64) -> Option<Rect> {
        let Some(rect) = rect else {
            self.reset();
            return None;
        };

        Some(Rect::new(
            self.x.update(rect.x, now),
            self.y.update(rect.y, now),
            self.width.update(rect.width, now),
            self.height.update(rect.height, now),
        ))
    }

    fn axes_mut(&mut self) -> [&mut ScalarLowpassFilter; 4] {
        [&mut self.x, &mut self.y, &mut self.width, &mut self.height]
    }
}
