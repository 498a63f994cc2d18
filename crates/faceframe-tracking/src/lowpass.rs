//! Exponential low-pass filtering with a variable sampling interval.
//!
//! The smoothing factor is derived from an RC time constant and the time
//! elapsed since the previous sample:
//!
//! ```text
//! alpha = 1 / (rc / interval + 1)
//! value = alpha * new + (1 - alpha) * old
//! ```
//!
//! Long gaps between samples push `alpha` toward 1 (trust the new sample),
//! a large `rc` pushes it toward 0 (smoother, slower response).

use faceframe_models::config::DEFAULT_RC;

/// Smoothing factor for an RC time constant and a sampling interval.
#[inline]
pub fn smoothing_factor(rc: f64, interval: f64) -> f64 {
    1.0 / (rc / interval + 1.0)
}

/// Blend a new sample into an old value with the given smoothing factor.
#[inline]
pub fn blend(new_value: f64, old_value: f64, alpha: f64) -> f64 {
    new_value * alpha + (1.0 - alpha) * old_value
}

/// Single-value low-pass filter with optional circular wraparound.
///
/// The first sample after construction or [`reset`](Self::reset) is taken
/// as-is. Later samples are blended according to the time elapsed since the
/// previous one.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarLowpassFilter {
    /// RC time constant in seconds
    rc: f64,
    /// Period for circular quantities such as compass headings
    modulo: Option<f64>,
    /// Timestamp of the previous sample
    last_observation: f64,
    /// Filtered value; `None` until the first sample
    value: Option<f64>,
}

impl Default for ScalarLowpassFilter {
    fn default() -> Self {
        Self::new(DEFAULT_RC, None)
    }
}

impl ScalarLowpassFilter {
    /// Create a new filter.
    pub fn new(rc: f64, modulo: Option<f64>) -> Self {
        Self {
            rc,
            modulo,
            last_observation: 0.0,
            value: None,
        }
    }

    pub fn rc(&self) -> f64 {
        self.rc
    }

    pub fn set_rc(&mut self, rc: f64) {
        self.rc = rc;
    }

    pub fn modulo(&self) -> Option<f64> {
        self.modulo
    }

    pub fn set_modulo(&mut self, modulo: Option<f64>) {
        self.modulo = modulo;
    }

    /// Current filtered value.
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Timestamp of the last sample or explicit assignment.
    pub fn last_observation(&self) -> f64 {
        self.last_observation
    }

    /// Overwrite the filtered value, recording `now` as the observation time.
    pub fn set_value(&mut self, value: Option<f64>, now: f64) {
        self.value = value;
        self.last_observation = now;
    }

    /// Forget the filtered value so the next sample is taken unsmoothed.
    pub fn reset(&mut self) {
        self.value = None;
    }

    /// Filter a new sample taken at `now`. Returns the filtered value.
    ///
    /// The observation time is always recorded. A non-positive interval
    /// since the previous sample leaves the value unchanged. A non-finite
    /// `now` is ignored entirely.
    pub fn update(&mut self, new_value: f64, now: f64) -> f64 {
        if !now.is_finite() {
            return self.value.unwrap_or(new_value);
        }

        let interval = now - self.last_observation;
        self.last_observation = now;

        let Some(old_value) = self.value else {
            self.value = Some(new_value);
            return new_value;
        };
        if interval.is_nan() || interval <= 0.0 {
            return old_value;
        }

        let alpha = smoothing_factor(self.rc, interval);
        let filtered = match self.modulo {
            Some(modulo) if (new_value - old_value).abs() > modulo / 2.0 => {
                // Shift by half a period so the short arc no longer crosses
                // the wrap point, blend, then shift back.
                let half = modulo / 2.0;
                let nv = (new_value + half).rem_euclid(modulo);
                let ov = (old_value + half).rem_euclid(modulo);
                (blend(nv, ov, alpha) + half).rem_euclid(modulo)
            }
            _ => blend(new_value, old_value, alpha),
        };

        self.value = Some(filtered);
        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_update_passes_through() {
        for rc in [0.01, 0.1, 1.0, 10.0] {
            let mut filter = ScalarLowpassFilter::new(rc, None);
            assert_eq!(filter.update(42.5, 3.0), 42.5);
            assert_eq!(filter.value(), Some(42.5));
            assert_eq!(filter.last_observation(), 3.0);
        }
    }

    #[test]
    fn test_converges_without_overshoot() {
        let mut filter = ScalarLowpassFilter::new(0.1, None);
        filter.update(0.0, 0.0);

        let mut previous = 0.0;
        for i in 1..=20 {
            let v = filter.update(100.0, i as f64 / 30.0);
            assert!(v > previous, "tick {i}: {v} should move toward target");
            assert!(v < 100.0, "tick {i}: {v} should not overshoot");
            previous = v;
        }
    }

    #[test]
    fn test_alpha_matches_rc_formula() {
        let mut filter = ScalarLowpassFilter::new(0.1, None);
        filter.update(0.0, 0.0);
        // interval 0.1 with rc 0.1 gives alpha 0.5
        let v = filter.update(10.0, 0.1);
        assert!((v - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_longer_interval_trusts_new_sample_more() {
        let mut fast = ScalarLowpassFilter::new(0.1, None);
        fast.update(0.0, 0.0);
        let short = fast.update(10.0, 0.01);

        let mut slow = ScalarLowpassFilter::new(0.1, None);
        slow.update(0.0, 0.0);
        let long = slow.update(10.0, 1.0);

        assert!(long > short);
    }

    #[test]
    fn test_zero_interval_returns_previous_value() {
        let mut filter = ScalarLowpassFilter::new(0.1, None);
        filter.update(1.0, 0.5);
        assert_eq!(filter.update(50.0, 0.5), 1.0);
        assert_eq!(filter.value(), Some(1.0));
        assert_eq!(filter.last_observation(), 0.5);
    }

    #[test]
    fn test_backwards_time_does_not_blend() {
        let mut filter = ScalarLowpassFilter::new(0.1, None);
        filter.update(1.0, 2.0);
        assert_eq!(filter.update(50.0, 1.0), 1.0);
        assert_eq!(filter.last_observation(), 1.0);
    }

    #[test]
    fn test_non_finite_time_leaves_filter_untouched() {
        let mut filter = ScalarLowpassFilter::new(0.1, None);
        filter.update(1.0, 1.0);

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(filter.update(50.0, bad), 1.0);
            assert_eq!(filter.value(), Some(1.0));
            assert_eq!(filter.last_observation(), 1.0);
        }

        // Later samples blend normally
        let v = filter.update(11.0, 1.1);
        assert!((v - 6.0).abs() < 1e-12, "got {v}");
    }

    #[test]
    fn test_non_finite_time_on_empty_filter_stores_nothing() {
        let mut filter = ScalarLowpassFilter::new(0.1, None);
        assert_eq!(filter.update(3.0, f64::NAN), 3.0);
        assert_eq!(filter.value(), None);
    }

    #[test]
    fn test_default_rc_matches_tracking_config() {
        let config = faceframe_models::TrackingConfig::default();
        assert_eq!(ScalarLowpassFilter::default().rc(), config.rc);
    }

    #[test]
    fn test_zero_rc_follows_input() {
        let mut filter = ScalarLowpassFilter::new(0.0, None);
        filter.update(1.0, 0.0);
        assert_eq!(filter.update(7.0, 0.1), 7.0);
    }

    #[test]
    fn test_wraparound_takes_short_path() {
        let mut filter = ScalarLowpassFilter::new(0.1, Some(360.0));
        filter.update(350.0, 0.0);
        let v = filter.update(5.0, 0.1);
        // alpha 0.5: halfway along the 15 degree arc through 360/0
        assert!((v - 357.5).abs() < 1e-9, "got {v}");
        assert!(v > 350.0);
    }

    #[test]
    fn test_wraparound_other_direction() {
        let mut filter = ScalarLowpassFilter::new(0.1, Some(360.0));
        filter.update(10.0, 0.0);
        let v = filter.update(340.0, 0.1);
        // halfway along the 30 degree arc from 10 back through 0 to 340
        assert!((v - 355.0).abs() < 1e-9, "got {v}");
    }

    #[test]
    fn test_modulo_without_wrap_blends_linearly() {
        let mut filter = ScalarLowpassFilter::new(0.1, Some(360.0));
        filter.update(100.0, 0.0);
        let v = filter.update(120.0, 0.1);
        assert!((v - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_reset_forces_passthrough() {
        let mut filter = ScalarLowpassFilter::new(0.1, None);
        filter.update(0.0, 0.0);
        filter.update(10.0, 0.1);
        filter.reset();
        assert_eq!(filter.value(), None);
        assert_eq!(filter.update(99.0, 0.2), 99.0);
    }
}
