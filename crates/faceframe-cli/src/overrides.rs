//! Command line overrides layered on top of the environment config.

use clap::Args;
use faceframe_models::{parse_size, ScalePolicy, Size, TrackingConfig};

/// Tracking settings given on the command line. Unset flags keep the
/// value from the base config.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    /// Viewport size in layer points, e.g. 390x844
    #[arg(long, value_parser = parse_size)]
    pub viewport: Option<Size>,

    /// Scale policy: fill or fit
    #[arg(long)]
    pub policy: Option<ScalePolicy>,

    /// Smoothing time constant in seconds
    #[arg(long)]
    pub rc: Option<f64>,

    /// Seconds before a missing face is confirmed lost
    #[arg(long)]
    pub timeout: Option<f64>,

    /// Crop width as a multiple of face width
    #[arg(long)]
    pub extension: Option<f64>,

    /// Capture automatically when the tracked face smiles
    #[arg(long)]
    pub smile_capture: bool,
}

impl ConfigOverrides {
    /// Apply every set flag to `config`.
    pub fn apply(&self, mut config: TrackingConfig) -> TrackingConfig {
        if let Some(viewport) = self.viewport {
            config.viewport = viewport;
        }
        if let Some(policy) = self.policy {
            config.scale_policy = policy;
        }
        if let Some(rc) = self.rc {
            config.rc = rc;
        }
        if let Some(timeout) = self.timeout {
            config.face_lost_timeout_secs = timeout;
        }
        if let Some(extension) = self.extension {
            config.width_extension_factor = extension;
        }
        if self.smile_capture {
            config.capture_when_smiling = true;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct Cli {
        #[command(flatten)]
        overrides: ConfigOverrides,
    }

    fn parse(args: &[&str]) -> ConfigOverrides {
        let argv = std::iter::once("faceframe-replay").chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap().overrides
    }

    fn base() -> TrackingConfig {
        TrackingConfig {
            rc: 0.3,
            capture_when_smiling: true,
            ..TrackingConfig::default().with_viewport(Size::new(100.0, 200.0))
        }
    }

    #[test]
    fn test_no_flags_keep_base_config() {
        let overrides = parse(&[]);
        assert_eq!(overrides, ConfigOverrides::default());
        assert_eq!(overrides.apply(base()), base());
    }

    #[test]
    fn test_flags_override_base_config() {
        let overrides = parse(&[
            "--viewport",
            "390x844",
            "--policy",
            "fit",
            "--rc",
            "0.05",
            "--timeout",
            "1.0",
            "--extension",
            "3",
        ]);
        let config = overrides.apply(base());

        assert_eq!(config.viewport, Size::new(390.0, 844.0));
        assert_eq!(config.scale_policy, ScalePolicy::AspectFit);
        assert_eq!(config.rc, 0.05);
        assert_eq!(config.face_lost_timeout_secs, 1.0);
        assert_eq!(config.width_extension_factor, 3.0);
        // Unset flags never turn a base setting off
        assert!(config.capture_when_smiling);
    }

    #[test]
    fn test_smile_flag_enables_capture() {
        let config = parse(&["--smile-capture"]).apply(TrackingConfig::default());
        assert!(config.capture_when_smiling);
    }

    #[test]
    fn test_bad_flag_values_rejected() {
        let argv = ["faceframe-replay", "--viewport", "wide"];
        assert!(Cli::try_parse_from(argv).is_err());
        let argv = ["faceframe-replay", "--policy", "stretch"];
        assert!(Cli::try_parse_from(argv).is_err());
    }
}
