//! Final photo crop derivation.
//!
//! The crop rectangle lives in layer space while the preview runs. When a
//! photo arrives it is normalized against the photo's own pixel extent,
//! which may differ from the preview frames.

use super::mapping::LayerMapping;
use faceframe_models::{Rect, Size};
use serde::{Deserialize, Serialize};

/// Photo capture progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureState {
    #[default]
    Idle,
    Capturing,
}

/// Region to cut from a captured photo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaptureCrop {
    /// Crop in the photo's normalized space (Y-up)
    pub normalized: Rect,
    /// Crop in photo pixels, same orientation as `normalized`, clamped to the photo
    pub pixels: Rect,
    /// Pixel extent of the photo
    pub image_size: Size,
    /// Whether the face crop was used, as opposed to the whole viewport
    pub used_face_crop: bool,
    /// Whether the mirroring correction was applied
    pub mirrored: bool,
}

impl CaptureCrop {
    /// Pixel crop with the origin at the top-left corner of the photo.
    pub fn pixels_top_left(&self) -> Rect {
        Rect::new(
            self.pixels.x,
            self.image_size.height - self.pixels.y - self.pixels.height,
            self.pixels.width,
            self.pixels.height,
        )
    }
}

/// Compute the crop for a captured photo.
///
/// # Arguments
/// * `layer_crop` - Stabilized crop rectangle in layer space, if any
/// * `mapping` - Mapping computed for the photo's pixel size
/// * `mirrored` - The preview was mirrored but the photo is not
///
/// The face crop is used only when it lies inside the visible viewport;
/// otherwise the whole visible viewport is cropped.
pub fn final_image_crop(layer_crop: Option<&Rect>, mapping: &LayerMapping, mirrored: bool) -> CaptureCrop {
    let viewport_norm = mapping.viewport_norm_rect();
    let face_crop = layer_crop
        .map(|r| mapping.to_norm_rect(r))
        .filter(|r| viewport_norm.contains(r));

    let used_face_crop = face_crop.is_some();
    let mut normalized = face_crop.unwrap_or(viewport_norm);
    if mirrored {
        normalized = normalized.mirrored_x();
    }

    let image_size = mapping.capture_size();
    let pixels = (normalized * image_size)
        .intersection(&Rect::from_size(image_size))
        .unwrap_or_else(Rect::zero);

    CaptureCrop {
        normalized,
        pixels,
        image_size,
        used_face_crop,
        mirrored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faceframe_models::ScalePolicy;

    fn portrait_mapping(policy: ScalePolicy) -> LayerMapping {
        // 3:4 photo into a 400x600 (2:3) viewport
        LayerMapping::compute(Size::new(3000.0, 4000.0), Size::new(400.0, 600.0), policy).unwrap()
    }

    #[test]
    fn test_face_crop_inside_viewport_is_used() {
        let mapping = portrait_mapping(ScalePolicy::AspectFill);
        let layer_crop = Rect::new(100.0, 150.0, 200.0, 300.0);

        let crop = final_image_crop(Some(&layer_crop), &mapping, false);
        assert!(crop.used_face_crop);

        let expected = mapping.to_norm_rect(&layer_crop);
        assert!((crop.normalized.x - expected.x).abs() < 1e-12);
        assert!((crop.pixels.width - expected.width * 3000.0).abs() < 1e-6);
        // Crop keeps the viewport's 2:3 shape in pixels
        assert!((crop.pixels.width / crop.pixels.height - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_outside_crop_falls_back_to_viewport() {
        let mapping = portrait_mapping(ScalePolicy::AspectFill);
        let layer_crop = Rect::new(300.0, 150.0, 200.0, 300.0);

        let crop = final_image_crop(Some(&layer_crop), &mapping, false);
        assert!(!crop.used_face_crop);
        assert_eq!(crop.normalized, mapping.viewport_norm_rect());

        let none = final_image_crop(None, &mapping, false);
        assert!(!none.used_face_crop);
        assert_eq!(none.normalized, crop.normalized);
    }

    #[test]
    fn test_mirroring_flips_horizontally() {
        let mapping = portrait_mapping(ScalePolicy::AspectFill);
        let layer_crop = Rect::new(20.0, 150.0, 100.0, 150.0);

        let plain = final_image_crop(Some(&layer_crop), &mapping, false);
        let mirrored = final_image_crop(Some(&layer_crop), &mapping, true);
        assert!(mirrored.mirrored);
        assert!((mirrored.normalized.x - (1.0 - plain.normalized.x - plain.normalized.width)).abs() < 1e-12);
        assert_eq!(mirrored.normalized.y, plain.normalized.y);
        assert!(mirrored.pixels.x > plain.pixels.x);
    }

    #[test]
    fn test_fit_viewport_is_clamped_to_photo() {
        let mapping = portrait_mapping(ScalePolicy::AspectFit);
        let crop = final_image_crop(None, &mapping, false);

        // Letterboxed viewport extends past the photo; pixels stay inside it
        assert!(crop.normalized.height > 1.0 || crop.normalized.width > 1.0);
        assert!(Rect::from_size(crop.image_size).contains(&crop.pixels));
        assert!((crop.pixels.width - 3000.0).abs() < 1e-6);
        assert!((crop.pixels.height - 4000.0).abs() < 1e-6);
    }

    #[test]
    fn test_pixels_top_left() {
        let crop = CaptureCrop {
            normalized: Rect::new(0.0, 0.0, 0.5, 0.25),
            pixels: Rect::new(0.0, 0.0, 100.0, 50.0),
            image_size: Size::new(200.0, 200.0),
            used_face_crop: true,
            mirrored: false,
        };
        assert_eq!(crop.pixels_top_left(), Rect::new(0.0, 150.0, 100.0, 50.0));
    }
}
