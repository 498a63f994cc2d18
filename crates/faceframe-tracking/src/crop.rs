//! Crop derivation, containment classification and primary face selection.

use faceframe_models::{Containment, FaceObservation, Rect, Size};

/// Derive the photo crop around a face in layer space.
///
/// The crop is `extension_factor` times as wide as the face and takes the
/// viewport's aspect ratio, so the final photo matches the preview's
/// proportions regardless of face size. Returns `None` for an empty viewport.
pub fn derive_crop_rect(face_rect: &Rect, extension_factor: f64, viewport: Size) -> Option<Rect> {
    if viewport.is_empty() {
        return None;
    }

    let width = face_rect.width * extension_factor;
    let height = width / viewport.aspect_ratio();
    Some(Rect::centered_at(face_rect.mid_x(), face_rect.mid_y(), width, height))
}

/// Classify a crop rectangle against the viewport `(0, 0, w, h)`.
pub fn classify_containment(crop_rect: Option<&Rect>, viewport: Size) -> Containment {
    match crop_rect {
        None => Containment::None,
        Some(crop) if Rect::from_size(viewport).contains(crop) => Containment::Inside,
        Some(_) => Containment::Outside,
    }
}

/// Edge detector for containment changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContainmentTracker {
    current: Containment,
}

impl ContainmentTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Containment {
        self.current
    }

    /// Record a classification. Returns the new value only when it differs
    /// from the previous one.
    pub fn update(&mut self, containment: Containment) -> Option<Containment> {
        if containment == self.current {
            return None;
        }
        self.current = containment;
        Some(containment)
    }

    /// Return to [`Containment::None`], reporting the change if there was one.
    pub fn reset(&mut self) -> Option<Containment> {
        self.update(Containment::None)
    }
}

/// Pick the face to track: the one with the largest area. Ties keep the
/// earliest observation.
pub fn select_primary_face(faces: &[FaceObservation]) -> Option<&FaceObservation> {
    faces.iter().reduce(|best, face| {
        if face.bounds.area() > best.bounds.area() {
            face
        } else {
            best
        }
    })
}
