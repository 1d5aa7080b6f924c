//! Visibility gating: deciding which landmarks and edges are drawn.

use crate::landmark::{Landmark, LandmarkKind, Landmarks};

/// Returns whether `landmark` is at least as visible as `threshold`.
///
/// A NaN visibility never passes.
#[inline]
pub fn is_visible(landmark: &Landmark, threshold: f32) -> bool {
    landmark.visibility() >= threshold
}

/// Returns whether the detector marked `landmark` as present.
///
/// Hand and face detectors do not compute a meaningful visibility, and report negative
/// visibility or presence for landmarks they consider absent.
#[inline]
pub fn is_present(landmark: &Landmark) -> bool {
    !(landmark.visibility() < 0.0 || landmark.presence() < 0.0)
}

/// The predicate a landmark has to satisfy to be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gate {
    /// Visibility must reach the threshold.
    Threshold(f32),
    /// Neither visibility nor presence may be negative.
    Present,
}

impl Gate {
    /// Selects the gate for a kind of landmark set.
    ///
    /// Pose landmarks use `threshold`; hands and faces use [`Gate::Present`].
    pub fn for_kind(kind: LandmarkKind, threshold: f32) -> Self {
        match kind {
            LandmarkKind::Pose => Self::Threshold(threshold),
            LandmarkKind::Hand | LandmarkKind::Face => Self::Present,
        }
    }

    pub fn passes(&self, landmark: &Landmark) -> bool {
        match *self {
            Self::Threshold(threshold) => is_visible(landmark, threshold),
            Self::Present => is_present(landmark),
        }
    }

    /// An edge is drawn only if both of its endpoints pass.
    pub fn passes_edge(&self, landmarks: &Landmarks, (a, b): (usize, usize)) -> bool {
        self.passes(&landmarks.get(a)) && self.passes(&landmarks.get(b))
    }
}
