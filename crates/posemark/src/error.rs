use thiserror::Error;

use crate::{image::Resolution, landmark::Subject};

/// A frame's detections do not satisfy the input contract of the renderer.
///
/// Detected before anything is drawn, so a frame that fails validation is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("{subject} landmark set has {actual} landmarks, expected {expected}")]
    LandmarkCount {
        subject: Subject,
        expected: usize,
        actual: usize,
    },
    #[error("cannot annotate a frame of resolution {0}")]
    EmptyFrame(Resolution),
}
