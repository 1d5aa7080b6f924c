//! Hand landmark indices and connectivity.
//!
//! The 21 hand landmarks follow MediaPipe's hand tracking layout.

/// Number of landmarks in a hand landmark set.
pub const NUM_LANDMARKS: usize = 21;

/// Names for the hand pose landmarks.
///
/// # Terminology
///
/// - **CMC**: [Carpometacarpal joint], the lowest joint of the thumb, located near the wrist.
/// - **MCP**: [Metacarpophalangeal joint], the lower joint forming the knuckles near the palm of
///   the hand.
/// - **PIP**: Proximal Interphalangeal joint, the joint between the MCP and DIP.
/// - **DIP**: Distal Interphalangeal joint, the highest joint of a finger.
/// - **Tip**: This landmark is just placed on the tip of the finger, above the DIP.
///
/// [Carpometacarpal joint]: https://en.wikipedia.org/wiki/Carpometacarpal_joint
/// [Metacarpophalangeal joint]: https://en.wikipedia.org/wiki/Metacarpophalangeal_joint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkIdx {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexFingerMcp,
    IndexFingerPip,
    IndexFingerDip,
    IndexFingerTip,
    MiddleFingerMcp,
    MiddleFingerPip,
    MiddleFingerDip,
    MiddleFingerTip,
    RingFingerMcp,
    RingFingerPip,
    RingFingerDip,
    RingFingerTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

/// Which hand a landmark set belongs to, as reported by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// Returns the one-letter label drawn next to the palm centroid.
    ///
    /// Detectors fed with a mirrored (selfie) image report the anatomical side of the mirror
    /// image, so with `mirrored` set, the label is swapped: the detector's left hand is labeled
    /// `"R"` and its right hand `"L"`.
    pub fn label(self, mirrored: bool) -> &'static str {
        match (self, mirrored) {
            (Self::Left, false) | (Self::Right, true) => "L",
            (Self::Right, false) | (Self::Left, true) => "R",
        }
    }
}

/// Palm outline, in polygon order. Used for the palm centroid.
pub(crate) const PALM: [usize; 6] = to_indices({
    use LandmarkIdx::*;
    [
        Wrist,
        ThumbCmc,
        IndexFingerMcp,
        MiddleFingerMcp,
        RingFingerMcp,
        PinkyMcp,
    ]
});

pub(crate) const EDGES: [(usize, usize); 21] = to_edges({
    use LandmarkIdx::*;
    [
        // Thumb:
        (ThumbMcp, ThumbIp),
        (ThumbIp, ThumbTip),
        // Index:
        (IndexFingerMcp, IndexFingerPip),
        (IndexFingerPip, IndexFingerDip),
        (IndexFingerDip, IndexFingerTip),
        // Middle:
        (MiddleFingerMcp, MiddleFingerPip),
        (MiddleFingerPip, MiddleFingerDip),
        (MiddleFingerDip, MiddleFingerTip),
        // Ring:
        (RingFingerMcp, RingFingerPip),
        (RingFingerPip, RingFingerDip),
        (RingFingerDip, RingFingerTip),
        // Pinky:
        (PinkyMcp, PinkyPip),
        (PinkyPip, PinkyDip),
        (PinkyDip, PinkyTip),
        // Surround the palm:
        (Wrist, ThumbCmc),
        (ThumbCmc, ThumbMcp),
        (ThumbMcp, IndexFingerMcp),
        (IndexFingerMcp, MiddleFingerMcp),
        (MiddleFingerMcp, RingFingerMcp),
        (RingFingerMcp, PinkyMcp),
        (PinkyMcp, Wrist),
    ]
});

pub(crate) const THUMB_TIP: usize = LandmarkIdx::ThumbTip as usize;

pub(crate) const FINGERTIPS: [usize; 4] = to_indices({
    use LandmarkIdx::*;
    [IndexFingerTip, MiddleFingerTip, RingFingerTip, PinkyTip]
});

const fn to_indices<const N: usize>(idx: [LandmarkIdx; N]) -> [usize; N] {
    let mut out = [0; N];
    let mut i = 0;
    while i < N {
        out[i] = idx[i] as usize;
        i += 1;
    }
    out
}

const fn to_edges<const N: usize>(pairs: [(LandmarkIdx, LandmarkIdx); N]) -> [(usize, usize); N] {
    let mut out = [(0, 0); N];
    let mut i = 0;
    while i < N {
        out[i] = (pairs[i].0 as usize, pairs[i].1 as usize);
        i += 1;
    }
    out
}
