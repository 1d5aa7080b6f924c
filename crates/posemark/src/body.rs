//! Body pose landmark indices and connectivity.
//!
//! Pose sets always carry all 33 landmarks. In upper-body mode only the shoulders, arms, hands
//! and hips are annotated; the head landmarks (0 to 10) are never drawn.

/// Number of landmarks in a pose landmark set.
pub const NUM_LANDMARKS: usize = 33;

/// Names for the body pose landmarks.
///
/// "Left" and "right" refer to the sides of the tracked person, not the sides of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkIdx {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

/// Landmarks marked in upper-body mode: shoulders through hips.
pub(crate) const UPPER_BODY_KEY_POINTS: [usize; 14] =
    index_range(LandmarkIdx::LeftShoulder, LandmarkIdx::RightHip);

/// Landmarks marked in full-body mode: shoulders through feet.
pub(crate) const FULL_BODY_KEY_POINTS: [usize; 22] =
    index_range(LandmarkIdx::LeftShoulder, LandmarkIdx::RightFootIndex);

pub(crate) const UPPER_BODY_EDGES: [(usize, usize); 13] = to_edges({
    use LandmarkIdx::*;
    [
        (LeftShoulder, RightShoulder),
        // Left arm and hand:
        (LeftShoulder, LeftElbow),
        (LeftElbow, LeftWrist),
        (LeftWrist, LeftPinky),
        (LeftPinky, LeftIndex),
        (LeftIndex, LeftThumb),
        (LeftThumb, LeftWrist),
        // Right arm and hand:
        (RightShoulder, RightElbow),
        (RightElbow, RightWrist),
        (RightWrist, RightPinky),
        (RightPinky, RightIndex),
        (RightIndex, RightThumb),
        (RightThumb, RightWrist),
    ]
});

pub(crate) const FULL_BODY_EDGES: [(usize, usize); 24] = to_edges({
    use LandmarkIdx::*;
    [
        (LeftShoulder, RightShoulder),
        // Left arm and hand:
        (LeftShoulder, LeftElbow),
        (LeftElbow, LeftWrist),
        (LeftWrist, LeftPinky),
        (LeftPinky, LeftIndex),
        (LeftIndex, LeftThumb),
        (LeftThumb, LeftWrist),
        // Right arm and hand:
        (RightShoulder, RightElbow),
        (RightElbow, RightWrist),
        (RightWrist, RightPinky),
        (RightPinky, RightIndex),
        (RightIndex, RightThumb),
        (RightThumb, RightWrist),
        // Torso:
        (LeftShoulder, LeftHip),
        (RightShoulder, RightHip),
        (LeftHip, RightHip),
        // Left leg:
        (LeftHip, LeftKnee),
        (LeftKnee, LeftAnkle),
        (LeftAnkle, LeftHeel),
        (LeftHeel, LeftFootIndex),
        // Right leg:
        (RightHip, RightKnee),
        (RightKnee, RightAnkle),
        (RightAnkle, RightHeel),
        (RightHeel, RightFootIndex),
    ]
});

const fn index_range<const N: usize>(first: LandmarkIdx, last: LandmarkIdx) -> [usize; N] {
    assert!(last as usize - first as usize + 1 == N);
    let mut out = [0; N];
    let mut i = 0;
    while i < N {
        out[i] = first as usize + i;
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
