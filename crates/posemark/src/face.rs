//! Face mesh landmark indices and the feature outlines drawn for them.
//!
//! The face mesh has 468 landmarks. Only a handful of them have names; the outlines of the
//! eyebrows, eyes and lips are listed as raw mesh indices.

/// Number of landmarks in a face landmark set.
pub const NUM_LANDMARKS: usize = 468;

/// Names for a few notable face mesh landmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkIdx {
    MouthLeft = 78,
    MouthRight = 308,
    MouthTop = 13,
    MouthBottom = 14,
    LeftEyeInnerCorner = 133,
    LeftEyeTop = 159,
    LeftEyeBottom = 145,
    RightEyeInnerCorner = 362,
    RightEyeTop = 386,
    RightEyeBottom = 374,
    LeftEyebrowInnerCorner = 65,
    RightEyebrowInnerCorner = 295,
}

/// Every mesh landmark gets a marker.
pub(crate) const KEY_POINTS: [usize; NUM_LANDMARKS] = {
    let mut out = [0; NUM_LANDMARKS];
    let mut i = 0;
    while i < NUM_LANDMARKS {
        out[i] = i;
        i += 1;
    }
    out
};

const LEFT_EYEBROW: [usize; 5] = [55, 65, 52, 53, 46];
const RIGHT_EYEBROW: [usize; 5] = [285, 295, 282, 283, 276];
const LEFT_EYE: [usize; 15] = [
    133, 173, 157, 158, 159, 160, 161, 246, 163, 144, 145, 153, 154, 155, 133,
];
const RIGHT_EYE: [usize; 15] = [
    362, 398, 384, 385, 386, 387, 388, 466, 390, 373, 374, 380, 381, 382, 362,
];
const LIPS: [usize; 21] = [
    308, 415, 310, 311, 312, 13, 82, 81, 80, 191, 78, 95, 88, 178, 87, 14, 317, 402, 318, 324,
    308,
];

const OUTLINES: [&[usize]; 5] = [&LEFT_EYEBROW, &RIGHT_EYEBROW, &LEFT_EYE, &RIGHT_EYE, &LIPS];

const NUM_EDGES: usize =
    LEFT_EYEBROW.len() + RIGHT_EYEBROW.len() + LEFT_EYE.len() + RIGHT_EYE.len() + LIPS.len() - 5;

/// Feature outlines, as consecutive pairs of each polyline.
pub(crate) const EDGES: [(usize, usize); NUM_EDGES] = {
    let mut out = [(0, 0); NUM_EDGES];
    let mut n = 0;
    let mut l = 0;
    while l < OUTLINES.len() {
        let line = OUTLINES[l];
        let mut i = 1;
        while i < line.len() {
            out[n] = (line[i - 1], line[i]);
            n += 1;
            i += 1;
        }
        l += 1;
    }
    assert!(n == NUM_EDGES);
    out
};
