//! Static connectivity tables that describe how each kind of landmark set is drawn.

use crate::{body, face, hand, landmark::LandmarkKind};

/// Extra ring drawn around a key point on top of its regular marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    ThumbTip,
    Fingertip,
}

/// Describes which landmarks of a set get markers and which pairs of landmarks are connected.
///
/// A topology is a pure table: it owns no landmark data, and every index it contains is valid
/// for a set of its [`LandmarkKind`].
#[derive(Debug)]
pub struct Topology {
    kind: LandmarkKind,
    key_points: &'static [usize],
    edges: &'static [(usize, usize)],
    centroid: &'static [usize],
    accents: &'static [(usize, Accent)],
}

const HAND_ACCENTS: [(usize, Accent); 5] = [
    (hand::THUMB_TIP, Accent::ThumbTip),
    (hand::FINGERTIPS[0], Accent::Fingertip),
    (hand::FINGERTIPS[1], Accent::Fingertip),
    (hand::FINGERTIPS[2], Accent::Fingertip),
    (hand::FINGERTIPS[3], Accent::Fingertip),
];

const HAND_KEY_POINTS: [usize; hand::NUM_LANDMARKS] = {
    let mut out = [0; hand::NUM_LANDMARKS];
    let mut i = 0;
    while i < hand::NUM_LANDMARKS {
        out[i] = i;
        i += 1;
    }
    out
};

/// A hand: every landmark is marked, fingertips are highlighted, and the palm has a centroid.
pub static HAND: Topology = Topology {
    kind: LandmarkKind::Hand,
    key_points: &HAND_KEY_POINTS,
    edges: &hand::EDGES,
    centroid: &hand::PALM,
    accents: &HAND_ACCENTS,
};

/// Shoulders, arms, hands and hips of a pose.
pub static UPPER_BODY: Topology = Topology {
    kind: LandmarkKind::Pose,
    key_points: &body::UPPER_BODY_KEY_POINTS,
    edges: &body::UPPER_BODY_EDGES,
    centroid: &[],
    accents: &[],
};

/// The whole pose below the head, including torso and legs.
pub static FULL_BODY: Topology = Topology {
    kind: LandmarkKind::Pose,
    key_points: &body::FULL_BODY_KEY_POINTS,
    edges: &body::FULL_BODY_EDGES,
    centroid: &[],
    accents: &[],
};

/// A face mesh with eyebrow, eye and lip outlines.
pub static FACE: Topology = Topology {
    kind: LandmarkKind::Face,
    key_points: &face::KEY_POINTS,
    edges: &face::EDGES,
    centroid: &[],
    accents: &[],
};

impl Topology {
    /// Selects the topology used to draw a set of the given kind.
    ///
    /// `upper_body_only` only affects [`LandmarkKind::Pose`].
    pub fn for_kind(kind: LandmarkKind, upper_body_only: bool) -> &'static Topology {
        match kind {
            LandmarkKind::Pose if upper_body_only => &UPPER_BODY,
            LandmarkKind::Pose => &FULL_BODY,
            LandmarkKind::Hand => &HAND,
            LandmarkKind::Face => &FACE,
        }
    }

    pub fn kind(&self) -> LandmarkKind {
        self.kind
    }

    /// Indices of the landmarks that get a marker.
    pub fn key_points(&self) -> &'static [usize] {
        self.key_points
    }

    /// Unordered pairs of landmark indices connected by a line.
    pub fn edges(&self) -> &'static [(usize, usize)] {
        self.edges
    }

    /// The landmarks whose centroid is drawn, in polygon order, or [`None`] if this kind has no
    /// centroid.
    pub fn centroid(&self) -> Option<&'static [usize]> {
        if self.centroid.is_empty() {
            None
        } else {
            Some(self.centroid)
        }
    }

    pub fn accents(&self) -> &'static [(usize, Accent)] {
        self.accents
    }
}
