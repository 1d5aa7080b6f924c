//! Landmark data model and the mapping from normalized to pixel coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{hand::Handedness, image::Resolution};

/// A single landmark as reported by a detector.
///
/// X and Y are normalized to the image width and height; values slightly outside of 0.0 to 1.0
/// are common near the image border. Z is a relative depth whose scale is defined by the
/// detector.
///
/// `visibility` and `presence` are confidence scores. Kinds whose detector does not compute them
/// report 0.0, and negative values mean that the landmark is absent.
#[derive(Debug, PartialEq, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Landmark {
    x: f32,
    y: f32,
    #[serde(default)]
    z: f32,
    #[serde(default)]
    visibility: f32,
    #[serde(default)]
    presence: f32,
}

impl Landmark {
    pub fn new([x, y, z]: [f32; 3]) -> Self {
        Self {
            x,
            y,
            z,
            visibility: 0.0,
            presence: 0.0,
        }
    }

    pub fn with_visibility(self, visibility: f32) -> Self {
        Self { visibility, ..self }
    }

    pub fn with_presence(self, presence: f32) -> Self {
        Self { presence, ..self }
    }

    #[inline]
    pub fn position(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.z
    }

    #[inline]
    pub fn visibility(&self) -> f32 {
        self.visibility
    }

    #[inline]
    pub fn presence(&self) -> f32 {
        self.presence
    }
}

/// An ordered, index-addressed set of [`Landmark`]s describing one tracked entity.
///
/// The meaning of each index is fixed by the [`LandmarkKind`] of the set (see the
/// [`hand`][crate::hand], [`body`][crate::body] and [`face`][crate::face] modules). The
/// collection itself does not know its kind; the length is checked against the expected kind
/// before rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Landmarks {
    points: Vec<Landmark>,
}

impl Landmarks {
    /// Creates a new [`Landmarks`] collection containing `len` preallocated landmarks.
    ///
    /// All landmarks will start with all coordinates and scores at `0.0`.
    pub fn new(len: usize) -> Self {
        Self {
            points: vec![Landmark::default(); len],
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Landmark> + Clone + '_ {
        self.points.iter().copied()
    }

    pub fn get(&self, index: usize) -> Landmark {
        self.points[index]
    }

    pub fn set(&mut self, index: usize, landmark: Landmark) {
        self.points[index] = landmark;
    }

    pub fn map(&mut self, mut f: impl FnMut(Landmark) -> Landmark) {
        for lm in &mut self.points {
            *lm = f(*lm);
        }
    }

    /// Maps every landmark to pixel coordinates in an image of resolution `res`.
    ///
    /// The returned points are in the same order as the landmarks.
    pub fn to_pixels(&self, res: Resolution) -> Vec<PixelPoint> {
        self.iter()
            .map(|lm| PixelPoint::from_normalized(&lm, res))
            .collect()
    }
}

impl From<Vec<Landmark>> for Landmarks {
    fn from(points: Vec<Landmark>) -> Self {
        Self { points }
    }
}

impl FromIterator<Landmark> for Landmarks {
    fn from_iter<T: IntoIterator<Item = Landmark>>(iter: T) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

/// An integer pixel position inside an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Maps a normalized landmark position to pixel coordinates in an image of size `res`.
    ///
    /// Each coordinate is scaled by the image dimension, rounded down, and clamped to the valid
    /// pixel range, so the result always lies inside the image. Non-finite coordinates clamp as
    /// well (NaN maps to 0).
    ///
    /// # Panics
    ///
    /// This function panics if `res` has a width or height of 0.
    pub fn from_normalized(landmark: &Landmark, res: Resolution) -> Self {
        to_pixel(landmark, res.width(), res.height())
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for PixelPoint {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Maps a normalized landmark to pixel coordinates in a `width x height` image.
///
/// See [`PixelPoint::from_normalized`].
pub fn to_pixel(landmark: &Landmark, width: u32, height: u32) -> PixelPoint {
    assert!(
        width > 0 && height > 0,
        "cannot map landmarks into a {}x{} image",
        width,
        height
    );

    PixelPoint {
        x: scale_and_clamp(landmark.x, width),
        y: scale_and_clamp(landmark.y, height),
    }
}

fn scale_and_clamp(coord: f32, extent: u32) -> i32 {
    // Float-to-int `as` casts saturate, and NaN becomes 0.
    let scaled = (f64::from(coord) * f64::from(extent)).floor() as i64;
    scaled.clamp(0, i64::from(extent) - 1) as i32
}

/// The anatomical schema of a landmark set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandmarkKind {
    /// Body pose with 33 landmarks.
    Pose,
    /// A single hand with 21 landmarks.
    Hand,
    /// A face mesh with 468 landmarks.
    Face,
}

impl LandmarkKind {
    /// Returns the number of landmarks every set of this kind has.
    pub const fn landmark_count(self) -> usize {
        match self {
            Self::Pose => crate::body::NUM_LANDMARKS,
            Self::Hand => crate::hand::NUM_LANDMARKS,
            Self::Face => crate::face::NUM_LANDMARKS,
        }
    }
}

/// Identifies which landmark set of a frame's detections is being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    Pose,
    /// A hand, as labeled by the detector.
    Hand(Handedness),
    Face,
}

impl Subject {
    pub fn kind(self) -> LandmarkKind {
        match self {
            Self::Pose => LandmarkKind::Pose,
            Self::Hand(_) => LandmarkKind::Hand,
            Self::Face => LandmarkKind::Face,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pose => f.write_str("pose"),
            Self::Hand(Handedness::Left) => f.write_str("left hand"),
            Self::Hand(Handedness::Right) => f.write_str("right hand"),
            Self::Face => f.write_str("face"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lm(x: f32, y: f32) -> Landmark {
        Landmark::new([x, y, 0.0])
    }

    #[test]
    fn maps_inside() {
        assert_eq!(to_pixel(&lm(0.0, 0.0), 100, 50), PixelPoint::new(0, 0));
        assert_eq!(to_pixel(&lm(0.5, 0.5), 100, 50), PixelPoint::new(50, 25));
        assert_eq!(to_pixel(&lm(0.999, 0.999), 100, 50), PixelPoint::new(99, 49));
        // Rounds down.
        assert_eq!(to_pixel(&lm(0.129, 0.0), 100, 50), PixelPoint::new(12, 0));
    }

    #[test]
    fn clamps_out_of_range() {
        assert_eq!(to_pixel(&lm(1.0, 1.0), 100, 50), PixelPoint::new(99, 49));
        assert_eq!(to_pixel(&lm(-0.01, 1.3), 100, 50), PixelPoint::new(0, 49));
        assert_eq!(to_pixel(&lm(7.0, -9.0), 100, 50), PixelPoint::new(99, 0));
        assert_eq!(
            to_pixel(&lm(f32::INFINITY, f32::NEG_INFINITY), 100, 50),
            PixelPoint::new(99, 0)
        );
        assert_eq!(to_pixel(&lm(f32::NAN, f32::NAN), 100, 50), PixelPoint::new(0, 0));
    }

    #[test]
    fn clamp_invariant_randomized() {
        let mut rng = fastrand::Rng::with_seed(0x5eed);
        for _ in 0..10_000 {
            let width = rng.u32(1..4000);
            let height = rng.u32(1..4000);
            let x = (rng.f32() - 0.5) * 6.0;
            let y = (rng.f32() - 0.5) * 6.0;
            let p = to_pixel(&lm(x, y), width, height);
            assert!(p.x >= 0 && p.x < width as i32, "{x} -> {p:?} in {width}");
            assert!(p.y >= 0 && p.y < height as i32, "{y} -> {p:?} in {height}");
        }
    }

    #[test]
    #[should_panic(expected = "cannot map landmarks")]
    fn empty_image() {
        to_pixel(&lm(0.5, 0.5), 0, 10);
    }

    #[test]
    fn to_pixels_preserves_order() {
        let set: Landmarks = [lm(0.0, 0.0), lm(0.5, 0.5), lm(1.0, 1.0)]
            .into_iter()
            .collect();
        assert_eq!(
            set.to_pixels(Resolution::new(10, 10)),
            [
                PixelPoint::new(0, 0),
                PixelPoint::new(5, 5),
                PixelPoint::new(9, 9)
            ]
        );
    }

    #[test]
    fn scores() {
        let lm = Landmark::new([0.1, 0.2, -0.3])
            .with_visibility(0.9)
            .with_presence(-1.0);
        assert_eq!(lm.position(), [0.1, 0.2, -0.3]);
        assert_eq!(lm.visibility(), 0.9);
        assert_eq!(lm.presence(), -1.0);
    }

    #[test]
    fn deserialize_defaults() {
        let set: Landmarks =
            serde_json::from_str(r#"[{"x": 0.25, "y": 0.5}, {"x": 1, "y": 0, "visibility": 0.75}]"#)
                .unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(0), Landmark::new([0.25, 0.5, 0.0]));
        assert_eq!(set.get(1).visibility(), 0.75);
        assert_eq!(set.get(1).presence(), 0.0);
    }

    #[test]
    fn kind_counts() {
        assert_eq!(LandmarkKind::Hand.landmark_count(), 21);
        assert_eq!(LandmarkKind::Pose.landmark_count(), 33);
        assert_eq!(LandmarkKind::Face.landmark_count(), 468);
        assert_eq!(Subject::Hand(Handedness::Left).kind(), LandmarkKind::Hand);
        assert_eq!(Subject::Hand(Handedness::Right).to_string(), "right hand");
    }
}
