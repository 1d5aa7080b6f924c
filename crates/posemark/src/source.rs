//! Collaborators that feed the renderer: landmark detectors and frame sources.

use std::{
    path::{Path, PathBuf},
    vec,
};

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::{
    hand::Handedness,
    image::{self, Color, Image, Resolution},
    landmark::{Landmarks, Subject},
};

/// The landmark sets a detector found in one frame. Every set is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Detections {
    #[serde(default)]
    pub pose: Option<Landmarks>,
    #[serde(default)]
    pub left_hand: Option<Landmarks>,
    #[serde(default)]
    pub right_hand: Option<Landmarks>,
    #[serde(default)]
    pub face: Option<Landmarks>,
}

impl Detections {
    /// Returns the sets that are present, in drawing order: face, pose, left hand, right hand.
    pub fn iter(&self) -> impl Iterator<Item = (Subject, &Landmarks)> {
        [
            (Subject::Face, &self.face),
            (Subject::Pose, &self.pose),
            (Subject::Hand(Handedness::Left), &self.left_hand),
            (Subject::Hand(Handedness::Right), &self.right_hand),
        ]
        .into_iter()
        .filter_map(|(subject, set)| set.as_ref().map(|set| (subject, set)))
    }

    pub fn get(&self, subject: Subject) -> Option<&Landmarks> {
        match subject {
            Subject::Pose => self.pose.as_ref(),
            Subject::Hand(Handedness::Left) => self.left_hand.as_ref(),
            Subject::Hand(Handedness::Right) => self.right_hand.as_ref(),
            Subject::Face => self.face.as_ref(),
        }
    }

    pub fn get_mut(&mut self, subject: Subject) -> &mut Option<Landmarks> {
        match subject {
            Subject::Pose => &mut self.pose,
            Subject::Hand(Handedness::Left) => &mut self.left_hand,
            Subject::Hand(Handedness::Right) => &mut self.right_hand,
            Subject::Face => &mut self.face,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Options for landmark detectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorOptions {
    min_detection_confidence: f32,
    min_tracking_confidence: f32,
    upper_body_only: bool,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            min_detection_confidence: 0.7,
            min_tracking_confidence: 0.5,
            upper_body_only: false,
        }
    }
}

impl DetectorOptions {
    /// Sets the minimum confidence needed to report a newly detected set.
    ///
    /// Defaults to 0.7.
    pub fn min_detection_confidence(self, min_detection_confidence: f32) -> Self {
        Self {
            min_detection_confidence,
            ..self
        }
    }

    /// Sets the minimum confidence needed to keep reporting a set found in the previous frame.
    ///
    /// Defaults to 0.5.
    pub fn min_tracking_confidence(self, min_tracking_confidence: f32) -> Self {
        Self {
            min_tracking_confidence,
            ..self
        }
    }

    /// Only track the upper body. Off by default.
    pub fn upper_body_only(self, upper_body_only: bool) -> Self {
        Self {
            upper_body_only,
            ..self
        }
    }

    pub fn detection_threshold(&self) -> f32 {
        self.min_detection_confidence
    }

    pub fn tracking_threshold(&self) -> f32 {
        self.min_tracking_confidence
    }

    pub fn is_upper_body_only(&self) -> bool {
        self.upper_body_only
    }
}

/// Finds landmark sets in frames.
pub trait Detector {
    fn detect(&mut self, frame: &Image) -> anyhow::Result<Detections>;
}

/// A sequence of frames of a fixed resolution.
pub trait FrameSource {
    /// Returns the resolution of the frames, or [`None`] if no frame was produced yet and the
    /// resolution is not known in advance.
    fn resolution(&self) -> Option<Resolution>;

    /// Returns the next frame, or [`None`] at the end of the stream.
    fn next_frame(&mut self) -> anyhow::Result<Option<Image>>;
}

/// A [`FrameSource`] reading image files from disk.
///
/// All images must have the same resolution as the first one.
pub struct ImageSequence {
    paths: vec::IntoIter<PathBuf>,
    resolution: Option<Resolution>,
    mirror: bool,
}

impl ImageSequence {
    /// Opens a single image file, or all supported image files in a directory, sorted by name.
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Self::open_impl(path.as_ref())
    }

    fn open_impl(path: &Path) -> anyhow::Result<Self> {
        let paths = if path.is_dir() {
            let mut paths = Vec::new();
            for entry in std::fs::read_dir(path)
                .with_context(|| format!("failed to read directory {}", path.display()))?
            {
                let entry_path = entry?.path();
                if image::is_supported_path(&entry_path) {
                    paths.push(entry_path);
                }
            }
            paths.sort();
            if paths.is_empty() {
                bail!("no image files found in {}", path.display());
            }
            paths
        } else {
            vec![path.to_path_buf()]
        };

        log::debug!("found {} frame(s) in {}", paths.len(), path.display());
        Ok(Self {
            paths: paths.into_iter(),
            resolution: None,
            mirror: false,
        })
    }

    /// Mirrors every frame horizontally (selfie view).
    pub fn mirror(self, mirror: bool) -> Self {
        Self { mirror, ..self }
    }

    /// Returns the number of frames that have not been read yet.
    pub fn remaining(&self) -> usize {
        self.paths.len()
    }
}

impl FrameSource for ImageSequence {
    fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    fn next_frame(&mut self) -> anyhow::Result<Option<Image>> {
        let Some(path) = self.paths.next() else {
            return Ok(None);
        };

        let mut image = Image::load(&path)?;
        match self.resolution {
            None => self.resolution = Some(image.resolution()),
            Some(res) if res != image.resolution() => bail!(
                "{} has resolution {}, expected {}",
                path.display(),
                image.resolution(),
                res
            ),
            Some(_) => {}
        }

        if self.mirror {
            image.flip_horizontal_in_place();
        }
        Ok(Some(image))
    }
}

/// A [`FrameSource`] producing a fixed number of black frames.
pub struct BlankFrames {
    resolution: Resolution,
    remaining: usize,
}

impl BlankFrames {
    pub fn new(resolution: Resolution, count: usize) -> Self {
        Self {
            resolution,
            remaining: count,
        }
    }
}

impl FrameSource for BlankFrames {
    fn resolution(&self) -> Option<Resolution> {
        Some(self.resolution)
    }

    fn next_frame(&mut self) -> anyhow::Result<Option<Image>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        Ok(Some(Image::filled(self.resolution, Color::BLACK)))
    }
}
