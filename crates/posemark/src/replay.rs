//! A [`Detector`] that replays detections recorded to a JSON-lines file.
//!
//! Every non-empty line holds the detections of one frame: an object with the optional keys
//! `pose`, `left_hand`, `right_hand` and `face`. Each set is either a plain array of landmarks or
//! an object `{"score": <f32>, "landmarks": [...]}`. Landmarks are objects with `x` and `y` and
//! the optional keys `z`, `visibility` and `presence`.
//!
//! ```text
//! {"pose": {"score": 0.93, "landmarks": [{"x": 0.51, "y": 0.32, "visibility": 0.99}, ...]}}
//! {"left_hand": [{"x": 0.4, "y": 0.6, "z": -0.02}, ...], "right_hand": null}
//! ```

use std::{
    collections::HashSet,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    vec,
};

use anyhow::Context;
use serde::Deserialize;

use crate::{
    body,
    hand::Handedness,
    image::Image,
    landmark::{Landmarks, Subject},
    source::{Detections, Detector, DetectorOptions},
};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordedSet {
    Scored {
        #[serde(default)]
        score: Option<f32>,
        landmarks: Landmarks,
    },
    Bare(Landmarks),
}

impl RecordedSet {
    /// Sets without a recorded score are treated as certain detections.
    fn score(&self) -> f32 {
        match self {
            Self::Scored { score, .. } => score.unwrap_or(1.0),
            Self::Bare(_) => 1.0,
        }
    }

    fn into_landmarks(self) -> Landmarks {
        match self {
            Self::Scored { landmarks, .. } | Self::Bare(landmarks) => landmarks,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RecordedFrame {
    #[serde(default)]
    pose: Option<RecordedSet>,
    #[serde(default)]
    left_hand: Option<RecordedSet>,
    #[serde(default)]
    right_hand: Option<RecordedSet>,
    #[serde(default)]
    face: Option<RecordedSet>,
}

impl RecordedFrame {
    fn into_sets(self) -> impl Iterator<Item = (Subject, RecordedSet)> {
        [
            (Subject::Face, self.face),
            (Subject::Pose, self.pose),
            (Subject::Hand(Handedness::Left), self.left_hand),
            (Subject::Hand(Handedness::Right), self.right_hand),
        ]
        .into_iter()
        .filter_map(|(subject, set)| set.map(|set| (subject, set)))
    }
}

/// Replays recorded detections, one recorded frame per [`Detector::detect`] call.
///
/// The [`DetectorOptions`] are applied to the recording: a set is only reported if its score
/// reaches the detection threshold, or the tracking threshold if the same set was reported for
/// the previous frame. In upper-body mode, pose landmarks below the hips are reported as not
/// visible.
pub struct Replay {
    frames: vec::IntoIter<RecordedFrame>,
    options: DetectorOptions,
    tracked: HashSet<Subject>,
    exhausted: bool,
}

impl Replay {
    /// Loads a recording from a JSON-lines file.
    pub fn open<P: AsRef<Path>>(path: P, options: DetectorOptions) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        Self::from_reader(BufReader::new(file), options)
            .with_context(|| format!("failed to load recorded detections from {}", path.display()))
    }

    /// Loads a recording from a reader yielding JSON lines.
    pub fn from_reader<R: BufRead>(reader: R, options: DetectorOptions) -> anyhow::Result<Self> {
        let mut frames = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let frame: RecordedFrame = serde_json::from_str(&line)
                .with_context(|| format!("invalid detections on line {}", i + 1))?;
            frames.push(frame);
        }

        log::debug!("loaded {} recorded frame(s)", frames.len());
        Ok(Self {
            frames: frames.into_iter(),
            options,
            tracked: HashSet::new(),
            exhausted: false,
        })
    }

    /// Returns the number of recorded frames that have not been replayed yet.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl Detector for Replay {
    fn detect(&mut self, _frame: &Image) -> anyhow::Result<Detections> {
        let Some(recorded) = self.frames.next() else {
            if !self.exhausted {
                log::warn!("recorded detections exhausted, reporting empty frames");
                self.exhausted = true;
            }
            self.tracked.clear();
            return Ok(Detections::default());
        };

        let mut detections = Detections::default();
        for (subject, set) in recorded.into_sets() {
            let threshold = if self.tracked.contains(&subject) {
                self.options.tracking_threshold()
            } else {
                self.options.detection_threshold()
            };
            let score = set.score();
            if score < threshold {
                log::warn!(
                    "dropping {} with score {:.3} (threshold {})",
                    subject,
                    score,
                    threshold
                );
                continue;
            }

            let mut landmarks = set.into_landmarks();
            if subject == Subject::Pose && self.options.is_upper_body_only() {
                hide_lower_body(&mut landmarks);
            }
            *detections.get_mut(subject) = Some(landmarks);
        }

        self.tracked = detections.iter().map(|(subject, _)| subject).collect();
        Ok(detections)
    }
}

fn hide_lower_body(pose: &mut Landmarks) {
    let first = body::LandmarkIdx::LeftKnee as usize;
    for i in first..pose.len() {
        let lm = pose.get(i);
        pose.set(i, lm.with_visibility(0.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand_line(score: f32) -> String {
        let landmarks = vec![r#"{"x": 0.5, "y": 0.5}"#; 21].join(",");
        format!(r#"{{"left_hand": {{"score": {score}, "landmarks": [{landmarks}]}}}}"#)
    }

    fn load(lines: &[String], options: DetectorOptions) -> Replay {
        Replay::from_reader(lines.join("\n").as_bytes(), options).unwrap()
    }

    fn frame() -> Image {
        Image::new(1, 1)
    }

    #[test]
    fn detection_then_tracking_threshold() {
        let lines = [
            hand_line(0.6), // below detection threshold
            hand_line(0.8), // detected
            hand_line(0.6), // tracked
            String::new(),
            hand_line(0.4), // lost
            hand_line(0.6), // needs detection threshold again
        ];
        let mut replay = load(&lines, DetectorOptions::default());
        assert_eq!(replay.remaining(), 5);

        let found: Vec<bool> = (0..5)
            .map(|_| replay.detect(&frame()).unwrap().left_hand.is_some())
            .collect();
        assert_eq!(found, [false, true, true, false, false]);
    }

    #[test]
    fn bare_sets_and_exhaustion() {
        let landmarks = vec![r#"{"x": 0.1, "y": 0.9, "z": 0.5}"#; 21].join(",");
        let lines = [format!(r#"{{"right_hand": [{landmarks}], "pose": null}}"#)];
        let mut replay = load(&lines, DetectorOptions::default());

        let detections = replay.detect(&frame()).unwrap();
        let hand = detections.right_hand.unwrap();
        assert_eq!(hand.len(), 21);
        assert_eq!(hand.get(3).position(), [0.1, 0.9, 0.5]);
        assert!(detections.pose.is_none());

        assert!(replay.detect(&frame()).unwrap().is_empty());
        assert!(replay.detect(&frame()).unwrap().is_empty());
    }

    #[test]
    fn upper_body_only_hides_legs() {
        let landmarks = vec![r#"{"x": 0.5, "y": 0.5, "visibility": 0.9}"#; 33].join(",");
        let lines = [format!(r#"{{"pose": [{landmarks}]}}"#)];
        let mut replay = load(&lines, DetectorOptions::default().upper_body_only(true));

        let pose = replay.detect(&frame()).unwrap().pose.unwrap();
        assert_eq!(pose.get(24).visibility(), 0.9);
        assert_eq!(pose.get(25).visibility(), 0.0);
        assert_eq!(pose.get(32).visibility(), 0.0);
    }

    #[test]
    fn reports_bad_line() {
        let err = Replay::from_reader(
            "{}\n{\"pose\": 5}\n".as_bytes(),
            DetectorOptions::default(),
        )
        .err()
        .unwrap();
        assert!(err.to_string().contains("line 2"), "{err}");
    }
}
