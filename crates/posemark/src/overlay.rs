//! The overlay renderer: turns a frame's detections into drawing primitives.

use crate::{
    canvas::{Canvas, Stroke, TextSize},
    error::ContractViolation,
    feature::{self, BoundingRect, CentroidMethod},
    gate::Gate,
    image::{Color, Image, Resolution},
    landmark::{LandmarkKind, Landmarks, PixelPoint, Subject},
    source::Detections,
    topology::{Accent, Topology},
};

/// Size, color and outline of a circle drawn around a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerStyle {
    pub radius: u32,
    pub color: Color,
    pub stroke: Stroke,
}

impl MarkerStyle {
    pub const fn new(radius: u32, color: Color, width: u32) -> Self {
        Self {
            radius,
            color,
            stroke: Stroke::Width(width),
        }
    }

    fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, center: PixelPoint) {
        canvas.circle(center, self.radius, self.color, self.stroke);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyle {
    pub color: Color,
    pub width: u32,
}

/// Marker and edge style of one kind of landmark set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetStyle {
    pub marker: MarkerStyle,
    pub edge: LineStyle,
}

/// Colors, radii and stroke widths of everything the renderer draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayStyle {
    pub pose: SetStyle,
    pub hand: SetStyle,
    pub face: SetStyle,
    pub thumb_tip: MarkerStyle,
    pub fingertip: MarkerStyle,
    pub centroid: MarkerStyle,
    /// Color of the handedness label next to the palm centroid.
    pub handedness: Color,
    /// Color of the `z:` depth labels next to hand landmarks.
    pub depth: Color,
    pub bounding_rect: LineStyle,
}

impl OverlayStyle {
    pub fn for_kind(&self, kind: LandmarkKind) -> &SetStyle {
        match kind {
            LandmarkKind::Pose => &self.pose,
            LandmarkKind::Hand => &self.hand,
            LandmarkKind::Face => &self.face,
        }
    }

    pub fn accent(&self, accent: Accent) -> &MarkerStyle {
        match accent {
            Accent::ThumbTip => &self.thumb_tip,
            Accent::Fingertip => &self.fingertip,
        }
    }
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            pose: SetStyle {
                marker: MarkerStyle::new(5, Color::GREEN, 2),
                edge: LineStyle {
                    color: Color::GREEN,
                    width: 2,
                },
            },
            hand: SetStyle {
                marker: MarkerStyle::new(5, Color::RED, 2),
                edge: LineStyle {
                    color: Color::BLUE,
                    width: 2,
                },
            },
            face: SetStyle {
                marker: MarkerStyle::new(1, Color::GREEN, 1),
                edge: LineStyle {
                    color: Color::GREEN,
                    width: 2,
                },
            },
            thumb_tip: MarkerStyle::new(12, Color::GREEN, 2),
            fingertip: MarkerStyle::new(12, Color::YELLOW, 2),
            centroid: MarkerStyle::new(12, Color::BLUE, 2),
            handedness: Color::BLUE,
            depth: Color::BLUE,
            bounding_rect: LineStyle {
                color: Color::GREEN,
                width: 2,
            },
        }
    }
}

/// Options for the [`Overlay`] renderer.
#[derive(Debug, Clone)]
pub struct OverlayOptions {
    visibility_threshold: f32,
    bounding_rect: bool,
    upper_body_only: bool,
    draw_face: bool,
    mirrored_handedness: bool,
    centroid_method: CentroidMethod,
    style: OverlayStyle,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            visibility_threshold: 0.5,
            bounding_rect: false,
            upper_body_only: false,
            draw_face: false,
            mirrored_handedness: true,
            centroid_method: CentroidMethod::default(),
            style: OverlayStyle::default(),
        }
    }
}

impl OverlayOptions {
    /// Sets the minimum visibility a pose landmark needs to be drawn.
    ///
    /// Defaults to 0.5. Hand and face landmarks are not affected.
    pub fn visibility_threshold(self, visibility_threshold: f32) -> Self {
        Self {
            visibility_threshold,
            ..self
        }
    }

    /// Draws the bounding rectangle of every landmark set.
    ///
    /// Off by default.
    pub fn bounding_rect(self, bounding_rect: bool) -> Self {
        Self {
            bounding_rect,
            ..self
        }
    }

    /// Restricts pose annotations to the upper body and disables hand depth labels.
    ///
    /// Off by default.
    pub fn upper_body_only(self, upper_body_only: bool) -> Self {
        Self {
            upper_body_only,
            ..self
        }
    }

    /// Draws face mesh landmarks if the detections contain them.
    ///
    /// Off by default.
    pub fn draw_face(self, draw_face: bool) -> Self {
        Self { draw_face, ..self }
    }

    /// Swaps the handedness labels, for frames that were mirrored before detection.
    ///
    /// On by default.
    pub fn mirrored_handedness(self, mirrored_handedness: bool) -> Self {
        Self {
            mirrored_handedness,
            ..self
        }
    }

    pub fn centroid_method(self, centroid_method: CentroidMethod) -> Self {
        Self {
            centroid_method,
            ..self
        }
    }

    pub fn style(self, style: OverlayStyle) -> Self {
        Self { style, ..self }
    }
}

/// What was derived and drawn for one landmark set.
#[derive(Debug, Clone, PartialEq)]
pub struct SetAnnotation {
    pub subject: Subject,
    /// Encloses every landmark of the set, whether drawn or not.
    pub bounding_rect: Option<BoundingRect>,
    /// Palm centroid; only hands have one.
    pub centroid: Option<PixelPoint>,
    pub markers: usize,
    pub edges: usize,
}

/// Summary of one [`Overlay::annotate`] call, in drawing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotations {
    sets: Vec<SetAnnotation>,
}

impl Annotations {
    pub fn iter(&self) -> impl Iterator<Item = &SetAnnotation> {
        self.sets.iter()
    }

    pub fn get(&self, subject: Subject) -> Option<&SetAnnotation> {
        self.sets.iter().find(|set| set.subject == subject)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

/// Draws skeletons, key point markers, palm centroids and bounding rectangles for a frame's
/// detections.
///
/// The renderer holds nothing but its options; every call recomputes the annotations from the
/// landmarks it is passed.
#[derive(Debug, Clone, Default)]
pub struct Overlay {
    options: OverlayOptions,
}

impl Overlay {
    pub fn new(options: OverlayOptions) -> Self {
        Self { options }
    }

    /// Annotates an image with `detections`.
    pub fn annotate_image(
        &self,
        detections: &Detections,
        image: &mut Image,
    ) -> Result<Annotations, ContractViolation> {
        let res = image.resolution();
        self.annotate(detections, res, image)
    }

    /// Draws `detections` onto `canvas`, which covers a frame of resolution `res`.
    ///
    /// Sets are drawn in the order face, pose, left hand, right hand. Absent sets are skipped.
    ///
    /// Every set that will be drawn is validated before anything is drawn: if any of them does
    /// not have the number of landmarks its kind requires, or `res` is empty, the canvas is left
    /// untouched and an error is returned. A face set is ignored entirely unless face drawing is
    /// enabled.
    pub fn annotate<C: Canvas + ?Sized>(
        &self,
        detections: &Detections,
        res: Resolution,
        canvas: &mut C,
    ) -> Result<Annotations, ContractViolation> {
        if detections.face.is_some() && !self.options.draw_face {
            log::trace!("face drawing disabled, skipping face set");
        }
        if let Err(e) = validate(self.drawn_sets(detections), res) {
            log::error!("not annotating frame: {}", e);
            return Err(e);
        }

        let mut annotations = Annotations::default();
        for (subject, landmarks) in self.drawn_sets(detections) {
            let set = self.annotate_set(subject, landmarks, res, canvas);
            log::trace!(
                "{}: {} markers, {} edges, bounding rect {:?}, centroid {:?}",
                set.subject,
                set.markers,
                set.edges,
                set.bounding_rect,
                set.centroid,
            );
            annotations.sets.push(set);
        }

        Ok(annotations)
    }

    fn drawn_sets<'a>(
        &self,
        detections: &'a Detections,
    ) -> impl Iterator<Item = (Subject, &'a Landmarks)> + 'a {
        let draw_face = self.options.draw_face;
        detections
            .iter()
            .filter(move |(subject, _)| draw_face || *subject != Subject::Face)
    }

    fn annotate_set<C: Canvas + ?Sized>(
        &self,
        subject: Subject,
        landmarks: &Landmarks,
        res: Resolution,
        canvas: &mut C,
    ) -> SetAnnotation {
        let kind = subject.kind();
        let topology = Topology::for_kind(kind, self.options.upper_body_only);
        let gate = Gate::for_kind(kind, self.options.visibility_threshold);
        let style = &self.options.style;
        let set_style = style.for_kind(kind);
        let points = landmarks.to_pixels(res);
        let depth_labels = kind == LandmarkKind::Hand && !self.options.upper_body_only;

        let mut markers = 0;
        for &i in topology.key_points() {
            let landmark = landmarks.get(i);
            if !gate.passes(&landmark) {
                continue;
            }

            let p = points[i];
            set_style.marker.draw(canvas, p);
            markers += 1;

            for &(_, accent) in topology.accents().iter().filter(|(idx, _)| *idx == i) {
                style.accent(accent).draw(canvas, p);
            }

            if depth_labels {
                let label = format!("z:{:.3}", landmark.z());
                canvas.text(&label, p.offset(-10, -10), style.depth, TextSize::Small);
            }
        }

        let mut edges = 0;
        for &(a, b) in topology.edges() {
            if gate.passes_edge(landmarks, (a, b)) {
                canvas.line(points[a], points[b], set_style.edge.color, set_style.edge.width);
                edges += 1;
            }
        }

        let method = self.options.centroid_method;
        let centroid = topology
            .centroid()
            .and_then(|indices| feature::centroid(&points, indices, method));
        if let (Subject::Hand(handedness), Some(c)) = (subject, centroid) {
            if landmarks.iter().any(|lm| gate.passes(&lm)) {
                style.centroid.draw(canvas, c);
                let label = handedness.label(self.options.mirrored_handedness);
                canvas.text(label, c.offset(-6, 6), style.handedness, TextSize::Normal);
            }
        }

        let bounding_rect = BoundingRect::enclosing(points.iter().copied());
        if let Some(rect) = bounding_rect.filter(|_| self.options.bounding_rect) {
            canvas.rect(
                rect.top_left(),
                rect.bottom_right(),
                style.bounding_rect.color,
                style.bounding_rect.width,
            );
        }

        SetAnnotation {
            subject,
            bounding_rect,
            centroid,
            markers,
            edges,
        }
    }
}

fn validate<'a>(
    sets: impl Iterator<Item = (Subject, &'a Landmarks)>,
    res: Resolution,
) -> Result<(), ContractViolation> {
    if res.is_empty() {
        return Err(ContractViolation::EmptyFrame(res));
    }

    for (subject, landmarks) in sets {
        let expected = subject.kind().landmark_count();
        if landmarks.len() != expected {
            return Err(ContractViolation::LandmarkCount {
                subject,
                expected,
                actual: landmarks.len(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::{
        canvas::{DrawCommand, Recorder},
        hand::Handedness,
        landmark::Landmark,
    };

    use super::*;

    fn hand_at(x: f32, y: f32, spread: f32) -> Landmarks {
        (0..crate::hand::NUM_LANDMARKS)
            .map(|i| {
                let angle = i as f32 / 21.0 * std::f32::consts::TAU;
                Landmark::new([
                    x + angle.cos() * spread,
                    y + angle.sin() * spread,
                    0.01 * i as f32,
                ])
            })
            .collect()
    }

    fn res() -> Resolution {
        Resolution::new(640, 480)
    }

    #[test]
    fn hand_draws_everything() {
        let detections = Detections {
            left_hand: Some(hand_at(0.5, 0.5, 0.1)),
            ..Default::default()
        };
        let mut rec = Recorder::new();
        let annotations = Overlay::default()
            .annotate(&detections, res(), &mut rec)
            .unwrap();

        let set = annotations.get(Subject::Hand(Handedness::Left)).unwrap();
        assert_eq!(set.markers, 21);
        assert_eq!(set.edges, 21);
        assert!(set.centroid.is_some());
        // 21 markers, 5 accents and the centroid ring.
        assert_eq!(rec.circles().count(), 27);
        assert_eq!(rec.lines().count(), 21);
        // 21 depth labels and the handedness label.
        let texts: Vec<_> = rec.texts().collect();
        assert_eq!(texts.len(), 22);
        assert_eq!(texts[0].0, "z:0.000");
        assert_eq!(texts[20].0, "z:0.200");
        assert_eq!(texts[21].0, "R");
        assert_eq!(rec.rects().count(), 0);

        let sizes: Vec<_> = rec
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { size, .. } => Some(*size),
                _ => None,
            })
            .collect();
        assert!(sizes[..21].iter().all(|&size| size == TextSize::Small));
        assert_eq!(sizes[21], TextSize::Normal);
    }

    #[test]
    fn upper_body_only_disables_depth_labels() {
        let detections = Detections {
            right_hand: Some(hand_at(0.5, 0.5, 0.1)),
            ..Default::default()
        };
        let overlay = Overlay::new(OverlayOptions::default().upper_body_only(true));
        let mut rec = Recorder::new();
        overlay.annotate(&detections, res(), &mut rec).unwrap();
        assert_eq!(rec.texts().count(), 1);
        assert_eq!(rec.texts().next().unwrap().0, "L");
    }

    #[test]
    fn absent_hand_points() {
        let mut hand = hand_at(0.5, 0.5, 0.1);
        hand.map(|lm| lm.with_presence(-1.0));
        let detections = Detections {
            left_hand: Some(hand),
            ..Default::default()
        };
        let mut rec = Recorder::new();
        let annotations = Overlay::default()
            .annotate(&detections, res(), &mut rec)
            .unwrap();
        assert!(rec.is_empty());
        // Geometry is still derived.
        let set = annotations.get(Subject::Hand(Handedness::Left)).unwrap();
        assert!(set.centroid.is_some());
        assert!(set.bounding_rect.is_some());
    }

    #[test]
    fn bounding_rect_option() {
        let detections = Detections {
            right_hand: Some(hand_at(0.5, 0.5, 0.1)),
            ..Default::default()
        };
        let overlay = Overlay::new(OverlayOptions::default().bounding_rect(true));
        let mut rec = Recorder::new();
        let annotations = overlay.annotate(&detections, res(), &mut rec).unwrap();
        let rect = annotations
            .get(Subject::Hand(Handedness::Right))
            .unwrap()
            .bounding_rect
            .unwrap();
        assert_eq!(
            rec.rects().collect::<Vec<_>>(),
            [(rect.top_left(), rect.bottom_right())]
        );
        assert_relative_eq!(rect.width() as f32, 128.0, max_relative = 0.05);
    }

    #[test]
    fn face_is_opt_in() {
        let face: Landmarks = vec![Landmark::new([0.5, 0.5, 0.0]); 468].into();
        let detections = Detections {
            face: Some(face),
            ..Default::default()
        };

        let mut rec = Recorder::new();
        let annotations = Overlay::default()
            .annotate(&detections, res(), &mut rec)
            .unwrap();
        assert!(rec.is_empty());
        assert!(annotations.is_empty());

        let overlay = Overlay::new(OverlayOptions::default().draw_face(true));
        overlay.annotate(&detections, res(), &mut rec).unwrap();
        assert_eq!(rec.circles().count(), 468);
        assert_eq!(rec.lines().count(), crate::face::EDGES.len());
    }

    #[test]
    fn disabled_face_is_not_validated() {
        // Refined face meshes carry iris landmarks on top of the 468 mesh points.
        let face: Landmarks = vec![Landmark::new([0.5, 0.5, 0.0]); 478].into();
        let detections = Detections {
            left_hand: Some(hand_at(0.5, 0.5, 0.1)),
            face: Some(face),
            ..Default::default()
        };

        let mut rec = Recorder::new();
        let annotations = Overlay::default()
            .annotate(&detections, res(), &mut rec)
            .unwrap();
        assert_eq!(annotations.len(), 1);
        assert!(annotations.get(Subject::Face).is_none());
        assert_eq!(rec.lines().count(), 21);

        let mut rec = Recorder::new();
        let err = Overlay::new(OverlayOptions::default().draw_face(true))
            .annotate(&detections, res(), &mut rec)
            .unwrap_err();
        assert_eq!(
            err,
            ContractViolation::LandmarkCount {
                subject: Subject::Face,
                expected: 468,
                actual: 478,
            }
        );
        assert!(rec.is_empty());
    }

    #[test]
    fn empty_frame() {
        let mut rec = Recorder::new();
        let err = Overlay::default()
            .annotate(&Detections::default(), Resolution::new(0, 0), &mut rec)
            .unwrap_err();
        assert_eq!(err, ContractViolation::EmptyFrame(Resolution::new(0, 0)));
    }
}
