use std::collections::HashMap;

use posemark::{
    body,
    canvas::{DrawCommand, Recorder},
    feature::{centroid, BoundingRect, CentroidMethod},
    hand::{self, Handedness},
    image::{Color, Image, Resolution},
    landmark::{Landmark, LandmarkKind, Landmarks, PixelPoint, Subject},
    overlay::{Overlay, OverlayOptions},
    source::Detections,
    topology::Topology,
    ContractViolation,
};

const RES: Resolution = Resolution::new(1000, 1000);

/// A pose whose landmarks all map to distinct pixels.
fn pose(visibility: impl Fn(usize) -> f32) -> Landmarks {
    (0..body::NUM_LANDMARKS)
        .map(|i| {
            let t = (i + 1) as f32 / 40.0;
            Landmark::new([t, 1.0 - t, 0.0]).with_visibility(visibility(i))
        })
        .collect()
}

fn hand_at(cx: f32, cy: f32) -> Landmarks {
    (0..hand::NUM_LANDMARKS)
        .map(|i| {
            let angle = i as f32 / hand::NUM_LANDMARKS as f32 * std::f32::consts::TAU;
            Landmark::new([cx + 0.05 * angle.cos(), cy + 0.05 * angle.sin(), 0.0])
        })
        .collect()
}

#[test]
fn invisible_pose_draws_nothing() {
    let detections = Detections {
        pose: Some(pose(|_| 0.0)),
        ..Default::default()
    };
    let mut rec = Recorder::new();
    let annotations = Overlay::default()
        .annotate(&detections, RES, &mut rec)
        .unwrap();

    assert!(rec.is_empty());
    let set = annotations.get(Subject::Pose).unwrap();
    assert_eq!((set.markers, set.edges), (0, 0));
    assert!(set.bounding_rect.is_some());
    assert!(set.centroid.is_none());
}

#[test]
fn wrong_landmark_count_draws_nothing() {
    let detections = Detections {
        pose: Some(Landmarks::new(10)),
        left_hand: Some(hand_at(0.5, 0.5)),
        ..Default::default()
    };

    let mut rec = Recorder::new();
    let err = Overlay::default()
        .annotate(&detections, RES, &mut rec)
        .unwrap_err();
    assert_eq!(
        err,
        ContractViolation::LandmarkCount {
            subject: Subject::Pose,
            expected: 33,
            actual: 10,
        }
    );
    assert!(rec.is_empty());

    // A bad set that is drawn last still prevents the earlier sets from being drawn.
    let detections = Detections {
        pose: Some(pose(|_| 1.0)),
        right_hand: Some(Landmarks::new(20)),
        ..Default::default()
    };
    let mut image = Image::filled(RES, Color::BLACK);
    let err = Overlay::default()
        .annotate_image(&detections, &mut image)
        .unwrap_err();
    assert!(err.to_string().contains("right hand"), "{err}");
    assert_eq!(image.count_pixels(Color::BLACK), RES.num_pixels() as usize);
}

#[test]
fn edges_are_gated_on_both_endpoints() {
    let mut rng = fastrand::Rng::with_seed(0xed6e);
    for upper_body_only in [false, true] {
        for _ in 0..200 {
            let visibility: Vec<f32> = (0..body::NUM_LANDMARKS).map(|_| rng.f32()).collect();
            let threshold = rng.f32();
            let landmarks = pose(|i| visibility[i]);
            let points = landmarks.to_pixels(RES);
            let index_of: HashMap<PixelPoint, usize> =
                points.iter().enumerate().map(|(i, &p)| (p, i)).collect();
            assert_eq!(index_of.len(), body::NUM_LANDMARKS);

            let detections = Detections {
                pose: Some(landmarks),
                ..Default::default()
            };
            let overlay = Overlay::new(
                OverlayOptions::default()
                    .visibility_threshold(threshold)
                    .upper_body_only(upper_body_only),
            );
            let mut rec = Recorder::new();
            overlay.annotate(&detections, RES, &mut rec).unwrap();

            let visible = |i: usize| visibility[i] >= threshold;
            let mut drawn = Vec::new();
            for (from, to) in rec.lines() {
                let (a, b) = (index_of[&from], index_of[&to]);
                assert!(visible(a) && visible(b), "edge {a}-{b} drawn");
                drawn.push((a, b));
            }

            let topology = Topology::for_kind(LandmarkKind::Pose, upper_body_only);
            let expected: Vec<_> = topology
                .edges()
                .iter()
                .copied()
                .filter(|&(a, b)| visible(a) && visible(b))
                .collect();
            assert_eq!(drawn, expected);

            for center in rec.circles() {
                let i = index_of[&center];
                assert!(visible(i) && topology.key_points().contains(&i));
            }
        }
    }
}

#[test]
fn absent_hand_point_hides_its_edges() {
    let mut landmarks = hand_at(0.5, 0.5);
    let thumb_ip = hand::LandmarkIdx::ThumbIp as usize;
    landmarks.set(thumb_ip, landmarks.get(thumb_ip).with_presence(-1.0));
    let points = landmarks.to_pixels(RES);
    let index_of: HashMap<PixelPoint, usize> =
        points.iter().enumerate().map(|(i, &p)| (p, i)).collect();
    assert_eq!(index_of.len(), hand::NUM_LANDMARKS);

    let detections = Detections {
        left_hand: Some(landmarks),
        ..Default::default()
    };
    let mut rec = Recorder::new();
    let annotations = Overlay::default()
        .annotate(&detections, RES, &mut rec)
        .unwrap();

    let set = annotations.get(Subject::Hand(Handedness::Left)).unwrap();
    assert_eq!((set.markers, set.edges), (20, 19));
    for (from, to) in rec.lines() {
        assert_ne!(index_of[&from], thumb_ip);
        assert_ne!(index_of[&to], thumb_ip);
    }
    assert!(rec.circles().all(|c| c != points[thumb_ip]));
}

#[test]
fn rendering_is_idempotent() {
    let detections = Detections {
        pose: Some(pose(|i| if i % 3 == 0 { 0.2 } else { 0.9 })),
        left_hand: Some(hand_at(0.3, 0.6)),
        right_hand: Some(hand_at(0.7, 0.6)),
        ..Default::default()
    };
    let overlay = Overlay::new(OverlayOptions::default().bounding_rect(true));

    let mut first = Image::filled(RES, Color::BLACK);
    let mut second = Image::filled(RES, Color::BLACK);
    let a = overlay.annotate_image(&detections, &mut first).unwrap();
    let b = overlay.annotate_image(&detections, &mut second).unwrap();
    assert_eq!(a, b);
    assert_eq!(first, second);
    assert!(first.count_pixels(Color::BLACK) < RES.num_pixels() as usize);

    let mut rec_a = Recorder::new();
    let mut rec_b = Recorder::new();
    overlay.annotate(&detections, RES, &mut rec_a).unwrap();
    overlay.annotate(&detections, RES, &mut rec_b).unwrap();
    assert_eq!(rec_a, rec_b);
}

#[test]
fn recorder_and_image_agree() {
    let detections = Detections {
        pose: Some(pose(|_| 1.0)),
        right_hand: Some(hand_at(0.5, 0.5)),
        ..Default::default()
    };
    let overlay = Overlay::default();

    let mut rec = Recorder::new();
    overlay.annotate(&detections, RES, &mut rec).unwrap();
    let mut replayed = Image::filled(RES, Color::BLACK);
    rec.replay(&mut replayed);

    let mut direct = Image::filled(RES, Color::BLACK);
    overlay.annotate_image(&detections, &mut direct).unwrap();
    assert_eq!(replayed, direct);
}

#[test]
fn hand_labels_follow_mirroring() {
    let detections = Detections {
        left_hand: Some(hand_at(0.3, 0.5)),
        right_hand: Some(hand_at(0.7, 0.5)),
        ..Default::default()
    };
    let labels = |mirrored: bool| {
        let overlay = Overlay::new(
            OverlayOptions::default()
                .upper_body_only(true)
                .mirrored_handedness(mirrored),
        );
        let mut rec = Recorder::new();
        overlay.annotate(&detections, RES, &mut rec).unwrap();
        rec.texts()
            .map(|(text, _)| text.to_string())
            .collect::<Vec<_>>()
    };
    assert_eq!(labels(true), ["R", "L"]);
    assert_eq!(labels(false), ["L", "R"]);
}

#[test]
fn hand_centroid_is_drawn_at_palm() {
    let detections = Detections {
        left_hand: Some(hand_at(0.5, 0.5)),
        ..Default::default()
    };
    let mut rec = Recorder::new();
    let annotations = Overlay::default()
        .annotate(&detections, RES, &mut rec)
        .unwrap();
    let c = annotations
        .get(Subject::Hand(Handedness::Left))
        .unwrap()
        .centroid
        .unwrap();

    let ring = rec.commands().iter().find(|cmd| {
        matches!(cmd, DrawCommand::Circle { center, radius: 12, color, .. }
            if *center == c && *color == Color::BLUE)
    });
    assert!(ring.is_some(), "no centroid ring at {c:?}");
    assert!(rec.texts().any(|(text, pos)| text == "R" && pos == c.offset(-6, 6)));
}

#[test]
fn bounding_rect_contains_all_points() {
    let mut rng = fastrand::Rng::with_seed(42);
    for _ in 0..500 {
        let len = rng.usize(1..50);
        let points: Vec<PixelPoint> = (0..len)
            .map(|_| PixelPoint::new(rng.i32(-500..500), rng.i32(-500..500)))
            .collect();
        let rect = BoundingRect::enclosing(points.iter().copied()).unwrap();
        assert!(rect.left() <= rect.right());
        assert!(rect.top() <= rect.bottom());
        assert!(points.iter().all(|&p| rect.contains(p)));
    }

    let rect = BoundingRect::enclosing([PixelPoint::new(50, 50)]).unwrap();
    assert_eq!(
        (rect.left(), rect.top(), rect.right(), rect.bottom()),
        (50, 50, 50, 50)
    );
}

#[test]
fn mean_centroid_of_square() {
    let square = [(0, 0), (10, 0), (10, 10), (0, 10)].map(PixelPoint::from);
    assert_eq!(
        centroid(&square, &[0, 1, 2, 3], CentroidMethod::Mean),
        Some(PixelPoint::new(5, 5))
    );
}

#[test]
fn hand_in_corner_has_no_centroid() {
    // Everything clamps into the bottom right pixel.
    let detections = Detections {
        right_hand: Some(vec![Landmark::new([3.0, 3.0, 0.0]); hand::NUM_LANDMARKS].into()),
        ..Default::default()
    };
    let mut rec = Recorder::new();
    let annotations = Overlay::default()
        .annotate(&detections, RES, &mut rec)
        .unwrap();
    let set = annotations.get(Subject::Hand(Handedness::Right)).unwrap();
    assert_eq!(set.centroid, None);
    assert!(rec.circles().all(|c| c == PixelPoint::new(999, 999)));
    assert!(rec.texts().all(|(text, _)| text.starts_with("z:")));
}
