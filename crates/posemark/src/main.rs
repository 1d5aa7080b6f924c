use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use posemark::canvas::Recorder;
use posemark::image::Resolution;
use posemark::overlay::{Overlay, OverlayOptions};
use posemark::replay::Replay;
use posemark::source::{BlankFrames, Detector, DetectorOptions, FrameSource, ImageSequence};
use posemark::timer::{FpsCounter, Timer};

/// Draws pose and hand landmark overlays onto a sequence of frames.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Image file or directory of image files to annotate. Black frames are used if omitted.
    #[arg(long)]
    input: Option<PathBuf>,

    /// JSON-lines file with the recorded detections of each frame.
    #[arg(long)]
    detections: PathBuf,

    /// Directory the annotated frames are written to.
    #[arg(long, default_value = "out")]
    output: PathBuf,

    /// Width of the generated black frames.
    #[arg(long, default_value_t = 1920)]
    width: u32,

    /// Height of the generated black frames.
    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Only annotate the upper body, and omit the depth labels of hand landmarks.
    #[arg(long)]
    upper_body_only: bool,

    #[arg(long, default_value_t = 0.7)]
    min_detection_confidence: f32,

    #[arg(long, default_value_t = 0.5)]
    min_tracking_confidence: f32,

    /// Draw the bounding rectangle of every landmark set.
    #[arg(long)]
    use_brect: bool,

    /// Draw face mesh landmarks.
    #[arg(long)]
    face: bool,

    /// Do not mirror input frames (and do not swap handedness labels).
    #[arg(long)]
    no_mirror: bool,

    /// Only compute the annotations and log how many draw commands each frame needs.
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    posemark::init_logger!();

    let args = Args::parse();
    log::debug!("{:?}", args);

    let mut detector = Replay::open(
        &args.detections,
        DetectorOptions::default()
            .min_detection_confidence(args.min_detection_confidence)
            .min_tracking_confidence(args.min_tracking_confidence)
            .upper_body_only(args.upper_body_only),
    )?;

    let mirror = !args.no_mirror;
    let mut source: Box<dyn FrameSource> = match &args.input {
        Some(path) => Box::new(ImageSequence::open(path)?.mirror(mirror)),
        None => Box::new(BlankFrames::new(
            Resolution::new(args.width, args.height),
            detector.remaining(),
        )),
    };

    let overlay = Overlay::new(
        OverlayOptions::default()
            .upper_body_only(args.upper_body_only)
            .bounding_rect(args.use_brect)
            .draw_face(args.face)
            .mirrored_handedness(mirror),
    );

    if !args.dry_run {
        std::fs::create_dir_all(&args.output)
            .with_context(|| format!("failed to create {}", args.output.display()))?;
    }

    let t_detect = Timer::new("detect");
    let t_annotate = Timer::new("annotate");
    let t_save = Timer::new("save");
    let mut fps = FpsCounter::new("posemark");
    let mut frame_count = 0;
    while let Some(mut frame) = source.next_frame()? {
        let detections = t_detect.time(|| detector.detect(&frame))?;

        if args.dry_run {
            let mut recorder = Recorder::new();
            t_annotate.time(|| overlay.annotate(&detections, frame.resolution(), &mut recorder))?;
            log::info!("frame {}: {} draw commands", frame_count, recorder.len());
        } else {
            t_annotate.time(|| overlay.annotate_image(&detections, &mut frame))?;
            let path = args.output.join(format!("{:05}.png", frame_count));
            t_save.time(|| frame.save(&path))?;
        }

        frame_count += 1;
        fps.tick_with([&t_detect, &t_annotate, &t_save]);
    }

    log::info!("annotated {} frame(s)", frame_count);
    Ok(())
}
