//! Landmark overlay rendering for pose, hand and face detectors.
//!
//! `posemark` takes the per-frame output of a landmark detector (normalized points with
//! visibility and presence scores) and turns it into annotations on an image: a skeleton with
//! anatomically correct connectivity, key point markers, bounding rectangles and a palm centroid
//! with a handedness label.
//!
//! The detector, the frame source and the drawing surface are collaborators behind the
//! [`source::Detector`], [`source::FrameSource`] and [`canvas::Canvas`] traits. The annotation
//! engine itself is stateless: every call to [`overlay::Overlay::annotate`] recomputes everything
//! from the landmarks it is given.
//!
//! # Coordinates
//!
//! Landmark X and Y coordinates are normalized to the range 0.0 to 1.0 relative to the image
//! width and height, with X pointing right and Y pointing *down*, like image coordinates. They
//! are mapped to integer pixel coordinates by [`landmark::PixelPoint::from_normalized`], which
//! clamps values outside of the image instead of rejecting them.
//!
//! # Environment Variables
//!
//! * `RUST_LOG`: overrides the log filter set up by [`init_logger!`].

pub mod body;
pub mod canvas;
pub mod error;
pub mod face;
pub mod feature;
pub mod gate;
pub mod hand;
pub mod image;
pub mod landmark;
pub mod overlay;
pub mod replay;
pub mod source;
pub mod timer;
pub mod topology;

pub use error::ContractViolation;

use log::LevelFilter;

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = if cfg!(debug_assertions) {
        LevelFilter::Trace
    } else {
        LevelFilter::Debug
    };
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_PKG_NAME")), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// If `cfg!(debug_assertions)` is enabled, the calling crate and posemark will log at *trace*
/// level. Otherwise, they will log at *debug* level. `RUST_LOG` is honored on top of that.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
