//! The drawing surface annotations are rendered onto.
//!
//! [`Canvas`] is implemented for [`Image`], which rasterizes every primitive immediately, and for
//! [`Recorder`], which only records the primitives so that tests and dry runs can inspect what
//! would have been drawn.

use crate::{
    image::{draw, Color, Image},
    landmark::PixelPoint,
};

/// How the outline of a circle is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    /// An outline of the given width, in pixels.
    Width(u32),
    Filled,
}

/// Font size of a text label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextSize {
    #[default]
    Normal,
    Small,
}

/// A surface that accepts drawing primitives in pixel coordinates.
///
/// Primitives may extend past the surface; implementations discard the parts that don't fit.
pub trait Canvas {
    fn circle(&mut self, center: PixelPoint, radius: u32, color: Color, stroke: Stroke);

    fn line(&mut self, from: PixelPoint, to: PixelPoint, color: Color, width: u32);

    /// Draws the outline of the rectangle spanning the two inclusive corners.
    fn rect(&mut self, corner_1: PixelPoint, corner_2: PixelPoint, color: Color, width: u32);

    /// Draws a single line of text whose bottom left corner is at `position`.
    fn text(&mut self, text: &str, position: PixelPoint, color: Color, size: TextSize);
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    fn circle(&mut self, center: PixelPoint, radius: u32, color: Color, stroke: Stroke) {
        (**self).circle(center, radius, color, stroke);
    }

    fn line(&mut self, from: PixelPoint, to: PixelPoint, color: Color, width: u32) {
        (**self).line(from, to, color, width);
    }

    fn rect(&mut self, corner_1: PixelPoint, corner_2: PixelPoint, color: Color, width: u32) {
        (**self).rect(corner_1, corner_2, color, width);
    }

    fn text(&mut self, text: &str, position: PixelPoint, color: Color, size: TextSize) {
        (**self).text(text, position, color, size);
    }
}

impl Canvas for Image {
    fn circle(&mut self, center: PixelPoint, radius: u32, color: Color, stroke: Stroke) {
        let mut guard = draw::circle(self, center.x, center.y, radius);
        guard.color(color);
        match stroke {
            Stroke::Width(width) => guard.stroke_width(width),
            Stroke::Filled => guard.filled(),
        };
    }

    fn line(&mut self, from: PixelPoint, to: PixelPoint, color: Color, width: u32) {
        draw::line(self, from.x, from.y, to.x, to.y)
            .color(color)
            .stroke_width(width);
    }

    fn rect(&mut self, corner_1: PixelPoint, corner_2: PixelPoint, color: Color, width: u32) {
        draw::rect(self, (corner_1.x, corner_1.y), (corner_2.x, corner_2.y))
            .color(color)
            .stroke_width(width);
    }

    fn text(&mut self, text: &str, position: PixelPoint, color: Color, size: TextSize) {
        let mut guard = draw::text(self, position.x, position.y, text);
        guard.color(color).align_left().align_bottom();
        if size == TextSize::Small {
            guard.small();
        }
    }
}

/// A drawing primitive captured by a [`Recorder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    Circle {
        center: PixelPoint,
        radius: u32,
        color: Color,
        stroke: Stroke,
    },
    Line {
        from: PixelPoint,
        to: PixelPoint,
        color: Color,
        width: u32,
    },
    Rect {
        corner_1: PixelPoint,
        corner_2: PixelPoint,
        color: Color,
        width: u32,
    },
    Text {
        text: String,
        position: PixelPoint,
        color: Color,
        size: TextSize,
    },
}

/// A [`Canvas`] that records every primitive instead of drawing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recorder {
    commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all recorded commands, in the order they were issued.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Returns the endpoints of all recorded lines.
    pub fn lines(&self) -> impl Iterator<Item = (PixelPoint, PixelPoint)> + '_ {
        self.commands.iter().filter_map(|cmd| match *cmd {
            DrawCommand::Line { from, to, .. } => Some((from, to)),
            _ => None,
        })
    }

    /// Returns the centers of all recorded circles.
    pub fn circles(&self) -> impl Iterator<Item = PixelPoint> + '_ {
        self.commands.iter().filter_map(|cmd| match *cmd {
            DrawCommand::Circle { center, .. } => Some(center),
            _ => None,
        })
    }

    /// Returns the text and position of all recorded text labels.
    pub fn texts(&self) -> impl Iterator<Item = (&str, PixelPoint)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, position, .. } => Some((text.as_str(), *position)),
            _ => None,
        })
    }

    /// Returns the corners of all recorded rectangles.
    pub fn rects(&self) -> impl Iterator<Item = (PixelPoint, PixelPoint)> + '_ {
        self.commands.iter().filter_map(|cmd| match *cmd {
            DrawCommand::Rect {
                corner_1, corner_2, ..
            } => Some((corner_1, corner_2)),
            _ => None,
        })
    }

    /// Issues all recorded commands to `canvas`, in order.
    pub fn replay<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for cmd in &self.commands {
            match cmd {
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                    stroke,
                } => canvas.circle(*center, *radius, *color, *stroke),
                DrawCommand::Line {
                    from,
                    to,
                    color,
                    width,
                } => canvas.line(*from, *to, *color, *width),
                DrawCommand::Rect {
                    corner_1,
                    corner_2,
                    color,
                    width,
                } => canvas.rect(*corner_1, *corner_2, *color, *width),
                DrawCommand::Text {
                    text,
                    position,
                    color,
                    size,
                } => canvas.text(text, *position, *color, *size),
            }
        }
    }
}

impl Canvas for Recorder {
    fn circle(&mut self, center: PixelPoint, radius: u32, color: Color, stroke: Stroke) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            stroke,
        });
    }

    fn line(&mut self, from: PixelPoint, to: PixelPoint, color: Color, width: u32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn rect(&mut self, corner_1: PixelPoint, corner_2: PixelPoint, color: Color, width: u32) {
        self.commands.push(DrawCommand::Rect {
            corner_1,
            corner_2,
            color,
            width,
        });
    }

    fn text(&mut self, text: &str, position: PixelPoint, color: Color, size: TextSize) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            color,
            size,
        });
    }
}
