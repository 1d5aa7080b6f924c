//! Drawing API for [`Image`]s.
//!
//! This module contains a collection of freestanding functions that draw shapes onto an
//! [`Image`]. All functions return a *guard object* that allows optional customization of the
//! shape and performs the draw operation when dropped.
//!
//! All drawing operations *overwrite* the target pixel with the shape color. They do not perform
//! blending. Pixels that fall outside of the image are discarded.

use std::{convert::Infallible, thread};

use embedded_graphics::{
    draw_target::DrawTarget,
    mono_font::{ascii, MonoFont, MonoTextStyle},
    prelude::*,
    primitives::{self, Line, PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};

use crate::image::{Color, Image};

/// Guard returned by [`rect`]; draws the rectangle when dropped and allows customization.
pub struct DrawRect<'a> {
    image: &'a mut Image,
    corner_1: (i32, i32),
    corner_2: (i32, i32),
    color: Color,
    stroke_width: u32,
}

impl DrawRect<'_> {
    /// Sets the rectangle's color.
    pub fn color(&mut self, color: Color) -> &mut Self {
        self.color = color;
        self
    }

    /// Sets the rectangle's stroke width.
    ///
    /// By default, a stroke width of 1 is used.
    pub fn stroke_width(&mut self, width: u32) -> &mut Self {
        self.stroke_width = width;
        self
    }
}

impl Drop for DrawRect<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            return;
        }

        let (x1, y1) = self.corner_1;
        let (x2, y2) = self.corner_2;
        match Rectangle::with_corners(Point::new(x1, y1), Point::new(x2, y2))
            .into_styled(PrimitiveStyle::with_stroke(self.color, self.stroke_width))
            .draw(&mut Target(&mut *self.image))
        {
            Ok(_) => {}
            Err(infallible) => match infallible {},
        }
    }
}

/// Guard returned by [`line`][line()]; draws the line when dropped and allows customization.
pub struct DrawLine<'a> {
    image: &'a mut Image,
    start_x: i32,
    start_y: i32,
    end_x: i32,
    end_y: i32,
    color: Color,
    stroke_width: u32,
}

impl<'a> DrawLine<'a> {
    /// Sets the line's color.
    pub fn color(&mut self, color: Color) -> &mut Self {
        self.color = color;
        self
    }

    /// Sets the line's stroke width.
    ///
    /// By default, a stroke width of 1 is used.
    pub fn stroke_width(&mut self, width: u32) -> &mut Self {
        self.stroke_width = width;
        self
    }
}

impl<'a> Drop for DrawLine<'a> {
    fn drop(&mut self) {
        if thread::panicking() {
            return;
        }

        match Line::new(
            Point::new(self.start_x, self.start_y),
            Point::new(self.end_x, self.end_y),
        )
        .into_styled(PrimitiveStyle::with_stroke(self.color, self.stroke_width))
        .draw(&mut Target(&mut *self.image))
        {
            Ok(_) => {}
            Err(infallible) => match infallible {},
        }
    }
}

/// Guard returned by [`text`]; draws the text when dropped and allows customization.
pub struct DrawText<'a> {
    image: &'a mut Image,
    x: i32,
    y: i32,
    text: &'a str,
    font: &'static MonoFont<'static>,
    color: Color,
    alignment: Alignment,
    baseline: Baseline,
}

impl<'a> DrawText<'a> {
    /// Sets the text color.
    pub fn color(&mut self, color: Color) -> &mut Self {
        self.color = color;
        self
    }

    /// Uses a smaller font than the default.
    pub fn small(&mut self) -> &mut Self {
        self.font = &ascii::FONT_4X6;
        self
    }

    /// Aligns the bottom of the text with the `y` coordinate.
    pub fn align_bottom(&mut self) -> &mut Self {
        self.baseline = Baseline::Bottom;
        self
    }

    /// Aligns the left side of the text with the `x` coordinate.
    pub fn align_left(&mut self) -> &mut Self {
        self.alignment = Alignment::Left;
        self
    }
}

impl<'a> Drop for DrawText<'a> {
    fn drop(&mut self) {
        if thread::panicking() {
            return;
        }

        // FIXME: e-g's mono fonts lack non-ASCII glyphs, those render as `?`
        let character_style = MonoTextStyle::new(self.font, self.color);
        let text_style = TextStyleBuilder::new()
            .alignment(self.alignment)
            .baseline(self.baseline)
            .build();
        match Text::with_text_style(
            self.text,
            Point::new(self.x, self.y),
            character_style,
            text_style,
        )
        .draw(&mut Target(&mut *self.image))
        {
            Ok(_) => {}
            Err(infallible) => match infallible {},
        }
    }
}

/// Guard returned by [`circle`]; draws the circle when dropped and allows customization.
pub struct DrawCircle<'a> {
    image: &'a mut Image,
    x: i32,
    y: i32,
    radius: u32,
    stroke_width: u32,
    filled: bool,
    color: Color,
}

impl<'a> DrawCircle<'a> {
    /// Sets the circle's color.
    pub fn color(&mut self, color: Color) -> &mut Self {
        self.color = color;
        self
    }

    /// Sets the circle's stroke width.
    ///
    /// By default, a stroke width of 1 is used.
    pub fn stroke_width(&mut self, width: u32) -> &mut Self {
        self.stroke_width = width;
        self
    }

    /// Fills the circle instead of only drawing its outline.
    pub fn filled(&mut self) -> &mut Self {
        self.filled = true;
        self
    }
}

impl<'a> Drop for DrawCircle<'a> {
    fn drop(&mut self) {
        if thread::panicking() {
            return;
        }

        let top_left = Point {
            x: self.x - self.radius as i32,
            y: self.y - self.radius as i32,
        };
        let circle = primitives::Circle {
            top_left,
            diameter: self.radius * 2 + 1,
        };
        let style = if self.filled {
            PrimitiveStyle::with_fill(self.color)
        } else {
            PrimitiveStyle::with_stroke(self.color, self.stroke_width)
        };
        match circle.into_styled(style).draw(&mut Target(&mut *self.image)) {
            Ok(_) => {}
            Err(infallible) => match infallible {},
        }
    }
}

/// Draws the outline of a rectangle spanning two inclusive corners onto an image.
pub fn rect(image: &mut Image, corner_1: (i32, i32), corner_2: (i32, i32)) -> DrawRect<'_> {
    DrawRect {
        image,
        corner_1,
        corner_2,
        color: Color::RED,
        stroke_width: 1,
    }
}

/// Draws a line onto an image.
pub fn line(
    image: &mut Image,
    start_x: i32,
    start_y: i32,
    end_x: i32,
    end_y: i32,
) -> DrawLine<'_> {
    DrawLine {
        image,
        start_x,
        start_y,
        end_x,
        end_y,
        color: Color::from_rgb8(0, 0, 255),
        stroke_width: 1,
    }
}

/// Draws a text string onto an image.
///
/// By default, the text is drawn centered horizontally and vertically around `x` and `y`.
pub fn text<'a>(image: &'a mut Image, x: i32, y: i32, text: &'a str) -> DrawText<'a> {
    DrawText {
        image,
        x,
        y,
        text,
        font: &ascii::FONT_6X10,
        color: Color::from_rgb8(255, 0, 0),
        alignment: Alignment::Center,
        baseline: Baseline::Middle,
    }
}

/// Draws a circle of the given radius around `(x, y)` onto an image.
///
/// A radius of 0 draws a single pixel.
pub fn circle(image: &mut Image, x: i32, y: i32, radius: u32) -> DrawCircle<'_> {
    DrawCircle {
        image,
        x,
        y,
        radius,
        stroke_width: 1,
        filled: false,
        color: Color::GREEN,
    }
}

struct Target<'a>(&'a mut Image);

impl Dimensions for Target<'_> {
    fn bounding_box(&self) -> Rectangle {
        let (width, height) = (self.0.width(), self.0.height());

        Rectangle {
            top_left: Point { x: 0, y: 0 },
            size: Size { width, height },
        }
    }
}

impl DrawTarget for Target<'_> {
    type Color = Color;

    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = embedded_graphics::Pixel<Self::Color>>,
    {
        for Pixel(pos, color) in pixels {
            if pos.x >= 0
                && (pos.x as u32) < self.0.width()
                && pos.y >= 0
                && (pos.y as u32) < self.0.height()
            {
                self.0.set(pos.x as _, pos.y as _, color);
            }
        }

        Ok(())
    }
}
