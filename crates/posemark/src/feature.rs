//! Derived geometry: bounding rectangles and centroids of pixel-space landmarks.

use itertools::Itertools;

use crate::landmark::PixelPoint;

/// An axis-aligned rectangle with inclusive bounds.
///
/// `right` and `bottom` are the coordinates of the last column and row covered by the
/// rectangle, so a rectangle enclosing a single point has `left == right` and `top == bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingRect {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

impl BoundingRect {
    /// Computes the smallest rectangle enclosing all `points`.
    ///
    /// Returns [`None`] if `points` is empty.
    pub fn enclosing<I: IntoIterator<Item = PixelPoint>>(points: I) -> Option<Self> {
        points.into_iter().fold(None, |rect, p| {
            Some(match rect {
                None => Self {
                    left: p.x,
                    top: p.y,
                    right: p.x,
                    bottom: p.y,
                },
                Some(r) => Self {
                    left: r.left.min(p.x),
                    top: r.top.min(p.y),
                    right: r.right.max(p.x),
                    bottom: r.bottom.max(p.y),
                },
            })
        })
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.left
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.top
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.right
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    pub fn top_left(&self) -> PixelPoint {
        PixelPoint::new(self.left, self.top)
    }

    pub fn bottom_right(&self) -> PixelPoint {
        PixelPoint::new(self.right, self.bottom)
    }

    /// Number of columns covered by the rectangle.
    pub fn width(&self) -> u32 {
        (self.right - self.left) as u32 + 1
    }

    /// Number of rows covered by the rectangle.
    pub fn height(&self) -> u32 {
        (self.bottom - self.top) as u32 + 1
    }

    pub fn contains(&self, p: PixelPoint) -> bool {
        (self.left..=self.right).contains(&p.x) && (self.top..=self.bottom).contains(&p.y)
    }
}

/// How [`centroid`] reduces a group of points to a single one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CentroidMethod {
    /// Area centroid of the polygon formed by the points in the given order (first-order image
    /// moments of the contour). Undefined when the polygon has zero area.
    #[default]
    Moments,
    /// Arithmetic mean of the points. Undefined only when there are no points.
    Mean,
}

/// Computes a representative center of the points at `indices`.
///
/// The result is truncated toward zero to integer pixel coordinates. Returns [`None`] if the
/// centroid is undefined (see [`CentroidMethod`]).
///
/// # Panics
///
/// Panics if any index in `indices` is out of bounds for `points`.
pub fn centroid(
    points: &[PixelPoint],
    indices: &[usize],
    method: CentroidMethod,
) -> Option<PixelPoint> {
    let selected = indices.iter().map(|&i| points[i]);
    match method {
        CentroidMethod::Moments => polygon_centroid(selected),
        CentroidMethod::Mean => mean(selected),
    }
}

fn polygon_centroid(
    points: impl ExactSizeIterator<Item = PixelPoint> + Clone,
) -> Option<PixelPoint> {
    // Twice the signed area, and the first-order moments scaled by 6.
    let (mut a00, mut a10, mut a01) = (0i64, 0i64, 0i64);
    for (prev, cur) in points.circular_tuple_windows() {
        let (x0, y0) = (i64::from(prev.x), i64::from(prev.y));
        let (x1, y1) = (i64::from(cur.x), i64::from(cur.y));
        let cross = x0 * y1 - x1 * y0;
        a00 += cross;
        a10 += cross * (x0 + x1);
        a01 += cross * (y0 + y1);
    }

    if a00 == 0 {
        return None;
    }

    let denom = 3.0 * a00 as f64;
    Some(PixelPoint::new(
        (a10 as f64 / denom) as i32,
        (a01 as f64 / denom) as i32,
    ))
}

fn mean(points: impl Iterator<Item = PixelPoint>) -> Option<PixelPoint> {
    let (count, sx, sy) = points.fold((0i64, 0i64, 0i64), |(n, sx, sy), p| {
        (n + 1, sx + i64::from(p.x), sy + i64::from(p.y))
    });
    if count == 0 {
        return None;
    }
    Some(PixelPoint::new((sx / count) as i32, (sy / count) as i32))
}
