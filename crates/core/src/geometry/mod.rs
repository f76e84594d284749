//! Circuit outline geometry: parse SVG path data, flatten curves into a
//! polyline, and measure or slice it by arc length.

mod path;

pub use path::{Segment, parse_path, parse_view_box};

use paddock_protocol::{Point, Rect};

/// Line segments each cubic Bézier is split into.
const CUBIC_STEPS: usize = 16;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("unexpected token `{token}` at offset {offset}")]
    BadToken { token: String, offset: usize },
    #[error("`{command}` command is missing a coordinate")]
    MissingCoordinate { command: char },
    #[error("path has no drawable segments")]
    EmptyPath,
    #[error("invalid viewBox `{0}`")]
    BadViewBox(String),
}

/// A flattened circuit outline in viewBox coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackShape {
    points: Vec<Point>,
    /// `cumulative[i]` is the arc length from the start to `points[i]`.
    cumulative: Vec<f64>,
    view_box: Rect,
    closed: bool,
}

impl TrackShape {
    pub fn parse(path: &str, view_box: &str) -> Result<Self, GeometryError> {
        let view_box = parse_view_box(view_box)?;
        let segments = parse_path(path)?;
        Ok(Self::from_segments(&segments, view_box))
    }

    fn from_segments(segments: &[Segment], view_box: Rect) -> Self {
        let mut points: Vec<Point> = Vec::with_capacity(segments.len() * 2);
        let mut closed = false;
        for seg in segments {
            match *seg {
                Segment::MoveTo(p) | Segment::LineTo(p) => points.push(p),
                Segment::CubicTo { c1, c2, to } => {
                    let Some(&from) = points.last() else {
                        continue;
                    };
                    points.extend((1..=CUBIC_STEPS).map(|i| {
                        cubic_point(from, c1, c2, to, i as f64 / CUBIC_STEPS as f64)
                    }));
                }
                Segment::Close => {
                    closed = true;
                    if let (Some(&first), Some(&last)) = (points.first(), points.last())
                        && first != last
                    {
                        points.push(first);
                    }
                }
            }
        }

        let mut cumulative = Vec::with_capacity(points.len());
        let mut total = 0.0;
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                total += points[i - 1].distance(p);
            }
            cumulative.push(total);
        }

        Self {
            points,
            cumulative,
            view_box,
            closed,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn view_box(&self) -> Rect {
        self.view_box
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Total arc length in viewBox units.
    pub fn length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Point at arc length `distance`, clamped to the path ends.
    pub fn point_at(&self, distance: f64) -> Point {
        let idx = self.cumulative.partition_point(|&c| c < distance);
        match idx {
            0 => self.points.first().copied().unwrap_or(Point::new(0.0, 0.0)),
            i if i >= self.points.len() => {
                self.points.last().copied().unwrap_or(Point::new(0.0, 0.0))
            }
            i => {
                let span = self.cumulative[i] - self.cumulative[i - 1];
                let t = if span > 0.0 {
                    (distance - self.cumulative[i - 1]) / span
                } else {
                    0.0
                };
                self.points[i - 1].lerp(&self.points[i], t)
            }
        }
    }

    /// The part of the outline between two fractions of its length.
    ///
    /// Fractions are clamped to `0.0..=1.0`. Returns an empty polyline when
    /// `to <= from`; the slice never wraps past the end of the path.
    pub fn slice(&self, from: f64, to: f64) -> Vec<Point> {
        let total = self.length();
        let start = from.clamp(0.0, 1.0) * total;
        let end = to.clamp(0.0, 1.0) * total;
        if end <= start {
            return Vec::new();
        }
        let mut out = vec![self.point_at(start)];
        out.extend(
            self.points
                .iter()
                .zip(&self.cumulative)
                .filter(|&(_, &c)| c > start && c < end)
                .map(|(p, _)| *p),
        );
        out.push(self.point_at(end));
        out
    }

    /// Scale and offset that place the viewBox inside `target`, preserving
    /// aspect ratio and centring on both axes (`xMidYMid meet`).
    pub fn fit(&self, target: Rect) -> Fit {
        let vb = self.view_box;
        let scale = (target.w / vb.w).min(target.h / vb.h);
        Fit {
            scale,
            offset: Point::new(
                target.x + (target.w - vb.w * scale) / 2.0 - vb.x * scale,
                target.y + (target.h - vb.h * scale) / 2.0 - vb.y * scale,
            ),
        }
    }
}

/// Uniform scale plus translation from viewBox to screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    pub scale: f64,
    pub offset: Point,
}

impl Fit {
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale + self.offset.x,
            p.y * self.scale + self.offset.y,
        )
    }

    pub fn apply_all(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|&p| self.apply(p)).collect()
    }
}

fn cubic_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let u = 1.0 - t;
    let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    Point::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = "M 0 0 L 10 0 L 10 10 L 0 10 Z";

    fn square() -> TrackShape {
        TrackShape::parse(SQUARE, "0 0 10 10").unwrap_or_else(|e| panic!("{e}"))
    }

    #[test]
    fn closed_square_length() {
        let s = square();
        assert!(s.is_closed());
        assert_eq!(s.points().len(), 5);
        assert!((s.length() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn point_at_interpolates_and_clamps() {
        let s = square();
        assert_eq!(s.point_at(5.0), Point::new(5.0, 0.0));
        assert_eq!(s.point_at(15.0), Point::new(10.0, 5.0));
        assert_eq!(s.point_at(-3.0), Point::new(0.0, 0.0));
        assert_eq!(s.point_at(99.0), Point::new(0.0, 0.0));
    }

    #[test]
    fn slice_keeps_interior_vertices() {
        let s = square();
        let part = s.slice(0.125, 0.375);
        assert_eq!(
            part,
            vec![
                Point::new(5.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 5.0)
            ]
        );
    }

    #[test]
    fn slice_clips_at_end_without_wrapping() {
        let s = square();
        let tail = s.slice(0.95, 1.05);
        assert_eq!(tail.first(), Some(&Point::new(0.0, 2.0)));
        assert_eq!(tail.last(), Some(&Point::new(0.0, 0.0)));
        assert!(s.slice(0.5, 0.5).is_empty());
        assert!(s.slice(0.7, 0.2).is_empty());
    }

    #[test]
    fn cubic_is_flattened_through_its_endpoints() {
        let s = TrackShape::parse("M 0 0 C 0 10 10 10 10 0", "0 0 10 10")
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(!s.is_closed());
        assert_eq!(s.points().len(), CUBIC_STEPS + 1);
        assert_eq!(s.points().last(), Some(&Point::new(10.0, 0.0)));
        // Longer than the chord, shorter than the control polygon.
        assert!(s.length() > 10.0 && s.length() < 30.0);
    }

    #[test]
    fn fit_centres_with_uniform_scale() {
        let s = TrackShape::parse("M 0 0 L 200 150", "0 0 200 150")
            .unwrap_or_else(|e| panic!("{e}"));
        let fit = s.fit(Rect::new(0.0, 0.0, 400.0, 400.0));
        assert_eq!(fit.scale, 2.0);
        assert_eq!(fit.apply(Point::new(0.0, 0.0)), Point::new(0.0, 50.0));
        assert_eq!(fit.apply(Point::new(200.0, 150.0)), Point::new(400.0, 350.0));
    }

    #[test]
    fn bad_view_box_is_reported_before_path() {
        assert_eq!(
            TrackShape::parse("garbage", "0 0"),
            Err(GeometryError::BadViewBox("0 0".into()))
        );
    }
}
