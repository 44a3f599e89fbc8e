//! Directed line segments and the vector builder

use serde::{Deserialize, Serialize};

use super::{GeometryError, GeometryResult, Point};

/// A bounded, directed segment from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    #[inline]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Euclidean length
    #[inline]
    pub fn length(&self) -> f64 {
        (self.end - self.start).precise_length()
    }

    /// Displacement from start to end
    #[inline]
    pub fn displacement(&self) -> Point {
        self.end - self.start
    }

    /// True when the segment has no horizontal extent
    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.start.x == self.end.x
    }

    /// The same segment walked the other way
    #[inline]
    pub fn reversed(&self) -> Segment {
        Segment::new(self.end, self.start)
    }

    /// Split into the dashes of a dashed line, `dash_length` units each
    ///
    /// Dashes are laid along the whole-unit length of the segment, every
    /// other slot drawn; a trailing partial slot is dropped.
    pub fn dashes(&self, dash_length: u64) -> GeometryResult<Vec<Segment>> {
        if dash_length == 0 {
            return Err(GeometryError::DivisionByZero);
        }
        let displacement = self.displacement();
        let length = displacement.truncated_length();
        let unit = displacement.divide(length as f64)?;
        let dash = dash_length as f64;

        let slots = length / dash_length;
        Ok((0..slots)
            .step_by(2)
            .map(|index| {
                let index = index as f64;
                Segment::new(
                    self.start + unit * (index * dash),
                    self.start + unit * ((index + 1.0) * dash),
                )
            })
            .collect())
    }
}

/// Build a segment of length `length` from `start` through `aim`
///
/// The end point lies on the ray from `start` through `aim`; `length` may be
/// shorter or longer than the distance to `aim`. The direction comes from
/// the slope angle, so vertical aims are handled on their own.
pub fn make_vector(start: Point, aim: Point, length: f64) -> GeometryResult<Segment> {
    if aim == start {
        return Err(GeometryError::InvalidArgument(format!(
            "aim point {aim} coincides with start point"
        )));
    }

    let (dx, dy, direction) = if aim.x != start.x {
        let k = (aim.y - start.y) / (aim.x - start.x);
        let alpha = k.atan();
        let dx = length * alpha.cos();
        let dy = dx * k;
        let direction = if start.x > aim.x { -1.0 } else { 1.0 };
        (dx, dy, direction)
    } else {
        let direction = if start.y > aim.y { -1.0 } else { 1.0 };
        (0.0, length, direction)
    };

    let end = Point::new(start.x + dx * direction, start.y + dy * direction);
    Ok(Segment::new(start, end))
}
