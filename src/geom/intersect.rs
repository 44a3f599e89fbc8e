//! Bounded segment intersection
//!
//! Works on slope/intercept line forms with exact float comparisons, so the
//! degenerate configurations a rectangular table produces (vertical walls,
//! a probe running along a wall) each land in a well-defined branch:
//!
//! - two sloped lines with different slopes meet in one point
//! - two sloped lines with the same slope are parallel or collinear
//! - a vertical line meets a sloped line at the vertical's x
//! - two vertical lines are parallel or collinear
//!
//! Collinear overlaps are resolved to a single representative point, the
//! lower corner of the overlap's bounding box, rather than reported as an
//! interval. A ball almost never rolls exactly along a cushion, and the
//! trajectory walk only needs *a* contact point there. This is a known
//! approximation and callers should not rely on it being the first contact.

use super::{Point, Segment};

/// Infinite line through a segment
#[derive(Debug, Clone, Copy, PartialEq)]
enum Line {
    /// x = `x`
    Vertical { x: f64 },
    /// y = `slope` * x + `intercept`
    Sloped { slope: f64, intercept: f64 },
}

impl Line {
    fn through(segment: &Segment) -> Self {
        let Segment { start, end } = *segment;
        if start.x == end.x {
            Line::Vertical { x: start.x }
        } else {
            let slope = (start.y - end.y) / (start.x - end.x);
            Line::Sloped {
                slope,
                intercept: start.y - slope * start.x,
            }
        }
    }
}

/// Axis-aligned extent of a segment along one coordinate
#[derive(Debug, Clone, Copy)]
struct Span {
    min: f64,
    max: f64,
}

impl Span {
    fn x(segment: &Segment) -> Self {
        Self::of(segment.start.x, segment.end.x)
    }

    fn y(segment: &Segment) -> Self {
        Self::of(segment.start.y, segment.end.y)
    }

    fn of(a: f64, b: f64) -> Self {
        Span {
            min: a.min(b),
            max: a.max(b),
        }
    }

    #[inline]
    fn contains(self, v: f64) -> bool {
        self.min <= v && v <= self.max
    }
}

/// True when `p` lies inside both segments' bounding boxes (inclusive)
fn within_both(p: Point, a: &Segment, b: &Segment) -> bool {
    Span::x(a).contains(p.x)
        && Span::x(b).contains(p.x)
        && Span::y(a).contains(p.y)
        && Span::y(b).contains(p.y)
}

/// Representative point of two collinear segments measured along `axis`
///
/// Returns the larger of the two lower bounds when the spans overlap or
/// touch, `None` when they are disjoint.
fn collinear_contact(a: Span, b: Span) -> Option<f64> {
    let lo = a.min.max(b.min);
    let hi = a.max.min(b.max);
    if lo < hi {
        // Proper overlap: many common points, report the lower bound
        Some(lo)
    } else if lo == hi {
        // Touching end to end
        Some(lo)
    } else {
        None
    }
}

/// Intersection point of two bounded segments
///
/// `None` is the ordinary "they do not meet" answer, not a failure. The
/// result does not depend on argument order.
pub fn intersect(a: &Segment, b: &Segment) -> Option<Point> {
    match (Line::through(a), Line::through(b)) {
        (
            Line::Sloped {
                slope: k1,
                intercept: b1,
            },
            Line::Sloped {
                slope: k2,
                intercept: b2,
            },
        ) => {
            if k1 != k2 {
                let x = (b2 - b1) / (k1 - k2);
                let y = (k2 * b1 - k1 * b2) / (k2 - k1);
                let p = Point::new(x, y);
                within_both(p, a, b).then_some(p)
            } else if b1 == b2 {
                let x = collinear_contact(Span::x(a), Span::x(b))?;
                let y = Span::y(a).min.max(Span::y(b).min);
                Some(Point::new(x, y))
            } else {
                None
            }
        }
        (Line::Vertical { x }, Line::Sloped { slope, intercept })
        | (Line::Sloped { slope, intercept }, Line::Vertical { x }) => {
            let p = Point::new(x, slope * x + intercept);
            within_both(p, a, b).then_some(p)
        }
        (Line::Vertical { x: xa }, Line::Vertical { x: xb }) => {
            if xa != xb {
                return None;
            }
            let y = collinear_contact(Span::y(a), Span::y(b))?;
            Some(Point::new(xa, y))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
        Segment::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    #[test]
    fn test_crossing_diagonals() {
        let p = intersect(&seg(0.0, 0.0, 10.0, 10.0), &seg(0.0, 10.0, 10.0, 0.0));
        assert_eq!(p, Some(Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_lines_cross_outside_bounds() {
        // The infinite lines meet at (5, 5) but the second segment stops short
        assert_eq!(
            intersect(&seg(0.0, 0.0, 10.0, 10.0), &seg(0.0, 10.0, 4.0, 6.0)),
            None
        );
    }

    #[test]
    fn test_endpoint_touch_counts() {
        let p = intersect(&seg(0.0, 0.0, 4.0, 4.0), &seg(4.0, 4.0, 8.0, 0.0));
        assert_eq!(p, Some(Point::new(4.0, 4.0)));
    }

    #[test]
    fn test_parallel_sloped() {
        assert_eq!(
            intersect(&seg(0.0, 0.0, 10.0, 0.0), &seg(0.0, 5.0, 10.0, 5.0)),
            None
        );
        assert_eq!(
            intersect(&seg(0.0, 0.0, 10.0, 10.0), &seg(0.0, 1.0, 10.0, 11.0)),
            None
        );
    }

    #[test]
    fn test_collinear_overlap_horizontal() {
        let p = intersect(&seg(0.0, 0.0, 10.0, 0.0), &seg(5.0, 0.0, 15.0, 0.0));
        assert_eq!(p, Some(Point::new(5.0, 0.0)));
    }

    #[test]
    fn test_collinear_overlap_diagonal_representative() {
        // Overlap is (4,4)-(6,6); the representative is its lower corner
        let p = intersect(&seg(0.0, 0.0, 6.0, 6.0), &seg(4.0, 4.0, 10.0, 10.0));
        assert_eq!(p, Some(Point::new(4.0, 4.0)));
    }

    #[test]
    fn test_collinear_overlap_falling_slope() {
        // Lower x bound paired with lower y bound: (5, 0) is on neither segment
        let a = seg(0.0, 10.0, 10.0, 0.0);
        let b = seg(5.0, 5.0, 15.0, -5.0);
        assert_eq!(intersect(&a, &b), Some(Point::new(5.0, 0.0)));
        assert_eq!(intersect(&b, &a), Some(Point::new(5.0, 0.0)));
    }

    #[test]
    fn test_collinear_containment() {
        let p = intersect(&seg(0.0, 2.0, 20.0, 2.0), &seg(12.0, 2.0, 7.0, 2.0));
        assert_eq!(p, Some(Point::new(7.0, 2.0)));
    }

    #[test]
    fn test_collinear_touching() {
        let p = intersect(&seg(0.0, 3.0, 5.0, 3.0), &seg(5.0, 3.0, 9.0, 3.0));
        assert_eq!(p, Some(Point::new(5.0, 3.0)));
    }

    #[test]
    fn test_collinear_disjoint() {
        assert_eq!(
            intersect(&seg(0.0, 3.0, 5.0, 3.0), &seg(6.0, 3.0, 9.0, 3.0)),
            None
        );
    }

    #[test]
    fn test_one_vertical() {
        let wall = seg(100.0, 0.0, 100.0, 100.0);
        let probe = seg(50.0, 50.0, 150.0, 60.0);
        assert_eq!(intersect(&wall, &probe), Some(Point::new(100.0, 55.0)));
        assert_eq!(intersect(&probe, &wall), Some(Point::new(100.0, 55.0)));
    }

    #[test]
    fn test_one_vertical_out_of_range() {
        // Hits the wall's line above its top end
        let wall = seg(100.0, 0.0, 100.0, 100.0);
        let probe = seg(50.0, 150.0, 150.0, 150.0);
        assert_eq!(intersect(&wall, &probe), None);
        // Sloped segment never reaches x = 100
        let short = seg(0.0, 50.0, 90.0, 50.0);
        assert_eq!(intersect(&wall, &short), None);
    }

    #[test]
    fn test_both_vertical_touching() {
        let p = intersect(&seg(5.0, 0.0, 5.0, 5.0), &seg(5.0, 5.0, 5.0, 10.0));
        assert_eq!(p, Some(Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_both_vertical_overlap() {
        let p = intersect(&seg(5.0, 10.0, 5.0, 0.0), &seg(5.0, 3.0, 5.0, 20.0));
        assert_eq!(p, Some(Point::new(5.0, 3.0)));
    }

    #[test]
    fn test_both_vertical_apart() {
        assert_eq!(
            intersect(&seg(5.0, 0.0, 5.0, 5.0), &seg(6.0, 0.0, 6.0, 5.0)),
            None
        );
        assert_eq!(
            intersect(&seg(5.0, 0.0, 5.0, 5.0), &seg(5.0, 6.0, 5.0, 9.0)),
            None
        );
    }

    #[test]
    fn test_repeatable() {
        let a = seg(0.3, 0.1, 9.7, 8.9);
        let b = seg(0.0, 7.7, 10.1, 0.2);
        let first = intersect(&a, &b).unwrap();
        let second = intersect(&a, &b).unwrap();
        assert_eq!(first.x.to_bits(), second.x.to_bits());
        assert_eq!(first.y.to_bits(), second.y.to_bits());
    }

    fn coord() -> impl Strategy<Value = f64> {
        // Small integer grid makes vertical, parallel and collinear cases common
        (-6i32..=6).prop_map(f64::from)
    }

    proptest! {
        #[test]
        fn prop_symmetric(
            x1 in coord(), y1 in coord(), x2 in coord(), y2 in coord(),
            x3 in coord(), y3 in coord(), x4 in coord(), y4 in coord(),
        ) {
            let a = seg(x1, y1, x2, y2);
            let b = seg(x3, y3, x4, y4);
            prop_assume!(a.start != a.end && b.start != b.end);
            prop_assert_eq!(intersect(&a, &b), intersect(&b, &a));
        }

        #[test]
        fn prop_hit_lies_in_both_boxes(
            x1 in -1e3f64..1e3, y1 in -1e3f64..1e3, x2 in -1e3f64..1e3, y2 in -1e3f64..1e3,
            x3 in -1e3f64..1e3, y3 in -1e3f64..1e3, x4 in -1e3f64..1e3, y4 in -1e3f64..1e3,
        ) {
            let a = seg(x1, y1, x2, y2);
            let b = seg(x3, y3, x4, y4);
            if let Some(p) = intersect(&a, &b) {
                prop_assert!(within_both(p, &a, &b));
            }
        }
    }
}
