//! Quadratic path builder
//!
//! Turns a [`RawOutline`] into an ordered sequence of classified points. Each
//! point records whether it is on the curve, whether it starts or ends a
//! contour and whether it was synthesized as an implied on-curve point between
//! two consecutive off-curve points.
//!
//! Points live in a flat arena and refer to their neighbours by index. Links
//! never cross a contour boundary: a contour's start point has no predecessor
//! and its end point has no successor, so walking back to the start of a
//! contour is left to the consumer.

use crate::math::midpoint;
use crate::outline::RawOutline;
use crate::PathinsError;
use log::trace;
use std::fmt;

/// A classified outline point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathPoint {
    pub x: i32,
    pub y: i32,
    pub on_curve: bool,
    pub start: bool,
    pub end: bool,
    pub implied: bool,
    /// Index of the preceding point in the same contour
    pub previous: Option<usize>,
    /// Index of the following point in the same contour
    pub next: Option<usize>,
}

impl PathPoint {
    fn new(x: i32, y: i32, on_curve: bool, start: bool, end: bool, implied: bool) -> Self {
        PathPoint {
            x,
            y,
            on_curve,
            start,
            end,
            implied,
            previous: None,
            next: None,
        }
    }

    pub fn coordinate(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn as_f64(&self) -> (f64, f64) {
        (self.x as f64, self.y as f64)
    }
}

impl fmt::Display for PathPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Classified points of one glyph, in outline order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuadraticPath {
    points: Vec<PathPoint>,
}

impl QuadraticPath {
    /// Build the classified point sequence for `outline`
    ///
    /// With `include_implied` set, an implied on-curve point is inserted at the
    /// rounded midpoint of every pair of consecutive off-curve points in a
    /// contour.
    ///
    /// A point starts a contour when it is the first point or when the point
    /// before it has the coordinates of a contour end point. A point ends a
    /// contour when its own coordinates match a contour end point. Both tests
    /// compare coordinate values, not indices, so a mid-contour point that
    /// shares its position with another contour's end point is classified as
    /// an end point too.
    ///
    /// # Errors
    ///
    /// * `MalformedOutline` if the outline arrays are inconsistent
    /// * `InvariantViolation` if a point classifies as both start and end
    pub fn build(outline: &RawOutline, include_implied: bool) -> Result<Self, PathinsError> {
        outline.validate()?;

        let coords = &outline.coordinates;
        let endpoints = outline.endpoint_coordinates();
        let mut path = QuadraticPath {
            points: Vec::with_capacity(coords.len() + coords.len() / 2),
        };

        for (index, &(x, y)) in coords.iter().enumerate() {
            let on_curve = outline.is_on_curve(index);
            let start = index == 0 || endpoints.contains(&coords[index - 1]);
            let end = endpoints.contains(&(x, y));
            if start && end {
                return Err(PathinsError::invariant(format!(
                    "point {} at ({},{}) is both a contour start and a contour end",
                    index, x, y
                )));
            }

            // off-curve after off-curve within one contour: the curve passes
            // through the midpoint of the two control points
            if include_implied && !on_curve && !start && !outline.is_on_curve(index - 1) {
                let (ix, iy) = midpoint(coords[index - 1], (x, y));
                trace!("implied on-curve point ({},{}) before point {}", ix, iy, index);
                path.push(PathPoint::new(ix, iy, true, false, false, true));
            }

            path.push(PathPoint::new(x, y, on_curve, start, end, false));
        }

        Ok(path)
    }

    /// Append a point, linking it to the previous point unless that point
    /// closed its contour.
    fn push(&mut self, mut point: PathPoint) {
        let index = self.points.len();
        if let Some(last) = self.points.last_mut() {
            if !last.end {
                last.next = Some(index);
                point.previous = Some(index - 1);
            }
        }
        self.points.push(point);
    }

    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PathPoint> {
        self.points.get(index)
    }

    /// Predecessor of the point at `index` within its contour
    pub fn previous(&self, index: usize) -> Option<&PathPoint> {
        self.points
            .get(index)
            .and_then(|point| point.previous)
            .and_then(|previous| self.points.get(previous))
    }

    /// Successor of the point at `index` within its contour
    pub fn next(&self, index: usize) -> Option<&PathPoint> {
        self.points
            .get(index)
            .and_then(|point| point.next)
            .and_then(|next| self.points.get(next))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathPoint> {
        self.points.iter()
    }

    /// Number of implied points in the path
    pub fn implied_count(&self) -> usize {
        self.points.iter().filter(|point| point.implied).count()
    }
}
