//! Point math used by the outline builder and the segment walker.
//!
//! Rounding follows the font convention: fractional values of one half
//! round towards positive infinity, so `7.5` becomes `8` and `-7.5`
//! becomes `-7`.

/// Tolerance used to detect a control point that is collinear with the
/// chord of a quadratic curve.
const EPSILON: f64 = 1e-10;

/// Rounds a float to the nearest integer, with ties going towards +infinity.
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Euclidean distance between two coordinates.
pub fn distance(from: (i32, i32), to: (i32, i32)) -> f64 {
    distance_f64(
        (from.0 as f64, from.1 as f64),
        (to.0 as f64, to.1 as f64),
    )
}

fn distance_f64(from: (f64, f64), to: (f64, f64)) -> f64 {
    (to.0 - from.0).hypot(to.1 - from.1)
}

/// Rounded midpoint between two integer coordinates.
///
/// # Example
/// ```
/// use pathins::math::midpoint;
///
/// assert_eq!(midpoint((15, 0), (0, 0)), (8, 0));
/// assert_eq!(midpoint((-15, -15), (0, 0)), (-7, -7));
/// ```
pub fn midpoint(a: (i32, i32), b: (i32, i32)) -> (i32, i32) {
    (
        round_half_up((a.0 as f64 + b.0 as f64) / 2.0),
        round_half_up((a.1 as f64 + b.1 as f64) / 2.0),
    )
}

/// Closed-form arc length of the quadratic Bezier `p0 -> p2` with control `p1`.
///
/// The length integral reduces to the antiderivative of `sec(atan(x))`
/// once the curve is expressed in the frame of its second difference.
/// Degenerate curves (straight or folded back on themselves) are handled
/// separately.
pub fn quadratic_arc_length(p0: (f64, f64), p1: (f64, f64), p2: (f64, f64)) -> f64 {
    let d0 = (p1.0 - p0.0, p1.1 - p0.1);
    let d1 = (p2.0 - p1.0, p2.1 - p1.1);
    let d = (d1.0 - d0.0, d1.1 - d0.1);
    let normal = (-d.1, d.0);
    let scale = normal.0.hypot(normal.1);
    if scale == 0.0 {
        return distance_f64(p0, p2);
    }

    let orig_dist = dot(normal, d0);
    if orig_dist.abs() < EPSILON {
        if dot(d0, d1) >= 0.0 {
            return distance_f64(p0, p2);
        }
        // the control point sits outside the chord; the curve runs out and back
        let a = d0.0.hypot(d0.1);
        let b = d1.0.hypot(d1.1);
        return (a * a + b * b) / (a + b);
    }

    let x0 = dot(d, d0) / orig_dist;
    let x1 = dot(d, d1) / orig_dist;
    (2.0 * (sec_atan_integral(x1) - sec_atan_integral(x0)) * orig_dist / (scale * (x1 - x0))).abs()
}

fn dot(a: (f64, f64), b: (f64, f64)) -> f64 {
    a.0 * b.0 + a.1 * b.1
}

fn sec_atan_integral(x: f64) -> f64 {
    x * (x * x + 1.0).sqrt() / 2.0 + x.asinh() / 2.0
}
