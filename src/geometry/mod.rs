//! Edge Geometry Engine: curved paths trimmed to node boundaries
//!
//! Every drawn edge is a cubic Bézier from the source node's center toward
//! the target's. The visible path is truncated so it terminates exactly on
//! the target's circle boundary, and a fixed-length arrowhead is placed with
//! its tip on that boundary and its body outside the circle.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Fraction of the edge length used to bow the control points sideways.
const CURVE_BOW: f64 = 0.08;

/// Largest allowed parametric offset from t = 1; keeps very short edges
/// from collapsing to a point.
const MAX_TRIM: f64 = 0.5;

/// Parametric offset used when the endpoints nearly coincide.
const FALLBACK_TRIM: f64 = 0.1;

/// Below this center distance the edge counts as degenerate.
const DEGENERATE_DISTANCE: f64 = 1e-3;

/// Length of the arrowhead glyph along the curve.
pub const ARROW_LENGTH: f64 = 10.0;

/// A 2D point or vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Self) -> f64 {
        (other - self).length()
    }

    /// Counter-clockwise perpendicular.
    pub fn perp(self) -> Self {
        Self::new(-self.y, self.x)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// A cubic Bézier curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub p0: Vec2,
    pub p1: Vec2,
    pub p2: Vec2,
    pub p3: Vec2,
}

impl CubicBezier {
    /// Gentle S-curve between two node centers: control points at the
    /// one-third marks, bowed to opposite sides of the chord.
    pub fn s_curve(source: Vec2, target: Vec2) -> Self {
        let chord = target - source;
        // chord.perp() carries the chord's length, so this bows the curve
        // by CURVE_BOW of the edge length without dividing by it
        let bow = chord.perp() * CURVE_BOW;
        Self {
            p0: source,
            p1: source + chord * (1.0 / 3.0) + bow,
            p2: target - chord * (1.0 / 3.0) - bow,
            p3: target,
        }
    }

    /// Evaluate the curve at `t` (de Casteljau).
    pub fn point(&self, t: f64) -> Vec2 {
        let a = lerp(self.p0, self.p1, t);
        let b = lerp(self.p1, self.p2, t);
        let c = lerp(self.p2, self.p3, t);
        let d = lerp(a, b, t);
        let e = lerp(b, c, t);
        lerp(d, e, t)
    }

    /// The left half of the de Casteljau subdivision at `t`: a cubic
    /// covering the original curve on [0, t].
    pub fn truncate(&self, t: f64) -> CubicBezier {
        let a = lerp(self.p0, self.p1, t);
        let b = lerp(self.p1, self.p2, t);
        let c = lerp(self.p2, self.p3, t);
        let d = lerp(a, b, t);
        let e = lerp(b, c, t);
        let f = lerp(d, e, t);
        CubicBezier {
            p0: self.p0,
            p1: a,
            p2: d,
            p3: f,
        }
    }

    /// Parametric offset ε = 1 − t such that |B(1) − B(1−ε)| ≈ `dist`.
    ///
    /// Near t = 1 the displacement is dominated by the tangent term
    /// 3ε(P3 − P2), giving ε ≈ dist / (3·|P3 − P2|) in closed form. Two
    /// exact-curve scaling steps absorb the curvature error; the result is
    /// clamped so short edges never trim past `MAX_TRIM`.
    pub fn trim_offset(&self, dist: f64) -> f64 {
        let tangent = (self.p3 - self.p2).length();
        if tangent < DEGENERATE_DISTANCE || !dist.is_finite() || dist <= 0.0 {
            return FALLBACK_TRIM;
        }
        let mut eps = dist / (3.0 * tangent);
        for _ in 0..2 {
            let actual = self.p3.distance(self.point(1.0 - eps.min(MAX_TRIM)));
            if actual > DEGENERATE_DISTANCE {
                eps *= dist / actual;
            }
        }
        if !eps.is_finite() {
            return FALLBACK_TRIM;
        }
        eps.clamp(f64::EPSILON, MAX_TRIM)
    }
}

fn lerp(a: Vec2, b: Vec2, t: f64) -> Vec2 {
    a + (b - a) * t
}

/// A drawable edge: the trimmed path plus the arrowhead transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimmedEdge {
    /// Visible path, terminating on the target circle boundary
    pub path: CubicBezier,
    /// Arrowhead tip (on the boundary)
    pub arrow_tip: Vec2,
    /// Arrowhead rotation in radians
    pub arrow_angle: f64,
    /// Curve parameter where the visible path ends
    pub t_end: f64,
}

/// Shorten the edge from `source` to `target` so it stops on the circle of
/// the given `radius` around the target, and place the arrowhead.
///
/// Never panics: near-coincident centers fall back to a fixed minimal
/// offset and an axis-aligned arrowhead.
pub fn shorten(source: Vec2, target: Vec2, radius: f64) -> TrimmedEdge {
    let curve = CubicBezier::s_curve(source, target);

    let eps_end = if source.distance(target) < DEGENERATE_DISTANCE {
        FALLBACK_TRIM
    } else {
        curve.trim_offset(radius)
    };
    let eps_back = curve.trim_offset(radius + ARROW_LENGTH).max(eps_end);

    let t_end = 1.0 - eps_end;
    let t_back = 1.0 - eps_back;

    let tip = curve.point(t_end);
    let back = curve.point(t_back);
    let dir = tip - back;
    let arrow_angle = if dir.length() > f64::EPSILON {
        dir.y.atan2(dir.x)
    } else {
        0.0
    };

    TrimmedEdge {
        path: curve.truncate(t_end),
        arrow_tip: tip,
        arrow_angle,
        t_end,
    }
}
