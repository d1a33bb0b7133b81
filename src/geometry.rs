//! # Edge and anchor geometry
//!
//! Pure helpers turning structural positions into drawable paths, using the
//! [`kurbo`](https://crates.io/crates/kurbo) primitives:
//!
//! - [`edge_path`]: a straight [`Line`] between two non-centre positions, or a
//!   [`QuadBez`] whose control point is chosen by a [`BendTable`] when one end is
//!   the centre.
//! - [`shift_point`]: linear or half-ellipse interpolation of an anchor.
//! - [`EdgePath::lerp`]: continuous interpolation between two paths.
//! - [`pentad_layout`] and [`ring_layout`]: fixed coordinates of the figures.
//!
//! Nothing here mutates or performs I/O.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use indexmap::IndexMap;
use kurbo::{BezPath, Line, Point, QuadBez, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    hexad::{Duad, HUB},
    permutation::Permutation,
};

/// Distance factor of an outward control point, measured from the centre.
pub const OUTWARD_SCALE: f64 = 1.25;
/// Distance factor of an inward control point, measured past the centre.
pub const INWARD_SCALE: f64 = 0.5;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("no bend entry for duad {0}")]
    MissingBend(Duad),
    #[error("position {0} has no location")]
    UnknownPosition(usize),
}

/// Which intermediate position bends an edge, and in which direction.
///
/// `Inward` is the negative entry: it flips the direction and the scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bend {
    Outward(usize),
    Inward(usize),
}

impl Bend {
    pub fn target(&self) -> usize {
        match self {
            Bend::Outward(k) | Bend::Inward(k) => *k,
        }
    }

    /// Signed factor applied to the centre-to-target vector.
    pub fn scale(&self) -> f64 {
        match self {
            Bend::Outward(_) => OUTWARD_SCALE,
            Bend::Inward(_) => -INWARD_SCALE,
        }
    }

    pub fn control_point(&self, center: Point, target: Point) -> Point {
        center + (target - center) * self.scale()
    }
}

/// The two fixed bend tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BendVariant {
    /// Spokes bulge outward past the next corner.
    #[default]
    Pentagon,
    /// Spokes swing back through the hub, towards the opposite side.
    Star,
}

/// Bend entries keyed by canonical duad.
#[derive(Debug, Clone, PartialEq)]
pub struct BendTable(IndexMap<Duad, Bend>);

impl BendTable {
    /// `{hub, v}` bends outward towards corner `v + 1`.
    pub fn pentagon() -> Self {
        BendTable(
            (0..5)
                .map(|v| (Duad::new(HUB, v), Bend::Outward((v + 1) % 5)))
                .collect(),
        )
    }

    /// `{hub, v}` bends inward, away from corner `v + 2`.
    pub fn star() -> Self {
        BendTable(
            (0..5)
                .map(|v| (Duad::new(HUB, v), Bend::Inward((v + 2) % 5)))
                .collect(),
        )
    }

    pub fn for_variant(variant: BendVariant) -> Self {
        match variant {
            BendVariant::Pentagon => Self::pentagon(),
            BendVariant::Star => Self::star(),
        }
    }

    pub fn get(&self, duad: Duad) -> Option<Bend> {
        self.0.get(&duad).copied()
    }
}

/// A drawable edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgePath {
    Line(Line),
    Quad(QuadBez),
}

impl EdgePath {
    pub fn start(&self) -> Point {
        match self {
            EdgePath::Line(l) => l.p0,
            EdgePath::Quad(q) => q.p0,
        }
    }

    pub fn end(&self) -> Point {
        match self {
            EdgePath::Line(l) => l.p1,
            EdgePath::Quad(q) => q.p2,
        }
    }

    /// Control point; the midpoint for straight lines.
    pub fn control(&self) -> Point {
        match self {
            EdgePath::Line(l) => l.p0.midpoint(l.p1),
            EdgePath::Quad(q) => q.p1,
        }
    }

    pub fn is_curved(&self) -> bool {
        matches!(self, EdgePath::Quad(_))
    }

    /// Interpolates endpoints and control point. Two lines stay a line, anything
    /// else is promoted to a quadratic.
    pub fn lerp(&self, other: &EdgePath, t: f64) -> EdgePath {
        match (self, other) {
            (EdgePath::Line(a), EdgePath::Line(b)) => {
                EdgePath::Line(Line::new(a.p0.lerp(b.p0, t), a.p1.lerp(b.p1, t)))
            }
            _ => EdgePath::Quad(QuadBez::new(
                self.start().lerp(other.start(), t),
                self.control().lerp(other.control(), t),
                self.end().lerp(other.end(), t),
            )),
        }
    }

    pub fn to_bez(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start());
        match self {
            EdgePath::Line(l) => path.line_to(l.p1),
            EdgePath::Quad(q) => path.quad_to(q.p1, q.p2),
        }
        path
    }

    pub fn to_svg(&self) -> String {
        self.to_bez().to_svg()
    }
}

/// Path of the edge joining the two members of `duad`.
///
/// Members are first sent through `remap`, if given. An edge between two
/// non-centre positions is straight; an edge touching `center` is a quadratic
/// bent according to `bends`.
pub fn edge_path(
    duad: Duad,
    locations: &[Point],
    center: usize,
    bends: &BendTable,
    remap: Option<&Permutation>,
) -> Result<EdgePath, GeometryError> {
    let (left, right) = match remap {
        Some(perm) => (perm.map_index(duad.lo()), perm.map_index(duad.hi())),
        None => (duad.lo(), duad.hi()),
    };
    let at = |i: usize| {
        locations
            .get(i)
            .copied()
            .ok_or(GeometryError::UnknownPosition(i))
    };
    let (start, end) = (at(left)?, at(right)?);

    if left != center && right != center {
        return Ok(EdgePath::Line(Line::new(start, end)));
    }

    let key = Duad::new(left, right);
    let bend = bends.get(key).ok_or(GeometryError::MissingBend(key))?;
    let ctrl = bend.control_point(at(center)?, at(bend.target())?);
    Ok(EdgePath::Quad(QuadBez::new(start, ctrl, end)))
}

/// How an anchor travels between two locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftMode {
    Linear,
    /// Along a half-ellipse: the swap gesture.
    #[default]
    Arc,
}

/// Position of an anchor moving from `old` to `new` at parameter `t`.
///
/// In [`ShiftMode::Arc`] the anchor follows the half-ellipse centred on the
/// midpoint, with semi-major axis `a = |new - old| / 2` along the travel
/// direction `u` and semi-minor axis `b = a / 2` along its normal `n`:
/// `mid + a cos(θ) u + b sin(θ) n` with `θ = π (1 + t)`.
///
/// ```
/// # use pentad::geometry::{shift_point, ShiftMode};
/// # use kurbo::Point;
/// let p = shift_point(Point::new(-10.0, 0.0), Point::new(10.0, 0.0), 0.5, ShiftMode::Arc);
/// assert!((p - Point::new(0.0, -5.0)).hypot() < 1e-12);
/// ```
pub fn shift_point(old: Point, new: Point, t: f64, mode: ShiftMode) -> Point {
    match mode {
        ShiftMode::Linear => old.lerp(new, t),
        ShiftMode::Arc => {
            let travel = new - old;
            let length = travel.hypot();
            if length == 0.0 {
                return old;
            }
            let u = travel / length;
            let n = Vec2::new(-u.y, u.x);
            let a = length / 2.0;
            let b = a / 2.0;
            let theta = PI * (1.0 + t);
            old.midpoint(new) + u * (a * theta.cos()) + n * (b * theta.sin())
        }
    }
}

/// Five corners of a regular pentagon (corner 0 at the top, clockwise on screen)
/// followed by the hub at `center`.
pub fn pentad_layout(center: Point, radius: f64) -> [Point; 6] {
    let mut points = [center; 6];
    for (k, p) in points.iter_mut().take(5).enumerate() {
        let angle = -FRAC_PI_2 + TAU * k as f64 / 5.0;
        *p = center + Vec2::from_angle(angle) * radius;
    }
    points
}

/// `n` points evenly spread on a circle, the first at the top.
pub fn ring_layout(center: Point, radius: f64, n: usize) -> Vec<Point> {
    (0..n)
        .map(|k| center + Vec2::from_angle(-FRAC_PI_2 + TAU * k as f64 / n as f64) * radius)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn close(a: Point, b: Point) -> bool {
        (a - b).hypot() < EPS
    }

    fn unit_pentad() -> [Point; 6] {
        pentad_layout(Point::ZERO, 1.0)
    }

    #[test]
    fn arc_shift_reaches_apex() {
        let old = Point::new(-10.0, 0.0);
        let new = Point::new(10.0, 0.0);
        let mid = shift_point(old, new, 0.5, ShiftMode::Arc);
        // θ = 1.5π: cos θ = 0, sin θ = -1, so the anchor sits b = 5 below the chord
        let theta = PI * 1.5;
        let expected = Point::new(10.0 * theta.cos(), 5.0 * theta.sin());
        assert_eq!(mid, expected);
        assert!(close(mid, Point::new(0.0, -5.0)));
    }

    #[test]
    fn arc_shift_endpoints() {
        let old = Point::new(3.0, 4.0);
        let new = Point::new(-7.0, 1.0);
        assert!(close(shift_point(old, new, 0.0, ShiftMode::Arc), old));
        assert!(close(shift_point(old, new, 1.0, ShiftMode::Arc), new));
        assert_eq!(shift_point(old, old, 0.3, ShiftMode::Arc), old);
    }

    #[test]
    fn linear_shift() {
        let p = shift_point(
            Point::new(0.0, 0.0),
            Point::new(4.0, 2.0),
            0.25,
            ShiftMode::Linear,
        );
        assert_eq!(p, Point::new(1.0, 0.5));
    }

    #[test]
    fn chords_are_straight() {
        let locs = unit_pentad();
        let path = edge_path(Duad::new(0, 2), &locs, HUB, &BendTable::pentagon(), None).unwrap();
        assert_eq!(path, EdgePath::Line(Line::new(locs[0], locs[2])));
    }

    #[test]
    fn outward_bend() {
        let locs = unit_pentad();
        let path = edge_path(Duad::new(5, 1), &locs, HUB, &BendTable::pentagon(), None).unwrap();
        let EdgePath::Quad(q) = path else {
            panic!("spoke should be curved");
        };
        assert_eq!(q.p0, locs[1]);
        assert_eq!(q.p2, locs[5]);
        // pushed past corner 2, away from the hub
        assert!(close(q.p1, (locs[2].to_vec2() * OUTWARD_SCALE).to_point()));
        assert!(q.p1.to_vec2().hypot() > 1.0);
    }

    #[test]
    fn inward_bend_passes_the_hub() {
        let locs = unit_pentad();
        let path = edge_path(Duad::new(0, 5), &locs, HUB, &BendTable::star(), None).unwrap();
        let EdgePath::Quad(q) = path else {
            panic!("spoke should be curved");
        };
        // reflected through the hub from corner 2, at half the distance
        assert!(close(q.p1, (locs[2].to_vec2() * -INWARD_SCALE).to_point()));
        assert!((q.p1.to_vec2().hypot() - INWARD_SCALE).abs() < EPS);
    }

    #[test]
    fn remap_moves_endpoints() {
        let locs = unit_pentad();
        // send point 0 to the hub, so the chord 0-3 becomes a spoke
        let remap = Permutation::transposition(0, 5);
        let path = edge_path(
            Duad::new(0, 3),
            &locs,
            HUB,
            &BendTable::pentagon(),
            Some(&remap),
        )
        .unwrap();
        assert!(path.is_curved());
        assert_eq!(path.start(), locs[5]);
        assert_eq!(path.end(), locs[3]);
    }

    #[test]
    fn missing_entries_fail() {
        let locs = unit_pentad();
        let empty = BendTable(IndexMap::new());
        assert_eq!(
            edge_path(Duad::new(1, 5), &locs, HUB, &empty, None),
            Err(GeometryError::MissingBend(Duad::new(1, 5)))
        );
        assert_eq!(
            edge_path(Duad::new(1, 4), &locs[..3], HUB, &empty, None),
            Err(GeometryError::UnknownPosition(4))
        );
    }

    #[test]
    fn path_interpolation() {
        let a = EdgePath::Line(Line::new(Point::new(0.0, 0.0), Point::new(2.0, 0.0)));
        let b = EdgePath::Quad(QuadBez::new(
            Point::new(0.0, 2.0),
            Point::new(1.0, 4.0),
            Point::new(2.0, 2.0),
        ));
        let mid = a.lerp(&b, 0.5);
        assert_eq!(
            mid,
            EdgePath::Quad(QuadBez::new(
                Point::new(0.0, 1.0),
                Point::new(1.0, 2.0),
                Point::new(2.0, 1.0),
            ))
        );
        assert!(!a.lerp(&a, 0.3).is_curved());
        assert!(a.to_svg().starts_with('M'));
    }

    #[test]
    fn layouts() {
        let locs = pentad_layout(Point::new(1.0, 1.0), 2.0);
        assert!(close(locs[0], Point::new(1.0, -1.0)));
        assert_eq!(locs[HUB], Point::new(1.0, 1.0));
        let ring = ring_layout(Point::ZERO, 3.0, 6);
        assert_eq!(ring.len(), 6);
        assert!(close(ring[3], Point::new(0.0, 3.0)));
    }
}
