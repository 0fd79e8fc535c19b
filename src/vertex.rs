//! A single knot of a Catmull-Rom spline.

#[cfg(feature = "serde")]
use serde_::{Deserialize, Serialize};

use crate::vector3::Vector3;

/// How distances between control points turn into spline parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_")
)]
pub enum Parameterization {
    /// Full 3D Euclidean distance.
    Chordal,
    /// Distance of the projection onto the x/y plane, ignoring z.
    ///
    /// Useful for ground paths where height changes should not stretch
    /// the timing of the curve. Two points that differ only in z are
    /// coincident under this metric.
    Planar,
}

impl Default for Parameterization {
    fn default() -> Parameterization {
        Parameterization::Chordal
    }
}

impl Parameterization {
    /// The distance between two control points under this metric.
    pub fn distance(self, a: Vector3, b: Vector3) -> f64 {
        match self {
            Parameterization::Chordal => a.distance(b),
            Parameterization::Planar => (b.xy() - a.xy()).hypot(),
        }
    }
}

/// One control vertex and the segment that starts at it.
///
/// Everything except the position (and an optional explicit parameter,
/// ignored for the first vertex) is derived when the owning [`CatmullSpline`](crate::CatmullSpline) is
/// constructed. Neighbors are stored as indices into the owning spline.
#[derive(Clone, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_")
)]
pub struct ControlVertex {
    p: Vector3,
    #[cfg_attr(feature = "serde", serde(default, rename = "t"))]
    explicit_t: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip))]
    t: f64,
    #[cfg_attr(feature = "serde", serde(skip))]
    v: Vector3,
    #[cfg_attr(feature = "serde", serde(skip))]
    a0: Vector3,
    #[cfg_attr(feature = "serde", serde(skip))]
    a1: Vector3,
    #[cfg_attr(feature = "serde", serde(skip))]
    a2: Vector3,
    #[cfg_attr(feature = "serde", serde(skip))]
    a3: Vector3,
    #[cfg_attr(feature = "serde", serde(skip))]
    prev: Option<usize>,
    #[cfg_attr(feature = "serde", serde(skip))]
    next: Option<usize>,
}

impl ControlVertex {
    pub(crate) fn new(p: Vector3, explicit_t: Option<f64>) -> ControlVertex {
        ControlVertex {
            p,
            explicit_t,
            ..Default::default()
        }
    }

    /// The spline parameter at this vertex.
    pub fn t(&self) -> f64 {
        self.t
    }

    /// The control point.
    pub fn p(&self) -> Vector3 {
        self.p
    }

    /// The velocity of the curve at this vertex.
    pub fn v(&self) -> Vector3 {
        self.v
    }

    /// The parameter given when the vertex was added, if any.
    pub fn explicit_t(&self) -> Option<f64> {
        self.explicit_t
    }

    /// The Hermite coefficients `[a0, a1, a2, a3]` of the segment starting
    /// here, lowest order first.
    pub fn coefficients(&self) -> [Vector3; 4] {
        [self.a0, self.a1, self.a2, self.a3]
    }

    /// Index of the previous vertex in the owning spline.
    pub fn prev(&self) -> Option<usize> {
        self.prev
    }

    /// Index of the next vertex in the owning spline.
    pub fn next(&self) -> Option<usize> {
        self.next
    }

    /// Link a vertex that has no neighbors at all.
    pub(crate) fn link_isolated(&mut self) {
        self.prev = None;
        self.next = None;
        self.t = 0.0;
    }

    /// Link the first vertex of a path.
    ///
    /// `prev` is only set for closed paths, where it refers to the last vertex.
    /// The start of a path is always at `t = 0`, even if an explicit parameter
    /// was given.
    pub(crate) fn link_start(&mut self, prev: Option<usize>, next: usize) {
        self.prev = prev;
        self.next = Some(next);
        self.t = 0.0;
    }

    /// Link an interior or end vertex, accumulating the parameter onto
    /// that of its predecessor.
    pub(crate) fn link_after(
        &mut self,
        prev_ix: usize,
        prev: &ControlVertex,
        next: Option<usize>,
        metric: Parameterization,
    ) {
        self.prev = Some(prev_ix);
        self.next = next;
        self.t = match self.explicit_t {
            Some(t) => t,
            None => prev.t + metric.distance(prev.p, self.p),
        };
    }

    /// Derive the velocity from the neighboring control points.
    ///
    /// Each neighbor is given as its position and the parameter span of the
    /// segment between it and this vertex.
    pub(crate) fn compute_velocity(
        &mut self,
        prev: Option<(Vector3, f64)>,
        next: Option<(Vector3, f64)>,
    ) {
        self.v = match (prev, next) {
            (Some((pm1, dtm1)), Some((pp1, dtp1))) => {
                ((pp1 - self.p) / dtp1 + (self.p - pm1) / dtm1) / 2.0
            }
            (None, Some((pp1, dtp1))) => (pp1 - self.p) / dtp1,
            (Some((pm1, dtm1)), None) => (self.p - pm1) / dtm1,
            (None, None) => Vector3::ZERO,
        };
    }

    /// Derive the cubic Hermite coefficients of the segment to the next
    /// vertex, which has position `pp1`, velocity `vp1`, and lies `dtp1`
    /// further along the spline.
    pub(crate) fn compute_hermite(&mut self, pp1: Vector3, vp1: Vector3, dtp1: f64) {
        let dtp1_2 = dtp1 * dtp1;
        self.a0 = self.p;
        self.a1 = self.v;
        self.a2 = 3.0 * (pp1 - self.p) / dtp1_2 - (vp1 + 2.0 * self.v) / dtp1;
        self.a3 = 2.0 * (self.p - pp1) / (dtp1_2 * dtp1) + (vp1 + self.v) / dtp1_2;
    }

    /// Coefficients for the end of an open path.
    ///
    /// There is no outgoing segment; instead the incoming segment is
    /// re-expanded around this vertex so an evaluation exactly at the end
    /// reproduces the control point and velocity.
    pub(crate) fn compute_terminal(&mut self, incoming: &ControlVertex) {
        self.a0 = self.p;
        self.a1 = self.v;
        self.a2 = incoming.eval_acceleration(self.t) / 2.0;
        self.a3 = incoming.a3;
    }

    /// Coefficients for a spline made of this vertex only.
    pub(crate) fn compute_isolated(&mut self) {
        self.a0 = self.p;
        self.a1 = Vector3::ZERO;
        self.a2 = Vector3::ZERO;
        self.a3 = Vector3::ZERO;
    }

    /// Position of this vertex's segment at global parameter `u`.
    ///
    /// No range check is done; `u` is not required to lie on the segment.
    pub fn eval_position(&self, u: f64) -> Vector3 {
        let dt = u - self.t;
        self.a3 * (dt * dt * dt) + self.a2 * (dt * dt) + self.a1 * dt + self.a0
    }

    /// First derivative of the segment at global parameter `u`.
    pub fn eval_velocity(&self, u: f64) -> Vector3 {
        let dt = u - self.t;
        3.0 * self.a3 * (dt * dt) + 2.0 * self.a2 * dt + self.a1
    }

    /// Second derivative of the segment at global parameter `u`.
    pub fn eval_acceleration(&self, u: f64) -> Vector3 {
        let dt = u - self.t;
        6.0 * self.a3 * dt + 2.0 * self.a2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex_at(p: Vector3, t: f64) -> ControlVertex {
        ControlVertex {
            t,
            ..ControlVertex::new(p, None)
        }
    }

    #[test]
    fn fresh_vertex_has_zero_coefficients() {
        let cv = ControlVertex::new(Vector3::ZERO, Some(1.0));
        assert_eq!(cv.coefficients(), [Vector3::ZERO; 4]);
        assert_eq!(cv.v(), Vector3::ZERO);
        assert_eq!(cv.explicit_t(), Some(1.0));
    }

    #[test]
    fn link_accumulates_distance() {
        let mut a = ControlVertex::new(Vector3::ZERO, None);
        a.link_start(None, 1);
        assert_eq!(a.t(), 0.0);

        let mut b = ControlVertex::new(Vector3::new(3.0, 4.0, 12.0), None);
        b.link_after(0, &a, None, Parameterization::Chordal);
        assert_eq!(b.t(), 13.0);
        assert_eq!(b.prev(), Some(0));
        assert_eq!(b.next(), None);

        b.link_after(0, &a, Some(2), Parameterization::Planar);
        assert_eq!(b.t(), 5.0);
        assert_eq!(b.next(), Some(2));
    }

    #[test]
    fn link_prefers_explicit_parameter() {
        let a = vertex_at(Vector3::ZERO, 0.0);
        let mut b = ControlVertex::new(Vector3::new(10.0, 0.0, 0.0), Some(2.0));
        b.link_after(0, &a, None, Parameterization::Chordal);
        assert_eq!(b.t(), 2.0);

    }

    #[test]
    fn path_start_ignores_explicit_parameter() {
        let mut start = ControlVertex::new(Vector3::ZERO, Some(5.0));
        start.link_start(Some(3), 1);
        assert_eq!(start.t(), 0.0);
        assert_eq!(start.explicit_t(), Some(5.0));

        let mut lone = ControlVertex::new(Vector3::ZERO, Some(-1.0));
        lone.link_isolated();
        assert_eq!(lone.t(), 0.0);
    }

    #[test]
    fn velocity_rules() {
        let mut cv = vertex_at(Vector3::new(1.0, 0.0, 0.0), 1.0);
        let prev = (Vector3::ZERO, 1.0);
        let next = (Vector3::new(3.0, 2.0, 0.0), 2.0);

        cv.compute_velocity(Some(prev), Some(next));
        assert_eq!(cv.v(), Vector3::new(1.0, 0.5, 0.0));

        cv.compute_velocity(None, Some(next));
        assert_eq!(cv.v(), Vector3::new(1.0, 1.0, 0.0));

        cv.compute_velocity(Some(prev), None);
        assert_eq!(cv.v(), Vector3::new(1.0, 0.0, 0.0));

        cv.compute_velocity(None, None);
        assert_eq!(cv.v(), Vector3::ZERO);
    }

    #[test]
    fn hermite_with_matching_tangents_is_linear() {
        let mut cv = vertex_at(Vector3::ZERO, 0.0);
        cv.v = Vector3::new(1.0, 0.0, 0.0);
        cv.compute_hermite(Vector3::new(1.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0), 1.0);
        assert_eq!(cv.coefficients()[2], Vector3::ZERO);
        assert_eq!(cv.coefficients()[3], Vector3::ZERO);
        assert_eq!(cv.eval_position(0.25), Vector3::new(0.25, 0.0, 0.0));
    }

    #[test]
    fn hermite_smoothstep() {
        // Zero end velocities over a unit span give 3s^2 - 2s^3.
        let mut cv = vertex_at(Vector3::ZERO, 2.0);
        let end = Vector3::new(1.0, 0.0, 0.0);
        cv.compute_hermite(end, Vector3::ZERO, 1.0);
        let [a0, a1, a2, a3] = cv.coefficients();
        assert_eq!(a0, Vector3::ZERO);
        assert_eq!(a1, Vector3::ZERO);
        assert_eq!(a2, Vector3::new(3.0, 0.0, 0.0));
        assert_eq!(a3, Vector3::new(-2.0, 0.0, 0.0));

        assert_eq!(cv.eval_position(2.0), Vector3::ZERO);
        assert_eq!(cv.eval_position(2.5), Vector3::new(0.5, 0.0, 0.0));
        assert_eq!(cv.eval_position(3.0), end);
        assert_eq!(cv.eval_velocity(2.5), Vector3::new(1.5, 0.0, 0.0));
        assert_eq!(cv.eval_velocity(3.0), Vector3::ZERO);
        assert_eq!(cv.eval_acceleration(2.5), Vector3::ZERO);
        assert_eq!(cv.eval_acceleration(2.0), Vector3::new(6.0, 0.0, 0.0));
    }

    #[test]
    fn terminal_continues_incoming_segment() {
        let mut start = vertex_at(Vector3::ZERO, 0.0);
        let end_p = Vector3::new(1.0, 0.0, 0.0);
        start.compute_hermite(end_p, Vector3::ZERO, 1.0);

        let mut end = vertex_at(end_p, 1.0);
        end.compute_terminal(&start);
        assert_eq!(end.eval_position(1.0), end_p);
        assert_eq!(end.eval_velocity(1.0), Vector3::ZERO);
        assert_eq!(end.eval_acceleration(1.0), start.eval_acceleration(1.0));
    }

    #[test]
    fn isolated_vertex_is_constant() {
        let p = Vector3::new(4.0, 5.0, 6.0);
        let mut cv = ControlVertex::new(p, None);
        cv.link_isolated();
        cv.compute_velocity(None, None);
        cv.compute_isolated();
        assert_eq!(cv.eval_position(0.0), p);
        assert_eq!(cv.eval_position(3.0), p);
        assert_eq!(cv.eval_velocity(3.0), Vector3::ZERO);
    }
}
