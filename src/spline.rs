//! A Catmull-Rom spline through 3D control points.

use kurbo::BezPath;
#[cfg(feature = "serde")]
use serde_::{Deserialize, Serialize};

use crate::error::SplineError;
use crate::util;
use crate::vector3::Vector3;
use crate::vertex::{ControlVertex, Parameterization};

/// An interpolating spline through an ordered sequence of control points.
///
/// Vertices are appended with [`add_control_vertex`], then the spline is
/// built with [`construct`] (open path) or [`construct_loop`] (closed path).
/// After that, position, velocity and acceleration can be queried for any
/// parameter in the domain.
///
/// Each vertex is assigned a parameter equal to the accumulated distance
/// from the first vertex, its velocity is estimated from the neighboring
/// points, and each segment is the cubic Hermite curve matching the
/// positions and velocities at both of its ends.
///
/// [`add_control_vertex`]: CatmullSpline::add_control_vertex
/// [`construct`]: CatmullSpline::construct
/// [`construct_loop`]: CatmullSpline::construct_loop
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_")
)]
pub struct CatmullSpline {
    vertices: Vec<ControlVertex>,
    #[cfg_attr(feature = "serde", serde(default))]
    parameterization: Parameterization,
    #[cfg_attr(feature = "serde", serde(default))]
    closed: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    min_t: f64,
    #[cfg_attr(feature = "serde", serde(skip))]
    max_t: f64,
    /// Parameter span of the segment from the last vertex back to the first.
    #[cfg_attr(feature = "serde", serde(skip))]
    wrap_length: f64,
    /// `true` if vertices changed since the last construction.
    #[cfg_attr(feature = "serde", serde(skip, default = "serde_true"))]
    dirty: bool,
}

#[cfg(feature = "serde")]
fn serde_true() -> bool {
    true
}

impl Default for CatmullSpline {
    fn default() -> CatmullSpline {
        CatmullSpline::new()
    }
}

impl CatmullSpline {
    /// Start a new, empty spline with chordal parameterization.
    pub fn new() -> CatmullSpline {
        CatmullSpline::with_parameterization(Parameterization::Chordal)
    }

    /// Start a new, empty spline using the given distance metric.
    pub fn with_parameterization(parameterization: Parameterization) -> CatmullSpline {
        CatmullSpline {
            vertices: Vec::new(),
            parameterization,
            closed: false,
            min_t: 0.0,
            max_t: 0.0,
            wrap_length: 0.0,
            dirty: true,
        }
    }

    /// Append a control point.
    ///
    /// Its parameter is derived from the distance to the previous point
    /// when the spline is constructed.
    pub fn add_control_vertex(&mut self, p: Vector3) {
        self.vertices.push(ControlVertex::new(p, None));
        self.dirty = true;
    }

    /// Append a control point with an explicit parameter.
    ///
    /// The parameter is not checked here; construction fails if the
    /// parameters do not strictly increase along the path.
    pub fn add_control_vertex_at(&mut self, p: Vector3, t: f64) {
        self.vertices.push(ControlVertex::new(p, Some(t)));
        self.dirty = true;
    }

    /// Build an open path through the control points.
    pub fn construct(&mut self) -> Result<(), SplineError> {
        if self.vertices.is_empty() {
            return Err(SplineError::NoVertices);
        }
        self.build(false)
    }

    /// Build a closed path, with an extra segment from the last control
    /// point back to the first.
    pub fn construct_loop(&mut self) -> Result<(), SplineError> {
        if self.vertices.len() < 2 {
            return Err(SplineError::NotEnoughVerticesForLoop {
                provided: self.vertices.len(),
            });
        }
        self.build(true)
    }

    /// Construct again with the current topology.
    ///
    /// This is mostly useful after deserializing, which only restores the
    /// control points and whether the path is closed.
    pub fn rebuild(&mut self) -> Result<(), SplineError> {
        if self.closed {
            self.construct_loop()
        } else {
            self.construct()
        }
    }

    /// Run the construction stages on a scratch copy, committing only on
    /// success. A failed construction leaves the spline as it was.
    fn build(&mut self, closed: bool) -> Result<(), SplineError> {
        let mut next = self.clone();
        next.closed = closed;
        next.assign_parameters();
        next.check_spans()?;
        next.compute_velocities();
        next.compute_bounds();
        next.compute_coefficients();
        next.dirty = false;
        log::debug!(
            "constructed {} spline with {} vertices over [{}, {}]",
            if closed { "closed" } else { "open" },
            next.vertices.len(),
            next.min_t,
            next.max_t
        );
        *self = next;
        Ok(())
    }

    /// Link neighbors and assign each vertex its parameter.
    fn assign_parameters(&mut self) {
        let n = self.vertices.len();
        let metric = self.parameterization;
        if n == 1 {
            self.vertices[0].link_isolated();
            self.wrap_length = 0.0;
            return;
        }
        let last = n - 1;
        let closing = if self.closed { Some(last) } else { None };
        self.vertices[0].link_start(closing, 1);
        for i in 1..n {
            let next = if i < last {
                Some(i + 1)
            } else if self.closed {
                Some(0)
            } else {
                None
            };
            let (head, tail) = self.vertices.split_at_mut(i);
            tail[0].link_after(i - 1, &head[i - 1], next, metric);
        }
        self.wrap_length = if self.closed {
            metric.distance(self.vertices[last].p(), self.vertices[0].p())
        } else {
            0.0
        };
    }

    /// The number of segments, counting the wrap segment of a closed path.
    fn n_segments(&self) -> usize {
        if self.closed {
            self.vertices.len()
        } else {
            self.vertices.len() - 1
        }
    }

    /// Parameter span of the segment starting at vertex `i`.
    fn segment_span(&self, i: usize) -> f64 {
        if i + 1 < self.vertices.len() {
            self.vertices[i + 1].t() - self.vertices[i].t()
        } else {
            self.wrap_length
        }
    }

    fn check_spans(&self) -> Result<(), SplineError> {
        for index in 0..self.n_segments() {
            let span = self.segment_span(index);
            if !(span > 0.0 && span.is_finite()) {
                log::warn!("rejecting degenerate segment {} (span {})", index, span);
                return Err(SplineError::DegenerateSegment { index, span });
            }
        }
        Ok(())
    }

    fn compute_velocities(&mut self) {
        for i in 0..self.vertices.len() {
            let prev = self.vertices[i]
                .prev()
                .map(|j| (self.vertices[j].p(), self.segment_span(j)));
            let next = self.vertices[i]
                .next()
                .map(|j| (self.vertices[j].p(), self.segment_span(i)));
            let vertex = &mut self.vertices[i];
            vertex.compute_velocity(prev, next);
            log::trace!("vertex {}: t = {}, v = {:?}", i, vertex.t(), vertex.v());
        }
    }

    fn compute_bounds(&mut self) {
        let (min_t, max_t) = self
            .vertices
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v.t()), hi.max(v.t()))
            });
        self.min_t = min_t;
        self.max_t = if self.closed {
            // The wrap segment ends past every vertex.
            self.vertices[self.vertices.len() - 1].t() + self.wrap_length
        } else {
            max_t
        };
    }

    /// Hermite coefficients; every velocity must be known at this point.
    fn compute_coefficients(&mut self) {
        let n = self.vertices.len();
        for i in 0..n {
            if let Some(j) = self.vertices[i].next() {
                let (pp1, vp1) = (self.vertices[j].p(), self.vertices[j].v());
                let dtp1 = self.segment_span(i);
                self.vertices[i].compute_hermite(pp1, vp1, dtp1);
            }
        }
        if n == 1 {
            self.vertices[0].compute_isolated();
        } else if !self.closed {
            let (head, tail) = self.vertices.split_at_mut(n - 1);
            tail[0].compute_terminal(&head[n - 2]);
        }
    }

    /// The vertex whose coefficients govern parameter `u`.
    ///
    /// Segments are half-open, `[t_i, t_i+1)`. The end of an open path is
    /// included and resolves to the last vertex; a closed path's domain
    /// excludes `max_t`, which is the same point as `min_t`.
    fn segment_at(&self, u: f64) -> Result<&ControlVertex, SplineError> {
        if self.dirty {
            return Err(SplineError::NotConstructed);
        }
        let in_domain = if self.closed {
            u >= self.min_t && u < self.max_t
        } else {
            u >= self.min_t && u <= self.max_t
        };
        if !in_domain {
            return Err(SplineError::OutOfDomain {
                u,
                min_t: self.min_t,
                max_t: self.max_t,
            });
        }
        // Parameters strictly increase, and u >= t_0, so at least one matches.
        let count = self.vertices.partition_point(|v| v.t() <= u);
        Ok(&self.vertices[count - 1])
    }

    /// The position on the curve at parameter `u`.
    pub fn position(&self, u: f64) -> Result<Vector3, SplineError> {
        Ok(self.segment_at(u)?.eval_position(u))
    }

    /// The first derivative of the curve at parameter `u`.
    pub fn velocity(&self, u: f64) -> Result<Vector3, SplineError> {
        Ok(self.segment_at(u)?.eval_velocity(u))
    }

    /// The second derivative of the curve at parameter `u`.
    pub fn acceleration(&self, u: f64) -> Result<Vector3, SplineError> {
        Ok(self.segment_at(u)?.eval_acceleration(u))
    }

    /// Bring an arbitrary parameter into the domain.
    ///
    /// Open paths clamp to `[min_t, max_t]`; closed paths wrap around into
    /// `[min_t, max_t)`. Only meaningful once the spline is constructed.
    pub fn clamp_parameter(&self, u: f64) -> f64 {
        if self.closed {
            util::wrap(u, self.min_t, self.max_t)
        } else {
            util::clamp(u, self.min_t, self.max_t)
        }
    }

    /// Positions at `n` parameters evenly spread over the domain.
    ///
    /// For an open path the first and last samples are the end points.
    pub fn sample(&self, n: usize) -> Result<Vec<Vector3>, SplineError> {
        if self.dirty {
            return Err(SplineError::NotConstructed);
        }
        let range = self.max_t - self.min_t;
        let steps = if self.closed { n } else { n.saturating_sub(1).max(1) };
        (0..n)
            .map(|i| {
                let u = if !self.closed && i + 1 == n && n > 1 {
                    self.max_t
                } else {
                    self.min_t + range * (i as f64 / steps as f64)
                };
                self.position(u)
            })
            .collect()
    }

    /// Render the x/y projection of the spline to a Bézier path.
    ///
    /// Every Hermite segment is exactly a cubic Bézier, so this is lossless.
    pub fn render_xy(&self) -> Result<BezPath, SplineError> {
        let mut path = BezPath::new();
        self.render_xy_extend(&mut path)?;
        Ok(path)
    }

    /// Render the x/y projection, appending to the given path.
    pub fn render_xy_extend(&self, path: &mut BezPath) -> Result<(), SplineError> {
        if self.dirty {
            return Err(SplineError::NotConstructed);
        }
        path.move_to(self.vertices[0].p().xy());
        for i in 0..self.n_segments() {
            let start = &self.vertices[i];
            let end = &self.vertices[(i + 1) % self.vertices.len()];
            let third = self.segment_span(i) / 3.0;
            let p1 = start.p() + start.v() * third;
            let p2 = end.p() - end.v() * third;
            path.curve_to(p1.xy(), p2.xy(), end.p().xy());
        }
        if self.closed {
            path.close_path();
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// `true` if the spline is constructed and up to date with its vertices.
    pub fn is_constructed(&self) -> bool {
        !self.dirty
    }

    pub fn parameterization(&self) -> Parameterization {
        self.parameterization
    }

    /// The control vertices, in path order.
    pub fn vertices(&self) -> &[ControlVertex] {
        &self.vertices
    }

    pub fn control_vertex(&self, i: usize) -> Option<&ControlVertex> {
        self.vertices.get(i)
    }

    /// The lower bound of the domain, valid after construction.
    pub fn min_t(&self) -> f64 {
        self.min_t
    }

    /// The upper bound of the domain, valid after construction.
    ///
    /// For a closed path this lies past the last vertex by the length of
    /// the wrap segment.
    pub fn max_t(&self) -> f64 {
        self.max_t
    }
}
