use thiserror::Error;

/// Errors from building or querying a [`CatmullSpline`](crate::CatmullSpline).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SplineError {
    /// Construction was attempted on a spline with no control vertices.
    #[error("cannot construct a spline without control vertices")]
    NoVertices,
    /// A closed spline needs at least two control vertices.
    #[error("a closed spline needs at least 2 control vertices, {provided} were provided")]
    NotEnoughVerticesForLoop {
        /// The number of vertices the spline had.
        provided: usize,
    },
    /// The segment starting at `index` spans no parameter range.
    ///
    /// This happens for coincident consecutive control points, or for explicit
    /// parameters that do not increase.
    #[error("segment {index} has a parameter span of {span}, expected a positive finite span")]
    DegenerateSegment { index: usize, span: f64 },
    /// The spline was queried before construction, or after a vertex was
    /// added without constructing again.
    #[error("the spline has not been constructed")]
    NotConstructed,
    /// The query parameter lies outside the curve.
    #[error("parameter {u} is outside the spline domain [{min_t}, {max_t}]")]
    OutOfDomain { u: f64, min_t: f64, max_t: f64 },
}
