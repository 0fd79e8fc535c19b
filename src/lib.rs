//! A Catmull-Rom spline through 3D control points.
//!
//! The curve passes through every control point. Each point is assigned a
//! parameter equal to the accumulated straight-line distance along the
//! control polygon, a velocity is estimated at each point from its
//! neighbors, and consecutive points are joined by cubic Hermite segments.
//! Position, velocity and acceleration can then be evaluated for any
//! parameter, on open paths and on closed loops.
//!
//! ```
//! use catmull_spline::{CatmullSpline, Vector3};
//!
//! let mut spline = CatmullSpline::new();
//! spline.add_control_vertex(Vector3::new(0.0, 0.0, 0.0));
//! spline.add_control_vertex(Vector3::new(1.0, 1.0, 1.0));
//! spline.construct().unwrap();
//!
//! let end = spline.max_t();
//! assert_eq!(end, 3f64.sqrt());
//! assert_eq!(spline.position(end), Ok(Vector3::new(1.0, 1.0, 1.0)));
//! assert!(spline.position(end + 1.0).is_err());
//! ```

mod error;
mod spline;
pub mod util;
mod vector3;
mod vertex;

pub use error::SplineError;
pub use spline::CatmullSpline;
pub use vector3::Vector3;
pub use vertex::{ControlVertex, Parameterization};
