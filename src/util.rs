//! Parameter helpers for callers driving a spline.

/// Clamp `val` into `min..=max`.
///
/// NaN passes through unchanged.
pub fn clamp(val: f64, min: f64, max: f64) -> f64 {
    let t = if val < min { min } else { val };
    if t > max {
        max
    } else {
        t
    }
}

/// Wrap `val` into the half-open range `min..max`, treating it as periodic.
pub fn wrap(val: f64, min: f64, max: f64) -> f64 {
    let period = max - min;
    let x = min + (val - min).rem_euclid(period);
    // rem_euclid can round up to exactly `period` for tiny negative inputs.
    if x >= max {
        min
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_inside() {
        assert_eq!(clamp(0.5, -1.0, 1.0), 0.5);
        assert_eq!(clamp(2.5, -1.0, 3.0), 2.5);
    }

    #[test]
    fn clamp_min() {
        assert_eq!(clamp(-1.5, -1.0, 1.0), -1.0);
        assert_eq!(clamp(-1.5, -2.5, 1.0), -1.5);
    }

    #[test]
    fn clamp_max() {
        assert_eq!(clamp(2.0, -2.5, 1.0), 1.0);
    }

    #[test]
    fn wrap_periodic() {
        assert_eq!(wrap(5.0, 0.0, 4.0), 1.0);
        assert_eq!(wrap(-1.0, 0.0, 4.0), 3.0);
        assert_eq!(wrap(4.0, 0.0, 4.0), 0.0);
        assert_eq!(wrap(2.5, 1.0, 3.0), 2.5);
        assert!(wrap(-1e-20, 0.0, 4.0) < 4.0);
    }
}
